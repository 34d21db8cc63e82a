// The closed set of report indicators and their static descriptors.

use crate::scope::{Axis, ScopeKind};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorKey {
    ExportTotalsClosed,
    ExportTotalsRunning,
    ExportNonMiningClosed,
    ExportNonMiningRunning,
    ExportCompanyCountClosed,
    ExportCompanyCountRunning,
    ExportCompaniesClosed,
    ExportCompaniesRunning,
    ForeignDirectInvestmentClosed,
    ForeignDirectInvestmentRunning,
    OutwardInvestmentClosed,
    OutwardInvestmentRunning,
    UnctadForeignDirectInvestment,
    UnctadOutwardInvestment,
    TradeBalance,
    TourismArrivalsClosed,
    TourismArrivalsRunning,
    OpportunitiesExport,
    OpportunitiesInvestment,
    OpportunitiesTourism,
    Connectivity,
    MiningWeightClosed,
    MiningWeightRunning,
    NonMiningWeightClosed,
    NonMiningWeightRunning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    Closed,
    Running,
}

/// Breakdown a fact list is grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Total,
    ExportType,
    Continent,
    Department,
    Country,
    Sector,
    Subsector,
    TradeAgreement,
    Company,
    TransportMode,
    EconomicActivity,
    BalanceType,
    ResidenceCountry,
    LodgingDepartment,
    LodgingCity,
    Gender,
    TravelReason,
}

impl Dimension {
    pub const ALL: [Dimension; 17] = [
        Dimension::Total,
        Dimension::ExportType,
        Dimension::Continent,
        Dimension::Department,
        Dimension::Country,
        Dimension::Sector,
        Dimension::Subsector,
        Dimension::TradeAgreement,
        Dimension::Company,
        Dimension::TransportMode,
        Dimension::EconomicActivity,
        Dimension::BalanceType,
        Dimension::ResidenceCountry,
        Dimension::LodgingDepartment,
        Dimension::LodgingCity,
        Dimension::Gender,
        Dimension::TravelReason,
    ];

    pub fn from_name(name: &str) -> Option<Dimension> {
        Dimension::ALL.iter().copied().find(|d| d.as_str() == name)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::Total => "total",
            Dimension::ExportType => "export_type",
            Dimension::Continent => "continent",
            Dimension::Department => "department",
            Dimension::Country => "country",
            Dimension::Sector => "sector",
            Dimension::Subsector => "subsector",
            Dimension::TradeAgreement => "trade_agreement",
            Dimension::Company => "company",
            Dimension::TransportMode => "transport_mode",
            Dimension::EconomicActivity => "economic_activity",
            Dimension::BalanceType => "balance_type",
            Dimension::ResidenceCountry => "residence_country",
            Dimension::LodgingDepartment => "lodging_department",
            Dimension::LodgingCity => "lodging_city",
            Dimension::Gender => "gender",
            Dimension::TravelReason => "travel_reason",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How an indicator's data reaches the rendering layer.
#[derive(Debug, Clone, PartialEq)]
pub enum Presentation {
    /// One leaderboard per dimension.
    Rollup(Vec<Dimension>),
    /// Rows passed through as retrieved.
    Table(Dimension),
    /// Non-numeric or scalar entries (opportunities, flights, counts).
    Listing,
}

/// Immutable labels rendered in place of (or above) an indicator's data.
#[derive(Debug, Clone, Copy)]
pub struct IndicatorDescriptor {
    pub available_label: &'static str,
    pub unavailable_label: &'static str,
}

static DESCRIPTORS: Lazy<HashMap<IndicatorKey, IndicatorDescriptor>> = Lazy::new(|| {
    use IndicatorKey::*;
    let d = |available_label: &'static str, unavailable_label: &'static str| IndicatorDescriptor {
        available_label,
        unavailable_label,
    };
    HashMap::from([
        (ExportTotalsClosed, d("CON DATOS DE EXPORTACIONES TOTALES CERRADO", "SIN DATOS DE EXPORTACIONES TOTALES CERRADO")),
        (ExportTotalsRunning, d("CON DATOS DE EXPORTACIONES TOTALES CORRIDO", "SIN DATOS DE EXPORTACIONES TOTALES CORRIDO")),
        (ExportNonMiningClosed, d("CON DATOS DE EXPORTACIONES NME CERRADO", "SIN DATOS DE EXPORTACIONES NME CERRADO")),
        (ExportNonMiningRunning, d("CON DATOS DE EXPORTACIONES NME CORRIDO", "SIN DATOS DE EXPORTACIONES NME CORRIDO")),
        (ExportCompanyCountClosed, d("CON DATOS DE CONTEO CERRADO", "SIN DATOS DE CONTEO CERRADO")),
        (ExportCompanyCountRunning, d("CON DATOS DE CONTEO CORRIDO", "SIN DATOS DE CONTEO CORRIDO")),
        (ExportCompaniesClosed, d("CON DATOS DE EMPRESAS CERRADO", "SIN DATOS DE EMPRESAS CERRADO")),
        (ExportCompaniesRunning, d("CON DATOS DE EMPRESAS CORRIDO", "SIN DATOS DE EMPRESAS CORRIDO")),
        (ForeignDirectInvestmentClosed, d("CON DATOS DE IED CERRADO", "SIN DATOS DE IED CERRADO")),
        (ForeignDirectInvestmentRunning, d("CON DATOS DE IED CORRIDO", "SIN DATOS DE IED CORRIDO")),
        (OutwardInvestmentClosed, d("CON DATOS DE ICE CERRADO", "SIN DATOS DE ICE CERRADO")),
        (OutwardInvestmentRunning, d("CON DATOS DE ICE CORRIDO", "SIN DATOS DE ICE CORRIDO")),
        (UnctadForeignDirectInvestment, d("CON DATOS CERRADO", "SIN DATOS CERRADO")),
        (UnctadOutwardInvestment, d("CON DATOS CERRADO", "SIN DATOS CERRADO")),
        (TradeBalance, d("CON DATOS CERRADO", "SIN DATOS CERRADO")),
        (TourismArrivalsClosed, d("CON DATOS DE TURISMO CERRADO", "SIN DATOS DE TURISMO CERRADO")),
        (TourismArrivalsRunning, d("CON DATOS DE TURISMO CORRIDO", "SIN DATOS DE TURISMO CORRIDO")),
        (OpportunitiesExport, d("CON OPORTUNIDADES", "SIN OPORTUNIDADES")),
        (OpportunitiesInvestment, d("CON OPORTUNIDADES", "SIN OPORTUNIDADES")),
        (OpportunitiesTourism, d("CON OPORTUNIDADES", "SIN OPORTUNIDADES")),
        (Connectivity, d("CON DATOS DE CONECTIVIDAD", "SIN DATOS DE CONECTIVIDAD")),
        (MiningWeightClosed, d("CON DATOS CERRADO", "SIN DATOS CERRADO")),
        (MiningWeightRunning, d("CON DATOS CORRIDO", "SIN DATOS CORRIDO")),
        (NonMiningWeightClosed, d("CON DATOS CERRADO", "SIN DATOS CERRADO")),
        (NonMiningWeightRunning, d("CON DATOS CORRIDO", "SIN DATOS CORRIDO")),
    ])
});

impl IndicatorKey {
    pub const ALL: [IndicatorKey; 25] = [
        IndicatorKey::ExportTotalsClosed,
        IndicatorKey::ExportTotalsRunning,
        IndicatorKey::ExportNonMiningClosed,
        IndicatorKey::ExportNonMiningRunning,
        IndicatorKey::ExportCompanyCountClosed,
        IndicatorKey::ExportCompanyCountRunning,
        IndicatorKey::ExportCompaniesClosed,
        IndicatorKey::ExportCompaniesRunning,
        IndicatorKey::ForeignDirectInvestmentClosed,
        IndicatorKey::ForeignDirectInvestmentRunning,
        IndicatorKey::OutwardInvestmentClosed,
        IndicatorKey::OutwardInvestmentRunning,
        IndicatorKey::UnctadForeignDirectInvestment,
        IndicatorKey::UnctadOutwardInvestment,
        IndicatorKey::TradeBalance,
        IndicatorKey::TourismArrivalsClosed,
        IndicatorKey::TourismArrivalsRunning,
        IndicatorKey::OpportunitiesExport,
        IndicatorKey::OpportunitiesInvestment,
        IndicatorKey::OpportunitiesTourism,
        IndicatorKey::Connectivity,
        IndicatorKey::MiningWeightClosed,
        IndicatorKey::MiningWeightRunning,
        IndicatorKey::NonMiningWeightClosed,
        IndicatorKey::NonMiningWeightRunning,
    ];

    /// Name used in the warehouse `indicator` column.
    pub fn as_str(&self) -> &'static str {
        use IndicatorKey::*;
        match self {
            ExportTotalsClosed => "export_totals_closed",
            ExportTotalsRunning => "export_totals_running",
            ExportNonMiningClosed => "export_non_mining_closed",
            ExportNonMiningRunning => "export_non_mining_running",
            ExportCompanyCountClosed => "export_company_count_closed",
            ExportCompanyCountRunning => "export_company_count_running",
            ExportCompaniesClosed => "export_companies_closed",
            ExportCompaniesRunning => "export_companies_running",
            ForeignDirectInvestmentClosed => "foreign_direct_investment_closed",
            ForeignDirectInvestmentRunning => "foreign_direct_investment_running",
            OutwardInvestmentClosed => "outward_investment_closed",
            OutwardInvestmentRunning => "outward_investment_running",
            UnctadForeignDirectInvestment => "unctad_foreign_direct_investment",
            UnctadOutwardInvestment => "unctad_outward_investment",
            TradeBalance => "trade_balance",
            TourismArrivalsClosed => "tourism_arrivals_closed",
            TourismArrivalsRunning => "tourism_arrivals_running",
            OpportunitiesExport => "opportunities_export",
            OpportunitiesInvestment => "opportunities_investment",
            OpportunitiesTourism => "opportunities_tourism",
            Connectivity => "connectivity",
            MiningWeightClosed => "mining_weight_closed",
            MiningWeightRunning => "mining_weight_running",
            NonMiningWeightClosed => "non_mining_weight_closed",
            NonMiningWeightRunning => "non_mining_weight_running",
        }
    }

    pub fn from_name(name: &str) -> Option<IndicatorKey> {
        IndicatorKey::ALL.iter().copied().find(|k| k.as_str() == name)
    }

    pub fn descriptor(&self) -> IndicatorDescriptor {
        // Every key is present in the table.
        DESCRIPTORS[self]
    }

    /// Lookup-key axis the indicator's rows are keyed by.
    pub fn axis(&self) -> Axis {
        use IndicatorKey::*;
        match self {
            ForeignDirectInvestmentClosed
            | ForeignDirectInvestmentRunning
            | OutwardInvestmentClosed
            | OutwardInvestmentRunning => Axis::Investment,
            UnctadForeignDirectInvestment | UnctadOutwardInvestment => Axis::UnctadCode,
            TourismArrivalsClosed | TourismArrivalsRunning | Connectivity => Axis::Tourism,
            _ => Axis::Trade,
        }
    }

    pub fn period(&self) -> Option<Period> {
        use IndicatorKey::*;
        match self {
            ExportTotalsClosed
            | ExportNonMiningClosed
            | ExportCompanyCountClosed
            | ExportCompaniesClosed
            | ForeignDirectInvestmentClosed
            | OutwardInvestmentClosed
            | UnctadForeignDirectInvestment
            | UnctadOutwardInvestment
            | TradeBalance
            | TourismArrivalsClosed
            | MiningWeightClosed
            | NonMiningWeightClosed => Some(Period::Closed),
            ExportTotalsRunning
            | ExportNonMiningRunning
            | ExportCompanyCountRunning
            | ExportCompaniesRunning
            | ForeignDirectInvestmentRunning
            | OutwardInvestmentRunning
            | TourismArrivalsRunning
            | MiningWeightRunning
            | NonMiningWeightRunning => Some(Period::Running),
            OpportunitiesExport | OpportunitiesInvestment | OpportunitiesTourism | Connectivity => None,
        }
    }

    pub fn is_investment(&self) -> bool {
        self.axis() == Axis::Investment
    }

    pub fn is_weight(&self) -> bool {
        use IndicatorKey::*;
        matches!(
            self,
            MiningWeightClosed | MiningWeightRunning | NonMiningWeightClosed | NonMiningWeightRunning
        )
    }

    /// What the report renders for this indicator under a scope kind.
    pub fn presentation(&self, kind: ScopeKind) -> Presentation {
        use IndicatorKey::*;
        match self {
            ExportTotalsClosed | ExportTotalsRunning => Presentation::Rollup(vec![Dimension::ExportType]),
            ExportNonMiningClosed | ExportNonMiningRunning => {
                let mut dims = vec![
                    Dimension::Continent,
                    Dimension::Department,
                    Dimension::Country,
                    Dimension::Sector,
                    Dimension::Subsector,
                ];
                if matches!(kind, ScopeKind::Department | ScopeKind::National) {
                    dims.push(Dimension::TradeAgreement);
                }
                Presentation::Rollup(dims)
            }
            ExportCompaniesClosed | ExportCompaniesRunning => Presentation::Rollup(vec![Dimension::Company]),
            ForeignDirectInvestmentClosed | ForeignDirectInvestmentRunning => {
                if kind == ScopeKind::National {
                    Presentation::Rollup(vec![Dimension::EconomicActivity, Dimension::Country])
                } else {
                    Presentation::Rollup(vec![Dimension::Country])
                }
            }
            OutwardInvestmentClosed | OutwardInvestmentRunning => Presentation::Rollup(vec![Dimension::Country]),
            UnctadForeignDirectInvestment | UnctadOutwardInvestment => Presentation::Table(Dimension::Country),
            TradeBalance => Presentation::Table(Dimension::BalanceType),
            TourismArrivalsClosed | TourismArrivalsRunning => Presentation::Rollup(vec![
                Dimension::ResidenceCountry,
                Dimension::LodgingDepartment,
                Dimension::LodgingCity,
                Dimension::Gender,
                Dimension::TravelReason,
            ]),
            MiningWeightClosed | MiningWeightRunning | NonMiningWeightClosed | NonMiningWeightRunning => {
                Presentation::Rollup(vec![Dimension::TransportMode])
            }
            ExportCompanyCountClosed
            | ExportCompanyCountRunning
            | OpportunitiesExport
            | OpportunitiesInvestment
            | OpportunitiesTourism
            | Connectivity => Presentation::Listing,
        }
    }
}

impl fmt::Display for IndicatorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Data availability of one indicator for one scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    Available,
    Unavailable,
    /// The indicator has no meaning for the scope kind; never probed.
    NotApplicable,
}

impl Availability {
    pub fn from_probe(exists: bool) -> Self {
        if exists {
            Availability::Available
        } else {
            Availability::Unavailable
        }
    }

    pub fn is_available(&self) -> bool {
        *self == Availability::Available
    }
}

/// Complete, read-only availability map for one report.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct AvailabilityMap {
    entries: BTreeMap<IndicatorKey, Availability>,
}

impl AvailabilityMap {
    /// Keys missing from `entries` are recorded as not applicable, so the map
    /// always covers every indicator.
    pub fn new(entries: impl IntoIterator<Item = (IndicatorKey, Availability)>) -> Self {
        let mut map: BTreeMap<_, _> = entries.into_iter().collect();
        for key in IndicatorKey::ALL {
            map.entry(key).or_insert(Availability::NotApplicable);
        }
        Self { entries: map }
    }

    pub fn get(&self, key: IndicatorKey) -> Availability {
        self.entries
            .get(&key)
            .copied()
            .unwrap_or(Availability::NotApplicable)
    }

    pub fn is_available(&self, key: IndicatorKey) -> bool {
        self.get(key).is_available()
    }

    /// The descriptor label matching this entry's state.
    pub fn label(&self, key: IndicatorKey) -> &'static str {
        let descriptor = key.descriptor();
        if self.is_available(key) {
            descriptor.available_label
        } else {
            descriptor.unavailable_label
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (IndicatorKey, Availability)> + '_ {
        self.entries.iter().map(|(k, v)| (*k, *v))
    }

    pub fn available_count(&self) -> usize {
        self.entries.values().filter(|a| a.is_available()).count()
    }
}
