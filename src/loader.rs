use crate::error::{ReportError, SourceError};
use crate::indicators::{Dimension, IndicatorKey};
use crate::periods::ParameterRow;
use crate::rollup::{TOTAL_LABEL, UNDEFINED_COMPANY};
use crate::scope::{
    Axis, CountryRecord, DepartmentRecord, GeographyReference, HubRecord, RegionRecord, Scope,
    ScopeKind,
};
use crate::source::{FactRow, FactSource, ListingEntry, ReferenceTotal};
use crate::types::{RawFactRow, RawListingRow};
use crate::util::parse_f64_safe;
use clap::ValueEnum;
use csv::ReaderBuilder;
use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::{debug, info, warn};

pub const FACTS_FILE: &str = "facts.csv";
pub const LISTINGS_FILE: &str = "listings.csv";
pub const PARAMETERS_FILE: &str = "parameters.csv";
pub const REGIONS_FILE: &str = "regions.csv";
pub const HUBS_FILE: &str = "hubs.csv";
pub const COUNTRIES_FILE: &str = "countries.csv";
pub const DEPARTMENTS_FILE: &str = "departments.csv";

/// Export-type category that non-mining shares are measured against.
pub const NON_MINING_CATEGORY: &str = "No Mineras";

const KG_PER_TONNE: f64 = 1000.0;

const COMPANY_COUNT_ITEM: &str = "Empresas exportadoras";

#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub total_rows: usize,
    pub loaded_rows: usize,
    pub parse_errors: usize,
    pub unknown_keys: usize,
}

#[derive(Debug, Clone)]
struct WarehouseFact {
    indicator: IndicatorKey,
    grouping: ScopeKind,
    unit: String,
    dimension: Dimension,
    category: String,
    prior_value: f64,
    current_value: f64,
}

#[derive(Debug, Clone)]
struct WarehouseListing {
    indicator: IndicatorKey,
    grouping: ScopeKind,
    unit: String,
    entry: ListingEntry,
}

/// In-memory warehouse loaded from `facts.csv` and `listings.csv`.
#[derive(Debug, Clone, Default)]
pub struct Warehouse {
    facts: Vec<WarehouseFact>,
    listings: Vec<WarehouseListing>,
}

fn parse_grouping(s: &str) -> Option<ScopeKind> {
    ScopeKind::value_variants()
        .iter()
        .copied()
        .find(|k| k.as_str() == s.trim())
}

fn required(s: Option<String>) -> Option<String> {
    s.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

impl Warehouse {
    pub fn open(dir: &Path) -> Result<(Warehouse, LoadReport), ReportError> {
        let (facts, mut report) = load_facts(&dir.join(FACTS_FILE))?;
        let (listings, listing_report) = load_listings(&dir.join(LISTINGS_FILE))?;
        report.total_rows += listing_report.total_rows;
        report.loaded_rows += listing_report.loaded_rows;
        report.parse_errors += listing_report.parse_errors;
        report.unknown_keys += listing_report.unknown_keys;
        info!(
            facts = facts.len(),
            listings = listings.len(),
            parse_errors = report.parse_errors,
            "warehouse loaded"
        );
        Ok((Warehouse { facts, listings }, report))
    }

    /// Whether a stored row keyed by (`grouping`, `unit`) belongs to `scope`
    /// for the indicator's axis.
    ///
    /// Trade rows are stored per grouping. Other axes are stored per foreign
    /// country (`country`) or per department (`department`); the national
    /// scope takes every foreign row.
    fn row_in_scope(indicator: IndicatorKey, grouping: ScopeKind, unit: &str, scope: &Scope) -> bool {
        match indicator.axis() {
            Axis::Trade => grouping == scope.kind() && scope.contains_key(Axis::Trade, unit),
            axis => {
                let key_space = if scope.kind() == ScopeKind::Department {
                    ScopeKind::Department
                } else {
                    ScopeKind::Country
                };
                grouping == key_space
                    && (scope.kind() == ScopeKind::National || scope.contains_key(axis, unit))
            }
        }
    }

    fn matching_facts<'a>(
        &'a self,
        indicator: IndicatorKey,
        scope: &'a Scope,
    ) -> impl Iterator<Item = &'a WarehouseFact> + 'a {
        self.facts.iter().filter(move |f| {
            f.indicator == indicator && Self::row_in_scope(indicator, f.grouping, &f.unit, scope)
        })
    }

    /// Sum matching rows per category, keeping first-seen order.
    fn grouped(
        &self,
        indicator: IndicatorKey,
        scope: &Scope,
        dimension: Dimension,
        category: Option<&str>,
    ) -> Vec<FactRow> {
        let mut rows: Vec<FactRow> = Vec::new();
        for f in self
            .matching_facts(indicator, scope)
            .filter(|f| f.dimension == dimension)
            .filter(|f| category.map_or(true, |c| f.category == c))
        {
            match rows.iter_mut().find(|r| r.category == f.category) {
                Some(r) => {
                    r.prior_value += f.prior_value;
                    r.current_value += f.current_value;
                }
                None => rows.push(FactRow::new(f.category.clone(), f.prior_value, f.current_value)),
            }
        }
        if indicator.is_weight() {
            for r in &mut rows {
                r.prior_value /= KG_PER_TONNE;
                r.current_value /= KG_PER_TONNE;
            }
        }
        rows
    }

    fn has_listing(&self, indicator: IndicatorKey, scope: &Scope) -> bool {
        self.listings
            .iter()
            .any(|l| l.indicator == indicator && Self::row_in_scope(indicator, l.grouping, &l.unit, scope))
    }

    /// Count of identified companies exporting at least the scope threshold,
    /// for scopes without a stored count.
    fn company_count(&self, companies: IndicatorKey, scope: &Scope) -> Option<ListingEntry> {
        let rows = self.grouped(companies, scope, Dimension::Company, None);
        if rows.is_empty() {
            return None;
        }
        let counted = rows
            .iter()
            .filter(|r| r.category != UNDEFINED_COMPANY && r.current_value >= scope.threshold())
            .count();
        debug!(
            indicator = %companies,
            counted,
            below_threshold = rows.len() - counted,
            threshold = scope.threshold(),
            "company count derived from leaderboard rows"
        );
        Some(ListingEntry {
            group: String::new(),
            item: COMPANY_COUNT_ITEM.to_string(),
            value: Some(counted as f64),
        })
    }

    /// Where each indicator's share denominator comes from:
    /// (indicator, dimension, optional category filter).
    fn reference_basis(
        indicator: IndicatorKey,
        kind: ScopeKind,
    ) -> (IndicatorKey, Dimension, Option<&'static str>) {
        use IndicatorKey::*;
        match indicator {
            ExportTotalsClosed | ExportTotalsRunning => (indicator, Dimension::Total, None),
            ExportNonMiningClosed | ExportCompaniesClosed => {
                (ExportTotalsClosed, Dimension::ExportType, Some(NON_MINING_CATEGORY))
            }
            ExportNonMiningRunning | ExportCompaniesRunning => {
                (ExportTotalsRunning, Dimension::ExportType, Some(NON_MINING_CATEGORY))
            }
            ForeignDirectInvestmentClosed
            | ForeignDirectInvestmentRunning
            | OutwardInvestmentClosed
            | OutwardInvestmentRunning => {
                if kind == ScopeKind::National {
                    (indicator, Dimension::Total, None)
                } else {
                    (indicator, Dimension::Country, None)
                }
            }
            UnctadForeignDirectInvestment | UnctadOutwardInvestment => (indicator, Dimension::Country, None),
            TradeBalance => (indicator, Dimension::BalanceType, None),
            TourismArrivalsClosed | TourismArrivalsRunning => (indicator, Dimension::ResidenceCountry, None),
            MiningWeightClosed | MiningWeightRunning | NonMiningWeightClosed | NonMiningWeightRunning => {
                (indicator, Dimension::TransportMode, None)
            }
            ExportCompanyCountClosed
            | ExportCompanyCountRunning
            | OpportunitiesExport
            | OpportunitiesInvestment
            | OpportunitiesTourism
            | Connectivity => (indicator, Dimension::Total, None),
        }
    }
}

impl FactSource for Warehouse {
    fn probe_exists(&self, indicator: IndicatorKey, scope: &Scope) -> Result<bool, SourceError> {
        if let Some(companies) = counted_companies(indicator) {
            return Ok(self.has_listing(indicator, scope)
                || self.matching_facts(companies, scope).next().is_some());
        }
        let in_facts = self.matching_facts(indicator, scope).next().is_some();
        // Export shares are measured against a basis row that must exist too.
        if in_facts && needs_reference_row(indicator) {
            let (basis, dimension, category) = Self::reference_basis(indicator, scope.kind());
            return Ok(!self.grouped(basis, scope, dimension, category).is_empty());
        }
        Ok(in_facts || self.has_listing(indicator, scope))
    }

    fn fetch(
        &self,
        indicator: IndicatorKey,
        scope: &Scope,
        dimension: Dimension,
    ) -> Result<Vec<FactRow>, SourceError> {
        Ok(self.grouped(indicator, scope, dimension, None))
    }

    fn fetch_reference_total(
        &self,
        indicator: IndicatorKey,
        scope: &Scope,
    ) -> Result<ReferenceTotal, SourceError> {
        let (basis, dimension, category) = Self::reference_basis(indicator, scope.kind());
        let total = self
            .grouped(basis, scope, dimension, category)
            .iter()
            .fold(ReferenceTotal::default(), |acc, r| {
                ReferenceTotal::new(acc.prior_value + r.prior_value, acc.current_value + r.current_value)
            });
        Ok(total)
    }

    fn fetch_listing(
        &self,
        indicator: IndicatorKey,
        scope: &Scope,
    ) -> Result<Vec<ListingEntry>, SourceError> {
        let entries: Vec<ListingEntry> = self
            .listings
            .iter()
            .filter(|l| l.indicator == indicator && Self::row_in_scope(indicator, l.grouping, &l.unit, scope))
            .map(|l| l.entry.clone())
            .collect();
        match counted_companies(indicator) {
            Some(companies) if entries.is_empty() => Ok(self.company_count(companies, scope).into_iter().collect()),
            _ => Ok(entries),
        }
    }
}

/// Company leaderboard a company-count indicator is derived from.
fn counted_companies(indicator: IndicatorKey) -> Option<IndicatorKey> {
    match indicator {
        IndicatorKey::ExportCompanyCountClosed => Some(IndicatorKey::ExportCompaniesClosed),
        IndicatorKey::ExportCompanyCountRunning => Some(IndicatorKey::ExportCompaniesRunning),
        _ => None,
    }
}

fn needs_reference_row(indicator: IndicatorKey) -> bool {
    use IndicatorKey::*;
    matches!(
        indicator,
        ExportTotalsClosed
            | ExportTotalsRunning
            | ExportNonMiningClosed
            | ExportNonMiningRunning
            | ExportCompaniesClosed
            | ExportCompaniesRunning
    )
}

fn load_facts(path: &Path) -> Result<(Vec<WarehouseFact>, LoadReport), ReportError> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_path(path)?;
    let mut report = LoadReport::default();
    let mut facts = Vec::new();

    for result in rdr.deserialize::<RawFactRow>() {
        report.total_rows += 1;
        let row = match result {
            Ok(r) => r,
            Err(_) => {
                report.parse_errors += 1;
                continue;
            }
        };

        let (indicator, grouping, dimension) = match (
            row.indicator.as_deref().map(str::trim).and_then(IndicatorKey::from_name),
            row.grouping.as_deref().and_then(parse_grouping),
            row.dimension.as_deref().map(str::trim).and_then(Dimension::from_name),
        ) {
            (Some(i), Some(g), Some(d)) => (i, g, d),
            _ => {
                report.unknown_keys += 1;
                continue;
            }
        };
        let (unit, category) = match (required(row.unit), required(row.category)) {
            (Some(u), Some(c)) => (u, c),
            _ => {
                report.parse_errors += 1;
                continue;
            }
        };
        // A missing prior value is a unit that did not trade in the prior period.
        let prior_value = parse_f64_safe(row.prior_value.as_deref()).unwrap_or(0.0);
        let current_value = match parse_f64_safe(row.current_value.as_deref()) {
            Some(v) => v,
            None => {
                report.parse_errors += 1;
                continue;
            }
        };

        facts.push(WarehouseFact {
            indicator,
            grouping,
            unit,
            dimension,
            category: if dimension == Dimension::Total { TOTAL_LABEL.to_string() } else { category },
            prior_value,
            current_value,
        });
    }

    report.loaded_rows = facts.len();
    if report.parse_errors > 0 || report.unknown_keys > 0 {
        warn!(
            path = %path.display(),
            parse_errors = report.parse_errors,
            unknown_keys = report.unknown_keys,
            "skipped malformed fact rows"
        );
    }
    Ok((facts, report))
}

fn load_listings(path: &Path) -> Result<(Vec<WarehouseListing>, LoadReport), ReportError> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_path(path)?;
    let mut report = LoadReport::default();
    let mut listings = Vec::new();

    for result in rdr.deserialize::<RawListingRow>() {
        report.total_rows += 1;
        let row = match result {
            Ok(r) => r,
            Err(_) => {
                report.parse_errors += 1;
                continue;
            }
        };
        let (indicator, grouping) = match (
            row.indicator.as_deref().map(str::trim).and_then(IndicatorKey::from_name),
            row.grouping.as_deref().and_then(parse_grouping),
        ) {
            (Some(i), Some(g)) => (i, g),
            _ => {
                report.unknown_keys += 1;
                continue;
            }
        };
        let (unit, item) = match (required(row.unit), required(row.item)) {
            (Some(u), Some(i)) => (u, i),
            _ => {
                report.parse_errors += 1;
                continue;
            }
        };
        listings.push(WarehouseListing {
            indicator,
            grouping,
            unit,
            entry: ListingEntry {
                group: required(row.group).unwrap_or_default(),
                item,
                value: parse_f64_safe(row.value.as_deref()),
            },
        });
    }

    report.loaded_rows = listings.len();
    if report.parse_errors > 0 || report.unknown_keys > 0 {
        warn!(
            path = %path.display(),
            parse_errors = report.parse_errors,
            unknown_keys = report.unknown_keys,
            "skipped malformed listing rows"
        );
    }
    Ok((listings, report))
}

fn read_table<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, ReportError> {
    let mut rdr = ReaderBuilder::new().trim(csv::Trim::All).from_path(path)?;
    let mut rows = Vec::new();
    for result in rdr.deserialize::<T>() {
        rows.push(result?);
    }
    debug!(path = %path.display(), rows = rows.len(), "reference table loaded");
    Ok(rows)
}

pub fn load_parameters(dir: &Path) -> Result<Vec<ParameterRow>, ReportError> {
    read_table(&dir.join(PARAMETERS_FILE))
}

/// Reference geography read from the four reference CSV tables.
#[derive(Debug, Clone)]
pub struct CsvGeography {
    regions: Vec<RegionRecord>,
    hubs: Vec<HubRecord>,
    countries: Vec<CountryRecord>,
    departments: Vec<DepartmentRecord>,
}

impl CsvGeography {
    pub fn load(dir: &Path) -> Result<Self, ReportError> {
        let geography = Self {
            regions: read_table(&dir.join(REGIONS_FILE))?,
            hubs: read_table(&dir.join(HUBS_FILE))?,
            countries: read_table(&dir.join(COUNTRIES_FILE))?,
            departments: read_table(&dir.join(DEPARTMENTS_FILE))?,
        };
        info!(
            regions = geography.regions.len(),
            hubs = geography.hubs.len(),
            countries = geography.countries.len(),
            departments = geography.departments.len(),
            "reference geography loaded"
        );
        Ok(geography)
    }
}

impl GeographyReference for CsvGeography {
    fn regions(&self) -> &[RegionRecord] {
        &self.regions
    }
    fn hubs(&self) -> &[HubRecord] {
        &self.hubs
    }
    fn countries(&self) -> &[CountryRecord] {
        &self.countries
    }
    fn departments(&self) -> &[DepartmentRecord] {
        &self.departments
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rollup::{tiered_rollup, TierPolicy};
    use approx::assert_relative_eq;
    use std::collections::{BTreeMap, BTreeSet};
    use std::fs;
    use tempfile::TempDir;

    const FACTS: &str = "\
indicator,grouping,unit,dimension,category,prior_value,current_value
export_totals_closed,country,CHILE,total,anything,100,120
export_totals_closed,country,CHILE,export_type,No Mineras,80,90
export_totals_closed,country,CHILE,export_type,Mineras,20,30
export_non_mining_closed,country,CHILE,sector,Agro,30,40
export_non_mining_closed,country,CHILE,sector,Agro,10,5
export_non_mining_closed,country,CHILE,sector,Industria,40,45
export_non_mining_closed,country,PERU,sector,Agro,999,999
export_companies_closed,country,CHILE,company,Small SAS,1,5000
export_companies_closed,country,CHILE,company,Big SA,1,20000
mining_weight_closed,country,CHILE,transport_mode,Marítimo,2000,3500
foreign_direct_investment_closed,country,Chile,country,Chile,10,12
tourism_arrivals_closed,country,211,residence_country,Chile,500,700
tourism_arrivals_closed,department,05,residence_country,Chile,50,70
not_an_indicator,country,CHILE,total,x,1,1
export_totals_running,country,CHILE,total,x,1,abc
";

    const LISTINGS: &str = "\
indicator,grouping,unit,group,item,value
opportunities_export,country,CHILE,Agroalimentos,Cafés especiales,
connectivity,department,25,Avianca,Bogotá - Santiago,14
";

    fn warehouse() -> (TempDir, Warehouse, LoadReport) {
        warehouse_with(FACTS)
    }

    fn warehouse_with(facts: &str) -> (TempDir, Warehouse, LoadReport) {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(FACTS_FILE), facts).unwrap();
        fs::write(dir.path().join(LISTINGS_FILE), LISTINGS).unwrap();
        let (wh, report) = Warehouse::open(dir.path()).unwrap();
        (dir, wh, report)
    }

    fn chile(threshold: f64) -> Scope {
        let keys = BTreeMap::from([
            (Axis::Trade, BTreeSet::from(["CHILE".to_string()])),
            (Axis::Investment, BTreeSet::from(["Chile".to_string()])),
            (Axis::Tourism, BTreeSet::from(["211".to_string()])),
        ]);
        Scope::new(ScopeKind::Country, "Chile", keys, threshold)
    }

    #[test]
    fn malformed_rows_are_counted_and_skipped() {
        let (_dir, _wh, report) = warehouse();
        assert_eq!(report.total_rows, 17);
        assert_eq!(report.loaded_rows, 15);
        assert_eq!(report.unknown_keys, 1);
        assert_eq!(report.parse_errors, 1);
    }

    #[test]
    fn fetch_sums_categories_in_first_seen_order() {
        let (_dir, wh, _) = warehouse();
        let rows = wh
            .fetch(IndicatorKey::ExportNonMiningClosed, &chile(0.0), Dimension::Sector)
            .unwrap();
        assert_eq!(rows, vec![FactRow::new("Agro", 40.0, 45.0), FactRow::new("Industria", 40.0, 45.0)]);
    }

    #[test]
    fn non_mining_share_basis_is_the_export_type_row() {
        let (_dir, wh, _) = warehouse();
        let total = wh
            .fetch_reference_total(IndicatorKey::ExportNonMiningClosed, &chile(0.0))
            .unwrap();
        assert_eq!(total, ReferenceTotal::new(80.0, 90.0));
    }

    #[test]
    fn leaderboard_keeps_companies_below_threshold() {
        let facts = "\
indicator,grouping,unit,dimension,category,prior_value,current_value
export_totals_closed,country,CHILE,export_type,No Mineras,100000,200000
export_companies_closed,country,CHILE,company,A,1,60000
export_companies_closed,country,CHILE,company,NO DEFINIDO,1,50000
export_companies_closed,country,CHILE,company,B,1,40000
export_companies_closed,country,CHILE,company,C,1,30000
export_companies_closed,country,CHILE,company,D,1,20000
export_companies_closed,country,CHILE,company,E,1,5000
";
        let (_dir, wh, _) = warehouse_with(facts);
        let scope = chile(10_000.0);
        let rows = wh
            .fetch(IndicatorKey::ExportCompaniesClosed, &scope, Dimension::Company)
            .unwrap();
        assert_eq!(rows.len(), 6);

        let reference = wh.fetch_reference_total(IndicatorKey::ExportCompaniesClosed, &scope).unwrap();
        let result = tiered_rollup(&rows, reference, &TierPolicy::company_leaderboard());
        assert_eq!(result.ranked().len(), 5);
        assert_eq!(result.ranked()[4].label, "E");
        assert_relative_eq!(result.others().unwrap().current_value, 45_000.0);
    }

    #[test]
    fn company_count_is_derived_with_the_threshold() {
        let (_dir, wh, _) = warehouse();
        let scope = chile(10_000.0);
        assert!(wh.probe_exists(IndicatorKey::ExportCompanyCountClosed, &scope).unwrap());
        let entries = wh.fetch_listing(IndicatorKey::ExportCompanyCountClosed, &scope).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].value, Some(1.0));

        let everyone = wh.fetch_listing(IndicatorKey::ExportCompanyCountClosed, &chile(0.0)).unwrap();
        assert_eq!(everyone[0].value, Some(2.0));

        assert!(!wh.probe_exists(IndicatorKey::ExportCompanyCountRunning, &scope).unwrap());
        assert!(wh
            .fetch_listing(IndicatorKey::ExportCompanyCountRunning, &scope)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn export_breakdowns_without_a_basis_row_are_absent() {
        let facts = "\
indicator,grouping,unit,dimension,category,prior_value,current_value
export_totals_closed,country,CHILE,export_type,Mineras,20,30
export_non_mining_closed,country,CHILE,sector,Agro,30,40
export_non_mining_closed,country,CHILE,sector,Industria,20,25
export_companies_closed,country,CHILE,company,Big SA,1,20000
";
        let (_dir, wh, _) = warehouse_with(facts);
        let scope = chile(0.0);
        assert!(!wh.probe_exists(IndicatorKey::ExportNonMiningClosed, &scope).unwrap());
        assert!(!wh.probe_exists(IndicatorKey::ExportCompaniesClosed, &scope).unwrap());
        // Export type rows exist but no total row.
        assert!(!wh.probe_exists(IndicatorKey::ExportTotalsClosed, &scope).unwrap());

        let (_dir, wh, _) = warehouse();
        assert!(wh.probe_exists(IndicatorKey::ExportNonMiningClosed, &scope).unwrap());
        assert!(wh.probe_exists(IndicatorKey::ExportTotalsClosed, &scope).unwrap());
    }

    #[test]
    fn weights_are_reported_in_tonnes() {
        let (_dir, wh, _) = warehouse();
        let rows = wh
            .fetch(IndicatorKey::MiningWeightClosed, &chile(0.0), Dimension::TransportMode)
            .unwrap();
        assert_relative_eq!(rows[0].prior_value, 2.0);
        assert_relative_eq!(rows[0].current_value, 3.5);
    }

    #[test]
    fn non_trade_axes_match_on_their_own_keys() {
        let (_dir, wh, _) = warehouse();
        let scope = chile(0.0);
        assert!(wh.probe_exists(IndicatorKey::ForeignDirectInvestmentClosed, &scope).unwrap());
        let tourism = wh
            .fetch(IndicatorKey::TourismArrivalsClosed, &scope, Dimension::ResidenceCountry)
            .unwrap();
        assert_eq!(tourism, vec![FactRow::new("Chile", 500.0, 700.0)]);

        // The national scope takes every foreign row but no department rows.
        let national = wh
            .fetch_reference_total(IndicatorKey::TourismArrivalsClosed, &Scope::national(0.0))
            .unwrap();
        assert_eq!(national, ReferenceTotal::new(500.0, 700.0));
    }

    #[test]
    fn listings_probe_and_fetch() {
        let (_dir, wh, _) = warehouse();
        let scope = chile(0.0);
        assert!(wh.probe_exists(IndicatorKey::OpportunitiesExport, &scope).unwrap());
        assert!(!wh.probe_exists(IndicatorKey::OpportunitiesTourism, &scope).unwrap());
        let entries = wh.fetch_listing(IndicatorKey::OpportunitiesExport, &scope).unwrap();
        assert_eq!(entries[0].group, "Agroalimentos");
        assert_eq!(entries[0].value, None);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(Warehouse::open(dir.path()).is_err());
    }
}
