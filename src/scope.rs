// Report scopes and their resolution against the reference geography.
//
// A [`Scope`] is built once per report request by [`ScopeResolver`] and is
// read-only afterwards. It carries one lookup-key set per [`Axis`], because a
// unit is keyed differently in each warehouse domain (a region's trade key is
// not its tourism key).

use crate::error::ScopeResolutionError;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use tracing::{debug, warn};

/// Display unit of the sentinel scope returned for unknown departments.
pub const DEPARTMENT_NOT_INCLUDED: &str = "DEPARTAMENTO NO INCLUIDO";
/// Trade-axis key and display unit of the national scope.
pub const NATIONAL_UNIT: &str = "COLOMBIA";
pub const NATIONAL_DISPLAY: &str = "Colombia";
/// The capital district reports connectivity under its enclosing department.
pub const CAPITAL_DISTRICT: &str = "Bogotá";
pub const CAPITAL_ENCLOSING_DEPARTMENT_CODE: &str = "25";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ScopeKind {
    WorldRegion,
    Country,
    TradeHub,
    TradeAgreement,
    Department,
    National,
}

impl ScopeKind {
    /// Grouping name as stored in the warehouse `grouping` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScopeKind::WorldRegion => "world_region",
            ScopeKind::Country => "country",
            ScopeKind::TradeHub => "trade_hub",
            ScopeKind::TradeAgreement => "trade_agreement",
            ScopeKind::Department => "department",
            ScopeKind::National => "national",
        }
    }

    /// Kinds whose units are sets of foreign countries.
    pub fn is_country_like(&self) -> bool {
        matches!(
            self,
            ScopeKind::WorldRegion | ScopeKind::Country | ScopeKind::TradeHub | ScopeKind::TradeAgreement
        )
    }
}

impl fmt::Display for ScopeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Trade,
    Investment,
    Tourism,
    UnctadCode,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scope {
    kind: ScopeKind,
    display_unit: String,
    lookup_keys: BTreeMap<Axis, BTreeSet<String>>,
    threshold: f64,
}

impl Scope {
    pub fn new(
        kind: ScopeKind,
        display_unit: impl Into<String>,
        lookup_keys: BTreeMap<Axis, BTreeSet<String>>,
        threshold: f64,
    ) -> Self {
        // Blank keys would only produce meaningless probes.
        let lookup_keys = lookup_keys
            .into_iter()
            .map(|(axis, keys)| {
                let keys = keys
                    .into_iter()
                    .map(|k| k.trim().to_string())
                    .filter(|k| !k.is_empty())
                    .collect();
                (axis, keys)
            })
            .collect();
        Self {
            kind,
            display_unit: display_unit.into(),
            lookup_keys,
            threshold,
        }
    }

    pub fn national(threshold: f64) -> Self {
        let mut keys = BTreeMap::new();
        keys.insert(Axis::Trade, BTreeSet::from([NATIONAL_UNIT.to_string()]));
        Self::new(ScopeKind::National, NATIONAL_DISPLAY, keys, threshold)
    }

    /// Sentinel for a department missing from the reference tables. Its keys
    /// match nothing, so every probe comes back empty.
    pub fn department_not_included(threshold: f64) -> Self {
        let sentinel = BTreeSet::from([DEPARTMENT_NOT_INCLUDED.to_string()]);
        let mut keys = BTreeMap::new();
        keys.insert(Axis::Trade, sentinel.clone());
        keys.insert(Axis::Tourism, sentinel);
        Self::new(ScopeKind::Department, DEPARTMENT_NOT_INCLUDED, keys, threshold)
    }

    pub fn kind(&self) -> ScopeKind {
        self.kind
    }

    pub fn display_unit(&self) -> &str {
        &self.display_unit
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn keys(&self, axis: Axis) -> impl Iterator<Item = &str> + '_ {
        self.lookup_keys
            .get(&axis)
            .into_iter()
            .flat_map(|set| set.iter().map(String::as_str))
    }

    pub fn has_keys(&self, axis: Axis) -> bool {
        self.lookup_keys.get(&axis).is_some_and(|set| !set.is_empty())
    }

    pub fn contains_key(&self, axis: Axis, key: &str) -> bool {
        self.lookup_keys.get(&axis).is_some_and(|set| set.contains(key))
    }

    pub fn is_not_included(&self) -> bool {
        self.kind == ScopeKind::Department && self.display_unit == DEPARTMENT_NOT_INCLUDED
    }

    pub fn is_capital_district(&self) -> bool {
        self.kind == ScopeKind::Department && self.display_unit == CAPITAL_DISTRICT
    }

    /// Scope to probe and fetch connectivity with. `None` outside departments.
    /// The capital district is swapped for its enclosing department's key.
    pub fn connectivity_scope(&self) -> Option<Scope> {
        if self.kind != ScopeKind::Department {
            return None;
        }
        if !self.is_capital_district() {
            return Some(self.clone());
        }
        let mut substituted = self.clone();
        substituted.lookup_keys.insert(
            Axis::Tourism,
            BTreeSet::from([CAPITAL_ENCLOSING_DEPARTMENT_CODE.to_string()]),
        );
        Some(substituted)
    }
}

// ----------------------------------------------------------------------------
// Reference geography
// ----------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct RegionRecord {
    pub name: String,
    pub trade_key: String,
    pub tourism_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HubRecord {
    pub name: String,
    pub trade_key: String,
    pub tourism_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CountryRecord {
    pub name: String,
    pub region: String,
    pub trade_key: String,
    pub investment_key: Option<String>,
    pub m49_code: Option<String>,
    pub migration_code: Option<String>,
    pub region_trade_key: Option<String>,
    pub region_tourism_key: Option<String>,
    pub hub_trade_key: Option<String>,
    pub hub_tourism_key: Option<String>,
    pub agreement: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DepartmentRecord {
    pub name: String,
    pub code: String,
}

#[derive(Debug, Clone)]
pub enum DepartmentLookup {
    Found(DepartmentRecord),
    NotIncluded,
}

/// Reference geography tables joined by [`ScopeResolver`].
pub trait GeographyReference {
    fn regions(&self) -> &[RegionRecord];
    fn hubs(&self) -> &[HubRecord];
    fn countries(&self) -> &[CountryRecord];
    fn departments(&self) -> &[DepartmentRecord];

    fn find_department(&self, name: &str) -> DepartmentLookup {
        self.departments()
            .iter()
            .find(|d| d.name == name)
            .cloned()
            .map_or(DepartmentLookup::NotIncluded, DepartmentLookup::Found)
    }
}

/// Units excluded from the selection menus.
const PLACEHOLDER_UNITS: &[&str] = &[
    "Antártida",
    "No definido",
    "Sin Especificar",
    "No Declarados",
    "No declarado",
    "Organismos internacionales",
    "Otros",
    "Colombia",
    "En Curso",
    "Resto de países",
    "Desconocido",
    "Sin especificar",
    DEPARTMENT_NOT_INCLUDED,
];

pub struct ScopeResolver<'a, G: GeographyReference + ?Sized> {
    geography: &'a G,
}

impl<'a, G: GeographyReference + ?Sized> ScopeResolver<'a, G> {
    pub fn new(geography: &'a G) -> Self {
        Self { geography }
    }

    /// Expand a grouping and a raw selection into a populated [`Scope`].
    pub fn resolve(
        &self,
        kind: ScopeKind,
        selection: Option<&str>,
        threshold: f64,
    ) -> Result<Scope, ScopeResolutionError> {
        let selection = selection.map(str::trim).filter(|s| !s.is_empty());
        let required = || selection.ok_or(ScopeResolutionError::MissingSelection(kind));
        let not_found = |selection: &str| ScopeResolutionError::UnitNotFound {
            kind,
            selection: selection.to_string(),
        };

        let scope = match kind {
            ScopeKind::National => Scope::national(threshold),
            ScopeKind::WorldRegion => {
                let selection = required()?;
                let region = self
                    .geography
                    .regions()
                    .iter()
                    .find(|r| r.name == selection)
                    .ok_or_else(|| not_found(selection))?;
                let members = self.countries_where(|c| {
                    c.region_trade_key.as_deref() == Some(region.trade_key.as_str())
                });
                let tourism = self.countries_where(|c| {
                    c.region_tourism_key.as_deref() == Some(region.tourism_key.as_str())
                });
                Scope::new(
                    kind,
                    region.trade_key.clone(),
                    foreign_keys(&region.trade_key, &members, &tourism),
                    threshold,
                )
            }
            ScopeKind::TradeHub => {
                let selection = required()?;
                let hub = self
                    .geography
                    .hubs()
                    .iter()
                    .find(|h| h.name == selection)
                    .ok_or_else(|| not_found(selection))?;
                let members = self.countries_where(|c| {
                    c.hub_trade_key.as_deref() == Some(hub.trade_key.as_str())
                });
                let tourism = self.countries_where(|c| {
                    c.hub_tourism_key.as_deref() == Some(hub.tourism_key.as_str())
                });
                Scope::new(
                    kind,
                    hub.trade_key.clone(),
                    foreign_keys(&hub.trade_key, &members, &tourism),
                    threshold,
                )
            }
            ScopeKind::Country => {
                let selection = required()?;
                let members = self.countries_where(|c| c.name == selection);
                let country = members.first().ok_or_else(|| not_found(selection))?;
                Scope::new(
                    kind,
                    country.name.clone(),
                    foreign_keys(&country.trade_key, &members, &members),
                    threshold,
                )
            }
            ScopeKind::TradeAgreement => {
                let selection = required()?;
                let members =
                    self.countries_where(|c| c.agreement.as_deref() == Some(selection));
                if members.is_empty() {
                    return Err(not_found(selection));
                }
                Scope::new(
                    kind,
                    selection,
                    foreign_keys(selection, &members, &members),
                    threshold,
                )
            }
            ScopeKind::Department => {
                let selection = required()?;
                match self.geography.find_department(selection) {
                    DepartmentLookup::Found(dept) => {
                        let mut keys = BTreeMap::new();
                        keys.insert(Axis::Trade, BTreeSet::from([dept.name.clone()]));
                        keys.insert(Axis::Tourism, BTreeSet::from([dept.code.clone()]));
                        Scope::new(kind, dept.name, keys, threshold)
                    }
                    DepartmentLookup::NotIncluded => {
                        warn!(department = selection, "department not in reference table");
                        Scope::department_not_included(threshold)
                    }
                }
            }
        };

        debug!(kind = %scope.kind(), unit = scope.display_unit(), "scope resolved");
        Ok(scope)
    }

    /// Selectable units for a grouping: sorted, de-duplicated, placeholders removed.
    pub fn options(&self, kind: ScopeKind) -> Vec<String> {
        let names: BTreeSet<String> = match kind {
            ScopeKind::WorldRegion => self.geography.regions().iter().map(|r| r.name.clone()).collect(),
            ScopeKind::TradeHub => self.geography.hubs().iter().map(|h| h.name.clone()).collect(),
            ScopeKind::Country => self.geography.countries().iter().map(|c| c.name.clone()).collect(),
            ScopeKind::TradeAgreement => self
                .geography
                .countries()
                .iter()
                .filter_map(|c| c.agreement.clone())
                .collect(),
            ScopeKind::Department => self
                .geography
                .departments()
                .iter()
                .map(|d| d.name.clone())
                .collect(),
            ScopeKind::National => BTreeSet::from([NATIONAL_DISPLAY.to_string()]),
        };
        names
            .into_iter()
            .filter(|n| kind == ScopeKind::National || !PLACEHOLDER_UNITS.contains(&n.as_str()))
            .collect()
    }

    fn countries_where<F>(&self, pred: F) -> Vec<&'a CountryRecord>
    where
        F: Fn(&CountryRecord) -> bool,
    {
        self.geography.countries().iter().filter(|c| pred(c)).collect()
    }
}

fn foreign_keys(
    trade_key: &str,
    members: &[&CountryRecord],
    tourism_members: &[&CountryRecord],
) -> BTreeMap<Axis, BTreeSet<String>> {
    let mut keys = BTreeMap::new();
    keys.insert(Axis::Trade, BTreeSet::from([trade_key.to_string()]));
    keys.insert(
        Axis::Investment,
        members.iter().filter_map(|c| c.investment_key.clone()).collect(),
    );
    keys.insert(
        Axis::UnctadCode,
        members.iter().filter_map(|c| c.m49_code.clone()).collect(),
    );
    keys.insert(
        Axis::Tourism,
        tourism_members.iter().filter_map(|c| c.migration_code.clone()).collect(),
    );
    keys
}
