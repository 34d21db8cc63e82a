// The fact-source seam between the engine and the warehouse adapter.

use crate::error::SourceError;
use crate::indicators::{Dimension, IndicatorKey};
use crate::scope::Scope;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactRow {
    pub category: String,
    pub prior_value: f64,
    pub current_value: f64,
}

impl FactRow {
    pub fn new(category: impl Into<String>, prior_value: f64, current_value: f64) -> Self {
        Self {
            category: category.into(),
            prior_value,
            current_value,
        }
    }
}

/// Denominator for percent share. Not necessarily the sum of the facts it
/// is paired with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ReferenceTotal {
    pub prior_value: f64,
    pub current_value: f64,
}

impl ReferenceTotal {
    pub fn new(prior_value: f64, current_value: f64) -> Self {
        Self {
            prior_value,
            current_value,
        }
    }
}

/// Non-numeric entry such as an opportunity (chain, subsector) or a flight
/// route (airline, route, weekly frequency).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingEntry {
    pub group: String,
    pub item: String,
    pub value: Option<f64>,
}

/// Supplies warehouse facts for an indicator under a scope.
///
/// Implementations own timeouts and retries. They must be shareable across
/// threads because probes and rollups may run in parallel.
pub trait FactSource: Send + Sync {
    /// Whether at least one row exists, without fetching the rows.
    fn probe_exists(&self, indicator: IndicatorKey, scope: &Scope) -> Result<bool, SourceError>;

    fn fetch(
        &self,
        indicator: IndicatorKey,
        scope: &Scope,
        dimension: Dimension,
    ) -> Result<Vec<FactRow>, SourceError>;

    fn fetch_reference_total(
        &self,
        indicator: IndicatorKey,
        scope: &Scope,
    ) -> Result<ReferenceTotal, SourceError>;

    fn fetch_listing(
        &self,
        indicator: IndicatorKey,
        scope: &Scope,
    ) -> Result<Vec<ListingEntry>, SourceError>;
}
