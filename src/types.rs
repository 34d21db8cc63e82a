use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Debug, Deserialize)]
pub struct RawFactRow {
    pub indicator: Option<String>,
    pub grouping: Option<String>,
    pub unit: Option<String>,
    pub dimension: Option<String>,
    pub category: Option<String>,
    pub prior_value: Option<String>,
    pub current_value: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawListingRow {
    pub indicator: Option<String>,
    pub grouping: Option<String>,
    pub unit: Option<String>,
    pub group: Option<String>,
    pub item: Option<String>,
    pub value: Option<String>,
}

/// One rendered line of a report section, flattened for CSV and previews.
#[derive(Debug, Serialize, Tabled, Clone)]
pub struct SectionRow {
    #[serde(rename = "Indicator")]
    #[tabled(rename = "Indicator")]
    pub indicator: String,
    #[serde(rename = "Dimension")]
    #[tabled(rename = "Dimension")]
    pub dimension: String,
    #[serde(rename = "Label")]
    #[tabled(rename = "Label")]
    pub label: String,
    #[serde(rename = "PriorPeriod")]
    #[tabled(rename = "PriorPeriod")]
    pub prior_period: String,
    #[serde(rename = "PriorValue")]
    #[tabled(rename = "PriorValue")]
    pub prior_value: String,
    #[serde(rename = "CurrentPeriod")]
    #[tabled(rename = "CurrentPeriod")]
    pub current_period: String,
    #[serde(rename = "CurrentValue")]
    #[tabled(rename = "CurrentValue")]
    pub current_value: String,
    #[serde(rename = "ChangePct")]
    #[tabled(rename = "ChangePct")]
    pub percent_change: String,
    #[serde(rename = "SharePct")]
    #[tabled(rename = "SharePct")]
    pub percent_share: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct ListingRow {
    #[serde(rename = "Indicator")]
    #[tabled(rename = "Indicator")]
    pub indicator: String,
    #[serde(rename = "Group")]
    #[tabled(rename = "Group")]
    pub group: String,
    #[serde(rename = "Item")]
    #[tabled(rename = "Item")]
    pub item: String,
    #[serde(rename = "Value")]
    #[tabled(rename = "Value")]
    pub value: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct AvailabilityRow {
    #[serde(rename = "Indicator")]
    #[tabled(rename = "Indicator")]
    pub indicator: String,
    #[serde(rename = "State")]
    #[tabled(rename = "State")]
    pub state: String,
    #[serde(rename = "Label")]
    #[tabled(rename = "Label")]
    pub label: String,
}
