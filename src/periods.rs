// Reporting periods per warehouse axis, read from the parameter table.

use crate::error::ReportError;
use crate::indicators::{IndicatorKey, Period};
use crate::scope::Axis;
use crate::util::parse_u32_safe;
use chrono::Month;
use serde::{Deserialize, Serialize};

pub const EXPORTS_AXIS: &str = "Exportaciones";
pub const INVESTMENT_AXIS: &str = "Inversión";
pub const TOURISM_AXIS: &str = "Turismo";

const CLOSED_PRIOR: &str = "Año cerrado (T-1)";
const CLOSED_CURRENT: &str = "Año cerrado (T)";
const RUNNING_PRIOR: &str = "Año corrido (T-1)";
const RUNNING_CURRENT: &str = "Año corrido (T)";
const EXPORTS_RUNNING_MONTH: &str = "Mes corrido texto (T)";
const TOURISM_RUNNING_MONTH: &str = "Mes corrido";

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Ene", "Feb", "Mar", "Abr", "May", "Jun", "Jul", "Ago", "Sep", "Oct", "Nov", "Dic",
];
const MONTH_NAMES: [&str; 12] = [
    "Enero",
    "Febrero",
    "Marzo",
    "Abril",
    "Mayo",
    "Junio",
    "Julio",
    "Agosto",
    "Septiembre",
    "Octubre",
    "Noviembre",
    "Diciembre",
];

/// One row of `parameters.csv`.
#[derive(Debug, Clone, Deserialize)]
pub struct ParameterRow {
    pub axis: String,
    pub parameter: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisPeriods {
    pub closed_prior: String,
    pub closed_current: String,
    pub running_prior: String,
    pub running_current: String,
    /// Running-month text for exports ("Junio") or month number for tourism.
    pub running_month: Option<String>,
}

impl AxisPeriods {
    /// Column labels (prior, current) for a period.
    pub fn labels(&self, period: Period) -> (String, String) {
        match period {
            Period::Closed => (self.closed_prior.clone(), self.closed_current.clone()),
            Period::Running => (
                self.running_label(&self.running_prior),
                self.running_label(&self.running_current),
            ),
        }
    }

    fn running_label(&self, raw: &str) -> String {
        if raw.contains('(') {
            return transform_year_label(raw);
        }
        // Tourism stores a bare year plus a month number.
        match self.running_month.as_deref().and_then(month_abbreviation) {
            Some(abbr) if abbr != MONTH_ABBREVIATIONS[0] => format!("Ene - {abbr} {raw}"),
            Some(abbr) => format!("{abbr} {raw}"),
            None => raw.to_string(),
        }
    }

    /// Bare year of the running period, without the month range.
    pub fn running_year(&self) -> &str {
        year_part(&self.running_current)
    }

    pub fn running_prior_year(&self) -> &str {
        year_part(&self.running_prior)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportPeriods {
    pub exports: AxisPeriods,
    pub investment: AxisPeriods,
    pub tourism: AxisPeriods,
}

impl ReportPeriods {
    pub fn from_parameters(rows: &[ParameterRow]) -> Result<Self, ReportError> {
        let exports = axis_periods(rows, EXPORTS_AXIS, Some(EXPORTS_RUNNING_MONTH))?;
        let investment = axis_periods(rows, INVESTMENT_AXIS, None)?;
        let tourism = axis_periods(rows, TOURISM_AXIS, Some(TOURISM_RUNNING_MONTH))?;

        if let Some(month) = tourism.running_month.as_deref() {
            if month_abbreviation(month).is_none() {
                return Err(ReportError::InvalidParameter {
                    parameter: TOURISM_RUNNING_MONTH.to_string(),
                    value: month.to_string(),
                });
            }
        }
        if quarter_name(&investment.running_current).is_none() {
            return Err(ReportError::InvalidParameter {
                parameter: RUNNING_CURRENT.to_string(),
                value: investment.running_current.clone(),
            });
        }

        Ok(Self {
            exports,
            investment,
            tourism,
        })
    }

    pub fn for_axis(&self, axis: Axis) -> &AxisPeriods {
        match axis {
            Axis::Trade => &self.exports,
            Axis::Investment | Axis::UnctadCode => &self.investment,
            Axis::Tourism => &self.tourism,
        }
    }

    /// Prior/current column labels of an indicator; `None` for indicators
    /// that are not period-based.
    pub fn labels_for(&self, key: IndicatorKey) -> Option<(String, String)> {
        key.period().map(|p| self.for_axis(key.axis()).labels(p))
    }
}

fn axis_periods(
    rows: &[ParameterRow],
    axis: &str,
    month_parameter: Option<&str>,
) -> Result<AxisPeriods, ReportError> {
    let lookup = |parameter: &str| {
        rows.iter()
            .find(|r| r.axis.trim() == axis && r.parameter.trim() == parameter)
            .map(|r| r.value.trim().to_string())
            .filter(|v| !v.is_empty())
    };
    let require = |parameter: &str| {
        lookup(parameter).ok_or_else(|| ReportError::MissingParameter {
            axis: axis.to_string(),
            parameter: parameter.to_string(),
        })
    };

    Ok(AxisPeriods {
        closed_prior: require(CLOSED_PRIOR)?,
        closed_current: require(CLOSED_CURRENT)?,
        running_prior: require(RUNNING_PRIOR)?,
        running_current: require(RUNNING_CURRENT)?,
        running_month: month_parameter.and_then(lookup),
    })
}

/// `"2024 (Ene - Jun)"` becomes `"Ene - Jun 2024"`; anything else is kept.
pub fn transform_year_label(label: &str) -> String {
    match label.split_once('(') {
        Some((year, rest)) if rest.contains(')') => {
            format!("{} {}", rest.replace(')', "").trim(), year.trim())
        }
        _ => label.to_string(),
    }
}

fn year_part(label: &str) -> &str {
    let label = label.split('(').next().unwrap_or(label);
    label.split('-').next().unwrap_or(label).trim()
}

fn month(number: &str) -> Option<Month> {
    let n = u8::try_from(parse_u32_safe(Some(number))?).ok()?;
    Month::try_from(n).ok()
}

pub fn month_abbreviation(number: &str) -> Option<&'static str> {
    month(number).map(|m| MONTH_ABBREVIATIONS[m.number_from_month() as usize - 1])
}

pub fn month_name(number: &str) -> Option<&'static str> {
    month(number).map(|m| MONTH_NAMES[m.number_from_month() as usize - 1])
}

/// Ordinal name of the quarter in a `"YYYY-Q"` investment period.
pub fn quarter_name(year_quarter: &str) -> Option<&'static str> {
    match year_quarter.rsplit_once('-')?.1.trim() {
        "1" => Some("primer"),
        "2" => Some("segundo"),
        "3" => Some("tercer"),
        "4" => Some("cuarto"),
        _ => None,
    }
}
