use crate::error::ReportError;
use crate::indicators::Availability;
use crate::reports::{Report, SectionBody};
use crate::rollup::RollupRow;
use crate::types::{AvailabilityRow, ListingRow, SectionRow};
use crate::util::format_number;
use serde::Serialize;
use std::path::Path;
use tabled::{settings::Style, Table, Tabled};

pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), ReportError> {
    let mut wtr = csv::Writer::from_path(path)?;
    for r in rows {
        wtr.serialize(r)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), ReportError> {
    let s = serde_json::to_string_pretty(value)?;
    std::fs::write(path, s)?;
    Ok(())
}

pub fn preview_table_rows<T>(rows: &[T], max_rows: usize)
where
    T: Tabled + Clone,
{
    let slice: Vec<T> = rows.iter().cloned().take(max_rows).collect();
    if slice.is_empty() {
        println!("(no rows)\n");
        return;
    }
    let table_str = Table::new(slice).with(Style::markdown()).to_string();
    println!("{}\n", table_str);
}

fn availability_state(a: Availability) -> &'static str {
    match a {
        Availability::Available => "available",
        Availability::Unavailable => "unavailable",
        Availability::NotApplicable => "not_applicable",
    }
}

pub fn availability_rows(report: &Report) -> Vec<AvailabilityRow> {
    report
        .availability
        .iter()
        .map(|(key, state)| AvailabilityRow {
            indicator: key.to_string(),
            state: availability_state(state).to_string(),
            label: report.availability.label(key).to_string(),
        })
        .collect()
}

/// Numeric sections flattened one line per row. Unavailable indicators get
/// a single line carrying their label and no values.
pub fn section_rows(report: &Report) -> Vec<SectionRow> {
    let mut out = Vec::new();
    for section in &report.sections {
        let indicator = section.indicator.to_string();
        let dimension = section.dimension.map(|d| d.to_string()).unwrap_or_default();
        let (prior_period, current_period) = section.periods.clone().unwrap_or_default();
        let line = |row: &RollupRow| SectionRow {
            indicator: indicator.clone(),
            dimension: dimension.clone(),
            label: row.label.clone(),
            prior_period: prior_period.clone(),
            prior_value: format_number(row.prior_value, 2),
            current_period: current_period.clone(),
            current_value: format_number(row.current_value, 2),
            percent_change: format_number(row.percent_change, 2),
            percent_share: row.percent_share.map(|s| format_number(s, 2)).unwrap_or_default(),
        };
        match &section.body {
            SectionBody::Rollup(r) => out.extend(r.rows().iter().map(line)),
            SectionBody::Table(rows) => out.extend(rows.iter().map(line)),
            SectionBody::Unavailable { label } => out.push(SectionRow {
                indicator: indicator.clone(),
                dimension: dimension.clone(),
                label: label.to_string(),
                prior_period: prior_period.clone(),
                prior_value: String::new(),
                current_period: current_period.clone(),
                current_value: String::new(),
                percent_change: String::new(),
                percent_share: String::new(),
            }),
            SectionBody::Listing(_) => {}
        }
    }
    out
}

pub fn listing_rows(report: &Report) -> Vec<ListingRow> {
    report
        .sections
        .iter()
        .filter_map(|s| match &s.body {
            SectionBody::Listing(entries) => Some((s.indicator, entries)),
            _ => None,
        })
        .flat_map(|(key, entries)| {
            entries.iter().map(move |e| ListingRow {
                indicator: key.to_string(),
                group: e.group.clone(),
                item: e.item.clone(),
                value: e.value.map(|v| format_number(v, 0)).unwrap_or_default(),
            })
        })
        .collect()
}
