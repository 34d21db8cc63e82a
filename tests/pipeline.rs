use approx::assert_relative_eq;
use chrono::{TimeZone, Utc};
use std::path::PathBuf;
use tempfile::TempDir;
use trade_report::indicators::{Availability, Dimension, IndicatorKey};
use trade_report::loader::{self, CsvGeography, Warehouse};
use trade_report::output;
use trade_report::periods::ReportPeriods;
use trade_report::reports::{generate_report, Report, SectionBody};
use trade_report::rollup::{RollupResult, OTHERS_LABEL, UNDEFINED_COMPANY};
use trade_report::scope::{ScopeKind, ScopeResolver, DEPARTMENT_NOT_INCLUDED};
use trade_report::summary::build_summary;

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

fn report_for(kind: ScopeKind, unit: Option<&str>) -> Report {
    let dir = data_dir();
    let (warehouse, _) = Warehouse::open(&dir).unwrap();
    let geography = CsvGeography::load(&dir).unwrap();
    let scope = ScopeResolver::new(&geography).resolve(kind, unit, 10_000.0).unwrap();
    let periods = ReportPeriods::from_parameters(&loader::load_parameters(&dir).unwrap()).unwrap();
    generate_report(&warehouse, &scope, &periods).unwrap()
}

fn rollup<'a>(report: &'a Report, key: IndicatorKey, dim: Dimension) -> &'a RollupResult {
    match &report.section(key, Some(dim)).unwrap().body {
        SectionBody::Rollup(r) => r,
        other => panic!("expected a rollup for {key}/{dim}, got {other:?}"),
    }
}

#[test]
fn sample_warehouse_reports_skipped_rows() {
    let (_, report) = Warehouse::open(&data_dir()).unwrap();
    assert_eq!(report.parse_errors, 1);
    assert_eq!(report.unknown_keys, 1);
    assert_eq!(report.loaded_rows, report.total_rows - 2);
}

#[test]
fn country_report_availability() {
    let report = report_for(ScopeKind::Country, Some("Chile"));
    let a = &report.availability;
    assert!(a.is_available(IndicatorKey::ExportTotalsClosed));
    assert!(a.is_available(IndicatorKey::TradeBalance));
    assert!(a.is_available(IndicatorKey::ForeignDirectInvestmentClosed));
    assert!(a.is_available(IndicatorKey::UnctadForeignDirectInvestment));
    assert!(a.is_available(IndicatorKey::TourismArrivalsRunning));
    assert_eq!(a.get(IndicatorKey::OutwardInvestmentClosed), Availability::Unavailable);
    assert_eq!(a.get(IndicatorKey::MiningWeightRunning), Availability::Unavailable);
    assert_eq!(a.get(IndicatorKey::Connectivity), Availability::NotApplicable);
}

#[test]
fn non_mining_sectors_roll_up_against_the_non_mining_total() {
    let report = report_for(ScopeKind::Country, Some("Chile"));
    let r = rollup(&report, IndicatorKey::ExportNonMiningClosed, Dimension::Sector);
    assert_eq!(r.ranked().len(), 5);
    let others = r.others().unwrap();
    assert_eq!(others.label, OTHERS_LABEL);
    assert_relative_eq!(others.current_value, 6_000_000.0);
    assert_relative_eq!(r.total().current_value, 156_000_000.0);
    let shares: f64 = r.rows()[..r.len() - 1].iter().filter_map(|row| row.percent_share).sum();
    assert_relative_eq!(shares, 100.0, epsilon = 1e-9);
}

#[test]
fn company_leaderboard_reconciles_the_placeholder() {
    let report = report_for(ScopeKind::Country, Some("Chile"));
    let r = rollup(&report, IndicatorKey::ExportCompaniesClosed, Dimension::Company);
    assert_eq!(r.ranked().len(), 5);
    assert!(r.ranked().iter().all(|row| row.label != UNDEFINED_COMPANY));
    assert!(r.ranked().iter().all(|row| row.label != "Micro Exporta"));
    assert_relative_eq!(r.others().unwrap().current_value, 66_000_000.0);
}

#[test]
fn gender_breakdown_has_no_others() {
    let report = report_for(ScopeKind::Country, Some("Chile"));
    let r = rollup(&report, IndicatorKey::TourismArrivalsClosed, Dimension::Gender);
    assert!(r.others().is_none());
    assert_eq!(r.ranked().len(), 2);
}

#[test]
fn national_report_uses_fixed_availability() {
    let report = report_for(ScopeKind::National, None);
    for (key, state) in report.availability.iter() {
        if key == IndicatorKey::Connectivity {
            assert_eq!(state, Availability::Unavailable);
        } else {
            assert_eq!(state, Availability::Available, "{key}");
        }
    }
    let fdi = rollup(&report, IndicatorKey::ForeignDirectInvestmentClosed, Dimension::Country);
    assert_eq!(fdi.ranked()[0].label, "España");
    assert_relative_eq!(fdi.total().current_value, 590.0);
    assert!(fdi.others().is_none());
}

#[test]
fn department_agreements_always_show_the_residual() {
    let report = report_for(ScopeKind::Department, Some("Antioquia"));
    let r = rollup(&report, IndicatorKey::ExportNonMiningClosed, Dimension::TradeAgreement);
    assert_eq!(r.ranked().len(), 3);
    assert_relative_eq!(r.others().unwrap().current_value, 1_700_000_000.0);
}

#[test]
fn unknown_department_renders_every_section_unavailable() {
    let report = report_for(ScopeKind::Department, Some("Atlántida"));
    assert_eq!(report.scope.display_unit(), DEPARTMENT_NOT_INCLUDED);
    assert_eq!(report.availability.available_count(), 0);
    assert!(!report.sections.is_empty());
    assert!(report.sections.iter().all(|s| s.is_unavailable()));
}

#[test]
fn capital_district_connectivity_comes_from_enclosing_department() {
    let report = report_for(ScopeKind::Department, Some("Bogotá"));
    match &report.section(IndicatorKey::Connectivity, None).unwrap().body {
        SectionBody::Listing(entries) => {
            let routes: Vec<_> = entries.iter().map(|e| e.item.as_str()).collect();
            assert_eq!(routes, vec!["Bogotá - Santiago", "Bogotá - Madrid"]);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn outputs_are_written() {
    let report = report_for(ScopeKind::Country, Some("Chile"));
    let summary = build_summary(&report, Utc.with_ymd_and_hms(2025, 7, 1, 0, 0, 0).unwrap());
    let out = TempDir::new().unwrap();
    output::write_csv(&out.path().join("sections.csv"), &output::section_rows(&report)).unwrap();
    output::write_csv(&out.path().join("listings.csv"), &output::listing_rows(&report)).unwrap();
    output::write_json(&out.path().join("report.json"), &report).unwrap();
    output::write_json(&out.path().join("summary.json"), &summary).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(out.path().join("summary.json")).unwrap()).unwrap();
    assert_eq!(json["unit"], "Chile");
    assert_eq!(json["grouping"], "country");
    let company_count = summary
        .headlines
        .iter()
        .find(|h| h.indicator == IndicatorKey::ExportCompanyCountClosed)
        .unwrap();
    assert_eq!(
        company_count.text,
        "En 2024, 412 empresas exportaron productos no minero-energéticos hacia Chile."
    );
    let odi = summary
        .headlines
        .iter()
        .find(|h| h.indicator == IndicatorKey::OutwardInvestmentClosed)
        .unwrap();
    assert_eq!(odi.text, "SIN DATOS DE ICE CERRADO");
}

#[test]
fn country_options_skip_placeholders() {
    let geography = CsvGeography::load(&data_dir()).unwrap();
    let resolver = ScopeResolver::new(&geography);
    assert_eq!(
        resolver.options(ScopeKind::Country),
        vec!["Alemania", "Chile", "España", "México", "Perú"]
    );
    assert_eq!(resolver.options(ScopeKind::WorldRegion), vec!["América Latina", "Europa"]);
}
