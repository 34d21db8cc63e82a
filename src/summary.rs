// Narrative headlines for the report summary.
//
// Each sentence is gated on its indicator's availability. An unavailable
// indicator yields its descriptor label instead of a sentence built on zeros.

use crate::indicators::{Availability, IndicatorKey, Period};
use crate::periods::{month_name, quarter_name};
use crate::reports::{Report, SectionBody};
use crate::rollup::RollupRow;
use crate::scope::ScopeKind;
use crate::util::{format_int, format_number};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;

const USD_PER_MILLION: f64 = 1e6;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Headline {
    pub indicator: IndicatorKey,
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary {
    pub generated_at: DateTime<Utc>,
    pub grouping: ScopeKind,
    pub unit: String,
    pub available_indicators: usize,
    pub total_indicators: usize,
    pub sections: usize,
    pub headlines: Vec<Headline>,
}

/// `"más"` for an increase, `"menos"` otherwise.
pub fn variation_word(change: f64) -> &'static str {
    if change > 0.0 {
        "más"
    } else {
        "menos"
    }
}

/// `"positivos"` for an inflow, `"negativos"` otherwise.
pub fn flow_word(value: f64) -> &'static str {
    if value > 0.0 {
        "positivos"
    } else {
        "negativos"
    }
}

fn total_row(report: &Report, key: IndicatorKey) -> Option<&RollupRow> {
    report.sections_for(key).find_map(|s| match &s.body {
        SectionBody::Rollup(r) => Some(r.total()),
        _ => None,
    })
}

fn first_listing_value(report: &Report, key: IndicatorKey) -> Option<f64> {
    report.sections_for(key).find_map(|s| match &s.body {
        SectionBody::Listing(entries) => entries.iter().find_map(|e| e.value),
        _ => None,
    })
}

fn change_phrase(row: &RollupRow) -> String {
    format!(
        "{}% {}",
        format_number(row.percent_change.abs(), 2),
        variation_word(row.percent_change)
    )
}

struct Narrator<'a> {
    report: &'a Report,
    unit: &'a str,
    domestic: bool,
}

impl<'a> Narrator<'a> {
    fn exports(&self, key: IndicatorKey, non_mining: bool) -> Option<String> {
        let row = total_row(self.report, key)?;
        let p = &self.report.periods.exports;
        let amount = format_number(row.current_value / USD_PER_MILLION, 2);
        let what = if non_mining {
            "las exportaciones no minero-energéticas"
        } else {
            "las exportaciones totales"
        };
        let flow = if self.domestic {
            format!("de {} al Mundo", self.unit)
        } else {
            format!("de Colombia a {}", self.unit)
        };
        Some(if key.period() == Some(Period::Closed) {
            format!(
                "En {}, {what} {flow} registraron USD {amount} millones, {} que en {}.",
                p.closed_current,
                change_phrase(row),
                p.closed_prior
            )
        } else {
            let month = p.running_month.as_deref().unwrap_or_default().to_lowercase();
            format!(
                "Entre enero y {month} de {} {what} {flow} suman USD {amount} millones, {} que en el mismo periodo de {}.",
                p.running_year(),
                change_phrase(row),
                p.running_prior_year()
            )
        })
    }

    fn company_count(&self, key: IndicatorKey) -> Option<String> {
        let count = first_listing_value(self.report, key)?;
        let p = &self.report.periods.exports;
        let place = if self.domestic {
            format!("desde {}", self.unit)
        } else {
            format!("hacia {}", self.unit)
        };
        Some(format!(
            "En {}, {} empresas exportaron productos no minero-energéticos {place}.",
            p.closed_current,
            format_int(count.round() as i64)
        ))
    }

    fn investment(&self, key: IndicatorKey, outward: bool) -> Option<String> {
        let row = total_row(self.report, key)?;
        let p = &self.report.periods.investment;
        let what = match (outward, self.report.scope.kind() == ScopeKind::National) {
            (false, true) => "de inversión extranjera directa (IED) del Mundo".to_string(),
            (false, false) => format!("de inversión extranjera directa (IED) de {}", self.unit),
            (true, true) => "de inversión directa de Colombia en el exterior (ICE)".to_string(),
            (true, false) => format!("de inversión directa de Colombia en el exterior (ICE) en {}", self.unit),
        };
        let period = if key.period() == Some(Period::Closed) {
            format!("En {}", p.closed_current)
        } else {
            format!(
                "En el acumulado hasta el {} trimestre de {}",
                quarter_name(&p.running_current).unwrap_or_default(),
                p.running_year()
            )
        };
        Some(format!(
            "{period}, Colombia registró flujos {} {what} por USD {} millones, {} con respecto al periodo anterior.",
            flow_word(row.current_value),
            format_number(row.current_value, 2),
            change_phrase(row)
        ))
    }

    fn tourism(&self, key: IndicatorKey) -> Option<String> {
        let row = total_row(self.report, key)?;
        let p = &self.report.periods.tourism;
        let arrivals = format_int(row.current_value.round() as i64);
        let (period, prior) = if key.period() == Some(Period::Closed) {
            (format!("En {}", p.closed_current), p.closed_prior.as_str())
        } else {
            let month = p
                .running_month
                .as_deref()
                .and_then(month_name)
                .unwrap_or_default()
                .to_lowercase();
            (format!("Entre enero y {month} de {}", p.running_current), p.running_prior.as_str())
        };
        Some(if self.domestic {
            format!(
                "{period}, {} registró {arrivals} llegadas de turistas extranjeros, {} con respecto a {prior}.",
                self.unit,
                change_phrase(row)
            )
        } else {
            format!(
                "{period}, Colombia registró {arrivals} llegadas de turistas extranjeros provenientes de {}, {} con respecto a {prior}.",
                self.unit,
                change_phrase(row)
            )
        })
    }

    fn sentence(&self, key: IndicatorKey) -> Option<String> {
        use IndicatorKey::*;
        match key {
            ExportTotalsClosed | ExportTotalsRunning => self.exports(key, false),
            ExportNonMiningClosed | ExportNonMiningRunning => self.exports(key, true),
            ExportCompanyCountClosed => self.company_count(key),
            ForeignDirectInvestmentClosed | ForeignDirectInvestmentRunning => self.investment(key, false),
            OutwardInvestmentClosed => self.investment(key, true),
            TourismArrivalsClosed | TourismArrivalsRunning => self.tourism(key),
            _ => None,
        }
    }
}

const HEADLINE_KEYS: [IndicatorKey; 10] = [
    IndicatorKey::ExportTotalsClosed,
    IndicatorKey::ExportTotalsRunning,
    IndicatorKey::ExportNonMiningClosed,
    IndicatorKey::ExportNonMiningRunning,
    IndicatorKey::ExportCompanyCountClosed,
    IndicatorKey::ForeignDirectInvestmentClosed,
    IndicatorKey::ForeignDirectInvestmentRunning,
    IndicatorKey::OutwardInvestmentClosed,
    IndicatorKey::TourismArrivalsClosed,
    IndicatorKey::TourismArrivalsRunning,
];

pub fn build_summary(report: &Report, generated_at: DateTime<Utc>) -> ReportSummary {
    let scope = &report.scope;
    let narrator = Narrator {
        report,
        unit: scope.display_unit(),
        domestic: matches!(scope.kind(), ScopeKind::National | ScopeKind::Department),
    };

    let headlines = HEADLINE_KEYS
        .iter()
        .filter_map(|&key| {
            let text = match report.availability.get(key) {
                Availability::NotApplicable => return None,
                Availability::Unavailable => key.descriptor().unavailable_label.to_string(),
                Availability::Available => match narrator.sentence(key) {
                    Some(text) => text,
                    None => {
                        warn!(indicator = %key, "available indicator has no value to narrate");
                        key.descriptor().unavailable_label.to_string()
                    }
                },
            };
            Some(Headline { indicator: key, text })
        })
        .collect();

    ReportSummary {
        generated_at,
        grouping: scope.kind(),
        unit: scope.display_unit().to_string(),
        available_indicators: report.availability.available_count(),
        total_indicators: IndicatorKey::ALL.len(),
        sections: report.sections.len(),
        headlines,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::periods::tests::sample_periods;
    use crate::reports::generate_report;
    use crate::reports::tests::StubSource;
    use crate::scope::{Axis, Scope};
    use crate::source::ListingEntry;
    use chrono::TimeZone;
    use std::collections::{BTreeMap, BTreeSet};

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 7, 1, 12, 0, 0).unwrap()
    }

    fn chile() -> Scope {
        let keys = BTreeMap::from([
            (Axis::Trade, BTreeSet::from(["CHILE".to_string()])),
            (Axis::Investment, BTreeSet::from(["Chile".to_string()])),
            (Axis::Tourism, BTreeSet::from(["211".to_string()])),
        ]);
        Scope::new(ScopeKind::Country, "Chile", keys, 0.0)
    }

    #[test]
    fn direction_words() {
        assert_eq!(variation_word(3.2), "más");
        assert_eq!(variation_word(0.0), "menos");
        assert_eq!(variation_word(-1.0), "menos");
        assert_eq!(flow_word(10.0), "positivos");
        assert_eq!(flow_word(-10.0), "negativos");
    }

    #[test]
    fn unavailable_indicator_yields_its_label() {
        let source = StubSource {
            empty: vec![IndicatorKey::TourismArrivalsClosed],
            failing_fetch: None,
        };
        let report = generate_report(&source, &chile(), &sample_periods()).unwrap();
        let summary = build_summary(&report, fixed_time());
        let tourism = summary
            .headlines
            .iter()
            .find(|h| h.indicator == IndicatorKey::TourismArrivalsClosed)
            .unwrap();
        assert_eq!(tourism.text, "SIN DATOS DE TURISMO CERRADO");
    }

    #[test]
    fn foreign_scope_sentences_name_the_partner() {
        let report = generate_report(&StubSource::full(), &chile(), &sample_periods()).unwrap();
        let summary = build_summary(&report, fixed_time());
        let exports = &summary.headlines[0];
        assert_eq!(exports.indicator, IndicatorKey::ExportTotalsClosed);
        // Reference total 858 vs 780 is a 10% increase.
        assert_eq!(
            exports.text,
            "En 2024, las exportaciones totales de Colombia a Chile registraron USD 0.00 millones, 10.00% más que en 2023."
        );
        let running = &summary.headlines[1];
        assert!(running.text.starts_with("Entre enero y junio de 2025"));
        assert!(running.text.ends_with("mismo periodo de 2024."));
        let fdi = summary
            .headlines
            .iter()
            .find(|h| h.indicator == IndicatorKey::ForeignDirectInvestmentRunning)
            .unwrap();
        assert!(fdi.text.contains("segundo trimestre de 2025"));
        assert!(fdi.text.contains("flujos positivos"));
    }

    #[test]
    fn company_count_without_a_value_falls_back_to_its_label() {
        let mut report = generate_report(&StubSource::full(), &chile(), &sample_periods()).unwrap();
        let key = IndicatorKey::ExportCompanyCountClosed;
        for section in report.sections.iter_mut().filter(|s| s.indicator == key) {
            section.body = SectionBody::Listing(vec![ListingEntry {
                group: String::new(),
                item: "Empresas exportadoras".into(),
                value: None,
            }]);
        }
        let summary = build_summary(&report, fixed_time());
        let count = summary.headlines.iter().find(|h| h.indicator == key).unwrap();
        assert_eq!(count.text, key.descriptor().unavailable_label);
    }

    #[test]
    fn not_applicable_indicators_have_no_headline() {
        let keys = BTreeMap::from([
            (Axis::Trade, BTreeSet::from(["Antioquia".to_string()])),
            (Axis::Tourism, BTreeSet::from(["05".to_string()])),
        ]);
        let dept = Scope::new(ScopeKind::Department, "Antioquia", keys, 0.0);
        let report = generate_report(&StubSource::full(), &dept, &sample_periods()).unwrap();
        let summary = build_summary(&report, fixed_time());
        assert!(summary.headlines.iter().all(|h| !h.indicator.is_investment()));
        let tourism = summary
            .headlines
            .iter()
            .find(|h| h.indicator == IndicatorKey::TourismArrivalsRunning)
            .unwrap();
        assert!(tourism.text.starts_with("Entre enero y junio de 2025, Antioquia registró 858 llegadas"));
    }
}
