// Report assembly: availability first, then one section per indicator view.

use crate::availability::compute_availability;
use crate::error::{ReportError, SourceError};
use crate::indicators::{Availability, AvailabilityMap, Dimension, IndicatorKey, Presentation};
use crate::periods::ReportPeriods;
use crate::rollup::{tiered_rollup, RollupResult, RollupRow, TierPolicy};
use crate::scope::Scope;
use crate::source::{FactSource, ListingEntry};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum SectionBody {
    Rollup(RollupResult),
    Table(Vec<RollupRow>),
    Listing(Vec<ListingEntry>),
    /// Rendered as the indicator's unavailable label, never as zeros.
    Unavailable { label: &'static str },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSection {
    pub indicator: IndicatorKey,
    pub dimension: Option<Dimension>,
    /// Prior and current column labels.
    pub periods: Option<(String, String)>,
    pub body: SectionBody,
}

impl ReportSection {
    pub fn is_unavailable(&self) -> bool {
        matches!(self.body, SectionBody::Unavailable { .. })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub scope: Scope,
    pub availability: AvailabilityMap,
    pub periods: ReportPeriods,
    pub sections: Vec<ReportSection>,
}

impl Report {
    pub fn section(&self, indicator: IndicatorKey, dimension: Option<Dimension>) -> Option<&ReportSection> {
        self.sections
            .iter()
            .find(|s| s.indicator == indicator && s.dimension == dimension)
    }

    pub fn sections_for(&self, indicator: IndicatorKey) -> impl Iterator<Item = &ReportSection> + '_ {
        self.sections.iter().filter(move |s| s.indicator == indicator)
    }
}

enum Job {
    Rollup(IndicatorKey, Dimension),
    Table(IndicatorKey, Dimension),
    Listing(IndicatorKey),
    Unavailable(IndicatorKey),
}

fn plan_jobs(scope: &Scope, availability: &AvailabilityMap) -> Vec<Job> {
    let mut jobs = Vec::new();
    for key in IndicatorKey::ALL {
        match availability.get(key) {
            Availability::NotApplicable => continue,
            Availability::Unavailable => jobs.push(Job::Unavailable(key)),
            Availability::Available => match key.presentation(scope.kind()) {
                Presentation::Rollup(dims) => {
                    jobs.extend(dims.into_iter().map(|d| Job::Rollup(key, d)));
                }
                Presentation::Table(dim) => jobs.push(Job::Table(key, dim)),
                Presentation::Listing => jobs.push(Job::Listing(key)),
            },
        }
    }
    jobs
}

fn run_job<S>(source: &S, scope: &Scope, periods: &ReportPeriods, job: Job) -> Result<ReportSection, SourceError>
where
    S: FactSource + ?Sized,
{
    let (indicator, dimension, body) = match job {
        Job::Unavailable(key) => (
            key,
            None,
            SectionBody::Unavailable {
                label: key.descriptor().unavailable_label,
            },
        ),
        Job::Rollup(key, dim) => {
            let facts = source.fetch(key, scope, dim)?;
            let reference = source.fetch_reference_total(key, scope)?;
            let policy = TierPolicy::for_section(scope.kind(), key, dim);
            debug!(indicator = %key, dimension = %dim, facts = facts.len(), top_k = policy.top_k, "rollup");
            (key, Some(dim), SectionBody::Rollup(tiered_rollup(&facts, reference, &policy)))
        }
        Job::Table(key, dim) => {
            let rows = source.fetch(key, scope, dim)?;
            (key, Some(dim), SectionBody::Table(rows.iter().map(RollupRow::passthrough).collect()))
        }
        Job::Listing(key) => {
            let entries = match scope.connectivity_scope() {
                Some(target) if key == IndicatorKey::Connectivity => source.fetch_listing(key, &target)?,
                _ => source.fetch_listing(key, scope)?,
            };
            (key, None, SectionBody::Listing(entries))
        }
    };
    Ok(ReportSection {
        indicator,
        dimension,
        periods: periods.labels_for(indicator),
        body,
    })
}

/// Build the full report for one scope.
///
/// The availability map is complete before any section is fetched. Fetch
/// failures past that point are surfaced, unlike probe failures.
pub fn generate_report<S>(source: &S, scope: &Scope, periods: &ReportPeriods) -> Result<Report, ReportError>
where
    S: FactSource + ?Sized,
{
    let availability = compute_availability(source, scope, periods);
    let jobs = plan_jobs(scope, &availability);
    info!(unit = scope.display_unit(), sections = jobs.len(), "assembling report");

    let sections = jobs
        .into_par_iter()
        .map(|job| run_job(source, scope, periods, job))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Report {
        scope: scope.clone(),
        availability,
        periods: periods.clone(),
        sections,
    })
}
