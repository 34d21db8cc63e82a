// Per-scope availability of every indicator.

use crate::indicators::{Availability, AvailabilityMap, IndicatorKey};
use crate::periods::ReportPeriods;
use crate::scope::{Axis, Scope, ScopeKind};
use crate::source::FactSource;
use rayon::prelude::*;
use tracing::{debug, info, warn};

/// What to do for one indicator before touching the source.
enum ProbePlan {
    Fixed(Availability),
    Probe(Scope),
}

fn plan(key: IndicatorKey, scope: &Scope) -> ProbePlan {
    use IndicatorKey::*;
    let kind = scope.kind();

    if kind == ScopeKind::National {
        // Nation-wide data always exists; connectivity is never reported.
        return ProbePlan::Fixed(if key == Connectivity {
            Availability::Unavailable
        } else {
            Availability::Available
        });
    }

    let needs_keys = |axis: Axis| {
        if scope.has_keys(axis) {
            ProbePlan::Probe(scope.clone())
        } else {
            ProbePlan::Fixed(Availability::Unavailable)
        }
    };

    match key {
        ForeignDirectInvestmentClosed
        | ForeignDirectInvestmentRunning
        | OutwardInvestmentClosed
        | OutwardInvestmentRunning => {
            if kind.is_country_like() {
                needs_keys(Axis::Investment)
            } else {
                ProbePlan::Fixed(Availability::NotApplicable)
            }
        }
        UnctadForeignDirectInvestment | UnctadOutwardInvestment => {
            if kind.is_country_like() {
                needs_keys(Axis::UnctadCode)
            } else {
                ProbePlan::Fixed(Availability::NotApplicable)
            }
        }
        TradeBalance => {
            if kind == ScopeKind::Country {
                needs_keys(Axis::Trade)
            } else {
                ProbePlan::Fixed(Availability::NotApplicable)
            }
        }
        TourismArrivalsClosed | TourismArrivalsRunning => needs_keys(Axis::Tourism),
        Connectivity => match scope.connectivity_scope() {
            Some(target) if target.has_keys(Axis::Tourism) => ProbePlan::Probe(target),
            Some(_) => ProbePlan::Fixed(Availability::Unavailable),
            None => ProbePlan::Fixed(Availability::NotApplicable),
        },
        _ => needs_keys(Axis::Trade),
    }
}

/// Probe every indicator for `scope`.
///
/// Probe failures degrade to [`Availability::Unavailable`]; this never fails.
/// The periods identify the data vintage being probed and are only logged.
pub fn compute_availability<S>(source: &S, scope: &Scope, periods: &ReportPeriods) -> AvailabilityMap
where
    S: FactSource + ?Sized,
{
    info!(
        kind = %scope.kind(),
        unit = scope.display_unit(),
        closed_year = %periods.exports.closed_current,
        running = %periods.exports.running_current,
        "computing indicator availability"
    );

    let entries: Vec<(IndicatorKey, Availability)> = IndicatorKey::ALL
        .par_iter()
        .map(|&key| {
            let state = match plan(key, scope) {
                ProbePlan::Fixed(state) => state,
                ProbePlan::Probe(target) => match source.probe_exists(key, &target) {
                    Ok(exists) => Availability::from_probe(exists),
                    Err(e) => {
                        warn!(indicator = %key, error = %e, "availability probe failed; treating as unavailable");
                        Availability::Unavailable
                    }
                },
            };
            debug!(indicator = %key, ?state, "availability");
            (key, state)
        })
        .collect();

    let map = AvailabilityMap::new(entries);
    info!(available = map.available_count(), total = IndicatorKey::ALL.len(), "availability computed");
    map
}
