// Top-K leaderboards with an "Others" residual and a "Total" row.

use crate::indicators::{Dimension, IndicatorKey};
use crate::scope::ScopeKind;
use crate::source::{FactRow, ReferenceTotal};
use crate::util::{percent_change, percent_share};
use serde::Serialize;
use std::collections::BTreeSet;

pub const OTHERS_LABEL: &str = "Otros";
pub const TOTAL_LABEL: &str = "Total";
/// Placeholder company name the warehouse uses for unidentified exporters.
pub const UNDEFINED_COMPANY: &str = "NO DEFINIDO";

const DEFAULT_TOP_K: usize = 5;
const NATIONAL_INVESTMENT_TOP_K: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct TierPolicy {
    pub top_k: usize,
    /// Labels dropped from the candidate pool before counting real rows.
    pub exclude_labels: BTreeSet<String>,
    /// Emit Others whenever the residual is non-zero, even without overflow.
    pub always_show_others_if_residual_nonzero: bool,
    /// Company leaderboards: emit Others when the raw list had exactly
    /// `top_k + 1` rows and one of them was an excluded placeholder.
    pub reconcile_excluded_placeholder: bool,
    /// Never emit Others.
    pub suppress_others: bool,
}

impl Default for TierPolicy {
    fn default() -> Self {
        Self::top(DEFAULT_TOP_K)
    }
}

impl TierPolicy {
    pub fn top(top_k: usize) -> Self {
        Self {
            top_k,
            exclude_labels: BTreeSet::new(),
            always_show_others_if_residual_nonzero: false,
            reconcile_excluded_placeholder: false,
            suppress_others: false,
        }
    }

    pub fn company_leaderboard() -> Self {
        Self {
            exclude_labels: BTreeSet::from([UNDEFINED_COMPANY.to_string()]),
            reconcile_excluded_placeholder: true,
            ..Self::default()
        }
    }

    /// Policy for one leaderboard of a report.
    pub fn for_section(kind: ScopeKind, indicator: IndicatorKey, dimension: Dimension) -> Self {
        match dimension {
            Dimension::Company => Self::company_leaderboard(),
            Dimension::TradeAgreement => Self {
                always_show_others_if_residual_nonzero: true,
                ..Self::default()
            },
            Dimension::Gender => Self {
                suppress_others: true,
                ..Self::default()
            },
            Dimension::Country if kind == ScopeKind::National && indicator.is_investment() => {
                Self::top(NATIONAL_INVESTMENT_TOP_K)
            }
            _ => Self::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowKind {
    Ranked,
    Others,
    Total,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RollupRow {
    pub label: String,
    pub kind: RowKind,
    pub prior_value: f64,
    pub current_value: f64,
    pub percent_change: f64,
    /// `None` only for rows passed through without a reference total.
    pub percent_share: Option<f64>,
}

impl RollupRow {
    fn new(label: impl Into<String>, kind: RowKind, prior: f64, current: f64, total: f64) -> Self {
        Self {
            label: label.into(),
            kind,
            prior_value: prior,
            current_value: current,
            percent_change: percent_change(current, prior),
            percent_share: Some(percent_share(current, total)),
        }
    }

    /// A retrieved row rendered as-is, with no share column.
    pub fn passthrough(row: &FactRow) -> Self {
        Self {
            label: row.category.clone(),
            kind: RowKind::Ranked,
            prior_value: row.prior_value,
            current_value: row.current_value,
            percent_change: percent_change(row.current_value, row.prior_value),
            percent_share: None,
        }
    }
}

/// Ordered leaderboard: ranked rows, optional Others, then Total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RollupResult {
    rows: Vec<RollupRow>,
}

impl RollupResult {
    pub fn rows(&self) -> &[RollupRow] {
        &self.rows
    }

    pub fn ranked(&self) -> &[RollupRow] {
        let n = self.rows.iter().take_while(|r| r.kind == RowKind::Ranked).count();
        &self.rows[..n]
    }

    pub fn others(&self) -> Option<&RollupRow> {
        self.rows.iter().find(|r| r.kind == RowKind::Others)
    }

    pub fn total(&self) -> &RollupRow {
        // Constructed only by `tiered_rollup`, which always appends Total.
        &self.rows[self.rows.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

pub fn tiered_rollup(facts: &[FactRow], reference: ReferenceTotal, policy: &TierPolicy) -> RollupResult {
    let total = reference.current_value;

    let mut sorted: Vec<&FactRow> = facts.iter().collect();
    // `sort_by` is stable: ties keep retrieval order.
    sorted.sort_by(|a, b| b.current_value.total_cmp(&a.current_value));

    let raw_count = sorted.len();
    let candidates: Vec<&FactRow> = sorted
        .into_iter()
        .filter(|r| !policy.exclude_labels.contains(&r.category))
        .collect();
    let filtered_count = candidates.len();
    let excluded_present = filtered_count < raw_count;

    let top: Vec<&FactRow> = candidates.into_iter().take(policy.top_k).collect();

    let mut rows: Vec<RollupRow> = top
        .iter()
        .map(|r| RollupRow::new(r.category.clone(), RowKind::Ranked, r.prior_value, r.current_value, total))
        .collect();

    let others_prior = reference.prior_value - top.iter().map(|r| r.prior_value).sum::<f64>();
    let others_current = reference.current_value - top.iter().map(|r| r.current_value).sum::<f64>();

    let emit_others = !policy.suppress_others
        && !facts.is_empty()
        && (filtered_count > policy.top_k
            || (policy.always_show_others_if_residual_nonzero
                && (others_current != 0.0 || others_prior != 0.0))
            || (policy.reconcile_excluded_placeholder
                && raw_count == policy.top_k + 1
                && excluded_present));

    if emit_others {
        rows.push(RollupRow::new(OTHERS_LABEL, RowKind::Others, others_prior, others_current, total));
    }

    rows.push(RollupRow::new(
        TOTAL_LABEL,
        RowKind::Total,
        reference.prior_value,
        reference.current_value,
        total,
    ));

    RollupResult { rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn facts(values: &[f64]) -> Vec<FactRow> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| FactRow::new(format!("C{i}"), v * 0.8, *v))
            .collect()
    }

    #[test]
    fn empty_facts_yield_total_only() {
        let reference = ReferenceTotal::new(80.0, 100.0);
        let result = tiered_rollup(&[], reference, &TierPolicy::default());
        assert_eq!(result.len(), 1);
        let total = result.total();
        assert_eq!(total.kind, RowKind::Total);
        assert_eq!(total.prior_value, 80.0);
        assert_eq!(total.current_value, 100.0);
        assert_abs_diff_eq!(total.percent_change, 25.0, epsilon = 1e-9);
        assert_eq!(total.percent_share, Some(100.0));
    }

    #[test]
    fn seven_facts_top_five_with_residual() {
        let input = facts(&[50.0, 40.0, 30.0, 20.0, 10.0, 5.0, 1.0]);
        let reference = ReferenceTotal::new(120.0, 156.0);
        let result = tiered_rollup(&input, reference, &TierPolicy::default());

        assert_eq!(result.ranked().len(), 5);
        let others = result.others().expect("others row");
        assert_abs_diff_eq!(others.current_value, 6.0, epsilon = 1e-9);
        assert_abs_diff_eq!(others.prior_value, 120.0 - 0.8 * 150.0, epsilon = 1e-9);
        assert_eq!(result.total().current_value, 156.0);
        assert_eq!(result.rows().last().unwrap().label, TOTAL_LABEL);

        let visible: f64 = result.ranked().iter().map(|r| r.current_value).sum::<f64>() + others.current_value;
        assert_abs_diff_eq!(visible, result.total().current_value, epsilon = 1e-9);
    }

    #[test]
    fn shares_sum_to_one_hundred_without_exclusions() {
        let input = facts(&[50.0, 40.0, 30.0, 20.0, 10.0, 5.0, 1.0]);
        let result = tiered_rollup(&input, ReferenceTotal::new(100.0, 156.0), &TierPolicy::default());
        let sum: f64 = result
            .rows()
            .iter()
            .filter(|r| r.kind != RowKind::Total)
            .filter_map(|r| r.percent_share)
            .sum();
        assert_abs_diff_eq!(sum, 100.0, epsilon = 1e-9);
    }

    #[test]
    fn sorts_descending_and_keeps_ties_stable() {
        let input = vec![
            FactRow::new("low", 1.0, 1.0),
            FactRow::new("tie-a", 1.0, 9.0),
            FactRow::new("high", 1.0, 20.0),
            FactRow::new("tie-b", 1.0, 9.0),
        ];
        let result = tiered_rollup(&input, ReferenceTotal::new(4.0, 39.0), &TierPolicy::default());
        let labels: Vec<&str> = result.ranked().iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["high", "tie-a", "tie-b", "low"]);
        assert!(result.others().is_none());
    }

    #[test]
    fn no_others_when_rows_fit() {
        let input = facts(&[5.0, 4.0, 3.0, 2.0, 1.0]);
        let result = tiered_rollup(&input, ReferenceTotal::new(20.0, 30.0), &TierPolicy::default());
        assert!(result.others().is_none());
        assert_eq!(result.len(), 6);
    }

    #[test]
    fn trade_agreements_show_nonzero_residual() {
        let policy = TierPolicy::for_section(
            ScopeKind::National,
            IndicatorKey::ExportNonMiningClosed,
            Dimension::TradeAgreement,
        );
        let input = facts(&[5.0, 4.0]);
        let result = tiered_rollup(&input, ReferenceTotal::new(10.0, 12.0), &policy);
        let others = result.others().expect("residual row");
        assert_abs_diff_eq!(others.current_value, 3.0, epsilon = 1e-9);

        // Prior-only residual still counts.
        let input = vec![FactRow::new("A", 4.0, 10.0)];
        let result = tiered_rollup(&input, ReferenceTotal::new(6.0, 10.0), &policy);
        assert!(result.others().is_some());

        // Zero residual does not.
        let result = tiered_rollup(&input, ReferenceTotal::new(4.0, 10.0), &policy);
        assert!(result.others().is_none());
    }

    #[test]
    fn placeholder_excluded_before_counting() {
        let policy = TierPolicy::company_leaderboard();
        let input = vec![
            FactRow::new("A", 1.0, 60.0),
            FactRow::new(UNDEFINED_COMPANY, 1.0, 50.0),
            FactRow::new("B", 1.0, 40.0),
            FactRow::new("C", 1.0, 30.0),
            FactRow::new("D", 1.0, 20.0),
            FactRow::new("E", 1.0, 10.0),
        ];
        let result = tiered_rollup(&input, ReferenceTotal::new(10.0, 250.0), &policy);
        let labels: Vec<&str> = result.ranked().iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["A", "B", "C", "D", "E"]);
        // Exactly top_k + 1 raw rows with the placeholder among them.
        let others = result.others().expect("reconciled others row");
        assert_abs_diff_eq!(others.current_value, 90.0, epsilon = 1e-9);
    }

    #[test]
    fn generic_policy_does_not_reconcile_placeholder() {
        let mut policy = TierPolicy::company_leaderboard();
        policy.reconcile_excluded_placeholder = false;
        let input = vec![
            FactRow::new("A", 1.0, 60.0),
            FactRow::new(UNDEFINED_COMPANY, 1.0, 50.0),
            FactRow::new("B", 1.0, 40.0),
            FactRow::new("C", 1.0, 30.0),
            FactRow::new("D", 1.0, 20.0),
            FactRow::new("E", 1.0, 10.0),
        ];
        let result = tiered_rollup(&input, ReferenceTotal::new(10.0, 250.0), &policy);
        assert!(result.others().is_none());
    }

    #[test]
    fn gender_breakdown_never_has_others() {
        let policy = TierPolicy::for_section(
            ScopeKind::Country,
            IndicatorKey::TourismArrivalsClosed,
            Dimension::Gender,
        );
        let input = facts(&[5.0, 4.0, 3.0, 2.0, 1.0, 1.0, 1.0]);
        let result = tiered_rollup(&input, ReferenceTotal::new(10.0, 17.0), &policy);
        assert!(result.others().is_none());
        assert_eq!(result.ranked().len(), 5);
    }

    #[test]
    fn national_investment_ranks_ten() {
        let policy = TierPolicy::for_section(
            ScopeKind::National,
            IndicatorKey::ForeignDirectInvestmentClosed,
            Dimension::Country,
        );
        assert_eq!(policy.top_k, 10);
        let other = TierPolicy::for_section(
            ScopeKind::WorldRegion,
            IndicatorKey::ForeignDirectInvestmentClosed,
            Dimension::Country,
        );
        assert_eq!(other.top_k, 5);
    }

    #[test]
    fn zero_reference_total_gives_zero_shares() {
        let input = facts(&[3.0, 2.0]);
        let result = tiered_rollup(&input, ReferenceTotal::default(), &TierPolicy::default());
        assert!(result.rows().iter().all(|r| r.percent_share == Some(0.0)));
    }
}
