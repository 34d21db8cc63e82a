// Indicator availability and tiered rollups for trade, investment and
// tourism profile reports.
//
// A report request resolves a `Scope`, probes every `IndicatorKey` through a
// `FactSource`, and turns each available indicator into top-K leaderboards
// with an "Others" residual and a "Total" row.

pub mod availability;
pub mod error;
pub mod indicators;
pub mod loader;
pub mod output;
pub mod periods;
pub mod reports;
pub mod rollup;
pub mod scope;
pub mod source;
pub mod summary;
pub mod types;
pub mod util;
