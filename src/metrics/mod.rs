//! Per-request outcomes and the run-wide statistics they merge into.
mod stats;
mod types;


pub use stats::{StatsAggregator, StatsSnapshot};
pub use types::RequestOutcome;
