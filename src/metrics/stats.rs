use std::sync::{Mutex, MutexGuard, PoisonError};

use super::types::RequestOutcome;

/// Shortest-request sentinel; any real elapsed time replaces it.
const NO_SHORTEST: u64 = u64::MAX;

#[derive(Debug, Clone, Copy)]
struct AggregateStats {
    total_successes: u64,
    total_failures: u64,
    total_time_taken_ms: u64,
    longest_running_request_ms: u64,
    shortest_running_request_ms: u64,
}

impl Default for AggregateStats {
    fn default() -> Self {
        Self {
            total_successes: 0,
            total_failures: 0,
            total_time_taken_ms: 0,
            longest_running_request_ms: 0,
            shortest_running_request_ms: NO_SHORTEST,
        }
    }
}

/// Run-wide accumulator shared by every worker.
///
/// All fields live behind one lock so a reader never sees the counters
/// updated without the matching time total.
#[derive(Debug, Default)]
pub struct StatsAggregator {
    inner: Mutex<AggregateStats>,
}

impl StatsAggregator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one outcome into the totals.
    ///
    /// Failures add to the time total but never move the longest/shortest
    /// extremes.
    pub fn merge(&self, outcome: RequestOutcome) {
        let mut stats = self.lock();
        stats.total_time_taken_ms = stats.total_time_taken_ms.saturating_add(outcome.elapsed_ms);
        if outcome.success {
            stats.total_successes = stats.total_successes.saturating_add(1);
            stats.longest_running_request_ms =
                stats.longest_running_request_ms.max(outcome.elapsed_ms);
            stats.shortest_running_request_ms =
                stats.shortest_running_request_ms.min(outcome.elapsed_ms);
        } else {
            stats.total_failures = stats.total_failures.saturating_add(1);
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> StatsSnapshot {
        let stats = *self.lock();
        StatsSnapshot {
            total_successes: stats.total_successes,
            total_failures: stats.total_failures,
            total_time_taken_ms: stats.total_time_taken_ms,
            longest_running_request_ms: stats.longest_running_request_ms,
            shortest_running_request_ms: if stats.total_successes == 0 {
                0
            } else {
                stats.shortest_running_request_ms
            },
        }
    }

    fn lock(&self) -> MutexGuard<'_, AggregateStats> {
        // merge never panics, so a poisoned lock still holds consistent totals.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Consistent copy of the totals, taken under the aggregator lock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub total_successes: u64,
    pub total_failures: u64,
    pub total_time_taken_ms: u64,
    pub longest_running_request_ms: u64,
    /// Zero when no request succeeded.
    pub shortest_running_request_ms: u64,
}

impl StatsSnapshot {
    #[must_use]
    pub const fn total_requests(&self) -> u64 {
        self.total_successes.saturating_add(self.total_failures)
    }

    /// Total time over successful requests; zero when nothing succeeded.
    ///
    /// The numerator includes failed attempts, matching how the totals are
    /// accumulated.
    #[must_use]
    pub const fn average_response_time_ms(&self) -> u64 {
        match self.total_time_taken_ms.checked_div(self.total_successes) {
            Some(average) => average,
            None => 0,
        }
    }
}
