use std::time::Duration;

/// Status recorded when no real response was obtained.
pub const SYNTHETIC_FAILURE_STATUS: u16 = 500;
/// First status code classified as a failure.
const FAILURE_STATUS_FLOOR: u16 = 400;

/// Result of one request attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RequestOutcome {
    pub status_code: u16,
    pub elapsed_ms: u64,
    pub success: bool,
}

impl RequestOutcome {
    /// Classifies a response that actually came back from the server.
    #[must_use]
    pub fn from_response(status_code: u16, elapsed: Duration) -> Self {
        Self {
            status_code,
            elapsed_ms: whole_millis(elapsed),
            success: status_code < FAILURE_STATUS_FLOOR,
        }
    }

    /// Outcome for a request that never produced a usable response.
    #[must_use]
    pub fn failed(elapsed: Duration) -> Self {
        Self {
            status_code: SYNTHETIC_FAILURE_STATUS,
            elapsed_ms: whole_millis(elapsed),
            success: false,
        }
    }
}

fn whole_millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}
