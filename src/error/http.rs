use thiserror::Error;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("Failed to build HTTP client: {source}")]
    BuildClientFailed {
        #[source]
        source: reqwest::Error,
    },
    #[error("Invalid HTTP method '{method}': {source}")]
    InvalidMethod {
        method: String,
        #[source]
        source: http::method::InvalidMethod,
    },
    #[error("Failed to build request: {source}")]
    BuildRequestFailed {
        #[source]
        source: reqwest::Error,
    },
    #[error("Work channel closed before all requests were dispatched.")]
    WorkChannelClosed,
    #[error("Completion channel closed after {completed} of {expected} requests.")]
    CompletionChannelClosed { completed: u64, expected: u64 },
}
