use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::{Client, Method, Request};
use tokio::time::Instant;
use tracing::{error, warn};

use crate::args::parse_header;
use crate::error::HttpError;
use crate::metrics::RequestOutcome;

/// Performs one request per call and reports how it went.
///
/// Implementations must absorb every error into the returned outcome; the
/// worker pool has no error path.
#[async_trait]
pub trait RequestExecutor: Send + Sync {
    async fn execute(&self) -> RequestOutcome;
}

/// Raw request parameters, fixed for the whole run.
#[derive(Debug, Clone, Default)]
pub struct RequestSpec {
    pub method: String,
    pub url: String,
    /// Raw `Name:Value` strings in the order they were given.
    pub headers: Vec<String>,
    pub body: String,
}

/// Executes the run's request against a real server.
#[derive(Debug, Clone)]
pub struct HttpRequestExecutor {
    client: Client,
    method: String,
    url: String,
    headers: Vec<(String, String)>,
    body: String,
}

impl HttpRequestExecutor {
    /// Prepares the request template. Header strings without a colon (or with
    /// an empty name) are skipped with a warning.
    #[must_use]
    pub fn new(client: Client, spec: RequestSpec) -> Self {
        let headers = spec
            .headers
            .iter()
            .filter_map(|raw| match parse_header(raw) {
                Ok(header) => Some(header),
                Err(err) => {
                    warn!("Skipping header: {}", err);
                    None
                }
            })
            .collect();

        Self {
            client,
            method: spec.method.trim().to_ascii_uppercase(),
            url: spec.url,
            headers,
            body: spec.body,
        }
    }

    #[must_use]
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    fn build_request(&self) -> Result<Request, HttpError> {
        let method =
            Method::from_bytes(self.method.as_bytes()).map_err(|err| HttpError::InvalidMethod {
                method: self.method.clone(),
                source: err,
            })?;

        let mut request_builder = self.client.request(method, self.url.as_str());
        for (key, value) in &self.headers {
            request_builder = request_builder.header(key.as_str(), value.as_str());
        }
        if !self.body.is_empty() {
            request_builder = request_builder.body(self.body.clone());
        }

        request_builder
            .build()
            .map_err(|err| HttpError::BuildRequestFailed { source: err })
    }
}

#[async_trait]
impl RequestExecutor for HttpRequestExecutor {
    async fn execute(&self) -> RequestOutcome {
        let request = match self.build_request() {
            Ok(request) => request,
            Err(err) => {
                error!("Error occurred while constructing the outbound request: {}", err);
                return RequestOutcome::failed(std::time::Duration::ZERO);
            }
        };

        let start = Instant::now();
        match self.client.execute(request).await {
            Ok(response) => {
                let status = response.status().as_u16();
                match drain_response_body(response).await {
                    Ok(_) => RequestOutcome::from_response(status, start.elapsed()),
                    Err(err) => {
                        error!("Failed to read response body: {}", err);
                        RequestOutcome::failed(start.elapsed())
                    }
                }
            }
            Err(err) => {
                error!("Error occurred while making the outbound request: {}", err);
                RequestOutcome::failed(start.elapsed())
            }
        }
    }
}

async fn drain_response_body(response: reqwest::Response) -> Result<u64, reqwest::Error> {
    let mut stream = response.bytes_stream();
    let mut total_bytes: u64 = 0;
    while let Some(chunk) = stream.next().await {
        let bytes = chunk?;
        total_bytes = total_bytes.saturating_add(u64::try_from(bytes.len()).unwrap_or(u64::MAX));
    }
    Ok(total_bytes)
}
