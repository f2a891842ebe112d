use std::time::Duration;

use reqwest::{Client, ClientBuilder};

use crate::args::DEFAULT_USER_AGENT;
use crate::error::{AppError, AppResult, HttpError};

/// Client-wide settings; they hold for every request in a run.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClientSettings {
    /// Skip certificate and hostname verification.
    pub insecure: bool,
    /// Per-request deadline. `None` waits for the server indefinitely.
    pub request_timeout: Option<Duration>,
}

/// Builds the shared HTTP client used by every worker.
///
/// # Errors
///
/// Returns `BuildClientFailed` when the TLS backend cannot be initialised.
pub fn build_client(settings: ClientSettings) -> AppResult<Client> {
    let mut client_builder = Client::builder().user_agent(DEFAULT_USER_AGENT);

    if let Some(timeout) = settings.request_timeout {
        client_builder = client_builder.timeout(timeout);
    }

    client_builder = apply_tls_settings(client_builder, settings.insecure);

    client_builder
        .build()
        .map_err(|err| AppError::http(HttpError::BuildClientFailed { source: err }))
}

fn apply_tls_settings(builder: ClientBuilder, insecure: bool) -> ClientBuilder {
    if insecure {
        builder
            .danger_accept_invalid_certs(true)
            .danger_accept_invalid_hostnames(true)
    } else {
        builder
    }
}
