use std::sync::Arc;

use tokio::time::Instant;
use tracing::info;

use crate::{
    args::{FireArgs, PositiveUsize},
    error::{AppError, AppResult, ValidationError},
    http::{ClientSettings, HttpRequestExecutor, RequestSpec, build_client, dispatch_requests},
    metrics::StatsSnapshot,
    shutdown::shutdown_channel,
    shutdown_handlers::setup_signal_shutdown_handler,
};

use super::summary::print_summary;

/// Fully validated parameters for one local run.
#[derive(Debug, Clone)]
pub(crate) struct LocalRun {
    pub(crate) spec: RequestSpec,
    pub(crate) client: ClientSettings,
    pub(crate) concurrency: PositiveUsize,
    pub(crate) requests: u64,
}

impl LocalRun {
    pub(crate) fn new(args: FireArgs) -> AppResult<Self> {
        let Some(url) = args.url.filter(|url| !url.trim().is_empty()) else {
            return Err(AppError::validation(ValidationError::MissingUrl));
        };
        Ok(Self {
            spec: RequestSpec {
                method: args.method,
                url,
                headers: args.headers,
                body: args.data,
            },
            client: ClientSettings {
                insecure: args.insecure,
                request_timeout: args.request_timeout,
            },
            concurrency: args.concurrency,
            requests: args.requests,
        })
    }
}

/// Runs the configured load, prints the report and returns the final totals.
///
/// # Errors
///
/// Returns an error when the HTTP client cannot be built or the worker pool
/// fails to account for its work.
pub(crate) async fn run_local(run: LocalRun) -> AppResult<StatsSnapshot> {
    let client = build_client(run.client)?;
    let url = run.spec.url.clone();
    let executor = Arc::new(HttpRequestExecutor::new(client, run.spec));

    let (shutdown_tx, _) = shutdown_channel();
    let signal_handle = setup_signal_shutdown_handler(&shutdown_tx);

    info!(
        "Firing {} requests at {} with {} workers",
        run.requests,
        url,
        run.concurrency.get()
    );
    let started = Instant::now();
    let result = dispatch_requests(executor, run.concurrency, run.requests, &shutdown_tx).await;
    signal_handle.abort();
    let snapshot = result?;

    info!(
        elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        total = snapshot.total_requests(),
        "Run finished"
    );
    print_summary(&snapshot);
    Ok(snapshot)
}
