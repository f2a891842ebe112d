mod worker;

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::{
    args::PositiveUsize,
    error::{AppError, AppResult, HttpError},
    metrics::{StatsAggregator, StatsSnapshot},
    shutdown::ShutdownSender,
};

use super::executor::RequestExecutor;
use worker::WorkerPool;

/// Smallest bound tokio's mpsc accepts; the dispatcher blocks until a worker
/// frees the single slot.
const WORK_CHANNEL_CAPACITY: usize = 1;

/// One unit of work: "issue one request". Carries no payload.
#[derive(Debug, PartialEq, Eq)]
pub struct WorkToken;

/// Fires `requests` requests through `concurrency` workers and returns the
/// final totals once every dispatched request has completed.
///
/// A shutdown broadcast stops dispatching new tokens; requests already handed
/// to a worker still finish and are counted. A second broadcast abandons the
/// requests still in flight and returns the totals merged so far.
///
/// # Errors
///
/// Returns an error when every worker has exited before the work was
/// accounted for, or when a worker task panicked.
pub async fn dispatch_requests<E>(
    executor: Arc<E>,
    concurrency: PositiveUsize,
    requests: u64,
    shutdown_tx: &ShutdownSender,
) -> AppResult<StatsSnapshot>
where
    E: RequestExecutor + 'static,
{
    let stats = Arc::new(StatsAggregator::new());
    let (work_tx, work_rx) = mpsc::channel::<WorkToken>(WORK_CHANNEL_CAPACITY);
    let (done_tx, mut done_rx) = mpsc::unbounded_channel::<()>();
    let mut shutdown_rx = shutdown_tx.subscribe();

    let pool = WorkerPool::spawn(concurrency, work_rx, &done_tx, &executor, &stats);
    // Only workers hold completion senders from here on.
    drop(done_tx);

    let mut dispatched: u64 = 0;
    let mut interrupted = false;
    while dispatched < requests {
        tokio::select! {
            biased;
            _ = shutdown_rx.recv() => {
                warn!(
                    "Shutdown requested; stopping after {} of {} requests.",
                    dispatched, requests
                );
                interrupted = true;
                break;
            }
            sent = work_tx.send(WorkToken) => {
                if sent.is_err() {
                    return Err(AppError::http(HttpError::WorkChannelClosed));
                }
                dispatched = dispatched.saturating_add(1);
            }
        }
    }

    let mut completed: u64 = 0;
    while completed < dispatched {
        tokio::select! {
            biased;
            _ = shutdown_rx.recv() => {
                if interrupted {
                    warn!(
                        "Shutdown requested again; abandoning {} in-flight requests.",
                        dispatched.saturating_sub(completed)
                    );
                    pool.abort();
                    return Ok(stats.snapshot());
                }
                warn!(
                    "Shutdown requested; waiting for {} in-flight requests.",
                    dispatched.saturating_sub(completed)
                );
                interrupted = true;
            }
            done = done_rx.recv() => {
                if done.is_none() {
                    return Err(AppError::http(HttpError::CompletionChannelClosed {
                        completed,
                        expected: dispatched,
                    }));
                }
                completed = completed.saturating_add(1);
            }
        }
    }

    drop(work_tx);
    debug!("All {} requests completed; joining {} workers", completed, pool.size());
    pool.join().await?;

    Ok(stats.snapshot())
}
