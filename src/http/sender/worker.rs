use std::sync::Arc;

use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::args::PositiveUsize;
use crate::error::AppResult;
use crate::metrics::StatsAggregator;

use super::super::executor::RequestExecutor;
use super::WorkToken;

/// Work receiver shared by every worker; whichever worker holds the lock
/// takes the next token.
type SharedWorkReceiver = Arc<Mutex<mpsc::Receiver<WorkToken>>>;

/// Signals one completed unit of work when dropped, so a worker that
/// unwinds mid-request still accounts for its token.
struct CompletionGuard<'tx> {
    done_tx: &'tx mpsc::UnboundedSender<()>,
}

impl Drop for CompletionGuard<'_> {
    fn drop(&mut self) {
        // Fails only after the dispatcher has abandoned the run.
        let _send_result = self.done_tx.send(());
    }
}

/// Fixed set of workers draining one work channel.
pub(crate) struct WorkerPool {
    handles: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Spawns exactly `concurrency` workers. Each loops until the work
    /// channel is closed and empty.
    pub(crate) fn spawn<E>(
        concurrency: PositiveUsize,
        work_rx: mpsc::Receiver<WorkToken>,
        done_tx: &mpsc::UnboundedSender<()>,
        executor: &Arc<E>,
        stats: &Arc<StatsAggregator>,
    ) -> Self
    where
        E: RequestExecutor + 'static,
    {
        let work_rx: SharedWorkReceiver = Arc::new(Mutex::new(work_rx));
        let mut handles = Vec::with_capacity(concurrency.get());

        for worker_id in 0..concurrency.get() {
            let work_rx = Arc::clone(&work_rx);
            let done_tx = done_tx.clone();
            let executor = Arc::clone(executor);
            let stats = Arc::clone(stats);

            handles.push(tokio::spawn(async move {
                run_worker(worker_id, &work_rx, &done_tx, executor.as_ref(), &stats).await;
            }));
        }

        debug!("Spawned {} workers", handles.len());
        Self { handles }
    }

    pub(crate) fn size(&self) -> usize {
        self.handles.len()
    }

    /// Cancels every worker at its next await point. Requests cut off this
    /// way are never merged.
    pub(crate) fn abort(self) {
        for handle in self.handles {
            handle.abort();
        }
    }

    /// Waits for every worker to exit. Only returns once the work channel
    /// has been closed.
    ///
    /// # Errors
    ///
    /// Returns a join error when a worker task panicked.
    pub(crate) async fn join(self) -> AppResult<()> {
        for handle in self.handles {
            handle.await?;
        }
        Ok(())
    }
}

async fn run_worker<E>(
    worker_id: usize,
    work_rx: &SharedWorkReceiver,
    done_tx: &mpsc::UnboundedSender<()>,
    executor: &E,
    stats: &StatsAggregator,
) where
    E: RequestExecutor + ?Sized,
{
    let mut handled: u64 = 0;
    loop {
        let token = {
            let mut receiver = work_rx.lock().await;
            receiver.recv().await
        };
        let Some(WorkToken) = token else {
            break;
        };

        let _completion = CompletionGuard { done_tx };
        let outcome = executor.execute().await;
        stats.merge(outcome);
        handled = handled.saturating_add(1);
    }
    debug!(worker_id, handled, "Worker drained");
}
