use tracing::{info, warn};

use crate::shutdown::ShutdownSender;

#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};

/// Forwards every Ctrl+C (and SIGTERM on unix) to the shutdown channel.
///
/// The first signal lets in-flight requests finish; any later one abandons
/// them. The task runs until it is aborted.
pub fn setup_signal_shutdown_handler(shutdown_tx: &ShutdownSender) -> tokio::task::JoinHandle<()> {
    let shutdown_tx = shutdown_tx.clone();
    tokio::spawn(async move {
        #[cfg(unix)]
        let mut term_signal = match signal(SignalKind::terminate()) {
            Ok(signal) => Some(signal),
            Err(err) => {
                warn!("Failed to register SIGTERM handler: {}", err);
                None
            }
        };

        let mut received: u32 = 0;
        loop {
            #[cfg(unix)]
            let name = tokio::select! {
                result = tokio::signal::ctrl_c() => {
                    if let Err(err) = result {
                        warn!("Failed to listen for Ctrl+C: {}", err);
                        return;
                    }
                    "Interrupt"
                }
                () = async {
                    if let Some(signal) = term_signal.as_mut() {
                        signal.recv().await;
                    } else {
                        std::future::pending::<()>().await;
                    }
                } => "SIGTERM",
            };

            #[cfg(not(unix))]
            let name = {
                if let Err(err) = tokio::signal::ctrl_c().await {
                    warn!("Failed to listen for Ctrl+C: {}", err);
                    return;
                }
                "Interrupt"
            };

            received = received.saturating_add(1);
            if received == 1 {
                info!(
                    "{} received; finishing in-flight requests. Signal again to abandon them.",
                    name
                );
            } else {
                warn!("{} received again; abandoning in-flight requests.", name);
            }
            let _send_result = shutdown_tx.send(());
        }
    })
}
