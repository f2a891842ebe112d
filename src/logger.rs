use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Crate-specific filter variable; wins over `RUST_LOG`.
const FIRE_LOG_ENV: &str = "FIRE_LOG";
const RUST_LOG_ENV: &str = "RUST_LOG";

/// Installs the global `tracing` subscriber. Logs go to stderr so the final
/// report on stdout stays machine-greppable.
pub fn init_logging(verbose: bool) {
    let directive = filter_directive(
        std::env::var(FIRE_LOG_ENV).ok(),
        std::env::var(RUST_LOG_ENV).ok(),
        verbose,
    );
    let filter =
        EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new(default_level(verbose)));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set global default subscriber: {}", err);
    }
}

fn filter_directive(fire_log: Option<String>, rust_log: Option<String>, verbose: bool) -> String {
    fire_log
        .filter(|value| !value.trim().is_empty())
        .or_else(|| rust_log.filter(|value| !value.trim().is_empty()))
        .unwrap_or_else(|| default_level(verbose).to_owned())
}

const fn default_level(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "info" }
}
