pub(crate) const DEFAULT_USER_AGENT: &str = concat!("fire-loadtest/", env!("CARGO_PKG_VERSION"));

/// Long form clap understands for the legacy single-dash `-isInsecure` flag.
pub(crate) const INSECURE_FLAG: &str = "--isInsecure";
/// Legacy single-dash spelling kept for scripts written against the original tool.
pub(crate) const LEGACY_INSECURE_FLAG: &str = "-isInsecure";
