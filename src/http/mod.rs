//! HTTP request execution and the worker pool that drives it.
mod client;
mod executor;
mod sender;


pub use client::{ClientSettings, build_client};
pub use executor::{HttpRequestExecutor, RequestExecutor, RequestSpec};
pub use sender::{WorkToken, dispatch_requests};
