//! Core library for the `fire` CLI.
//!
//! `fire` sends a fixed number of HTTP requests to one endpoint through a
//! fixed-size worker pool and reports success/failure counts and latency
//! totals. The crate exposes the building blocks the binary is made of: CLI
//! argument types, configuration loading, the request executor, the
//! dispatcher and worker pool, and the statistics aggregator.
pub mod args;
pub mod config;
pub mod error;
pub mod http;
pub mod metrics;
pub mod shutdown;
