use clap::{ArgAction, Parser};
use std::time::Duration;

use super::parsers::{parse_bool_env, parse_duration_arg, parse_positive_usize};
use super::types::PositiveUsize;

#[derive(Debug, Parser, Clone)]
#[clap(
    name = "fire",
    version,
    about = "Fire a fixed number of HTTP requests at one endpoint through a bounded worker pool and report latency totals."
)]
pub struct FireArgs {
    /// Target endpoint URL
    #[arg(value_name = "ENDPOINT")]
    pub url: Option<String>,

    /// Number of concurrent workers
    #[arg(
        long = "concurrency",
        short = 'c',
        default_value = "5",
        value_parser = parse_positive_usize
    )]
    pub concurrency: PositiveUsize,

    /// Total number of requests to fire
    #[arg(long = "requests", short = 'n', default_value_t = 100)]
    pub requests: u64,

    /// HTTP method to use
    #[arg(long, short = 'X', default_value = "GET")]
    pub method: String,

    /// Header to add to every request in 'Name:Value' format (repeatable)
    #[arg(long = "header", short = 'H')]
    pub headers: Vec<String>,

    /// Skip server certificate verification (`--isInsecure=false` keeps it on)
    #[arg(
        long = "isInsecure",
        alias = "insecure",
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_value = "false",
        default_missing_value = "true",
        value_parser = parse_bool_env
    )]
    pub insecure: bool,

    /// Request body
    #[arg(long, short = 'd', default_value = "")]
    pub data: String,

    /// Per-request timeout (supports ms/s/m/h); requests wait indefinitely when unset
    #[arg(long = "timeout", value_parser = parse_duration_arg)]
    pub request_timeout: Option<Duration>,

    /// Path to config file (TOML or JSON)
    #[arg(long)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    pub verbose: bool,
}
