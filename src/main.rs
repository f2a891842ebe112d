mod app;
mod args;
mod config;
mod entry;
mod error;
mod http;
mod logger;
mod metrics;
mod shutdown;
mod shutdown_handlers;

use std::process::ExitCode;

fn main() -> ExitCode {
    match entry::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // Fatal errors go to stdout alongside the report.
            println!("{}", err);
            ExitCode::FAILURE
        }
    }
}
