use std::time::Duration;

use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::parsers::parse_duration_arg;
use crate::args::{FireArgs, PositiveUsize};
use crate::error::{AppError, AppResult, ConfigError, ValidationError};

use super::types::{ConfigFile, DurationValue};

fn is_cli(matches: &ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(ValueSource::CommandLine)
}

fn ensure_positive_usize(value: usize, field: &str) -> AppResult<PositiveUsize> {
    PositiveUsize::try_from(value).map_err(|err| {
        AppError::config(ConfigError::FieldMustBePositive {
            field: field.to_owned(),
            source: err,
        })
    })
}

fn resolve_duration(value: &DurationValue) -> AppResult<Duration> {
    let duration = match value {
        DurationValue::Seconds(0) => {
            return Err(AppError::config(ConfigError::InvalidTimeout {
                source: ValidationError::DurationZero,
            }));
        }
        DurationValue::Seconds(secs) => Duration::from_secs(*secs),
        DurationValue::Text(text) => parse_duration_arg(text).map_err(|err| match err {
            AppError::Validation(source) => AppError::config(ConfigError::InvalidTimeout { source }),
            other => other,
        })?,
    };
    Ok(duration)
}

/// Applies config file values to every argument not given on the command line.
///
/// # Errors
///
/// Returns an error when a config value fails validation.
pub fn apply_config(
    args: &mut FireArgs,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> AppResult<()> {
    if !is_cli(matches, "url")
        && let Some(url) = config.url.clone()
    {
        args.url = Some(url);
    }

    if !is_cli(matches, "concurrency")
        && let Some(value) = config.concurrency
    {
        args.concurrency = ensure_positive_usize(value, "concurrency")?;
    }

    if !is_cli(matches, "requests")
        && let Some(value) = config.requests
    {
        args.requests = value;
    }

    if !is_cli(matches, "method")
        && let Some(method) = config.method.clone()
    {
        args.method = method;
    }

    if !is_cli(matches, "headers")
        && let Some(headers) = config.headers.clone()
    {
        args.headers = headers;
    }

    if !is_cli(matches, "insecure")
        && let Some(value) = config.insecure
    {
        args.insecure = value;
    }

    if !is_cli(matches, "data")
        && let Some(data) = config.data.clone()
    {
        args.data = data;
    }

    if !is_cli(matches, "request_timeout")
        && let Some(timeout) = config.timeout.as_ref()
    {
        args.request_timeout = Some(resolve_duration(timeout)?);
    }

    if !is_cli(matches, "verbose")
        && let Some(value) = config.verbose
    {
        args.verbose = value;
    }

    Ok(())
}
