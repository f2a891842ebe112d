use clap::{ArgMatches, CommandFactory, FromArgMatches};

use crate::app::{LocalRun, run_local};
use crate::args::{FireArgs, normalize_legacy_flags};
use crate::error::AppResult;

pub(crate) fn run() -> AppResult<()> {
    let (mut args, matches) = parse_args()?;
    apply_config(&mut args, &matches)?;

    crate::logger::init_logging(args.verbose);

    // Missing endpoint is fatal before any worker or runtime exists.
    let local = LocalRun::new(args)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run_local(local))?;
    Ok(())
}

fn parse_args() -> AppResult<(FireArgs, ArgMatches)> {
    let raw_args = normalize_legacy_flags(std::env::args_os());
    let matches = FireArgs::command().get_matches_from(raw_args);
    let args = FireArgs::from_arg_matches(&matches)?;
    Ok((args, matches))
}

fn apply_config(args: &mut FireArgs, matches: &ArgMatches) -> AppResult<()> {
    if let Some(config) = crate::config::load_config(args.config.as_deref())? {
        crate::config::apply_config(args, matches, &config)?;
    }
    Ok(())
}
