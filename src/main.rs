//! Entry point for the **winplace** command.
//!
//! Parses the flags, validates them into a placement request, connects to
//! the display and runs one pass of the [`Placer`](winplace::placer::Placer).
//!
//! Exit status is `1` when the help text is shown, when the flags are
//! missing or contradictory, and when the display or the monitor layout
//! cannot be used.  Leaving a window alone (nothing focused, or a panel /
//! dialog focused) is not a failure.

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use log::{debug, error, info};
use serde::Serialize;
use std::process::ExitCode;
use winplace::cli::Cli;
use winplace::config::Config;
use winplace::placement::PlacementCalculator;
use winplace::placer::{Outcome, PlaceError, PlacementPlan, Placer};
use winplace::request::PlacementRequest;
use winplace::traits::WindowManager;

/// Printed on stdout for `--dry-run`.
#[derive(Serialize)]
struct DryRunReport<'a> {
    config: &'a Config,
    plan: &'a PlacementPlan,
}

//  Main

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            init_logging(false);
            return parse_failure(&e);
        }
    };

    init_logging(cli.verbose);
    debug!("flags: {:?}", cli.flags());

    match prepare(&cli) {
        Ok((request, config)) => run(&cli, &request, &config),
        Err(code) => code,
    }
}

/// Print clap's message (help, version or parse error) and pick the exit
/// status.  Help counts as a failed invocation, only `--version` succeeds.
fn parse_failure(e: &clap::Error) -> ExitCode {
    if let Err(io) = e.print() {
        error!("failed to print usage: {}", io);
    }
    if e.kind() == ErrorKind::DisplayVersion {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Validate the flags and resolve the settings.  Usage problems are
/// reported on stderr and turned into the failure exit code.
fn prepare(cli: &Cli) -> Result<(PlacementRequest, Config), ExitCode> {
    let request = PlacementRequest::from_flags(&cli.flags()).map_err(|e| {
        eprintln!("{}", e);
        print_help();
        ExitCode::FAILURE
    })?;
    let config = Config::resolve(&cli.overrides()).map_err(|e| {
        eprintln!("{}", e);
        ExitCode::FAILURE
    })?;
    Ok((request, config))
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

fn print_help() {
    let mut cmd = Cli::command();
    if let Err(e) = cmd.print_help() {
        error!("failed to print help: {}", e);
    }
}

//  Backends

#[cfg(feature = "x11")]
fn run(cli: &Cli, request: &PlacementRequest, config: &Config) -> ExitCode {
    use winplace::x11::X11Wm;

    let wm = match X11Wm::connect(cli.display.as_deref()) {
        Ok(wm) => wm,
        Err(e) => {
            error!("{}", e);
            eprintln!("Cannot open display.");
            return ExitCode::FAILURE;
        }
    };
    place(wm, request, config)
}

#[cfg(not(feature = "x11"))]
fn run(_cli: &Cli, _request: &PlacementRequest, _config: &Config) -> ExitCode {
    error!("winplace was built without a display backend (enable the `x11` feature)");
    ExitCode::FAILURE
}

/// Run the placer against `wm`.  The connection inside `wm` is dropped, and
/// so released, before this returns.
fn place<W: WindowManager>(wm: W, request: &PlacementRequest, config: &Config) -> ExitCode {
    let mut placer = Placer::new(wm, PlacementCalculator::new(config.decoration));
    placer.set_dry_run(config.dry_run);

    let result = placer.place(request);
    if let Err(e) = &result {
        error!("placement failed at {:?}: {}", placer.stage(), e);
    }
    report(config, result)
}

/// Map the result of a placement pass to the process exit status.
fn report(config: &Config, result: Result<Outcome, PlaceError>) -> ExitCode {
    match result {
        Ok(Outcome::NotApplicable(skip)) => {
            info!("nothing to do: {}", skip);
            ExitCode::SUCCESS
        }
        Ok(Outcome::Placed(_)) => ExitCode::SUCCESS,
        Ok(Outcome::Planned(plan)) => print_plan(config, &plan),
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn print_plan(config: &Config, plan: &PlacementPlan) -> ExitCode {
    let report = DryRunReport { config, plan };
    match serde_json::to_string_pretty(&report) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("failed to serialize plan: {}", e);
            ExitCode::FAILURE
        }
    }
}
