mod category;
mod cli;
mod composite;
mod error;
mod mcq;
mod model;
mod normative;
mod physical;
mod pipeline;
mod reference;
mod report_helpers;
mod risk;
mod standards;
mod walk;

use std::error::Error;
use std::path::PathBuf;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Run a command; `Ok(false)` means it finished but should exit non-zero.
fn dispatch(command: Commands) -> Result<bool, Box<dyn Error>> {
    match command {
        Commands::Score {
            path,
            common,
            write,
            no_temperature_adjustment,
        } => pipeline::run_score(
            &path,
            common.reference.as_deref(),
            common.json,
            write,
            !no_temperature_adjustment,
        )
        .map(|()| true),
        Commands::Percentile {
            test,
            score,
            age,
            gender,
            common,
        } => normative::run(
            common.reference.as_deref(),
            test,
            score,
            age,
            gender,
            common.json,
        )
        .map(|()| true),
        Commands::Risks {
            paths,
            exclude,
            top,
            json,
        } => {
            let paths = if paths.is_empty() {
                vec![PathBuf::from(".")]
            } else {
                paths
            };
            risk::run(&paths, &exclude, json, top).map(|()| true)
        }
        Commands::Batch {
            path,
            exclude,
            dry_run,
            no_temperature_adjustment,
            common,
        } => pipeline::run_batch(
            &path,
            &exclude,
            common.reference.as_deref(),
            dry_run,
            common.json,
            !no_temperature_adjustment,
        ),
        Commands::Diff {
            before,
            after,
            json,
        } => pipeline::run_diff(&before, &after, json).map(|()| true),
        Commands::Validate {
            common,
            fix,
            output,
        } => reference::run_validate(
            common.reference.as_deref(),
            fix,
            output.as_deref(),
            common.json,
        ),
        Commands::Seed => reference::run_seed().map(|()| true),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
            Ok(true)
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match dispatch(cli.command) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}
