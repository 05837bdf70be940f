//! tagsweep CLI - prune old image tags from a container registry.

use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tagsweep_core::PruneError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::Cli;

/// Exit code for invalid invocations, matching clap's usage errors.
const USAGE_ERROR: u8 = 2;

/// Exit code for registry failures.
const RUNTIME_ERROR: u8 = 1;

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr; stdout carries the keep/delete report
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tagsweep=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match commands::prune::run(&cli.prune).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            let status = exit_status(&err);
            if status == USAGE_ERROR {
                eprintln!();
                let _ = Cli::command().print_help();
            }
            ExitCode::from(status)
        }
    }
}

/// Maps a failed run to its process exit status.
fn exit_status(err: &anyhow::Error) -> u8 {
    let is_usage_error = err
        .downcast_ref::<PruneError>()
        .is_some_and(PruneError::is_configuration);
    if is_usage_error {
        USAGE_ERROR
    } else {
        RUNTIME_ERROR
    }
}
