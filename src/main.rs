mod cli;
mod config;
mod counts;
mod discovery;
mod error;
mod inputs;
mod model;
mod output;
#[cfg(test)]
mod test_utils;

use crate::error::Result;
use clap::{Parser, Subcommand};
use miette::IntoDiagnostic;
use std::process::ExitCode;

/// Helpers for RNA-seq workflows: sample discovery, configuration
/// resolution and count table merging.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    /// Only print errors to stderr.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Print debug information to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Samples(cli::SamplesArgs),
    Config(cli::ConfigArgs),
    Inputs(cli::InputsArgs),
    MergeCounts(cli::MergeCountsArgs),
}

fn init_logging(args: &Args) {
    let level = if args.quiet {
        tracing::Level::ERROR
    } else if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    let subscriber = tracing_subscriber::fmt::Subscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn try_main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args);

    match &args.command {
        Command::Samples(cmd) => cli::run_samples(cmd),
        Command::Config(cmd) => cli::run_config(cmd),
        Command::Inputs(cmd) => cli::run_inputs(cmd),
        Command::MergeCounts(cmd) => cli::run_merge_counts(cmd, !args.quiet),
    }
}

fn main() -> ExitCode {
    match try_main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let code = err.kind().exit_code();
            if let Err(report) = Err::<(), _>(err).into_diagnostic() {
                eprintln!("{report:?}");
            }
            ExitCode::from(code)
        }
    }
}
