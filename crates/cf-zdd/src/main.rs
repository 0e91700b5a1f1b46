mod commands;
mod error;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use zdd_operations::OperationError;

use crate::commands::{Commands, GlobalOptions};
use crate::error::CliError;

#[derive(Parser)]
#[command(name = "cf-zdd")]
#[command(bin_name = "cf-zdd")]
#[command(version = env!("CF_ZDD_VERSION"))]
#[command(about = "Zero-downtime redeploys through the control-plane CLI", long_about = None)]
struct Cli {
    /// Configuration file (default: ./zdd.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Control-plane client to invoke, overriding the configuration file
    #[arg(long = "cf-command", global = true)]
    cf_command: Option<String>,

    /// Log every control-plane call and saga step to stderr
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let options = GlobalOptions {
        config: cli.config,
        cf_command: cli.cf_command,
    };

    if let Err(e) = cli.command.execute(&options) {
        print_error(&e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn print_error(error: &CliError) {
    println!("error: {error}");

    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        println!("caused by: {cause}");
        source = std::error::Error::source(cause);
    }

    if let CliError::Operation(OperationError::RollbackFailed { rollback, .. }) = error {
        println!(
            "rollback of '{}' failed ({}): {}",
            rollback.step, rollback.description, rollback.error
        );
    }
}
