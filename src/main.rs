//! Attendance smoke tests - end-to-end checks for the office attendance API
//!
//! Runs the fixed case sequence against a running attendance server and
//! exits non-zero if any case failed.

use attendance_smoke::{cli, common::logging};
use attendance_smoke::commands::{Commands, RunArgs};
use clap::Parser;

#[derive(Parser)]
#[command(name = "attendance-smoke", about = "Smoke tests for the office attendance API")]
#[command(version, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// Enable debug logging of every request
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,

    // Running without a subcommand runs the suite with these options
    #[command(flatten)]
    run: RunArgs,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    logging::init_cli(cli.verbose);

    let command = cli.command.unwrap_or(Commands::Run(cli.run));

    match cli::dispatch(command).await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
