//! CLI command definitions
//!
//! Defines the clap commands for the smoke-test CLI.

use clap::{Args, Subcommand};
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the smoke-test cases against the API (default)
    Run(RunArgs),

    /// List the cases in execution order
    #[command(alias = "ls")]
    List,
}

/// Options for a suite run; each one overrides the config file
#[derive(Args, Debug, Default, Clone)]
pub struct RunArgs {
    /// Base URL of the API, e.g. http://localhost:3000/api
    #[arg(long)]
    pub base_url: Option<String>,

    /// Per-request timeout in seconds (0 disables the timeout)
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Write a JSON report of every case to this path
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Only run cases whose name contains this text (case-insensitive)
    #[arg(long)]
    pub only: Option<String>,

    /// Read configuration from this file instead of the default location
    #[arg(long)]
    pub config: Option<PathBuf>,
}
