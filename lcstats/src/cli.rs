// lcstats/src/cli.rs
//! This file defines the command-line interface (CLI) for the lcstats application,
//! including all available commands and their arguments.
//! License: MIT OR Apache-2.0

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "lcstats",
    version = env!("CARGO_PKG_VERSION"),
    about = "Extract variability and Fourier features from light curves",
    long_about = "lcstats reads light-curve files (time, magnitude, magnitude error) and computes a fixed-order feature row per file: 22 variability and normality statistics followed by a Fourier decomposition at a given period, with the harmonic order chosen by the Bayesian Information Criterion.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Disable informational messages
    #[arg(long, short = 'q', global = true, help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG)
    #[arg(long, short = 'd', global = true, conflicts_with = "quiet", help = "Enable debug logging.")]
    pub debug: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// All available commands for the `lcstats` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Computes the feature row of one or more light-curve files.
    #[command(about = "Compute the feature row of one or more light-curve files.")]
    Extract(ExtractCommand),

    /// Prints the feature column names in output order.
    #[command(about = "Print the feature column names in output order.")]
    Names(NamesCommand),
}

/// Output layouts for `extract`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// One header line and one comma-separated row per input file.
    #[default]
    Csv,
    /// A JSON array of `{source, features}` objects.
    Json,
    /// A name/value table per input file.
    Table,
}

/// Arguments for the `extract` command.
#[derive(Parser, Debug)]
pub struct ExtractCommand {
    /// Light-curve files with `t mag err` columns.
    #[arg(long, short = 'i', value_name = "FILE", num_args = 1.., required = true, help = "Light-curve file(s) with t, mag, err columns (comma or whitespace separated).")]
    pub input: Vec<PathBuf>,

    /// Period at which the Fourier series is fitted.
    #[arg(long, short = 'p', value_name = "PERIOD", help = "Period at which the Fourier series is fitted, in the time unit of the input.")]
    pub period: f64,

    /// Only compute the Fourier block.
    #[arg(long = "fourier-only", help = "Only compute the Fourier block.")]
    pub fourier_only: bool,

    /// Path to a custom engine configuration file (YAML).
    #[arg(long = "config", value_name = "FILE", help = "Path to a custom engine configuration file (YAML).")]
    pub config: Option<PathBuf>,

    /// Output layout.
    #[arg(long = "format", short = 'f', value_enum, default_value_t = OutputFormat::Csv, help = "Output layout.")]
    pub format: OutputFormat,

    /// Shorthand for `--format json`.
    #[arg(long = "json", conflicts_with = "format", help = "Print the features as JSON (same as --format json).")]
    pub json: bool,
}

impl ExtractCommand {
    /// The effective output layout after applying `--json`.
    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            self.format
        }
    }
}

/// Arguments for the `names` command.
#[derive(Parser, Debug)]
pub struct NamesCommand {
    /// Only list the Fourier block.
    #[arg(long = "fourier-only", help = "Only list the Fourier block.")]
    pub fourier_only: bool,

    /// Path to a custom engine configuration file (YAML).
    #[arg(long = "config", value_name = "FILE", help = "Path to a custom engine configuration file (YAML).")]
    pub config: Option<PathBuf>,
}
