//! CLI argument definitions for the survey cleaning pipeline.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "survey-cleaner",
    version,
    about = "Clean and normalize the college application survey export",
    long_about = "Turn the raw wide-format survey export into the cleaned fact and\n\
                  college dimension tables the dashboard consumes.\n\n\
                  The run pauses after each review output until the matching curated\n\
                  correction file appears in the data folder."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the cleaning pipeline over a data folder.
    Run(RunArgs),

    /// Check the curated reference tables without running the pipeline.
    Check(FolderArgs),

    /// Print the multi-select option reference.
    Options(FolderArgs),
}

#[derive(Parser)]
pub struct RunArgs {
    /// Path to the data folder containing the survey export and
    /// reference CSV files.
    #[arg(value_name = "DATA_FOLDER")]
    pub data_folder: PathBuf,

    /// Output directory for stage outputs (default: <DATA_FOLDER>/output).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Acceptance threshold for fuzzy name matches (overrides the
    /// config file).
    #[arg(long = "min-score", value_name = "SCORE")]
    pub min_score: Option<f64>,

    /// Fail the run on the first multi-select answer that violates the
    /// serialization contract instead of flagging it.
    #[arg(long = "strict-sequences")]
    pub strict_sequences: bool,

    /// Run all stages without writing any output files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct FolderArgs {
    /// Path to the data folder.
    #[arg(value_name = "DATA_FOLDER")]
    pub data_folder: PathBuf,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
