//! CLI argument definitions for the results processor.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use tracing::level_filters::LevelFilter;

use times_cli::logging::LogFormat;
use times_model::OutputLayout;

#[derive(Parser)]
#[command(
    name = "times-results",
    version,
    about = "TIMES results processor - Summarise model exports into gap-filled tables",
    long_about = "Classify TIMES/VEDA report exports into the sector, subsector and \
                  subsector detail taxonomy.\n\n\
                  Produces energy, fuel switching, emissions, electricity, hydrogen and \
                  energy efficiency summaries with every interior year filled."
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
    /// Process a results folder into summary tables.
    Process(ProcessArgs),

    /// List the supported dataset exports.
    Datasets,
}

#[derive(Parser)]
pub struct ProcessArgs {
    /// Folder containing the model's CSV report exports.
    #[arg(value_name = "RESULTS_FOLDER")]
    pub input_dir: PathBuf,

    /// Folder containing the mapping tables (default: <RESULTS_FOLDER>/mappings).
    #[arg(long = "mappings", value_name = "DIR")]
    pub mappings: Option<PathBuf>,

    /// Base directory for timestamped run folders (default: <RESULTS_FOLDER>/output).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// TOML file with run options and input file names.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Aggregate across states instead of keeping a state column.
    #[arg(long = "no-states")]
    pub no_states: bool,

    /// Add the sectoral plan column to energy and emissions summaries.
    #[arg(long = "sectoral-plans")]
    pub sectoral_plans: bool,

    /// Table layout of the written summaries.
    #[arg(long = "format", value_enum)]
    pub format: Option<LayoutArg>,

    /// Convert power sector values from TWh to PJ.
    #[arg(long = "power-unit-conversion")]
    pub power_unit_conversion: bool,

    /// Process and report without writing output files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LayoutArg {
    Wide,
    Long,
}

impl From<LayoutArg> for OutputLayout {
    fn from(value: LayoutArg) -> Self {
        match value {
            LayoutArg::Wide => OutputLayout::Wide,
            LayoutArg::Long => OutputLayout::Long,
        }
    }
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

impl From<LogLevelArg> for LevelFilter {
    fn from(value: LogLevelArg) -> Self {
        match value {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        }
    }
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(value: LogFormatArg) -> Self {
        match value {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}
