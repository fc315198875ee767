//! CLI argument definitions for toolkit-tally.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use tally_model::DEFAULT_STATION_FIELD;

#[derive(Parser)]
#[command(
    name = "toolkit-tally",
    version,
    about = "Division toolkit tally - count station entries per division",
    long_about = "Count toolkit entries per station in every sheet of a workbook and\n\
                  lay them out grouped by division, using a configurable division mapping."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
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

    /// Allow station names in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Build a division report for every sheet of a workbook.
    Process(ProcessArgs),

    /// Inspect or change the stored division mapping.
    #[command(subcommand)]
    Mapping(MappingCommand),
}

#[derive(Args)]
pub struct StoreArgs {
    /// Directory holding the persisted mapping
    /// (default: $HOME/.toolkit-tally, or ./.toolkit-tally without HOME).
    #[arg(long = "store-dir", value_name = "DIR")]
    pub store_dir: Option<PathBuf>,
}

#[derive(Parser)]
pub struct ProcessArgs {
    /// Input workbook (.xlsx, .xlsm, .xlsb, .xls, .ods) or CSV file.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Use this mapping file for the run instead of the stored mapping.
    #[arg(long = "mapping", value_name = "FILE")]
    pub mapping: Option<PathBuf>,

    #[command(flatten)]
    pub store: StoreArgs,

    /// Output layout.
    #[arg(long = "layout", value_enum, default_value = "totals")]
    pub layout: LayoutArg,

    /// Which stations become rows.
    #[arg(long = "mode", value_enum, default_value = "mapping")]
    pub mode: ModeArg,

    /// Name of the station column (matched ignoring case).
    #[arg(long = "station-field", value_name = "NAME", default_value = DEFAULT_STATION_FIELD)]
    pub station_field: String,

    /// Output directory (default: the input's directory).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "xlsx")]
    pub format: FormatArg,

    /// Build and summarize reports without writing files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Skip sheets without a station column instead of failing the run.
    #[arg(long = "skip-invalid-sheets")]
    pub skip_invalid_sheets: bool,
}

#[derive(Subcommand)]
pub enum MappingCommand {
    /// Print the active mapping.
    Show {
        #[command(flatten)]
        store: StoreArgs,

        /// Print the mapping as JSON instead of a table.
        #[arg(long = "json")]
        json: bool,
    },

    /// Validate a mapping file and make it the stored mapping.
    Set {
        /// JSON object of division name to member station names.
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[command(flatten)]
        store: StoreArgs,
    },

    /// Restore the bundled default mapping.
    Reset {
        #[command(flatten)]
        store: StoreArgs,
    },

    /// Print the path of the stored mapping file.
    Path {
        #[command(flatten)]
        store: StoreArgs,
    },
}

/// CLI layout choices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LayoutArg {
    /// Merged division header, Office / No. of Toolkits sub-header, total row.
    Totals,
    /// Bold division header row, no total row.
    Grouped,
}

/// CLI report mode choices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Every declared member of every division, with zero counts.
    Mapping,
    /// Only observed stations; unmapped ones go to "Other".
    Observed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Xlsx,
    Csv,
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
