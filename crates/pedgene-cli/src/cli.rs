//! CLI argument definitions for pedgene.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "pedgene",
    version,
    about = "Fetch and reshape gene tables for pediatric cancer analyses",
    long_about = "Fetch versioned datasets from Taiga, split composite `SYMBOL (ID)`\n\
                  gene labels into gene ids and symbols, and remap row indexes\n\
                  through mapping tables."
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
}

#[derive(Subcommand)]
pub enum Command {
    /// List the pediatric cancer-type labels.
    Cancers,

    /// Fetch a dataset from Taiga and optionally split composite gene labels.
    Fetch(FetchArgs),

    /// Remap the row index of a CSV table through a mapping CSV.
    Remap(RemapArgs),
}

#[derive(Parser)]
pub struct FetchArgs {
    /// Dataset id in Taiga form: NAME[.VERSION][/FILE].
    #[arg(value_name = "DATASET")]
    pub dataset: String,

    /// Dataset version (overrides the version in DATASET).
    #[arg(long = "dataset-version", value_name = "N")]
    pub version: Option<u32>,

    /// Datafile name (overrides the file in DATASET).
    #[arg(long = "file", value_name = "NAME")]
    pub file: Option<String>,

    /// Where the composite gene labels are: "header" or "column".
    #[arg(long = "split", value_name = "ATTRIBUTE")]
    pub split: Option<String>,

    /// Composite column for `--split column`.
    #[arg(long = "col", value_name = "COLUMN")]
    pub col: Option<String>,

    /// Drop malformed gene labels instead of failing.
    #[arg(long = "skip-malformed")]
    pub skip_malformed: bool,

    /// Output CSV path (default: stdout).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Taiga base URL (default: $TAIGA_URL or the public deployment).
    #[arg(long = "taiga-url", value_name = "URL")]
    pub taiga_url: Option<String>,

    /// File holding the Taiga API token (default: ~/.taiga/token).
    #[arg(long = "token-file", value_name = "PATH")]
    pub token_file: Option<PathBuf>,

    /// HTTP timeout in seconds.
    #[arg(long = "timeout", value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Treat the first column as the row index even for columnar files.
    #[arg(long = "matrix")]
    pub matrix: bool,
}

#[derive(Parser)]
pub struct RemapArgs {
    /// CSV table whose row index is remapped.
    #[arg(value_name = "TABLE")]
    pub table: PathBuf,

    /// CSV mapping table.
    #[arg(value_name = "MAP")]
    pub map: PathBuf,

    /// Column of TABLE holding the current index (default: row position).
    #[arg(long = "index-col", value_name = "COLUMN")]
    pub index_col: Option<String>,

    /// Column of MAP holding the new index values (default: first column).
    #[arg(long = "map-index-col", value_name = "COLUMN")]
    pub map_index_col: Option<String>,

    /// Column of MAP holding the current index values (default: second column).
    #[arg(long = "map-value-col", value_name = "COLUMN")]
    pub map_value_col: Option<String>,

    /// Name of the new index column.
    #[arg(long = "name", default_value = "index")]
    pub name: String,

    /// Keep rows whose index has no mapping (their new index is empty).
    #[arg(long = "keep-unmapped")]
    pub keep_unmapped: bool,

    /// Output CSV path (default: stdout).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
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
