//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "csvlint",
    version,
    about = "Check that a CSV file parses as well-formed records",
    long_about = "Check a delimited-text file against the RFC 4180 record shape.\n\n\
                  The first record sets the expected field count; every later record\n\
                  is checked against it, and quoting violations are reported with\n\
                  line and column positions."
)]
pub struct Cli {
    /// CSV file to check ("-" reads standard input).
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Field delimiter: a single character or one of comma, tab,
    /// semicolon, pipe, colon, space.
    #[arg(long, short = 'd', default_value = "comma", value_name = "DELIMITER")]
    pub delimiter: String,

    /// Tolerate bare quotes and unterminated quoted fields instead of
    /// stopping at them.
    #[arg(long = "lazy-quotes")]
    pub lazy_quotes: bool,

    /// Report style.
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: ReportFormatArg,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(long = "log-format", value_enum, default_value = "pretty")]
    pub log_format: LogFormatArg,
}

/// CLI report format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum ReportFormatArg {
    Text,
    Table,
    Json,
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
