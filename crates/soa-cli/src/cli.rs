//! CLI argument definitions for the SoA pipeline.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "soa",
    version,
    about = "Schedule of Activities pipeline - normalize, expand, validate",
    long_about = "Normalize a wide Schedule of Activities matrix into relational tables,\n\
                  project repeating schedule rules into dated occurrences, and validate\n\
                  imaging intervals against an expected spacing."
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
    /// Normalize a wide SoA CSV into relational tables.
    Normalize(NormalizeArgs),

    /// Expand repeating schedule rules into dated occurrences.
    Expand(ExpandArgs),

    /// Validate imaging intervals in a normalized study.
    Validate(ValidateArgs),
}

#[derive(Parser)]
pub struct NormalizeArgs {
    /// Path to the wide SoA CSV (first column = activity names).
    #[arg(long = "input", value_name = "CSV")]
    pub input: PathBuf,

    /// Directory to write the normalized tables into.
    #[arg(long = "out-dir", value_name = "DIR")]
    pub out_dir: PathBuf,
}

#[derive(Parser)]
pub struct ExpandArgs {
    /// Directory containing normalized tables (from `soa normalize`).
    #[arg(long = "normalized-dir", value_name = "DIR")]
    pub normalized_dir: PathBuf,

    /// Projection start date (YYYY-MM-DD).
    #[arg(long = "start-date", value_name = "DATE")]
    pub start_date: NaiveDate,

    /// Uniform cycle length in days.
    #[arg(long = "cycle-length-days", default_value_t = 21)]
    pub cycle_length_days: u32,

    /// Per-cycle lengths, comma separated (e.g. 21,28). Cycles beyond the
    /// list repeat the last entry.
    #[arg(long = "cycle-lengths", value_delimiter = ',', num_args = 1..)]
    pub cycle_lengths: Option<Vec<u32>>,

    /// Number of treatment cycles.
    #[arg(long = "num-cycles", default_value_t = 8)]
    pub num_cycles: u32,

    /// Follow-up span in weeks, added to the treatment span for the horizon.
    #[arg(long = "followup-weeks", default_value_t = 104)]
    pub followup_weeks: u32,

    /// Explicit horizon in days (overrides the computed horizon outright).
    #[arg(long = "horizon-days")]
    pub horizon_days: Option<u32>,

    /// Cap each rule's sequence at this many occurrences.
    #[arg(long = "max-occurrences")]
    pub max_occurrences: Option<u32>,

    /// Only expand rules with these pattern tokens (repeatable).
    #[arg(long = "filter-pattern", value_name = "PATTERN")]
    pub filter_pattern: Vec<String>,

    /// Write instances as JSON to this path instead of printing a table.
    #[arg(long = "json-out", value_name = "PATH")]
    pub json_out: Option<PathBuf>,
}

#[derive(Parser)]
pub struct ValidateArgs {
    /// Directory containing normalized tables (from `soa normalize`).
    #[arg(long = "normalized-dir", value_name = "DIR")]
    pub normalized_dir: PathBuf,

    /// Anchor date for projecting nominal days; gaps are date differences,
    /// so the anchor does not affect deviations.
    #[arg(long = "start-date", value_name = "DATE", default_value = "2025-01-01")]
    pub start_date: NaiveDate,

    /// Expected spacing between consecutive imaging occurrences.
    #[arg(long = "expected-interval-weeks", default_value_t = 6)]
    pub expected_interval_weeks: u32,

    /// Allowed deviation around the expected spacing.
    #[arg(long = "tolerance-days", default_value_t = 4)]
    pub tolerance_days: u32,

    /// Uniform cycle length used for Cycle-N-Day-1 labels.
    #[arg(long = "cycle-length-days", default_value_t = 21)]
    pub cycle_length_days: u32,

    /// Per-cycle lengths, comma separated (e.g. 21,28).
    #[arg(long = "cycle-lengths", value_delimiter = ',', num_args = 1..)]
    pub cycle_lengths: Option<Vec<u32>>,
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
