//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use cwr_cli::types::{ConfigOptions, GenerateOptions};
use cwr_validate::DEFAULT_MAX_DISPLAY;

#[derive(Parser)]
#[command(
    name = "cwr",
    version,
    about = "Generate and validate CWR (Common Works Registration) files",
    long_about = "Generate CWR 2.1 registration files from a CSV export of works,\n\
                  and validate CWR files before they are sent to a society."
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

    /// Configuration file (default: $CWR_CONFIG, then the built-in defaults).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for humans, json for machines).
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

    /// Allow titles, names and IPI numbers in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Build a CWR file from a CSV export of works.
    Generate(GenerateArgs),

    /// Check a CWR file and report findings by severity.
    Validate(ValidateArgs),

    /// Show the effective configuration or write a starter file.
    Config(ConfigArgs),
}

#[derive(Parser)]
pub struct GenerateArgs {
    /// CSV file with one work per row.
    #[arg(value_name = "CSV")]
    pub input: PathBuf,

    /// Output path (default: CW<yy><seq><sender>_<society>.V21 next to the CSV).
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Transmission sequence number for the default file name.
    #[arg(long = "sequence", default_value_t = 1)]
    pub sequence: u32,

    /// Validate the generated file before reporting.
    #[arg(long = "validate")]
    pub validate: bool,

    /// Generate and report without writing the file.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    #[command(flatten)]
    pub report: ReportArgs,
}

impl GenerateArgs {
    pub fn options(&self, config: Option<PathBuf>) -> GenerateOptions {
        GenerateOptions {
            input: self.input.clone(),
            output: self.output.clone(),
            config,
            sequence: self.sequence,
            validate: self.validate,
            dry_run: self.dry_run,
        }
    }
}

#[derive(Parser)]
pub struct ValidateArgs {
    /// CWR file to check.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    #[command(flatten)]
    pub report: ReportArgs,
}

#[derive(Parser)]
pub struct ConfigArgs {
    /// Write the built-in configuration to PATH.
    #[arg(long = "init", value_name = "PATH")]
    pub init: Option<PathBuf>,

    /// Overwrite an existing file with --init.
    #[arg(long = "force", requires = "init")]
    pub force: bool,
}

impl ConfigArgs {
    pub fn options(&self, config: Option<PathBuf>) -> ConfigOptions {
        ConfigOptions {
            config,
            init: self.init.clone(),
            force: self.force,
        }
    }
}

#[derive(Parser)]
pub struct ReportArgs {
    /// How to print the report.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: ReportFormatArg,

    /// Most findings to list; totals always cover all of them.
    #[arg(long = "max-display", default_value_t = DEFAULT_MAX_DISPLAY)]
    pub max_display: usize,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormatArg {
    Table,
    Text,
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
