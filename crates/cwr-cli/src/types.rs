use std::path::PathBuf;

use cwr_model::{Finding, FindingCounts};
use cwr_validate::ValidationOutcome;
use serde::Serialize;

/// Inputs to `cwr generate`.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// CSV export with one work per row.
    pub input: PathBuf,
    /// Where to write; defaults to the conventional file name next to `input`.
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
    /// Transmission sequence used in the default file name.
    pub sequence: u32,
    /// Run the validator over the generated text.
    pub validate: bool,
    /// Generate and report without writing.
    pub dry_run: bool,
}

impl GenerateOptions {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: None,
            config: None,
            sequence: 1,
            validate: false,
            dry_run: false,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerateResult {
    pub input: PathBuf,
    /// `None` on a dry run.
    pub output: Option<PathBuf>,
    pub file_name: String,
    pub config_source: String,
    pub rows: usize,
    pub transactions: usize,
    pub records: usize,
    pub notes: Vec<Finding>,
    pub note_counts: FindingCounts,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationOutcome>,
}

impl GenerateResult {
    /// True when validation ran and found ERROR or CRITICAL findings.
    pub fn has_errors(&self) -> bool {
        self.validation
            .as_ref()
            .is_some_and(ValidationOutcome::has_blocking)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidateResult {
    pub path: PathBuf,
    pub counts: FindingCounts,
    #[serde(flatten)]
    pub outcome: ValidationOutcome,
}

impl ValidateResult {
    pub fn has_errors(&self) -> bool {
        self.counts.has_blocking()
    }
}

/// Inputs to `cwr config`.
#[derive(Debug, Clone, Default)]
pub struct ConfigOptions {
    pub config: Option<PathBuf>,
    /// Write the built-in configuration here instead of showing one.
    pub init: Option<PathBuf>,
    /// Allow `init` to replace an existing file.
    pub force: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConfigResult {
    pub source: String,
    /// Set when `init` wrote a file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub written: Option<PathBuf>,
    /// Effective configuration as TOML.
    pub text: String,
}
