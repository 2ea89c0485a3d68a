use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity of a validation finding, ordered from least to most serious.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// Informational, nothing to fix.
    Info,
    /// The file is accepted but something looks off.
    Warning,
    /// A record violates the positional format.
    Error,
    /// The file or a transaction will be rejected by the receiving society.
    Critical,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Critical,
        Severity::Error,
        Severity::Warning,
        Severity::Info,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
            Self::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single issue found in a CWR file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub level: Severity,
    /// 1-based line number (or source row number for generation notes).
    pub line: usize,
    pub message: String,
    /// Raw line the finding refers to.
    pub content: String,
}

impl Finding {
    pub fn new(
        level: Severity,
        line: usize,
        message: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            level,
            line,
            message: message.into(),
            content: content.into(),
        }
    }

    pub fn info(line: usize, message: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(Severity::Info, line, message, content)
    }

    pub fn warning(line: usize, message: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(Severity::Warning, line, message, content)
    }

    pub fn error(line: usize, message: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(Severity::Error, line, message, content)
    }

    pub fn critical(line: usize, message: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(Severity::Critical, line, message, content)
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] line {}: {}", self.level, self.line, self.message)
    }
}

/// Summary statistics collected while validating a file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationStats {
    /// Non-blank lines read.
    pub lines_read: usize,
    /// Work records (NWR/REV) seen.
    pub transactions: usize,
}

/// Number of findings per severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindingCounts {
    pub critical: usize,
    pub error: usize,
    pub warning: usize,
    pub info: usize,
}

impl FindingCounts {
    pub fn from_findings(findings: &[Finding]) -> Self {
        let mut counts = Self::default();
        for finding in findings {
            match finding.level {
                Severity::Critical => counts.critical += 1,
                Severity::Error => counts.error += 1,
                Severity::Warning => counts.warning += 1,
                Severity::Info => counts.info += 1,
            }
        }
        counts
    }

    pub fn get(&self, severity: Severity) -> usize {
        match severity {
            Severity::Critical => self.critical,
            Severity::Error => self.error,
            Severity::Warning => self.warning,
            Severity::Info => self.info,
        }
    }

    pub fn total(&self) -> usize {
        self.critical + self.error + self.warning + self.info
    }

    /// True when the file would be rejected (any ERROR or CRITICAL).
    pub fn has_blocking(&self) -> bool {
        self.critical + self.error > 0
    }
}
