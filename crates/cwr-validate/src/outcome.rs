use cwr_model::{Finding, FindingCounts, Severity, ValidationStats};
use serde::Serialize;

/// Everything a validation run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationOutcome {
    /// Findings in the order they were raised.
    pub findings: Vec<Finding>,
    pub stats: ValidationStats,
}

impl ValidationOutcome {
    pub fn counts(&self) -> FindingCounts {
        FindingCounts::from_findings(&self.findings)
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.findings
            .iter()
            .filter(|finding| finding.level == severity)
            .count()
    }

    /// Any ERROR or CRITICAL finding.
    pub fn has_blocking(&self) -> bool {
        self.counts().has_blocking()
    }

    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn with_level(&self, severity: Severity) -> impl Iterator<Item = &Finding> {
        self.findings
            .iter()
            .filter(move |finding| finding.level == severity)
    }
}
