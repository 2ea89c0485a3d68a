//! Plain-text rendering of a validation outcome.

use cwr_model::{Finding, Severity};

use crate::outcome::ValidationOutcome;

/// Findings shown when the caller sets no limit.
pub const DEFAULT_MAX_DISPLAY: usize = 100;

/// Most severe first; line order within a severity.
pub fn sorted_findings(findings: &[Finding]) -> Vec<&Finding> {
    let mut sorted: Vec<&Finding> = findings.iter().collect();
    sorted.sort_by(|a, b| b.level.cmp(&a.level).then(a.line.cmp(&b.line)));
    sorted
}

/// Totals first, then up to `max_display` findings. Totals always cover every
/// finding.
pub fn render_text(outcome: &ValidationOutcome, max_display: usize) -> String {
    let counts = outcome.counts();
    let totals: Vec<String> = Severity::ALL
        .iter()
        .map(|severity| format!("{severity}: {}", counts.get(*severity)))
        .collect();
    let mut lines = vec![
        format!("Lines read: {}", outcome.stats.lines_read),
        format!("Transactions: {}", outcome.stats.transactions),
        totals.join(", "),
    ];

    let sorted = sorted_findings(&outcome.findings);
    for finding in sorted.iter().take(max_display) {
        lines.push(finding.to_string());
        if !finding.content.is_empty() {
            lines.push(format!("    {}", finding.content));
        }
    }
    if sorted.len() > max_display {
        lines.push(format!(
            "... {} more findings not shown",
            sorted.len() - max_display
        ));
    }
    let mut text = lines.join("\n");
    text.push('\n');
    text
}
