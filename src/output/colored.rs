//! Colored formatter implementation with terminal color support

use crate::{
    error::Result,
    models::RunSummary,
};
use super::formatter::{breakdown_rows, SummaryFormatter};
use colored::*;

/// Success level classification for color coding
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SuccessLevel {
    /// Every fetch returned the expected body
    Complete,
    /// Some fetches succeeded
    Partial,
    /// Nothing succeeded
    Failed,
}

impl SuccessLevel {
    /// Classify a run summary
    pub fn from_summary(summary: &RunSummary) -> Self {
        if summary.successes == 0 {
            Self::Failed
        } else if summary.successes == summary.total {
            Self::Complete
        } else {
            Self::Partial
        }
    }

    /// Get color for this level
    pub fn color(&self) -> Color {
        match self {
            Self::Complete => Color::Green,
            Self::Partial => Color::Yellow,
            Self::Failed => Color::Red,
        }
    }
}

/// Formatter that colors the report by how much of the run succeeded
#[derive(Debug, Clone, Default)]
pub struct ColoredFormatter;

impl ColoredFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl SummaryFormatter for ColoredFormatter {
    fn format_summary(&self, summary: &RunSummary) -> Result<String> {
        let color = SuccessLevel::from_summary(summary).color();

        Ok(format!(
            "{} / {}, {}, cost {} seconds, {} qps.",
            summary.successes.to_string().color(color).bold(),
            summary.total,
            format!("{:.2}%", summary.success_rate()).color(color),
            format!("{:.2}", summary.elapsed_secs()).cyan(),
            format!("{:.2}", summary.throughput()).bold()
        ))
    }

    fn format_breakdown(&self, summary: &RunSummary) -> Result<String> {
        let rows = breakdown_rows(summary);
        if rows.is_empty() {
            return Ok(format!("Failures: {}", "none".green()));
        }

        let mut lines = vec![format!("Failures: {}", summary.failures().to_string().red().bold())];
        for (label, count, detail) in rows {
            let mut line = format!("  {:<16}{}", format!("{}:", label), count.to_string().yellow());
            if !detail.is_empty() {
                line.push_str(&format!(" ({})", detail.dimmed()));
            }
            lines.push(line);
        }

        Ok(lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FailureKind, FetchOutcome};
    use std::time::Duration;

    fn summary_with(successes: u64, total: u64) -> RunSummary {
        let mut summary = RunSummary::new(total);
        for i in 0..total {
            let outcome = if i < successes {
                FetchOutcome::body(200, "ok")
            } else {
                FetchOutcome::failed(FailureKind::Connect, "refused")
            };
            summary.record(&outcome, "ok");
        }
        summary.finish(Duration::from_secs(1))
    }

    #[test]
    fn test_success_levels() {
        assert_eq!(SuccessLevel::from_summary(&summary_with(10, 10)), SuccessLevel::Complete);
        assert_eq!(SuccessLevel::from_summary(&summary_with(4, 10)), SuccessLevel::Partial);
        assert_eq!(SuccessLevel::from_summary(&summary_with(0, 10)), SuccessLevel::Failed);
        assert_eq!(SuccessLevel::Complete.color(), Color::Green);
    }

    #[test]
    fn test_colored_summary_keeps_report_text() {
        let line = ColoredFormatter::new().format_summary(&summary_with(4, 10)).unwrap();

        assert!(line.contains("40.00%"));
        assert!(line.contains("cost"));
        assert!(line.contains("10.00"));
        assert!(line.ends_with("qps."));
    }

    #[test]
    fn test_colored_breakdown() {
        let text = ColoredFormatter::new().format_breakdown(&summary_with(4, 10)).unwrap();
        assert!(text.contains("Failures:"));
        assert!(text.contains("connect:"));
    }
}
