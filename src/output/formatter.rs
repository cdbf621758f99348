//! Core formatting trait and the plain text implementation

use crate::{
    error::{AppError, Result},
    models::RunSummary,
};
use std::fmt::Write as _;

/// Renders a run summary for the terminal
pub trait SummaryFormatter: Send + Sync {
    /// The one-line report: successes, percentage, elapsed seconds, qps
    fn format_summary(&self, summary: &RunSummary) -> Result<String>;

    /// Multi-line failure breakdown for verbose mode
    fn format_breakdown(&self, summary: &RunSummary) -> Result<String>;
}

/// Plain text formatter; its summary line is the canonical report format
///
/// The line reads `S / N, P%, cost T seconds, Q qps.` with two decimals on
/// each figure. The percentage is followed directly by `%` with no space, and
/// the line carries no trailing newline; the client prints it with `println!`.
#[derive(Debug, Clone, Default)]
pub struct PlainFormatter;

impl PlainFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl SummaryFormatter for PlainFormatter {
    fn format_summary(&self, summary: &RunSummary) -> Result<String> {
        Ok(format!(
            "{} / {}, {:.2}%, cost {:.2} seconds, {:.2} qps.",
            summary.successes,
            summary.total,
            summary.success_rate(),
            summary.elapsed_secs(),
            summary.throughput()
        ))
    }

    fn format_breakdown(&self, summary: &RunSummary) -> Result<String> {
        breakdown_lines(summary)
            .map(|lines| lines.join("\n"))
    }
}

/// Breakdown as (label, count, detail) rows, shared by both formatters
pub(crate) fn breakdown_rows(summary: &RunSummary) -> Vec<(&'static str, u64, String)> {
    let b = &summary.breakdown;
    let status_detail = b
        .status_codes
        .iter()
        .map(|(code, count)| format!("{} x{}", code, count))
        .collect::<Vec<_>>()
        .join(", ");
    let timeout_detail = if summary.abandoned > 0 {
        format!("{} pending at deadline", summary.abandoned)
    } else {
        String::new()
    };

    vec![
        ("unexpected body", b.unexpected_body, String::new()),
        ("connect", b.connect, String::new()),
        ("status", b.status, status_detail),
        ("body read", b.body, String::new()),
        ("request", b.request, String::new()),
        ("timed out", b.timed_out, timeout_detail),
    ]
    .into_iter()
    .filter(|(_, count, _)| *count > 0)
    .collect()
}

fn breakdown_lines(summary: &RunSummary) -> Result<Vec<String>> {
    let rows = breakdown_rows(summary);
    if rows.is_empty() {
        return Ok(vec!["Failures: none".to_string()]);
    }

    let mut lines = vec![format!("Failures: {}", summary.failures())];
    for (label, count, detail) in rows {
        let mut line = String::new();
        write!(line, "  {:<16}{}", format!("{}:", label), count)
            .map_err(|e| AppError::io(format!("Failed to format breakdown: {}", e)))?;
        if !detail.is_empty() {
            write!(line, " ({})", detail)
                .map_err(|e| AppError::io(format!("Failed to format breakdown: {}", e)))?;
        }
        lines.push(line);
    }

    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FailureKind, FetchOutcome};
    use std::time::Duration;

    #[test]
    fn test_summary_line_all_ok() {
        let mut summary = RunSummary::new(100);
        for _ in 0..100 {
            summary.record(&FetchOutcome::body(200, "ok"), "ok");
        }
        let summary = summary.finish(Duration::from_millis(250));

        let line = PlainFormatter::new().format_summary(&summary).unwrap();
        assert_eq!(line, "100 / 100, 100.00%, cost 0.25 seconds, 400.00 qps.");
    }

    #[test]
    fn test_summary_line_no_successes() {
        let mut summary = RunSummary::new(10);
        for _ in 0..10 {
            summary.record(&FetchOutcome::body(200, "fail"), "ok");
        }
        let summary = summary.finish(Duration::from_secs(2));

        let line = PlainFormatter::new().format_summary(&summary).unwrap();
        assert_eq!(line, "0 / 10, 0.00%, cost 2.00 seconds, 5.00 qps.");
    }

    #[test]
    fn test_summary_line_partial() {
        let mut summary = RunSummary::new(3);
        summary.record(&FetchOutcome::body(200, "ok"), "ok");
        summary.record(&FetchOutcome::body(200, "ok"), "ok");
        summary.record(&FetchOutcome::TimedOut, "ok");
        let summary = summary.finish(Duration::from_secs(3));

        let line = PlainFormatter::new().format_summary(&summary).unwrap();
        assert_eq!(line, "2 / 3, 66.67%, cost 3.00 seconds, 1.00 qps.");
    }

    #[test]
    fn test_breakdown_without_failures() {
        let mut summary = RunSummary::new(1);
        summary.record(&FetchOutcome::body(200, "ok"), "ok");

        assert_eq!(PlainFormatter::new().format_breakdown(&summary).unwrap(), "Failures: none");
    }

    #[test]
    fn test_breakdown_lists_causes() {
        let mut summary = RunSummary::new(6);
        summary.record(&FetchOutcome::failed(FailureKind::Connect, "refused"), "ok");
        summary.record(&FetchOutcome::failed(FailureKind::Status(500), "500"), "ok");
        summary.record(&FetchOutcome::failed(FailureKind::Status(500), "500"), "ok");
        summary.record(&FetchOutcome::body(200, "fail"), "ok");
        summary.abandon_pending();

        let text = PlainFormatter::new().format_breakdown(&summary).unwrap();
        assert!(text.starts_with("Failures: 6"));
        assert!(text.contains("connect:"));
        assert!(text.contains("(500 x2)"));
        assert!(text.contains("unexpected body:"));
        assert!(text.contains("2 pending at deadline"));
        assert!(!text.contains("body read:"));
    }
}
