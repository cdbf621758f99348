//! Output formatting for the run report
//!
//! The summary line is the client's entire default stdout. Plain and colored
//! renderings share the same text; the failure breakdown is verbose-only.

mod colored;
mod formatter;

pub use self::formatter::{SummaryFormatter, PlainFormatter};
pub use self::colored::{ColoredFormatter, SuccessLevel};

use crate::{error::Result, models::RunSummary};

/// Output formatting factory for creating appropriate formatters
pub struct FormatterFactory;

impl FormatterFactory {
    /// Create a formatter based on color preference
    pub fn create(enable_color: bool) -> Box<dyn SummaryFormatter> {
        if enable_color {
            Box::new(ColoredFormatter::new())
        } else {
            Box::new(PlainFormatter::new())
        }
    }
}

/// Render the complete client report
pub fn render_report(formatter: &dyn SummaryFormatter, summary: &RunSummary, verbose: bool) -> Result<String> {
    let mut output = formatter.format_summary(summary)?;

    if verbose {
        output.push('\n');
        output.push_str(&formatter.format_breakdown(summary)?);
    }

    Ok(output)
}
