use std::fmt;
use std::time::Duration;

use marketbrief_types::CallSummary;
use owo_colors::OwoColorize;

use crate::presentation::DisplayOptions;
use crate::presentation::formatters::time;

const RULE_WIDTH: usize = 80;
const TABLE_WIDTH: usize = 40;

/// Summary table over the captured event sequence: per-tool call
/// counts in first-appearance order, the total, and the elapsed
/// wall-clock time.
pub struct SummaryView<'a> {
    pub summary: &'a CallSummary,
    pub elapsed: Duration,
    pub options: &'a DisplayOptions,
}

impl fmt::Display for SummaryView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(RULE_WIDTH);
        let divider = "-".repeat(TABLE_WIDTH);

        writeln!(f, "{}", rule)?;
        if self.options.enable_color {
            writeln!(f, "{}", "MCP CALLS SUMMARY".bold())?;
        } else {
            writeln!(f, "MCP CALLS SUMMARY")?;
        }
        writeln!(f, "{}", rule)?;

        writeln!(
            f,
            "\nTotal Response Time: {}",
            time::format_elapsed(self.elapsed)
        )?;
        writeln!(f, "Total MCP Calls: {}", self.summary.total())?;

        if !self.summary.is_empty() {
            writeln!(f, "\nCalls per Tool:")?;
            writeln!(f, "{}", divider)?;
            writeln!(f, "{:<30} {:>8}", "Tool Name", "Calls")?;
            writeln!(f, "{}", divider)?;
            for (tool_name, count) in self.summary.iter() {
                writeln!(f, "{:<30} {:>8}", tool_name, count)?;
            }
            writeln!(f, "{}", divider)?;
            writeln!(f, "{:<30} {:>8}", "TOTAL", self.summary.total())?;
        }

        writeln!(f, "{}", rule)?;
        Ok(())
    }
}
