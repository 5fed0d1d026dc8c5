//! Report command implementation

use super::{Command, CommandContext};
use crate::summary::RunSummary;
use anyhow::Result;
use async_trait::async_trait;

/// Print the summary accumulated so far
pub struct ReportCommand {
    /// Output in JSON format for machine consumption
    pub json: bool,
}

#[async_trait]
impl Command for ReportCommand {
    async fn execute(&self, _context: &CommandContext, summary: &mut RunSummary) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(summary)?);
        } else {
            summary.report();
        }
        Ok(())
    }
}
