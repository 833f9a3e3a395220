use crate::config::OutputFormat;
use crate::reports::formatters::{JsonFormatter, ReportFormatter, TextFormatter};
use crate::reports::report::QueryReport;
use anyhow::Result;

/// Report generator for the supported output formats
pub struct ReportGenerator;

impl ReportGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Generate report in the specified format
    pub fn generate(&self, report: &QueryReport, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => JsonFormatter.format(report),
            OutputFormat::Text => TextFormatter.format(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}
