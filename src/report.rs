use crate::models::ProbeReport;
use anyhow::Result;
use std::io::Write;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Nagios,
    Json,
}

/// `<VERDICT>: <count> files present in <path> <filter>`. The separator
/// before the filter description is kept even when it is empty.
pub fn summary_line(report: &ProbeReport) -> String {
    format!(
        "{}: {} files present in {} {}",
        report.verdict,
        report.count,
        report.path,
        report.filter_description()
    )
}

pub fn write_report<W: Write>(out: &mut W, report: &ProbeReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Nagios => {
            writeln!(out, "{}", summary_line(report))?;
            for name in &report.entries {
                writeln!(out, "{}", name)?;
            }
        }
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(report)?)?;
        }
    }
    out.flush()?;
    Ok(())
}
