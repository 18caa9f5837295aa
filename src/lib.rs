pub mod error;
pub mod filter;
pub mod listing;
pub mod models;
pub mod report;

pub use error::{ErrorKind, ProbeError, USAGE};
pub use filter::{filter_entries, NameFilter};
pub use models::{DirectoryEntry, ProbeExit, ProbeReport, Thresholds, Verdict, INVALID_INVOCATION};
pub use report::OutputFormat;

use anyhow::Result;
use log::debug;
use std::io::Write;

/// One run of the directory count check.
///
/// Directory errors are reported and the run continues with whatever was
/// listed; only a missing path or a bad filter pattern stops it early.
pub struct FileCountProbe {
    path: String,
    thresholds: Thresholds,
    filter: String,
    format: OutputFormat,
}

impl FileCountProbe {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            thresholds: Thresholds::default(),
            filter: String::new(),
            format: OutputFormat::default(),
        }
    }

    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn with_filter(mut self, pattern: impl Into<String>) -> Self {
        self.filter = pattern.into();
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn run<O: Write, E: Write>(&self, out: &mut O, err: &mut E) -> Result<ProbeExit> {
        if self.path.is_empty() {
            return self.abort(out, ProbeError::invocation());
        }

        let handle = match listing::open_directory(&self.path) {
            Ok(handle) => Some(handle),
            Err(e) => {
                log_suggestion(&e);
                writeln!(out, "{}", e)?;
                None
            }
        };

        let entries = match listing::read_entries(handle) {
            Ok(entries) => entries,
            Err(partial) => {
                log_suggestion(&partial.error);
                writeln!(err, "{}", partial.error)?;
                partial.entries
            }
        };

        let filter = match NameFilter::new(&self.filter) {
            Ok(filter) => filter,
            Err(e) => return self.abort(out, e),
        };

        let entries = filter_entries(entries, &filter);
        let verdict = self.thresholds.evaluate(entries.len());
        debug!(
            "{} entries against warn={} crit={}: {}",
            entries.len(),
            self.thresholds.warn,
            self.thresholds.crit,
            verdict
        );

        let report = ProbeReport::new(self.path.as_str(), filter.pattern(), &entries, verdict);
        report::write_report(out, &report, self.format)?;

        Ok(ProbeExit::Verdict(verdict))
    }

    fn abort<O: Write>(&self, out: &mut O, error: ProbeError) -> Result<ProbeExit> {
        log_suggestion(&error);
        writeln!(out, "{}", error)?;
        Ok(ProbeExit::Aborted(error.kind))
    }
}

fn log_suggestion(error: &ProbeError) {
    if let Some(suggestion) = &error.suggestion {
        debug!("{:?}: {}", error.kind, suggestion);
    }
}
