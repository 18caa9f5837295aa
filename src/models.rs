use crate::error::ErrorKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;

/// Exit code for a malformed invocation or an unusable filter pattern.
pub const INVALID_INVOCATION: i32 = 255;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub name: String,
    pub is_dir: bool,
}

impl DirectoryEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: false,
        }
    }
}

impl From<&fs::DirEntry> for DirectoryEntry {
    fn from(entry: &fs::DirEntry) -> Self {
        Self {
            name: entry.file_name().to_string_lossy().into_owned(),
            is_dir: entry.file_type().map(|t| t.is_dir()).unwrap_or(false),
        }
    }
}

/// Plugin health status. The discriminant is the process exit code.
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    Ok = 0,
    Warning = 1,
    Critical = 2,
    #[default]
    Unknown = 3,
}

impl Verdict {
    pub fn label(self) -> &'static str {
        match self {
            Verdict::Ok => "OK",
            Verdict::Warning => "WARNING",
            Verdict::Critical => "CRITICAL",
            Verdict::Unknown => "UNKNOWN",
        }
    }

    pub fn exit_code(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    pub warn: i64,
    pub crit: i64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self { warn: 8, crit: 16 }
    }
}

impl Thresholds {
    pub fn new(warn: i64, crit: i64) -> Self {
        Self { warn, crit }
    }

    /// Critical wins over warning; `warn > crit` is allowed and simply
    /// means the warning band is empty.
    pub fn evaluate(&self, count: usize) -> Verdict {
        let count = i64::try_from(count).unwrap_or(i64::MAX);

        let mut verdict = Verdict::default();
        if count >= self.crit {
            verdict = Verdict::Critical;
        } else if count >= self.warn {
            verdict = Verdict::Warning;
        } else if count <= self.warn {
            verdict = Verdict::Ok;
        }
        verdict
    }
}

/// How a probe run ended: with a verdict, or stopped by an error before one
/// could be computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeExit {
    Verdict(Verdict),
    Aborted(ErrorKind),
}

impl ProbeExit {
    pub fn code(self) -> i32 {
        match self {
            ProbeExit::Verdict(verdict) => verdict.exit_code(),
            ProbeExit::Aborted(kind) => kind
                .exit_code()
                .unwrap_or_else(|| Verdict::Unknown.exit_code()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProbeReport {
    pub verdict: Verdict,
    pub count: usize,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    pub entries: Vec<String>,
}

impl ProbeReport {
    pub fn new(
        path: impl Into<String>,
        filter: Option<&str>,
        entries: &[DirectoryEntry],
        verdict: Verdict,
    ) -> Self {
        Self {
            verdict,
            count: entries.len(),
            path: path.into(),
            filter: filter.map(str::to_string),
            entries: entries.iter().map(|e| e.name.clone()).collect(),
        }
    }

    /// Text appended after the path on the summary line.
    pub fn filter_description(&self) -> String {
        match &self.filter {
            Some(pattern) => format!("filtered by: {}", pattern),
            None => String::new(),
        }
    }
}
