use crate::models::INVALID_INVOCATION;
use std::fmt;
use std::io;
use std::path::Path;

pub const USAGE: &str = "usage: check_file_count [-w count] [-c count] [-r regex] path";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Invocation,
    Pattern,
    Open,
    Read,
}

impl ErrorKind {
    /// Exit code for errors that end the run; directory errors only degrade it.
    pub fn exit_code(self) -> Option<i32> {
        match self {
            ErrorKind::Invocation | ErrorKind::Pattern => Some(INVALID_INVOCATION),
            ErrorKind::Open | ErrorKind::Read => None,
        }
    }
}

#[derive(Debug)]
pub struct ProbeError {
    pub kind: ErrorKind,
    pub message: String,
    pub suggestion: Option<String>,
}

impl ProbeError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            suggestion: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn invocation() -> Self {
        Self::new(ErrorKind::Invocation, USAGE)
            .with_suggestion("Pass the directory to inspect as the last argument.")
    }

    pub fn pattern(err: &regex::Error) -> Self {
        Self::new(ErrorKind::Pattern, format!("Error compiling regex: {}", err))
            .with_suggestion("The -r value is a regular expression; escape metacharacters.")
    }

    pub fn read(reason: impl fmt::Display) -> Self {
        Self::new(ErrorKind::Read, format!("Error reading directory: {}", reason))
    }

    pub fn read_io(err: &io::Error) -> Self {
        Self::read(describe_io_error(err))
    }
}

// Display carries only the message: it is written verbatim into plugin output.
impl fmt::Display for ProbeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ProbeError {}

/// OS error text in the lowercase, code-free form monitoring output expects:
/// `No such file or directory (os error 2)` becomes `no such file or directory`.
pub fn describe_io_error(err: &io::Error) -> String {
    let text = err.to_string();
    let text = match text.find(" (os error ") {
        Some(idx) => &text[..idx],
        None => text.as_str(),
    };
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn handle_path_error(path: &Path, err: &io::Error) -> ProbeError {
    let error = ProbeError::new(
        ErrorKind::Open,
        format!(
            "Error opening {}: open {}: {}",
            path.display(),
            path.display(),
            describe_io_error(err)
        ),
    );
    if !path.exists() {
        error.with_suggestion("Check the path and try again.")
    } else if !path.is_dir() {
        error.with_suggestion("Please provide a directory path, not a file.")
    } else {
        error.with_suggestion("Check permissions and try again.")
    }
}
