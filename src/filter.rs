use crate::error::ProbeError;
use crate::models::DirectoryEntry;
use log::debug;
use regex::Regex;

/// Case-insensitive name filter. An empty pattern matches everything.
#[derive(Debug, Clone)]
pub struct NameFilter {
    pattern: String,
    regex: Option<Regex>,
}

impl NameFilter {
    pub fn new(pattern: &str) -> Result<Self, ProbeError> {
        if pattern.is_empty() {
            return Ok(Self::pass_through());
        }

        let regex = Regex::new(&format!("(?i){}", pattern)).map_err(|e| ProbeError::pattern(&e))?;
        Ok(Self {
            pattern: pattern.to_string(),
            regex: Some(regex),
        })
    }

    pub fn pass_through() -> Self {
        Self {
            pattern: String::new(),
            regex: None,
        }
    }

    /// The user's pattern, without the case-insensitive prefix.
    pub fn pattern(&self) -> Option<&str> {
        self.regex.as_ref().map(|_| self.pattern.as_str())
    }

    pub fn is_match(&self, name: &str) -> bool {
        match &self.regex {
            Some(regex) => regex.is_match(name),
            None => true,
        }
    }
}

pub fn filter_entries(entries: Vec<DirectoryEntry>, filter: &NameFilter) -> Vec<DirectoryEntry> {
    if filter.pattern().is_none() {
        return entries;
    }

    let before = entries.len();
    let kept: Vec<DirectoryEntry> = entries
        .into_iter()
        .filter(|entry| filter.is_match(&entry.name))
        .collect();
    debug!(
        "Filter {:?} kept {} of {} entries",
        filter.pattern,
        kept.len(),
        before
    );
    kept
}
