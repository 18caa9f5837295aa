use crate::error::{handle_path_error, ProbeError};
use crate::models::DirectoryEntry;
use log::{debug, trace};
use std::fs::{self, ReadDir};
use std::io;
use std::path::Path;

/// An opened directory whose entries have not been read yet.
pub type DirHandle = ReadDir;

pub fn open_directory<P: AsRef<Path>>(path: P) -> Result<DirHandle, ProbeError> {
    let path = path.as_ref();
    debug!("Opening directory {}", path.display());
    fs::read_dir(path).map_err(|err| handle_path_error(path, &err))
}

/// The entries read before a listing failed, together with the failure.
#[derive(Debug)]
pub struct PartialListing {
    pub entries: Vec<DirectoryEntry>,
    pub error: ProbeError,
}

/// Reads every immediate entry of `handle`. A missing handle (the open
/// failed) is itself a read error. An I/O failure partway through stops
/// the read but keeps what was listed before it.
pub fn read_entries(handle: Option<DirHandle>) -> Result<Vec<DirectoryEntry>, PartialListing> {
    let handle = handle.ok_or_else(|| PartialListing {
        entries: Vec::new(),
        error: ProbeError::read("invalid argument"),
    })?;

    collect_entries(handle.map(|entry| entry.map(|entry| DirectoryEntry::from(&entry))))
}

pub(crate) fn collect_entries<I>(listing: I) -> Result<Vec<DirectoryEntry>, PartialListing>
where
    I: Iterator<Item = io::Result<DirectoryEntry>>,
{
    let mut entries = Vec::new();
    for entry in listing {
        match entry {
            Ok(entry) => {
                trace!(
                    "Listed {} ({})",
                    entry.name,
                    if entry.is_dir { "dir" } else { "file" }
                );
                entries.push(entry);
            }
            Err(err) => {
                debug!("Listing failed after {} entries: {}", entries.len(), err);
                return Err(PartialListing {
                    entries,
                    error: ProbeError::read_io(&err),
                });
            }
        }
    }
    debug!("Read {} entries", entries.len());

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn create_test_file(dir: &Path, name: &str) -> PathBuf {
        let file_path = dir.join(name);
        fs::write(&file_path, "").unwrap();
        file_path
    }

    fn sorted_names(entries: &[DirectoryEntry]) -> Vec<String> {
        let mut names: Vec<String> = entries.iter().map(|e| e.name.clone()).collect();
        names.sort();
        names
    }

    #[test]
    fn test_lists_files_and_directories() {
        let temp_dir = TempDir::new().unwrap();
        create_test_file(temp_dir.path(), "a.log");
        create_test_file(temp_dir.path(), "b.txt");
        fs::create_dir(temp_dir.path().join("sub")).unwrap();

        let handle = open_directory(temp_dir.path()).unwrap();
        let entries = read_entries(Some(handle)).unwrap();

        assert_eq!(sorted_names(&entries), vec!["a.log", "b.txt", "sub"]);
        let sub = entries.iter().find(|e| e.name == "sub").unwrap();
        assert!(sub.is_dir);
    }

    #[test]
    fn test_does_not_recurse() {
        let temp_dir = TempDir::new().unwrap();
        let sub = temp_dir.path().join("nested");
        fs::create_dir(&sub).unwrap();
        create_test_file(&sub, "deep1.log");
        create_test_file(&sub, "deep2.log");

        let handle = open_directory(temp_dir.path()).unwrap();
        let entries = read_entries(Some(handle)).unwrap();

        assert_eq!(sorted_names(&entries), vec!["nested"]);
    }

    #[test]
    fn test_empty_directory() {
        let temp_dir = TempDir::new().unwrap();
        let handle = open_directory(temp_dir.path()).unwrap();
        assert!(read_entries(Some(handle)).unwrap().is_empty());
    }

    #[test]
    fn test_open_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let err = open_directory(temp_dir.path().join("missing")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Open);
        assert!(err.message.starts_with("Error opening "));
    }

    #[test]
    fn test_open_regular_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = create_test_file(temp_dir.path(), "plain.txt");
        let err = open_directory(&file).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Open);
    }

    #[test]
    fn test_read_without_handle() {
        let partial = read_entries(None).unwrap_err();
        assert!(partial.entries.is_empty());
        assert_eq!(partial.error.kind, ErrorKind::Read);
        assert_eq!(
            partial.error.to_string(),
            "Error reading directory: invalid argument"
        );
    }

    #[test]
    fn test_failure_midway_keeps_earlier_entries() {
        let listing = vec![
            Ok(DirectoryEntry::new("first")),
            Ok(DirectoryEntry::new("second")),
            Err(io::Error::from_raw_os_error(5)),
            Ok(DirectoryEntry::new("never")),
        ];

        let partial = collect_entries(listing.into_iter()).unwrap_err();

        let names: Vec<&str> = partial.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second"]);
        assert_eq!(partial.error.kind, ErrorKind::Read);
        assert_eq!(
            partial.error.to_string(),
            "Error reading directory: input/output error"
        );
    }

    #[test]
    fn test_collect_without_failure() {
        let listing = vec![Ok(DirectoryEntry::new("a")), Ok(DirectoryEntry::new("b"))];
        let entries = collect_entries(listing.into_iter()).unwrap();
        assert_eq!(entries.len(), 2);
    }
}
