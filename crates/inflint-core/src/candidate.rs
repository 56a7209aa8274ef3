//! Candidate files handed to a check by the traversal engine.

use std::path::{Path, PathBuf};

use crate::file_types::{grandparent_directory_name, parent_directory_name};

/// A file path together with its already-read text.
///
/// Immutable once built; the dispatcher borrows it for a single call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    path: PathBuf,
    text: String,
}

impl CandidateFile {
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Final path component, or an empty string for paths without one.
    pub fn file_name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("")
    }

    pub fn parent_directory_name(&self) -> Option<&str> {
        parent_directory_name(&self.path)
    }

    pub fn grandparent_directory_name(&self) -> Option<&str> {
        grandparent_directory_name(&self.path)
    }

    /// True when the file has no lines or only whitespace lines.
    pub fn is_empty(&self) -> bool {
        self.text.lines().all(|line| line.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let file = CandidateFile::new("bundle/ESH-INF/thing/Thermostat.xml", "<thing/>");

        assert_eq!(file.file_name(), "Thermostat.xml");
        assert_eq!(file.parent_directory_name(), Some("thing"));
        assert_eq!(file.grandparent_directory_name(), Some("ESH-INF"));
        assert_eq!(file.text(), "<thing/>");
        assert_eq!(file.path(), Path::new("bundle/ESH-INF/thing/Thermostat.xml"));
    }

    #[test]
    fn test_is_empty_zero_length() {
        assert!(CandidateFile::new("a.xml", "").is_empty());
    }

    #[test]
    fn test_is_empty_whitespace_only() {
        assert!(CandidateFile::new("a.xml", "\n\n").is_empty());
        assert!(CandidateFile::new("a.xml", "  \t\r\n   \n").is_empty());
    }

    #[test]
    fn test_is_not_empty_with_content() {
        assert!(!CandidateFile::new("a.xml", "\n  <a/>\n").is_empty());
        assert!(!CandidateFile::new("a.xml", "x").is_empty());
    }

    #[test]
    fn test_file_name_missing() {
        let file = CandidateFile::new("..", "x");
        assert_eq!(file.file_name(), "");
        assert!(!file.is_empty());
    }
}
