//! Diagnostic types and error reporting

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub type LintResult<T> = Result<T, LintError>;

/// Rule id for an empty descriptor file.
pub const RULE_EMPTY_FILE: &str = "INF-001";
/// Rule id for a content failure reported by a descriptor validator.
pub const RULE_CONTENT: &str = "INF-002";
/// Rule id for a file that could not be read.
pub const RULE_FILE_READ: &str = "INF-003";

/// A diagnostic message from the linter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    pub message: String,
    pub file: PathBuf,
    /// Line number, 0 anchors the diagnostic at the start of the document
    pub line: usize,
    pub column: usize,
    pub rule: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DiagnosticLevel {
    Error,
    /// The file was skipped rather than rejected; fails the run only with `--strict`
    Warning,
}

impl Diagnostic {
    pub fn error(
        file: PathBuf,
        line: usize,
        column: usize,
        rule: &str,
        message: impl Into<String>,
    ) -> Self {
        Self::with_level(DiagnosticLevel::Error, file, line, column, rule, message)
    }

    pub fn warning(
        file: PathBuf,
        line: usize,
        column: usize,
        rule: &str,
        message: impl Into<String>,
    ) -> Self {
        Self::with_level(DiagnosticLevel::Warning, file, line, column, rule, message)
    }

    fn with_level(
        level: DiagnosticLevel,
        file: PathBuf,
        line: usize,
        column: usize,
        rule: &str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            level,
            message: message.into(),
            file,
            line,
            column,
            rule: rule.to_string(),
            suggestion: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.level == DiagnosticLevel::Error
    }
}

/// Receiver for the structural findings of a check.
///
/// The dispatcher only ever reports at line 0 (the start of the document),
/// but sinks must accept any line so that hosts can reuse them.
pub trait DiagnosticSink {
    fn report(&mut self, line: usize, message: String, path: &Path);
}

/// Files every report under [`RULE_EMPTY_FILE`].
///
/// [`InfXmlCheck`](crate::InfXmlCheck) reports nothing but empty files, so
/// this is the sink the traversal host uses. Hosts that feed reports from
/// other sources need a sink of their own.
impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, line: usize, message: String, path: &Path) {
        self.push(
            Diagnostic::error(path.to_path_buf(), line, 0, RULE_EMPTY_FILE, message)
                .with_suggestion("Add the descriptor content or delete the file"),
        );
    }
}

/// Failure raised by a descriptor validator while checking file content.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContentError {
    #[error("Malformed XML: {message}")]
    Malformed {
        message: String,
        /// 1-based line, when the validator could locate the problem
        line: Option<usize>,
    },

    #[error("Expected root element <{expected}> but found <{found}>")]
    UnexpectedRoot {
        expected: String,
        found: String,
        line: usize,
    },

    #[error("{0}")]
    Other(String),
}

impl ContentError {
    /// Line the failure points at, or 0 when it applies to the whole document.
    pub fn line(&self) -> usize {
        match self {
            ContentError::Malformed { line, .. } => line.unwrap_or(0),
            ContentError::UnexpectedRoot { line, .. } => *line,
            ContentError::Other(_) => 0,
        }
    }
}

/// Linter errors
#[derive(Error, Debug)]
pub enum LintError {
    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Refusing to read symlink: {path}")]
    FileSymlink { path: PathBuf },

    #[error("File too large: {path} ({size} bytes, limit {limit} bytes)")]
    FileTooBig {
        path: PathBuf,
        size: u64,
        limit: u64,
    },

    #[error("Not a regular file: {path}")]
    FileNotRegular { path: PathBuf },

    #[error("File is not valid {charset}: {path}")]
    Decode { path: PathBuf, charset: String },

    #[error("Unsupported charset: {0}")]
    UnsupportedCharset(String),

    #[error("Invalid exclude pattern: {pattern} ({message})")]
    InvalidExcludePattern { pattern: String, message: String },

    #[error("Content check failed for {path}")]
    Content {
        path: PathBuf,
        #[source]
        source: ContentError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_with_suggestion() {
        let diag = Diagnostic::warning(PathBuf::from("a.xml"), 1, 0, RULE_CONTENT, "msg")
            .with_suggestion("try this instead");

        assert_eq!(diag.suggestion, Some("try this instead".to_string()));
        assert_eq!(diag.level, DiagnosticLevel::Warning);
        assert!(!diag.is_error());
    }

    #[test]
    fn test_vec_sink_records_empty_file_rule() {
        let mut sink: Vec<Diagnostic> = Vec::new();
        sink.report(0, "boom".to_string(), Path::new("ESH-INF/thing/a.xml"));

        assert_eq!(sink.len(), 1);
        assert_eq!(sink[0].line, 0);
        assert_eq!(sink[0].rule, RULE_EMPTY_FILE);
        assert_eq!(sink[0].file, PathBuf::from("ESH-INF/thing/a.xml"));
        assert!(sink[0].is_error());
    }

    #[test]
    fn test_levels_sort_errors_first() {
        let mut levels = vec![DiagnosticLevel::Warning, DiagnosticLevel::Error];
        levels.sort();
        assert_eq!(levels, vec![DiagnosticLevel::Error, DiagnosticLevel::Warning]);
    }

    #[test]
    fn test_content_error_line() {
        let malformed = ContentError::Malformed {
            message: "no element".into(),
            line: None,
        };
        assert_eq!(malformed.line(), 0);

        let root = ContentError::UnexpectedRoot {
            expected: "binding:binding".into(),
            found: "thing".into(),
            line: 3,
        };
        assert_eq!(root.line(), 3);
        assert_eq!(
            root.to_string(),
            "Expected root element <binding:binding> but found <thing>"
        );
    }

    #[test]
    fn test_diagnostic_serializes_without_empty_suggestion() {
        let diag = Diagnostic::error(PathBuf::from("x.xml"), 0, 0, RULE_EMPTY_FILE, "empty");
        let json = serde_json::to_string(&diag).unwrap();
        assert!(json.contains("\"rule\":\"INF-001\""));
        assert!(!json.contains("suggestion"));
    }
}
