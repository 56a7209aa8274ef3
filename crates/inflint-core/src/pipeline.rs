//! Traversal host: walks a project, feeds `.xml` files to an [`InfXmlCheck`]
//! and turns the outcomes into diagnostics.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use ignore::WalkBuilder;
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::candidate::CandidateFile;
use crate::check::{Dispatch, InfXmlCheck};
use crate::config::{ContentErrorPolicy, LintConfig};
use crate::diagnostics::{Diagnostic, LintError, LintResult, RULE_CONTENT, RULE_FILE_READ};
use crate::file_utils::{Charset, safe_read_file};

/// Result of checking a project.
#[derive(Debug, Clone, Default)]
#[non_exhaustive]
pub struct CheckReport {
    /// Diagnostics sorted by level, then file, then line.
    pub diagnostics: Vec<Diagnostic>,
    /// Number of `.xml` files handed to the check.
    pub files_checked: usize,
    /// Number of files a descriptor validator accepted.
    pub files_dispatched: usize,
    /// Wall-clock time of the run, in milliseconds.
    pub check_time_ms: Option<u64>,
}

impl CheckReport {
    pub fn new(diagnostics: Vec<Diagnostic>, files_checked: usize) -> Self {
        Self {
            diagnostics,
            files_checked,
            ..Self::default()
        }
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

fn normalize_rel_path(entry_path: &Path, root: &Path) -> String {
    let rel_path = entry_path.strip_prefix(root).unwrap_or(entry_path);
    let path_str = rel_path.to_string_lossy().replace('\\', "/");
    match path_str.strip_prefix("./") {
        Some(stripped) => stripped.to_string(),
        None => path_str,
    }
}

fn is_excluded(rel_path: &str, patterns: &[glob::Pattern]) -> bool {
    patterns.iter().any(|p| p.matches(rel_path))
}

/// Resolve `path` against the working directory, free of `.` and `..`.
///
/// Classification reads directory names, so `./thing/a.xml` run from inside
/// `ESH-INF` must still see `ESH-INF` as the grandparent. A file keeps its
/// own final component so that a symlinked file is still rejected on read.
fn resolve_path(path: &Path) -> LintResult<PathBuf> {
    let to_error = |source: std::io::Error| LintError::FileRead {
        path: path.to_path_buf(),
        source,
    };
    if path.is_dir() {
        return path.canonicalize().map_err(to_error);
    }
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => {
            let parent = if parent.as_os_str().is_empty() {
                Path::new(".")
            } else {
                parent
            };
            Ok(parent.canonicalize().map_err(to_error)?.join(name))
        }
        _ => path.canonicalize().map_err(to_error),
    }
}

/// Collect every file under `root` the check accepts, sorted.
///
/// Returned paths are absolute. Excluded directories are pruned during the
/// walk; patterns match against paths relative to `root`.
pub fn collect_candidates(root: &Path, config: &LintConfig) -> LintResult<Vec<PathBuf>> {
    let excludes = Arc::new(config.compiled_excludes()?);
    let root_path = resolve_path(root)?;

    let mut files: Vec<PathBuf> = WalkBuilder::new(&root_path)
        .standard_filters(true)
        .filter_entry({
            let excludes = Arc::clone(&excludes);
            let root_path = root_path.clone();
            move |entry| {
                if entry.path() == root_path {
                    return true;
                }
                if entry.file_type().is_some_and(|ft| ft.is_dir()) {
                    let rel = normalize_rel_path(entry.path(), &root_path);
                    let probe = format!("{}/__inflint_probe__", rel);
                    return !is_excluded(&rel, &excludes) && !is_excluded(&probe, &excludes);
                }
                true
            }
        })
        .build()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(error = %e, "skipping unreadable entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()))
        .map(|entry| entry.into_path())
        .filter(|path| InfXmlCheck::accepts(path))
        .filter(|path| !is_excluded(&normalize_rel_path(path, &root_path), &excludes))
        .collect();

    files.sort();
    Ok(files)
}

/// Outcome of one file, before merging into a [`CheckReport`].
struct FileOutcome {
    diagnostics: Vec<Diagnostic>,
    dispatched: bool,
}

impl FileOutcome {
    fn read_failure(mut diagnostics: Vec<Diagnostic>, config: &LintConfig) -> Self {
        diagnostics.retain(|d| config.is_rule_enabled(&d.rule));
        Self {
            diagnostics,
            dispatched: false,
        }
    }
}

fn check_path(
    path: &Path,
    check: &InfXmlCheck,
    config: &LintConfig,
    charset: Charset,
) -> LintResult<FileOutcome> {
    let mut diagnostics = Vec::new();

    let text = match safe_read_file(path, config.max_file_size, charset) {
        Ok(text) => text,
        Err(e @ LintError::FileTooBig { .. }) => {
            diagnostics.push(
                Diagnostic::warning(
                    path.to_path_buf(),
                    0,
                    0,
                    RULE_FILE_READ,
                    format!("Skipped file: {}", e),
                )
                .with_suggestion("Raise max_file_size in .inflint.toml to check this file"),
            );
            return Ok(FileOutcome::read_failure(diagnostics, config));
        }
        Err(e) => {
            diagnostics.push(
                Diagnostic::error(
                    path.to_path_buf(),
                    0,
                    0,
                    RULE_FILE_READ,
                    format!("Failed to read file: {}", e),
                )
                .with_suggestion(format!(
                    "Check that the file is a readable {} regular file",
                    charset.name()
                )),
            );
            return Ok(FileOutcome::read_failure(diagnostics, config));
        }
    };

    let candidate = CandidateFile::new(path, text);
    let dispatched = match check.process(&candidate, &mut diagnostics) {
        Ok(outcome) => matches!(outcome, Dispatch::Dispatched(_)),
        Err(source) => match config.on_content_error {
            ContentErrorPolicy::Abort => {
                return Err(LintError::Content {
                    path: path.to_path_buf(),
                    source,
                });
            }
            ContentErrorPolicy::Report => {
                diagnostics.push(Diagnostic::error(
                    path.to_path_buf(),
                    source.line(),
                    0,
                    RULE_CONTENT,
                    source.to_string(),
                ));
                false
            }
        },
    };

    diagnostics.retain(|d| config.is_rule_enabled(&d.rule));
    Ok(FileOutcome {
        diagnostics,
        dispatched,
    })
}

fn sort_diagnostics(diagnostics: &mut [Diagnostic]) {
    diagnostics.sort_by(|a, b| {
        a.level
            .cmp(&b.level)
            .then_with(|| a.file.cmp(&b.file))
            .then_with(|| a.line.cmp(&b.line))
    });
}

/// Check a single file.
///
/// A file the check does not accept yields an empty report with
/// `files_checked == 0`.
pub fn check_file(
    path: &Path,
    check: &InfXmlCheck,
    config: &LintConfig,
) -> LintResult<CheckReport> {
    let start = Instant::now();
    if !InfXmlCheck::accepts(path) {
        return Ok(CheckReport::new(vec![], 0));
    }
    let charset = config.resolved_charset()?;
    let path = resolve_path(path)?;

    check.begin_processing(charset.name());
    let mut outcome = check_path(&path, check, config, charset)?;
    sort_diagnostics(&mut outcome.diagnostics);

    let mut report = CheckReport::new(outcome.diagnostics, 1);
    report.files_dispatched = usize::from(outcome.dispatched);
    report.check_time_ms = Some(start.elapsed().as_millis() as u64);
    Ok(report)
}

/// Main entry point for checking a project
pub fn check_project(
    root: &Path,
    check: &InfXmlCheck,
    config: &LintConfig,
) -> LintResult<CheckReport> {
    let start = Instant::now();
    let charset = config.resolved_charset()?;
    let files = collect_candidates(root, config)?;
    debug!(root = %root.display(), files = files.len(), "collected candidates");

    check.begin_processing(charset.name());

    let outcomes = files
        .par_iter()
        .map(|path| check_path(path, check, config, charset))
        .collect::<LintResult<Vec<_>>>()?;

    let files_dispatched = outcomes.iter().filter(|o| o.dispatched).count();
    let mut diagnostics: Vec<Diagnostic> =
        outcomes.into_iter().flat_map(|o| o.diagnostics).collect();
    sort_diagnostics(&mut diagnostics);

    let mut report = CheckReport::new(diagnostics, files.len());
    report.files_dispatched = files_dispatched;
    report.check_time_ms = Some(start.elapsed().as_millis() as u64);
    Ok(report)
}
