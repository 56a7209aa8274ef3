//! # inflint-core
//!
//! Dispatch engine for `ESH-INF` descriptor checks.
//!
//! XML files in `ESH-INF/thing`, `ESH-INF/binding` and `ESH-INF/config` are
//! routed to one validator each, chosen purely from the parent directory
//! name. Empty files are reported before any validator sees them; files
//! anywhere else are skipped.
//!
//! - [`InfXmlCheck`] -- the dispatcher
//! - [`DescriptorValidator`] -- the per-category validator seam
//! - [`check_project`] / [`check_file`] -- a parallel host that walks a tree

pub mod candidate;
pub mod check;
pub mod config;
pub mod diagnostics;
pub mod file_types;
pub mod file_utils;
pub mod pipeline;
pub mod rules;

pub use candidate::CandidateFile;
pub use check::{Dispatch, InfXmlCheck};
pub use config::{ContentErrorPolicy, LintConfig};
pub use diagnostics::{
    ContentError, Diagnostic, DiagnosticLevel, DiagnosticSink, LintError, LintResult,
};
pub use file_types::{DirectoryCategory, detect_category};
pub use file_utils::Charset;
pub use pipeline::{CheckReport, check_file, check_project, collect_candidates};
pub use rules::DescriptorValidator;
pub use rules::root_element::RootElementValidator;
