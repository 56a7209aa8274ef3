//! Directory category detection based on path shape.
//!
//! Detection is path-based only (no I/O). Content is never sniffed, so a
//! malformed file still reaches the validator that owns its directory.

use std::path::Path;

use super::types::DirectoryCategory;

// ============================================================================
// Directory convention
// ============================================================================

/// Name of the metadata root that holds the descriptor directories.
pub const ESH_INF_DIRECTORY: &str = "ESH-INF";

/// Directory holding thing-type descriptors.
pub const THING_DIRECTORY: &str = "thing";

/// Directory holding binding descriptors.
pub const BINDING_DIRECTORY: &str = "binding";

/// Directory holding configuration descriptors.
pub const CONFIGURATION_DIRECTORY: &str = "config";

/// Extension of in-scope descriptor files (without the dot).
pub const XML_EXTENSION: &str = "xml";

// ============================================================================
// Path helpers
// ============================================================================

/// Name of the directory directly containing `path`.
pub fn parent_directory_name(path: &Path) -> Option<&str> {
    path.parent()
        .and_then(|p| p.file_name())
        .and_then(|n| n.to_str())
}

/// Name of the directory two levels above `path`.
pub fn grandparent_directory_name(path: &Path) -> Option<&str> {
    path.parent()
        .and_then(|p| p.parent())
        .and_then(|p| p.file_name())
        .and_then(|n| n.to_str())
}

/// Returns true if `path` carries the descriptor extension.
///
/// Matching is exact: `.XML` and `.xml.bak` are not descriptors.
pub fn has_xml_extension(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(XML_EXTENSION)
}

/// Returns true if the file sits directly in a subdirectory of `ESH-INF`.
pub fn is_under_esh_inf(path: &Path) -> bool {
    grandparent_directory_name(path) == Some(ESH_INF_DIRECTORY)
}

// ============================================================================
// Primary detection functions
// ============================================================================

/// Map a parent directory name to its category.
///
/// Matching is exact and case-sensitive.
pub fn category_for_directory(name: &str) -> DirectoryCategory {
    match name {
        THING_DIRECTORY => DirectoryCategory::Thing,
        BINDING_DIRECTORY => DirectoryCategory::Binding,
        CONFIGURATION_DIRECTORY => DirectoryCategory::Configuration,
        _ => DirectoryCategory::Unrecognized,
    }
}

/// Detect the category of the file at `path`.
///
/// A file outside `ESH-INF/<dir>/` is [`DirectoryCategory::Unrecognized`],
/// the same outcome as a sibling directory such as `ESH-INF/i18n/`.
pub fn detect_category(path: &Path) -> DirectoryCategory {
    if !is_under_esh_inf(path) {
        return DirectoryCategory::Unrecognized;
    }
    parent_directory_name(path).map_or(DirectoryCategory::Unrecognized, category_for_directory)
}
