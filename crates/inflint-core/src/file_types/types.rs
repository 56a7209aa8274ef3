//! DirectoryCategory enum for validator dispatch.

use std::fmt;

/// Category of a descriptor file, derived from its parent directory name.
///
/// Each recognised variant maps to exactly one delegate held by
/// [`InfXmlCheck`](crate::InfXmlCheck). The enum derives [`Hash`], [`Eq`],
/// and [`Copy`] so it can key maps and be passed around freely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectoryCategory {
    /// ESH-INF/thing/*.xml
    Thing,
    /// ESH-INF/binding/*.xml
    Binding,
    /// ESH-INF/config/*.xml
    Configuration,
    /// Any other directory (i18n and friends), skipped
    Unrecognized,
}

impl fmt::Display for DirectoryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DirectoryCategory::Thing => "Thing",
            DirectoryCategory::Binding => "Binding",
            DirectoryCategory::Configuration => "Configuration",
            DirectoryCategory::Unrecognized => "Unrecognized",
        })
    }
}
