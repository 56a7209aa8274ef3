//! Directory classification for validator dispatch.
//!
//! This module provides:
//!
//! - [`DirectoryCategory`] -- the four outcomes of classifying a descriptor path
//! - [`detect_category`] -- path-based classification against the `ESH-INF` convention
//! - the directory and extension names of that convention as constants

mod detection;
mod types;

pub use detection::{
    BINDING_DIRECTORY, CONFIGURATION_DIRECTORY, ESH_INF_DIRECTORY, THING_DIRECTORY,
    XML_EXTENSION, category_for_directory, detect_category, grandparent_directory_name,
    has_xml_extension, is_under_esh_inf, parent_directory_name,
};
pub use types::DirectoryCategory;
