//! Guarded file reads for the traversal host.

use std::fs;
use std::path::Path;

use crate::diagnostics::{LintError, LintResult};

/// Default upper bound on descriptor size (2 MiB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 2 * 1024 * 1024;

/// Encodings descriptor files can be decoded with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Charset {
    Utf8,
    Ascii,
    Latin1,
}

impl Charset {
    /// Look up a charset by name. Case and `-`/`_` spelling are ignored.
    pub fn from_name(name: &str) -> LintResult<Self> {
        match name.trim().to_ascii_uppercase().replace('_', "-").as_str() {
            "UTF-8" | "UTF8" => Ok(Charset::Utf8),
            "US-ASCII" | "ASCII" => Ok(Charset::Ascii),
            "ISO-8859-1" | "ISO8859-1" | "LATIN1" | "LATIN-1" => Ok(Charset::Latin1),
            _ => Err(LintError::UnsupportedCharset(name.to_string())),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Charset::Utf8 => "UTF-8",
            Charset::Ascii => "US-ASCII",
            Charset::Latin1 => "ISO-8859-1",
        }
    }

    /// Decode `bytes`, or `None` if they are not valid in this charset.
    pub fn decode(self, bytes: Vec<u8>) -> Option<String> {
        match self {
            Charset::Utf8 => String::from_utf8(bytes).ok(),
            Charset::Ascii if bytes.is_ascii() => String::from_utf8(bytes).ok(),
            Charset::Ascii => None,
            // Latin-1 bytes are the first 256 code points
            Charset::Latin1 => Some(bytes.into_iter().map(char::from).collect()),
        }
    }
}

/// Read a file as text in `charset`.
///
/// Symlinks, non-regular files and files larger than `limit` bytes are
/// rejected before any content is read.
pub fn safe_read_file(path: &Path, limit: u64, charset: Charset) -> LintResult<String> {
    let metadata = fs::symlink_metadata(path).map_err(|source| LintError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    if metadata.file_type().is_symlink() {
        return Err(LintError::FileSymlink {
            path: path.to_path_buf(),
        });
    }
    if !metadata.is_file() {
        return Err(LintError::FileNotRegular {
            path: path.to_path_buf(),
        });
    }
    if metadata.len() > limit {
        return Err(LintError::FileTooBig {
            path: path.to_path_buf(),
            size: metadata.len(),
            limit,
        });
    }

    let bytes = fs::read(path).map_err(|source| LintError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    charset.decode(bytes).ok_or_else(|| LintError::Decode {
        path: path.to_path_buf(),
        charset: charset.name().to_string(),
    })
}
