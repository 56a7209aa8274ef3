//! Linter configuration

use crate::diagnostics::{LintError, LintResult};
use crate::file_utils::{Charset, DEFAULT_MAX_FILE_SIZE, safe_read_file};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up in the project root.
pub const CONFIG_FILE_NAME: &str = ".inflint.toml";

/// What the traversal host does when a descriptor validator fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentErrorPolicy {
    /// Record the failure as a diagnostic and continue with the next file
    #[default]
    Report,
    /// Stop the run at the first failure
    Abort,
}

/// Configuration for a check run.
///
/// The `ESH-INF` directory convention is fixed and cannot be configured;
/// these settings only shape how the host walks and reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LintConfig {
    /// Glob patterns (relative to the project root) never handed to the check
    pub exclude: Vec<String>,

    /// Rule ids whose diagnostics are dropped
    pub disabled_rules: Vec<String>,

    pub on_content_error: ContentErrorPolicy,

    /// Charset every file is decoded with, also announced to the check
    pub charset: String,

    /// Files larger than this many bytes are not read
    pub max_file_size: u64,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            exclude: vec!["target/**".to_string(), ".git/**".to_string()],
            disabled_rules: Vec::new(),
            on_content_error: ContentErrorPolicy::Report,
            charset: "UTF-8".to_string(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

impl LintConfig {
    /// Load config from file
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = safe_read_file(path.as_ref(), DEFAULT_MAX_FILE_SIZE, Charset::Utf8)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load config or use default, returning any parse warning
    ///
    /// If a config path is provided but the file cannot be loaded or parsed,
    /// the default config is returned together with a warning describing the
    /// error, so a typo never silently falls back to defaults.
    pub fn load_or_default(path: Option<&PathBuf>) -> (Self, Option<String>) {
        match path {
            Some(p) => match Self::load(p) {
                Ok(config) => (config, None),
                Err(e) => {
                    let warning = format!(
                        "Failed to load config '{}': {}. Using defaults.",
                        p.display(),
                        e
                    );
                    (Self::default(), Some(warning))
                }
            },
            None => (Self::default(), None),
        }
    }

    /// Returns true unless `rule` is listed in `disabled_rules`.
    pub fn is_rule_enabled(&self, rule: &str) -> bool {
        !self.disabled_rules.iter().any(|r| r == rule)
    }

    /// Resolve `charset`, failing for names no decoder exists for.
    pub fn resolved_charset(&self) -> LintResult<Charset> {
        Charset::from_name(&self.charset)
    }

    /// Compile `exclude` into glob patterns.
    ///
    /// Backslashes are normalized to `/`. A trailing `/` excludes
    /// everything below that directory.
    pub fn compiled_excludes(&self) -> LintResult<Vec<glob::Pattern>> {
        self.exclude
            .iter()
            .map(|pattern| {
                let normalized = pattern.replace('\\', "/");
                let glob_str = match normalized.strip_suffix('/') {
                    Some(prefix) => format!("{}/**", prefix),
                    None => normalized,
                };
                glob::Pattern::new(&glob_str).map_err(|e| LintError::InvalidExcludePattern {
                    pattern: pattern.clone(),
                    message: e.to_string(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = LintConfig::default();
        assert_eq!(config.charset, "UTF-8");
        assert_eq!(config.on_content_error, ContentErrorPolicy::Report);
        assert_eq!(config.max_file_size, DEFAULT_MAX_FILE_SIZE);
        assert!(config.is_rule_enabled("INF-001"));
    }

    #[test]
    fn test_parse_full_config() {
        let toml_str = r#"
exclude = ["build/**"]
disabled_rules = ["INF-002"]
on_content_error = "abort"
charset = "ISO-8859-1"
max_file_size = 1024
"#;
        let config: LintConfig = toml::from_str(toml_str).unwrap();

        assert_eq!(config.exclude, vec!["build/**".to_string()]);
        assert!(!config.is_rule_enabled("INF-002"));
        assert!(config.is_rule_enabled("INF-001"));
        assert_eq!(config.on_content_error, ContentErrorPolicy::Abort);
        assert_eq!(config.charset, "ISO-8859-1");
        assert_eq!(config.resolved_charset().unwrap(), Charset::Latin1);
        assert_eq!(config.max_file_size, 1024);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: LintConfig = toml::from_str("charset = \"UTF-16\"").unwrap();

        assert_eq!(config.charset, "UTF-16");
        assert_eq!(config.exclude, LintConfig::default().exclude);
        assert_eq!(config.on_content_error, ContentErrorPolicy::Report);
        assert!(matches!(
            config.resolved_charset(),
            Err(LintError::UnsupportedCharset(_))
        ));
    }

    #[test]
    fn test_unknown_policy_rejected() {
        let result: Result<LintConfig, _> = toml::from_str("on_content_error = \"ignore\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"exclude = [\"legacy/**\"]\n").unwrap();
        file.flush().unwrap();

        let config = LintConfig::load(file.path()).unwrap();
        assert_eq!(config.exclude, vec!["legacy/**".to_string()]);
    }

    #[test]
    fn test_load_or_default_warns_on_bad_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"exclude = 42\n").unwrap();
        file.flush().unwrap();

        let path = file.path().to_path_buf();
        let (config, warning) = LintConfig::load_or_default(Some(&path));

        assert_eq!(config.charset, "UTF-8");
        let warning = warning.expect("bad config should produce a warning");
        assert!(warning.contains("Using defaults"));
    }

    #[test]
    fn test_load_or_default_without_path() {
        let (config, warning) = LintConfig::load_or_default(None);
        assert!(warning.is_none());
        assert_eq!(config.max_file_size, DEFAULT_MAX_FILE_SIZE);
    }

    #[test]
    fn test_compiled_excludes_directory_suffix() {
        let mut config = LintConfig::default();
        config.exclude = vec!["vendor/".to_string(), "a\\b.xml".to_string()];

        let patterns = config.compiled_excludes().unwrap();
        assert!(patterns[0].matches("vendor/ESH-INF/thing/a.xml"));
        assert!(patterns[1].matches("a/b.xml"));
    }

    #[test]
    fn test_compiled_excludes_invalid_pattern() {
        let mut config = LintConfig::default();
        config.exclude = vec!["[".to_string()];

        let err = config.compiled_excludes().unwrap_err();
        assert!(matches!(err, LintError::InvalidExcludePattern { .. }));
    }
}
