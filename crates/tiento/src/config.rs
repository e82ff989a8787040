//! Session configuration.
//!
//! Groups the defaults a test session applies to every selector and caret
//! owner it creates. Loadable from JSON or YAML so suites can share one file.
//!
//! ```
//! use tiento::{StringComparePolicy, TientoConfig};
//!
//! let config = TientoConfig::from_yaml("policy: exact\nstrict: true\n").unwrap();
//! assert_eq!(config.policy, StringComparePolicy::Exact);
//! assert!(config.strict);
//! assert_eq!(config.drive.max_steps, tiento::DEFAULT_MAX_STEPS);
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::policy::StringComparePolicy;
use crate::result::TientoResult;
use crate::wait::{DriveOptions, WaitOptions};

/// Defaults for lookups, menu traversal and caret driving
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TientoConfig {
    /// Policy for literal text tokens
    pub policy: StringComparePolicy,
    /// Fail when more than one sibling matches
    pub strict: bool,
    /// Bounds for caret driving
    pub drive: DriveOptions,
    /// Bounds for lookup waits
    pub wait: WaitOptions,
}

impl TientoConfig {
    /// Create a config with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the text policy
    #[must_use]
    pub const fn with_policy(mut self, policy: StringComparePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set strict matching
    #[must_use]
    pub const fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Set caret drive bounds
    #[must_use]
    pub const fn with_drive(mut self, drive: DriveOptions) -> Self {
        self.drive = drive;
        self
    }

    /// Set lookup wait bounds
    #[must_use]
    pub const fn with_wait(mut self, wait: WaitOptions) -> Self {
        self.wait = wait;
        self
    }

    /// Parse from JSON
    pub fn from_json(json: &str) -> TientoResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> TientoResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse from YAML
    pub fn from_yaml(yaml: &str) -> TientoResult<Self> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// Load from a file; `.yaml`/`.yml` are read as YAML, anything else as JSON
    pub fn from_file(path: &Path) -> TientoResult<Self> {
        let content = fs::read_to_string(path)?;
        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));
        if is_yaml {
            Self::from_yaml(&content)
        } else {
            Self::from_json(&content)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::TientoError;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = TientoConfig::default();
        assert_eq!(config.policy, StringComparePolicy::Substring);
        assert!(!config.strict);
        assert_eq!(config.drive, DriveOptions::default());
        assert_eq!(config.wait, WaitOptions::default());
    }

    #[test]
    fn test_builders() {
        let config = TientoConfig::new()
            .with_policy(StringComparePolicy::Glob)
            .with_strict(true)
            .with_drive(DriveOptions::new().with_max_steps(5))
            .with_wait(WaitOptions::new().with_timeout(100));
        assert_eq!(config.policy, StringComparePolicy::Glob);
        assert!(config.strict);
        assert_eq!(config.drive.max_steps, 5);
        assert_eq!(config.wait.timeout_ms, 100);
    }

    #[test]
    fn test_json_partial_document() {
        let config = TientoConfig::from_json(r#"{"drive": {"max_steps": 12, "timeout_ms": 50, "step_delay_ms": 0}}"#)
            .unwrap();
        assert_eq!(config.drive.max_steps, 12);
        assert_eq!(config.policy, StringComparePolicy::Substring);
    }

    #[test]
    fn test_json_round_trip() {
        let config = TientoConfig::new().with_policy(StringComparePolicy::Regex);
        let back = TientoConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_bad_policy_name() {
        let err = TientoConfig::from_json(r#"{"policy": "fuzzy"}"#).unwrap_err();
        assert!(matches!(err, TientoError::Json(_)));
        let err = TientoConfig::from_yaml("policy: fuzzy").unwrap_err();
        assert!(matches!(err, TientoError::Yaml(_)));
    }

    #[test]
    fn test_from_file_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let yaml_path = dir.path().join("tiento.yml");
        let mut yaml = std::fs::File::create(&yaml_path).unwrap();
        writeln!(yaml, "policy: prefix").unwrap();
        assert_eq!(
            TientoConfig::from_file(&yaml_path).unwrap().policy,
            StringComparePolicy::Prefix
        );

        let json_path = dir.path().join("tiento.json");
        std::fs::write(&json_path, r#"{"strict": true}"#).unwrap();
        assert!(TientoConfig::from_file(&json_path).unwrap().strict);
    }

    #[test]
    fn test_missing_file() {
        let err = TientoConfig::from_file(Path::new("/nonexistent/tiento.json")).unwrap_err();
        assert!(matches!(err, TientoError::Io(_)));
    }
}
