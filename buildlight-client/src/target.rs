//! Target configuration
//!
//! Targets are pre-existing local state: a YAML file mapping target names
//! to API URL, team, and the stored token. Buildlight only ever reads the
//! file; logging in and writing it belongs to other tooling.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{ClientError, Result};

/// Environment variable overriding the default targets file location.
pub const TARGETS_FILE_ENV: &str = "BUILDLIGHT_TARGETS";

/// On-disk shape of the targets file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct TargetsFile {
    #[serde(default)]
    targets: HashMap<String, TargetProps>,
}

/// Stored properties of one target.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TargetProps {
    api: String,
    #[serde(default = "default_team")]
    team: String,
    #[serde(default)]
    token: Option<TargetToken>,
}

fn default_team() -> String {
    "main".to_string()
}

/// A stored API token with its authorization scheme.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetToken {
    #[serde(rename = "type")]
    pub token_type: String,
    pub value: String,
}

/// A resolved target: one named CI server session configuration.
#[derive(Debug, Clone)]
pub struct Target {
    pub name: String,
    pub api: String,
    pub team: String,
    pub token: Option<TargetToken>,
}

impl Target {
    /// Load a named target from the default targets file.
    pub fn load(name: &str) -> Result<Self> {
        Self::load_from(&targets_path(), name)
    }

    /// Load a named target from a specific targets file.
    pub fn load_from(path: &Path, name: &str) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| ClientError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let mut file: TargetsFile = serde_yaml::from_str(&raw)?;
        let props = file
            .targets
            .remove(name)
            .ok_or_else(|| ClientError::UnknownTarget(name.to_string()))?;

        Ok(Self {
            name: name.to_string(),
            api: props.api.trim_end_matches('/').to_string(),
            team: props.team,
            token: props.token,
        })
    }

    /// Check the stored properties are usable for API calls.
    pub fn validate(&self) -> Result<()> {
        if self.api.is_empty() {
            return Err(ClientError::InvalidTarget("api url is empty".to_string()));
        }

        if !self.api.starts_with("http://") && !self.api.starts_with("https://") {
            return Err(ClientError::InvalidTarget(format!(
                "api url must start with http:// or https://: {}",
                self.api
            )));
        }

        Ok(())
    }
}

/// Location of the targets file.
///
/// `BUILDLIGHT_TARGETS` overrides; otherwise
/// `<config-dir>/buildlight/targets.yml`.
pub fn targets_path() -> PathBuf {
    if let Ok(path) = std::env::var(TARGETS_FILE_ENV) {
        return PathBuf::from(path);
    }

    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("buildlight")
        .join("targets.yml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn targets_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_named_target() {
        let file = targets_file(
            r#"
targets:
  ci:
    api: https://ci.example.com/
    team: infra
    token:
      type: bearer
      value: abc123
"#,
        );

        let target = Target::load_from(file.path(), "ci").unwrap();
        assert_eq!(target.api, "https://ci.example.com");
        assert_eq!(target.team, "infra");
        assert_eq!(target.token.as_ref().unwrap().value, "abc123");
        assert!(target.validate().is_ok());
    }

    #[test]
    fn test_team_defaults_to_main() {
        let file = targets_file("targets:\n  ci:\n    api: https://ci.example.com\n");

        let target = Target::load_from(file.path(), "ci").unwrap();
        assert_eq!(target.team, "main");
        assert!(target.token.is_none());
    }

    #[test]
    fn test_unknown_target() {
        let file = targets_file("targets:\n  ci:\n    api: https://ci.example.com\n");

        let err = Target::load_from(file.path(), "staging").unwrap_err();
        assert!(matches!(err, ClientError::UnknownTarget(name) if name == "staging"));
    }

    #[test]
    fn test_malformed_targets_file() {
        let file = targets_file("targets: [not, a, map]");

        assert!(matches!(
            Target::load_from(file.path(), "ci").unwrap_err(),
            ClientError::ConfigParse(_)
        ));
    }

    #[test]
    fn test_validate_rejects_non_http_api() {
        let target = Target {
            name: "ci".to_string(),
            api: "ftp://ci.example.com".to_string(),
            team: "main".to_string(),
            token: None,
        };

        assert!(matches!(
            target.validate().unwrap_err(),
            ClientError::InvalidTarget(_)
        ));
    }
}
