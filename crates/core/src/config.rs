//! Workspace configuration
//!
//! An optional `.shipit.yml` at the workspace root can override the built-in
//! defaults for the task. Resolution order is: built-in defaults, then the
//! config file, then explicit `NAME=value` overrides from the caller.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::params::{SubmitParams, DEFAULT_BRANCH, DEFAULT_MESSAGE};
use crate::types::ShipitResult;

/// File name looked up in the workspace root.
pub const CONFIG_FILE_NAME: &str = ".shipit.yml";

/// Default remote the push step targets.
pub const DEFAULT_REMOTE: &str = "origin";

/// Default check command line, run through the shell.
pub const DEFAULT_CHECK_COMMAND: &str = "cargo check";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ShipitFileConfig {
    pub message: Option<String>,
    pub branch: Option<String>,
    pub remote: Option<String>,
    pub check: Option<String>,
}

/// Fully resolved workspace configuration.
#[derive(Debug, Clone)]
pub struct ShipitConfig {
    pub message: String,
    pub branch: String,
    pub remote: String,
    pub check: String,
}

impl Default for ShipitConfig {
    fn default() -> Self {
        Self {
            message: DEFAULT_MESSAGE.to_string(),
            branch: DEFAULT_BRANCH.to_string(),
            remote: DEFAULT_REMOTE.to_string(),
            check: DEFAULT_CHECK_COMMAND.to_string(),
        }
    }
}

impl ShipitConfig {
    /// Parameter set seeded from this configuration, before any caller
    /// overrides are applied.
    pub fn params(&self) -> SubmitParams {
        SubmitParams {
            message: self.message.clone(),
            branch: self.branch.clone(),
        }
    }
}

pub fn parse_config(yaml_str: &str) -> ShipitResult<ShipitFileConfig> {
    let config: ShipitFileConfig = serde_yaml::from_str(yaml_str)?;
    Ok(config)
}

/// Load `.shipit.yml` from the workspace root if present.
///
/// A missing file yields the built-in defaults; a malformed file is an error.
pub fn load_config(workspace_root: &Path) -> ShipitResult<ShipitConfig> {
    let path = workspace_root.join(CONFIG_FILE_NAME);
    if !path.exists() {
        return Ok(ShipitConfig::default());
    }

    let contents = std::fs::read_to_string(&path)?;
    let file = parse_config(&contents)?;

    let defaults = ShipitConfig::default();
    Ok(ShipitConfig {
        message: file.message.unwrap_or(defaults.message),
        branch: file.branch.unwrap_or(defaults.branch),
        remote: file.remote.unwrap_or(defaults.remote),
        check: file.check.unwrap_or(defaults.check),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
message: "WIP: new parser"
branch: develop
remote: upstream
check: cargo clippy
"#;
        let config = parse_config(yaml).unwrap();
        assert_eq!(config.message.as_deref(), Some("WIP: new parser"));
        assert_eq!(config.branch.as_deref(), Some("develop"));
        assert_eq!(config.remote.as_deref(), Some("upstream"));
        assert_eq!(config.check.as_deref(), Some("cargo clippy"));
    }

    #[test]
    fn test_parse_rejects_unknown_fields() {
        assert!(parse_config("branches: [main]").is_err());
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(dir.path()).unwrap();
        assert_eq!(config.message, DEFAULT_MESSAGE);
        assert_eq!(config.branch, DEFAULT_BRANCH);
        assert_eq!(config.remote, DEFAULT_REMOTE);
        assert_eq!(config.check, DEFAULT_CHECK_COMMAND);
    }

    #[test]
    fn test_file_overrides_merge_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "branch: main\n").unwrap();
        let config = load_config(dir.path()).unwrap();
        assert_eq!(config.branch, "main");
        assert_eq!(config.message, DEFAULT_MESSAGE);
        assert_eq!(config.remote, DEFAULT_REMOTE);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), ": not yaml :\n-").unwrap();
        assert!(load_config(dir.path()).is_err());
    }
}
