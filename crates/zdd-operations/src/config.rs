//! Configuration file support.
//!
//! File: `zdd.toml`
//! Format:
//! ```toml
//! [control-plane]
//! command = "cf"
//! args = []
//!
//! [rollback]
//! failure-message = "..."
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::Result;
use crate::error::OperationError;

pub const CONFIG_FILENAME: &str = "zdd.toml";
pub const DEFAULT_COMMAND: &str = "cf";
pub const DEFAULT_ROLLBACK_FAILURE_MESSAGE: &str = "Oh no. Something's gone wrong. I've tried to roll back but you should check to see if everything is OK.";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ControlPlaneConfig {
    #[serde(default = "default_command")]
    command: String,
    #[serde(default)]
    args: Vec<String>,
}

impl Default for ControlPlaneConfig {
    fn default() -> Self {
        Self {
            command: default_command(),
            args: Vec::new(),
        }
    }
}

impl ControlPlaneConfig {
    #[must_use]
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Leading arguments passed to every control-plane invocation.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct RollbackConfig {
    #[serde(default = "default_rollback_failure_message")]
    failure_message: String,
}

impl Default for RollbackConfig {
    fn default() -> Self {
        Self {
            failure_message: default_rollback_failure_message(),
        }
    }
}

impl RollbackConfig {
    #[must_use]
    pub fn failure_message(&self) -> &str {
        &self.failure_message
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ZddConfig {
    #[serde(default)]
    control_plane: ControlPlaneConfig,
    #[serde(default)]
    rollback: RollbackConfig,
}

impl ZddConfig {
    #[must_use]
    pub fn control_plane(&self) -> &ControlPlaneConfig {
        &self.control_plane
    }

    #[must_use]
    pub fn rollback(&self) -> &RollbackConfig {
        &self.rollback
    }

    /// Replace the control-plane command, keeping its leading arguments.
    #[must_use]
    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.control_plane.command = command.into();
        self
    }

    /// Load configuration from an explicit path, which must exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable, or invalid.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(OperationError::ConfigNotFound(path.to_path_buf()));
        }
        read_config(path)
    }

    /// Load `zdd.toml` from `dir` if present, otherwise use defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but is unreadable or invalid.
    pub fn discover(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILENAME);
        if !path.exists() {
            return Ok(Self::default());
        }
        read_config(&path)
    }
}

fn read_config(path: &Path) -> Result<ZddConfig> {
    let content = fs::read_to_string(path).map_err(|source| OperationError::ConfigRead {
        path: PathBuf::from(path),
        source,
    })?;

    toml::from_str(&content).map_err(|source| OperationError::ConfigParse {
        path: PathBuf::from(path),
        source,
    })
}

fn default_command() -> String {
    DEFAULT_COMMAND.to_string()
}

fn default_rollback_failure_message() -> String {
    DEFAULT_ROLLBACK_FAILURE_MESSAGE.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_cf_and_standard_message() {
        let config = ZddConfig::default();

        assert_eq!(config.control_plane().command(), "cf");
        assert!(config.control_plane().args().is_empty());
        assert_eq!(
            config.rollback().failure_message(),
            DEFAULT_ROLLBACK_FAILURE_MESSAGE
        );
    }

    #[test]
    fn empty_document_parses_to_defaults() -> anyhow::Result<()> {
        let config: ZddConfig = toml::from_str("")?;

        assert_eq!(config, ZddConfig::default());
        Ok(())
    }

    #[test]
    fn partial_document_keeps_other_defaults() -> anyhow::Result<()> {
        let config: ZddConfig = toml::from_str(
            r#"
[control-plane]
command = "/usr/local/bin/cf8"
args = ["--quiet"]
"#,
        )?;

        assert_eq!(config.control_plane().command(), "/usr/local/bin/cf8");
        assert_eq!(config.control_plane().args(), ["--quiet"]);
        assert_eq!(
            config.rollback().failure_message(),
            DEFAULT_ROLLBACK_FAILURE_MESSAGE
        );
        Ok(())
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result: std::result::Result<ZddConfig, _> =
            toml::from_str("[control-plane]\nbinary = \"cf\"\n");

        assert!(result.is_err());
    }

    #[test]
    fn with_command_overrides_only_the_command() -> anyhow::Result<()> {
        let config: ZddConfig = toml::from_str("[control-plane]\nargs = [\"-v\"]\n")?;

        let config = config.with_command("./fake-cf");

        assert_eq!(config.control_plane().command(), "./fake-cf");
        assert_eq!(config.control_plane().args(), ["-v"]);
        Ok(())
    }

    #[test]
    fn discover_without_file_returns_defaults() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;

        let config = ZddConfig::discover(dir.path())?;

        assert_eq!(config, ZddConfig::default());
        Ok(())
    }

    #[test]
    fn discover_reads_config_file() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        fs::write(
            dir.path().join(CONFIG_FILENAME),
            "[rollback]\nfailure-message = \"call the on-call\"\n",
        )?;

        let config = ZddConfig::discover(dir.path())?;

        assert_eq!(config.rollback().failure_message(), "call the on-call");
        Ok(())
    }

    #[test]
    fn load_missing_file_is_an_error() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("missing.toml");

        let err = ZddConfig::load(&path).expect_err("file does not exist");

        assert!(matches!(err, OperationError::ConfigNotFound(p) if p == path));
        Ok(())
    }

    #[test]
    fn load_invalid_toml_reports_parse_error() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("broken.toml");
        fs::write(&path, "[control-plane\n")?;

        let err = ZddConfig::load(&path).expect_err("invalid toml");

        assert!(matches!(err, OperationError::ConfigParse { .. }));
        Ok(())
    }
}
