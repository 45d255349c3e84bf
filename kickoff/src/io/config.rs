//! Tool configuration from `kickoff.toml` in the application directory.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::core::version::Requirement;

/// Pipeline configuration (TOML).
///
/// This file is optional; missing fields (or a missing file) fall back to the
/// defaults the template was written against.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct KickoffConfig {
    /// Minimum framework version the template content is known to fit.
    pub rails_requirement: String,

    /// Minimum language version.
    pub ruby_requirement: String,

    pub commands: CommandConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CommandConfig {
    /// Bundler invocation prefix (e.g. `["bundle"]`).
    pub bundle: Vec<String>,

    /// Yarn invocation prefix.
    pub yarn: Vec<String>,
}

impl Default for CommandConfig {
    fn default() -> Self {
        Self {
            bundle: vec!["bundle".to_string()],
            yarn: vec!["yarn".to_string()],
        }
    }
}

impl Default for KickoffConfig {
    fn default() -> Self {
        Self {
            rails_requirement: ">= 6.0.2".to_string(),
            ruby_requirement: ">= 2.6.3".to_string(),
            commands: CommandConfig::default(),
        }
    }
}

impl KickoffConfig {
    pub fn validate(&self) -> Result<()> {
        Requirement::parse(&self.rails_requirement)
            .with_context(|| format!("rails_requirement `{}`", self.rails_requirement))?;
        Requirement::parse(&self.ruby_requirement)
            .with_context(|| format!("ruby_requirement `{}`", self.ruby_requirement))?;
        if self.commands.bundle.is_empty() || self.commands.bundle[0].trim().is_empty() {
            return Err(anyhow!("commands.bundle must be a non-empty array"));
        }
        if self.commands.yarn.is_empty() || self.commands.yarn[0].trim().is_empty() {
            return Err(anyhow!("commands.yarn must be a non-empty array"));
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `KickoffConfig::default()`.
pub fn load_config(path: &Path) -> Result<KickoffConfig> {
    if !path.exists() {
        let cfg = KickoffConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: KickoffConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_returns_default() {
        let temp = tempfile::tempdir().expect("tempdir");
        let cfg = load_config(&temp.path().join("missing.toml")).expect("load");
        assert_eq!(cfg, KickoffConfig::default());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("kickoff.toml");
        fs::write(&path, "rails_requirement = \">= 7.0\"\n").expect("write");
        let cfg = load_config(&path).expect("load");
        assert_eq!(cfg.rails_requirement, ">= 7.0");
        assert_eq!(cfg.ruby_requirement, ">= 2.6.3");
        assert_eq!(cfg.commands, CommandConfig::default());
    }

    #[test]
    fn bad_requirement_is_rejected() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("kickoff.toml");
        fs::write(&path, "ruby_requirement = \">= not.a.version\"\n").expect("write");
        assert!(load_config(&path).is_err());
    }

    #[test]
    fn empty_bundle_command_is_rejected() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("kickoff.toml");
        fs::write(&path, "[commands]\nbundle = []\n").expect("write");
        assert!(load_config(&path).is_err());
    }
}
