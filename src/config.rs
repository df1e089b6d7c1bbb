// src/config.rs
//! Configuration file for openv0

#![deny(missing_docs)]

use crate::error::BootstrapResult;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use std::{fs, path::Path};

/// Name of the optional settings file looked up in the working directory.
pub const CONFIG_FILE: &str = ".openv0.toml";

/// Tool settings. Every field has a default, so the file is optional and may
/// be partial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Git URL of the project template repository.
    pub repository: String,
    /// Branch cloned from `repository`.
    pub branch: String,
    /// Directory (relative to the working directory) the project is cloned into.
    pub project_dir: String,
    /// Package manager used for installs.
    pub package_manager: String,
    /// Interpreter running the project's `db` script.
    pub server_runtime: String,
    /// 7-Zip compatible extractor.
    pub archiver: String,
    /// Timeout per package install in seconds, 0 disables it.
    pub install_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            repository: "https://github.com/raidendotai/openv0.git".into(),
            branch: "dev".into(),
            project_dir: "openv0".into(),
            package_manager: "npm".into(),
            server_runtime: "node".into(),
            archiver: "7z".into(),
            install_timeout_secs: 900,
        }
    }
}

impl Config {
    /// Load `.openv0.toml` from `dir`. If missing, return defaults.
    pub fn load_or_default(dir: &Path) -> BootstrapResult<Self> {
        let file = dir.join(CONFIG_FILE);
        if !file.exists() {
            return Ok(Config::default());
        }
        let s = fs::read_to_string(&file)
            .with_context(|| format!("reading {}", file.display()))?;
        let cfg: Config =
            toml::from_str(&s).with_context(|| format!("parsing {}", file.display()))?;
        log::debug!("loaded settings from {}", file.display());
        Ok(cfg)
    }

    /// Install timeout, `None` when disabled.
    pub fn install_timeout(&self) -> Option<Duration> {
        (self.install_timeout_secs > 0).then(|| Duration::from_secs(self.install_timeout_secs))
    }
}
