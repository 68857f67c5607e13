// src/config.rs

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::{collections::HashMap, env, fs, path::Path};
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://api.e-stat.go.jp";
pub const DEFAULT_VERSION: &str = "3.0";

/// Connection settings shared by every reader.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Application id issued by e-Stat, sent as `appId`.
    pub app_id: String,
    pub base_url: String,
    pub version: String,
    /// `J` or `E`; left to the API default when unset.
    pub lang: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_id: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            version: DEFAULT_VERSION.to_string(),
            lang: None,
        }
    }
}

impl Config {
    /// Read a YAML config file. Missing fields fall back to defaults.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        serde_yaml::from_str(&raw)
            .with_context(|| format!("parsing config file {}", path.display()))
    }

    /// Overlay `ESTAT_*` variables from `vars` onto `self`.
    pub fn with_env_vars(mut self, vars: &HashMap<String, String>) -> Self {
        if let Some(v) = vars.get("ESTAT_APPID") {
            self.app_id = v.clone();
        }
        if let Some(v) = vars.get("ESTAT_BASE_URL") {
            self.base_url = v.clone();
        }
        if let Some(v) = vars.get("ESTAT_VERSION") {
            self.version = v.clone();
        }
        if let Some(v) = vars.get("ESTAT_LANG") {
            self.lang = Some(v.clone());
        }
        self
    }

    /// Defaults, then the file named by `ESTAT_CONFIG` if set, then `ESTAT_*` variables.
    pub fn load() -> Result<Self> {
        let vars: HashMap<String, String> = env::vars().collect();
        let base = match vars.get("ESTAT_CONFIG") {
            Some(path) => {
                debug!(path = %path, "loading config file");
                Self::from_yaml_file(path)?
            }
            None => Self::default(),
        };
        let cfg = base.with_env_vars(&vars);
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.app_id.trim().is_empty() {
            bail!("e-Stat application id is not set (ESTAT_APPID or app_id in ESTAT_CONFIG)");
        }
        if self.version.trim().is_empty() {
            bail!("API version must not be empty");
        }
        Ok(())
    }
}
