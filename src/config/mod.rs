mod links;

pub use links::{LinkKind, LinkTemplates};

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

/// Git's own binary heuristic looks at the first 8000 bytes.
pub const DEFAULT_SNIFF_LEN: usize = 8000;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub default_ref: String,
    pub date_format: DateFormat,
    pub binary_sniff_len: usize,
    pub links: LinkTemplates,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateFormat {
    Relative,
    Iso,
    Local,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_ref: "HEAD".to_string(),
            date_format: DateFormat::Iso,
            binary_sniff_len: DEFAULT_SNIFF_LEN,
            links: LinkTemplates::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn config_path() -> PathBuf {
        #[cfg(windows)]
        {
            let appdata = std::env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("blobview").join("config.toml")
        }

        #[cfg(not(windows))]
        {
            if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
                if !xdg.is_empty() {
                    return PathBuf::from(xdg).join("blobview").join("config.toml");
                }
            }
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config").join("blobview").join("config.toml")
        }
    }

    pub fn parse(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;

        if config.binary_sniff_len == 0 {
            tracing::warn!(
                "binary_sniff_len = 0 disables binary detection, using {}",
                DEFAULT_SNIFF_LEN
            );
            config.binary_sniff_len = DEFAULT_SNIFF_LEN;
        }
        if config.default_ref.trim().is_empty() {
            tracing::warn!("empty default_ref, falling back to HEAD");
            config.default_ref = "HEAD".to_string();
        }

        Ok(config)
    }
}
