use crate::util::xdg;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_ALIAS_FILE: &str = "~/.config/shell/aliases.sh";

/// User configuration, read once at startup and passed down by reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Target of the alias export. `~` and `$VARS` are expanded.
    pub alias_file: String,
    pub asdf: AsdfConfig,
    pub mise: MiseConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AsdfConfig {
    /// Tools left out of the upgrade workflow.
    pub unhandled: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MiseConfig {
    pub unhandled: Vec<String>,
    /// Tools built against Homebrew's openssl.
    pub openssl_tools: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            alias_file: DEFAULT_ALIAS_FILE.to_string(),
            asdf: AsdfConfig::default(),
            mise: MiseConfig::default(),
        }
    }
}

impl Default for AsdfConfig {
    fn default() -> Self {
        // Java versions are vendor-prefixed, so "latest" is meaningless.
        Self {
            unhandled: vec!["java".to_string()],
        }
    }
}

impl Default for MiseConfig {
    fn default() -> Self {
        Self {
            unhandled: Vec::new(),
            openssl_tools: vec!["ruby".to_string()],
        }
    }
}

impl Config {
    /// Load from the default location (`$XDG_CONFIG_HOME/devup/config.toml`).
    pub fn load_default() -> Result<Self> {
        Self::load(&xdg::config_dir()?.join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;

        if contents.trim().is_empty() {
            return Ok(Self::default());
        }

        toml::from_str(&contents).with_context(|| format!("Failed to parse config file {:?}", path))
    }

    /// Expanded alias export path.
    pub fn alias_path(&self) -> Result<PathBuf> {
        let expanded = shellexpand::full(&self.alias_file)
            .with_context(|| format!("Failed to expand alias_file {:?}", self.alias_file))?;
        Ok(PathBuf::from(expanded.as_ref()))
    }
}
