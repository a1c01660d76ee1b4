//! Layered configuration
//!
//! Config is loaded with three layers of precedence (highest wins):
//! 1. Environment variables: `RIDKIT_RID`, `RIDKIT_FORMAT`
//! 2. Project-local: `.ridkit/config.toml`
//! 3. Global: `~/.ridkit/config.toml`
//!
//! Command-line flags override all of them.

use ridkit_core::{Result, RidkitError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// How command output is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Toml,
}

impl FromStr for OutputFormat {
    type Err = RidkitError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "toml" => Ok(OutputFormat::Toml),
            other => Err(RidkitError::ConfigError(format!(
                "unknown output format '{}' (expected text, json or toml)",
                other
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
            OutputFormat::Toml => "toml",
        })
    }
}

/// `[resolve]` table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResolveSection {
    #[serde(default)]
    pub default_rid: Option<String>,
    #[serde(default)]
    pub format: Option<String>,
}

/// `[logging]` table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingSection {
    #[serde(default)]
    pub filter: Option<String>,
}

/// Top-level config file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RidkitConfigFile {
    #[serde(default)]
    pub resolve: ResolveSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

/// Resolved configuration with every layer applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RidkitConfig {
    pub default_rid: Option<String>,
    pub format: OutputFormat,
    pub log_filter: String,
}

impl Default for RidkitConfig {
    fn default() -> Self {
        Self {
            default_rid: None,
            format: OutputFormat::Text,
            log_filter: "warn".to_string(),
        }
    }
}

impl RidkitConfig {
    /// Load config with layered precedence: global < project < env vars
    pub fn load() -> Result<Self> {
        let mut config = RidkitConfigFile::default();

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                let global = Self::load_file(&global_path)?;
                Self::merge_into(&mut config, global);
            }
        }

        let local_path = PathBuf::from(".ridkit/config.toml");
        if local_path.exists() {
            let local = Self::load_file(&local_path)?;
            Self::merge_into(&mut config, local);
        }

        Self::apply_env_overrides(&mut config, |key| std::env::var(key).ok());
        tracing::debug!(?config, "loaded configuration");
        Self::finish(config)
    }

    /// Load config from a specific file path only, with the given
    /// environment lookup applied on top
    pub fn load_from_file<F>(path: &Path, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::load_file(path)?;
        Self::apply_env_overrides(&mut config, env);
        Self::finish(config)
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".ridkit").join("config.toml"))
    }

    fn load_file(path: &Path) -> Result<RidkitConfigFile> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| {
            RidkitError::ConfigError(format!("Failed to parse config {}: {}", path.display(), e))
        })
    }

    fn merge_into(base: &mut RidkitConfigFile, overlay: RidkitConfigFile) {
        if overlay.resolve.default_rid.is_some() {
            base.resolve.default_rid = overlay.resolve.default_rid;
        }
        if overlay.resolve.format.is_some() {
            base.resolve.format = overlay.resolve.format;
        }
        if overlay.logging.filter.is_some() {
            base.logging.filter = overlay.logging.filter;
        }
    }

    fn apply_env_overrides<F>(config: &mut RidkitConfigFile, env: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(rid) = env("RIDKIT_RID") {
            config.resolve.default_rid = Some(rid);
        }
        if let Some(format) = env("RIDKIT_FORMAT") {
            config.resolve.format = Some(format);
        }
    }

    fn finish(file: RidkitConfigFile) -> Result<Self> {
        let defaults = Self::default();
        let format = match file.resolve.format {
            Some(f) => f.parse()?,
            None => defaults.format,
        };
        Ok(Self {
            default_rid: file.resolve.default_rid,
            format,
            log_filter: file.logging.filter.unwrap_or(defaults.log_filter),
        })
    }
}
