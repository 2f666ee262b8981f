//! Configuration file management for skillpath.
//!
//! Provides a TOML-based config file at `~/.config/skillpath/config.toml` and
//! a resolution chain: CLI flag > env var > config file > default.
//!
//! Missing API keys are not an error here. They resolve to
//! [`Credential::Unconfigured`] and the providers report it per call.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use skillpath_core::{CurationConfig, Credential, GeminiConfig, SerperConfig};

pub const GEMINI_KEY_ENV: &str = "GEMINI_API_KEY";
pub const SERPER_KEY_ENV: &str = "SERPER_API_KEY";
pub const MODEL_ENV: &str = "SKILLPATH_MODEL";

pub const DEFAULT_BIND: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8000;

// -----------------------------------------------------------------------
// Config file types
// -----------------------------------------------------------------------

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub gemini: GeminiSection,
    #[serde(default)]
    pub serper: SerperSection,
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub curation: CurationSection,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct GeminiSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SerperSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ServerSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CurationSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_concurrent_days: Option<usize>,
}

// -----------------------------------------------------------------------
// Paths
// -----------------------------------------------------------------------

/// Return the skillpath config directory.
///
/// Always uses XDG layout: `$XDG_CONFIG_HOME/skillpath` or
/// `~/.config/skillpath`, also on macOS.
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("skillpath");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("skillpath")
}

pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

// -----------------------------------------------------------------------
// Read / write
// -----------------------------------------------------------------------

/// Load and parse the config file. Returns an error if it does not exist.
pub fn load_config() -> Result<ConfigFile> {
    let path = config_path();
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;
    parse_config(&contents)
}

/// Like [`load_config`], but a missing file is `Ok(None)`.
///
/// A file that exists but does not parse is still an error.
pub fn load_config_if_present() -> Result<Option<ConfigFile>> {
    if !config_path().exists() {
        return Ok(None);
    }
    load_config().map(Some)
}

fn parse_config(contents: &str) -> Result<ConfigFile> {
    toml::from_str(contents).context("failed to parse config file")
}

/// Serialize and write the config file, creating parent dirs as needed.
/// Sets file permissions to 0600 on Unix.
pub fn save_config(config: &ConfigFile) -> Result<PathBuf> {
    let path = config_path();
    let dir = config_dir();
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create config directory {}", dir.display()))?;

    let contents = toml::to_string_pretty(config).context("failed to serialize config")?;
    std::fs::write(&path, &contents)
        .with_context(|| format!("failed to write config file at {}", path.display()))?;

    // API keys live in this file.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(&path, perms)
            .with_context(|| format!("failed to set permissions on {}", path.display()))?;
    }

    Ok(path)
}

// -----------------------------------------------------------------------
// Resolved config
// -----------------------------------------------------------------------

/// Values given on the command line; each wins over env and file.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub model: Option<String>,
    pub max_concurrent_days: Option<usize>,
    pub bind: Option<String>,
    pub port: Option<u16>,
}

/// Fully resolved configuration, ready for use.
#[derive(Debug)]
pub struct SkillpathConfig {
    pub gemini: GeminiConfig,
    pub serper: SerperConfig,
    pub curation: CurationConfig,
    pub bind: String,
    pub port: u16,
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
}

impl SkillpathConfig {
    /// Resolve configuration from the user's config file (if any), the
    /// environment and `overrides`.
    pub fn resolve(overrides: &Overrides) -> Result<Self> {
        let file = load_config_if_present()?.unwrap_or_default();
        Ok(Self::resolve_with(file, overrides))
    }

    /// Resolve using the chain: CLI flag > env var > config file > default.
    ///
    /// - Gemini key: `GEMINI_API_KEY` > `gemini.api_key` > unconfigured
    /// - Serper key: `SERPER_API_KEY` > `serper.api_key` > unconfigured
    /// - Model: `--model` > `SKILLPATH_MODEL` > `gemini.model` > `GeminiConfig::DEFAULT_MODEL`
    /// - Concurrency, bind, port: flag > file > default
    pub fn resolve_with(file: ConfigFile, overrides: &Overrides) -> Self {
        let gemini_key = Credential::from_option(env_value(GEMINI_KEY_ENV).or(file.gemini.api_key));
        let serper_key = Credential::from_option(env_value(SERPER_KEY_ENV).or(file.serper.api_key));

        let model = overrides
            .model
            .clone()
            .or_else(|| env_value(MODEL_ENV))
            .or(file.gemini.model)
            .unwrap_or_else(|| GeminiConfig::DEFAULT_MODEL.to_string());

        let max_concurrent_days = overrides
            .max_concurrent_days
            .or(file.curation.max_concurrent_days)
            .unwrap_or(CurationConfig::DEFAULT_MAX_CONCURRENT_DAYS);

        Self {
            gemini: GeminiConfig::new(gemini_key).with_model(model),
            serper: SerperConfig::new(serper_key),
            curation: CurationConfig {
                max_concurrent_days,
            },
            bind: overrides
                .bind
                .clone()
                .or(file.server.bind)
                .unwrap_or_else(|| DEFAULT_BIND.to_string()),
            port: overrides.port.or(file.server.port).unwrap_or(DEFAULT_PORT),
        }
    }
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------
