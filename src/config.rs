//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application
//! configuration in TOML format with platform-specific directory
//! resolution.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Theme display mode preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ThemeMode {
    /// Automatically detect OS theme (dark/light)
    #[default]
    Auto,
    /// Always use dark theme
    Dark,
    /// Always use light theme
    Light,
}

/// Path configuration for file system locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PathConfig {
    /// Assets directory; the fixed prefix for background images declared
    /// by descriptors.
    pub assets_dir: Option<PathBuf>,
}

/// User interface configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct UiConfig {
    /// Theme mode preference.
    pub theme_mode: ThemeMode,
}

/// Event relay configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Address the relay API binds to.
    pub listen_addr: String,
    /// UDP backend target for routed events, when one is configured.
    pub udp_target: Option<String>,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:7492".to_string(),
            udp_target: None,
        }
    }
}

/// Complete application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Path configuration.
    #[serde(default)]
    pub paths: PathConfig,
    /// UI configuration.
    #[serde(default)]
    pub ui: UiConfig,
    /// Relay configuration.
    #[serde(default)]
    pub relay: RelayConfig,
}

impl Config {
    /// Gets the platform-specific configuration directory.
    ///
    /// - Linux: `~/.config/Deckbench/`
    /// - macOS: `~/Library/Application Support/Deckbench/`
    /// - Windows: `%APPDATA%\Deckbench\`
    pub fn config_dir() -> Result<PathBuf> {
        let base = dirs::config_dir().context("Could not determine config directory")?;
        Ok(base.join("Deckbench"))
    }

    /// Path of the configuration file.
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Checks whether a configuration file exists.
    #[must_use]
    pub fn exists() -> bool {
        Self::config_path().map(|p| p.exists()).unwrap_or(false)
    }

    /// Loads the configuration from disk.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        toml::from_str(&raw).context("Failed to parse config file")
    }

    /// Saves the configuration to disk, creating the directory if needed.
    pub fn save(&self) -> Result<()> {
        let dir = Self::config_dir()?;
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create config directory {}", dir.display()))?;
        let raw = toml::to_string_pretty(self).context("Failed to serialize config")?;
        let path = Self::config_path()?;
        fs::write(&path, raw).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    /// Resolves the assets directory: the configured one, or `resources/`
    /// next to the current working directory.
    #[must_use]
    pub fn assets_dir(&self) -> PathBuf {
        self.paths
            .assets_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("resources"))
    }
}
