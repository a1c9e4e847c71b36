//! Game settings with persistence
//!
//! Settings are saved to `~/.config/hopper/settings.toml`

use std::fs;
use std::path::{Path, PathBuf};

use hopper_core::TimeConfig;
use hopper_game::MovementConfig;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// All game settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub time: TimeConfig,
    pub movement: MovementConfig,
    pub demo: DemoSettings,
}

impl GameSettings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("hopper"))
    }

    /// Get the settings file path
    fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("settings.toml"))
    }

    /// Parse settings from TOML text; missing fields take their defaults
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load settings from disk, or return defaults if not found or invalid
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            warn!("Could not determine config directory");
            return Self::default();
        };

        if !path.exists() {
            info!("No settings file found, using defaults");
            return Self::default();
        }

        let settings = match fs::read_to_string(&path) {
            Ok(content) => match Self::from_toml_str(&content) {
                Ok(settings) => {
                    info!("Loaded settings from {:?}", path);
                    settings
                }
                Err(e) => {
                    warn!("Failed to parse settings: {}, using defaults", e);
                    return Self::default();
                }
            },
            Err(e) => {
                warn!("Failed to read settings file: {}, using defaults", e);
                return Self::default();
            }
        };

        let settings = match settings.time.validate() {
            Ok(()) => settings,
            Err(e) => {
                warn!("Invalid time settings: {}, using default timing", e);
                Self {
                    time: TimeConfig::default(),
                    ..settings
                }
            }
        };

        if let Err(e) = settings.movement.validate() {
            warn!("Invalid movement settings: {}, using default movement", e);
            return Self {
                movement: MovementConfig::default(),
                ..settings
            };
        }

        settings
    }

    /// Write the settings file only if there is none yet.
    /// Returns whether a file was written.
    pub fn write_if_missing(&self) -> anyhow::Result<bool> {
        let Some(path) = Self::settings_path() else {
            anyhow::bail!("Could not determine config directory");
        };
        self.write_to_if_missing(&path)
    }

    fn write_to_if_missing(&self, path: &Path) -> anyhow::Result<bool> {
        if path.exists() {
            return Ok(false);
        }
        self.save_to(path)?;
        Ok(true)
    }

    fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(dir) = path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        info!("Saved settings to {:?}", path);
        Ok(())
    }
}

/// Scripted demo run settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoSettings {
    /// Number of physics ticks to simulate
    pub ticks: u64,
    /// Log the player state every this many ticks
    pub log_interval: u64,
    /// Write the settings file with current values if none exists
    pub write_defaults: bool,
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            ticks: 600,
            log_interval: 30,
            write_defaults: false,
        }
    }
}
