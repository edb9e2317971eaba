//! TOML-based application preferences.
//!
//! Stores the cosmetic, non-ledger side of the app:
//! - Theme identifier
//! - Per-sound ambient volume levels
//! - Notification preference
//!
//! Preferences are stored at `~/.config/focusloop/config.toml`, separate
//! from the session state database.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use super::data_dir;
use crate::error::ConfigError;

/// Notification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

/// Ambient sound configuration. Volumes are keyed by sound name and
/// clamped to [0.0, 1.0].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SoundsConfig {
    #[serde(default)]
    pub volumes: HashMap<String, f32>,
}

/// Application preferences.
///
/// Serialized to/from TOML at `~/.config/focusloop/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default)]
    pub notifications: NotificationsConfig,
    #[serde(default)]
    pub sounds: SoundsConfig,
}

fn default_theme() -> String {
    "light".into()
}
fn default_true() -> bool {
    true
}

/// Volume used for a sound that has never been adjusted.
const DEFAULT_VOLUME: f32 = 0.5;

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            notifications: NotificationsConfig::default(),
            sounds: SoundsConfig::default(),
        }
    }
}

impl Config {
    fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("~/.config/focusloop"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from disk or write and return the default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                toml::from_str(&content).map_err(|e| ConfigError::ParseFailed(e.to_string()))
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Load from disk, returning default on error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
    }

    /// Volume for `sound`, defaulting to 0.5 when never set.
    pub fn volume(&self, sound: &str) -> f32 {
        self.sounds
            .volumes
            .get(sound)
            .copied()
            .unwrap_or(DEFAULT_VOLUME)
    }

    /// Set the volume for `sound`, clamped to [0.0, 1.0].
    pub fn set_volume(&mut self, sound: &str, volume: f32) {
        let clamped = if volume.is_finite() {
            volume.clamp(0.0, 1.0)
        } else {
            DEFAULT_VOLUME
        };
        self.sounds.volumes.insert(sound.to_string(), clamped);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.theme, "light");
        assert!(parsed.notifications.enabled);
    }

    #[test]
    fn unset_volume_defaults_to_half() {
        let cfg = Config::default();
        assert_eq!(cfg.volume("rain"), 0.5);
    }

    #[test]
    fn volume_is_clamped() {
        let mut cfg = Config::default();
        cfg.set_volume("rain", 1.7);
        assert_eq!(cfg.volume("rain"), 1.0);
        cfg.set_volume("rain", -0.2);
        assert_eq!(cfg.volume("rain"), 0.0);
        cfg.set_volume("rain", f32::NAN);
        assert_eq!(cfg.volume("rain"), 0.5);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let cfg: Config = toml::from_str("theme = \"forest\"").unwrap();
        assert_eq!(cfg.theme, "forest");
        assert!(cfg.notifications.enabled);
        assert!(cfg.sounds.volumes.is_empty());
    }
}
