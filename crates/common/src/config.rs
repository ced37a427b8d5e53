//! Application configuration.
//!
//! Only tooling concerns live here. The tilt constants of the effect are
//! fixed and deliberately absent.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ParallaxError, ParallaxResult};

/// Global application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory where recorded motion traces are stored.
    pub traces_dir: PathBuf,

    /// Motion source settings.
    pub motion: MotionDefaults,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Default motion source parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionDefaults {
    /// Sample delivery rate (Hz).
    pub update_rate_hz: u32,

    /// Which backend feeds the card when none is requested explicitly.
    pub backend: BackendKind,
}

/// Motion backend selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// Generated oscillating tilt.
    #[default]
    Synthetic,
    /// Playback of a recorded trace file.
    Replay,
    /// No device motion at all.
    None,
}

impl std::str::FromStr for BackendKind {
    type Err = ParallaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "synthetic" => Ok(Self::Synthetic),
            "replay" => Ok(Self::Replay),
            "none" | "unavailable" => Ok(Self::None),
            other => Err(ParallaxError::config(format!(
                "unknown motion backend '{other}' (expected synthetic|replay|none)"
            ))),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "parallax=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            traces_dir: default_traces_dir(),
            motion: MotionDefaults::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for MotionDefaults {
    fn default() -> Self {
        Self {
            update_rate_hz: 60,
            backend: BackendKind::Synthetic,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&config_file_path())
    }

    /// Load config from `path`, falling back to defaults when the file is
    /// missing or unreadable.
    pub fn load_from(path: &Path) -> Self {
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {:?}: {}", path, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {:?}: {}", path, e);
                }
            }
        }
        Self::default()
    }

    /// Save config to the standard location.
    pub fn save(&self) -> ParallaxResult<()> {
        self.save_to(&config_file_path())
    }

    /// Save config to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> ParallaxResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("parallax").join("config.json")
}

/// Default traces directory.
fn default_traces_dir() -> PathBuf {
    let base = std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".local").join("share")
        });
    base.join("parallax").join("traces")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("parallax_config_{name}"));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.motion.update_rate_hz, 60);
        assert_eq!(config.motion.backend, BackendKind::Synthetic);
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.json);
    }

    #[test]
    fn test_save_then_load() {
        let dir = scratch_dir("roundtrip");
        let path = dir.join("nested").join("config.json");

        let mut config = AppConfig::default();
        config.motion.backend = BackendKind::Replay;
        config.logging.level = "debug".to_string();
        config.save_to(&path).unwrap();

        assert_eq!(AppConfig::load_from(&path), config);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_missing_or_broken_file_falls_back_to_defaults() {
        let dir = scratch_dir("broken");
        let path = dir.join("config.json");
        assert_eq!(AppConfig::load_from(&path), AppConfig::default());

        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(&path, "{ definitely not json").unwrap();
        assert_eq!(AppConfig::load_from(&path), AppConfig::default());
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let parsed: AppConfig = serde_json::from_str(r#"{"motion":{"backend":"none"}}"#).unwrap();
        assert_eq!(parsed.motion.backend, BackendKind::None);
        assert_eq!(parsed.motion.update_rate_hz, 60);
        assert_eq!(parsed.logging, LoggingConfig::default());
    }

    #[test]
    fn test_backend_kind_from_str() {
        assert_eq!("Synthetic".parse::<BackendKind>().unwrap(), BackendKind::Synthetic);
        assert_eq!("replay".parse::<BackendKind>().unwrap(), BackendKind::Replay);
        assert_eq!("none".parse::<BackendKind>().unwrap(), BackendKind::None);
        assert!("gyro".parse::<BackendKind>().is_err());
    }
}
