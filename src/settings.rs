//! Demo settings
//!
//! Read from a JSON file named by `ANCHOR_SPIN_SETTINGS`; defaults otherwise.
//! Missing fields fall back to their defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::StartupError;

/// Environment variable naming the settings file
pub const SETTINGS_ENV: &str = "ANCHOR_SPIN_SETTINGS";

/// Demo settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Core ===
    /// Slider position at startup
    pub initial_slider: f32,
    /// Start with the cursor position locked
    pub start_locked: bool,
    /// Clamp slider input to [0, 1] (off: out-of-range values pass through)
    pub clamp_slider: bool,

    // === Demo run ===
    /// Number of frames to run
    pub frames: u32,
    /// Sleep between frames (0 = as fast as possible)
    pub frame_interval_ms: u64,
    /// Seed for the simulated tracking session
    pub seed: u64,
    /// Planes in the simulated session
    pub plane_count: u32,
    /// Log a status line every N frames
    pub log_every: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            initial_slider: 0.0,
            start_locked: false,
            clamp_slider: false,

            frames: 600,
            frame_interval_ms: 16,
            seed: 42,
            plane_count: 4,
            log_every: 60,
        }
    }
}

impl Settings {
    /// Load from the file named by `ANCHOR_SPIN_SETTINGS`, or use defaults
    pub fn load() -> Result<Self, StartupError> {
        match std::env::var_os(SETTINGS_ENV) {
            Some(path) => Self::load_from(PathBuf::from(path)),
            None => {
                log::info!("Using default settings");
                Ok(Self::default())
            }
        }
    }

    /// Load and validate settings from a JSON file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, StartupError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                log::warn!("Settings file {} not found", path.display());
            }
            StartupError::SettingsRead {
                path: path.to_path_buf(),
                source,
            }
        })?;
        let settings: Settings =
            serde_json::from_str(&json).map_err(|source| StartupError::SettingsParse {
                path: path.to_path_buf(),
                source,
            })?;
        settings.validate()?;

        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Write settings as pretty JSON
    pub fn save_to(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }

    /// Reject values the demo cannot run with
    pub fn validate(&self) -> Result<(), StartupError> {
        if self.frames == 0 {
            return Err(StartupError::InvalidSettings("frames must be > 0".into()));
        }
        if self.log_every == 0 {
            return Err(StartupError::InvalidSettings("log_every must be > 0".into()));
        }
        if !self.initial_slider.is_finite() {
            return Err(StartupError::InvalidSettings(format!(
                "initial_slider must be finite, got {}",
                self.initial_slider
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("anchor-spin-{}-{}.json", name, std::process::id()))
    }

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert!(!settings.clamp_slider);
    }

    #[test]
    fn test_save_and_load() {
        let path = temp_path("save-load");
        let settings = Settings {
            initial_slider: 0.25,
            start_locked: true,
            frames: 10,
            ..Default::default()
        };
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(&path).unwrap();
        assert_eq!(loaded, settings);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let path = temp_path("partial");
        std::fs::write(&path, r#"{ "seed": 7 }"#).unwrap();

        let loaded = Settings::load_from(&path).unwrap();
        assert_eq!(loaded.seed, 7);
        assert_eq!(loaded.frames, Settings::default().frames);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_load_errors() {
        let missing = temp_path("missing");
        assert!(matches!(
            Settings::load_from(&missing),
            Err(StartupError::SettingsRead { .. })
        ));

        let garbled = temp_path("garbled");
        std::fs::write(&garbled, "{ not json").unwrap();
        assert!(matches!(
            Settings::load_from(&garbled),
            Err(StartupError::SettingsParse { .. })
        ));
        let _ = std::fs::remove_file(&garbled);

        let invalid = temp_path("invalid");
        std::fs::write(&invalid, r#"{ "frames": 0 }"#).unwrap();
        assert!(matches!(
            Settings::load_from(&invalid),
            Err(StartupError::InvalidSettings(_))
        ));
        let _ = std::fs::remove_file(&invalid);
    }
}
