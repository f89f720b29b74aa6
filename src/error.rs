//! Startup failures
//!
//! The frame loop itself cannot fail; everything here happens before the
//! first frame and ends the process.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to read settings from {path}: {source}")]
    SettingsRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse settings in {path}: {source}")]
    SettingsParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
    #[error("surface tracking unavailable: {0}")]
    TrackingUnavailable(String),
}
