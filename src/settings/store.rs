//! Tap-to-zoom preferences persisted as JSON (`tap-to-zoom.json`).

use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use serde::{Deserialize, Serialize};

use super::Settings;
use crate::algorithm::easing::ZoomEasing;
use crate::models::zoom::{
    DEFAULT_ANIMATION_DURATION_MS, DEFAULT_TICK_INTERVAL_MS, DEFAULT_ZOOM_FACTOR,
};

const SETTINGS_FILE_NAME: &str = "tap-to-zoom.json";

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to resolve the user config directory")]
    NoConfigDir,
    #[error("failed to access settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize settings for {path}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ZoomSettings {
    pub use_tap_to_zoom: bool,
    pub zoom_factor: f64,
    pub animation_duration_ms: u64,
    pub tick_interval_ms: u64,
    pub easing: ZoomEasing,
}

impl Default for ZoomSettings {
    fn default() -> Self {
        Self {
            use_tap_to_zoom: false,
            zoom_factor: DEFAULT_ZOOM_FACTOR,
            animation_duration_ms: DEFAULT_ANIMATION_DURATION_MS,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            easing: ZoomEasing::default(),
        }
    }
}

/// `{config}/Kapture/tap-to-zoom.json`
pub fn default_settings_path() -> Result<PathBuf, SettingsError> {
    let base = dirs::config_dir().ok_or(SettingsError::NoConfigDir)?;
    Ok(base.join("Kapture").join(SETTINGS_FILE_NAME))
}

/// Shared, runtime-mutable settings; updates apply from the next gesture on.
#[derive(Debug, Default)]
pub struct SettingsStore {
    current: RwLock<ZoomSettings>,
}

impl SettingsStore {
    pub fn new(settings: ZoomSettings) -> Self {
        Self {
            current: RwLock::new(settings),
        }
    }

    /// Loads settings from `path`; a missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                log::info!(
                    "settings: {} not found, using defaults",
                    path.display()
                );
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(SettingsError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let settings: ZoomSettings =
            serde_json::from_str(&raw).map_err(|source| SettingsError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self::new(settings))
    }

    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let io_err = |source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(&self.snapshot()).map_err(|source| {
            SettingsError::Serialize {
                path: path.to_path_buf(),
                source,
            }
        })?;
        std::fs::write(path, json).map_err(io_err)
    }

    pub fn snapshot(&self) -> ZoomSettings {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn update(&self, apply: impl FnOnce(&mut ZoomSettings)) {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        apply(&mut guard);
    }
}

impl Settings for SettingsStore {
    fn is_tap_to_zoom_enabled(&self) -> bool {
        self.snapshot().use_tap_to_zoom
    }

    fn zoom_factor(&self) -> f64 {
        self.snapshot().zoom_factor
    }

    fn animation_duration_ms(&self) -> u64 {
        self.snapshot().animation_duration_ms
    }

    fn easing(&self) -> ZoomEasing {
        self.snapshot().easing
    }

    fn tick_interval_ms(&self) -> u64 {
        self.snapshot().tick_interval_ms
    }
}
