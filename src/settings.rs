//! Persisted user settings.
//!
//! Stored as JSON in `<config dir>/number-castle/settings.json`. Every field
//! has a default, so a missing, partial or corrupt file still loads.
//! Writes go to a temp file in the same directory and are renamed into
//! place.

use crate::constants::{MAX_RESIZE_DEBOUNCE_MS, RESIZE_DEBOUNCE_MS, TRASH_BUFFER};
use crate::error::{CastleError, CastleResult};
use crate::input::DragConfig;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

static SETTINGS_PATH: Lazy<Option<PathBuf>> = Lazy::new(|| {
    dirs::config_dir().map(|dir| dir.join("number-castle").join("settings.json"))
});

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// First-run help was already shown once
    pub help_shown: bool,
    /// Forgiveness added around the trash, in pixels
    pub trash_buffer: f32,
    pub resize_debounce_ms: u64,
    /// Move placed entities on the board while dragging
    pub eager_move: bool,
    pub debug_logging: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            help_shown: false,
            trash_buffer: TRASH_BUFFER,
            resize_debounce_ms: RESIZE_DEBOUNCE_MS,
            eager_move: true,
            debug_logging: false,
        }
    }
}

impl Settings {
    /// Location of the settings file, if the platform has a config dir.
    pub fn path() -> Option<PathBuf> {
        SETTINGS_PATH.clone()
    }

    /// Load from the default location, falling back to defaults.
    pub fn load() -> Self {
        match Self::path() {
            Some(path) => Self::load_or_default(&path),
            None => {
                warn!("no config directory, using default settings");
                Self::default()
            }
        }
    }

    /// Load from `path`, falling back to defaults on any error.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            debug!(path = %path.display(), "no settings file yet");
            return Self::default();
        }
        match Self::load_from(path) {
            Ok(settings) => settings,
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "could not read settings, using defaults"
                );
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> CastleResult<Self> {
        let content = fs::read_to_string(path)?;
        let settings = serde_json::from_str(&content)?;
        Ok(settings)
    }

    /// Atomically replace the file at `path`.
    pub fn save_to(&self, path: &Path) -> CastleResult<()> {
        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir)?;

        let json = serde_json::to_string_pretty(self)?;
        let mut file = NamedTempFile::new_in(dir)?;
        file.write_all(json.as_bytes())?;
        file.as_file().sync_all()?;
        file.persist(path).map_err(|e| CastleError::Persist {
            path: path.to_path_buf(),
            source: e.error,
        })?;

        info!(path = %path.display(), "settings saved");
        Ok(())
    }

    pub fn drag_config(&self) -> DragConfig {
        DragConfig {
            trash_buffer: self.trash_buffer.max(0.0),
            eager_move: self.eager_move,
        }
    }

    /// Resize quiet period, capped at `MAX_RESIZE_DEBOUNCE_MS`.
    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms.min(MAX_RESIZE_DEBOUNCE_MS))
    }
}
