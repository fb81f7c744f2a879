//! On-disk layout of SideDock files.
//!
//! # Responsibility
//! - Resolve the data directory from environment or platform defaults.
//! - Derive every file path used by stores, localization and logging.
//!
//! # Invariants
//! - All paths are derived from one root; nothing is read from the cwd.

use std::path::{Path, PathBuf};

/// Environment override for the data directory.
pub const DATA_DIR_ENV: &str = "SIDEDOCK_DATA_DIR";

const APP_DIR_NAME: &str = "sidedock";
const SETTINGS_FILE_NAME: &str = "settings.json";
const DATA_FILE_NAME: &str = "tasks_and_notes.json";
const BACKUP_FILE_NAME: &str = "tasks_and_notes.json.bak";
const LANGUAGE_DIR_NAME: &str = "lang";
const LOG_DIR_NAME: &str = "logs";
const AUDIO_DIR_NAME: &str = "zen_audio";
const POMODORO_CUE_FILE_NAME: &str = "pomodoro_end.wav";

/// File layout rooted at one data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoragePaths {
    root: PathBuf,
}

impl StoragePaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolves the root: `$SIDEDOCK_DATA_DIR`, then the platform local data
    /// directory, then the system temp directory.
    pub fn resolve() -> Self {
        if let Ok(raw) = std::env::var(DATA_DIR_ENV) {
            let trimmed = raw.trim();
            if !trimmed.is_empty() {
                return Self::new(trimmed);
            }
        }
        let base = dirs::data_local_dir().unwrap_or_else(std::env::temp_dir);
        Self::new(base.join(APP_DIR_NAME))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn settings_file(&self) -> PathBuf {
        self.root.join(SETTINGS_FILE_NAME)
    }

    pub fn data_file(&self) -> PathBuf {
        self.root.join(DATA_FILE_NAME)
    }

    pub fn backup_file(&self) -> PathBuf {
        self.root.join(BACKUP_FILE_NAME)
    }

    pub fn language_dir(&self) -> PathBuf {
        self.root.join(LANGUAGE_DIR_NAME)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.root.join(LOG_DIR_NAME)
    }

    /// Directory scanned for ambient tracks.
    pub fn audio_dir(&self) -> PathBuf {
        self.root.join(AUDIO_DIR_NAME)
    }

    /// Sound played when a Pomodoro phase ends.
    pub fn pomodoro_cue_file(&self) -> PathBuf {
        self.root.join(POMODORO_CUE_FILE_NAME)
    }

    /// Creates the root directory when missing.
    pub fn ensure_root(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.root)
    }
}
