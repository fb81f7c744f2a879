//! JSON-file persistence for settings and application data.
//!
//! # Responsibility
//! - Read and write the settings, data and backup files.
//! - Treat missing or unparsable files as absent rather than fatal.
//!
//! # Invariants
//! - A failed read never prevents startup; callers get defaults.
//! - Writes preserve top-level keys the writer does not own.

use log::{debug, warn};
use serde_json::{Map, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub mod backup;
pub mod data_store;
pub mod settings_store;

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence error for store operations.
#[derive(Debug)]
pub enum StoreError {
    /// File-system failure on `path`.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Serialization failure while writing `path`.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// Restore was requested but no backup file exists.
    BackupMissing(PathBuf),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "i/o error on `{}`: {source}", path.display()),
            Self::Json { path, source } => {
                write!(f, "json error on `{}`: {source}", path.display())
            }
            Self::BackupMissing(path) => write!(f, "backup file not found: `{}`", path.display()),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::BackupMissing(_) => None,
        }
    }
}

impl StoreError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Reads `path` as a JSON object.
///
/// Returns `None` when the file is missing, unreadable, not JSON, or not an
/// object. Each case is logged; none is an error for the caller.
pub(crate) fn read_json_object(path: &Path, module: &str) -> Option<Map<String, Value>> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            debug!(
                "event=file_read module={module} status=absent path={}",
                path.display()
            );
            return None;
        }
        Err(err) => {
            warn!(
                "event=file_read module={module} status=error path={} error={err}",
                path.display()
            );
            return None;
        }
    };

    match serde_json::from_str::<Value>(&raw) {
        Ok(Value::Object(map)) => Some(map),
        Ok(_) => {
            warn!(
                "event=file_read module={module} status=error path={} error_code=not_an_object",
                path.display()
            );
            None
        }
        Err(err) => {
            warn!(
                "event=file_read module={module} status=error path={} error_code=invalid_json error={err}",
                path.display()
            );
            None
        }
    }
}

/// Writes `value` as pretty JSON, creating the parent directory if needed.
pub(crate) fn write_json_pretty(path: &Path, value: &Value) -> StoreResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|err| StoreError::io(parent, err))?;
        }
    }
    let body = serde_json::to_string_pretty(value).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, body).map_err(|err| StoreError::io(path, err))
}
