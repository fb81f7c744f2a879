//! Settings file load/save.
//!
//! # Responsibility
//! - Merge persisted overrides onto compiled-in defaults, key by key.
//! - Persist the full settings object on every change.
//!
//! # Invariants
//! - Unknown keys are ignored; mis-shaped values fall back to defaults.
//! - `save` never raises; failures are logged.

use super::{read_json_object, write_json_pretty, StoreResult};
use crate::model::settings::{is_hex_color, Settings, COLOR_KEYS};
use log::{error, info, warn};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Settings persistence over one JSON file.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads settings; missing or corrupt files yield defaults.
    pub fn load(&self) -> Settings {
        let Some(persisted) = read_json_object(&self.path, "settings") else {
            info!("event=settings_load module=settings status=defaults");
            return Settings::default();
        };

        let (settings, rejected) = merge_settings(&persisted);
        if rejected.is_empty() {
            info!("event=settings_load module=settings status=ok");
        } else {
            warn!(
                "event=settings_load module=settings status=partial rejected_keys={}",
                rejected.join(",")
            );
        }
        settings
    }

    /// Persists settings, logging instead of returning failures.
    pub fn save(&self, settings: &Settings) {
        if let Err(err) = self.try_save(settings) {
            error!("event=settings_save module=settings status=error error={err}");
        }
    }

    /// Persists settings and reports failures to the caller.
    pub fn try_save(&self, settings: &Settings) -> StoreResult<()> {
        let value = serde_json::to_value(settings).map_err(|source| super::StoreError::Json {
            path: self.path.clone(),
            source,
        })?;
        write_json_pretty(&self.path, &value)?;
        info!("event=settings_save module=settings status=ok");
        Ok(())
    }
}

/// Overlays `persisted` onto defaults one key at a time.
///
/// Returns the merged settings plus the known keys whose values were rejected.
pub fn merge_settings(persisted: &Map<String, Value>) -> (Settings, Vec<String>) {
    let defaults = Settings::default();
    let mut merged = match serde_json::to_value(&defaults) {
        Ok(Value::Object(map)) => map,
        _ => return (defaults, Vec::new()),
    };
    let mut rejected = Vec::new();

    for (key, value) in persisted {
        if !merged.contains_key(key) {
            continue;
        }
        if COLOR_KEYS.contains(&key.as_str()) && !value.as_str().is_some_and(is_hex_color) {
            rejected.push(key.clone());
            continue;
        }

        let mut candidate = merged.clone();
        candidate.insert(key.clone(), value.clone());
        if serde_json::from_value::<Settings>(Value::Object(candidate.clone())).is_ok() {
            merged = candidate;
        } else {
            rejected.push(key.clone());
        }
    }

    let settings = serde_json::from_value(Value::Object(merged)).unwrap_or(defaults);
    (settings, rejected)
}

#[cfg(test)]
mod tests {
    use super::merge_settings;
    use crate::model::settings::{Settings, Theme};
    use serde_json::json;

    #[test]
    fn merge_keeps_valid_keys_and_rejects_bad_shapes() {
        let persisted = json!({
            "theme": "dark",
            "zen_font_size": "huge",
            "accent_color": "blue",
            "mystery": 42
        });
        let (settings, rejected) = merge_settings(persisted.as_object().unwrap());
        assert_eq!(settings.theme, Theme::Dark);
        assert_eq!(settings.zen_font_size, Settings::default().zen_font_size);
        assert_eq!(settings.accent_color, Settings::default().accent_color);
        assert!(rejected.contains(&"zen_font_size".to_string()));
        assert!(rejected.contains(&"accent_color".to_string()));
        assert!(!rejected.contains(&"mystery".to_string()));
    }

    #[test]
    fn merge_of_empty_object_is_defaults() {
        let (settings, rejected) = merge_settings(&serde_json::Map::new());
        assert_eq!(settings, Settings::default());
        assert!(rejected.is_empty());
    }
}
