//! Application context shared by the shell and its panels.
//!
//! # Responsibility
//! - Own the storage layout, both stores, the loaded settings and the
//!   localization table.
//! - Keep settings and the active language in step.
//!
//! # Invariants
//! - Exactly one context exists per running sidebar; it is passed by
//!   reference, never reached through globals.

use crate::config::StoragePaths;
use crate::locale::{LocaleError, Localizer};
use crate::model::settings::Settings;
use crate::store::data_store::DataStore;
use crate::store::settings_store::SettingsStore;
use log::{info, warn};

#[derive(Debug)]
pub struct AppContext {
    paths: StoragePaths,
    settings_store: SettingsStore,
    data_store: DataStore,
    settings: Settings,
    localizer: Localizer,
}

impl AppContext {
    /// Loads settings and the language table from `paths`.
    ///
    /// Never fails: unreadable files fall back to defaults.
    pub fn open(paths: StoragePaths) -> Self {
        if let Err(err) = paths.ensure_root() {
            warn!(
                "event=context_open module=context status=degraded root={} error={err}",
                paths.root().display()
            );
        }
        let settings_store = SettingsStore::new(paths.settings_file());
        let mut settings = settings_store.load();
        let localizer = Localizer::load(paths.language_dir(), &settings.language);
        if settings.language != localizer.language() {
            warn!(
                "event=context_open module=context status=degraded requested_language={} language={}",
                settings.language,
                localizer.language()
            );
            settings.language = localizer.language().to_string();
        }
        let data_store = DataStore::new(paths.data_file());
        info!(
            "event=context_open module=context status=ok root={}",
            paths.root().display()
        );

        Self {
            paths,
            settings_store,
            data_store,
            settings,
            localizer,
        }
    }

    pub fn paths(&self) -> &StoragePaths {
        &self.paths
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn settings_store(&self) -> &SettingsStore {
        &self.settings_store
    }

    pub fn data_store(&self) -> &DataStore {
        &self.data_store
    }

    pub fn localizer(&self) -> &Localizer {
        &self.localizer
    }

    pub fn localizer_mut(&mut self) -> &mut Localizer {
        &mut self.localizer
    }

    /// Shorthand for `localizer().tr(key)`.
    pub fn tr(&self, key: &str) -> String {
        self.localizer.tr(key)
    }

    /// Replaces and persists settings, switching language when it changed.
    ///
    /// # Errors
    /// - `UnknownLanguage` when the new language has no file; nothing is
    ///   applied in that case.
    pub fn update_settings(&mut self, settings: Settings) -> Result<(), LocaleError> {
        if settings.language != self.localizer.language() {
            self.localizer.set_language(&settings.language)?;
        }
        self.settings = settings;
        self.settings_store.save(&self.settings);
        Ok(())
    }

    /// Writes the current settings (shutdown path).
    pub fn save_settings(&self) {
        self.settings_store.save(&self.settings);
    }
}
