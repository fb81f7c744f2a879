//! Localization tables loaded from per-language JSON files.
//!
//! # Responsibility
//! - Regenerate the built-in language files when they are missing.
//! - Resolve display strings for the active language.
//! - Notify subscribers when the active language changes.
//!
//! # Invariants
//! - A language is available iff `<dir>/<code>.json` parses as a flat
//!   string map.
//! - Lookups never fail: active table, then built-in English, then the key.

use log::{info, warn};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Language used when the requested one is unavailable.
pub const FALLBACK_LANGUAGE: &str = "en";

const EN_TABLE: &[(&str, &str)] = &[
    ("app_title", "Assistant"),
    ("tasks_default_list", "Tasks"),
    ("tasks_new_placeholder", "New task..."),
    ("tasks_add", "Add"),
    ("tasks_hide_completed", "Hide completed"),
    ("tasks_delete_last_list", "The last list cannot be deleted."),
    ("notes_search_placeholder", "Search notes..."),
    ("notes_all_tags", "All tags"),
    ("notes_select_placeholder", "Select a note..."),
    ("notes_new_placeholder", "Start writing..."),
    ("status_unsaved", "Unsaved changes..."),
    ("status_saved", "Data saved"),
    ("export_title", "Notes export"),
    ("export_note_heading", "Note from:"),
    ("export_no_notes", "No notes to export."),
    ("backup_missing", "Backup file not found."),
    ("restore_confirm", "Restore data from backup? Unsaved changes will be lost."),
    ("restore_success", "Data restored successfully."),
    ("zen_pomodoro", "Pomodoro:"),
    ("zen_start", "Start"),
    ("zen_pause", "Pause"),
    ("zen_reset", "Reset"),
    ("zen_words", "Words:"),
    ("menu_about", "About..."),
    ("menu_export", "Export notes to Markdown..."),
    ("menu_restore", "Restore from backup..."),
    ("menu_exit", "Exit"),
];

const RU_TABLE: &[(&str, &str)] = &[
    ("app_title", "Ассистент"),
    ("tasks_default_list", "Задачи"),
    ("tasks_new_placeholder", "Новая задача..."),
    ("tasks_add", "Добавить"),
    ("tasks_hide_completed", "Скрыть выполненные"),
    ("tasks_delete_last_list", "Нельзя удалить последний список."),
    ("notes_search_placeholder", "Поиск заметок..."),
    ("notes_all_tags", "Все теги"),
    ("notes_select_placeholder", "Выберите заметку..."),
    ("notes_new_placeholder", "Начните писать..."),
    ("status_unsaved", "Несохраненные изменения..."),
    ("status_saved", "Данные сохранены"),
    ("export_title", "Экспорт заметок"),
    ("export_note_heading", "Заметка от:"),
    ("export_no_notes", "Нет заметок для экспорта."),
    ("backup_missing", "Файл резервной копии не найден."),
    ("restore_confirm", "Восстановить данные из резервной копии? Несохраненные изменения будут потеряны."),
    ("restore_success", "Данные успешно восстановлены."),
    ("zen_pomodoro", "Pomodoro:"),
    ("zen_start", "Старт"),
    ("zen_pause", "Пауза"),
    ("zen_reset", "Сброс"),
    ("zen_words", "Слов:"),
    ("menu_about", "О программе..."),
    ("menu_export", "Экспорт заметок в Markdown..."),
    ("menu_restore", "Восстановить из резервной копии..."),
    ("menu_exit", "Выход"),
];

const BUILTIN_LANGUAGES: &[(&str, &[(&str, &str)])] = &[("en", EN_TABLE), ("ru", RU_TABLE)];

/// Localization error.
#[derive(Debug)]
pub enum LocaleError {
    /// No parsable file exists for the requested code.
    UnknownLanguage(String),
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Display for LocaleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownLanguage(code) => write!(f, "language not available: `{code}`"),
            Self::Io { path, source } => {
                write!(f, "i/o error on `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for LocaleError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::UnknownLanguage(_) => None,
        }
    }
}

type LanguageListener = Box<dyn FnMut(&str) + Send>;

/// Active language table plus change subscribers.
pub struct Localizer {
    dir: PathBuf,
    language: String,
    table: BTreeMap<String, String>,
    listeners: Vec<LanguageListener>,
}

impl std::fmt::Debug for Localizer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Localizer")
            .field("dir", &self.dir)
            .field("language", &self.language)
            .field("entries", &self.table.len())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Localizer {
    /// Loads `language` from `dir`, regenerating built-in files first.
    ///
    /// Falls back to [`FALLBACK_LANGUAGE`] when `language` is unavailable.
    pub fn load(dir: impl Into<PathBuf>, language: &str) -> Self {
        let dir = dir.into();
        if let Err(err) = ensure_default_files(&dir) {
            warn!("event=locale_regenerate module=locale status=error error={err}");
        }

        let (language, table) = match read_table(&dir, language) {
            Some(table) => (language.to_string(), table),
            None => {
                warn!(
                    "event=locale_load module=locale status=fallback requested={language} fallback={FALLBACK_LANGUAGE}"
                );
                let table = read_table(&dir, FALLBACK_LANGUAGE).unwrap_or_default();
                (FALLBACK_LANGUAGE.to_string(), table)
            }
        };
        info!(
            "event=locale_load module=locale status=ok language={language} entries={}",
            table.len()
        );

        Self {
            dir,
            language,
            table,
            listeners: Vec::new(),
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Resolves `key` for the active language.
    pub fn tr(&self, key: &str) -> String {
        if let Some(value) = self.table.get(key) {
            return value.clone();
        }
        builtin_lookup(FALLBACK_LANGUAGE, key)
            .unwrap_or(key)
            .to_string()
    }

    /// Sorted codes of every language file that parses.
    pub fn available_languages(&self) -> Vec<String> {
        available_languages(&self.dir)
    }

    /// Registers a callback invoked with the new code after each switch.
    pub fn subscribe(&mut self, listener: impl FnMut(&str) + Send + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Switches the active language.
    ///
    /// Returns `Ok(false)` when `code` is already active, `Ok(true)` after a
    /// switch (subscribers notified).
    ///
    /// # Errors
    /// - `UnknownLanguage` when no parsable file exists for `code`.
    pub fn set_language(&mut self, code: &str) -> Result<bool, LocaleError> {
        let code = code.trim();
        if code == self.language {
            return Ok(false);
        }
        let table =
            read_table(&self.dir, code).ok_or_else(|| LocaleError::UnknownLanguage(code.to_string()))?;
        self.language = code.to_string();
        self.table = table;
        info!("event=locale_switch module=locale status=ok language={code}");
        for listener in &mut self.listeners {
            listener(code);
        }
        Ok(true)
    }
}

/// Writes every built-in language file that does not exist yet.
///
/// Returns the number of files written.
pub fn ensure_default_files(dir: &Path) -> Result<usize, LocaleError> {
    std::fs::create_dir_all(dir).map_err(|source| LocaleError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut written = 0;
    for (code, entries) in BUILTIN_LANGUAGES {
        let path = language_file(dir, code);
        if path.exists() && read_table(dir, code).is_some() {
            continue;
        }
        let table: BTreeMap<&str, &str> = entries.iter().copied().collect();
        let body = serde_json::to_string_pretty(&table).unwrap_or_else(|_| "{}".to_string());
        std::fs::write(&path, body).map_err(|source| LocaleError::Io {
            path: path.clone(),
            source,
        })?;
        written += 1;
    }
    if written > 0 {
        info!("event=locale_regenerate module=locale status=ok files={written}");
    }
    Ok(written)
}

/// Sorted codes of every parsable language file in `dir`.
pub fn available_languages(dir: &Path) -> Vec<String> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut codes: Vec<String> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .filter_map(|path| path.file_stem().map(|stem| stem.to_string_lossy().into_owned()))
        .filter(|code| read_table(dir, code).is_some())
        .collect();
    codes.sort();
    codes
}

fn language_file(dir: &Path, code: &str) -> PathBuf {
    dir.join(format!("{code}.json"))
}

fn read_table(dir: &Path, code: &str) -> Option<BTreeMap<String, String>> {
    if code.is_empty() || code.contains(['/', '\\', '.']) {
        return None;
    }
    let raw = std::fs::read_to_string(language_file(dir, code)).ok()?;
    serde_json::from_str(&raw).ok()
}

fn builtin_lookup(code: &str, key: &str) -> Option<&'static str> {
    BUILTIN_LANGUAGES
        .iter()
        .find(|(lang, _)| *lang == code)
        .and_then(|(_, entries)| entries.iter().find(|(k, _)| *k == key))
        .map(|(_, value)| *value)
}

#[cfg(test)]
mod tests {
    use super::{available_languages, ensure_default_files, LocaleError, Localizer};
    use std::sync::{Arc, Mutex};

    #[test]
    fn missing_files_are_regenerated_and_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let lang_dir = dir.path().join("lang");
        assert_eq!(ensure_default_files(&lang_dir).unwrap(), 2);
        assert_eq!(ensure_default_files(&lang_dir).unwrap(), 0);
        assert_eq!(available_languages(&lang_dir), vec!["en", "ru"]);
    }

    #[test]
    fn unparsable_language_is_not_available() {
        let dir = tempfile::tempdir().unwrap();
        ensure_default_files(dir.path()).unwrap();
        std::fs::write(dir.path().join("de.json"), "{broken").unwrap();
        std::fs::write(dir.path().join("fr.json"), r#"{"tasks_add": "Ajouter"}"#).unwrap();
        assert_eq!(available_languages(dir.path()), vec!["en", "fr", "ru"]);
    }

    #[test]
    fn unknown_requested_language_falls_back_to_english() {
        let dir = tempfile::tempdir().unwrap();
        let localizer = Localizer::load(dir.path(), "xx");
        assert_eq!(localizer.language(), "en");
        assert_eq!(localizer.tr("tasks_add"), "Add");
        assert_eq!(localizer.tr("no_such_key"), "no_such_key");
    }

    #[test]
    fn switching_language_notifies_subscribers() {
        let dir = tempfile::tempdir().unwrap();
        let mut localizer = Localizer::load(dir.path(), "en");
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        localizer.subscribe(move |code| sink.lock().unwrap().push(code.to_string()));

        assert!(localizer.set_language("ru").unwrap());
        assert!(!localizer.set_language("ru").unwrap());
        assert_eq!(localizer.tr("tasks_add"), "Добавить");
        assert_eq!(*seen.lock().unwrap(), vec!["ru".to_string()]);

        let err = localizer.set_language("zz").unwrap_err();
        assert!(matches!(err, LocaleError::UnknownLanguage(_)));
        assert_eq!(localizer.language(), "ru");
    }

    #[test]
    fn partial_table_falls_back_per_key() {
        let dir = tempfile::tempdir().unwrap();
        ensure_default_files(dir.path()).unwrap();
        std::fs::write(dir.path().join("fr.json"), r#"{"tasks_add": "Ajouter"}"#).unwrap();
        let localizer = Localizer::load(dir.path(), "fr");
        assert_eq!(localizer.tr("tasks_add"), "Ajouter");
        assert_eq!(localizer.tr("zen_reset"), "Reset");
    }
}
