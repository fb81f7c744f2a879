use serde_json::json;
use sidedock_core::{Settings, SettingsStore, StoragePaths, Theme, TriggerPosition};

#[test]
fn deleted_settings_file_restores_exact_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let paths = StoragePaths::new(dir.path());
    let store = SettingsStore::new(paths.settings_file());

    let mut custom = Settings::default();
    custom.theme = Theme::Dark;
    custom.trigger_pos = TriggerPosition::Left;
    custom.zen_font_size = 22;
    store.try_save(&custom).unwrap();
    assert_eq!(store.load(), custom);

    std::fs::remove_file(paths.settings_file()).unwrap();
    assert_eq!(store.load(), Settings::default());
}

#[test]
fn partial_file_keeps_valid_keys_and_defaults_the_rest() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(
        &path,
        json!({
            "theme": "dark",
            "accent_color": "not-a-color",
            "zen_font_size": "huge",
            "unknown_key": true
        })
        .to_string(),
    )
    .unwrap();

    let loaded = SettingsStore::new(&path).load();
    let defaults = Settings::default();
    assert_eq!(loaded.theme, Theme::Dark);
    assert_eq!(loaded.accent_color, defaults.accent_color);
    assert_eq!(loaded.zen_font_size, defaults.zen_font_size);
}

#[test]
fn corrupt_file_loads_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert_eq!(SettingsStore::new(&path).load(), Settings::default());
}
