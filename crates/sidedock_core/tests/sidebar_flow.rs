use sidedock_core::service::sidebar::SidebarError;
use sidedock_core::{
    Command, CommandOutcome, DataStore, Note, SaveStatus, SettingsStore, ShellState, Sidebar, SilentAudio, SlideEdge,
    StoragePaths, TriggerPosition, ZenExit,
};
use std::path::Path;

fn open(root: &Path) -> Sidebar {
    Sidebar::open(StoragePaths::new(root), SilentAudio)
}

fn show(sidebar: &mut Sidebar) {
    assert_eq!(sidebar.toggle(), Some(ShellState::Showing));
    assert_eq!(sidebar.animation_finished(), Some(ShellState::Visible));
}

fn hide(sidebar: &mut Sidebar) {
    assert!(sidebar.request_close());
    assert_eq!(sidebar.animation_finished(), Some(ShellState::Hidden));
}

#[test]
fn toggle_is_ignored_while_animating() {
    let dir = tempfile::tempdir().unwrap();
    let mut sidebar = open(dir.path());
    assert_eq!(sidebar.toggle(), Some(ShellState::Showing));
    assert_eq!(sidebar.toggle(), None);
    assert_eq!(sidebar.animation_finished(), Some(ShellState::Visible));
    assert_eq!(sidebar.toggle(), Some(ShellState::Hiding));
    assert_eq!(sidebar.toggle(), None);
    assert_eq!(sidebar.animation_finished(), Some(ShellState::Hidden));
    assert!(sidebar.tasks().is_none());
}

#[test]
fn hiding_saves_a_dirty_note() {
    let dir = tempfile::tempdir().unwrap();
    let mut sidebar = open(dir.path());
    show(&mut sidebar);
    sidebar
        .dispatch(Command::SetNoteText("unsaved thought".into()))
        .unwrap();
    assert_eq!(sidebar.status(), SaveStatus::Unsaved);
    hide(&mut sidebar);

    let notes = DataStore::new(StoragePaths::new(dir.path()).data_file())
        .load()
        .notes;
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].text, "unsaved thought");
}

#[test]
fn zen_round_trip_updates_origin_and_reselects_it() {
    let dir = tempfile::tempdir().unwrap();
    let mut sidebar = open(dir.path());
    show(&mut sidebar);
    sidebar.dispatch(Command::SetNoteText("draft".into())).unwrap();
    sidebar.dispatch(Command::SaveNote).unwrap();
    let origin = sidebar
        .notes()
        .unwrap()
        .bound_timestamp()
        .unwrap()
        .to_string();

    sidebar.enter_zen().unwrap();
    assert_eq!(sidebar.animation_finished(), Some(ShellState::Hidden));
    let zen = sidebar.zen_mut().unwrap();
    assert_eq!(zen.text(), "draft");
    zen.set_text("draft, expanded in zen");

    let saved = sidebar.exit_zen(ZenExit::Close).unwrap();
    assert_eq!(saved.as_deref(), Some(origin.as_str()));
    assert_eq!(sidebar.shell_state(), ShellState::Showing);
    let notes = sidebar.notes().unwrap();
    assert_eq!(notes.bound_timestamp(), Some(origin.as_str()));
    assert_eq!(notes.buffer(), "draft, expanded in zen");
    assert_eq!(notes.notes().len(), 1);
}

#[test]
fn zen_save_and_new_opens_blank_panel() {
    let dir = tempfile::tempdir().unwrap();
    let mut sidebar = open(dir.path());
    show(&mut sidebar);
    sidebar.enter_zen().unwrap();
    sidebar.animation_finished().unwrap();
    sidebar.zen_mut().unwrap().set_text("fresh idea");

    let saved = sidebar.exit_zen(ZenExit::SaveAndNew).unwrap();
    assert!(saved.is_some());
    let notes = sidebar.notes().unwrap();
    assert_eq!(notes.bound_timestamp(), None);
    assert_eq!(notes.buffer(), "");
    assert_eq!(notes.notes()[0].text, "fresh idea");
}

#[test]
fn zen_settings_changes_are_persisted_on_exit() {
    let dir = tempfile::tempdir().unwrap();
    let mut sidebar = open(dir.path());
    show(&mut sidebar);
    sidebar.enter_zen().unwrap();
    sidebar.animation_finished().unwrap();

    let mut zen_settings = sidebar.zen().unwrap().settings().clone();
    zen_settings.font_size = 24;
    sidebar.update_zen_settings(zen_settings).unwrap();
    sidebar.exit_zen(ZenExit::Close).unwrap();

    let stored = SettingsStore::new(StoragePaths::new(dir.path()).settings_file()).load();
    assert_eq!(stored.zen_font_size, 24);
    assert!(matches!(
        sidebar.exit_zen(ZenExit::Close),
        Err(SidebarError::ZenNotActive)
    ));
}

#[test]
fn zen_exit_survives_an_unavailable_persisted_language() {
    let dir = tempfile::tempdir().unwrap();
    let paths = StoragePaths::new(dir.path());
    std::fs::write(paths.settings_file(), r#"{"language": "fr"}"#).unwrap();

    let mut sidebar = open(dir.path());
    show(&mut sidebar);
    sidebar
        .dispatch(Command::SetNoteText("bonjour".into()))
        .unwrap();
    sidebar.dispatch(Command::SaveNote).unwrap();
    sidebar.enter_zen().unwrap();
    sidebar.animation_finished().unwrap();

    let mut zen_settings = sidebar.zen().unwrap().settings().clone();
    zen_settings.font_size = 21;
    sidebar.update_zen_settings(zen_settings).unwrap();
    sidebar.exit_zen(ZenExit::Close).unwrap();

    assert!(sidebar.zen().is_none());
    assert_eq!(sidebar.shell_state(), ShellState::Showing);
    let stored = SettingsStore::new(paths.settings_file()).load();
    assert_eq!(stored.zen_font_size, 21);
    assert_eq!(stored.language, "en");
}

#[test]
fn saving_an_older_note_reports_its_own_timestamp() {
    let dir = tempfile::tempdir().unwrap();
    let data_file = StoragePaths::new(dir.path()).data_file();
    DataStore::new(&data_file)
        .save(
            &Default::default(),
            "Tasks",
            &[
                Note::new("2024-01-01 00:00:00", "old"),
                Note::new("2024-06-01 00:00:00", "new"),
            ],
        )
        .unwrap();

    let mut sidebar = open(dir.path());
    show(&mut sidebar);
    sidebar
        .dispatch(Command::SelectNote("2024-01-01 00:00:00".into()))
        .unwrap();
    sidebar
        .dispatch(Command::SetNoteText("old, revised".into()))
        .unwrap();
    let outcome = sidebar.dispatch(Command::SaveNote).unwrap();
    assert_eq!(
        outcome,
        CommandOutcome::Saved("2024-01-01 00:00:00".to_string())
    );
    let stored = DataStore::new(&data_file).load().notes;
    assert_eq!(stored.len(), 2);
    assert!(stored
        .iter()
        .any(|note| note.timestamp == "2024-01-01 00:00:00" && note.text == "old, revised"));
}

#[test]
fn backup_then_restore_discards_later_changes() {
    let dir = tempfile::tempdir().unwrap();
    let mut sidebar = open(dir.path());
    show(&mut sidebar);
    sidebar.dispatch(Command::AddTask("kept".into())).unwrap();
    assert!(sidebar.backup_tick().unwrap());

    sidebar.dispatch(Command::AddTask("lost".into())).unwrap();
    sidebar.restore_backup().unwrap();
    let texts: Vec<_> = sidebar
        .tasks()
        .unwrap()
        .active_tasks()
        .iter()
        .map(|task| task.text.clone())
        .collect();
    assert_eq!(texts, ["kept"]);
}

#[test]
fn restore_without_backup_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut sidebar = open(dir.path());
    let err = sidebar.restore_backup().unwrap_err();
    assert!(matches!(err, SidebarError::Store(_)));
}

#[test]
fn export_writes_localized_markdown_oldest_first() {
    let dir = tempfile::tempdir().unwrap();
    let mut sidebar = open(dir.path());
    let target = dir.path().join("notes.md");
    assert!(matches!(
        sidebar.export_notes(&target),
        Err(SidebarError::NothingToExport)
    ));

    show(&mut sidebar);
    for text in ["first", "second"] {
        sidebar.dispatch(Command::SetNoteText(text.into())).unwrap();
        sidebar.dispatch(Command::SaveNoteAndNew).unwrap();
    }
    assert_eq!(sidebar.export_notes(&target).unwrap(), 2);

    let markdown = std::fs::read_to_string(&target).unwrap();
    assert!(markdown.starts_with("# Notes export\n\n"));
    let first = markdown.find("first").unwrap();
    let second = markdown.find("second").unwrap();
    assert!(first < second);
    assert_eq!(markdown.matches("---").count(), 2);
}

#[test]
fn settings_update_moves_the_slide_edge() {
    let dir = tempfile::tempdir().unwrap();
    let mut sidebar = open(dir.path());
    assert_eq!(sidebar.slide_edge(), SlideEdge::Right);

    let mut settings = sidebar.settings().clone();
    settings.trigger_pos = TriggerPosition::Left;
    sidebar.update_settings(settings).unwrap();
    assert_eq!(sidebar.slide_edge(), SlideEdge::Left);

    let reopened = open(dir.path());
    assert_eq!(reopened.slide_edge(), SlideEdge::Left);
}
