use sidedock_core::{
    Command, CommandOutcome, DataStore, ListDirection, Sidebar, SilentAudio, StoragePaths,
    TaskListPanel, TaskPanelError,
};
use std::collections::BTreeMap;
use std::path::Path;

fn visible_sidebar(root: &Path) -> Sidebar {
    let mut sidebar = Sidebar::open(StoragePaths::new(root), SilentAudio);
    sidebar.toggle().unwrap();
    sidebar.animation_finished().unwrap();
    sidebar
}

#[test]
fn new_list_with_task_survives_reload() {
    let dir = tempfile::tempdir().unwrap();
    let mut sidebar = visible_sidebar(dir.path());
    sidebar.dispatch(Command::AddList("Work".into())).unwrap();
    sidebar.dispatch(Command::AddTask("Buy milk".into())).unwrap();
    sidebar.shutdown();

    let snapshot = DataStore::new(StoragePaths::new(dir.path()).data_file()).load();
    let work = &snapshot.task_lists["Work"];
    assert_eq!(work.len(), 1);
    assert_eq!(work[0].text, "Buy milk");
    assert!(!work[0].completed);
    assert_eq!(snapshot.active_task_list, "Work");
}

#[test]
fn mixed_edits_round_trip_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let mut sidebar = visible_sidebar(dir.path());
    for text in ["one", "two", "three", "four"] {
        sidebar.dispatch(Command::AddTask(text.into())).unwrap();
    }
    sidebar.dispatch(Command::ToggleTask(1)).unwrap();
    sidebar
        .dispatch(Command::EditTask {
            index: 2,
            text: "THREE".into(),
        })
        .unwrap();
    sidebar.dispatch(Command::DeleteTask(0)).unwrap();
    let expected = sidebar.tasks().unwrap().active_tasks().to_vec();

    let reloaded = visible_sidebar(dir.path());
    assert_eq!(reloaded.tasks().unwrap().active_tasks(), expected.as_slice());
    let texts: Vec<_> = expected.iter().map(|task| task.text.as_str()).collect();
    assert_eq!(texts, ["two", "THREE", "four"]);
    assert!(expected[0].completed);
}

#[test]
fn inline_edit_commits_on_list_switch() {
    let dir = tempfile::tempdir().unwrap();
    let mut sidebar = visible_sidebar(dir.path());
    sidebar.dispatch(Command::AddTask("draft".into())).unwrap();
    sidebar.dispatch(Command::AddList("Other".into())).unwrap();
    sidebar
        .dispatch(Command::SwitchList(ListDirection::Next))
        .unwrap();
    let active = sidebar.tasks().unwrap().active_list_name().to_string();
    assert_eq!(active, "Tasks");

    sidebar.dispatch(Command::BeginTaskEdit(0)).unwrap();
    sidebar
        .dispatch(Command::UpdateTaskEdit("final".into()))
        .unwrap();
    sidebar
        .dispatch(Command::SwitchList(ListDirection::Previous))
        .unwrap();

    let snapshot = DataStore::new(StoragePaths::new(dir.path()).data_file()).load();
    assert_eq!(snapshot.task_lists["Tasks"][0].text, "final");
    assert_eq!(snapshot.active_task_list, "Other");
}

#[test]
fn hide_completed_filters_without_reordering() {
    let mut lists = BTreeMap::new();
    lists.insert("Tasks".to_string(), Vec::new());
    let mut panel = TaskListPanel::new(lists, "Tasks");
    for text in ["a", "b", "c"] {
        panel.add_task(text);
    }
    panel.toggle_completion(1).unwrap();
    panel.set_hide_completed(true);

    let visible: Vec<_> = panel
        .visible_tasks()
        .into_iter()
        .map(|(index, task)| (index, task.text.clone()))
        .collect();
    assert_eq!(visible, [(0, "a".to_string()), (2, "c".to_string())]);
    assert_eq!(panel.active_tasks().len(), 3);
}

#[test]
fn last_list_cannot_be_deleted() {
    let dir = tempfile::tempdir().unwrap();
    let mut sidebar = visible_sidebar(dir.path());
    let err = sidebar
        .dispatch(Command::DeleteList("Tasks".into()))
        .unwrap_err();
    assert!(err.to_string().contains("last task list"));

    sidebar.dispatch(Command::AddList("Spare".into())).unwrap();
    let outcome = sidebar
        .dispatch(Command::DeleteList("Tasks".into()))
        .unwrap();
    assert_eq!(outcome, CommandOutcome::Applied);
    assert_eq!(sidebar.tasks().unwrap().list_names(), ["Spare"]);
}

#[test]
fn rename_keeps_tasks_and_rejects_duplicates() {
    let mut lists = BTreeMap::new();
    lists.insert("Home".to_string(), Vec::new());
    lists.insert("Work".to_string(), Vec::new());
    let mut panel = TaskListPanel::new(lists, "Work");
    panel.add_task("report");

    assert!(!panel.rename_list("Work", "Home").unwrap());
    assert!(panel.rename_list("Work", "Office").unwrap());
    assert_eq!(panel.active_list_name(), "Office");
    assert_eq!(panel.active_tasks()[0].text, "report");
    assert_eq!(
        panel.rename_list("Missing", "X"),
        Err(TaskPanelError::ListNotFound("Missing".to_string()))
    );
}
