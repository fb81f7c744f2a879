//! Task list panel state.
//!
//! # Responsibility
//! - Hold every named list and which one is active.
//! - Apply add/edit/toggle/delete to the active list.
//! - Manage list creation, renaming, deletion and cycling.
//!
//! # Invariants
//! - At least one list always exists and `active` names one of them.
//! - The hide-completed filter never reorders tasks.
//! - A pending inline edit is committed before the active list changes.

use crate::model::task::{Task, TaskLists, DEFAULT_TASK_LIST_NAME};
use log::{debug, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Direction for cycling through sorted list names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListDirection {
    Previous,
    Next,
}

/// Errors from task panel operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskPanelError {
    /// No task at this position in the active list.
    TaskNotFound(usize),
    /// No list with this name.
    ListNotFound(String),
    /// Deleting would leave zero lists.
    LastListRemaining,
    /// `update_edit`/`finish_edit` without `begin_edit`.
    NoEditInProgress,
}

impl Display for TaskPanelError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TaskNotFound(index) => write!(f, "task not found at position {index}"),
            Self::ListNotFound(name) => write!(f, "task list not found: `{name}`"),
            Self::LastListRemaining => write!(f, "the last task list cannot be deleted"),
            Self::NoEditInProgress => write!(f, "no task edit in progress"),
        }
    }
}

impl Error for TaskPanelError {}

#[derive(Debug, Clone, PartialEq, Eq)]
struct InlineEdit {
    index: usize,
    buffer: String,
}

/// In-memory task lists bound to one active list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskListPanel {
    lists: TaskLists,
    active: String,
    hide_completed: bool,
    edit: Option<InlineEdit>,
}

impl TaskListPanel {
    /// Builds a panel, repairing an empty map or a dangling active name.
    pub fn new(mut lists: TaskLists, active: impl Into<String>) -> Self {
        if lists.is_empty() {
            lists.insert(DEFAULT_TASK_LIST_NAME.to_string(), Vec::new());
        }
        let mut active = active.into();
        if !lists.contains_key(&active) {
            active = lists.keys().next().cloned().unwrap_or_default();
        }
        Self {
            lists,
            active,
            hide_completed: false,
            edit: None,
        }
    }

    pub fn lists(&self) -> &TaskLists {
        &self.lists
    }

    /// List names in cycling order.
    pub fn list_names(&self) -> Vec<&str> {
        self.lists.keys().map(String::as_str).collect()
    }

    pub fn active_list_name(&self) -> &str {
        &self.active
    }

    pub fn active_tasks(&self) -> &[Task] {
        self.lists
            .get(&self.active)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Appends an open task; blank text is ignored.
    ///
    /// Returns whether a task was added.
    pub fn add_task(&mut self, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        let tasks = self.active_mut();
        tasks.push(Task::new(text));
        debug!("event=task_add module=tasks status=ok list_len={}", tasks.len());
        true
    }

    /// Flips completion of the task at `index`; returns the new state.
    pub fn toggle_completion(&mut self, index: usize) -> Result<bool, TaskPanelError> {
        let task = self
            .active_mut()
            .get_mut(index)
            .ok_or(TaskPanelError::TaskNotFound(index))?;
        Ok(task.toggle())
    }

    /// Replaces the text at `index` when `new_text` is non-blank and different.
    ///
    /// Returns whether the text changed.
    pub fn edit_task(&mut self, index: usize, new_text: &str) -> Result<bool, TaskPanelError> {
        let new_text = new_text.trim();
        let task = self
            .active_mut()
            .get_mut(index)
            .ok_or(TaskPanelError::TaskNotFound(index))?;
        if new_text.is_empty() || task.text == new_text {
            return Ok(false);
        }
        task.text = new_text.to_string();
        Ok(true)
    }

    /// Removes and returns the task at `index`.
    pub fn delete_task(&mut self, index: usize) -> Result<Task, TaskPanelError> {
        let tasks = self.active_mut();
        if index >= tasks.len() {
            return Err(TaskPanelError::TaskNotFound(index));
        }
        let removed = tasks.remove(index);
        if let Some(edit_index) = self.editing_index() {
            if edit_index == index {
                self.edit = None;
            } else if let Some(edit) = self.edit.as_mut().filter(|_| edit_index > index) {
                edit.index -= 1;
            }
        }
        debug!("event=task_delete module=tasks status=ok");
        Ok(removed)
    }

    pub fn hide_completed(&self) -> bool {
        self.hide_completed
    }

    pub fn set_hide_completed(&mut self, hide: bool) {
        self.hide_completed = hide;
    }

    /// Active-list tasks passing the filter, with their positions, in order.
    pub fn visible_tasks(&self) -> Vec<(usize, &Task)> {
        self.active_tasks()
            .iter()
            .enumerate()
            .filter(|(_, task)| !(self.hide_completed && task.completed))
            .collect()
    }

    /// Starts an inline edit of `index`, dropping any other edit in progress.
    pub fn begin_edit(&mut self, index: usize) -> Result<(), TaskPanelError> {
        let buffer = self
            .active_tasks()
            .get(index)
            .ok_or(TaskPanelError::TaskNotFound(index))?
            .text
            .clone();
        self.edit = Some(InlineEdit { index, buffer });
        Ok(())
    }

    pub fn update_edit(&mut self, text: &str) -> Result<(), TaskPanelError> {
        let edit = self.edit.as_mut().ok_or(TaskPanelError::NoEditInProgress)?;
        edit.buffer = text.to_string();
        Ok(())
    }

    /// Commits the inline edit through [`Self::edit_task`].
    pub fn finish_edit(&mut self) -> Result<bool, TaskPanelError> {
        let edit = self.edit.take().ok_or(TaskPanelError::NoEditInProgress)?;
        self.edit_task(edit.index, &edit.buffer)
    }

    /// Drops the inline edit; returns whether one was in progress.
    pub fn cancel_edit(&mut self) -> bool {
        self.edit.take().is_some()
    }

    pub fn editing_index(&self) -> Option<usize> {
        self.edit.as_ref().map(|edit| edit.index)
    }

    /// Activates the neighbouring list in sorted order, wrapping around.
    ///
    /// A pending inline edit is committed to the outgoing list first.
    pub fn switch_list(&mut self, direction: ListDirection) -> &str {
        if self.edit.is_some() {
            if let Err(err) = self.finish_edit() {
                warn!("event=task_edit_commit module=tasks status=dropped error={err}");
            }
        }

        let count = self.lists.len();
        if count == 0 {
            return &self.active;
        }
        let current = self
            .lists
            .keys()
            .position(|name| *name == self.active)
            .unwrap_or(0);
        let next = match direction {
            ListDirection::Next => (current + 1) % count,
            ListDirection::Previous => (current + count - 1) % count,
        };
        if let Some(name) = self.lists.keys().nth(next) {
            self.active = name.clone();
        }
        debug!("event=list_switch module=tasks status=ok lists={count}");
        &self.active
    }

    /// Creates an empty list and activates it.
    ///
    /// Blank or existing names are rejected silently (`false`).
    pub fn add_list(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || self.lists.contains_key(name) {
            return false;
        }
        self.edit = None;
        self.lists.insert(name.to_string(), Vec::new());
        self.active = name.to_string();
        true
    }

    /// Renames `old` to `new`, keeping its tasks and active status.
    ///
    /// Blank or existing target names are rejected silently (`Ok(false)`).
    pub fn rename_list(&mut self, old: &str, new: &str) -> Result<bool, TaskPanelError> {
        if !self.lists.contains_key(old) {
            return Err(TaskPanelError::ListNotFound(old.to_string()));
        }
        let new = new.trim();
        if new.is_empty() || self.lists.contains_key(new) {
            return Ok(false);
        }
        if let Some(tasks) = self.lists.remove(old) {
            self.lists.insert(new.to_string(), tasks);
        }
        if self.active == old {
            self.active = new.to_string();
        }
        Ok(true)
    }

    /// Deletes `name`; at least two lists must exist.
    ///
    /// Deleting the active list activates the first remaining name.
    pub fn delete_list(&mut self, name: &str) -> Result<Vec<Task>, TaskPanelError> {
        if !self.lists.contains_key(name) {
            return Err(TaskPanelError::ListNotFound(name.to_string()));
        }
        if self.lists.len() < 2 {
            return Err(TaskPanelError::LastListRemaining);
        }
        let removed = self.lists.remove(name).unwrap_or_default();
        if self.active == name {
            self.edit = None;
            self.active = self.lists.keys().next().cloned().unwrap_or_default();
        }
        Ok(removed)
    }

    fn active_mut(&mut self) -> &mut Vec<Task> {
        self.lists.entry(self.active.clone()).or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::{ListDirection, TaskListPanel, TaskPanelError};
    use crate::model::task::{default_task_lists, TaskLists};

    fn panel() -> TaskListPanel {
        TaskListPanel::new(default_task_lists(), "Tasks")
    }

    #[test]
    fn add_ignores_blank_text() {
        let mut panel = panel();
        assert!(!panel.add_task("   "));
        assert!(panel.add_task("  Buy milk "));
        assert_eq!(panel.active_tasks()[0].text, "Buy milk");
    }

    #[test]
    fn edit_rejects_blank_and_unchanged_text() {
        let mut panel = panel();
        panel.add_task("a");
        assert!(!panel.edit_task(0, "").unwrap());
        assert!(!panel.edit_task(0, "a").unwrap());
        assert!(panel.edit_task(0, "b").unwrap());
        assert_eq!(panel.edit_task(5, "c"), Err(TaskPanelError::TaskNotFound(5)));
    }

    #[test]
    fn filter_hides_completed_without_reordering() {
        let mut panel = panel();
        for text in ["one", "two", "three"] {
            panel.add_task(text);
        }
        panel.toggle_completion(1).unwrap();
        panel.set_hide_completed(true);
        let visible: Vec<usize> = panel.visible_tasks().iter().map(|(i, _)| *i).collect();
        assert_eq!(visible, vec![0, 2]);
        panel.set_hide_completed(false);
        assert_eq!(panel.visible_tasks().len(), 3);
    }

    #[test]
    fn switch_list_wraps_and_commits_pending_edit() {
        let mut lists = TaskLists::new();
        lists.insert("A".to_string(), Vec::new());
        lists.insert("B".to_string(), Vec::new());
        lists.insert("C".to_string(), Vec::new());
        let mut panel = TaskListPanel::new(lists, "A");
        panel.add_task("draft");
        panel.begin_edit(0).unwrap();
        panel.update_edit("final").unwrap();

        assert_eq!(panel.switch_list(ListDirection::Previous), "C");
        assert_eq!(panel.lists()["A"][0].text, "final");
        assert_eq!(panel.editing_index(), None);
        assert_eq!(panel.switch_list(ListDirection::Next), "A");
        assert_eq!(panel.switch_list(ListDirection::Next), "B");
    }

    #[test]
    fn begin_edit_replaces_previous_edit() {
        let mut panel = panel();
        panel.add_task("a");
        panel.add_task("b");
        panel.begin_edit(0).unwrap();
        panel.update_edit("changed").unwrap();
        panel.begin_edit(1).unwrap();
        assert!(!panel.finish_edit().unwrap());
        assert_eq!(panel.active_tasks()[0].text, "a");
        assert_eq!(panel.finish_edit(), Err(TaskPanelError::NoEditInProgress));
    }

    #[test]
    fn delete_shifts_pending_edit() {
        let mut panel = panel();
        panel.add_task("a");
        panel.add_task("b");
        panel.begin_edit(1).unwrap();
        panel.delete_task(0).unwrap();
        assert_eq!(panel.editing_index(), Some(0));
        panel.delete_task(0).unwrap();
        assert_eq!(panel.editing_index(), None);
    }

    #[test]
    fn add_and_rename_reject_existing_names_silently() {
        let mut panel = panel();
        assert!(panel.add_list("Work"));
        assert_eq!(panel.active_list_name(), "Work");
        assert!(!panel.add_list("Work"));
        assert!(!panel.add_list(" "));
        assert!(!panel.rename_list("Work", "Tasks").unwrap());
        assert!(panel.rename_list("Work", "Job").unwrap());
        assert_eq!(panel.active_list_name(), "Job");
        assert_eq!(
            panel.rename_list("Nope", "X"),
            Err(TaskPanelError::ListNotFound("Nope".to_string()))
        );
    }

    #[test]
    fn last_list_cannot_be_deleted() {
        let mut panel = panel();
        assert_eq!(
            panel.delete_list("Tasks"),
            Err(TaskPanelError::LastListRemaining)
        );
        panel.add_list("Work");
        panel.delete_list("Work").unwrap();
        assert_eq!(panel.active_list_name(), "Tasks");
        assert_eq!(panel.lists().len(), 1);
    }

    #[test]
    fn switch_with_blank_edit_keeps_text_and_clears_edit() {
        let mut panel = panel();
        panel.add_task("keep me");
        panel.add_list("Work");
        panel.switch_list(ListDirection::Next);
        assert_eq!(panel.active_list_name(), "Tasks");

        panel.begin_edit(0).unwrap();
        panel.update_edit("   ").unwrap();
        assert_eq!(panel.switch_list(ListDirection::Next), "Work");
        assert_eq!(panel.editing_index(), None);
        assert_eq!(panel.lists()["Tasks"][0].text, "keep me");
    }

    #[test]
    fn new_repairs_dangling_active_name() {
        let panel = TaskListPanel::new(TaskLists::new(), "ghost");
        assert_eq!(panel.active_list_name(), "Tasks");
    }
}
