//! Task and task-list records.
//!
//! # Responsibility
//! - Define the `{text, completed}` record stored per list entry.
//! - Provide the name→tasks mapping type used by storage and panels.
//!
//! # Invariants
//! - Task order inside a list is display order and must survive round trips.
//! - List names are unique keys; `BTreeMap` keeps them sorted for cycling.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Name used when storage holds no list at all.
pub const DEFAULT_TASK_LIST_NAME: &str = "Tasks";

/// Named task lists keyed by unique list name.
pub type TaskLists = BTreeMap<String, Vec<Task>>;

/// One to-do entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Display text. Never blank for tasks created through the panel.
    pub text: String,
    /// Completion flag. Older documents may omit it.
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    /// Creates an open (not completed) task.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            completed: false,
        }
    }

    /// Flips completion and returns the new value.
    pub fn toggle(&mut self) -> bool {
        self.completed = !self.completed;
        self.completed
    }
}

/// Returns a list map holding one empty default list.
pub fn default_task_lists() -> TaskLists {
    let mut lists = TaskLists::new();
    lists.insert(DEFAULT_TASK_LIST_NAME.to_string(), Vec::new());
    lists
}

#[cfg(test)]
mod tests {
    use super::{default_task_lists, Task, DEFAULT_TASK_LIST_NAME};

    #[test]
    fn new_task_starts_open() {
        let task = Task::new("Buy milk");
        assert!(!task.completed);
    }

    #[test]
    fn completed_defaults_to_false_when_missing() {
        let task: Task = serde_json::from_str(r#"{"text":"legacy"}"#).unwrap();
        assert_eq!(task, Task::new("legacy"));
    }

    #[test]
    fn default_lists_hold_one_empty_list() {
        let lists = default_task_lists();
        assert_eq!(lists.len(), 1);
        assert!(lists[DEFAULT_TASK_LIST_NAME].is_empty());
    }
}
