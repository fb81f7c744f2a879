//! Task/note document persistence.
//!
//! # Responsibility
//! - Load task lists, the active list name and notes from the data file.
//! - Save them with read-modify-write so foreign keys survive.
//! - Save a single note without the full in-memory panel state.
//!
//! # Invariants
//! - A loaded snapshot always holds at least one list and a valid active name.
//! - Malformed records are skipped individually, never the whole document.
//! - `save_single_note` never changes an existing note's timestamp.

use super::{read_json_object, write_json_pretty, StoreError, StoreResult};
use crate::model::note::{unique_timestamp, Clock, Note, SystemClock};
use crate::model::task::{default_task_lists, Task, TaskLists, DEFAULT_TASK_LIST_NAME};
use log::{error, info, warn};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::time::Instant;

const KEY_TASK_LISTS: &str = "task_lists";
const KEY_ACTIVE_TASK_LIST: &str = "active_task_list";
const KEY_NOTES: &str = "notes";
const KEY_SPLITTER_STATE: &str = "splitter_state";
const LEGACY_KEY_TASKS: &str = "tasks";

/// Content loaded from the data file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSnapshot {
    pub task_lists: TaskLists,
    /// Name of the displayed list; always a key of `task_lists` after load.
    pub active_task_list: String,
    /// Notes in file order.
    pub notes: Vec<Note>,
    /// Opaque hex blob owned by the host's splitter widget.
    pub splitter_state: Option<String>,
}

impl Default for DataSnapshot {
    fn default() -> Self {
        Self {
            task_lists: default_task_lists(),
            active_task_list: DEFAULT_TASK_LIST_NAME.to_string(),
            notes: Vec::new(),
            splitter_state: None,
        }
    }
}

impl DataSnapshot {
    /// Restores the list invariants: one list at least, active name valid.
    pub fn normalize(&mut self) {
        if self.task_lists.is_empty() {
            self.task_lists = default_task_lists();
        }
        if !self.task_lists.contains_key(&self.active_task_list) {
            self.active_task_list = self
                .task_lists
                .keys()
                .next()
                .cloned()
                .unwrap_or_else(|| DEFAULT_TASK_LIST_NAME.to_string());
        }
    }
}

/// Data file store.
#[derive(Debug, Clone)]
pub struct DataStore<C: Clock = SystemClock> {
    path: PathBuf,
    clock: C,
}

impl DataStore<SystemClock> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_clock(path, SystemClock)
    }
}

impl<C: Clock> DataStore<C> {
    /// Creates a store whose new note timestamps come from `clock`.
    pub fn with_clock(path: impl Into<PathBuf>, clock: C) -> Self {
        Self {
            path: path.into(),
            clock,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Loads the data file; missing or corrupt files yield an empty snapshot.
    pub fn load(&self) -> DataSnapshot {
        let started_at = Instant::now();
        let Some(doc) = read_json_object(&self.path, "data") else {
            info!("event=data_load module=data status=empty");
            return DataSnapshot::default();
        };

        let mut snapshot = DataSnapshot {
            task_lists: parse_task_lists(&doc),
            active_task_list: doc
                .get(KEY_ACTIVE_TASK_LIST)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            notes: parse_records::<Note>(doc.get(KEY_NOTES), "note")
                .into_iter()
                .filter(|note| {
                    let keep = !note.timestamp.trim().is_empty();
                    if !keep {
                        warn!("event=record_skip module=data kind=note error_code=blank_timestamp");
                    }
                    keep
                })
                .collect(),
            splitter_state: doc
                .get(KEY_SPLITTER_STATE)
                .and_then(Value::as_str)
                .map(str::to_string),
        };
        snapshot.normalize();

        info!(
            "event=data_load module=data status=ok lists={} notes={} duration_ms={}",
            snapshot.task_lists.len(),
            snapshot.notes.len(),
            started_at.elapsed().as_millis()
        );
        snapshot
    }

    /// Saves task lists, active list name and notes over the current document.
    pub fn save(
        &self,
        task_lists: &TaskLists,
        active_task_list: &str,
        notes: &[Note],
    ) -> StoreResult<()> {
        self.write_fields(task_lists, active_task_list, notes, None)
    }

    /// Saves a whole snapshot, including the splitter state when known.
    pub fn save_snapshot(&self, snapshot: &DataSnapshot) -> StoreResult<()> {
        self.write_fields(
            &snapshot.task_lists,
            &snapshot.active_task_list,
            &snapshot.notes,
            snapshot.splitter_state.as_deref(),
        )
    }

    /// Updates or inserts one note directly in the data file.
    ///
    /// Returns `Ok(None)` without touching the file when `timestamp` is `None`
    /// and `text` is blank. Otherwise returns the timestamp now holding `text`:
    /// the given one if a note matched, or a freshly generated one.
    pub fn save_single_note(
        &self,
        timestamp: Option<&str>,
        text: &str,
    ) -> StoreResult<Option<String>> {
        let text = text.trim();
        let timestamp = timestamp.filter(|value| !value.trim().is_empty());
        if timestamp.is_none() && text.is_empty() {
            return Ok(None);
        }

        let mut doc = read_json_object(&self.path, "data").unwrap_or_default();
        let mut notes = parse_records::<Note>(doc.get(KEY_NOTES), "note");

        let position =
            timestamp.and_then(|ts| notes.iter().position(|note| note.timestamp == ts));
        let saved_timestamp = match position {
            Some(index) => {
                notes[index].text = text.to_string();
                notes[index].timestamp.clone()
            }
            None => {
                let fresh = unique_timestamp(self.clock.now(), &notes);
                notes.push(Note::new(fresh.clone(), text));
                fresh
            }
        };

        doc.insert(KEY_NOTES.to_string(), to_value(&self.path, &notes)?);
        write_json_pretty(&self.path, &Value::Object(doc))?;
        info!(
            "event=note_save_single module=data status=ok notes={} text_len={}",
            notes.len(),
            text.chars().count()
        );
        Ok(Some(saved_timestamp))
    }

    fn write_fields(
        &self,
        task_lists: &TaskLists,
        active_task_list: &str,
        notes: &[Note],
        splitter_state: Option<&str>,
    ) -> StoreResult<()> {
        let started_at = Instant::now();
        let mut doc: Map<String, Value> = read_json_object(&self.path, "data").unwrap_or_default();
        doc.remove(LEGACY_KEY_TASKS);
        doc.insert(KEY_TASK_LISTS.to_string(), to_value(&self.path, task_lists)?);
        doc.insert(
            KEY_ACTIVE_TASK_LIST.to_string(),
            Value::String(active_task_list.to_string()),
        );
        doc.insert(KEY_NOTES.to_string(), to_value(&self.path, notes)?);
        if let Some(state) = splitter_state {
            doc.insert(KEY_SPLITTER_STATE.to_string(), Value::String(state.to_string()));
        }

        match write_json_pretty(&self.path, &Value::Object(doc)) {
            Ok(()) => {
                info!(
                    "event=data_save module=data status=ok lists={} notes={} duration_ms={}",
                    task_lists.len(),
                    notes.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!("event=data_save module=data status=error error={err}");
                Err(err)
            }
        }
    }
}

fn to_value<T: serde::Serialize + ?Sized>(path: &Path, value: &T) -> StoreResult<Value> {
    serde_json::to_value(value).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_task_lists(doc: &Map<String, Value>) -> TaskLists {
    match doc.get(KEY_TASK_LISTS) {
        Some(Value::Object(lists)) => lists
            .iter()
            .map(|(name, entries)| (name.clone(), parse_records::<Task>(Some(entries), "task")))
            .collect(),
        Some(_) => {
            warn!("event=record_skip module=data kind=task_lists error_code=not_an_object");
            TaskLists::new()
        }
        None => match doc.get(LEGACY_KEY_TASKS) {
            Some(legacy) => {
                let tasks = parse_records::<Task>(Some(legacy), "task");
                info!(
                    "event=legacy_migrate module=data status=ok tasks={}",
                    tasks.len()
                );
                let mut lists = TaskLists::new();
                lists.insert(DEFAULT_TASK_LIST_NAME.to_string(), tasks);
                lists
            }
            None => TaskLists::new(),
        },
    }
}

fn parse_records<T: DeserializeOwned>(value: Option<&Value>, kind: &str) -> Vec<T> {
    let Some(value) = value else {
        return Vec::new();
    };
    let Value::Array(items) = value else {
        warn!("event=record_skip module=data kind={kind} error_code=not_an_array");
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| match T::deserialize(item) {
            Ok(record) => Some(record),
            Err(err) => {
                warn!("event=record_skip module=data kind={kind} error={err}");
                None
            }
        })
        .collect()
}
