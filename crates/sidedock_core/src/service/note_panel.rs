//! Note panel state: editing session, search and tag filtering.
//!
//! # Responsibility
//! - Track which note the editor is bound to and whether its buffer is dirty.
//! - Create/update/delete notes and keep the accumulated tag set.
//! - Evaluate the search + tag filter over the note collection.
//!
//! # Invariants
//! - Notes are kept newest first; timestamps are unique and never rewritten.
//! - Switching selection while dirty saves the previous buffer first.
//! - The tag set only grows between loads (union on save, no pruning).

use crate::model::note::{
    extract_tags, sort_newest_first, unique_timestamp, Clock, Note, SystemClock,
};
use log::debug;
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Tag dropdown selection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TagFilter {
    #[default]
    All,
    Tag(String),
}

impl TagFilter {
    fn accepts(&self, note: &Note) -> bool {
        match self {
            Self::All => true,
            Self::Tag(tag) => note.has_tag(tag),
        }
    }
}

/// Editor session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorState {
    /// Nothing bound and nothing typed.
    Empty,
    /// Buffer differs from the last saved text.
    Editing,
    /// Bound to a note and in sync with it.
    Clean,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotePanelError {
    NoteNotFound(String),
}

impl Display for NotePanelError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoteNotFound(timestamp) => write!(f, "note not found: `{timestamp}`"),
        }
    }
}

impl Error for NotePanelError {}

/// Text handed to Zen mode and the note it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZenSnapshot {
    pub text: String,
    /// `None` means the Zen text becomes a new note.
    pub origin: Option<String>,
}

/// In-memory notes plus one editor session.
#[derive(Debug, Clone)]
pub struct NotePanel<C: Clock = SystemClock> {
    notes: Vec<Note>,
    tags: BTreeSet<String>,
    bound: Option<String>,
    buffer: String,
    saved_text: String,
    clock: C,
}

impl NotePanel<SystemClock> {
    pub fn new(notes: Vec<Note>) -> Self {
        Self::with_clock(notes, SystemClock)
    }
}

impl<C: Clock> NotePanel<C> {
    /// Loads `notes`, sorting newest first and computing the tag set.
    pub fn with_clock(mut notes: Vec<Note>, clock: C) -> Self {
        sort_newest_first(&mut notes);
        let mut panel = Self {
            notes,
            tags: BTreeSet::new(),
            bound: None,
            buffer: String::new(),
            saved_text: String::new(),
            clock,
        };
        panel.rebuild_tags();
        panel
    }

    /// Notes newest first.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn note(&self, timestamp: &str) -> Option<&Note> {
        self.notes.iter().find(|note| note.timestamp == timestamp)
    }

    /// Every tag seen since load, sorted.
    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    /// Recomputes the tag set from current notes only.
    pub fn rebuild_tags(&mut self) {
        self.tags = self.notes.iter().flat_map(Note::tags).collect();
    }

    pub fn state(&self) -> EditorState {
        if self.is_dirty() {
            EditorState::Editing
        } else if self.bound.is_some() {
            EditorState::Clean
        } else {
            EditorState::Empty
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.buffer.trim() != self.saved_text.trim()
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn bound_timestamp(&self) -> Option<&str> {
        self.bound.as_deref()
    }

    /// Replaces the editor buffer (user typing).
    pub fn set_buffer(&mut self, text: impl Into<String>) {
        self.buffer = text.into();
    }

    /// Binds the editor to `timestamp`, auto-saving a dirty buffer first.
    pub fn select(&mut self, timestamp: &str) -> Result<(), NotePanelError> {
        let text = self
            .note(timestamp)
            .map(|note| note.text.clone())
            .ok_or_else(|| NotePanelError::NoteNotFound(timestamp.to_string()))?;
        self.save_if_dirty();
        self.bound = Some(timestamp.to_string());
        self.buffer = text.clone();
        self.saved_text = text;
        Ok(())
    }

    /// Unbinds and blanks the editor; unless `force`, a dirty buffer is saved.
    pub fn clear_for_new_note(&mut self, force: bool) {
        if !force {
            self.save_if_dirty();
        }
        self.bound = None;
        self.buffer.clear();
        self.saved_text.clear();
    }

    /// Saves the buffer to the bound note or to a new one.
    ///
    /// Returns the saved note's timestamp, or `None` when nothing is bound and
    /// the trimmed buffer is empty.
    pub fn save(&mut self) -> Option<String> {
        let text = self.buffer.trim().to_string();
        if self.bound.is_none() && text.is_empty() {
            return None;
        }
        self.tags.extend(extract_tags(&text));

        let bound_index = self
            .bound
            .as_deref()
            .and_then(|ts| self.notes.iter().position(|note| note.timestamp == ts));
        let timestamp = match bound_index {
            Some(index) => {
                self.notes[index].text = text.clone();
                self.notes[index].timestamp.clone()
            }
            None => {
                let timestamp = unique_timestamp(self.clock.now(), &self.notes);
                self.notes.push(Note::new(timestamp.clone(), text.clone()));
                sort_newest_first(&mut self.notes);
                timestamp
            }
        };

        debug!(
            "event=note_save module=notes status=ok notes={} text_len={}",
            self.notes.len(),
            text.chars().count()
        );
        self.bound = Some(timestamp.clone());
        self.saved_text = text;
        Some(timestamp)
    }

    pub fn save_if_dirty(&mut self) -> Option<String> {
        if self.is_dirty() {
            self.save()
        } else {
            None
        }
    }

    /// Saves, then starts a blank unbound note.
    pub fn save_and_new(&mut self) -> Option<String> {
        let saved = self.save();
        self.clear_for_new_note(true);
        saved
    }

    /// Removes the note; unbinds the editor first if it was bound to it.
    pub fn delete(&mut self, timestamp: &str) -> Result<Note, NotePanelError> {
        let index = self
            .notes
            .iter()
            .position(|note| note.timestamp == timestamp)
            .ok_or_else(|| NotePanelError::NoteNotFound(timestamp.to_string()))?;
        if self.bound.as_deref() == Some(timestamp) {
            self.clear_for_new_note(true);
        }
        debug!("event=note_delete module=notes status=ok");
        Ok(self.notes.remove(index))
    }

    /// Notes matching `query` (case-insensitive over timestamp + text) and
    /// `tag`, newest first.
    pub fn search(&self, query: &str, tag: &TagFilter) -> Vec<&Note> {
        let needle = query.to_lowercase();
        self.notes
            .iter()
            .filter(|note| {
                let haystack = format!("{} {}", note.timestamp, note.text).to_lowercase();
                haystack.contains(&needle) && tag.accepts(note)
            })
            .collect()
    }

    /// Saves pending edits and captures the text for Zen mode.
    pub fn zen_snapshot(&mut self) -> ZenSnapshot {
        self.save_if_dirty();
        ZenSnapshot {
            text: self.buffer.clone(),
            origin: self.bound.clone(),
        }
    }
}
