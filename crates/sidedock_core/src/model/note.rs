//! Note record, timestamp identity and tag derivation.
//!
//! # Responsibility
//! - Define the `{timestamp, text}` note record.
//! - Generate second-resolution timestamps that never collide.
//! - Derive `#tag` tokens from note text.
//!
//! # Invariants
//! - `timestamp` is assigned once at creation and used as identity.
//! - Tags are derived from text and never stored.

use chrono::{Duration, Local, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Format shared by persisted timestamps and exports.
pub const NOTE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"#(\w+)").expect("valid tag regex"));

/// One note entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Creation time formatted with [`NOTE_TIMESTAMP_FORMAT`]; stable identity.
    pub timestamp: String,
    /// Note body (markdown source).
    #[serde(default)]
    pub text: String,
}

impl Note {
    pub fn new(timestamp: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            text: text.into(),
        }
    }

    /// Returns tags found in this note's text.
    pub fn tags(&self) -> BTreeSet<String> {
        extract_tags(&self.text)
    }

    /// Whether the literal token `#tag` appears in the text.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.text.contains(&format!("#{tag}"))
    }
}

/// Source of "now" for timestamp generation.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Wall clock in local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Clock pinned to one instant. Collision handling still yields unique stamps.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Formats `now` and advances it one second at a time until no note in
/// `notes` already carries the result.
pub fn unique_timestamp(now: NaiveDateTime, notes: &[Note]) -> String {
    let mut candidate = now;
    loop {
        let formatted = candidate.format(NOTE_TIMESTAMP_FORMAT).to_string();
        if !notes.iter().any(|note| note.timestamp == formatted) {
            return formatted;
        }
        candidate += Duration::seconds(1);
    }
}

/// Extracts the set of `#word` tags (without the leading `#`).
pub fn extract_tags(text: &str) -> BTreeSet<String> {
    TAG_RE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string()))
        .collect()
}

/// Removes every `#word` token from `text`.
pub fn strip_tags(text: &str) -> String {
    TAG_RE.replace_all(text, "").into_owned()
}

/// Sorts notes newest first. Timestamps sort lexically in chronological order.
pub fn sort_newest_first(notes: &mut [Note]) {
    notes.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}
