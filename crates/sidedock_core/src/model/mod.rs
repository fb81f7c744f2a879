//! Typed records persisted by SideDock.
//!
//! # Responsibility
//! - Define the canonical shapes for tasks, task lists, notes and settings.
//! - Fill missing fields with defaults when reading loosely-shaped JSON.
//!
//! # Invariants
//! - A note is identified by its creation timestamp, never by position.
//! - A task is owned by exactly one list and identified by its position.

pub mod note;
pub mod settings;
pub mod task;
