//! Core use-case services.
//!
//! # Responsibility
//! - Hold the panel, shell and Zen state machines.
//! - Orchestrate store calls into use-case level APIs through `Sidebar`.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod audio;
pub mod export;
pub mod note_panel;
pub mod pomodoro;
pub mod shell;
pub mod sidebar;
pub mod task_panel;
pub mod zen;
