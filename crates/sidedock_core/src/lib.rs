//! Core logic for SideDock, a slide-in desktop sidebar for tasks and notes.
//! This crate owns every invariant; UI hosts only render and forward input.

pub mod config;
pub mod context;
pub mod locale;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use config::StoragePaths;
pub use context::AppContext;
pub use locale::{LocaleError, Localizer};
pub use logging::{default_log_level, init_for_paths, init_logging, logging_status, LoggingError};
pub use model::note::{Clock, FixedClock, Note, SystemClock};
pub use model::settings::{Settings, TextAlignment, Theme, TriggerPosition, ZenSettings};
pub use model::task::{Task, TaskLists};
pub use service::audio::{AudioBackend, AudioDeck, Playback, SilentAudio};
pub use service::note_panel::{EditorState, NotePanel, TagFilter, ZenSnapshot};
pub use service::pomodoro::{Pomodoro, PomodoroPhase};
pub use service::shell::{ShellState, SlideEdge};
pub use service::sidebar::{Command, CommandOutcome, SaveStatus, Sidebar, SidebarError};
pub use service::task_panel::{ListDirection, TaskListPanel, TaskPanelError};
pub use service::zen::{ZenExit, ZenSession};
pub use store::data_store::{DataSnapshot, DataStore};
pub use store::settings_store::SettingsStore;
pub use store::{StoreError, StoreResult};

/// Minimal health-check API for host integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
