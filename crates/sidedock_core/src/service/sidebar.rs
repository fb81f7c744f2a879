//! Sidebar orchestration.
//!
//! # Responsibility
//! - Drive the shell state machine and load/release panel state with it.
//! - Route user commands to the task and note panels and persist after
//!   every mutation.
//! - Hand notes to Zen mode and fold the Zen outcome back into storage.
//! - Run backup, restore and Markdown export against the data file.
//!
//! # Invariants
//! - Panels are loaded only while the shell is not `Hidden`.
//! - Zen mode and a visible shell never coexist.
//! - The audio backend is owned by exactly one of the sidebar or the
//!   active Zen session.

use crate::config::StoragePaths;
use crate::context::AppContext;
use crate::locale::LocaleError;
use crate::model::settings::{Settings, ZenSettings};
use crate::service::audio::{
    discover_tracks, AudioBackend, AudioDeck, AudioError, Playback, SilentAudio,
};
use crate::service::export::{render_markdown, ExportLabels};
use crate::service::note_panel::{NotePanel, NotePanelError, ZenSnapshot};
use crate::service::pomodoro::PhaseCompleted;
use crate::service::shell::{Shell, ShellState, SlideEdge};
use crate::service::task_panel::{ListDirection, TaskListPanel, TaskPanelError};
use crate::service::zen::{ZenExit, ZenSession};
use crate::store::backup::{create_backup, restore_from_backup};
use crate::store::data_store::DataSnapshot;
use crate::store::StoreError;
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

/// Whether in-memory panel state matches the data file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveStatus {
    Saved,
    Unsaved,
}

/// User intent routed to the panels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddTask(String),
    ToggleTask(usize),
    EditTask { index: usize, text: String },
    DeleteTask(usize),
    BeginTaskEdit(usize),
    UpdateTaskEdit(String),
    FinishTaskEdit,
    CancelTaskEdit,
    SetHideCompleted(bool),
    SwitchList(ListDirection),
    AddList(String),
    RenameList { old: String, new: String },
    DeleteList(String),
    SetNoteText(String),
    SelectNote(String),
    NewNote,
    SaveNote,
    SaveNoteAndNew,
    DeleteNote(String),
    SetSplitterState(String),
}

/// What `dispatch` did with a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Applied,
    /// A note was written; carries the timestamp that now holds the text.
    Saved(String),
    /// Valid but a no-op (blank text, duplicate name, nothing to cancel).
    Ignored,
}

#[derive(Debug)]
pub enum SidebarError {
    Store(StoreError),
    Tasks(TaskPanelError),
    Notes(NotePanelError),
    Audio(AudioError),
    Locale(LocaleError),
    /// Command needs the panels but the shell is hidden.
    PanelsNotLoaded,
    ZenActive,
    ZenNotActive,
    NothingToExport,
}

impl Display for SidebarError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::Tasks(err) => write!(f, "{err}"),
            Self::Notes(err) => write!(f, "{err}"),
            Self::Audio(err) => write!(f, "{err}"),
            Self::Locale(err) => write!(f, "{err}"),
            Self::PanelsNotLoaded => write!(f, "panels are not loaded while the sidebar is hidden"),
            Self::ZenActive => write!(f, "zen mode is active"),
            Self::ZenNotActive => write!(f, "zen mode is not active"),
            Self::NothingToExport => write!(f, "no notes to export"),
        }
    }
}

impl Error for SidebarError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Tasks(err) => Some(err),
            Self::Notes(err) => Some(err),
            Self::Audio(err) => Some(err),
            Self::Locale(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for SidebarError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<TaskPanelError> for SidebarError {
    fn from(value: TaskPanelError) -> Self {
        Self::Tasks(value)
    }
}

impl From<NotePanelError> for SidebarError {
    fn from(value: NotePanelError) -> Self {
        Self::Notes(value)
    }
}

impl From<AudioError> for SidebarError {
    fn from(value: AudioError) -> Self {
        Self::Audio(value)
    }
}

impl From<LocaleError> for SidebarError {
    fn from(value: LocaleError) -> Self {
        Self::Locale(value)
    }
}

pub type SidebarResult<T> = Result<T, SidebarError>;

#[derive(Debug)]
struct Panels {
    tasks: TaskListPanel,
    notes: NotePanel,
    splitter_state: Option<String>,
}

impl Panels {
    fn snapshot(&self) -> DataSnapshot {
        DataSnapshot {
            task_lists: self.tasks.lists().clone(),
            active_task_list: self.tasks.active_list_name().to_string(),
            notes: self.notes.notes().to_vec(),
            splitter_state: self.splitter_state.clone(),
        }
    }
}

/// The whole sidebar application minus its widgets.
#[derive(Debug)]
pub struct Sidebar<B: AudioBackend = SilentAudio> {
    context: AppContext,
    shell: Shell,
    panels: Option<Panels>,
    status: SaveStatus,
    backend: Option<B>,
    zen: Option<ZenSession<B>>,
    pending_zen: Option<ZenSnapshot>,
    note_to_select: Option<String>,
}

impl<B: AudioBackend> Sidebar<B> {
    pub fn new(context: AppContext, backend: B) -> Self {
        let shell = Shell::new(context.settings().trigger_pos.into());
        Self {
            context,
            shell,
            panels: None,
            status: SaveStatus::Saved,
            backend: Some(backend),
            zen: None,
            pending_zen: None,
            note_to_select: None,
        }
    }

    pub fn open(paths: StoragePaths, backend: B) -> Self {
        Self::new(AppContext::open(paths), backend)
    }

    pub fn context(&self) -> &AppContext {
        &self.context
    }

    pub fn settings(&self) -> &Settings {
        self.context.settings()
    }

    pub fn shell_state(&self) -> ShellState {
        self.shell.state()
    }

    pub fn slide_edge(&self) -> SlideEdge {
        self.shell.edge()
    }

    pub fn status(&self) -> SaveStatus {
        self.status
    }

    pub fn tasks(&self) -> Option<&TaskListPanel> {
        self.panels.as_ref().map(|panels| &panels.tasks)
    }

    pub fn notes(&self) -> Option<&NotePanel> {
        self.panels.as_ref().map(|panels| &panels.notes)
    }

    pub fn splitter_state(&self) -> Option<&str> {
        self.panels
            .as_ref()
            .and_then(|panels| panels.splitter_state.as_deref())
    }

    pub fn zen(&self) -> Option<&ZenSession<B>> {
        self.zen.as_ref()
    }

    pub fn zen_mut(&mut self) -> Option<&mut ZenSession<B>> {
        self.zen.as_mut()
    }

    /// Timestamp the panel will select on its next load.
    pub fn note_to_select(&self) -> Option<&str> {
        self.note_to_select.as_deref()
    }

    /// Trigger activation. Ignored mid-animation and during Zen mode.
    pub fn toggle(&mut self) -> Option<ShellState> {
        if self.zen.is_some() {
            return None;
        }
        let next = self.shell.toggle()?;
        if next == ShellState::Showing {
            self.load_panels();
        }
        info!("event=shell_toggle module=sidebar status=ok state={next:?}");
        Some(next)
    }

    /// Escape key or focus loss.
    pub fn request_close(&mut self) -> bool {
        self.shell.request_close()
    }

    /// Host reports the running slide animation ended.
    pub fn animation_finished(&mut self) -> Option<ShellState> {
        let next = self.shell.animation_finished()?;
        if next == ShellState::Hidden {
            self.release_panels();
            if let Some(snapshot) = self.pending_zen.take() {
                self.start_zen(snapshot);
            }
        }
        Some(next)
    }

    fn load_panels(&mut self) {
        let snapshot = self.context.data_store().load();
        let mut notes = NotePanel::new(snapshot.notes);
        if let Some(timestamp) = self.note_to_select.take() {
            if let Err(err) = notes.select(&timestamp) {
                warn!("event=panels_load module=sidebar status=degraded error={err}");
            }
        }
        self.panels = Some(Panels {
            tasks: TaskListPanel::new(snapshot.task_lists, snapshot.active_task_list),
            notes,
            splitter_state: snapshot.splitter_state,
        });
        self.status = SaveStatus::Saved;
    }

    fn release_panels(&mut self) {
        if let Some(panels) = self.panels.as_mut() {
            panels.notes.save_if_dirty();
        }
        if let Err(err) = self.save_data() {
            error!("event=panels_release module=sidebar status=error error={err}");
        }
        self.panels = None;
    }

    /// Applies one user command; every state change is saved immediately.
    ///
    /// # Errors
    /// - `PanelsNotLoaded` while hidden.
    /// - Panel errors for bad positions or names.
    /// - `Store` when the follow-up save fails; the change stays in memory.
    pub fn dispatch(&mut self, command: Command) -> SidebarResult<CommandOutcome> {
        let panels = self.panels.as_mut().ok_or(SidebarError::PanelsNotLoaded)?;
        let mut saved_note = None;
        let changed = match command {
            Command::AddTask(text) => panels.tasks.add_task(&text),
            Command::ToggleTask(index) => {
                panels.tasks.toggle_completion(index)?;
                true
            }
            Command::EditTask { index, text } => panels.tasks.edit_task(index, &text)?,
            Command::DeleteTask(index) => {
                panels.tasks.delete_task(index)?;
                true
            }
            Command::BeginTaskEdit(index) => {
                panels.tasks.begin_edit(index)?;
                return Ok(CommandOutcome::Applied);
            }
            Command::UpdateTaskEdit(text) => {
                panels.tasks.update_edit(&text)?;
                return Ok(CommandOutcome::Applied);
            }
            Command::FinishTaskEdit => panels.tasks.finish_edit()?,
            Command::CancelTaskEdit => {
                return Ok(if panels.tasks.cancel_edit() {
                    CommandOutcome::Applied
                } else {
                    CommandOutcome::Ignored
                });
            }
            Command::SetHideCompleted(hide) => {
                panels.tasks.set_hide_completed(hide);
                return Ok(CommandOutcome::Applied);
            }
            Command::SwitchList(direction) => {
                panels.tasks.switch_list(direction);
                true
            }
            Command::AddList(name) => panels.tasks.add_list(&name),
            Command::RenameList { old, new } => panels.tasks.rename_list(&old, &new)?,
            Command::DeleteList(name) => {
                panels.tasks.delete_list(&name)?;
                true
            }
            Command::SetNoteText(text) => {
                panels.notes.set_buffer(text);
                if panels.notes.is_dirty() {
                    self.status = SaveStatus::Unsaved;
                }
                return Ok(CommandOutcome::Applied);
            }
            Command::SelectNote(timestamp) => {
                panels.notes.select(&timestamp)?;
                true
            }
            Command::NewNote => {
                panels.notes.clear_for_new_note(false);
                true
            }
            Command::SaveNote => {
                saved_note = panels.notes.save();
                saved_note.is_some()
            }
            Command::SaveNoteAndNew => {
                saved_note = panels.notes.save_and_new();
                true
            }
            Command::DeleteNote(timestamp) => {
                panels.notes.delete(&timestamp)?;
                true
            }
            Command::SetSplitterState(state) => {
                panels.splitter_state = Some(state);
                true
            }
        };

        if !changed {
            return Ok(CommandOutcome::Ignored);
        }
        self.save_data()?;
        Ok(saved_note.map_or(CommandOutcome::Applied, CommandOutcome::Saved))
    }

    /// Full save of loaded panel state. A no-op while hidden.
    pub fn save_data(&mut self) -> SidebarResult<()> {
        let Some(panels) = self.panels.as_ref() else {
            return Ok(());
        };
        match self.context.data_store().save_snapshot(&panels.snapshot()) {
            Ok(()) => {
                self.status = if panels.notes.is_dirty() {
                    SaveStatus::Unsaved
                } else {
                    SaveStatus::Saved
                };
                Ok(())
            }
            Err(err) => {
                self.status = SaveStatus::Unsaved;
                Err(err.into())
            }
        }
    }

    /// Hands the current note to Zen mode once the slide-out completes.
    ///
    /// # Errors
    /// - `ZenActive` when a session is already running.
    /// - `PanelsNotLoaded` while hidden.
    pub fn enter_zen(&mut self) -> SidebarResult<()> {
        if self.zen.is_some() || self.pending_zen.is_some() {
            return Err(SidebarError::ZenActive);
        }
        let panels = self.panels.as_mut().ok_or(SidebarError::PanelsNotLoaded)?;
        self.pending_zen = Some(panels.notes.zen_snapshot());
        if !self.shell.request_close() {
            warn!("event=zen_handoff module=sidebar status=deferred reason=shell_not_closable");
        }
        Ok(())
    }

    fn start_zen(&mut self, snapshot: ZenSnapshot) {
        let Some(backend) = self.backend.take() else {
            error!("event=zen_enter module=sidebar status=error reason=backend_unavailable");
            return;
        };
        let paths = self.context.paths();
        let deck = AudioDeck::new(backend, discover_tracks(&paths.audio_dir()));
        let session = ZenSession::new(snapshot, self.context.settings().zen(), deck)
            .with_cue(paths.pomodoro_cue_file());
        self.zen = Some(session);
    }

    /// Closes Zen mode, saves its text and slides the panel back in.
    ///
    /// Returns the timestamp now holding the Zen text, `None` when the text
    /// was blank with no origin.
    ///
    /// # Errors
    /// - `ZenNotActive` without a session.
    /// - `Store` when the note cannot be written; the session stays open.
    pub fn exit_zen(&mut self, exit: ZenExit) -> SidebarResult<Option<String>> {
        let zen = self.zen.take().ok_or(SidebarError::ZenNotActive)?;
        let result = self
            .context
            .data_store()
            .save_single_note(zen.origin(), zen.text());
        let saved = match result {
            Ok(saved) => saved,
            Err(err) => {
                self.zen = Some(zen);
                return Err(err.into());
            }
        };

        let zen_settings = zen.settings_changed().then(|| zen.settings().clone());
        let (outcome, backend) = zen.close(exit);
        self.backend = Some(backend);
        if let Some(zen_settings) = zen_settings {
            let mut settings = self.context.settings().clone();
            settings.apply_zen(&zen_settings);
            if let Err(err) = self.context.update_settings(settings) {
                warn!("event=zen_exit module=sidebar status=degraded stage=settings error={err}");
            }
        }

        self.note_to_select = if outcome.clear_origin {
            None
        } else {
            saved.clone()
        };
        self.toggle();
        Ok(saved)
    }

    /// One host second of Zen time.
    pub fn zen_tick(&mut self) -> Option<PhaseCompleted> {
        self.zen.as_mut().and_then(ZenSession::tick)
    }

    pub fn update_zen_settings(&mut self, settings: ZenSettings) -> SidebarResult<()> {
        let zen = self.zen.as_mut().ok_or(SidebarError::ZenNotActive)?;
        zen.update_settings(settings);
        Ok(())
    }

    /// Zen audio track button.
    pub fn zen_toggle_track(&mut self, index: usize) -> SidebarResult<()> {
        let zen = self.zen.as_mut().ok_or(SidebarError::ZenNotActive)?;
        zen.audio_mut().toggle_track(index)?;
        Ok(())
    }

    /// Zen playlist button. `false` when the audio folder had no tracks.
    pub fn zen_toggle_playlist(&mut self) -> SidebarResult<bool> {
        let zen = self.zen.as_mut().ok_or(SidebarError::ZenNotActive)?;
        Ok(zen.audio_mut().toggle_playlist())
    }

    /// Host reports the current track ended.
    pub fn zen_track_finished(&mut self) -> SidebarResult<Playback> {
        let zen = self.zen.as_mut().ok_or(SidebarError::ZenNotActive)?;
        zen.audio_mut().track_finished();
        Ok(zen.audio().playback())
    }

    pub fn zen_pomodoro_reset(&mut self) -> SidebarResult<()> {
        let zen = self.zen.as_mut().ok_or(SidebarError::ZenNotActive)?;
        zen.pomodoro_mut().reset();
        Ok(())
    }

    /// Replaces settings from the settings dialog.
    pub fn update_settings(&mut self, settings: Settings) -> SidebarResult<()> {
        let edge: SlideEdge = settings.trigger_pos.into();
        self.context.update_settings(settings)?;
        self.shell.set_edge(edge);
        Ok(())
    }

    /// Periodic backup: saves, then copies the data file aside.
    pub fn backup_tick(&mut self) -> SidebarResult<bool> {
        self.save_data()?;
        let paths = self.context.paths();
        Ok(create_backup(&paths.data_file(), &paths.backup_file())?)
    }

    /// Replaces the data file with the backup and reloads loaded panels.
    ///
    /// Unsaved in-memory edits are discarded.
    pub fn restore_backup(&mut self) -> SidebarResult<()> {
        let paths = self.context.paths();
        restore_from_backup(&paths.backup_file(), &paths.data_file())?;
        if self.panels.is_some() {
            self.note_to_select = None;
            self.load_panels();
        }
        Ok(())
    }

    /// Writes every note as Markdown to `target`. Returns the note count.
    ///
    /// # Errors
    /// - `NothingToExport` when there are no notes.
    /// - `Store` on write failure.
    pub fn export_notes(&mut self, target: &Path) -> SidebarResult<usize> {
        self.save_data()?;
        let notes = self.context.data_store().load().notes;
        let labels = ExportLabels {
            title: self.context.tr("export_title"),
            note_heading: self.context.tr("export_note_heading"),
        };
        let markdown = render_markdown(&notes, &labels).ok_or(SidebarError::NothingToExport)?;
        std::fs::write(target, markdown).map_err(|err| StoreError::io(target, err))?;
        info!(
            "event=notes_export module=sidebar status=ok count={} path={}",
            notes.len(),
            target.display()
        );
        Ok(notes.len())
    }

    /// Application quit: persists Zen text, panel data and settings.
    pub fn shutdown(&mut self) {
        if self.zen.is_some() {
            if let Err(err) = self.exit_zen(ZenExit::Close) {
                error!("event=shutdown module=sidebar status=error stage=zen error={err}");
            }
        }
        if let Some(panels) = self.panels.as_mut() {
            panels.notes.save_if_dirty();
        }
        if let Err(err) = self.save_data() {
            error!("event=shutdown module=sidebar status=error stage=data error={err}");
        }
        self.context.save_settings();
        info!("event=shutdown module=sidebar status=ok");
    }
}

#[cfg(test)]
mod tests {
    use super::{Command, CommandOutcome, SaveStatus, Sidebar, SidebarError};
    use crate::config::StoragePaths;
    use crate::service::audio::{Playback, SilentAudio};
    use crate::service::shell::ShellState;
    use crate::service::zen::ZenExit;

    fn open_visible(root: &std::path::Path) -> Sidebar<SilentAudio> {
        let mut sidebar = Sidebar::open(StoragePaths::new(root), SilentAudio);
        sidebar.toggle().unwrap();
        sidebar.animation_finished().unwrap();
        sidebar
    }

    #[test]
    fn hidden_sidebar_rejects_commands() {
        let dir = tempfile::tempdir().unwrap();
        let mut sidebar = Sidebar::open(StoragePaths::new(dir.path()), SilentAudio);
        let err = sidebar.dispatch(Command::AddTask("x".into())).unwrap_err();
        assert!(matches!(err, SidebarError::PanelsNotLoaded));
    }

    #[test]
    fn blank_task_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let mut sidebar = open_visible(dir.path());
        let outcome = sidebar.dispatch(Command::AddTask("   ".into())).unwrap();
        assert_eq!(outcome, CommandOutcome::Ignored);
    }

    #[test]
    fn typing_marks_unsaved_until_save() {
        let dir = tempfile::tempdir().unwrap();
        let mut sidebar = open_visible(dir.path());
        sidebar.dispatch(Command::SetNoteText("draft".into())).unwrap();
        assert_eq!(sidebar.status(), SaveStatus::Unsaved);
        let outcome = sidebar.dispatch(Command::SaveNote).unwrap();
        assert!(matches!(outcome, CommandOutcome::Saved(_)));
        assert_eq!(sidebar.status(), SaveStatus::Saved);
    }

    #[test]
    fn toggle_is_ignored_during_zen() {
        let dir = tempfile::tempdir().unwrap();
        let mut sidebar = open_visible(dir.path());
        sidebar.enter_zen().unwrap();
        assert_eq!(sidebar.shell_state(), ShellState::Hiding);
        sidebar.animation_finished().unwrap();
        assert!(sidebar.zen().is_some());
        assert_eq!(sidebar.toggle(), None);
        assert!(matches!(sidebar.enter_zen(), Err(SidebarError::ZenActive)));
        sidebar.exit_zen(ZenExit::Close).unwrap();
        assert_eq!(sidebar.shell_state(), ShellState::Showing);
    }

    #[test]
    fn zen_playlist_wraps_after_the_last_track() {
        let dir = tempfile::tempdir().unwrap();
        let audio = dir.path().join("zen_audio");
        std::fs::create_dir_all(&audio).unwrap();
        std::fs::write(audio.join("a.ogg"), b"").unwrap();
        std::fs::write(audio.join("b.wav"), b"").unwrap();
        let mut sidebar = open_visible(dir.path());
        assert!(matches!(
            sidebar.zen_toggle_playlist(),
            Err(SidebarError::ZenNotActive)
        ));

        sidebar.enter_zen().unwrap();
        sidebar.animation_finished().unwrap();
        assert!(sidebar.zen_toggle_playlist().unwrap());
        assert_eq!(
            sidebar.zen_track_finished().unwrap(),
            Playback::Playlist { current: 1, paused: false }
        );
        assert_eq!(
            sidebar.zen_track_finished().unwrap(),
            Playback::Playlist { current: 0, paused: false }
        );
    }

    #[test]
    fn zen_pomodoro_reset_stops_the_countdown() {
        let dir = tempfile::tempdir().unwrap();
        let mut sidebar = open_visible(dir.path());
        sidebar.enter_zen().unwrap();
        sidebar.animation_finished().unwrap();
        let zen = sidebar.zen_mut().unwrap();
        zen.pomodoro_mut().toggle();
        zen.tick();

        sidebar.zen_pomodoro_reset().unwrap();
        let pomodoro = sidebar.zen().unwrap().pomodoro();
        assert!(!pomodoro.is_running());
        assert_eq!(pomodoro.label(), "25:00");
    }
}
