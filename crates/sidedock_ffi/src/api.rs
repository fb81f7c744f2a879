//! FFI use-case API for the desktop host.
//!
//! # Responsibility
//! - Expose sidebar use cases to the host UI via FRB.
//! - Hold the single process-wide `Sidebar` behind a mutex.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Every call that touches the data file runs under the same lock, so the
//!   full save and the Zen single-note save never interleave.
//! - Failures are reported in the returned envelope, never thrown.

use sidedock_core::model::note::strip_tags;
use sidedock_core::service::note_panel::TagFilter;
use sidedock_core::service::pomodoro::PomodoroPhase;
use sidedock_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    Command, CommandOutcome, ListDirection, Playback, Settings, ShellState, Sidebar,
    SidebarError, SilentAudio, StoragePaths, TextAlignment, Theme, TriggerPosition, ZenExit,
    ZenSettings,
};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

const NOTE_PREVIEW_MAX_CHARS: usize = 80;

static SIDEBAR: Mutex<Option<Sidebar<SilentAudio>>> = Mutex::new(None);

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Returns an empty string on success and the error message otherwise.
/// Repeating the same `level + log_dir` is a no-op.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    let trimmed = log_dir.trim();
    if trimmed.is_empty() {
        return "log_dir cannot be empty".to_string();
    }
    match init_logging_inner(level.as_str(), Path::new(trimmed)) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Generic action envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    pub ok: bool,
    /// Note timestamp produced by the action, when there is one.
    pub timestamp: Option<String>,
    /// Human-readable message for diagnostics/UI.
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            timestamp: None,
            message: message.into(),
        }
    }

    fn with_timestamp(mut self, timestamp: Option<String>) -> Self {
        self.timestamp = timestamp;
        self
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            timestamp: None,
            message: message.into(),
        }
    }
}

/// Shell state after a visibility call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellResponse {
    /// `hidden|showing|visible|hiding`.
    pub state: String,
    /// Whether the call changed the state.
    pub changed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
    /// Position in the active list; stable until the list is mutated.
    pub index: u32,
    pub text: String,
    pub completed: bool,
}

/// Task panel projection for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskPanelView {
    pub lists: Vec<String>,
    pub active_list: String,
    pub hide_completed: bool,
    /// Active-list tasks passing the hide-completed filter.
    pub tasks: Vec<TaskItem>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteItem {
    pub timestamp: String,
    /// First line of the text with tags removed, capped for list display.
    pub preview: String,
}

/// Note search envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteSearchResponse {
    pub items: Vec<NoteItem>,
    /// Every known tag, sorted, for the tag filter box.
    pub tags: Vec<String>,
    pub message: String,
}

/// Zen countdown state after one tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZenTickResponse {
    pub ok: bool,
    /// `MM:SS` label.
    pub label: String,
    /// `work|break`.
    pub phase: String,
    /// Whether this tick ended a phase.
    pub phase_completed: bool,
    pub word_count: u32,
}

/// Settings dialog projection; enums travel as their snake_case names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsView {
    pub language: String,
    /// `light|dark`.
    pub theme: String,
    pub accent_color: String,
    pub light_background_color: String,
    pub light_text_color: String,
    pub dark_background_color: String,
    pub dark_text_color: String,
    /// `left|right`.
    pub trigger_pos: String,
    pub zen_font_family: String,
    pub zen_font_size: u32,
    pub zen_padding_horiz: u32,
    pub zen_padding_vert: u32,
    /// `left|center|right|justify`.
    pub zen_alignment: String,
    pub zen_bg_path: String,
    pub zen_editor_transparent: bool,
    pub zen_theme: String,
    /// Exactly two entries: tasks then notes.
    pub splitter_sizes: Vec<u32>,
}

/// Live Zen appearance, edited from the Zen settings dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZenSettingsView {
    pub font_family: String,
    pub font_size: u32,
    pub padding_horiz: u32,
    pub padding_vert: u32,
    pub alignment: String,
    pub bg_path: String,
    pub editor_transparent: bool,
    pub theme: String,
    pub accent_color: String,
}

/// Zen audio deck state after a playback call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZenAudioResponse {
    pub ok: bool,
    /// `stopped|single|playlist`.
    pub mode: String,
    pub current_index: Option<u32>,
    pub current_track: Option<String>,
    pub paused: bool,
    pub message: String,
}

/// Opens the sidebar over `data_dir`, or the default data directory.
///
/// Reopening replaces the previous instance after shutting it down.
#[flutter_rust_bridge::frb(sync)]
pub fn sidebar_open(data_dir: Option<String>) -> ActionResponse {
    let paths = match data_dir.as_deref().map(str::trim) {
        Some(dir) if !dir.is_empty() => StoragePaths::new(PathBuf::from(dir)),
        _ => StoragePaths::resolve(),
    };
    let root = paths.root().display().to_string();
    let mut guard = lock_sidebar();
    if let Some(previous) = guard.as_mut() {
        previous.shutdown();
    }
    *guard = Some(Sidebar::open(paths, SilentAudio));
    log::info!("event=ffi_open module=ffi status=ok");
    ActionResponse::success(format!("Sidebar opened at {root}."))
}

/// Persists everything and drops the sidebar.
#[flutter_rust_bridge::frb(sync)]
pub fn sidebar_shutdown() -> ActionResponse {
    let mut guard = lock_sidebar();
    match guard.take() {
        Some(mut sidebar) => {
            sidebar.shutdown();
            ActionResponse::success("Sidebar closed.")
        }
        None => ActionResponse::failure("sidebar is not open"),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn shell_toggle() -> ShellResponse {
    shell_call(|sidebar| sidebar.toggle().is_some())
}

/// Escape key or focus loss.
#[flutter_rust_bridge::frb(sync)]
pub fn shell_request_close() -> ShellResponse {
    shell_call(Sidebar::request_close)
}

/// Host reports the slide animation ended.
#[flutter_rust_bridge::frb(sync)]
pub fn shell_animation_finished() -> ShellResponse {
    shell_call(|sidebar| sidebar.animation_finished().is_some())
}

#[flutter_rust_bridge::frb(sync)]
pub fn task_add(text: String) -> ActionResponse {
    command(Command::AddTask(text))
}

#[flutter_rust_bridge::frb(sync)]
pub fn task_toggle(index: u32) -> ActionResponse {
    command(Command::ToggleTask(index as usize))
}

#[flutter_rust_bridge::frb(sync)]
pub fn task_edit(index: u32, text: String) -> ActionResponse {
    command(Command::EditTask {
        index: index as usize,
        text,
    })
}

/// Double-click on a task starts an inline edit session.
#[flutter_rust_bridge::frb(sync)]
pub fn task_edit_begin(index: u32) -> ActionResponse {
    command(Command::BeginTaskEdit(index as usize))
}

#[flutter_rust_bridge::frb(sync)]
pub fn task_edit_update(text: String) -> ActionResponse {
    command(Command::UpdateTaskEdit(text))
}

/// Commits the edit; blank text keeps the old task text.
#[flutter_rust_bridge::frb(sync)]
pub fn task_edit_finish() -> ActionResponse {
    command(Command::FinishTaskEdit)
}

#[flutter_rust_bridge::frb(sync)]
pub fn task_edit_cancel() -> ActionResponse {
    command(Command::CancelTaskEdit)
}

#[flutter_rust_bridge::frb(sync)]
pub fn task_delete(index: u32) -> ActionResponse {
    command(Command::DeleteTask(index as usize))
}

#[flutter_rust_bridge::frb(sync)]
pub fn task_set_hide_completed(hide: bool) -> ActionResponse {
    command(Command::SetHideCompleted(hide))
}

#[flutter_rust_bridge::frb(sync)]
pub fn task_list_switch(forward: bool) -> ActionResponse {
    let direction = if forward {
        ListDirection::Next
    } else {
        ListDirection::Previous
    };
    command(Command::SwitchList(direction))
}

#[flutter_rust_bridge::frb(sync)]
pub fn task_list_add(name: String) -> ActionResponse {
    command(Command::AddList(name))
}

#[flutter_rust_bridge::frb(sync)]
pub fn task_list_rename(old: String, new: String) -> ActionResponse {
    command(Command::RenameList { old, new })
}

#[flutter_rust_bridge::frb(sync)]
pub fn task_list_delete(name: String) -> ActionResponse {
    command(Command::DeleteList(name))
}

/// Current task panel contents; empty with a message while hidden.
#[flutter_rust_bridge::frb(sync)]
pub fn task_panel_view() -> TaskPanelView {
    let guard = lock_sidebar();
    let Some(panel) = guard.as_ref().and_then(Sidebar::tasks) else {
        return TaskPanelView {
            lists: Vec::new(),
            active_list: String::new(),
            hide_completed: false,
            tasks: Vec::new(),
            message: "task panel is not loaded".to_string(),
        };
    };
    TaskPanelView {
        lists: panel.list_names().into_iter().map(str::to_string).collect(),
        active_list: panel.active_list_name().to_string(),
        hide_completed: panel.hide_completed(),
        tasks: panel
            .visible_tasks()
            .into_iter()
            .map(|(index, task)| TaskItem {
                index: index as u32,
                text: task.text.clone(),
                completed: task.completed,
            })
            .collect(),
        message: String::new(),
    }
}

/// Editor typing; marks the status unsaved without writing.
#[flutter_rust_bridge::frb(sync)]
pub fn note_set_text(text: String) -> ActionResponse {
    command(Command::SetNoteText(text))
}

#[flutter_rust_bridge::frb(sync)]
pub fn note_select(timestamp: String) -> ActionResponse {
    command(Command::SelectNote(timestamp))
}

#[flutter_rust_bridge::frb(sync)]
pub fn note_new() -> ActionResponse {
    command(Command::NewNote)
}

/// Opaque splitter geometry the host wants restored on the next show.
#[flutter_rust_bridge::frb(sync)]
pub fn splitter_state_set(state: String) -> ActionResponse {
    command(Command::SetSplitterState(state))
}

/// Saves the editor; `timestamp` is the identity of the note just written.
#[flutter_rust_bridge::frb(sync)]
pub fn note_save() -> ActionResponse {
    command(Command::SaveNote)
}

#[flutter_rust_bridge::frb(sync)]
pub fn note_save_and_new() -> ActionResponse {
    command(Command::SaveNoteAndNew)
}

#[flutter_rust_bridge::frb(sync)]
pub fn note_delete(timestamp: String) -> ActionResponse {
    command(Command::DeleteNote(timestamp))
}

/// Searches notes by text and optional tag (`None` means all tags).
#[flutter_rust_bridge::frb(sync)]
pub fn note_search(query: String, tag: Option<String>) -> NoteSearchResponse {
    let filter = match tag.map(|tag| tag.trim().trim_start_matches('#').to_string()) {
        Some(tag) if !tag.is_empty() => TagFilter::Tag(tag),
        _ => TagFilter::All,
    };
    let guard = lock_sidebar();
    let Some(panel) = guard.as_ref().and_then(Sidebar::notes) else {
        return NoteSearchResponse {
            items: Vec::new(),
            tags: Vec::new(),
            message: "note panel is not loaded".to_string(),
        };
    };

    let items: Vec<NoteItem> = panel
        .search(query.trim(), &filter)
        .into_iter()
        .map(|note| NoteItem {
            timestamp: note.timestamp.clone(),
            preview: preview(&note.text),
        })
        .collect();
    let message = if items.is_empty() {
        "No results.".to_string()
    } else {
        format!("Found {} note(s).", items.len())
    };
    NoteSearchResponse {
        items,
        tags: panel.tags().iter().cloned().collect(),
        message,
    }
}

/// Starts the slide-out that hands the current note to Zen mode.
#[flutter_rust_bridge::frb(sync)]
pub fn zen_enter() -> ActionResponse {
    respond(with_sidebar(Sidebar::enter_zen), |()| {
        ActionResponse::success("Entering zen mode.")
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn zen_set_text(text: String) -> ActionResponse {
    respond(
        with_sidebar(|sidebar| {
            let zen = sidebar.zen_mut().ok_or(SidebarError::ZenNotActive)?;
            zen.set_text(text);
            Ok(())
        }),
        |()| ActionResponse::success("Zen text updated."),
    )
}

/// Leaves Zen mode; `save_and_new` opens the panel on a blank note.
#[flutter_rust_bridge::frb(sync)]
pub fn zen_exit(save_and_new: bool) -> ActionResponse {
    let exit = if save_and_new {
        ZenExit::SaveAndNew
    } else {
        ZenExit::Close
    };
    respond(with_sidebar(|sidebar| sidebar.exit_zen(exit)), |saved| {
        ActionResponse::success("Zen text saved.").with_timestamp(saved)
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn zen_pomodoro_toggle() -> ActionResponse {
    respond(
        with_sidebar(|sidebar| {
            let zen = sidebar.zen_mut().ok_or(SidebarError::ZenNotActive)?;
            Ok(zen.pomodoro_mut().toggle())
        }),
        |running| ActionResponse::success(if running { "running" } else { "paused" }),
    )
}

/// One host second of Zen time.
#[flutter_rust_bridge::frb(sync)]
pub fn zen_tick() -> ZenTickResponse {
    let result = with_sidebar(|sidebar| {
        let completed = sidebar.zen_tick().is_some();
        let zen = sidebar.zen().ok_or(SidebarError::ZenNotActive)?;
        let pomodoro = zen.pomodoro();
        Ok(ZenTickResponse {
            ok: true,
            label: pomodoro.label(),
            phase: phase_label(pomodoro.phase()).to_string(),
            phase_completed: completed,
            word_count: zen.word_count() as u32,
        })
    });
    result.unwrap_or_else(|_| ZenTickResponse {
        ok: false,
        label: String::new(),
        phase: String::new(),
        phase_completed: false,
        word_count: 0,
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn zen_toggle_track(index: u32) -> ActionResponse {
    respond(
        with_sidebar(|sidebar| sidebar.zen_toggle_track(index as usize)),
        |()| ActionResponse::success("Track toggled."),
    )
}

#[flutter_rust_bridge::frb(sync)]
pub fn zen_pomodoro_reset() -> ActionResponse {
    respond(with_sidebar(Sidebar::zen_pomodoro_reset), |()| {
        ActionResponse::success("Pomodoro reset.")
    })
}

/// Starts the playlist, or pauses/resumes it.
#[flutter_rust_bridge::frb(sync)]
pub fn zen_toggle_playlist() -> ZenAudioResponse {
    audio_call(|sidebar| {
        if sidebar.zen_toggle_playlist()? {
            Ok("Playlist toggled.")
        } else {
            Ok("No audio tracks found.")
        }
    })
}

/// Host reports the current track ended; the playlist moves on and wraps.
#[flutter_rust_bridge::frb(sync)]
pub fn zen_track_finished() -> ZenAudioResponse {
    audio_call(|sidebar| sidebar.zen_track_finished().map(|_| "Track finished."))
}

#[flutter_rust_bridge::frb(sync)]
pub fn zen_settings_get() -> Option<ZenSettingsView> {
    let guard = lock_sidebar();
    let zen = guard.as_ref()?.zen()?;
    Some(zen_settings_view(zen.settings()))
}

/// Applies Zen appearance live; persisted when Zen mode closes.
#[flutter_rust_bridge::frb(sync)]
pub fn zen_settings_update(view: ZenSettingsView) -> ActionResponse {
    let settings = match parse_zen_settings(view) {
        Ok(settings) => settings,
        Err(message) => return ActionResponse::failure(message),
    };
    respond(
        with_sidebar(|sidebar| sidebar.update_zen_settings(settings)),
        |()| ActionResponse::success("Zen settings applied."),
    )
}

/// Current settings, or defaults when the sidebar is not open.
#[flutter_rust_bridge::frb(sync)]
pub fn settings_get() -> SettingsView {
    let guard = lock_sidebar();
    match guard.as_ref() {
        Some(sidebar) => settings_view(sidebar.settings()),
        None => settings_view(&Settings::default()),
    }
}

/// Replaces and persists the settings; a bad value rejects the whole update.
#[flutter_rust_bridge::frb(sync)]
pub fn settings_update(view: SettingsView) -> ActionResponse {
    let settings = match parse_settings(view) {
        Ok(settings) => settings,
        Err(message) => return ActionResponse::failure(message),
    };
    respond(
        with_sidebar(|sidebar| sidebar.update_settings(settings)),
        |()| ActionResponse::success("Settings saved."),
    )
}

/// Language codes with a readable file, sorted.
#[flutter_rust_bridge::frb(sync)]
pub fn available_languages() -> Vec<String> {
    let guard = lock_sidebar();
    match guard.as_ref() {
        Some(sidebar) => sidebar.context().localizer().available_languages(),
        None => Vec::new(),
    }
}

/// Saves, then copies the data file to its backup.
#[flutter_rust_bridge::frb(sync)]
pub fn backup_now() -> ActionResponse {
    respond(with_sidebar(Sidebar::backup_tick), |created| {
        ActionResponse::success(if created {
            "Backup created."
        } else {
            "Nothing to back up."
        })
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn restore_backup() -> ActionResponse {
    respond(with_sidebar(Sidebar::restore_backup), |()| {
        ActionResponse::success("Backup restored.")
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn export_notes(target_path: String) -> ActionResponse {
    respond(
        with_sidebar(|sidebar| sidebar.export_notes(Path::new(target_path.trim()))),
        |count| ActionResponse::success(format!("Exported {count} note(s).")),
    )
}

/// Localized UI string; falls back to the key itself.
#[flutter_rust_bridge::frb(sync)]
pub fn translate(key: String) -> String {
    let guard = lock_sidebar();
    match guard.as_ref() {
        Some(sidebar) => sidebar.context().tr(&key),
        None => key,
    }
}

fn lock_sidebar() -> MutexGuard<'static, Option<Sidebar<SilentAudio>>> {
    SIDEBAR.lock().unwrap_or_else(PoisonError::into_inner)
}

fn with_sidebar<T>(
    f: impl FnOnce(&mut Sidebar<SilentAudio>) -> Result<T, SidebarError>,
) -> Result<T, String> {
    let mut guard = lock_sidebar();
    let sidebar = guard
        .as_mut()
        .ok_or_else(|| "sidebar is not open".to_string())?;
    f(sidebar).map_err(|err| err.to_string())
}

fn respond<T>(
    result: Result<T, String>,
    on_success: impl FnOnce(T) -> ActionResponse,
) -> ActionResponse {
    match result {
        Ok(value) => on_success(value),
        Err(message) => {
            log::warn!("event=ffi_call module=ffi status=error");
            ActionResponse::failure(message)
        }
    }
}

fn command(command: Command) -> ActionResponse {
    respond(with_sidebar(|sidebar| sidebar.dispatch(command)), |outcome| match outcome {
        CommandOutcome::Applied => ActionResponse::success("Applied."),
        CommandOutcome::Ignored => ActionResponse::success("Ignored."),
        CommandOutcome::Saved(timestamp) => {
            ActionResponse::success("Note saved.").with_timestamp(Some(timestamp))
        }
    })
}

fn shell_call(f: impl FnOnce(&mut Sidebar<SilentAudio>) -> bool) -> ShellResponse {
    let mut guard = lock_sidebar();
    match guard.as_mut() {
        Some(sidebar) => {
            let changed = f(sidebar);
            ShellResponse {
                state: shell_label(sidebar.shell_state()).to_string(),
                changed,
            }
        }
        None => ShellResponse {
            state: shell_label(ShellState::Hidden).to_string(),
            changed: false,
        },
    }
}

fn audio_call(
    f: impl FnOnce(&mut Sidebar<SilentAudio>) -> Result<&'static str, SidebarError>,
) -> ZenAudioResponse {
    let result = with_sidebar(|sidebar| {
        let message = f(sidebar)?;
        let audio = sidebar.zen().ok_or(SidebarError::ZenNotActive)?.audio();
        let track = audio.current_track().map(|path| path.display().to_string());
        Ok((audio.playback(), track, message))
    });
    match result {
        Ok((playback, current_track, message)) => {
            let (mode, current_index, paused) = match playback {
                Playback::Stopped => ("stopped", None, false),
                Playback::Single { index, paused } => ("single", Some(index as u32), paused),
                Playback::Playlist { current, paused } => {
                    ("playlist", Some(current as u32), paused)
                }
            };
            ZenAudioResponse {
                ok: true,
                mode: mode.to_string(),
                current_index,
                current_track,
                paused,
                message: message.to_string(),
            }
        }
        Err(err) => ZenAudioResponse {
            ok: false,
            mode: "stopped".to_string(),
            current_index: None,
            current_track: None,
            paused: false,
            message: err.to_string(),
        },
    }
}

fn settings_view(settings: &Settings) -> SettingsView {
    SettingsView {
        language: settings.language.clone(),
        theme: theme_label(settings.theme).to_string(),
        accent_color: settings.accent_color.clone(),
        light_background_color: settings.light_background_color.clone(),
        light_text_color: settings.light_text_color.clone(),
        dark_background_color: settings.dark_background_color.clone(),
        dark_text_color: settings.dark_text_color.clone(),
        trigger_pos: match settings.trigger_pos {
            TriggerPosition::Left => "left",
            TriggerPosition::Right => "right",
        }
        .to_string(),
        zen_font_family: settings.zen_font_family.clone(),
        zen_font_size: settings.zen_font_size,
        zen_padding_horiz: settings.zen_padding_horiz,
        zen_padding_vert: settings.zen_padding_vert,
        zen_alignment: alignment_label(settings.zen_alignment).to_string(),
        zen_bg_path: settings.zen_bg_path.clone(),
        zen_editor_transparent: settings.zen_editor_transparent,
        zen_theme: theme_label(settings.zen_theme).to_string(),
        splitter_sizes: settings.splitter_sizes.to_vec(),
    }
}

fn parse_settings(view: SettingsView) -> Result<Settings, String> {
    let trigger_pos = match view.trigger_pos.trim() {
        "left" => TriggerPosition::Left,
        "right" => TriggerPosition::Right,
        other => return Err(format!("unknown trigger position `{other}`")),
    };
    let splitter_sizes: [u32; 2] = view
        .splitter_sizes
        .try_into()
        .map_err(|sizes: Vec<u32>| format!("expected 2 splitter sizes, got {}", sizes.len()))?;
    Ok(Settings {
        language: view.language.trim().to_string(),
        theme: parse_theme(&view.theme)?,
        accent_color: view.accent_color,
        light_background_color: view.light_background_color,
        light_text_color: view.light_text_color,
        dark_background_color: view.dark_background_color,
        dark_text_color: view.dark_text_color,
        trigger_pos,
        zen_font_family: view.zen_font_family,
        zen_font_size: view.zen_font_size,
        zen_padding_horiz: view.zen_padding_horiz,
        zen_padding_vert: view.zen_padding_vert,
        zen_alignment: parse_alignment(&view.zen_alignment)?,
        zen_bg_path: view.zen_bg_path,
        zen_editor_transparent: view.zen_editor_transparent,
        zen_theme: parse_theme(&view.zen_theme)?,
        splitter_sizes,
    })
}

fn zen_settings_view(settings: &ZenSettings) -> ZenSettingsView {
    ZenSettingsView {
        font_family: settings.font_family.clone(),
        font_size: settings.font_size,
        padding_horiz: settings.padding_horiz,
        padding_vert: settings.padding_vert,
        alignment: alignment_label(settings.alignment).to_string(),
        bg_path: settings.bg_path.clone(),
        editor_transparent: settings.editor_transparent,
        theme: theme_label(settings.theme).to_string(),
        accent_color: settings.accent_color.clone(),
    }
}

fn parse_zen_settings(view: ZenSettingsView) -> Result<ZenSettings, String> {
    Ok(ZenSettings {
        font_family: view.font_family,
        font_size: view.font_size,
        padding_horiz: view.padding_horiz,
        padding_vert: view.padding_vert,
        alignment: parse_alignment(&view.alignment)?,
        bg_path: view.bg_path,
        editor_transparent: view.editor_transparent,
        theme: parse_theme(&view.theme)?,
        accent_color: view.accent_color,
    })
}

fn theme_label(theme: Theme) -> &'static str {
    match theme {
        Theme::Light => "light",
        Theme::Dark => "dark",
    }
}

fn parse_theme(value: &str) -> Result<Theme, String> {
    match value.trim() {
        "light" => Ok(Theme::Light),
        "dark" => Ok(Theme::Dark),
        other => Err(format!("unknown theme `{other}`")),
    }
}

fn alignment_label(alignment: TextAlignment) -> &'static str {
    match alignment {
        TextAlignment::Left => "left",
        TextAlignment::Center => "center",
        TextAlignment::Right => "right",
        TextAlignment::Justify => "justify",
    }
}

fn parse_alignment(value: &str) -> Result<TextAlignment, String> {
    match value.trim() {
        "left" => Ok(TextAlignment::Left),
        "center" => Ok(TextAlignment::Center),
        "right" => Ok(TextAlignment::Right),
        "justify" => Ok(TextAlignment::Justify),
        other => Err(format!("unknown alignment `{other}`")),
    }
}

fn shell_label(state: ShellState) -> &'static str {
    match state {
        ShellState::Hidden => "hidden",
        ShellState::Showing => "showing",
        ShellState::Visible => "visible",
        ShellState::Hiding => "hiding",
    }
}

fn phase_label(phase: PomodoroPhase) -> &'static str {
    match phase {
        PomodoroPhase::Work => "work",
        PomodoroPhase::Break => "break",
    }
}

fn preview(text: &str) -> String {
    let stripped = strip_tags(text);
    let first_line = stripped
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or_default();
    let mut preview: String = first_line.chars().take(NOTE_PREVIEW_MAX_CHARS).collect();
    if first_line.chars().count() > NOTE_PREVIEW_MAX_CHARS {
        preview.push_str("...");
    }
    preview
}
