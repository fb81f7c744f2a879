//! Distraction-free editing session.
//!
//! # Responsibility
//! - Hold the Zen text buffer, its origin note and its visual settings.
//! - Own the Pomodoro countdown and ambient audio deck for the session.
//! - Produce the outcome the shell folds back into the data file.
//!
//! # Invariants
//! - Closing always stops audio.
//! - `SaveAndNew` clears the origin; a plain close keeps it.

use crate::model::settings::ZenSettings;
use crate::service::audio::{AudioBackend, AudioDeck};
use crate::service::note_panel::ZenSnapshot;
use crate::service::pomodoro::{PhaseCompleted, Pomodoro};
use log::info;
use std::path::PathBuf;

/// How the session was dismissed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZenExit {
    /// Plain close; the panel re-selects the saved note.
    Close,
    /// Save and start a new note; the panel opens blank.
    SaveAndNew,
}

/// Result of closing a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZenOutcome {
    pub text: String,
    pub origin: Option<String>,
    /// Whether the panel should forget the origin note after saving.
    pub clear_origin: bool,
}

#[derive(Debug)]
pub struct ZenSession<B: AudioBackend> {
    text: String,
    origin: Option<String>,
    settings: ZenSettings,
    settings_changed: bool,
    pomodoro: Pomodoro,
    audio: AudioDeck<B>,
    cue: Option<PathBuf>,
}

impl<B: AudioBackend> ZenSession<B> {
    pub fn new(snapshot: ZenSnapshot, settings: ZenSettings, audio: AudioDeck<B>) -> Self {
        info!(
            "event=zen_enter module=zen status=ok has_origin={} tracks={}",
            snapshot.origin.is_some(),
            audio.tracks().len()
        );
        Self {
            text: snapshot.text,
            origin: snapshot.origin,
            settings,
            settings_changed: false,
            pomodoro: Pomodoro::default(),
            audio,
            cue: None,
        }
    }

    /// Sets the sound played on phase changes; missing files are ignored.
    pub fn with_cue(mut self, cue: PathBuf) -> Self {
        self.cue = cue.is_file().then_some(cue);
        self
    }

    pub fn with_pomodoro(mut self, pomodoro: Pomodoro) -> Self {
        self.pomodoro = pomodoro;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }

    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }

    pub fn settings(&self) -> &ZenSettings {
        &self.settings
    }

    /// Replaces the visual settings; the shell persists them on exit.
    pub fn update_settings(&mut self, settings: ZenSettings) {
        if settings != self.settings {
            self.settings = settings;
            self.settings_changed = true;
        }
    }

    pub fn settings_changed(&self) -> bool {
        self.settings_changed
    }

    pub fn pomodoro(&self) -> &Pomodoro {
        &self.pomodoro
    }

    pub fn pomodoro_mut(&mut self) -> &mut Pomodoro {
        &mut self.pomodoro
    }

    pub fn audio(&self) -> &AudioDeck<B> {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut AudioDeck<B> {
        &mut self.audio
    }

    /// One host second; plays the cue when a phase completes.
    pub fn tick(&mut self) -> Option<PhaseCompleted> {
        let completed = self.pomodoro.tick()?;
        if let Some(cue) = &self.cue {
            self.audio.backend_mut().play_cue(cue);
        }
        info!(
            "event=pomodoro_phase module=zen status=ok finished={:?} next={:?}",
            completed.finished, completed.next
        );
        Some(completed)
    }

    /// Ends the session, returning the outcome and the released backend.
    pub fn close(self, exit: ZenExit) -> (ZenOutcome, B) {
        let outcome = ZenOutcome {
            text: self.text,
            origin: self.origin,
            clear_origin: exit == ZenExit::SaveAndNew,
        };
        info!(
            "event=zen_exit module=zen status=ok clear_origin={}",
            outcome.clear_origin
        );
        (outcome, self.audio.into_backend())
    }
}
