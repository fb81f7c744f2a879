//! Ambient audio selection with a single-active-track policy.
//!
//! # Responsibility
//! - Discover ambient tracks in the audio directory.
//! - Decide what plays; the host backend does the actual decoding.
//!
//! # Invariants
//! - At most one track or playlist is active; starting one stops the other.
//! - A single track loops; a playlist advances and wraps to the first track.

use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const TRACK_EXTENSIONS: &[&str] = &["mp3", "wav", "ogg"];

/// Playback engine implemented by the UI host.
pub trait AudioBackend {
    fn play(&mut self, track: &Path, looping: bool);
    fn pause(&mut self);
    fn resume(&mut self);
    fn stop(&mut self);
    /// One-shot sound for Pomodoro phase changes.
    fn play_cue(&mut self, cue: &Path);
}

/// Backend that plays nothing; hosts poll [`AudioDeck::playback`] instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentAudio;

impl AudioBackend for SilentAudio {
    fn play(&mut self, track: &Path, looping: bool) {
        debug!(
            "event=audio_play module=audio status=silent looping={looping} track={}",
            track.display()
        );
    }

    fn pause(&mut self) {}

    fn resume(&mut self) {}

    fn stop(&mut self) {}

    fn play_cue(&mut self, _cue: &Path) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Playback {
    Stopped,
    Single { index: usize, paused: bool },
    Playlist { current: usize, paused: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioError {
    TrackNotFound(usize),
}

impl Display for AudioError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TrackNotFound(index) => write!(f, "audio track not found: {index}"),
        }
    }
}

impl Error for AudioError {}

/// Track list plus current playback over a host backend.
#[derive(Debug)]
pub struct AudioDeck<B: AudioBackend> {
    backend: B,
    tracks: Vec<PathBuf>,
    playback: Playback,
}

impl<B: AudioBackend> AudioDeck<B> {
    pub fn new(backend: B, tracks: Vec<PathBuf>) -> Self {
        Self {
            backend,
            tracks,
            playback: Playback::Stopped,
        }
    }

    pub fn tracks(&self) -> &[PathBuf] {
        &self.tracks
    }

    pub fn playback(&self) -> Playback {
        self.playback
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Plays track `index` on loop, or pauses/resumes it if already active.
    pub fn toggle_track(&mut self, index: usize) -> Result<(), AudioError> {
        if let Playback::Single {
            index: active,
            paused,
        } = self.playback
        {
            if active == index {
                self.set_paused(!paused);
                self.playback = Playback::Single {
                    index,
                    paused: !paused,
                };
                return Ok(());
            }
        }

        let track = self
            .tracks
            .get(index)
            .cloned()
            .ok_or(AudioError::TrackNotFound(index))?;
        self.stop();
        self.backend.play(&track, true);
        self.playback = Playback::Single {
            index,
            paused: false,
        };
        Ok(())
    }

    /// Starts the playlist from the first track, or pauses/resumes it.
    ///
    /// Returns `false` when there are no tracks.
    pub fn toggle_playlist(&mut self) -> bool {
        match self.playback {
            Playback::Playlist { current, paused } => {
                self.set_paused(!paused);
                self.playback = Playback::Playlist {
                    current,
                    paused: !paused,
                };
                true
            }
            _ => self.start_playlist(),
        }
    }

    /// Host callback when the current track reaches its end.
    pub fn track_finished(&mut self) {
        if let Playback::Playlist { current, .. } = self.playback {
            if self.tracks.is_empty() {
                self.stop();
                return;
            }
            let next = (current + 1) % self.tracks.len();
            self.backend.play(&self.tracks[next], false);
            self.playback = Playback::Playlist {
                current: next,
                paused: false,
            };
        }
    }

    pub fn stop(&mut self) {
        if self.playback != Playback::Stopped {
            self.backend.stop();
        }
        self.playback = Playback::Stopped;
    }

    /// Currently selected track path, if any.
    pub fn current_track(&self) -> Option<&Path> {
        match self.playback {
            Playback::Stopped => None,
            Playback::Single { index, .. } | Playback::Playlist { current: index, .. } => {
                self.tracks.get(index).map(PathBuf::as_path)
            }
        }
    }

    /// Releases the backend; playback is stopped first.
    pub fn into_backend(mut self) -> B {
        self.stop();
        self.backend
    }

    fn start_playlist(&mut self) -> bool {
        let Some(first) = self.tracks.first().cloned() else {
            return false;
        };
        self.stop();
        self.backend.play(&first, false);
        self.playback = Playback::Playlist {
            current: 0,
            paused: false,
        };
        true
    }

    fn set_paused(&mut self, paused: bool) {
        if paused {
            self.backend.pause();
        } else {
            self.backend.resume();
        }
    }
}

/// Sorted audio files (`mp3|wav|ogg`, any case) directly inside `dir`.
pub fn discover_tracks(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut tracks: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| {
            path.extension()
                .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
                .is_some_and(|ext| TRACK_EXTENSIONS.contains(&ext.as_str()))
        })
        .collect();
    tracks.sort();
    tracks
}
