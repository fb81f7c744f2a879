//! Work/break countdown driven by host ticks.
//!
//! # Invariants
//! - Time only advances while running.
//! - Reaching zero flips the phase and reloads that phase's full duration.

/// Default work phase length in seconds.
pub const POMODORO_WORK_SECS: u32 = 25 * 60;
/// Default break phase length in seconds.
pub const POMODORO_BREAK_SECS: u32 = 5 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PomodoroPhase {
    Work,
    Break,
}

/// Emitted by [`Pomodoro::tick`] when a phase runs out; the host plays the cue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseCompleted {
    pub finished: PomodoroPhase,
    pub next: PomodoroPhase,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pomodoro {
    work_secs: u32,
    break_secs: u32,
    phase: PomodoroPhase,
    remaining_secs: u32,
    running: bool,
}

impl Default for Pomodoro {
    fn default() -> Self {
        Self::with_durations(POMODORO_WORK_SECS, POMODORO_BREAK_SECS)
    }
}

impl Pomodoro {
    /// Zero durations are raised to one second.
    pub fn with_durations(work_secs: u32, break_secs: u32) -> Self {
        let work_secs = work_secs.max(1);
        Self {
            work_secs,
            break_secs: break_secs.max(1),
            phase: PomodoroPhase::Work,
            remaining_secs: work_secs,
            running: false,
        }
    }

    pub fn phase(&self) -> PomodoroPhase {
        self.phase
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Start/pause toggle; returns whether the timer now runs.
    pub fn toggle(&mut self) -> bool {
        self.running = !self.running;
        self.running
    }

    /// Stops and returns to a full work phase.
    pub fn reset(&mut self) {
        self.running = false;
        self.phase = PomodoroPhase::Work;
        self.remaining_secs = self.work_secs;
    }

    /// Advances one second.
    pub fn tick(&mut self) -> Option<PhaseCompleted> {
        if !self.running {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs > 0 {
            return None;
        }

        let finished = self.phase;
        let (next, duration) = match finished {
            PomodoroPhase::Work => (PomodoroPhase::Break, self.break_secs),
            PomodoroPhase::Break => (PomodoroPhase::Work, self.work_secs),
        };
        self.phase = next;
        self.remaining_secs = duration;
        Some(PhaseCompleted { finished, next })
    }

    /// `MM:SS` of the remaining time.
    pub fn label(&self) -> String {
        format!(
            "{:02}:{:02}",
            self.remaining_secs / 60,
            self.remaining_secs % 60
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{PhaseCompleted, Pomodoro, PomodoroPhase};

    #[test]
    fn default_starts_paused_at_full_work_phase() {
        let mut timer = Pomodoro::default();
        assert_eq!(timer.label(), "25:00");
        assert_eq!(timer.tick(), None);
        assert_eq!(timer.remaining_secs(), 1500);
    }

    #[test]
    fn phases_alternate_when_time_runs_out() {
        let mut timer = Pomodoro::with_durations(2, 1);
        assert!(timer.toggle());
        assert_eq!(timer.tick(), None);
        assert_eq!(
            timer.tick(),
            Some(PhaseCompleted {
                finished: PomodoroPhase::Work,
                next: PomodoroPhase::Break,
            })
        );
        assert_eq!(timer.remaining_secs(), 1);
        assert_eq!(timer.tick().unwrap().next, PomodoroPhase::Work);
        assert_eq!(timer.remaining_secs(), 2);
    }

    #[test]
    fn pause_freezes_and_reset_restores_work() {
        let mut timer = Pomodoro::with_durations(90, 30);
        timer.toggle();
        timer.tick();
        assert_eq!(timer.label(), "01:29");
        assert!(!timer.toggle());
        timer.tick();
        assert_eq!(timer.remaining_secs(), 89);
        timer.reset();
        assert_eq!(timer.phase(), PomodoroPhase::Work);
        assert_eq!(timer.remaining_secs(), 90);
        assert!(!timer.is_running());
    }
}
