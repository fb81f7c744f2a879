//! Slide-in panel visibility state machine.
//!
//! # Invariants
//! - Toggles are ignored while an animation is in progress.
//! - Only a finished slide-out reaches `Hidden`.

use crate::model::settings::TriggerPosition;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellState {
    Hidden,
    /// Slide-in animation running.
    Showing,
    Visible,
    /// Slide-out animation running.
    Hiding,
}

/// Screen edge the panel slides from and back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideEdge {
    Left,
    Right,
}

impl From<TriggerPosition> for SlideEdge {
    fn from(value: TriggerPosition) -> Self {
        match value {
            TriggerPosition::Left => Self::Left,
            TriggerPosition::Right => Self::Right,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shell {
    state: ShellState,
    edge: SlideEdge,
}

impl Shell {
    pub fn new(edge: SlideEdge) -> Self {
        Self {
            state: ShellState::Hidden,
            edge,
        }
    }

    pub fn state(&self) -> ShellState {
        self.state
    }

    pub fn edge(&self) -> SlideEdge {
        self.edge
    }

    pub fn set_edge(&mut self, edge: SlideEdge) {
        self.edge = edge;
    }

    /// Trigger activation. Returns the new state, or `None` when ignored.
    pub fn toggle(&mut self) -> Option<ShellState> {
        let next = match self.state {
            ShellState::Hidden => ShellState::Showing,
            ShellState::Visible => ShellState::Hiding,
            ShellState::Showing | ShellState::Hiding => return None,
        };
        self.state = next;
        Some(next)
    }

    /// Close request. Returns whether a slide-out started.
    pub fn request_close(&mut self) -> bool {
        match self.state {
            ShellState::Visible | ShellState::Showing => {
                self.state = ShellState::Hiding;
                true
            }
            ShellState::Hidden | ShellState::Hiding => false,
        }
    }

    /// Host callback when the running animation ends.
    pub fn animation_finished(&mut self) -> Option<ShellState> {
        let next = match self.state {
            ShellState::Showing => ShellState::Visible,
            ShellState::Hiding => ShellState::Hidden,
            ShellState::Hidden | ShellState::Visible => return None,
        };
        self.state = next;
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::{Shell, ShellState, SlideEdge};
    use crate::model::settings::TriggerPosition;

    #[test]
    fn full_show_hide_cycle() {
        let mut shell = Shell::new(SlideEdge::Right);
        assert_eq!(shell.toggle(), Some(ShellState::Showing));
        assert_eq!(shell.toggle(), None);
        assert_eq!(shell.animation_finished(), Some(ShellState::Visible));
        assert_eq!(shell.toggle(), Some(ShellState::Hiding));
        assert_eq!(shell.animation_finished(), Some(ShellState::Hidden));
        assert_eq!(shell.animation_finished(), None);
    }

    #[test]
    fn close_request_only_from_shown_states() {
        let mut shell = Shell::new(SlideEdge::Left);
        assert!(!shell.request_close());
        shell.toggle();
        assert!(shell.request_close());
        assert_eq!(shell.state(), ShellState::Hiding);
        assert!(!shell.request_close());
    }

    #[test]
    fn edge_follows_trigger_position() {
        assert_eq!(SlideEdge::from(TriggerPosition::Left), SlideEdge::Left);
        assert_eq!(SlideEdge::from(TriggerPosition::Right), SlideEdge::Right);
    }
}
