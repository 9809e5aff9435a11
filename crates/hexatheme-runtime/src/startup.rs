#![forbid(unsafe_code)]

//! Run-once initialization gated on document readiness.

use hexatheme_backend::ReadyState;

/// What the host should do after asking the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartupAction {
    /// Initialize now.
    RunNow,
    /// Wait for `DOMContentLoaded`, then call [`StartupGate::ready`].
    Defer,
    /// Already initialized, or already waiting.
    Skip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum GateState {
    #[default]
    Idle,
    Waiting,
    Done,
}

/// Guarantees the switcher is initialized exactly once, either immediately
/// or when the document finishes parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StartupGate {
    state: GateState,
}

impl StartupGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decide what to do given the current ready state.
    pub fn request(&mut self, ready: ReadyState) -> StartupAction {
        match self.state {
            GateState::Done | GateState::Waiting => StartupAction::Skip,
            GateState::Idle if ready.is_parsed() => {
                self.state = GateState::Done;
                StartupAction::RunNow
            }
            GateState::Idle => {
                self.state = GateState::Waiting;
                StartupAction::Defer
            }
        }
    }

    /// The deferred ready event fired. Returns `true` if initialization
    /// should run now.
    pub fn ready(&mut self) -> bool {
        if self.state == GateState::Waiting {
            self.state = GateState::Done;
            true
        } else {
            false
        }
    }

    pub fn is_done(&self) -> bool {
        self.state == GateState::Done
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parsed_document_runs_immediately_once() {
        let mut gate = StartupGate::new();
        assert_eq!(gate.request(ReadyState::Complete), StartupAction::RunNow);
        assert!(gate.is_done());
        assert_eq!(gate.request(ReadyState::Complete), StartupAction::Skip);
        assert!(!gate.ready());
    }

    #[test]
    fn loading_document_defers_until_ready() {
        let mut gate = StartupGate::new();
        assert_eq!(gate.request(ReadyState::Loading), StartupAction::Defer);
        assert!(!gate.is_done());
        assert_eq!(gate.request(ReadyState::Interactive), StartupAction::Skip);
        assert!(gate.ready());
        assert!(gate.is_done());
        assert!(!gate.ready());
    }

    #[test]
    fn stray_ready_event_is_ignored() {
        let mut gate = StartupGate::new();
        assert!(!gate.ready());
        assert_eq!(gate.request(ReadyState::Interactive), StartupAction::RunNow);
    }
}
