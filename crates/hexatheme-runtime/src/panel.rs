#![forbid(unsafe_code)]

//! Open/closed state of the theme options panel.

/// Panel visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PanelState {
    #[default]
    Closed,
    Open,
}

impl PanelState {
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }
}

/// Where a document click landed relative to the panel and its toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickLocation {
    /// Inside the panel or on the toggle.
    Inside,
    /// Somewhere else on the page.
    Outside,
}

/// Panel state machine.
///
/// Only two inputs move it: the toggle flips it, and an outside click closes
/// it while open. Everything else leaves it unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ThemePanel {
    state: PanelState,
}

impl ThemePanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    /// Flip the state and return the new one.
    pub fn toggle(&mut self) -> PanelState {
        self.state = match self.state {
            PanelState::Closed => PanelState::Open,
            PanelState::Open => PanelState::Closed,
        };
        self.state
    }

    /// Feed a document click. Returns `true` if the state changed.
    pub fn document_click(&mut self, location: ClickLocation) -> bool {
        if self.state.is_open() && location == ClickLocation::Outside {
            self.state = PanelState::Closed;
            return true;
        }
        false
    }
}
