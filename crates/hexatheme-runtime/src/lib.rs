#![forbid(unsafe_code)]

//! Theme runtime for Hexatheme.
//!
//! [`ThemeApplier`] pushes a palette into a [`DocumentHost`](hexatheme_backend::DocumentHost)
//! and records the choice in a [`PreferenceStore`](hexatheme_backend::PreferenceStore).
//! [`ThemeSwitcher`] layers the options panel, listener bindings and event
//! dispatch on top. [`StartupGate`] decides when initialization runs.
//!
//! The runtime is host-driven: it owns no event loop and registers no
//! listeners. Hosts attach the bindings returned by [`ThemeSwitcher::init`]
//! and feed events back through [`ThemeSwitcher::handle`].

pub mod applier;
pub mod config;
pub mod panel;
pub mod startup;
pub mod switcher;

pub use applier::ThemeApplier;
pub use config::{ConfigError, DEFAULT_STORAGE_KEY, SwitcherConfig};
pub use panel::{ClickLocation, PanelState, ThemePanel};
pub use startup::{StartupAction, StartupGate};
pub use switcher::{
    BindingRole, ListenerBinding, ListenerKind, ListenerTarget, SwitcherEvent, ThemeSwitcher,
};

pub use hexatheme_backend::ReadyState;
pub use hexatheme_style::{ThemeId, ThemePalette};
