#![forbid(unsafe_code)]

//! Host-driven theme switcher.
//!
//! The switcher never registers listeners itself. [`ThemeSwitcher::init`]
//! applies the saved theme and returns the [`ListenerBinding`]s the host must
//! attach; when one fires, the host turns it into a [`SwitcherEvent`] with
//! [`ListenerBinding::event_for`] and feeds it back through
//! [`ThemeSwitcher::handle`].
//!
//! # Example
//!
//! ```ignore
//! let mut switcher = ThemeSwitcher::new(document, store, SwitcherConfig::default());
//! for binding in switcher.init() {
//!     host.listen(binding);
//! }
//! // later, from the host's dispatch loop:
//! if let Some(event) = binding.event_for(target) {
//!     switcher.handle(event);
//! }
//! ```

use hexatheme_backend::{DocumentHost, PreferenceStore};
use hexatheme_style::{OUTLINE_BUTTON_SELECTOR, ThemeId, ThemePalette};

use crate::applier::ThemeApplier;
use crate::config::SwitcherConfig;
use crate::panel::{ClickLocation, PanelState, ThemePanel};

/// DOM event a binding listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    Click,
    MouseEnter,
    MouseLeave,
}

impl ListenerKind {
    /// Event type string passed to `addEventListener`.
    pub const fn event_type(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::MouseEnter => "mouseenter",
            Self::MouseLeave => "mouseleave",
        }
    }
}

/// Why a binding exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingRole {
    ThemeOption,
    PanelToggle,
    OutsideClick,
    OutlineHover,
}

/// Where a listener is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListenerTarget<E> {
    Element(E),
    Document,
}

/// A listener the host must attach.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenerBinding<E> {
    pub target: ListenerTarget<E>,
    pub kind: ListenerKind,
    pub role: BindingRole,
}

impl<E: Clone> ListenerBinding<E> {
    fn element(element: E, kind: ListenerKind, role: BindingRole) -> Self {
        Self {
            target: ListenerTarget::Element(element),
            kind,
            role,
        }
    }

    /// Translate a fired listener into the event to dispatch.
    ///
    /// `target` is the event's target element, used only by the document
    /// click binding. Option and hover events refer to the bound element, so
    /// a click on an icon inside an option still reads the option's theme.
    /// Returns `None` for combinations [`ThemeSwitcher::init`] never emits.
    pub fn event_for(&self, target: Option<E>) -> Option<SwitcherEvent<E>> {
        match (&self.target, self.role, self.kind) {
            (_, BindingRole::OutsideClick, ListenerKind::Click) => {
                Some(SwitcherEvent::DocumentClicked { target })
            }
            (_, BindingRole::PanelToggle, ListenerKind::Click) => {
                Some(SwitcherEvent::ToggleClicked)
            }
            (ListenerTarget::Element(el), BindingRole::ThemeOption, ListenerKind::Click) => {
                Some(SwitcherEvent::OptionClicked(el.clone()))
            }
            (ListenerTarget::Element(el), BindingRole::OutlineHover, ListenerKind::MouseEnter) => {
                Some(SwitcherEvent::PointerEntered(el.clone()))
            }
            (ListenerTarget::Element(el), BindingRole::OutlineHover, ListenerKind::MouseLeave) => {
                Some(SwitcherEvent::PointerLeft(el.clone()))
            }
            _ => None,
        }
    }
}

/// Host events the switcher reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwitcherEvent<E> {
    /// A theme option control was clicked.
    OptionClicked(E),
    /// The panel toggle button was clicked.
    ToggleClicked,
    /// Any click reaching the document.
    DocumentClicked { target: Option<E> },
    /// Pointer entered an outline button.
    PointerEntered(E),
    /// Pointer left an outline button.
    PointerLeft(E),
}

/// Theme switcher: the applier plus panel state and init bookkeeping.
#[derive(Debug)]
pub struct ThemeSwitcher<D, S> {
    applier: ThemeApplier<D, S>,
    panel: ThemePanel,
    initialized: bool,
}

impl<D: DocumentHost, S: PreferenceStore> ThemeSwitcher<D, S> {
    pub fn new(document: D, store: S, config: SwitcherConfig) -> Self {
        Self {
            applier: ThemeApplier::new(document, store, config),
            panel: ThemePanel::new(),
            initialized: false,
        }
    }

    /// Apply the saved theme and return the listeners to attach.
    ///
    /// Only the first call does anything; later calls return no bindings so
    /// listeners are never attached twice.
    pub fn init(&mut self) -> Vec<ListenerBinding<D::Element>> {
        if self.initialized {
            tracing::debug!("theme switcher already initialized");
            return Vec::new();
        }
        self.initialized = true;

        let saved = self
            .applier
            .load_preference()
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| ThemeId::Default.key().to_string());
        self.applier.apply_theme(&saved);

        let config = self.applier.config();
        let document = self.applier.document();
        let mut bindings = Vec::new();

        match document.query_all(&config.option_selector()) {
            Ok(options) => bindings.extend(options.into_iter().map(|option| {
                ListenerBinding::element(option, ListenerKind::Click, BindingRole::ThemeOption)
            })),
            Err(err) => tracing::warn!(error = %err, "theme option query failed"),
        }

        if let Some(toggle) = document.element_by_id(&config.toggle_id) {
            bindings.push(ListenerBinding::element(
                toggle,
                ListenerKind::Click,
                BindingRole::PanelToggle,
            ));
        }

        bindings.push(ListenerBinding {
            target: ListenerTarget::Document,
            kind: ListenerKind::Click,
            role: BindingRole::OutsideClick,
        });

        match document.query_all(OUTLINE_BUTTON_SELECTOR) {
            Ok(buttons) => {
                for button in buttons {
                    bindings.push(ListenerBinding::element(
                        button.clone(),
                        ListenerKind::MouseEnter,
                        BindingRole::OutlineHover,
                    ));
                    bindings.push(ListenerBinding::element(
                        button,
                        ListenerKind::MouseLeave,
                        BindingRole::OutlineHover,
                    ));
                }
            }
            Err(err) => tracing::warn!(error = %err, "outline button query failed"),
        }

        tracing::debug!(
            theme = self.applier.active_theme().key(),
            bindings = bindings.len(),
            "theme switcher initialized"
        );
        bindings
    }

    /// Dispatch one host event.
    pub fn handle(&mut self, event: SwitcherEvent<D::Element>) {
        match event {
            SwitcherEvent::OptionClicked(option) => {
                let attribute = &self.applier.config().theme_attribute;
                let requested = self.applier.document().attribute(&option, attribute);
                let requested = requested.unwrap_or_else(|| {
                    tracing::warn!(
                        attribute = %attribute,
                        "theme option has no theme attribute"
                    );
                    ThemeId::Default.key().to_string()
                });
                self.applier.apply_theme(&requested);
            }
            SwitcherEvent::ToggleClicked => {
                self.toggle_panel();
            }
            SwitcherEvent::DocumentClicked { target } => self.document_click(target.as_ref()),
            SwitcherEvent::PointerEntered(element) => self.applier.hover_enter(&element),
            SwitcherEvent::PointerLeft(element) => self.applier.hover_leave(&element),
        }
    }

    /// Apply a theme directly (the `applyTheme` entry point).
    pub fn apply_theme(&mut self, identifier: &str) -> ThemeId {
        self.applier.apply_theme(identifier)
    }

    /// Flip the panel and mirror the state onto the panel and toggle classes.
    pub fn toggle_panel(&mut self) -> PanelState {
        let state = self.panel.toggle();
        self.sync_panel_classes();
        state
    }

    fn document_click(&mut self, target: Option<&D::Element>) {
        let config = self.applier.config();
        let document = self.applier.document();
        let (Some(panel), Some(toggle)) = (
            document.element_by_id(&config.panel_id),
            document.element_by_id(&config.toggle_id),
        ) else {
            return;
        };
        let inside = target.is_some_and(|target| {
            document.contains(&panel, target) || document.contains(&toggle, target)
        });
        let location = if inside {
            ClickLocation::Inside
        } else {
            ClickLocation::Outside
        };
        if self.panel.document_click(location) {
            self.sync_panel_classes();
        }
    }

    fn sync_panel_classes(&mut self) {
        let open = self.panel.is_open();
        let config = self.applier.config().clone();
        let document = self.applier.document_mut();
        let targets = [
            (&config.panel_id, &config.panel_open_class),
            (&config.toggle_id, &config.toggle_open_class),
        ];
        for (id, class) in targets {
            let Some(element) = document.element_by_id(id) else {
                continue;
            };
            if let Err(err) = document.set_class(&element, class, open) {
                tracing::warn!(id = %id, error = %err, "failed to update panel class");
            }
        }
    }

    pub fn panel_state(&self) -> PanelState {
        self.panel.state()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn active_theme(&self) -> ThemeId {
        self.applier.active_theme()
    }

    pub fn active_palette(&self) -> &'static ThemePalette {
        self.applier.active_palette()
    }

    pub fn applier(&self) -> &ThemeApplier<D, S> {
        &self.applier
    }

    pub fn document(&self) -> &D {
        self.applier.document()
    }

    pub fn store(&self) -> &S {
        self.applier.store()
    }

    pub fn into_parts(self) -> (D, S) {
        self.applier.into_parts()
    }
}
