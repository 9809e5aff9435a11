#![forbid(unsafe_code)]
#![doc = "Port traits for Hexatheme: the live document and the durable preference slot."]
#![doc = ""]
#![doc = "This crate defines the boundary between the theme runtime and the platform"]
#![doc = "(`web-sys` in the browser via `hexatheme-web`, an in-memory document in tests)."]
#![doc = "The runtime never touches a global document or storage object directly."]

use core::fmt;

use hexatheme_style::{StyleChange, StylePriority};

#[cfg(any(test, feature = "test-helpers"))]
pub mod memory;

/// Document loading phase, as reported by `document.readyState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReadyState {
    /// Still parsing; elements may be missing.
    Loading,
    /// Parsed; subresources may still be loading.
    Interactive,
    /// Fully loaded.
    Complete,
}

impl ReadyState {
    /// Parse a `readyState` string. Unknown values count as parsed, so
    /// initialization is never deferred forever.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "loading" => Self::Loading,
            "complete" => Self::Complete,
            _ => Self::Interactive,
        }
    }

    /// Whether the markup is available for querying.
    pub const fn is_parsed(self) -> bool {
        !matches!(self, Self::Loading)
    }
}

/// Live document abstraction: querying, inline styles, classes, and the
/// injected style element.
///
/// Implementations hand out cheap element handles (`Element`) that stay
/// valid for the page lifetime. Mutating methods take `&mut self` even where
/// the platform does not require it, so in-memory hosts need no interior
/// mutability.
pub trait DocumentHost {
    /// Element handle.
    type Element: Clone + fmt::Debug;

    /// Platform-specific error type.
    type Error: fmt::Debug + fmt::Display;

    /// Current loading phase.
    fn ready_state(&self) -> ReadyState;

    /// Set a custom property on the root element (`document.documentElement`).
    fn set_root_property(&mut self, name: &str, value: &str) -> Result<(), Self::Error>;

    /// All elements matching a CSS selector list, in document order.
    fn query_all(&self, selector: &str) -> Result<Vec<Self::Element>, Self::Error>;

    /// Element with the given id, if present.
    fn element_by_id(&self, id: &str) -> Option<Self::Element>;

    /// Set one inline style property.
    fn set_style(
        &mut self,
        element: &Self::Element,
        property: &str,
        value: &str,
        priority: StylePriority,
    ) -> Result<(), Self::Error>;

    /// Remove one inline style property.
    fn remove_style(&mut self, element: &Self::Element, property: &str)
    -> Result<(), Self::Error>;

    /// Remove any element with `id`, then append a `<style id=...>` holding
    /// `css` to the head. At most one such element exists afterwards.
    fn replace_head_style(&mut self, id: &str, css: &str) -> Result<(), Self::Error>;

    fn add_class(&mut self, element: &Self::Element, class: &str) -> Result<(), Self::Error>;

    fn remove_class(&mut self, element: &Self::Element, class: &str) -> Result<(), Self::Error>;

    fn has_class(&self, element: &Self::Element, class: &str) -> bool;

    /// Attribute value (`data-theme` and friends).
    fn attribute(&self, element: &Self::Element, name: &str) -> Option<String>;

    /// Inclusive containment, like `Node.contains`.
    fn contains(&self, ancestor: &Self::Element, node: &Self::Element) -> bool;

    /// Apply a resolved [`StyleChange`].
    fn apply_style_change(
        &mut self,
        element: &Self::Element,
        change: &StyleChange,
    ) -> Result<(), Self::Error> {
        match change {
            StyleChange::Set {
                property,
                value,
                priority,
            } => self.set_style(element, property.as_str(), value, *priority),
            StyleChange::Remove { property } => self.remove_style(element, property.as_str()),
        }
    }

    /// Add or remove `class` depending on `on`.
    fn set_class(
        &mut self,
        element: &Self::Element,
        class: &str,
        on: bool,
    ) -> Result<(), Self::Error> {
        if on {
            self.add_class(element, class)
        } else {
            self.remove_class(element, class)
        }
    }
}

/// Durable key-value slot surviving page reloads (`localStorage` on web).
pub trait PreferenceStore {
    /// Platform-specific error type.
    type Error: fmt::Debug + fmt::Display;

    fn load(&self, key: &str) -> Result<Option<String>, Self::Error>;

    fn store(&mut self, key: &str, value: &str) -> Result<(), Self::Error>;
}
