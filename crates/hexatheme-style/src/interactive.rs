//! Pointer-driven style changes for elements whose hover look depends on
//! the active palette.
//!
//! Stylesheets reach `:hover` through the injected rules, but the hero
//! section's outline buttons also carry inline `!important` overrides, and
//! those win over any stylesheet rule. [`OutlineHover`] therefore describes
//! the inline changes to apply when the pointer enters or leaves such a
//! button, resolved against whichever palette is active at event time.
//!
//! # Example
//!
//! ```
//! use hexatheme_style::interactive::{InteractionState, OutlineHover, StyleChange};
//! use hexatheme_style::{StyleProperty, ThemeId};
//!
//! let hover = OutlineHover::new(ThemeId::Ocean.palette());
//! let changes = hover.resolve(InteractionState::Hovered);
//! assert_eq!(
//!     changes[0],
//!     StyleChange::set_important(StyleProperty::BackgroundColor, "#007CC7"),
//! );
//! ```

#![forbid(unsafe_code)]

use crate::overrides::{StyleProperty, StylePriority};
use crate::palette::ThemePalette;

/// Border color restored when the pointer leaves an outline button.
pub const OUTLINE_REST_BORDER: &str = "#fff";

/// The pointer state of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InteractionState {
    /// Pointer is outside the element.
    Normal,
    /// Pointer is over the element.
    Hovered,
}

/// One inline style mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleChange {
    Set {
        property: StyleProperty,
        value: String,
        priority: StylePriority,
    },
    Remove {
        property: StyleProperty,
    },
}

impl StyleChange {
    pub fn set_important(property: StyleProperty, value: impl Into<String>) -> Self {
        Self::Set {
            property,
            value: value.into(),
            priority: StylePriority::Important,
        }
    }

    pub fn remove(property: StyleProperty) -> Self {
        Self::Remove { property }
    }
}

/// Inline hover behavior of `.btn-outline-light`.
///
/// Entering fills the button with the primary color; leaving drops the fill
/// and puts the white border back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutlineHover<'a> {
    palette: &'a ThemePalette,
}

impl<'a> OutlineHover<'a> {
    pub fn new(palette: &'a ThemePalette) -> Self {
        Self { palette }
    }

    /// Changes to apply when the element transitions into `state`.
    pub fn resolve(&self, state: InteractionState) -> Vec<StyleChange> {
        match state {
            InteractionState::Hovered => {
                let primary = self.palette.primary.to_hex();
                vec![
                    StyleChange::set_important(StyleProperty::BackgroundColor, primary.clone()),
                    StyleChange::set_important(StyleProperty::BorderColor, primary),
                ]
            }
            InteractionState::Normal => vec![
                StyleChange::remove(StyleProperty::BackgroundColor),
                StyleChange::set_important(StyleProperty::BorderColor, OUTLINE_REST_BORDER),
            ],
        }
    }
}
