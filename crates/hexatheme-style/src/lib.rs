#![forbid(unsafe_code)]

//! Palettes and style vocabulary for Hexatheme.
//!
//! # Role in Hexatheme
//! `hexatheme-style` is the shared, I/O-free description of what a theme
//! looks like. The runtime decides *when* to apply it; this crate decides
//! *what* gets written.
//!
//! # This crate provides
//! - [`ThemeId`] and [`ThemePalette`]: the fixed palette table with total
//!   lookup ([`ThemeId::resolve`] never fails).
//! - [`Rgb`]: colors with hex, channel-triple, and `rgba()` renderings.
//! - [`ELEMENT_OVERRIDES`]: the selector → property → palette slot plan for
//!   inline overrides, plus [`root_variables`] and [`toggle_gradient`].
//! - [`DynamicStylesheet`]: the injected sheet for pseudo-classes and
//!   late-rendered elements.
//! - [`interactive::OutlineHover`]: pointer-driven inline changes.

/// Colors and their CSS renderings.
pub mod color;
/// Pointer-driven style changes.
pub mod interactive;
/// Inline override plan.
pub mod overrides;
/// Built-in palettes.
pub mod palette;
/// Injected stylesheet template.
pub mod stylesheet;

pub use color::Rgb;
pub use interactive::{InteractionState, OUTLINE_REST_BORDER, OutlineHover, StyleChange};
pub use overrides::{
    ELEMENT_OVERRIDES, OUTLINE_BUTTON_SELECTOR, OverrideRule, PANEL_ID, PaletteSlot,
    StyleProperty, StylePriority, TOGGLE_ID, root_variables, toggle_gradient,
};
pub use palette::{ThemeId, ThemePalette, palette, palettes, resolve_palette, theme_count};
pub use stylesheet::{
    ACTIVE_CLASS, CssDeclaration, CssRule, DEFAULT_HERO_IMAGE, DYNAMIC_STYLE_ID,
    DynamicStylesheet, OPTION_CLASS,
};
