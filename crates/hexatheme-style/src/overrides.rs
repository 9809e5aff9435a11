#![forbid(unsafe_code)]

//! Inline override plan for already-rendered elements.
//!
//! Each [`OverrideRule`] names a selector and the palette slot every matched
//! element's property is forced to. The applier walks [`ELEMENT_OVERRIDES`]
//! in order; nothing else decides which elements get recolored.

use crate::color::Rgb;
use crate::palette::ThemePalette;

/// Id of the floating button that opens the theme panel.
pub const TOGGLE_ID: &str = "theme-toggle";
/// Id of the theme option panel.
pub const PANEL_ID: &str = "theme-panel";
/// Hero section outline buttons, which get pointer-driven overrides.
pub const OUTLINE_BUTTON_SELECTOR: &str = ".btn-outline-light";

/// Alpha of the regular primary-tinted shadow.
pub const SHADOW_ALPHA: f32 = 0.25;
/// Alpha of the large primary-tinted shadow.
pub const SHADOW_LG_ALPHA: f32 = 0.3;

/// CSS properties the switcher writes inline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleProperty {
    Background,
    BackgroundColor,
    BorderColor,
    Color,
}

impl StyleProperty {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::BackgroundColor => "background-color",
            Self::BorderColor => "border-color",
            Self::Color => "color",
        }
    }
}

/// Inline declaration priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StylePriority {
    #[default]
    Normal,
    /// `!important`: wins over every non-important stylesheet rule.
    Important,
}

impl StylePriority {
    /// Priority string accepted by `CSSStyleDeclaration.setProperty`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "",
            Self::Important => "important",
        }
    }
}

/// Which palette color a declaration takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaletteSlot {
    Primary,
    Secondary,
    Dark,
}

impl PaletteSlot {
    pub fn color(self, palette: &ThemePalette) -> Rgb {
        match self {
            Self::Primary => palette.primary,
            Self::Secondary => palette.secondary,
            Self::Dark => palette.dark,
        }
    }
}

/// A selector and the slot-bound properties forced on every match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverrideRule {
    pub selector: &'static str,
    pub declarations: &'static [(StyleProperty, PaletteSlot)],
}

const PRIMARY_BG: &[(StyleProperty, PaletteSlot)] =
    &[(StyleProperty::BackgroundColor, PaletteSlot::Primary)];

/// Element overrides, in application order. All are `!important`.
pub const ELEMENT_OVERRIDES: [OverrideRule; 11] = [
    OverrideRule {
        selector: ".bg-primary",
        declarations: PRIMARY_BG,
    },
    OverrideRule {
        selector: ".btn-primary",
        declarations: &[
            (StyleProperty::BackgroundColor, PaletteSlot::Primary),
            (StyleProperty::BorderColor, PaletteSlot::Primary),
        ],
    },
    OverrideRule {
        selector: ".jumbotron",
        declarations: PRIMARY_BG,
    },
    OverrideRule {
        selector: ".back-to-top",
        declarations: PRIMARY_BG,
    },
    OverrideRule {
        selector: ".text-primary",
        declarations: &[(StyleProperty::Color, PaletteSlot::Primary)],
    },
    OverrideRule {
        selector: ".bg-dark",
        declarations: &[(StyleProperty::BackgroundColor, PaletteSlot::Dark)],
    },
    OverrideRule {
        selector: ".bg-secondary",
        declarations: &[(StyleProperty::BackgroundColor, PaletteSlot::Secondary)],
    },
    OverrideRule {
        selector: ".border-primary",
        declarations: &[(StyleProperty::BorderColor, PaletteSlot::Primary)],
    },
    OverrideRule {
        selector: "a.text-primary, .text-primary a",
        declarations: &[(StyleProperty::Color, PaletteSlot::Primary)],
    },
    OverrideRule {
        selector: ".d-flex.align-items-center.justify-content-center.bg-primary",
        declarations: PRIMARY_BG,
    },
    OverrideRule {
        selector: ".position-absolute.bg-primary.rounded-circle",
        declarations: PRIMARY_BG,
    },
];

/// Root-scope custom properties for `palette`, in the order they are set.
pub fn root_variables(palette: &ThemePalette) -> [(&'static str, String); 6] {
    [
        ("--primary", palette.primary.to_hex()),
        ("--secondary", palette.secondary.to_hex()),
        ("--dark", palette.dark.to_hex()),
        ("--primary-rgb", palette.primary_rgb()),
        (
            "--shadow-primary",
            format!("0 8px 24px {}", palette.primary.rgba(SHADOW_ALPHA)),
        ),
        (
            "--shadow-primary-lg",
            format!("0 12px 32px {}", palette.primary.rgba(SHADOW_LG_ALPHA)),
        ),
    ]
}

/// Diagonal primary-to-dark gradient painted on the toggle button.
pub fn toggle_gradient(palette: &ThemePalette) -> String {
    format!(
        "linear-gradient(135deg, {} 0%, {} 100%)",
        palette.primary, palette.dark
    )
}
