#![forbid(unsafe_code)]

//! Built-in site palettes and total theme lookup.
//!
//! The table is fixed at compile time. Lookup by string key never fails:
//! unknown keys resolve to [`ThemeId::Default`], so callers never need an
//! error path for a cosmetic preference.

use crate::color::Rgb;

/// Built-in theme identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum ThemeId {
    /// Sunset Orange (default).
    #[default]
    Default,
    /// Ocean Blue.
    Ocean,
    /// Forest Green.
    Forest,
    /// Midnight violet.
    Midnight,
    /// Ember Red.
    Ember,
    /// Modern Teal.
    Teal,
}

impl ThemeId {
    pub const ALL: [ThemeId; 6] = [
        ThemeId::Default,
        ThemeId::Ocean,
        ThemeId::Forest,
        ThemeId::Midnight,
        ThemeId::Ember,
        ThemeId::Teal,
    ];

    pub const fn index(self) -> usize {
        match self {
            ThemeId::Default => 0,
            ThemeId::Ocean => 1,
            ThemeId::Forest => 2,
            ThemeId::Midnight => 3,
            ThemeId::Ember => 4,
            ThemeId::Teal => 5,
        }
    }

    /// Storage and markup key (`data-theme` value).
    pub const fn key(self) -> &'static str {
        match self {
            ThemeId::Default => "default",
            ThemeId::Ocean => "ocean",
            ThemeId::Forest => "forest",
            ThemeId::Midnight => "midnight",
            ThemeId::Ember => "ember",
            ThemeId::Teal => "teal",
        }
    }

    /// Human-readable display name.
    pub fn name(self) -> &'static str {
        self.palette().name
    }

    /// Exact key match. Keys are case-sensitive, like DOM data attributes.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.key() == key)
    }

    /// Total lookup: unknown keys fall back to [`ThemeId::Default`].
    pub fn resolve(key: &str) -> Self {
        Self::from_key(key).unwrap_or_default()
    }

    pub fn palette(self) -> &'static ThemePalette {
        &THEMES[self.index()]
    }
}

/// A site palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemePalette {
    pub id: ThemeId,
    pub name: &'static str,
    pub primary: Rgb,
    pub secondary: Rgb,
    pub dark: Rgb,
    /// Font Awesome icon class shown next to the option in the panel.
    pub icon: &'static str,
}

impl ThemePalette {
    pub const fn key(&self) -> &'static str {
        self.id.key()
    }

    /// `--primary-rgb` value.
    pub fn primary_rgb(&self) -> String {
        self.primary.channels()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ThemePalette {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("ThemePalette", 7)?;
        state.serialize_field("id", self.key())?;
        state.serialize_field("name", self.name)?;
        state.serialize_field("primary", &self.primary)?;
        state.serialize_field("primaryRgb", &self.primary_rgb())?;
        state.serialize_field("secondary", &self.secondary)?;
        state.serialize_field("dark", &self.dark)?;
        state.serialize_field("icon", self.icon)?;
        state.end()
    }
}

static THEMES: [ThemePalette; 6] = [
    ThemePalette {
        id: ThemeId::Default,
        name: "Sunset Orange",
        primary: Rgb::from_u32(0xFF4800),
        secondary: Rgb::from_u32(0xF2F2F4),
        dark: Rgb::from_u32(0x1F1F2E),
        icon: "fa-sun",
    },
    ThemePalette {
        id: ThemeId::Ocean,
        name: "Ocean Blue",
        primary: Rgb::from_u32(0x007CC7),
        secondary: Rgb::from_u32(0xE8F4F8),
        dark: Rgb::from_u32(0x12232E),
        icon: "fa-water",
    },
    ThemePalette {
        id: ThemeId::Forest,
        name: "Forest Green",
        primary: Rgb::from_u32(0x2E7D5A),
        secondary: Rgb::from_u32(0xE8F5E9),
        dark: Rgb::from_u32(0x1B3D2F),
        icon: "fa-leaf",
    },
    ThemePalette {
        id: ThemeId::Midnight,
        name: "Midnight",
        primary: Rgb::from_u32(0x6C5CE7),
        secondary: Rgb::from_u32(0xF0EEFF),
        dark: Rgb::from_u32(0x1A1A2E),
        icon: "fa-moon",
    },
    ThemePalette {
        id: ThemeId::Ember,
        name: "Ember Red",
        primary: Rgb::from_u32(0xC1432E),
        secondary: Rgb::from_u32(0xFDF2F0),
        dark: Rgb::from_u32(0x2C2C2C),
        icon: "fa-fire",
    },
    ThemePalette {
        id: ThemeId::Teal,
        name: "Modern Teal",
        primary: Rgb::from_u32(0x00A8A8),
        secondary: Rgb::from_u32(0xE6F7F7),
        dark: Rgb::from_u32(0x1A3A3A),
        icon: "fa-gem",
    },
];

/// Return the palette for a theme.
pub fn palette(theme: ThemeId) -> &'static ThemePalette {
    theme.palette()
}

/// Resolve a raw key to a palette, falling back to the default palette.
pub fn resolve_palette(key: &str) -> &'static ThemePalette {
    ThemeId::resolve(key).palette()
}

/// All built-in palettes in display order.
pub fn palettes() -> &'static [ThemePalette] {
    &THEMES
}

/// Return the total number of themes.
pub const fn theme_count() -> usize {
    ThemeId::ALL.len()
}
