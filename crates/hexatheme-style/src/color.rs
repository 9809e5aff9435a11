//! Opaque sRGB colors and their CSS renderings.
//!
//! A palette stores every color once as an [`Rgb`]. The hex form
//! (`#FF4800`), the separable channel triple used for alpha compositing
//! (`255, 72, 0`), and `rgba(...)` shadows are all derived from it, so the
//! renderings can never disagree with each other.

#![forbid(unsafe_code)]

use core::fmt;

/// An opaque 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` value.
    #[must_use]
    pub const fn from_u32(packed: u32) -> Self {
        Self::new(
            ((packed >> 16) & 0xFF) as u8,
            ((packed >> 8) & 0xFF) as u8,
            (packed & 0xFF) as u8,
        )
    }

    /// Uppercase `#RRGGBB`.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Comma-separated channel triple, e.g. `255, 72, 0`.
    ///
    /// This is the value stored in `--primary-rgb` so stylesheets can write
    /// `rgba(var(--primary-rgb), 0.5)`.
    #[must_use]
    pub fn channels(self) -> String {
        format!("{}, {}, {}", self.r, self.g, self.b)
    }

    /// `rgba(r, g, b, alpha)` with the alpha printed in its shortest form.
    #[must_use]
    pub fn rgba(self, alpha: f32) -> String {
        format!("rgba({}, {alpha})", self.channels())
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Rgb {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
