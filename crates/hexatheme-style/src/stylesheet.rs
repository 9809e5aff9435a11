#![forbid(unsafe_code)]

//! The injected stylesheet.
//!
//! Inline overrides only reach elements that exist when a theme is applied,
//! and they cannot express pseudo-classes or pseudo-elements. The dynamic
//! stylesheet covers both: it restates the utility-class colors for elements
//! rendered later, and adds `:hover`, `:focus`, `:active` and `::after`
//! states parameterized by the palette.
//!
//! Rules are built as data ([`CssRule`]) and rendered in one pass, so tests
//! can inspect individual blocks without parsing CSS.

use core::fmt::{self, Write as _};

use crate::overrides::{PANEL_ID, TOGGLE_ID};
use crate::palette::ThemePalette;

/// Id of the `<style>` element that holds the rendered sheet.
pub const DYNAMIC_STYLE_ID: &str = "theme-dynamic-css";
/// Hero background image, relative to the stylesheet that references it.
pub const DEFAULT_HERO_IMAGE: &str = "../img/carousel-1.jpg";
/// Class carried by each theme option control.
pub const OPTION_CLASS: &str = "theme-option";
/// Class marking the option of the active theme.
pub const ACTIVE_CLASS: &str = "active";

const WHITE: &str = "#fff";
const INHERIT: &str = "inherit";

/// Icons forced white when they sit on a primary background.
const PRIMARY_BG_ICONS: [&str; 11] = [
    "fa-plane",
    "fa-ship",
    "fa-truck",
    "fa-store",
    "fa-phone-alt",
    "fa-envelope",
    "fa-map-marker-alt",
    "fa-clock",
    "fas",
    "far",
    "fab",
];

/// Footer contact icons that keep the surrounding text color.
const FOOTER_ICONS: [&str; 5] = [
    "fa-map-marker-alt",
    "fa-phone-alt",
    "fa-envelope",
    "fa-clock",
    "fa-angle-right",
];

/// Topbar social icons that keep the surrounding text color.
const TOPBAR_ICONS: [&str; 5] = [
    "fa-facebook-f",
    "fa-twitter",
    "fa-linkedin-in",
    "fa-instagram",
    "fa-youtube",
];

/// One declaration inside a rule block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssDeclaration {
    pub property: &'static str,
    pub value: String,
    pub important: bool,
}

/// A commented rule block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssRule {
    pub section: &'static str,
    pub selectors: Vec<String>,
    pub declarations: Vec<CssDeclaration>,
}

impl CssRule {
    fn new<S: Into<String>>(
        section: &'static str,
        selectors: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            section,
            selectors: selectors.into_iter().map(Into::into).collect(),
            declarations: Vec::new(),
        }
    }

    fn important(mut self, property: &'static str, value: impl fmt::Display) -> Self {
        self.declarations.push(CssDeclaration {
            property,
            value: value.to_string(),
            important: true,
        });
        self
    }

    fn plain(mut self, property: &'static str, value: impl fmt::Display) -> Self {
        self.declarations.push(CssDeclaration {
            property,
            value: value.to_string(),
            important: false,
        });
        self
    }

    /// Value of the first declaration of `property`, if any.
    pub fn value_of(&self, property: &str) -> Option<&str> {
        self.declarations
            .iter()
            .find(|decl| decl.property == property)
            .map(|decl| decl.value.as_str())
    }

    fn write_to(&self, out: &mut String) -> fmt::Result {
        writeln!(out, "/* {} */", self.section)?;
        writeln!(out, "{} {{", self.selectors.join(",\n"))?;
        for decl in &self.declarations {
            let bang = if decl.important { " !important" } else { "" };
            writeln!(out, "    {}: {}{bang};", decl.property, decl.value)?;
        }
        writeln!(out, "}}")
    }
}

/// Builder for the palette-parameterized stylesheet.
#[derive(Debug, Clone)]
pub struct DynamicStylesheet<'a> {
    palette: &'a ThemePalette,
    hero_image: &'a str,
    toggle_id: &'a str,
    panel_id: &'a str,
    option_class: &'a str,
    active_class: &'a str,
}

impl<'a> DynamicStylesheet<'a> {
    pub fn new(palette: &'a ThemePalette) -> Self {
        Self {
            palette,
            hero_image: DEFAULT_HERO_IMAGE,
            toggle_id: TOGGLE_ID,
            panel_id: PANEL_ID,
            option_class: OPTION_CLASS,
            active_class: ACTIVE_CLASS,
        }
    }

    #[must_use]
    pub fn hero_image(mut self, url: &'a str) -> Self {
        self.hero_image = url;
        self
    }

    #[must_use]
    pub fn toggle_id(mut self, id: &'a str) -> Self {
        self.toggle_id = id;
        self
    }

    #[must_use]
    pub fn panel_id(mut self, id: &'a str) -> Self {
        self.panel_id = id;
        self
    }

    #[must_use]
    pub fn option_class(mut self, class: &'a str) -> Self {
        self.option_class = class;
        self
    }

    #[must_use]
    pub fn active_class(mut self, class: &'a str) -> Self {
        self.active_class = class;
        self
    }

    /// Rule blocks in output order.
    pub fn rules(&self) -> Vec<CssRule> {
        let primary = self.palette.primary;
        let secondary = self.palette.secondary;
        let dark = self.palette.dark;
        let active_option = format!(".{}.{}", self.option_class, self.active_class);

        let mut on_primary_text = vec![".bg-primary".to_string()];
        on_primary_text.extend(
            ["h1", "h2", "h3", "h4", "h5", "h6", "p", "span", ".text-dark"]
                .iter()
                .map(|inner| format!(".bg-primary {inner}")),
        );

        vec![
            CssRule::new("CSS Variables", [":root"])
                .plain("--primary", primary)
                .plain("--primary-rgb", self.palette.primary_rgb())
                .plain("--secondary", secondary)
                .plain("--dark", dark),
            CssRule::new("Primary Backgrounds", [".bg-primary"])
                .important("background-color", primary),
            CssRule::new("Buttons", [".btn-primary"])
                .important("background-color", primary)
                .important("border-color", primary),
            CssRule::new(
                "Buttons",
                [
                    ".btn-primary:hover",
                    ".btn-primary:focus",
                    ".btn-primary:active",
                ],
            )
            .important("background-color", dark)
            .important("border-color", dark),
            CssRule::new("Text Primary", [".text-primary"]).important("color", primary),
            CssRule::new("Dark Backgrounds", [".bg-dark"]).important("background-color", dark),
            CssRule::new("Secondary Backgrounds", [".bg-secondary"])
                .important("background-color", secondary),
            CssRule::new("Border Primary", [".border-primary"]).important("border-color", primary),
            CssRule::new(
                "Navigation - Active and Hover States",
                [
                    ".navbar-light .navbar-nav .nav-link:hover",
                    ".navbar-light .navbar-nav .nav-link.active",
                ],
            )
            .important("color", WHITE)
            .important("background", primary),
            CssRule::new(
                "Navigation - Active and Hover States",
                [".navbar-nav .nav-link:hover", ".navbar-nav .nav-link.active"],
            )
            .important("color", WHITE),
            CssRule::new("Jumbotron", [".jumbotron"])
                .important(
                    "background",
                    format_args!(
                        concat!(
                            "linear-gradient(rgba(0, 0, 0, 0.7), rgba(0, 0, 0, 0.7)), ",
                            "url('{}') center center no-repeat",
                        ),
                        self.hero_image
                    ),
                )
                .important("background-size", "cover"),
            CssRule::new("Feature Icons", [".far.fa-dot-circle"]).important("color", primary),
            CssRule::new(
                "Text on primary background - always white for readability",
                on_primary_text,
            )
            .important("color", WHITE),
            CssRule::new(
                "Icons on primary background - always white",
                PRIMARY_BG_ICONS.iter().map(|icon| format!(".bg-primary .{icon}")),
            )
            .important("color", WHITE),
            CssRule::new("Navbar brand icon", [".navbar-brand .fa-truck"])
                .important("color", primary),
            CssRule::new(
                "Footer icons - keep white",
                FOOTER_ICONS.iter().map(|icon| format!(".bg-dark .{icon}")),
            )
            .important("color", INHERIT),
            CssRule::new("Social icons in footer", [".bg-dark .fab"]).important("color", INHERIT),
            CssRule::new(
                "Topbar icons",
                TOPBAR_ICONS.iter().map(|icon| format!(".bg-dark .{icon}")),
            )
            .important("color", INHERIT),
            CssRule::new("Footer Links", [".bg-dark a:hover"]).important("color", primary),
            CssRule::new("Read More Links", ["a.border-bottom"])
                .important("color", primary)
                .important("border-color", primary),
            CssRule::new("Read More Links", ["a.border-bottom:hover"]).important("color", dark),
            CssRule::new("Blog Bookmark", [".far.fa-bookmark"]).important("color", primary),
            CssRule::new("Back to Top", [".back-to-top"]).important("background-color", primary),
            CssRule::new("Back to Top", [".back-to-top:hover"]).important("background-color", dark),
            CssRule::new("Social Buttons", [".btn-outline-light:hover"])
                .important("background-color", primary)
                .important("border-color", primary),
            CssRule::new("Theme Panel", [active_option.clone()]).important("border-color", primary),
            CssRule::new("Theme Panel", [format!("{active_option}::after")])
                .important("background", primary),
            CssRule::new("Theme Panel", [format!("#{}", self.toggle_id)])
                .important("background", primary),
            CssRule::new("Theme Panel", [format!("#{} h5 i", self.panel_id)])
                .important("color", primary),
        ]
    }

    /// Render every rule block.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(4096);
        for (idx, rule) in self.rules().iter().enumerate() {
            if idx > 0 {
                out.push('\n');
            }
            // Writing into a String cannot fail.
            let _ = rule.write_to(&mut out);
        }
        out
    }
}

impl fmt::Display for DynamicStylesheet<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
