#![forbid(unsafe_code)]

//! Switcher configuration.
//!
//! Every field defaults to the markup contract of the Hexagon Freight site,
//! so `SwitcherConfig::default()` works without any host-supplied settings.
//! Hosts with different markup pass a JSON object overriding only the fields
//! they need:
//!
//! ```json
//! { "storage_key": "acme-theme", "hero_image": "/img/hero.webp" }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use hexatheme_style::{
    ACTIVE_CLASS, DEFAULT_HERO_IMAGE, DYNAMIC_STYLE_ID, OPTION_CLASS, PANEL_ID, TOGGLE_ID,
};

/// Storage key under which the selected theme identifier is persisted.
pub const DEFAULT_STORAGE_KEY: &str = "hexagon-theme";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse switcher config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("switcher config validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),
}

/// Markup contract and persistence settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SwitcherConfig {
    /// Preference store key.
    pub storage_key: String,
    /// Id of the button that opens the panel.
    pub toggle_id: String,
    /// Id of the options panel.
    pub panel_id: String,
    /// Class carried by every theme option control.
    pub option_class: String,
    /// Attribute on an option control holding its theme key.
    pub theme_attribute: String,
    /// Class marking the active option.
    pub active_class: String,
    /// Class set on the panel while open.
    pub panel_open_class: String,
    /// Class set on the toggle while the panel is open.
    pub toggle_open_class: String,
    /// Id of the injected `<style>` element.
    pub style_element_id: String,
    /// Hero background image URL used by the injected sheet.
    pub hero_image: String,
    /// Persist the resolved key instead of the raw request, so an unknown
    /// key is stored as `"default"`.
    pub persist_resolved_key: bool,
}

impl Default for SwitcherConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            toggle_id: TOGGLE_ID.to_string(),
            panel_id: PANEL_ID.to_string(),
            option_class: OPTION_CLASS.to_string(),
            theme_attribute: "data-theme".to_string(),
            active_class: ACTIVE_CLASS.to_string(),
            panel_open_class: "open".to_string(),
            toggle_open_class: "panel-open".to_string(),
            style_element_id: DYNAMIC_STYLE_ID.to_string(),
            hero_image: DEFAULT_HERO_IMAGE.to_string(),
            persist_resolved_key: false,
        }
    }
}

impl SwitcherConfig {
    /// Parse and validate a JSON object. Missing fields take defaults.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        let errors = config.validate();
        if errors.is_empty() {
            Ok(config)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Selector matching every theme option control.
    pub fn option_selector(&self) -> String {
        format!(".{}", self.option_class)
    }

    /// Returns a list of validation errors; empty means valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.storage_key.trim().is_empty() {
            errors.push("storage_key must not be empty".into());
        }

        let identifiers = [
            ("toggle_id", &self.toggle_id),
            ("panel_id", &self.panel_id),
            ("option_class", &self.option_class),
            ("active_class", &self.active_class),
            ("panel_open_class", &self.panel_open_class),
            ("toggle_open_class", &self.toggle_open_class),
            ("style_element_id", &self.style_element_id),
        ];
        for (field, value) in identifiers {
            if !is_css_identifier(value) {
                errors.push(format!("{field} must be a CSS identifier, got {value:?}"));
            }
        }

        if self.toggle_id == self.panel_id {
            errors.push("toggle_id and panel_id must differ".into());
        }

        if !self.theme_attribute.starts_with("data-") || self.theme_attribute.len() <= 5 {
            errors.push(format!(
                "theme_attribute must be a data-* attribute, got {:?}",
                self.theme_attribute
            ));
        }

        // Interpolated raw into `url('...')`.
        if let Some(bad) = self
            .hero_image
            .chars()
            .find(|&ch| ch == '\'' || ch == '\\' || ch.is_control())
        {
            errors.push(format!(
                "hero_image must not contain quotes, backslashes or control characters: {bad:?}"
            ));
        }

        errors
    }
}

fn is_css_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' || first == '-' => {}
        _ => return false,
    }
    chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_')
}
