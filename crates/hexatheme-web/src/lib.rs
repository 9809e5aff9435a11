#![forbid(unsafe_code)]

//! Browser host for Hexatheme.
//!
//! On `wasm32` this crate implements the document and preference ports over
//! `web-sys` ([`dom::WebDocument`], [`dom::WebStorage`]) and exports the JS
//! API: `initThemeSwitcher`, `initThemeSwitcherWithConfig`, `applyTheme`,
//! `toggleThemePanel`, `activeTheme` and `listThemes`.
//!
//! The payload helpers below are target-independent so they can be unit
//! tested natively.

mod error;

#[cfg(target_arch = "wasm32")]
pub mod dom;
#[cfg(target_arch = "wasm32")]
mod wasm;

pub use error::WebHostError;

use hexatheme_runtime::SwitcherConfig;
use hexatheme_style::palettes;

/// JSON array of every built-in palette, for hosts that render the option
/// buttons themselves.
pub fn themes_json() -> String {
    match serde_json::to_string(palettes()) {
        Ok(json) => json,
        Err(err) => {
            tracing::warn!(error = %err, "failed to serialize palettes");
            "[]".to_string()
        }
    }
}

/// Parse a host-supplied config, falling back to defaults on any error.
pub fn config_or_default(json: &str) -> SwitcherConfig {
    match SwitcherConfig::from_json_str(json) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(error = %err, "invalid switcher config, using defaults");
            SwitcherConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn themes_json_lists_every_palette() {
        let value: serde_json::Value = serde_json::from_str(&themes_json()).expect("valid json");
        let entries = value.as_array().expect("array");
        assert_eq!(entries.len(), 6);
        assert_eq!(entries[0]["id"], "default");
        assert_eq!(entries[0]["primary"], "#FF4800");
        assert_eq!(entries[0]["primaryRgb"], "255, 72, 0");
        assert_eq!(entries[5]["id"], "teal");
        assert_eq!(entries[5]["icon"], "fa-gem");
    }

    #[test]
    fn config_or_default_accepts_valid_json() {
        let config = config_or_default(r#"{"panel_id":"palette-panel"}"#);
        assert_eq!(config.panel_id, "palette-panel");
        assert_eq!(config.toggle_id, "theme-toggle");
    }

    #[test]
    fn config_or_default_falls_back() {
        assert_eq!(config_or_default("not json"), SwitcherConfig::default());
        assert_eq!(
            config_or_default(r#"{"toggle_id":"x","panel_id":"x"}"#),
            SwitcherConfig::default()
        );
    }
}
