#![forbid(unsafe_code)]

//! Theme application against a [`DocumentHost`] and a [`PreferenceStore`].
//!
//! One call to [`ThemeApplier::apply_theme`] runs a fixed sequence:
//!
//! 1. root color variables (`--primary`, `--secondary`, `--dark`, `--primary-rgb`)
//! 2. shadow variables derived from the primary RGB triple
//! 3. inline `!important` overrides on already-rendered elements
//! 4. the injected `<style>` block for hover, pseudo-element and late markup
//! 5. the persisted preference
//! 6. the active marker on theme option controls
//!
//! Port failures never abort the sequence. Each one is logged at `warn` and
//! the next step runs.

use hexatheme_backend::{DocumentHost, PreferenceStore};
use hexatheme_style::{
    DynamicStylesheet, ELEMENT_OVERRIDES, InteractionState, OutlineHover, StylePriority,
    StyleProperty, ThemeId, ThemePalette, root_variables, toggle_gradient,
};

use crate::config::SwitcherConfig;

/// Applies palettes to the live document and remembers the active one.
#[derive(Debug)]
pub struct ThemeApplier<D, S> {
    document: D,
    store: S,
    config: SwitcherConfig,
    active: ThemeId,
}

impl<D: DocumentHost, S: PreferenceStore> ThemeApplier<D, S> {
    /// Create an applier. Nothing touches the document until the first
    /// [`apply_theme`](Self::apply_theme).
    pub fn new(document: D, store: S, config: SwitcherConfig) -> Self {
        Self {
            document,
            store,
            config,
            active: ThemeId::Default,
        }
    }

    /// Apply the palette named by `identifier`.
    ///
    /// Unknown identifiers fall back to the default palette. The raw
    /// identifier (not the resolved key) is what gets persisted and matched
    /// against option controls unless `persist_resolved_key` is set.
    pub fn apply_theme(&mut self, identifier: &str) -> ThemeId {
        let theme = match ThemeId::from_key(identifier) {
            Some(theme) => theme,
            None => {
                tracing::warn!(
                    requested = identifier,
                    fallback = ThemeId::Default.key(),
                    "unknown theme identifier"
                );
                ThemeId::Default
            }
        };
        let palette = theme.palette();
        tracing::debug!(theme = theme.key(), requested = identifier, "applying theme");

        self.set_root_variables(palette);
        self.apply_to_elements(palette);
        self.update_dynamic_css(palette);

        let recorded = if self.config.persist_resolved_key {
            theme.key()
        } else {
            identifier
        };
        if let Err(err) = self.store.store(&self.config.storage_key, recorded) {
            tracing::warn!(key = %self.config.storage_key, error = %err, "failed to persist theme");
        }

        self.update_theme_ui(recorded);
        self.active = theme;
        theme
    }

    fn set_root_variables(&mut self, palette: &ThemePalette) {
        for (name, value) in root_variables(palette) {
            if let Err(err) = self.document.set_root_property(name, &value) {
                tracing::warn!(variable = name, error = %err, "failed to set root variable");
            }
        }
    }

    /// Force palette colors onto elements that are already in the document.
    pub fn apply_to_elements(&mut self, palette: &ThemePalette) {
        for rule in &ELEMENT_OVERRIDES {
            let elements = match self.document.query_all(rule.selector) {
                Ok(elements) => elements,
                Err(err) => {
                    tracing::warn!(selector = rule.selector, error = %err, "override query failed");
                    continue;
                }
            };
            for element in &elements {
                for &(property, slot) in rule.declarations {
                    let value = slot.color(palette).to_hex();
                    if let Err(err) = self.document.set_style(
                        element,
                        property.as_str(),
                        &value,
                        StylePriority::Important,
                    ) {
                        tracing::warn!(
                            selector = rule.selector,
                            property = property.as_str(),
                            error = %err,
                            "failed to set inline override"
                        );
                    }
                }
            }
        }

        if let Some(toggle) = self.document.element_by_id(&self.config.toggle_id) {
            let gradient = toggle_gradient(palette);
            if let Err(err) = self.document.set_style(
                &toggle,
                StyleProperty::Background.as_str(),
                &gradient,
                StylePriority::Normal,
            ) {
                tracing::warn!(error = %err, "failed to paint theme toggle");
            }
        }
    }

    /// Replace the injected stylesheet with one rendered for `palette`.
    pub fn update_dynamic_css(&mut self, palette: &ThemePalette) {
        let css = DynamicStylesheet::new(palette)
            .hero_image(&self.config.hero_image)
            .toggle_id(&self.config.toggle_id)
            .panel_id(&self.config.panel_id)
            .option_class(&self.config.option_class)
            .active_class(&self.config.active_class)
            .render();
        if let Err(err) = self
            .document
            .replace_head_style(&self.config.style_element_id, &css)
        {
            tracing::warn!(
                id = %self.config.style_element_id,
                error = %err,
                "failed to inject stylesheet"
            );
        }
    }

    /// Mark exactly the option controls whose theme attribute equals
    /// `identifier` as active.
    pub fn update_theme_ui(&mut self, identifier: &str) {
        let options = match self.document.query_all(&self.config.option_selector()) {
            Ok(options) => options,
            Err(err) => {
                tracing::warn!(error = %err, "theme option query failed");
                return;
            }
        };
        for option in &options {
            let selected = self
                .document
                .attribute(option, &self.config.theme_attribute)
                .is_some_and(|value| value == identifier);
            if let Err(err) = self
                .document
                .set_class(option, &self.config.active_class, selected)
            {
                tracing::warn!(error = %err, "failed to update theme option");
            }
        }
    }

    /// Pointer entered an outline button.
    pub fn hover_enter(&mut self, element: &D::Element) {
        self.apply_hover(element, InteractionState::Hovered);
    }

    /// Pointer left an outline button.
    pub fn hover_leave(&mut self, element: &D::Element) {
        self.apply_hover(element, InteractionState::Normal);
    }

    fn apply_hover(&mut self, element: &D::Element, state: InteractionState) {
        for change in OutlineHover::new(self.active.palette()).resolve(state) {
            if let Err(err) = self.document.apply_style_change(element, &change) {
                tracing::warn!(?state, error = %err, "failed to apply hover style");
            }
        }
    }

    pub fn active_theme(&self) -> ThemeId {
        self.active
    }

    pub fn active_palette(&self) -> &'static ThemePalette {
        self.active.palette()
    }

    pub fn config(&self) -> &SwitcherConfig {
        &self.config
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut D {
        &mut self.document
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Read the persisted identifier, if the store has one.
    pub fn load_preference(&self) -> Option<String> {
        match self.store.load(&self.config.storage_key) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(
                    key = %self.config.storage_key,
                    error = %err,
                    "failed to read theme preference"
                );
                None
            }
        }
    }

    /// Tear down, returning the ports.
    pub fn into_parts(self) -> (D, S) {
        (self.document, self.store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexatheme_backend::memory::{ElementSpec, MemoryDocument, MemoryStore, NodeId};
    use pretty_assertions::assert_eq;
    use tracing_test::traced_test;

    fn applier(doc: MemoryDocument) -> ThemeApplier<MemoryDocument, MemoryStore> {
        ThemeApplier::new(doc, MemoryStore::new(), SwitcherConfig::default())
    }

    fn page() -> (MemoryDocument, NodeId, NodeId, NodeId) {
        let mut doc = MemoryDocument::new();
        let body = doc.body();
        let hero = doc.append(body, ElementSpec::new("div").class("jumbotron"));
        let button = doc.append(body, ElementSpec::new("a").class("btn btn-primary"));
        let footer = doc.append(body, ElementSpec::new("div").class("bg-dark"));
        (doc, hero, button, footer)
    }

    #[test]
    fn root_variables_follow_palette() {
        let (doc, ..) = page();
        let mut applier = applier(doc);
        assert_eq!(applier.apply_theme("ocean"), ThemeId::Ocean);

        let doc = applier.document();
        assert_eq!(doc.root_property("--primary"), Some("#007CC7"));
        assert_eq!(doc.root_property("--secondary"), Some("#E8F4F8"));
        assert_eq!(doc.root_property("--dark"), Some("#12232E"));
        assert_eq!(doc.root_property("--primary-rgb"), Some("0, 124, 199"));
        assert_eq!(
            doc.root_property("--shadow-primary"),
            Some("0 8px 24px rgba(0, 124, 199, 0.25)")
        );
        assert_eq!(
            doc.root_property("--shadow-primary-lg"),
            Some("0 12px 32px rgba(0, 124, 199, 0.3)")
        );
    }

    #[test]
    fn element_overrides_are_important() {
        let (doc, hero, button, footer) = page();
        let mut applier = applier(doc);
        applier.apply_theme("forest");

        let doc = applier.document();
        assert_eq!(doc.style_value(hero, "background-color"), Some("#2E7D5A"));
        assert_eq!(doc.style_value(button, "background-color"), Some("#2E7D5A"));
        assert_eq!(doc.style_value(button, "border-color"), Some("#2E7D5A"));
        assert_eq!(
            doc.style_priority(button, "border-color"),
            Some(StylePriority::Important)
        );
        assert_eq!(doc.style_value(footer, "background-color"), Some("#1B3D2F"));
    }

    #[test]
    fn nested_link_in_text_primary_is_colored() {
        let mut doc = MemoryDocument::new();
        let body = doc.body();
        let wrap = doc.append(body, ElementSpec::new("h5").class("text-primary"));
        let link = doc.append(wrap, ElementSpec::new("a"));
        let mut applier = applier(doc);
        applier.apply_theme("ember");
        assert_eq!(applier.document().style_value(link, "color"), Some("#C1432E"));
    }

    #[test]
    fn toggle_gets_normal_priority_gradient() {
        let mut doc = MemoryDocument::new();
        let body = doc.body();
        let toggle = doc.append(body, ElementSpec::new("button").id("theme-toggle"));
        let mut applier = applier(doc);
        applier.apply_theme("midnight");

        let doc = applier.document();
        assert_eq!(
            doc.style_value(toggle, "background"),
            Some("linear-gradient(135deg, #6C5CE7 0%, #1A1A2E 100%)")
        );
        assert_eq!(
            doc.style_priority(toggle, "background"),
            Some(StylePriority::Normal)
        );
    }

    #[test]
    fn dynamic_css_is_replaced_not_stacked() {
        let mut applier = applier(MemoryDocument::new());
        applier.apply_theme("teal");
        applier.apply_theme("ember");

        let doc = applier.document();
        let styles = doc.head_styles("theme-dynamic-css");
        assert_eq!(styles.len(), 1);
        let css = doc.text(styles[0]);
        assert!(css.contains("--primary: #C1432E"));
        assert!(!css.contains("#00A8A8"));
    }

    #[test]
    fn hero_image_comes_from_config() {
        let config = SwitcherConfig {
            hero_image: "/img/hero.webp".into(),
            ..SwitcherConfig::default()
        };
        let mut applier = ThemeApplier::new(MemoryDocument::new(), MemoryStore::new(), config);
        applier.apply_theme("default");
        let doc = applier.document();
        let styles = doc.head_styles("theme-dynamic-css");
        assert!(doc.text(styles[0]).contains("url('/img/hero.webp')"));
    }

    #[test]
    fn update_theme_ui_marks_matching_options() {
        let mut doc = MemoryDocument::new();
        let body = doc.body();
        let panel = doc.append(body, ElementSpec::new("div").id("theme-panel"));
        let ocean = doc.append(
            panel,
            ElementSpec::new("button")
                .class("theme-option active")
                .attr("data-theme", "ocean"),
        );
        let teal = doc.append(
            panel,
            ElementSpec::new("button")
                .class("theme-option")
                .attr("data-theme", "teal"),
        );
        let mut applier = applier(doc);

        applier.update_theme_ui("teal");
        assert!(!applier.document().has_class(&ocean, "active"));
        assert!(applier.document().has_class(&teal, "active"));

        applier.update_theme_ui("sepia");
        assert!(!applier.document().has_class(&ocean, "active"));
        assert!(!applier.document().has_class(&teal, "active"));
    }

    #[test]
    fn raw_identifier_is_persisted_by_default() {
        let mut applier = applier(MemoryDocument::new());
        assert_eq!(applier.apply_theme("sepia"), ThemeId::Default);
        assert_eq!(applier.store().get("hexagon-theme"), Some("sepia"));
        assert_eq!(applier.active_palette().name, "Sunset Orange");
    }

    #[test]
    fn resolved_key_is_persisted_when_configured() {
        let config = SwitcherConfig {
            persist_resolved_key: true,
            ..SwitcherConfig::default()
        };
        let mut applier = ThemeApplier::new(MemoryDocument::new(), MemoryStore::new(), config);
        applier.apply_theme("sepia");
        assert_eq!(applier.store().get("hexagon-theme"), Some("default"));
    }

    #[test]
    fn hover_reads_current_palette() {
        let mut doc = MemoryDocument::new();
        let body = doc.body();
        let outline = doc.append(body, ElementSpec::new("a").class("btn btn-outline-light"));
        let mut applier = applier(doc);

        applier.apply_theme("ocean");
        applier.hover_enter(&outline);
        assert_eq!(
            applier.document().style_value(outline, "background-color"),
            Some("#007CC7")
        );

        applier.apply_theme("ember");
        applier.hover_enter(&outline);
        assert_eq!(
            applier.document().style_value(outline, "border-color"),
            Some("#C1432E")
        );

        applier.hover_leave(&outline);
        let doc = applier.document();
        assert_eq!(doc.style_value(outline, "background-color"), None);
        assert_eq!(doc.style_value(outline, "border-color"), Some("#fff"));
        assert_eq!(
            doc.style_priority(outline, "border-color"),
            Some(StylePriority::Important)
        );
    }

    #[traced_test]
    #[test]
    fn unknown_identifier_logs_fallback() {
        let mut applier = applier(MemoryDocument::new());
        applier.apply_theme("sepia");
        assert!(logs_contain("unknown theme identifier"));
        assert!(logs_contain("sepia"));
    }

    #[traced_test]
    #[test]
    fn store_failure_is_logged_and_rest_still_runs() {
        let mut doc = MemoryDocument::new();
        let body = doc.body();
        let option = doc.append(
            body,
            ElementSpec::new("button")
                .class("theme-option")
                .attr("data-theme", "forest"),
        );
        let mut applier = ThemeApplier::new(
            doc,
            MemoryStore::new().read_only(),
            SwitcherConfig::default(),
        );

        assert_eq!(applier.apply_theme("forest"), ThemeId::Forest);
        assert!(logs_contain("failed to persist theme"));
        assert!(applier.document().has_class(&option, "active"));
        assert_eq!(applier.document().root_property("--primary"), Some("#2E7D5A"));
    }

    #[traced_test]
    #[test]
    fn unavailable_store_reads_as_missing() {
        let applier = ThemeApplier::new(
            MemoryDocument::new(),
            MemoryStore::new().unavailable(),
            SwitcherConfig::default(),
        );
        assert_eq!(applier.load_preference(), None);
        assert!(logs_contain("failed to read theme preference"));
    }
}
