#![forbid(unsafe_code)]

//! End-to-end switching against the in-memory document.
//!
//! Run:
//!   cargo test -p hexatheme-runtime --test theme_switching

use hexatheme_backend::DocumentHost;
use hexatheme_backend::memory::{ElementSpec, MemoryDocument, MemoryStore, NodeId};
use hexatheme_runtime::{
    BindingRole, ListenerTarget, PanelState, SwitcherConfig, SwitcherEvent, ThemeApplier, ThemeId,
    ThemeSwitcher,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

// ============================================================================
// Fixtures
// ============================================================================

/// A trimmed Hexagon Freight page: topbar, hero, services, footer, theme panel.
struct SitePage {
    doc: MemoryDocument,
    hero: NodeId,
    service_icon: NodeId,
    date_badge: NodeId,
    footer: NodeId,
    light_section: NodeId,
    toggle: NodeId,
    panel: NodeId,
    options: Vec<NodeId>,
}

fn site_page() -> SitePage {
    let mut doc = MemoryDocument::new();
    let body = doc.body();

    let hero = doc.append(body, ElementSpec::new("div").class("jumbotron jumbotron-fluid"));
    doc.append(hero, ElementSpec::new("a").class("btn btn-primary"));

    let services = doc.append(body, ElementSpec::new("div").class("container-fluid"));
    let service_icon = doc.append(
        services,
        ElementSpec::new("div")
            .class("d-flex align-items-center justify-content-center bg-primary"),
    );
    let date_badge = doc.append(
        services,
        ElementSpec::new("div").class("position-absolute bg-primary rounded-circle"),
    );
    let light_section = doc.append(body, ElementSpec::new("div").class("bg-secondary"));

    let footer = doc.append(body, ElementSpec::new("div").class("bg-dark"));
    for _ in 0..3 {
        doc.append(footer, ElementSpec::new("a").class("btn btn-outline-light"));
    }

    let toggle = doc.append(body, ElementSpec::new("button").id("theme-toggle"));
    let panel = doc.append(body, ElementSpec::new("div").id("theme-panel"));
    let options = ThemeId::ALL
        .iter()
        .map(|theme| {
            doc.append(
                panel,
                ElementSpec::new("button")
                    .class("theme-option")
                    .attr("data-theme", theme.key()),
            )
        })
        .collect();

    SitePage {
        doc,
        hero,
        service_icon,
        date_badge,
        footer,
        light_section,
        toggle,
        panel,
        options,
    }
}

/// Visual state of a page: root variables, inline styles, injected CSS.
fn snapshot(doc: &MemoryDocument, nodes: &[NodeId]) -> Vec<Option<String>> {
    let mut out: Vec<Option<String>> = [
        "--primary",
        "--secondary",
        "--dark",
        "--primary-rgb",
        "--shadow-primary",
        "--shadow-primary-lg",
    ]
    .iter()
    .map(|name| doc.root_property(name).map(str::to_string))
    .collect();
    for &node in nodes {
        for property in ["background-color", "border-color", "color", "background"] {
            out.push(doc.style_value(node, property).map(str::to_string));
        }
    }
    out.extend(
        doc.head_styles("theme-dynamic-css")
            .into_iter()
            .map(|style| Some(doc.text(style).to_string())),
    );
    out
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn every_builtin_theme_sets_primary() {
    let expected = [
        ("default", "#FF4800"),
        ("ocean", "#007CC7"),
        ("forest", "#2E7D5A"),
        ("midnight", "#6C5CE7"),
        ("ember", "#C1432E"),
        ("teal", "#00A8A8"),
    ];
    let page = site_page();
    let mut switcher = ThemeSwitcher::new(page.doc, MemoryStore::new(), SwitcherConfig::default());
    switcher.init();

    for (key, primary) in expected {
        switcher.apply_theme(key);
        assert_eq!(switcher.document().root_property("--primary"), Some(primary), "{key}");
        assert_eq!(
            switcher.document().style_value(page.hero, "background-color"),
            Some(primary),
            "{key}"
        );
    }
}

#[test]
fn known_ids_set_all_four_root_variables() {
    for theme in ThemeId::ALL {
        let palette = theme.palette();
        let mut applier =
            ThemeApplier::new(MemoryDocument::new(), MemoryStore::new(), SwitcherConfig::default());
        applier.apply_theme(theme.key());
        let doc = applier.document();
        assert_eq!(doc.root_property("--primary"), Some(palette.primary.to_hex().as_str()));
        assert_eq!(doc.root_property("--secondary"), Some(palette.secondary.to_hex().as_str()));
        assert_eq!(doc.root_property("--dark"), Some(palette.dark.to_hex().as_str()));
        assert_eq!(doc.root_property("--primary-rgb"), Some(palette.primary_rgb().as_str()));
    }
}

#[test]
fn service_icons_badges_and_sections_follow_theme() {
    let page = site_page();
    let mut switcher = ThemeSwitcher::new(page.doc, MemoryStore::new(), SwitcherConfig::default());
    switcher.init();
    switcher.apply_theme("teal");

    let doc = switcher.document();
    assert_eq!(doc.style_value(page.service_icon, "background-color"), Some("#00A8A8"));
    assert_eq!(doc.style_value(page.date_badge, "background-color"), Some("#00A8A8"));
    assert_eq!(doc.style_value(page.light_section, "background-color"), Some("#E6F7F7"));
    assert_eq!(doc.style_value(page.footer, "background-color"), Some("#1A3A3A"));
}

#[test]
fn repeated_application_keeps_one_style_element() {
    let page = site_page();
    let mut switcher = ThemeSwitcher::new(page.doc, MemoryStore::new(), SwitcherConfig::default());
    switcher.init();
    for key in ["ocean", "ocean", "forest", "nope", "teal"] {
        switcher.apply_theme(key);
        assert_eq!(switcher.document().head_styles("theme-dynamic-css").len(), 1);
    }
}

#[test]
fn preference_survives_a_reload() {
    let page = site_page();
    let mut first = ThemeSwitcher::new(page.doc, MemoryStore::new(), SwitcherConfig::default());
    first.init();
    first.handle(SwitcherEvent::OptionClicked(page.options[3]));
    let (_, store) = first.into_parts();
    assert_eq!(store.get("hexagon-theme"), Some("midnight"));

    let reloaded = site_page();
    let mut second = ThemeSwitcher::new(reloaded.doc, store, SwitcherConfig::default());
    second.init();
    assert_eq!(second.active_theme(), ThemeId::Midnight);
    assert_eq!(second.document().root_property("--primary"), Some("#6C5CE7"));
    assert!(second.document().has_class(&reloaded.options[3], "active"));
}

#[test]
fn custom_storage_key_is_used() {
    let config = SwitcherConfig::from_json_str(r#"{"storage_key":"acme-theme"}"#).expect("config");
    let store = MemoryStore::new()
        .with_entry("acme-theme", "forest")
        .with_entry("hexagon-theme", "ember");
    let mut switcher = ThemeSwitcher::new(MemoryDocument::new(), store, config);
    switcher.init();
    assert_eq!(switcher.active_theme(), ThemeId::Forest);
}

#[test]
fn store_unavailable_still_themes_page() {
    let page = site_page();
    let mut switcher = ThemeSwitcher::new(
        page.doc,
        MemoryStore::new().unavailable(),
        SwitcherConfig::default(),
    );
    let bindings = switcher.init();
    assert!(!bindings.is_empty());
    assert_eq!(switcher.active_theme(), ThemeId::Default);

    switcher.handle(SwitcherEvent::OptionClicked(page.options[1]));
    assert_eq!(switcher.active_theme(), ThemeId::Ocean);
    assert_eq!(switcher.store().get("hexagon-theme"), None);
}

#[test]
fn bindings_drive_the_panel() {
    let page = site_page();
    let mut switcher = ThemeSwitcher::new(page.doc, MemoryStore::new(), SwitcherConfig::default());
    let bindings = switcher.init();

    let toggle = bindings
        .iter()
        .find(|b| b.role == BindingRole::PanelToggle)
        .expect("toggle binding");
    assert_eq!(toggle.target, ListenerTarget::Element(page.toggle));
    let outside = bindings
        .iter()
        .find(|b| b.role == BindingRole::OutsideClick)
        .expect("document binding");

    let event = toggle.event_for(Some(page.toggle)).expect("toggle event");
    switcher.handle(event);
    assert_eq!(switcher.panel_state(), PanelState::Open);

    // The toggle click bubbles to the document listener too.
    let event = outside.event_for(Some(page.toggle)).expect("bubbled event");
    switcher.handle(event);
    assert_eq!(switcher.panel_state(), PanelState::Open);

    let event = outside.event_for(Some(page.options[0])).expect("inside event");
    switcher.handle(event);
    assert_eq!(switcher.panel_state(), PanelState::Open);
    assert!(switcher.document().has_class(&page.panel, "open"));

    let event = outside.event_for(Some(page.hero)).expect("outside event");
    switcher.handle(event);
    assert_eq!(switcher.panel_state(), PanelState::Closed);
    assert!(!switcher.document().has_class(&page.panel, "open"));
    assert!(!switcher.document().has_class(&page.toggle, "panel-open"));
}

#[test]
fn hover_bindings_exist_once_per_outline_button() {
    let page = site_page();
    let mut switcher = ThemeSwitcher::new(page.doc, MemoryStore::new(), SwitcherConfig::default());
    let bindings = switcher.init();
    for key in ["ocean", "forest", "ember"] {
        switcher.apply_theme(key);
    }
    let hover = bindings
        .iter()
        .filter(|b| b.role == BindingRole::OutlineHover)
        .count();
    assert_eq!(hover, 6);
    assert!(switcher.init().is_empty());
}

#[test]
fn update_theme_ui_marks_exactly_the_matches() {
    let page = site_page();
    let mut applier = ThemeApplier::new(page.doc, MemoryStore::new(), SwitcherConfig::default());
    for (index, theme) in ThemeId::ALL.iter().enumerate() {
        applier.update_theme_ui(theme.key());
        let active: Vec<usize> = page
            .options
            .iter()
            .enumerate()
            .filter(|(_, option)| applier.document().has_class(option, "active"))
            .map(|(i, _)| i)
            .collect();
        assert_eq!(active, vec![index]);
    }
    applier.update_theme_ui("unknown");
    assert!(
        page.options
            .iter()
            .all(|option| !applier.document().has_class(option, "active"))
    );
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn unknown_identifier_looks_like_default(raw in "[a-z0-9_-]{0,16}") {
        prop_assume!(ThemeId::from_key(&raw).is_none());

        let page = site_page();
        let nodes = [page.hero, page.service_icon, page.date_badge, page.footer, page.toggle];

        let mut unknown =
            ThemeApplier::new(page.doc.clone(), MemoryStore::new(), SwitcherConfig::default());
        unknown.apply_theme(&raw);
        let mut baseline =
            ThemeApplier::new(page.doc, MemoryStore::new(), SwitcherConfig::default());
        baseline.apply_theme("default");

        prop_assert_eq!(unknown.active_theme(), ThemeId::Default);
        prop_assert_eq!(
            snapshot(unknown.document(), &nodes),
            snapshot(baseline.document(), &nodes)
        );
        prop_assert_eq!(unknown.store().get("hexagon-theme"), Some(raw.as_str()));
    }

    #[test]
    fn stored_identifier_is_exactly_the_request(index in 0usize..6) {
        let theme = ThemeId::ALL[index];
        let mut applier =
            ThemeApplier::new(MemoryDocument::new(), MemoryStore::new(), SwitcherConfig::default());
        applier.apply_theme(theme.key());
        prop_assert_eq!(applier.store().get("hexagon-theme"), Some(theme.key()));
    }
}
