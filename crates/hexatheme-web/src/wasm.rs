//! `wasm-bindgen` exports for the theme switcher.
//!
//! The page owns one switcher, created by `initThemeSwitcher`. Listener
//! closures and the exported functions share it through an `Rc<RefCell<_>>`.

use std::cell::RefCell;
use std::rc::Rc;

use hexatheme_backend::DocumentHost;
use hexatheme_runtime::{
    ListenerBinding, ListenerTarget, StartupAction, StartupGate, SwitcherConfig, ThemeSwitcher,
};
use js_sys::Reflect;
use wasm_bindgen::prelude::*;
use web_sys::{Element, Event, EventTarget, Node};

use crate::WebHostError;
use crate::dom::{WebDocument, WebStorage};

type WebSwitcher = ThemeSwitcher<WebDocument, WebStorage>;

thread_local! {
    static SWITCHER: RefCell<Option<Rc<RefCell<WebSwitcher>>>> = const { RefCell::new(None) };
    static GATE: RefCell<StartupGate> = RefCell::new(StartupGate::new());
}

fn install_panic_hook() {
    use std::sync::Once;
    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        std::panic::set_hook(Box::new(|info| {
            let global = js_sys::global();
            if let Ok(console) = Reflect::get(&global, &"console".into()) {
                if let Ok(error) = Reflect::get(&console, &"error".into()) {
                    if let Ok(f) = error.dyn_into::<js_sys::Function>() {
                        let _ = f.call1(&console, &JsValue::from_str(&format!("{info}")));
                    }
                }
            }
        }));
    });
}

fn to_js(err: WebHostError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Start the switcher with the default markup contract.
///
/// Runs immediately once the document is parsed, otherwise on
/// `DOMContentLoaded`. Later calls do nothing.
#[wasm_bindgen(js_name = initThemeSwitcher)]
pub fn init_theme_switcher() -> Result<(), JsValue> {
    start(SwitcherConfig::default()).map_err(to_js)
}

/// Start the switcher with a JSON config object. Invalid config is logged and
/// replaced by the defaults.
#[wasm_bindgen(js_name = initThemeSwitcherWithConfig)]
pub fn init_theme_switcher_with_config(json: &str) -> Result<(), JsValue> {
    start(crate::config_or_default(json)).map_err(to_js)
}

#[cfg(feature = "autostart")]
#[wasm_bindgen(start)]
pub fn autostart() -> Result<(), JsValue> {
    init_theme_switcher()
}

/// Apply a theme by identifier. Returns the resolved key, or `undefined` if
/// the switcher is not running yet.
#[wasm_bindgen(js_name = applyTheme)]
pub fn apply_theme(identifier: &str) -> Option<String> {
    with_switcher(|switcher| switcher.apply_theme(identifier).key().to_string())
}

/// Flip the options panel. Returns whether it is now open.
#[wasm_bindgen(js_name = toggleThemePanel)]
pub fn toggle_theme_panel() -> Option<bool> {
    with_switcher(|switcher| switcher.toggle_panel().is_open())
}

/// Key of the active theme.
#[wasm_bindgen(js_name = activeTheme)]
pub fn active_theme() -> Option<String> {
    with_switcher(|switcher| switcher.active_theme().key().to_string())
}

/// JSON array of the built-in palettes.
#[wasm_bindgen(js_name = listThemes)]
pub fn list_themes() -> String {
    crate::themes_json()
}

fn with_switcher<R>(f: impl FnOnce(&mut WebSwitcher) -> R) -> Option<R> {
    let Some(switcher) = SWITCHER.with(|slot| slot.borrow().clone()) else {
        tracing::debug!("theme switcher not initialized");
        return None;
    };
    match switcher.try_borrow_mut() {
        Ok(mut switcher) => Some(f(&mut switcher)),
        Err(_) => {
            tracing::trace!("theme switcher busy, call dropped");
            None
        }
    }
}

fn start(config: SwitcherConfig) -> Result<(), WebHostError> {
    install_panic_hook();
    let document = WebDocument::from_window()?;
    let action = GATE.with(|gate| gate.borrow_mut().request(document.ready_state()));
    match action {
        StartupAction::RunNow => boot(document, config),
        StartupAction::Defer => defer_until_ready(document, config),
        StartupAction::Skip => {
            tracing::debug!("theme switcher start already requested");
            Ok(())
        }
    }
}

fn defer_until_ready(document: WebDocument, config: SwitcherConfig) -> Result<(), WebHostError> {
    let target = document.inner().clone();
    let on_ready = Closure::once(move || {
        if !GATE.with(|gate| gate.borrow_mut().ready()) {
            return;
        }
        if let Err(err) = boot(document, config) {
            tracing::warn!(error = %err, "theme switcher failed to start");
        }
    });
    target.add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref())?;
    on_ready.forget();
    Ok(())
}

fn boot(document: WebDocument, config: SwitcherConfig) -> Result<(), WebHostError> {
    let page = document.inner().clone();
    let switcher = Rc::new(RefCell::new(ThemeSwitcher::new(
        document,
        WebStorage::from_window(),
        config,
    )));
    SWITCHER.with(|slot| *slot.borrow_mut() = Some(Rc::clone(&switcher)));

    let bindings = switcher.borrow_mut().init();
    for binding in bindings {
        attach(&page, &switcher, binding)?;
    }
    Ok(())
}

/// Nearest element for an event target; text nodes map to their parent.
fn event_element(event: &Event) -> Option<Element> {
    let node = event.target()?.dyn_into::<Node>().ok()?;
    match node.dyn_into::<Element>() {
        Ok(element) => Some(element),
        Err(node) => node.parent_element(),
    }
}

fn attach(
    page: &web_sys::Document,
    switcher: &Rc<RefCell<WebSwitcher>>,
    binding: ListenerBinding<Element>,
) -> Result<(), WebHostError> {
    let target: EventTarget = match &binding.target {
        ListenerTarget::Element(element) => element.clone().into(),
        ListenerTarget::Document => page.clone().into(),
    };
    let event_type = binding.kind.event_type();
    let switcher = Rc::clone(switcher);

    let handler = Closure::wrap(Box::new(move |event: Event| {
        let Some(dispatch) = binding.event_for(event_element(&event)) else {
            return;
        };
        match switcher.try_borrow_mut() {
            Ok(mut switcher) => switcher.handle(dispatch),
            Err(_) => tracing::trace!(event_type, "theme switcher busy, event dropped"),
        }
    }) as Box<dyn FnMut(Event)>);

    target.add_event_listener_with_callback(event_type, handler.as_ref().unchecked_ref())?;
    handler.forget();
    Ok(())
}
