#![forbid(unsafe_code)]

//! `web-sys` implementations of the document and preference ports.

use hexatheme_backend::{DocumentHost, PreferenceStore, ReadyState};
use hexatheme_style::StylePriority;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CssStyleDeclaration, Document, Element, HtmlElement, Node, Storage};

use crate::WebHostError;

impl From<JsValue> for WebHostError {
    fn from(value: JsValue) -> Self {
        Self::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

/// The page's live document.
#[derive(Debug, Clone)]
pub struct WebDocument {
    document: Document,
}

impl WebDocument {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    /// The document of the global window.
    pub fn from_window() -> Result<Self, WebHostError> {
        let window = web_sys::window().ok_or(WebHostError::NoWindow)?;
        let document = window.document().ok_or(WebHostError::NoDocument)?;
        Ok(Self::new(document))
    }

    pub fn inner(&self) -> &Document {
        &self.document
    }
}

fn inline_style(element: &Element) -> Result<CssStyleDeclaration, WebHostError> {
    element
        .dyn_ref::<HtmlElement>()
        .map(HtmlElement::style)
        .ok_or(WebHostError::NotStylable)
}

impl DocumentHost for WebDocument {
    type Element = Element;
    type Error = WebHostError;

    fn ready_state(&self) -> ReadyState {
        ReadyState::parse(&self.document.ready_state())
    }

    fn set_root_property(&mut self, name: &str, value: &str) -> Result<(), Self::Error> {
        let root = self
            .document
            .document_element()
            .ok_or(WebHostError::NoRoot)?;
        inline_style(&root)?.set_property(name, value)?;
        Ok(())
    }

    fn query_all(&self, selector: &str) -> Result<Vec<Element>, Self::Error> {
        let list = self.document.query_selector_all(selector)?;
        Ok((0..list.length())
            .filter_map(|index| list.item(index))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect())
    }

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn set_style(
        &mut self,
        element: &Element,
        property: &str,
        value: &str,
        priority: StylePriority,
    ) -> Result<(), Self::Error> {
        inline_style(element)?.set_property_with_priority(property, value, priority.as_str())?;
        Ok(())
    }

    fn remove_style(&mut self, element: &Element, property: &str) -> Result<(), Self::Error> {
        inline_style(element)?.remove_property(property)?;
        Ok(())
    }

    fn replace_head_style(&mut self, id: &str, css: &str) -> Result<(), Self::Error> {
        while let Some(stale) = self.document.get_element_by_id(id) {
            stale.remove();
        }
        let head = self.document.head().ok_or(WebHostError::NoHead)?;
        let style = self.document.create_element("style")?;
        style.set_id(id);
        style.set_text_content(Some(css));
        head.append_child(&style)?;
        Ok(())
    }

    fn add_class(&mut self, element: &Element, class: &str) -> Result<(), Self::Error> {
        element.class_list().add_1(class)?;
        Ok(())
    }

    fn remove_class(&mut self, element: &Element, class: &str) -> Result<(), Self::Error> {
        element.class_list().remove_1(class)?;
        Ok(())
    }

    fn has_class(&self, element: &Element, class: &str) -> bool {
        element.class_list().contains(class)
    }

    fn attribute(&self, element: &Element, name: &str) -> Option<String> {
        element.get_attribute(name)
    }

    fn contains(&self, ancestor: &Element, node: &Element) -> bool {
        let node: &Node = node;
        ancestor.contains(Some(node))
    }
}

/// `localStorage`, or nothing when the browser refuses access.
#[derive(Debug, Clone, Default)]
pub struct WebStorage {
    storage: Option<Storage>,
}

impl WebStorage {
    pub fn new(storage: Storage) -> Self {
        Self {
            storage: Some(storage),
        }
    }

    /// Local storage of the global window. Private browsing modes may deny
    /// access; the store then fails every operation.
    pub fn from_window() -> Self {
        let storage = web_sys::window().and_then(|window| window.local_storage().ok().flatten());
        if storage.is_none() {
            tracing::warn!("local storage unavailable, theme choice will not persist");
        }
        Self { storage }
    }

    fn storage(&self) -> Result<&Storage, WebHostError> {
        self.storage.as_ref().ok_or(WebHostError::StorageUnavailable)
    }
}

impl PreferenceStore for WebStorage {
    type Error = WebHostError;

    fn load(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.storage()?.get_item(key)?)
    }

    fn store(&mut self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.storage()?.set_item(key, value)?;
        Ok(())
    }
}
