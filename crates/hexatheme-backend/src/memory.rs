//! In-memory document and preference store.
//!
//! Deterministic stand-ins for the browser used by the runtime's tests. The
//! document is an arena of element nodes with a selector matcher that
//! understands the subset of CSS the switcher queries: type, class and id
//! selectors, compound selectors, descendant combinators, and selector lists.

#![forbid(unsafe_code)]

use std::collections::BTreeMap;
use std::fmt;

use hexatheme_style::StylePriority;

use crate::{DocumentHost, PreferenceStore, ReadyState};

/// Errors reported by the in-memory hosts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemoryHostError {
    /// Selector uses syntax the matcher does not implement.
    UnsupportedSelector(String),
    /// Store rejects writes (quota exceeded, private browsing).
    ReadOnly,
    /// Store cannot be opened at all.
    Unavailable,
}

impl fmt::Display for MemoryHostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedSelector(sel) => write!(f, "unsupported selector: {sel}"),
            Self::ReadOnly => write!(f, "preference store is read-only"),
            Self::Unavailable => write!(f, "preference store is unavailable"),
        }
    }
}

impl std::error::Error for MemoryHostError {}

/// Handle to a node in a [`MemoryDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// One inline style entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineDeclaration {
    pub value: String,
    pub priority: StylePriority,
}

/// Markup for a new element.
#[derive(Debug, Clone, Default)]
pub struct ElementSpec {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
}

impl ElementSpec {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    /// Add one or more whitespace-separated classes.
    #[must_use]
    pub fn class(mut self, classes: &str) -> Self {
        self.classes
            .extend(classes.split_whitespace().map(str::to_string));
        self
    }

    #[must_use]
    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }
}

#[derive(Debug, Clone)]
struct Node {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    style: BTreeMap<String, InlineDeclaration>,
    text: String,
}

impl Node {
    fn from_spec(spec: ElementSpec, parent: Option<NodeId>) -> Self {
        Self {
            tag: spec.tag,
            id: spec.id,
            classes: spec.classes,
            attributes: spec.attributes,
            parent,
            children: Vec::new(),
            style: BTreeMap::new(),
            text: String::new(),
        }
    }
}

/// Arena-backed document tree rooted at `<html>` with `<head>` and `<body>`.
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    nodes: Vec<Node>,
    ready: ReadyState,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    const ROOT: NodeId = NodeId(0);
    const HEAD: NodeId = NodeId(1);
    const BODY: NodeId = NodeId(2);

    /// Empty, fully parsed document.
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: vec![Node::from_spec(ElementSpec::new("html"), None)],
            ready: ReadyState::Complete,
        };
        doc.append(Self::ROOT, ElementSpec::new("head"));
        doc.append(Self::ROOT, ElementSpec::new("body"));
        doc
    }

    pub fn root(&self) -> NodeId {
        Self::ROOT
    }

    pub fn head(&self) -> NodeId {
        Self::HEAD
    }

    pub fn body(&self) -> NodeId {
        Self::BODY
    }

    pub fn set_ready_state(&mut self, state: ReadyState) {
        self.ready = state;
    }

    /// Append a new element as the last child of `parent`.
    pub fn append(&mut self, parent: NodeId, spec: ElementSpec) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::from_spec(spec, Some(parent)));
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Remove `node` (and its subtree) from the tree. The handle stays valid.
    pub fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes[node.0].parent.take() {
            self.nodes[parent.0].children.retain(|&child| child != node);
        }
    }

    pub fn is_attached(&self, node: NodeId) -> bool {
        let mut current = node;
        loop {
            if current == Self::ROOT {
                return true;
            }
            match self.nodes[current.0].parent {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    pub fn style(&self, node: NodeId, property: &str) -> Option<&InlineDeclaration> {
        self.nodes[node.0].style.get(property)
    }

    pub fn style_value(&self, node: NodeId, property: &str) -> Option<&str> {
        self.style(node, property).map(|decl| decl.value.as_str())
    }

    pub fn style_priority(&self, node: NodeId, property: &str) -> Option<StylePriority> {
        self.style(node, property).map(|decl| decl.priority)
    }

    /// Custom property set on the root element.
    pub fn root_property(&self, name: &str) -> Option<&str> {
        self.style_value(Self::ROOT, name)
    }

    pub fn classes(&self, node: NodeId) -> &[String] {
        &self.nodes[node.0].classes
    }

    pub fn text(&self, node: NodeId) -> &str {
        &self.nodes[node.0].text
    }

    /// Attached `<style>` elements in the head carrying `id`.
    pub fn head_styles(&self, id: &str) -> Vec<NodeId> {
        self.nodes[Self::HEAD.0]
            .children
            .iter()
            .copied()
            .filter(|&child| {
                let node = &self.nodes[child.0];
                node.tag == "style" && node.id.as_deref() == Some(id)
            })
            .collect()
    }

    fn document_order(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![Self::ROOT];
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(self.nodes[node.0].children.iter().rev().copied());
        }
        out
    }

    fn matches_compound(&self, node: NodeId, compound: &Compound) -> bool {
        let node = &self.nodes[node.0];
        if compound.tag.as_ref().is_some_and(|tag| *tag != node.tag) {
            return false;
        }
        if compound.id.as_ref().is_some_and(|id| node.id.as_ref() != Some(id)) {
            return false;
        }
        compound
            .classes
            .iter()
            .all(|class| node.classes.iter().any(|c| c == class))
    }

    fn matches_complex(&self, node: NodeId, complex: &[Compound]) -> bool {
        let Some((last, ancestors)) = complex.split_last() else {
            return false;
        };
        if !self.matches_compound(node, last) {
            return false;
        }
        // Descendant combinators only, so matching each remaining compound
        // against the nearest qualifying ancestor is exact.
        let mut cursor = self.nodes[node.0].parent;
        for compound in ancestors.iter().rev() {
            loop {
                let Some(candidate) = cursor else {
                    return false;
                };
                cursor = self.nodes[candidate.0].parent;
                if self.matches_compound(candidate, compound) {
                    break;
                }
            }
        }
        true
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
}

fn is_ident_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '-' || ch == '_'
}

fn parse_compound(raw: &str) -> Option<Compound> {
    let mut compound = Compound::default();
    let mut rest = raw;

    let tag_len = rest.find(['.', '#']).unwrap_or(rest.len());
    if tag_len > 0 {
        let tag = &rest[..tag_len];
        if tag != "*" && !tag.chars().all(is_ident_char) {
            return None;
        }
        if tag != "*" {
            compound.tag = Some(tag.to_ascii_lowercase());
        }
        rest = &rest[tag_len..];
    }

    while let Some(marker) = rest.chars().next() {
        let body = &rest[1..];
        let len = body.find(['.', '#']).unwrap_or(body.len());
        let name = &body[..len];
        if name.is_empty() || !name.chars().all(is_ident_char) {
            return None;
        }
        match marker {
            '.' => compound.classes.push(name.to_string()),
            '#' => compound.id = Some(name.to_string()),
            _ => return None,
        }
        rest = &body[len..];
    }
    Some(compound)
}

fn parse_selector_list(selector: &str) -> Result<Vec<Vec<Compound>>, MemoryHostError> {
    let unsupported = || MemoryHostError::UnsupportedSelector(selector.to_string());
    selector
        .split(',')
        .map(|group| {
            let compounds = group
                .split_whitespace()
                .map(parse_compound)
                .collect::<Option<Vec<_>>>()
                .ok_or_else(unsupported)?;
            if compounds.is_empty() {
                return Err(unsupported());
            }
            Ok(compounds)
        })
        .collect()
}

impl DocumentHost for MemoryDocument {
    type Element = NodeId;
    type Error = MemoryHostError;

    fn ready_state(&self) -> ReadyState {
        self.ready
    }

    fn set_root_property(&mut self, name: &str, value: &str) -> Result<(), Self::Error> {
        self.set_style(&Self::ROOT, name, value, StylePriority::Normal)
    }

    fn query_all(&self, selector: &str) -> Result<Vec<NodeId>, Self::Error> {
        let groups = parse_selector_list(selector)?;
        Ok(self
            .document_order()
            .into_iter()
            .filter(|&node| groups.iter().any(|group| self.matches_complex(node, group)))
            .collect())
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.document_order()
            .into_iter()
            .find(|node| self.nodes[node.0].id.as_deref() == Some(id))
    }

    fn set_style(
        &mut self,
        element: &NodeId,
        property: &str,
        value: &str,
        priority: StylePriority,
    ) -> Result<(), Self::Error> {
        self.nodes[element.0].style.insert(
            property.to_string(),
            InlineDeclaration {
                value: value.to_string(),
                priority,
            },
        );
        Ok(())
    }

    fn remove_style(&mut self, element: &NodeId, property: &str) -> Result<(), Self::Error> {
        self.nodes[element.0].style.remove(property);
        Ok(())
    }

    fn replace_head_style(&mut self, id: &str, css: &str) -> Result<(), Self::Error> {
        let stale: Vec<NodeId> = self
            .document_order()
            .into_iter()
            .filter(|node| self.nodes[node.0].id.as_deref() == Some(id))
            .collect();
        for node in stale {
            self.detach(node);
        }
        let style = self.append(Self::HEAD, ElementSpec::new("style").id(id));
        self.nodes[style.0].text = css.to_string();
        Ok(())
    }

    fn add_class(&mut self, element: &NodeId, class: &str) -> Result<(), Self::Error> {
        let classes = &mut self.nodes[element.0].classes;
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
        }
        Ok(())
    }

    fn remove_class(&mut self, element: &NodeId, class: &str) -> Result<(), Self::Error> {
        self.nodes[element.0].classes.retain(|c| c != class);
        Ok(())
    }

    fn has_class(&self, element: &NodeId, class: &str) -> bool {
        self.nodes[element.0].classes.iter().any(|c| c == class)
    }

    fn attribute(&self, element: &NodeId, name: &str) -> Option<String> {
        let node = &self.nodes[element.0];
        match name {
            "id" => node.id.clone(),
            "class" => Some(node.classes.join(" ")),
            _ => node.attributes.get(name).cloned(),
        }
    }

    fn contains(&self, ancestor: &NodeId, node: &NodeId) -> bool {
        let mut cursor = Some(*node);
        while let Some(current) = cursor {
            if current == *ancestor {
                return true;
            }
            cursor = self.nodes[current.0].parent;
        }
        false
    }
}

/// Map-backed preference store with switchable failure modes.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
    read_only: bool,
    unavailable: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }

    /// Reads succeed, writes fail.
    #[must_use]
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    /// Every operation fails.
    #[must_use]
    pub fn unavailable(mut self) -> Self {
        self.unavailable = true;
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl PreferenceStore for MemoryStore {
    type Error = MemoryHostError;

    fn load(&self, key: &str) -> Result<Option<String>, Self::Error> {
        if self.unavailable {
            return Err(MemoryHostError::Unavailable);
        }
        Ok(self.entries.get(key).cloned())
    }

    fn store(&mut self, key: &str, value: &str) -> Result<(), Self::Error> {
        if self.unavailable {
            return Err(MemoryHostError::Unavailable);
        }
        if self.read_only {
            return Err(MemoryHostError::ReadOnly);
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
