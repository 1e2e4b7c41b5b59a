//! # Node Tree
//!
//! The intermediate document representation shared by every parsing stage and
//! handed to the HTML serializer.
//!
//! The tree is fully owned: an [`Element`] owns its children, so a node can only
//! ever sit in one place. Moving a node between trees (footnote relocation,
//! card fragments joining the document) is a move, never a shared reference.
//! Parent navigation is replaced by walks that carry their ancestry along.
//!
//! ## Key Invariants
//!
//! - Attributes are plain string pairs in insertion order; setting an existing
//!   key replaces its value in place.
//! - Boolean attributes (`checked`, `disabled`) live in `flags`, never in `attrs`.
//! - `Text` payloads are emitted verbatim by the serializer; escaping happens at
//!   construction time where the content is not trusted markup.

pub mod walk;

pub use walk::{Walk, remove_elements, visit_elements_mut};

/// Whitespace entity used when a line has to keep its indentation visible.
pub const HTML_WHITESPACE: &str = "&nbsp;";

/// Tags whose text content is separated from its neighbours when flattened.
const BLOCK_TAGS: &[&str] = &[
    "p", "div", "ul", "ol", "li", "table", "thead", "tbody", "tr", "td", "th", "dl", "dt", "dd",
    "blockquote", "pre", "form", "h1", "h2", "h3", "h4", "h5", "h6", "label",
];

/// A node in the document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A tag with a closing counterpart and arbitrary children.
    Element(Element),
    /// A tag rendered as `<tag .../>`. Children, if any, are space-joined text.
    SelfClosing(Element),
    /// Raw text payload.
    Text(String),
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    /// A `<br/>` line break.
    pub fn br() -> Self {
        Node::SelfClosing(Element::new("br"))
    }

    /// A text node whose spaces and tabs survive HTML whitespace collapsing.
    pub fn preserved_text(text: &str, tabsize: usize) -> Self {
        let text = text
            .replace('\t', &HTML_WHITESPACE.repeat(tabsize))
            .replace(' ', HTML_WHITESPACE);
        Node::Text(text)
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(e) | Node::SelfClosing(e) => Some(e),
            Node::Text(_) => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Node::Element(e) | Node::SelfClosing(e) => Some(e),
            Node::Text(_) => None,
        }
    }

    pub fn tag(&self) -> Option<&str> {
        self.as_element().map(|e| e.tag.as_str())
    }

    pub fn is_tag(&self, tag: &str) -> bool {
        self.tag() == Some(tag)
    }

    /// Pre-order iterator over this node and all of its descendants.
    pub fn walk(&self) -> Walk<'_> {
        Walk::new(std::slice::from_ref(self))
    }

    /// Flattened text content, see [`Element::inner_text`].
    pub fn inner_text(&self) -> String {
        let mut buf = String::new();
        collect_text(self, &mut buf);
        normalize_whitespace(&buf)
    }

    pub fn contains_text(&self) -> bool {
        !self.inner_text().is_empty()
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_string())
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::Text(text)
    }
}

/// A tagged node with attributes and children.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub flags: Vec<String>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(key, value);
        self
    }

    pub fn with_class(self, class: impl Into<String>) -> Self {
        self.with_attr("class", class)
    }

    pub fn with_id(self, id: impl Into<String>) -> Self {
        self.with_attr("id", id)
    }

    pub fn with_flag(mut self, flag: impl Into<String>) -> Self {
        let flag = flag.into();
        if !self.flags.contains(&flag) {
            self.flags.push(flag);
        }
        self
    }

    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    /// Wraps this element as a [`Node::SelfClosing`].
    pub fn self_closing(self) -> Node {
        Node::SelfClosing(self)
    }

    pub fn push(&mut self, child: impl Into<Node>) {
        self.children.push(child.into());
    }

    pub fn extend(&mut self, children: impl IntoIterator<Item = Node>) {
        self.children.extend(children);
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Sets `key`, replacing an existing value without moving its position.
    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((key, value)),
        }
    }

    pub fn has_flag(&self, flag: &str) -> bool {
        self.flags.iter().any(|f| f == flag)
    }

    /// Whether the whitespace-separated `class` attribute contains `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    pub fn is_heading(&self) -> bool {
        self.heading_level().is_some()
    }

    /// Level 1-6 for `h1`..`h6`.
    pub fn heading_level(&self) -> Option<u8> {
        let level = self.tag.strip_prefix('h')?.parse::<u8>().ok()?;
        (1..=6).contains(&level).then_some(level)
    }

    /// Flattened text of all descendant text nodes.
    ///
    /// Block-level boundaries and `<br/>` become single spaces, whitespace runs
    /// collapse, and `&nbsp;` reads as a space.
    pub fn inner_text(&self) -> String {
        let mut buf = String::new();
        for child in &self.children {
            collect_text(child, &mut buf);
        }
        normalize_whitespace(&buf)
    }

    pub fn contains_text(&self) -> bool {
        !self.inner_text().is_empty()
    }
}

fn collect_text(node: &Node, buf: &mut String) {
    match node {
        Node::Text(text) => buf.push_str(&text.replace(HTML_WHITESPACE, " ")),
        Node::SelfClosing(e) => {
            if e.tag == "br" {
                buf.push(' ');
            }
            for child in &e.children {
                collect_text(child, buf);
            }
        }
        Node::Element(e) => {
            let block = BLOCK_TAGS.contains(&e.tag.as_str());
            if block {
                buf.push(' ');
            }
            for child in &e.children {
                collect_text(child, buf);
            }
            if block {
                buf.push(' ');
            }
        }
    }
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
