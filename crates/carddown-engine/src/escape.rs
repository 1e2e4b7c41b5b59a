//! Backslash escapes.
//!
//! Before anything is parsed, every `\X` with `X` in [`ESCAPABLE`] is replaced
//! by a private-use placeholder character. No tokenizer pattern matches those
//! characters, so escaped punctuation is inert everywhere (inline tokens, block
//! predicates, table cell splitting, card markers). Placeholders are turned
//! back into the literal character once the document tree is final; code and
//! LaTeX get the original `\X` back since they display source.

use crate::node::{Element, Node};

/// Characters that can be escaped with a backslash, in placeholder order.
pub const ESCAPABLE: &[char] = &[
    '\\', '*', '_', '(', ')', '[', ']', '{', '}', '#', '>', '+', '!', '~', '=', '-', '|', '`', '$',
    '^', ':',
];

const PLACEHOLDER_BASE: u32 = 0xE000;

fn placeholder(c: char) -> Option<char> {
    let index = ESCAPABLE.iter().position(|&e| e == c)?;
    char::from_u32(PLACEHOLDER_BASE + index as u32)
}

fn escaped(p: char) -> Option<char> {
    let index = (p as u32).checked_sub(PLACEHOLDER_BASE)?;
    ESCAPABLE.get(index as usize).copied()
}

/// Replaces every escape sequence with its placeholder.
pub fn protect(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\'
            && let Some(p) = chars.peek().copied().and_then(placeholder)
        {
            out.push(p);
            chars.next();
            continue;
        }
        out.push(c);
    }
    out
}

/// Placeholders become the literal character they stand for.
pub fn restore(text: &str) -> String {
    text.chars().map(|c| escaped(c).unwrap_or(c)).collect()
}

/// Placeholders become the two-character escape sequence they came from.
pub fn restore_source(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match escaped(c) {
            Some(e) => {
                out.push('\\');
                out.push(e);
            }
            None => out.push(c),
        }
    }
    out
}

/// Restores every text node and attribute value in the forest.
///
/// Inside `<code>` subtrees the source form is restored instead.
pub fn restore_tree(nodes: &mut [Node]) {
    for node in nodes {
        restore_node(node, false);
    }
}

fn restore_node(node: &mut Node, source: bool) {
    match node {
        Node::Text(text) => {
            *text = if source {
                restore_source(text)
            } else {
                restore(text)
            };
        }
        Node::Element(e) | Node::SelfClosing(e) => restore_element(e, source),
    }
}

fn restore_element(element: &mut Element, source: bool) {
    let source = source || element.tag == "code";
    for (_, value) in &mut element.attrs {
        *value = restore(value);
    }
    for child in &mut element.children {
        restore_node(child, source);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn protect_hides_escaped_punctuation() {
        let protected = protect(r"\*not bold\*");
        assert!(!protected.contains('*'));
        assert!(!protected.contains('\\'));
        assert_eq!(restore(&protected), "*not bold*");
        assert_eq!(restore_source(&protected), r"\*not bold\*");
    }

    #[test]
    fn unknown_escapes_are_left_alone() {
        assert_eq!(protect(r"\frac{a}{b}"), r"\frac{a}{b}");
        assert_eq!(protect("trailing\\"), "trailing\\");
    }

    #[test]
    fn escaped_backslash_does_not_escape_the_next_char() {
        let protected = protect(r"\\*x*");
        assert_eq!(restore(&protected), r"\*x*");
        assert!(protected.ends_with("*x*"));
    }

    #[test]
    fn restore_tree_keeps_source_form_in_code() {
        let p = protect(r"\_");
        let mut nodes = vec![
            Element::new("p")
                .with_attr("title", p.clone())
                .with_child(p.clone())
                .with_child(Element::new("code").with_child(p.clone()))
                .into(),
        ];
        restore_tree(&mut nodes);
        let Node::Element(e) = &nodes[0] else {
            panic!("expected element");
        };
        assert_eq!(e.attr("title"), Some("_"));
        assert_eq!(e.children[0], Node::text("_"));
        assert_eq!(
            e.children[1],
            Node::Element(Element::new("code").with_child(r"\_"))
        );
    }
}
