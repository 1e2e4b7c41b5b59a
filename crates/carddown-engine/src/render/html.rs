//! Serializes the node tree.
//!
//! Container tags put each child on its own line, indented one level deeper.
//! Every other tag is written compactly with its children inline, which
//! keeps `<pre>` content and inline markup byte-exact. Text nodes are
//! written verbatim; attribute values are escaped here.

use crate::node::{Element, Node};

/// Tags laid out one child per line.
const CONTAINER_TAGS: &[&str] = &[
    "div", "ul", "ol", "table", "thead", "tbody", "tr", "body", "head", "html", "blockquote",
    "form", "dl",
];

/// Top-level nodes, one per line.
pub fn to_html(nodes: &[Node], indent: usize) -> String {
    nodes
        .iter()
        .map(|n| node_to_html(n, 0, indent))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Nodes concatenated without any layout, for inline content.
pub fn inline_html(nodes: &[Node]) -> String {
    nodes.iter().map(|n| node_to_html(n, 0, 0)).collect()
}

/// One node at nesting `level`. The first line carries no indentation; the
/// caller has already positioned it.
pub fn node_to_html(node: &Node, level: usize, indent: usize) -> String {
    let mut out = String::new();
    write_node(&mut out, node, level, indent);
    out
}

fn write_node(out: &mut String, node: &Node, level: usize, indent: usize) {
    match node {
        Node::Text(text) => out.push_str(text),
        Node::SelfClosing(e) => {
            write_open(out, e);
            if !e.children.is_empty() {
                let text: Vec<String> = e.children.iter().map(Node::inner_text).collect();
                out.push(' ');
                out.push_str(&text.join(" "));
            }
            out.push_str("/>");
        }
        Node::Element(e)
            if indent > 0
                && !e.children.is_empty()
                && CONTAINER_TAGS.contains(&e.tag.as_str()) =>
        {
            write_open(out, e);
            out.push('>');
            let pad = " ".repeat((level + 1) * indent);
            for child in &e.children {
                out.push('\n');
                out.push_str(&pad);
                write_node(out, child, level + 1, indent);
            }
            out.push('\n');
            out.push_str(&" ".repeat(level * indent));
            write_close(out, e);
        }
        Node::Element(e) => {
            write_open(out, e);
            out.push('>');
            for child in &e.children {
                write_node(out, child, level, indent);
            }
            write_close(out, e);
        }
    }
}

fn write_open(out: &mut String, e: &Element) {
    out.push('<');
    out.push_str(&e.tag);
    for (key, value) in &e.attrs {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(&html_escape::encode_double_quoted_attribute(value));
        out.push('"');
    }
    for flag in &e.flags {
        out.push(' ');
        out.push_str(flag);
    }
}

fn write_close(out: &mut String, e: &Element) {
    out.push_str("</");
    out.push_str(&e.tag);
    out.push('>');
}
