use std::sync::OnceLock;

use regex::Regex;

use crate::context::ParseContext;
use crate::error::MarkdownSyntaxError;
use crate::node::{Element, HTML_WHITESPACE, Node};
use crate::parsing::blocks::classify::leading_whitespace;
use crate::parsing::inline::tokenize;

/// `[^key]: text` definitions. Lines indented by two or more continue the
/// previous definition.
pub struct FootnoteBlock;

impl FootnoteBlock {
    pub const CONTAINER_CLASS: &'static str = "footnotes-div";
    pub const FOOTNOTE_CLASS: &'static str = "footnote";
    pub const ID_PREFIX: &'static str = "footnote-";
    pub const BACKLINK: &'static str = " &#8617;";
    const CONTINUATION_INDENT: usize = 2;

    fn definition_regex() -> &'static Regex {
        static RE: OnceLock<Regex> = OnceLock::new();
        RE.get_or_init(|| Regex::new(r"^\[\^([^\s\]]+)\]:").expect("Invalid footnote regex"))
    }

    pub fn matches(line: &str) -> bool {
        Self::definition_regex().is_match(line)
    }
}

struct Definition {
    key: String,
    div: Element,
}

impl Definition {
    /// Appends the link back to the reference to the last paragraph.
    fn finish(mut self) -> Element {
        let backlink = Element::new("a")
            .with_attr("href", format!("#ref-{}", self.key))
            .with_child(FootnoteBlock::BACKLINK);
        if let Some(p) = self.div.children.last_mut().and_then(Node::as_element_mut) {
            p.push(backlink);
        }
        self.div
    }
}

pub fn parse_footnotes(
    lines: &[&str],
    start: usize,
    ctx: &mut ParseContext,
) -> Result<(Node, usize), MarkdownSyntaxError> {
    let mut container = Element::new("div").with_class(FootnoteBlock::CONTAINER_CLASS);
    let mut current: Option<Definition> = None;
    let mut i = start;
    while i < lines.len() {
        let line = lines[i].trim_end();
        if line.trim().is_empty() {
            i += 1;
            continue;
        }
        ctx.line = i;
        if let Some(def) = current.as_mut().filter(|_| {
            leading_whitespace(line, ctx.options.tabsize) >= FootnoteBlock::CONTINUATION_INDENT
        }) {
            let p = paragraph()
                .with_child(HTML_WHITESPACE.repeat(3))
                .with_children(tokenize(line.trim(), ctx));
            def.div.push(p);
        } else if let Some(caps) = FootnoteBlock::definition_regex().captures(line) {
            if let Some(done) = current.take() {
                container.push(done.finish());
            }
            let key = caps[1].to_string();
            let rest = &line[caps[0].len()..];
            let label = Element::new("span")
                .with_id(format!("{}{key}", FootnoteBlock::ID_PREFIX))
                .with_child(format!("{key}:"));
            let p = paragraph()
                .with_child(label)
                .with_children(tokenize(rest, ctx));
            current = Some(Definition {
                key,
                div: Element::new("div")
                    .with_class(FootnoteBlock::FOOTNOTE_CLASS)
                    .with_child(p),
            });
        } else {
            break;
        }
        i += 1;
    }
    if let Some(done) = current {
        container.push(done.finish());
    }
    Ok((container.into(), i))
}

fn paragraph() -> Element {
    Element::new("p").with_class("footnote-paragraph")
}
