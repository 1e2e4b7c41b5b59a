use std::sync::OnceLock;

use regex::Regex;

use crate::context::ParseContext;
use crate::error::MarkdownSyntaxError;
use crate::node::{Element, Node};
use crate::parsing::MAX_NESTING;
use crate::parsing::blocks::classify::leading_whitespace;
use crate::parsing::inline::tokenize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListTag {
    Unordered,
    Ordered,
}

impl ListTag {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unordered => "ul",
            Self::Ordered => "ol",
        }
    }
}

/// `- item` (marker chars configurable) or `1. item`.
pub struct List;

impl List {
    pub const CHECKED: &'static str = "- [x]";
    pub const UNCHECKED: &'static str = "- [ ]";

    fn ordered() -> &'static Regex {
        static RE: OnceLock<Regex> = OnceLock::new();
        RE.get_or_init(|| Regex::new(r"^(\d+)\. ").expect("Invalid ordered list regex"))
    }

    pub fn tag(line: &str, item_chars: &[char]) -> Option<ListTag> {
        let t = line.trim();
        let mut chars = t.chars();
        if chars.next().is_some_and(|c| item_chars.contains(&c)) && chars.next() == Some(' ') {
            Some(ListTag::Unordered)
        } else if Self::ordered().is_match(t) {
            Some(ListTag::Ordered)
        } else {
            None
        }
    }

    fn number(line: &str) -> Option<&str> {
        Self::ordered()
            .captures(line.trim())
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    /// `(checked, text)` for a task item.
    fn task(line: &str) -> Option<(bool, &str)> {
        if let Some(rest) = line.strip_prefix(Self::CHECKED) {
            Some((true, rest))
        } else {
            line.strip_prefix(Self::UNCHECKED).map(|rest| (false, rest))
        }
    }
}

pub fn parse_list(
    lines: &[&str],
    start: usize,
    ctx: &mut ParseContext,
) -> Result<(Node, usize), MarkdownSyntaxError> {
    parse_list_at(lines, start, 1, ctx)
}

/// Items at the indentation of `lines[start]`. A deeper item opens a sublist
/// inside the previous item; a shallower one, a non-list line, or a change
/// of list type at the same indentation ends the list.
fn parse_list_at(
    lines: &[&str],
    start: usize,
    depth: usize,
    ctx: &mut ParseContext,
) -> Result<(Node, usize), MarkdownSyntaxError> {
    if depth > MAX_NESTING {
        return Err(MarkdownSyntaxError::NestingTooDeep { depth });
    }
    let options = ctx.options;
    let first = lines[start];
    let tag = List::tag(first, &options.list_item_chars).unwrap_or(ListTag::Unordered);
    let indent = leading_whitespace(first, options.tabsize);

    let mut list = Element::new(tag.as_str());
    if let Some(number) = List::number(first).filter(|_| tag == ListTag::Ordered) {
        list.set_attr("start", number);
    }

    let mut i = start;
    while i < lines.len() {
        let line = lines[i];
        if line.trim().is_empty() {
            i += 1;
            continue;
        }
        let spaces = leading_whitespace(line, options.tabsize);
        let Some(line_tag) = List::tag(line, &options.list_item_chars) else {
            break;
        };
        if spaces < indent || (spaces == indent && line_tag != tag) {
            break;
        }
        if spaces > indent {
            let (sublist, next) = parse_list_at(lines, i, depth + 1, ctx)?;
            match list.children.last_mut().and_then(Node::as_element_mut) {
                Some(item) => item.push(sublist),
                None => list.push(sublist),
            }
            i = next;
        } else {
            ctx.line = i;
            list.push(list_item(line.trim(), ctx));
            i += 1;
        }
    }
    Ok((list.into(), i))
}

fn list_item(line: &str, ctx: &mut ParseContext) -> Node {
    if let Some((checked, text)) = List::task(line) {
        return task_item(checked, text.trim(), line, ctx);
    }
    let text = line.split_once(' ').map_or("", |(_, rest)| rest.trim());
    Element::new("li").with_children(tokenize(text, ctx)).into()
}

/// A checkbox plus label in place of the bullet.
fn task_item(checked: bool, text: &str, line: &str, ctx: &mut ParseContext) -> Node {
    let id = format!("task_list_checkbox-{}", ctx.ids.unique_hash(line));
    let mut input = Element::new("input")
        .with_attr("type", "checkbox")
        .with_id(&id)
        .with_attr("autocomplete", "off");
    if checked {
        input = input.with_flag("checked");
    }
    if ctx.options.checkbox_disabled {
        input = input.with_flag("disabled");
    }
    let label = Element::new("label")
        .with_attr("for", id)
        .with_children(tokenize(text, ctx));
    Element::new("li")
        .with_class("task-list-item")
        .with_child(input.self_closing())
        .with_child(label)
        .into()
}
