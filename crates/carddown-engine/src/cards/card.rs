use super::kind::{CardInfo, CardKind};
use crate::context::ParseContext;
use crate::error::CardSyntaxError;
use crate::escape;
use crate::node::{Element, Node};
use crate::parsing::parse_markdown;

/// One parsed learning card.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    /// Counts from 0 per document; also the DOM id of the card.
    pub id: u32,
    pub kind: &'static str,
    /// 1-based document line of the card's first line.
    pub line: usize,
    /// Markdown source of the front, markers stripped.
    pub front: String,
    /// Markdown source of the back, markers stripped.
    pub back: String,
    /// Rendered text of the front without markup.
    pub front_text: String,
    /// Rendered text of the back without markup.
    pub back_text: String,
    pub html: Element,
}

impl Card {
    /// Builds the card from its region, `lines`, which starts at document
    /// index `start`.
    pub fn parse(
        kind: &dyn CardKind,
        lines: &[&str],
        start: usize,
        ctx: &mut ParseContext,
    ) -> Result<Self, CardSyntaxError> {
        let region = lines.join("\n");
        let (front_src, back_src) = kind.split(&region);
        let back_offset = region[..region.len() - back_src.len()].matches('\n').count();
        let front = kind.strip_markers(front_src);
        let back = kind.strip_markers(back_src);

        let line = ctx.doc_line(start);
        if back.trim().is_empty() {
            return Err(CardSyntaxError::EmptyBackside { line });
        }
        let info = CardInfo {
            id: ctx.next_card_id(),
            line,
        };

        let base = ctx.line_base;
        ctx.line_base = base + start;
        let front_nodes = parse_markdown(&front, ctx);
        ctx.line_base = base + start + back_offset;
        let back_content = kind.render_back(&back, info, ctx);
        ctx.line_base = base;
        let back_content = back_content?;

        let name = kind.name();
        let front_div = Element::new("div")
            .with_class(format!("front {name}"))
            .with_children(front_nodes);
        let answer = Element::new("div")
            .with_class("answer")
            .with_children(back_content.nodes);
        let front_text = escape::restore(&front_div.inner_text());
        let back_text = escape::restore(&answer.inner_text());

        let mut back_div = Element::new("div").with_class(format!("back {name}"));
        if ctx.options.collapse && back_content.collapse {
            back_div.push(
                Element::new("button")
                    .with_class("collapsible card-btn")
                    .with_child(ctx.options.labels.show_backside.as_str()),
            );
            back_div.push(Element::new("div").with_class("content").with_child(answer));
            back_div.push(Node::br());
        } else {
            back_div.push(answer);
        }

        let mut html = Element::new("div")
            .with_class(format!("card {name}"))
            .with_id(info.id.to_string())
            .with_child(front_div)
            .with_child(back_div);
        if let Some(tag) = ctx.options.card_separator.as_deref().filter(|t| !t.is_empty()) {
            html.push(Element::new(tag).self_closing());
        }

        Ok(Self {
            id: info.id,
            kind: name,
            line,
            front: escape::restore_source(front.trim()),
            back: escape::restore_source(back.trim()),
            front_text,
            back_text,
            html,
        })
    }
}
