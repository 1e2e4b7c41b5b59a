use crate::context::ParseContext;
use crate::escape;
use crate::node::{Element, Node};
use crate::parsing::inline::rule::{Pattern, TokenRule};
use crate::parsing::inline::types::{InlineToken, TokenKind};

/// `$...$`
pub struct InlineEquation;

impl InlineEquation {
    pub const PATTERN: &'static str = r"\$([^$]+)\$";

    pub fn rule() -> TokenRule {
        TokenRule::opaque(
            TokenKind::InlineEquation,
            vec![Pattern::new(Self::PATTERN)],
            render,
        )
    }
}

/// Pre-rendered SVG when available, otherwise the escaped source for a
/// client-side renderer.
fn render(token: &InlineToken, line: &str, ctx: &mut ParseContext) -> Node {
    let source = escape::restore_source(token.group(line, 1).unwrap_or_default());
    match ctx.render_latex(&source, false) {
        Some(svg) => Element::new("span")
            .with_class("latex inline-latex")
            .with_child(svg)
            .into(),
        None => Node::text(html_escape::encode_text(&format!("${source}$")).into_owned()),
    }
}
