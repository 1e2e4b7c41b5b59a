use crate::context::ParseContext;
use crate::escape;
use crate::node::{Element, Node};
use crate::parsing::inline::rule::{Pattern, TokenRule};
use crate::parsing::inline::types::{InlineToken, TokenKind};

/// Backtick code spans. A raw zone: nothing inside is tokenized.
pub struct InlineCode;

impl InlineCode {
    pub const DOUBLE: &'static str = r"``(.+?)``";
    pub const SINGLE: &'static str = r"`([^`]+)`";

    pub fn rule() -> TokenRule {
        TokenRule::opaque(
            TokenKind::Code,
            vec![Pattern::new(Self::DOUBLE), Pattern::new(Self::SINGLE)],
            render,
        )
    }
}

fn render(token: &InlineToken, line: &str, ctx: &mut ParseContext) -> Node {
    let source = escape::restore_source(token.group(line, 1).unwrap_or_default());
    let class = if ctx.options.prettyprint_inline_code {
        "prettyprint inline"
    } else {
        "inline"
    };
    Element::new("code")
        .with_class(class)
        .with_child(html_escape::encode_text(&source).into_owned())
        .into()
}
