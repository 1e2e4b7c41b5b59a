use crate::context::ParseContext;
use crate::node::{Element, Node};
use crate::parsing::inline::rule::{Guard, Pattern, TokenRule};
use crate::parsing::inline::types::{InlineToken, TokenKind};

/// `[^key]` referencing a footnote definition. A following `:` makes it a
/// definition, which is block-level.
pub struct FootnoteRef;

impl FootnoteRef {
    pub const PATTERN: &'static str = r"\[\^([^\s\]]+)\]";
    pub const CLASS: &'static str = "footnote-ref";
    pub const ID_PREFIX: &'static str = "ref-";

    pub fn rule() -> TokenRule {
        let pattern = Pattern::guarded(
            Self::PATTERN,
            Guard {
                not_followed_by: Some(':'),
                ..Guard::default()
            },
        );
        TokenRule::opaque(TokenKind::FootnoteRef, vec![pattern], render)
    }
}

/// `<sup><a class="footnote-ref" href="#footnote-k" id="ref-k">[k]</a></sup>`;
/// the label is renumbered once the whole document is known.
fn render(token: &InlineToken, line: &str, _ctx: &mut ParseContext) -> Node {
    let key = token.group(line, 1).unwrap_or_default();
    let a = Element::new("a")
        .with_attr("href", format!("#footnote-{key}"))
        .with_class(FootnoteRef::CLASS)
        .with_id(format!("{}{key}", FootnoteRef::ID_PREFIX))
        .with_child(format!("[{key}]"));
    Element::new("sup").with_child(a).into()
}
