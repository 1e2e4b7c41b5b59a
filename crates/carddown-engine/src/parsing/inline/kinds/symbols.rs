use crate::context::ParseContext;
use crate::emoji;
use crate::node::{Element, Node};
use crate::parsing::inline::rule::{Pattern, TokenRule};
use crate::parsing::inline::types::{InlineToken, TokenKind};

pub const RIGHT_ARROW: &str = "&#8594;";

/// `-->`
pub fn arrow() -> TokenRule {
    TokenRule::opaque(TokenKind::Arrow, vec![Pattern::new("-->")], |_, _, _| {
        Element::new("span").with_child(RIGHT_ARROW).into()
    })
}

/// `:name:`
pub fn emoji() -> TokenRule {
    TokenRule::opaque(
        TokenKind::Emoji,
        vec![Pattern::new(r":([a-zA-Z0-9_+\-]+):")],
        render_emoji,
    )
}

/// Unknown names stay as they were written.
fn render_emoji(token: &InlineToken, line: &str, _ctx: &mut ParseContext) -> Node {
    let name = token.group(line, 1).unwrap_or_default();
    match emoji::lookup(name) {
        Some(glyph) => Node::text(glyph),
        None => Node::text(token.group(line, 0).unwrap_or_default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Options;

    fn render_first(line: &str) -> Node {
        let options = Options::default();
        let mut ctx = ParseContext::new(&options);
        let token = emoji().find_all(line).remove(0);
        render_emoji(&token, line, &mut ctx)
    }

    #[test]
    fn known_emoji_is_replaced() {
        assert_eq!(render_first(":rocket:"), Node::text("🚀"));
    }

    #[test]
    fn unknown_emoji_passes_through() {
        assert_eq!(render_first(":nope:"), Node::text(":nope:"));
    }
}
