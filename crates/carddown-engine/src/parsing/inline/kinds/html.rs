use std::sync::OnceLock;

use regex::Regex;

use crate::context::ParseContext;
use crate::node::Node;
use crate::parsing::inline::rule::{Pattern, TokenRule};
use crate::parsing::inline::types::{InlineToken, TokenKind};

/// Literal HTML passed through untouched.
pub struct RawHtml;

impl RawHtml {
    /// A single tag or comment.
    pub const TAG: &'static str = r"<!--.*?-->|</?[a-zA-Z][a-zA-Z0-9-]*(?:\s[^<>]*)?/?>";

    pub fn rule() -> TokenRule {
        TokenRule::opaque(TokenKind::RawHtml, vec![Pattern::new(Self::TAG)], render)
    }

    /// Whether the whole trimmed line is one HTML construct: a comment, a lone
    /// opening or closing tag, or `<tag ...>...</tag>`.
    pub fn is_html_line(line: &str) -> bool {
        static OPEN_TAG: OnceLock<Regex> = OnceLock::new();
        let t = line.trim();
        if !(t.starts_with('<') && t.ends_with('>')) {
            return false;
        }
        if t.starts_with("<!--") {
            return t.ends_with("-->");
        }
        let open = OPEN_TAG.get_or_init(|| {
            Regex::new(r"^</?([a-zA-Z][a-zA-Z0-9-]*)(?:\s[^<>]*)?/?>").expect("Invalid HTML tag regex")
        });
        let Some(caps) = open.captures(t) else {
            return false;
        };
        if caps[0].len() == t.len() {
            return true;
        }
        t.ends_with(&format!("</{}>", &caps[1]))
    }
}

fn render(token: &InlineToken, line: &str, _ctx: &mut ParseContext) -> Node {
    Node::text(token.group(line, 0).unwrap_or_default())
}
