//! Constructs that wrap their content in a single tag.

use crate::context::ParseContext;
use crate::node::{Element, Node};
use crate::parsing::inline::rule::{Guard, Pattern, TokenRule};
use crate::parsing::inline::types::{InlineToken, TokenKind};

/// `**x**` or `__x__`
pub fn bold() -> TokenRule {
    TokenRule::wrapping(
        TokenKind::Bold,
        vec![Pattern::new(r"\*\*(.+?)\*\*"), Pattern::new(r"__(.+?)__")],
        |_, _, _| Element::new("strong").into(),
    )
}

/// `_x_` or `*x*`, never directly after the same delimiter so bold text does
/// not also read as doubled emphasis. The underscore form excludes brackets,
/// colons and slashes to stay clear of links and footnotes.
pub fn emph() -> TokenRule {
    TokenRule::wrapping(
        TokenKind::Emph,
        vec![
            Pattern::guarded(
                r"_([^_\[\]:/]+)_",
                Guard {
                    not_after: &['_'],
                    ..Guard::default()
                },
            ),
            Pattern::guarded(
                r"\*([^*]+)\*",
                Guard {
                    not_after: &['*'],
                    ..Guard::default()
                },
            ),
        ],
        |_, _, _| Element::new("em").into(),
    )
}

/// `~~x~~`
pub fn strike() -> TokenRule {
    TokenRule::wrapping(
        TokenKind::Strike,
        vec![Pattern::new(r"~~(.+?)~~")],
        |_, _, _| Element::new("s").into(),
    )
}

/// `H~2~O`; needs a non-whitespace char before the `~`.
pub fn subscript() -> TokenRule {
    TokenRule::wrapping(
        TokenKind::Subscript,
        vec![Pattern::guarded(
            r"~([^~\\{}]+)~",
            Guard {
                after_non_whitespace: true,
                ..Guard::default()
            },
        )],
        |_, _, _| Element::new("sub").into(),
    )
}

/// `x^2^`
pub fn superscript() -> TokenRule {
    TokenRule::wrapping(
        TokenKind::Superscript,
        vec![Pattern::new(r"\^([^\^\\{}]+)\^")],
        |_, _, _| Element::new("sup").into(),
    )
}

/// `==x==`
pub fn highlight() -> TokenRule {
    TokenRule::wrapping(
        TokenKind::Highlight,
        vec![Pattern::new(r"==([^=]+)==")],
        wrap_mark,
    )
}

fn wrap_mark(_token: &InlineToken, _line: &str, _ctx: &mut ParseContext) -> Node {
    Element::new("mark").into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn starts(rule: &TokenRule, line: &str) -> Vec<usize> {
        rule.find_all(line).iter().map(|t| t.span.start).collect()
    }

    #[rstest]
    #[case("****")]
    #[case("**")]
    fn degenerate_bold(#[case] line: &str) {
        assert!(bold().find_all(line).is_empty());
        assert!(emph().find_all(line).is_empty());
    }

    #[rstest]
    #[case("====")]
    #[case("==")]
    fn degenerate_highlight(#[case] line: &str) {
        assert!(highlight().find_all(line).is_empty());
    }

    #[test]
    fn bold_is_not_emphasis() {
        assert!(emph().find_all("**bold**").is_empty());
        assert!(emph().find_all("__bold__").is_empty());
        assert_eq!(starts(&bold(), "a **b** c __d__"), vec![2, 10]);
    }

    #[test]
    fn underscore_emph_avoids_link_like_text() {
        assert!(emph().find_all("_see [x]_").is_empty());
        assert_eq!(starts(&emph(), "an _emph_ word"), vec![3]);
    }

    #[test]
    fn subscript_needs_a_preceding_char() {
        assert_eq!(starts(&subscript(), "H~2~O"), vec![1]);
        assert!(subscript().find_all("a ~2~ b").is_empty());
    }
}
