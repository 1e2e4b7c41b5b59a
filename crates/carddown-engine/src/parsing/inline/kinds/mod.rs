//! # Inline Kinds
//!
//! Each module owns the delimiters and rendering of its constructs. The
//! scanner never hardcodes `**` or `[`; it only sees [`TokenRule`]s.

pub mod code;
pub mod emphasis;
pub mod equation;
pub mod footnote;
pub mod html;
pub mod link;
pub mod symbols;

use super::rule::TokenRule;
use super::types::TokenKind;

pub use html::RawHtml;
pub use link::resolve_href;

/// One rule per [`TokenKind`], indexed by the kind's declaration order.
pub fn builtin_rules() -> Vec<TokenRule> {
    TokenKind::ALL.into_iter().map(rule_for).collect()
}

fn rule_for(kind: TokenKind) -> TokenRule {
    match kind {
        TokenKind::RawHtml => html::RawHtml::rule(),
        TokenKind::Link => link::Link::rule(),
        TokenKind::Image => link::Image::rule(),
        TokenKind::AutoLink => link::AutoLink::rule(),
        TokenKind::Bold => emphasis::bold(),
        TokenKind::Emph => emphasis::emph(),
        TokenKind::Strike => emphasis::strike(),
        TokenKind::Code => code::InlineCode::rule(),
        TokenKind::Subscript => emphasis::subscript(),
        TokenKind::Superscript => emphasis::superscript(),
        TokenKind::Highlight => emphasis::highlight(),
        TokenKind::Arrow => symbols::arrow(),
        TokenKind::InlineEquation => equation::InlineEquation::rule(),
        TokenKind::FootnoteRef => footnote::FootnoteRef::rule(),
        TokenKind::Emoji => symbols::emoji(),
    }
}
