use std::collections::BTreeMap;
use std::sync::OnceLock;

use super::kinds::builtin_rules;
use super::rule::TokenRule;
use super::types::{InlineToken, TokenKind};
use crate::context::ParseContext;

static RULES: OnceLock<Vec<TokenRule>> = OnceLock::new();

fn rules() -> &'static [TokenRule] {
    RULES.get_or_init(builtin_rules)
}

pub fn rule(kind: TokenKind) -> &'static TokenRule {
    &rules()[kind as usize]
}

/// Every token on `line`, keyed by start offset.
///
/// Kinds run in priority order and a later kind replaces an earlier one that
/// starts at the same offset.
pub fn find_tokens(line: &str, ctx: &ParseContext) -> BTreeMap<usize, InlineToken> {
    let mut tokens = BTreeMap::new();
    for &kind in ctx.inline_kinds() {
        for token in rule(kind).find_all(line) {
            tokens.insert(token.span.start, token);
        }
    }
    tokens
}
