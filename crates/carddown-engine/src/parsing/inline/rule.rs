use regex::{Captures, Regex};

use super::types::{InlineToken, TokenKind};
use crate::context::ParseContext;
use crate::node::Node;
use crate::parsing::span::Span;

/// Builds the node for a token. Children from the token's content are added
/// by the scanner afterwards.
pub type RenderFn = fn(&InlineToken, &str, &mut ParseContext) -> Node;

/// Post-match fixup, e.g. a link with an empty label showing its URL.
pub type AdjustFn = fn(&mut InlineToken, &str);

/// Context checks a match must pass. The regex engine has no look-around,
/// so these stand in for it.
#[derive(Debug, Clone, Copy, Default)]
pub struct Guard {
    /// Reject when the char before the match is one of these.
    pub not_after: &'static [char],
    /// Require a non-whitespace char right before the match.
    pub after_non_whitespace: bool,
    /// Reject when the match is directly followed by this char.
    pub not_followed_by: Option<char>,
}

impl Guard {
    fn accepts(&self, line: &str, start: usize, end: usize) -> bool {
        let prev = line[..start].chars().next_back();
        if prev.is_some_and(|p| self.not_after.contains(&p)) {
            return false;
        }
        if self.after_non_whitespace && !prev.is_some_and(|p| !p.is_whitespace()) {
            return false;
        }
        if let Some(c) = self.not_followed_by
            && line[end..].starts_with(c)
        {
            return false;
        }
        true
    }
}

pub struct Pattern {
    regex: Regex,
    guard: Guard,
}

impl Pattern {
    pub fn new(pattern: &str) -> Self {
        Self {
            regex: Regex::new(pattern).expect("Invalid inline token pattern"),
            guard: Guard::default(),
        }
    }

    pub fn guarded(pattern: &str, guard: Guard) -> Self {
        Self {
            guard,
            ..Self::new(pattern)
        }
    }
}

/// How one [`TokenKind`] is found and rendered.
pub struct TokenRule {
    pub kind: TokenKind,
    /// Alternative spellings; all of them are tried.
    pub patterns: Vec<Pattern>,
    /// Capture group holding the content. `None` for kinds that build their
    /// own children.
    pub content_group: Option<usize>,
    pub parse_content: bool,
    pub render: RenderFn,
    pub adjust: Option<AdjustFn>,
}

impl TokenRule {
    /// A rule whose content (group 1) is tokenized again.
    pub fn wrapping(kind: TokenKind, patterns: Vec<Pattern>, render: RenderFn) -> Self {
        Self {
            kind,
            patterns,
            content_group: Some(1),
            parse_content: true,
            render,
            adjust: None,
        }
    }

    /// A rule whose renderer produces the complete node.
    pub fn opaque(kind: TokenKind, patterns: Vec<Pattern>, render: RenderFn) -> Self {
        Self {
            kind,
            patterns,
            content_group: None,
            parse_content: false,
            render,
            adjust: None,
        }
    }

    pub fn with_adjust(mut self, adjust: AdjustFn) -> Self {
        self.adjust = Some(adjust);
        self
    }

    /// Every accepted match of every pattern, in pattern order.
    ///
    /// A match rejected by its guard is retried one char further on.
    pub fn find_all(&self, line: &str) -> Vec<InlineToken> {
        let mut found = Vec::new();
        for pattern in &self.patterns {
            let mut at = 0;
            while at < line.len() {
                let Some(caps) = pattern.regex.captures_at(line, at) else {
                    break;
                };
                let Some(whole) = caps.get(0) else {
                    break;
                };
                if pattern.guard.accepts(line, whole.start(), whole.end()) {
                    found.push(self.token(&caps, line));
                    at = if whole.is_empty() {
                        next_char(line, whole.end())
                    } else {
                        whole.end()
                    };
                } else {
                    at = next_char(line, whole.start());
                }
            }
        }
        found
    }

    fn token(&self, caps: &Captures<'_>, line: &str) -> InlineToken {
        let groups: Vec<Option<Span>> = caps
            .iter()
            .map(|m| m.map(|m| Span::new(m.start(), m.end())))
            .collect();
        let span = groups[0].unwrap_or_default();
        let content = self
            .content_group
            .and_then(|g| groups.get(g).copied().flatten())
            .unwrap_or(Span::new(span.end, span.end));
        let mut token = InlineToken {
            kind: self.kind,
            span,
            content,
            parse_content: self.parse_content,
            groups,
        };
        if let Some(adjust) = self.adjust {
            adjust(&mut token, line);
        }
        token
    }
}

fn next_char(line: &str, i: usize) -> usize {
    i + line[i..].chars().next().map_or(1, char::len_utf8)
}
