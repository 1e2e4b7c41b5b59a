use crate::context::{ParseContext, Warning};
use crate::error::MarkdownSyntaxError;
use crate::node::Node;
use crate::parsing::blocks::classify::trim_blank_edges;

use super::code_block::code_block;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceKind {
    Backticks,
    Tildes,
}

/// ```` ``` ```` or `~~~` fences. A fence line holds the fence and at most
/// one word, the language; anything else on the line makes it text.
pub struct CodeFence;

impl CodeFence {
    pub const BACKTICKS: &'static str = "```";
    pub const TILDES: &'static str = "~~~";

    pub fn sig(line: &str) -> Option<FenceKind> {
        let line = line.trim_end();
        let (kind, info) = if let Some(info) = line.strip_prefix(Self::BACKTICKS) {
            (FenceKind::Backticks, info)
        } else if let Some(info) = line.strip_prefix(Self::TILDES) {
            (FenceKind::Tildes, info)
        } else {
            return None;
        };
        (!info.trim_start().contains(char::is_whitespace)).then_some(kind)
    }

    /// A fence only closes with the same fence character.
    pub fn closes(kind: FenceKind, line: &str) -> bool {
        Self::sig(line.trim_end()) == Some(kind)
    }

    /// The info string after the opening fence.
    pub fn lang(line: &str) -> &str {
        line.trim()
            .strip_prefix(Self::BACKTICKS)
            .or_else(|| line.trim().strip_prefix(Self::TILDES))
            .unwrap_or_default()
            .trim()
    }
}

pub fn parse_fenced_code(
    lines: &[&str],
    start: usize,
    ctx: &mut ParseContext,
) -> Result<(Node, usize), MarkdownSyntaxError> {
    let kind = CodeFence::sig(lines[start]).unwrap_or(FenceKind::Backticks);
    let lang = CodeFence::lang(lines[start]);
    let close = lines[start + 1..]
        .iter()
        .position(|l| CodeFence::closes(kind, l))
        .map(|offset| start + 1 + offset);

    let end = close.unwrap_or(lines.len());
    if close.is_none() {
        ctx.warn(Warning::UnclosedCodeBlock {
            start_line: ctx.doc_line(start),
            end_line: ctx.doc_line(end - 1),
        });
    }
    let body = trim_blank_edges(&lines[start + 1..end]);
    let node = code_block(body, lang, ctx);
    Ok((node, (end + 1).min(lines.len())))
}
