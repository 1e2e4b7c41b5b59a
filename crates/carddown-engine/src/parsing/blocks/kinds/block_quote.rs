use crate::context::ParseContext;
use crate::error::MarkdownSyntaxError;
use crate::node::{Element, Node};
use crate::parsing::MAX_NESTING;
use crate::parsing::blocks::parse_blocks;

/// `>` quotes; the number of leading `>` is the nesting depth.
pub struct BlockQuote;

impl BlockQuote {
    pub const PREFIX: char = '>';

    /// At least one `>` after spaces or tabs. Agrees with
    /// [`strip_prefixes`](Self::strip_prefixes), so a matching line always
    /// has depth one or more.
    pub fn matches(line: &str) -> bool {
        Self::strip_prefixes(line).0 > 0
    }

    /// Strips blockquote prefixes from a line, returning (depth, byte_offset).
    ///
    /// Handles `> text`, `>> nested` and `> > spaced nested`. Only ASCII
    /// spaces and tabs may precede a `>`.
    pub fn strip_prefixes(s: &str) -> (usize, usize) {
        let b = s.as_bytes();
        let mut i = 0usize;
        let mut depth = 0usize;

        loop {
            while i < b.len() && matches!(b[i], b' ' | b'\t') {
                i += 1;
            }
            if i < b.len() && b[i] == (Self::PREFIX as u8) {
                depth += 1;
                i += 1;
                if i < b.len() && b[i] == b' ' {
                    i += 1;
                }
            } else {
                break;
            }
        }
        (depth, i)
    }
}

pub fn parse_block_quote(
    lines: &[&str],
    start: usize,
    ctx: &mut ParseContext,
) -> Result<(Node, usize), MarkdownSyntaxError> {
    let (depth, _) = BlockQuote::strip_prefixes(lines[start]);
    if depth == 0 {
        return Err(MarkdownSyntaxError::NotAQuote);
    }
    parse_quote_at(lines, start, depth, 1, ctx)
}

/// Lines at `depth` gather into one paragraph; a deeper line opens a nested
/// quote after flushing that paragraph, a shallower one ends this quote.
fn parse_quote_at(
    lines: &[&str],
    start: usize,
    depth: usize,
    nesting: usize,
    ctx: &mut ParseContext,
) -> Result<(Node, usize), MarkdownSyntaxError> {
    if nesting > MAX_NESTING {
        return Err(MarkdownSyntaxError::NestingTooDeep { depth: nesting });
    }
    let mut quote = Element::new("blockquote");
    let mut text: Vec<&str> = Vec::new();
    let mut i = start;
    while i < lines.len() {
        let line = lines[i];
        if !BlockQuote::matches(line) {
            break;
        }
        let (line_depth, offset) = BlockQuote::strip_prefixes(line);
        if line_depth == 0 || line_depth < depth {
            break;
        }
        if line_depth > depth {
            flush_paragraph(&mut quote, &mut text, ctx);
            let (inner, next) = parse_quote_at(lines, i, line_depth, nesting + 1, ctx)?;
            quote.push(inner);
            i = next;
        } else {
            text.push(&line[offset..]);
            i += 1;
        }
    }
    flush_paragraph(&mut quote, &mut text, ctx);
    Ok((quote.into(), i))
}

fn flush_paragraph(quote: &mut Element, text: &mut Vec<&str>, ctx: &mut ParseContext) {
    if text.iter().all(|l| l.trim().is_empty()) {
        text.clear();
        return;
    }
    let mut children = parse_blocks(text, false, true, ctx);
    if children.last().is_some_and(|n| n.is_tag("br")) {
        children.pop();
    }
    quote.push(Element::new("p").with_children(children));
    text.clear();
}
