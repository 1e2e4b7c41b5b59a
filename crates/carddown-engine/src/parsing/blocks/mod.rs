//! # Block Parsing
//!
//! Line-oriented recursive descent over the lines of a document or card side.
//!
//! ## Phases per line
//!
//! 1. **Classification** (`classify`): an ordered predicate chain decides what
//!    the current line opens. Only definition lists look one line ahead.
//! 2. **Construction**: single-line constructs are built in place; multi-line
//!    ones go through [`open_construct`], which runs the construct's parser
//!    and returns the node plus the next unconsumed line.
//! 3. **Collection** (`builder`): [`BlockBuilder`] gathers text lines into
//!    paragraphs and flushes them at block boundaries.
//!
//! ## Key Invariants
//!
//! - A failing construct never aborts the document: the adapter degrades the
//!   line to literal text and records a warning.
//! - Every step consumes at least one line.
//! - List and blockquote nesting is capped at [`MAX_NESTING`](crate::parsing::MAX_NESTING).

pub mod builder;
pub mod classify;
pub mod kinds;
pub mod open;

pub use builder::BlockBuilder;
pub use classify::{LineClass, LineClassifier};
pub use kinds::{
    parse_block_quote, parse_def_list, parse_fenced_code, parse_footnotes, parse_indented_code,
    parse_latex_block, parse_list, parse_table,
};
pub use open::{BlockParser, open_construct};

use crate::context::ParseContext;
use crate::node::{Element, Node};
use crate::parsing::inline::tokenize;

use kinds::{Heading, HorizontalRule, PageBreak};

/// Parses `lines` into block nodes.
///
/// `paragraph` wraps runs of text lines in `<p>`; without it text lines are
/// emitted directly, each followed by a `<br/>` when `trailing_break` is set.
pub fn parse_blocks(
    lines: &[&str],
    paragraph: bool,
    trailing_break: bool,
    ctx: &mut ParseContext,
) -> Vec<Node> {
    let options = ctx.options;
    let classifier = LineClassifier::new(options);
    let mut builder = BlockBuilder::new(paragraph, trailing_break);
    let mut i = 0;

    while i < lines.len() {
        ctx.line = i;
        let line = lines[i].trim_end();
        let (node, next) = match classifier.classify(lines, i) {
            LineClass::Blank => {
                builder.blank(options.ignore_empty_lines);
                i += 1;
                continue;
            }
            LineClass::Text => {
                builder.push_text(tokenize(line, ctx));
                i += 1;
                continue;
            }
            LineClass::Heading => (Heading::parse(line, ctx), i + 1),
            LineClass::PageBreak => (PageBreak::node(), i + 1),
            LineClass::RawHtml => (Node::text(line.trim()), i + 1),
            LineClass::Rule => (HorizontalRule::node(), i + 1),
            LineClass::LatexBlock => {
                open_construct("latex block", parse_latex_block, lines, i, ctx)
            }
            LineClass::IndentedCode => {
                open_construct("indented code", parse_indented_code, lines, i, ctx)
            }
            LineClass::FencedCode => {
                open_construct("fenced code", parse_fenced_code, lines, i, ctx)
            }
            LineClass::List => open_construct("list", parse_list, lines, i, ctx),
            LineClass::Table => open_construct("table", parse_table, lines, i, ctx),
            LineClass::DefinitionList => {
                open_construct("definition list", parse_def_list, lines, i, ctx)
            }
            LineClass::BlockQuote => {
                let (quote, next) = open_construct("blockquote", parse_block_quote, lines, i, ctx);
                let div = Element::new("div").with_class("blockquote-div").with_child(quote);
                (div.into(), next)
            }
            LineClass::Footnote => open_construct("footnotes", parse_footnotes, lines, i, ctx),
        };
        builder.push_block(node);
        i = next;
    }
    builder.finish()
}

/// Parses a whole text in paragraph mode.
pub fn parse_markdown(text: &str, ctx: &mut ParseContext) -> Vec<Node> {
    let lines: Vec<&str> = text.lines().collect();
    parse_blocks(&lines, true, true, ctx)
}
