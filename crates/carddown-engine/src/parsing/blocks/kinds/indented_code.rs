use crate::context::{ParseContext, Warning};
use crate::error::MarkdownSyntaxError;
use crate::node::Node;
use crate::parsing::blocks::classify::{leading_whitespace, trim_blank_edges};

use super::code_block::code_block;

/// Code indented by at least four columns.
pub struct IndentedCode;

impl IndentedCode {
    pub const INDENT: usize = 4;

    pub fn matches(line: &str, tabsize: usize) -> bool {
        !line.trim().is_empty() && leading_whitespace(line, tabsize) >= Self::INDENT
    }

    /// Removes one indentation level, a tab counting as `tabsize` spaces.
    fn dedent(line: &str, tabsize: usize) -> String {
        let expanded = line.replace('\t', &" ".repeat(tabsize));
        let strip = leading_whitespace(&expanded, tabsize).min(Self::INDENT);
        expanded[strip..].to_string()
    }
}

/// Runs while lines stay indented; blank lines inside the run belong to it.
pub fn parse_indented_code(
    lines: &[&str],
    start: usize,
    ctx: &mut ParseContext,
) -> Result<(Node, usize), MarkdownSyntaxError> {
    let tabsize = ctx.options.tabsize;
    let end = lines[start..]
        .iter()
        .position(|l| !(l.trim().is_empty() || IndentedCode::matches(l, tabsize)))
        .map_or(lines.len(), |offset| start + offset);

    if end == lines.len() {
        ctx.warn(Warning::UnclosedCodeBlock {
            start_line: ctx.doc_line(start),
            end_line: ctx.doc_line(end - 1),
        });
    }
    let dedented: Vec<String> = trim_blank_edges(&lines[start..end])
        .iter()
        .map(|l| IndentedCode::dedent(l, tabsize))
        .collect();
    let body: Vec<&str> = dedented.iter().map(String::as_str).collect();
    Ok((code_block(&body, "", ctx), end))
}
