use crate::options::Options;
use crate::parsing::inline::kinds::RawHtml;

use super::kinds::{
    BlockQuote, CodeFence, DefinitionList, FootnoteBlock, Heading, HorizontalRule, IndentedCode,
    LatexBlock, List, PageBreak, Table,
};

/// What a line opens. Decided from the line itself plus, for definition
/// lists, the line after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass {
    Blank,
    Heading,
    PageBreak,
    RawHtml,
    LatexBlock,
    IndentedCode,
    FencedCode,
    Rule,
    List,
    Table,
    DefinitionList,
    BlockQuote,
    Footnote,
    Text,
}

/// Runs the block predicates in precedence order; the first match wins.
pub struct LineClassifier<'o> {
    options: &'o Options,
}

impl<'o> LineClassifier<'o> {
    pub fn new(options: &'o Options) -> Self {
        Self { options }
    }

    pub fn classify(&self, lines: &[&str], i: usize) -> LineClass {
        let line = lines[i].trim_end();
        if line.trim().is_empty() {
            LineClass::Blank
        } else if Heading::matches(line) {
            LineClass::Heading
        } else if PageBreak::matches(line) {
            LineClass::PageBreak
        } else if RawHtml::is_html_line(line) {
            LineClass::RawHtml
        } else if LatexBlock::opens(line) {
            LineClass::LatexBlock
        } else if IndentedCode::matches(line, self.options.tabsize) {
            LineClass::IndentedCode
        } else if CodeFence::sig(line).is_some() {
            LineClass::FencedCode
        } else if HorizontalRule::matches(line) {
            LineClass::Rule
        } else if List::tag(line, &self.options.list_item_chars).is_some() {
            LineClass::List
        } else if Table::matches(line) {
            LineClass::Table
        } else if DefinitionList::starts(lines, i) {
            LineClass::DefinitionList
        } else if BlockQuote::matches(line) {
            LineClass::BlockQuote
        } else if FootnoteBlock::matches(line) {
            LineClass::Footnote
        } else {
            LineClass::Text
        }
    }
}

/// Width of the leading whitespace, a tab counting as `tabsize` columns.
pub fn leading_whitespace(line: &str, tabsize: usize) -> usize {
    let mut width = 0;
    for c in line.chars() {
        match c {
            ' ' => width += 1,
            '\t' => width += tabsize,
            _ => break,
        }
    }
    width
}

/// Drops blank lines from both ends.
pub fn trim_blank_edges<'l, 's>(lines: &'l [&'s str]) -> &'l [&'s str] {
    let start = lines
        .iter()
        .position(|l| !l.trim().is_empty())
        .unwrap_or(lines.len());
    let end = lines
        .iter()
        .rposition(|l| !l.trim().is_empty())
        .map_or(start, |e| e + 1);
    &lines[start..end]
}
