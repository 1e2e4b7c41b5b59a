use std::sync::OnceLock;

use regex::Regex;

use crate::context::ParseContext;
use crate::error::MarkdownSyntaxError;
use crate::node::{Element, Node};
use crate::parsing::inline::tokenize;

/// A term line followed by `: definition` lines.
pub struct DefinitionList;

impl DefinitionList {
    pub const DEFINITION_PREFIX: &'static str = ": ";
    /// Consecutive blank lines that end the list.
    pub const MAX_BLANKS: usize = 2;

    fn definition_regex() -> &'static Regex {
        static RE: OnceLock<Regex> = OnceLock::new();
        RE.get_or_init(|| Regex::new(r"^: \S").expect("Invalid definition regex"))
    }

    pub fn is_definition(line: &str) -> bool {
        Self::definition_regex().is_match(line)
    }

    /// A term is a non-definition line directly followed by a definition.
    pub fn starts(lines: &[&str], i: usize) -> bool {
        !Self::is_definition(lines[i]) && lines.get(i + 1).is_some_and(|l| Self::is_definition(l))
    }
}

/// Blank lines between entries become `<br/>`s; trailing blank lines are not
/// consumed.
pub fn parse_def_list(
    lines: &[&str],
    start: usize,
    ctx: &mut ParseContext,
) -> Result<(Node, usize), MarkdownSyntaxError> {
    let mut dl = Element::new("dl");
    let mut end = start;
    let mut blanks = 0;
    let mut i = start;
    while i < lines.len() {
        let line = lines[i].trim_end();
        if line.trim().is_empty() {
            blanks += 1;
            if blanks >= DefinitionList::MAX_BLANKS {
                break;
            }
            i += 1;
            continue;
        }
        ctx.line = i;
        let entry = if DefinitionList::is_definition(line) {
            let text = line[DefinitionList::DEFINITION_PREFIX.len()..].trim();
            Element::new("dd").with_children(tokenize(text, ctx))
        } else if DefinitionList::starts(lines, i) {
            let term = Element::new("b").with_children(tokenize(line.trim(), ctx));
            Element::new("dt").with_child(term)
        } else {
            break;
        };
        for _ in 0..blanks {
            dl.push(Node::br());
        }
        blanks = 0;
        dl.push(entry);
        i += 1;
        end = i;
    }
    Ok((dl.into(), end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Options;
    use crate::render::html::node_to_html;
    use insta::assert_snapshot;

    #[test]
    fn terms_and_definitions() {
        let options = Options::default();
        let mut ctx = ParseContext::new(&options);
        let lines = ["Rust", ": a language", "", "Cargo", ": its build tool", "", "", "after"];
        let (node, next) = parse_def_list(&lines, 0, &mut ctx).expect("parses");
        assert_eq!(next, 5);
        assert_snapshot!(node_to_html(&node, 0, 2), @r"
        <dl>
          <dt><b>Rust</b></dt>
          <dd>a language</dd>
          <br/>
          <dt><b>Cargo</b></dt>
          <dd>its build tool</dd>
        </dl>
        ");
    }

    #[test]
    fn stops_at_non_conforming_line() {
        let options = Options::default();
        let mut ctx = ParseContext::new(&options);
        let lines = ["Term", ": def", "plain text"];
        let (_, next) = parse_def_list(&lines, 0, &mut ctx).expect("parses");
        assert_eq!(next, 2);
    }
}
