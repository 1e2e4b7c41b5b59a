use std::sync::OnceLock;

use regex::Regex;

use crate::context::ParseContext;
use crate::error::MarkdownSyntaxError;
use crate::node::{Element, Node};
use crate::options::TableAlign;
use crate::parsing::inline::tokenize;

/// A `|`-delimited table: header row, alignment row, body rows.
pub struct Table;

impl Table {
    pub const PIPE: char = '|';

    fn row_regex() -> &'static Regex {
        static RE: OnceLock<Regex> = OnceLock::new();
        RE.get_or_init(|| Regex::new(r"^\s*\|(\s*\S+.*)\|").expect("Invalid table row regex"))
    }

    fn separator_regex() -> &'static Regex {
        static RE: OnceLock<Regex> = OnceLock::new();
        RE.get_or_init(|| Regex::new(r"^:?-+:?$").expect("Invalid table separator regex"))
    }

    pub fn matches(line: &str) -> bool {
        Self::row_regex().is_match(line)
    }

    /// Cell texts with the outer pipes removed.
    pub fn cells(line: &str) -> Vec<&str> {
        let t = line.trim();
        let t = t.strip_prefix(Self::PIPE).unwrap_or(t);
        let t = t.strip_suffix(Self::PIPE).unwrap_or(t);
        t.split(Self::PIPE).map(str::trim).collect()
    }

    /// Colons on the left, right, or both sides pick the alignment.
    pub fn alignments(
        row: &str,
        default: TableAlign,
    ) -> Result<Vec<TableAlign>, MarkdownSyntaxError> {
        Self::cells(row)
            .into_iter()
            .map(|cell| {
                if !Self::separator_regex().is_match(cell) {
                    return Err(MarkdownSyntaxError::InvalidAlignmentRow {
                        row: row.trim().to_string(),
                    });
                }
                Ok(match (cell.starts_with(':'), cell.ends_with(':') && cell.len() > 1) {
                    (true, true) => TableAlign::Center,
                    (true, false) => TableAlign::Left,
                    (false, true) => TableAlign::Right,
                    (false, false) => default,
                })
            })
            .collect()
    }
}

pub fn parse_table(
    lines: &[&str],
    start: usize,
    ctx: &mut ParseContext,
) -> Result<(Node, usize), MarkdownSyntaxError> {
    let separator = lines
        .get(start + 1)
        .ok_or(MarkdownSyntaxError::MissingTableHeader)?;
    let alignments = Table::alignments(separator, ctx.options.table_align)?;
    let header = Table::cells(lines[start]);
    if header.len() != alignments.len() {
        return Err(MarkdownSyntaxError::InconsistentColumns {
            expected: header.len(),
            found: alignments.len(),
        });
    }

    let mut head_row = Element::new("tr");
    for (cell, align) in header.iter().zip(&alignments) {
        let bold = Element::new("b").with_children(tokenize(cell, ctx));
        head_row.push(Element::new("th").with_attr("style", align.style()).with_child(bold));
    }

    let mut body = Element::new("tbody");
    let mut i = start + 2;
    while i < lines.len() && Table::matches(lines[i]) {
        let cells = Table::cells(lines[i]);
        if cells.len() != alignments.len() {
            return Err(MarkdownSyntaxError::InconsistentColumns {
                expected: alignments.len(),
                found: cells.len(),
            });
        }
        ctx.line = i;
        let mut row = Element::new("tr");
        for (cell, align) in cells.iter().zip(&alignments) {
            row.push(
                Element::new("td")
                    .with_attr("style", align.style())
                    .with_children(tokenize(cell, ctx)),
            );
        }
        body.push(row);
        i += 1;
    }

    let table = Element::new("table")
        .with_child(Element::new("thead").with_child(head_row))
        .with_child(body);
    Ok((table.into(), i))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Options;
    use crate::render::html::node_to_html;
    use insta::assert_snapshot;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn parse(lines: &[&str]) -> Result<(Node, usize), MarkdownSyntaxError> {
        let options = Options::default();
        let mut ctx = ParseContext::new(&options);
        parse_table(lines, 0, &mut ctx)
    }

    #[test]
    fn mismatched_body_row_is_an_error() {
        let result = parse(&["| a | b |", "|---|---|", "| 1 | 2 | 3 |"]);
        assert_eq!(
            result.map(|_| ()),
            Err(MarkdownSyntaxError::InconsistentColumns { expected: 2, found: 3 })
        );
    }

    #[test]
    fn missing_separator_row() {
        assert_eq!(parse(&["| a | b |"]).map(|_| ()), Err(MarkdownSyntaxError::MissingTableHeader));
        assert!(matches!(
            parse(&["| a | b |", "| x | y |"]),
            Err(MarkdownSyntaxError::InvalidAlignmentRow { .. })
        ));
    }

    #[rstest]
    #[case("---", TableAlign::Left)]
    #[case(":--", TableAlign::Left)]
    #[case(":-:", TableAlign::Center)]
    #[case("--:", TableAlign::Right)]
    fn alignment_from_colons(#[case] cell: &str, #[case] expected: TableAlign) {
        let row = format!("|{cell}|");
        assert_eq!(Table::alignments(&row, TableAlign::Left), Ok(vec![expected]));
    }

    #[test]
    fn well_formed_table() {
        let (node, next) =
            parse(&["| a | **b** |", "|:-:|--:|", "| 1 | 2 |", "after"]).expect("parses");
        assert_eq!(next, 3);
        assert_snapshot!(node_to_html(&node, 0, 2), @r#"
        <table>
          <thead>
            <tr>
              <th style="text-align:center"><b>a</b></th>
              <th style="text-align:right"><b><strong>b</strong></b></th>
            </tr>
          </thead>
          <tbody>
            <tr>
              <td style="text-align:center">1</td>
              <td style="text-align:right">2</td>
            </tr>
          </tbody>
        </table>
        "#);
    }
}
