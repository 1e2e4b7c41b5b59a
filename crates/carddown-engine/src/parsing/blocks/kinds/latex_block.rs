use crate::context::{ParseContext, Warning};
use crate::error::MarkdownSyntaxError;
use crate::escape;
use crate::node::{Element, Node};

/// Display math between `$$` delimiters, on one line or spread over several.
pub struct LatexBlock;

impl LatexBlock {
    pub const DELIMITER: &'static str = "$$";

    pub fn opens(line: &str) -> bool {
        line.trim_start().starts_with(Self::DELIMITER)
    }
}

pub fn parse_latex_block(
    lines: &[&str],
    start: usize,
    ctx: &mut ParseContext,
) -> Result<(Node, usize), MarkdownSyntaxError> {
    let first = lines[start].trim();
    let first = first.strip_prefix(LatexBlock::DELIMITER).unwrap_or(first);

    let mut body: Vec<&str> = Vec::new();
    let mut next = lines.len();
    if let Some((inner, _)) = first.split_once(LatexBlock::DELIMITER) {
        body.push(inner);
        next = start + 1;
    } else {
        body.push(first);
        let mut closed = false;
        for (i, line) in lines.iter().enumerate().skip(start + 1) {
            if let Some((inner, _)) = line.split_once(LatexBlock::DELIMITER) {
                body.push(inner);
                next = i + 1;
                closed = true;
                break;
            }
            body.push(*line);
        }
        if !closed {
            ctx.warn(Warning::UnclosedMathBlock {
                start_line: ctx.doc_line(start),
                end_line: ctx.doc_line(lines.len() - 1),
            });
        }
    }

    let source = escape::restore_source(body.join("\n").trim());
    let node = match ctx.render_latex(&source, true) {
        Some(svg) => Element::new("div")
            .with_class("latex display-latex")
            .with_child(svg),
        None => Element::new("div")
            .with_class("latex-block")
            .with_child(html_escape::encode_text(&format!("$${source}$$")).into_owned()),
    };
    Ok((node.into(), next))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Options;
    use pretty_assertions::assert_eq;

    #[test]
    fn single_line_block() {
        let options = Options::default();
        let mut ctx = ParseContext::new(&options);
        let (node, next) = parse_latex_block(&["$$ a < b $$", "x"], 0, &mut ctx).expect("parses");
        assert_eq!(next, 1);
        assert_eq!(
            node,
            Element::new("div")
                .with_class("latex-block")
                .with_child("$$a &lt; b$$")
                .into()
        );
    }

    #[test]
    fn multi_line_block_until_closing_delimiter() {
        let options = Options::default();
        let mut ctx = ParseContext::new(&options);
        let lines = ["$$", "x^2", "+ y^2", "$$", "after"];
        let (node, next) = parse_latex_block(&lines, 0, &mut ctx).expect("parses");
        assert_eq!(next, 4);
        assert_eq!(node.inner_text(), "$$x^2 + y^2$$");
    }

    #[test]
    fn unclosed_block_runs_to_the_end() {
        let options = Options::default();
        let mut ctx = ParseContext::new(&options);
        let (_, next) = parse_latex_block(&["$$", "x"], 0, &mut ctx).expect("parses");
        assert_eq!(next, 2);
        assert_eq!(
            ctx.warnings(),
            &[Warning::UnclosedMathBlock { start_line: 1, end_line: 2 }]
        );
    }
}
