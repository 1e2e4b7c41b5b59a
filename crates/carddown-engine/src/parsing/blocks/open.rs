use crate::context::{ParseContext, Warning};
use crate::error::MarkdownSyntaxError;
use crate::node::{Element, Node};

/// A multi-line construct parser: consumes from `start` and returns the node
/// plus the index of the first line it did not consume.
pub type BlockParser =
    fn(&[&str], usize, &mut ParseContext) -> Result<(Node, usize), MarkdownSyntaxError>;

/// Runs `parse`, degrading a failure to the offending line shown as text.
///
/// Always makes progress: the returned index is past `start`.
pub fn open_construct(
    construct: &'static str,
    parse: BlockParser,
    lines: &[&str],
    start: usize,
    ctx: &mut ParseContext,
) -> (Node, usize) {
    match parse(lines, start, ctx) {
        Ok((node, next)) => (node, next.max(start + 1)),
        Err(err) => {
            ctx.warn(Warning::BlockFallback {
                construct,
                line: ctx.doc_line(start),
                message: err.to_string(),
            });
            let fallback = Element::new("span")
                .with_child(Node::br())
                .with_child(Node::preserved_text(lines[start], ctx.options.tabsize));
            (fallback.into(), start + 1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Options;

    fn failing(_: &[&str], _: usize, _: &mut ParseContext) -> Result<(Node, usize), MarkdownSyntaxError> {
        Err(MarkdownSyntaxError::MissingTableHeader)
    }

    fn stuck(_: &[&str], start: usize, _: &mut ParseContext) -> Result<(Node, usize), MarkdownSyntaxError> {
        Ok((Node::text("x"), start))
    }

    #[test]
    fn failure_degrades_to_the_line() {
        let options = Options::default();
        let mut ctx = ParseContext::new(&options);
        let (node, next) = open_construct("table", failing, &["| a b |"], 0, &mut ctx);
        assert_eq!(next, 1);
        assert_eq!(node.inner_text(), "| a b |");
        assert!(matches!(
            ctx.warnings(),
            [Warning::BlockFallback { construct: "table", line: 1, .. }]
        ));
    }

    #[test]
    fn always_advances() {
        let options = Options::default();
        let mut ctx = ParseContext::new(&options);
        let (_, next) = open_construct("stuck", stuck, &["a", "b"], 1, &mut ctx);
        assert_eq!(next, 2);
    }
}
