use std::collections::BTreeMap;

use super::cursor::Cursor;
use super::kinds::RawHtml;
use super::registry::{find_tokens, rule};
use super::types::InlineToken;
use crate::context::{ParseContext, Warning};
use crate::node::Node;
use crate::parsing::MAX_NESTING;
use crate::parsing::span::Span;

/// Turns one line of text into inline nodes.
///
/// A line that is nothing but HTML is passed through untouched.
pub fn tokenize(line: &str, ctx: &mut ParseContext) -> Vec<Node> {
    if line.is_empty() {
        return Vec::new();
    }
    if RawHtml::is_html_line(line) {
        return vec![Node::text(line.trim())];
    }
    let tokens = find_tokens(line, ctx);
    scan(line, &tokens, Span::new(0, line.len()), 0, ctx)
}

/// Walks `range` left to right. A token is taken when it starts at the
/// cursor and fits inside the range; everything else is text.
fn scan(
    line: &str,
    tokens: &BTreeMap<usize, InlineToken>,
    range: Span,
    depth: usize,
    ctx: &mut ParseContext,
) -> Vec<Node> {
    let mut out = Vec::new();
    let mut cur = Cursor::new(line, range);
    let mut text_start = cur.pos();

    while !cur.eof() {
        let at = cur.pos();
        match tokens.get(&at) {
            Some(token) if !token.span.is_empty() && range.contains(token.span) => {
                flush_text(line, text_start, at, &mut out);
                out.push(render_token(line, tokens, token, depth, ctx));
                cur.jump_to(token.span.end);
                text_start = cur.pos();
            }
            _ => {
                cur.bump();
            }
        }
    }
    flush_text(line, text_start, cur.pos(), &mut out);
    out
}

fn flush_text(line: &str, start: usize, end: usize, out: &mut Vec<Node>) {
    if start < end {
        out.push(Node::text(&line[start..end]));
    }
}

fn render_token(
    line: &str,
    tokens: &BTreeMap<usize, InlineToken>,
    token: &InlineToken,
    depth: usize,
    ctx: &mut ParseContext,
) -> Node {
    let mut node = (rule(token.kind).render)(token, line, ctx);
    if token.content.is_empty() {
        return node;
    }
    let Some(element) = node.as_element_mut() else {
        return node;
    };
    let content = token.content_str(line);
    if !token.parse_content {
        element.push(content);
    } else if depth + 1 > MAX_NESTING {
        let line_no = ctx.doc_line(ctx.line);
        ctx.warn(Warning::NestingTooDeep { line: line_no });
        element.push(content);
    } else {
        element.extend(scan(line, tokens, token.content, depth + 1, ctx));
    }
    node
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Element;
    use crate::options::Options;
    use crate::parsing::inline::TokenKind;
    use crate::render::html::inline_html;
    use insta::assert_snapshot;
    use pretty_assertions::assert_eq;

    fn html(line: &str) -> String {
        let options = Options::default();
        let mut ctx = ParseContext::new(&options);
        inline_html(&tokenize(line, &mut ctx))
    }

    #[test]
    fn plain_text_is_one_node() {
        let options = Options::default();
        let mut ctx = ParseContext::new(&options);
        assert_eq!(tokenize("just words", &mut ctx), vec![Node::text("just words")]);
    }

    #[test]
    fn link_without_scheme_gets_http() {
        let options = Options::default();
        let mut ctx = ParseContext::new(&options);
        assert_eq!(
            tokenize("[Link](google.de)", &mut ctx),
            vec![
                Element::new("a")
                    .with_attr("href", "http://google.de")
                    .with_child("Link")
                    .into()
            ]
        );
    }

    #[test]
    fn overlapping_emphasis_nests() {
        let line = "_Here_ is some _**Example**_ text and **multiple** tokens in _one_ line";
        let options = Options::default();
        let ctx = ParseContext::new(&options);
        let tokens = find_tokens(line, &ctx);
        assert_eq!(tokens[&0].kind, TokenKind::Emph);
        assert_eq!(tokens[&15].kind, TokenKind::Emph);
        assert_eq!(tokens[&16].kind, TokenKind::Bold);
        assert_snapshot!(
            html(line),
            @"<em>Here</em> is some <em><strong>Example</strong></em> text and <strong>multiple</strong> tokens in <em>one</em> line"
        );
    }

    #[test]
    fn code_is_a_raw_zone() {
        assert_snapshot!(html("`**not bold**` and **bold**"), @r#"<code class="inline">**not bold**</code> and <strong>bold</strong>"#);
    }

    #[test]
    fn empty_link_label_shows_url() {
        assert_snapshot!(
            html("[](https://a_b_c.de)"),
            @r#"<a href="https://a_b_c.de">https://a_b_c.de</a>"#
        );
    }

    #[test]
    fn html_line_passes_through() {
        assert_eq!(html("  <div class=\"x\">  "), "<div class=\"x\">");
    }

    #[test]
    fn degenerate_delimiters_stay_text() {
        for line in ["****", "====", "``", "[]()", "~~"] {
            assert_eq!(html(line), line);
        }
    }

    #[test]
    fn nesting_cap_falls_back_to_text() {
        let line = "**a _b_**";
        let options = Options::default();
        let mut ctx = ParseContext::new(&options);
        let tokens = find_tokens(line, &ctx);
        let node = render_token(line, &tokens, &tokens[&0], MAX_NESTING, &mut ctx);
        assert_eq!(
            node,
            Element::new("strong").with_child("a _b_").into()
        );
        assert_eq!(ctx.warnings(), &[Warning::NestingTooDeep { line: 1 }]);
    }
}
