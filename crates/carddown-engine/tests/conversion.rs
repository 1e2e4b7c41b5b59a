use carddown_engine::parsing::blocks::parse_list;
use carddown_engine::parsing::inline::TokenKind;
use carddown_engine::parsing::span::Span;
use carddown_engine::{
    CardSyntaxError, Converter, Element, LatexError, LatexRenderer, Node, Options, ParseContext,
    Warning, convert, find_tokens, parse_markdown, to_html, tokenize,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn fixture(name: &str) -> String {
    let path = format!("{}/tests/fixtures/{name}.md", env!("CARGO_MANIFEST_DIR"));
    std::fs::read_to_string(path).expect("fixture exists")
}

fn without_toc() -> Options {
    Options {
        table_of_contents: false,
        ..Options::default()
    }
}

#[test]
fn list_with_malformed_third_line() {
    let options = Options::default();
    let mut ctx = ParseContext::new(&options);
    let (node, next) = parse_list(&["- a", "- b", "-c"], 0, &mut ctx).expect("parses");
    let ul = node.as_element().expect("element");
    assert_eq!(ul.tag, "ul");
    assert_eq!(ul.children.len(), 2);
    assert_eq!(next, 2);
}

#[test]
fn link_without_scheme_spans_the_line() {
    let options = Options::default();
    let mut ctx = ParseContext::new(&options);
    let line = "[Link](google.de)";
    let tokens = find_tokens(line, &ctx);
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[&0].kind, TokenKind::Link);
    assert_eq!(tokens[&0].span, Span::new(0, line.len()));

    let nodes = tokenize(line, &mut ctx);
    let a = nodes[0].as_element().expect("anchor");
    assert_eq!(a.attr("href"), Some("http://google.de"));
}

#[test]
fn bare_url_is_one_autolink() {
    let options = Options::default();
    let ctx = ParseContext::new(&options);
    let tokens = find_tokens("test string https://www.google.de test string", &ctx);
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[&12].kind, TokenKind::AutoLink);
}

#[rstest]
#[case("****")]
#[case("**")]
#[case("[]()")]
#[case("``")]
#[case("====")]
#[case("==")]
fn degenerate_delimiters_are_plain_text(#[case] line: &str) {
    let options = Options::default();
    let ctx = ParseContext::new(&options);
    assert!(find_tokens(line, &ctx).is_empty());
}

#[rstest]
#[case("\u{a0}> quoted")]
#[case("\u{2003}>> quoted")]
#[case("\u{a0}\t> quoted")]
fn non_ascii_indent_before_quote_marker_is_a_paragraph(#[case] line: &str) {
    let options = Options::default();
    let mut ctx = ParseContext::new(&options);
    let nodes = parse_markdown(line, &mut ctx);
    assert_eq!(nodes.len(), 1);
    let p = nodes[0].as_element().expect("paragraph");
    assert_eq!(p.tag, "p");
    assert!(p.inner_text().contains("quoted"));
}

#[test]
fn indented_quote_still_parses() {
    let options = Options::default();
    let mut ctx = ParseContext::new(&options);
    let nodes = parse_markdown("  > quoted\n\t>> deeper", &mut ctx);
    let quote = nodes[0].as_element().expect("blockquote");
    assert_eq!(quote.tag, "blockquote");
    assert!(quote.inner_text().contains("deeper"));
}

#[test]
fn fence_with_trailing_text_does_not_swallow_the_document() {
    let text = "```x``` is code\n\n# Heading\n\nPara\n";
    let rendered = convert(text, &without_toc()).expect("converts");
    let html = to_html(&rendered.nodes, 2);
    assert!(!html.contains("lang-x"));
    assert!(html.contains(">Heading</h1>"));
    assert!(html.contains("<p>Para</p>"));
    assert!(rendered.warnings.is_empty(), "{:?}", rendered.warnings);
}

#[test]
fn emphasis_content_is_tokenized_again() {
    let options = Options::default();
    let mut ctx = ParseContext::new(&options);
    let nodes = tokenize("_Here_ is some _**Example**_ text", &mut ctx);
    assert_eq!(
        nodes,
        vec![
            Element::new("em").with_child("Here").into(),
            Node::text(" is some "),
            Element::new("em")
                .with_child(Element::new("strong").with_child("Example"))
                .into(),
            Node::text(" text"),
        ]
    );
}

#[test]
fn end_tag_is_not_part_of_the_card() {
    let options = without_toc();
    let text = "# Q {CARD}\n{BACK}\nanswer\n{END}\nafter the card";
    let parsed = Converter::new(&options).parse(text).expect("parses");
    let card = parsed.cards().iter().next().expect("one card");
    assert_eq!(card.back, "answer");
    let rendered = parsed.into_document().expect("assembles");
    let html = to_html(&rendered.nodes, 2);
    assert!(!html.contains("{END}"));
    assert!(html.ends_with("<p>after the card</p>"));
}

#[test]
fn empty_back_names_the_card_line() {
    let options = Options::default();
    let text = "intro\n\n# First {CARD}\nback\n{END}\n# Second {CARD}\n{BACK}\n   \n";
    let result = Converter::new(&options).parse(text);
    assert!(matches!(result, Err(CardSyntaxError::EmptyBackside { line: 6 })));
}

#[test]
fn multiple_choice_without_choices_fails() {
    let options = Options::default();
    let text = "# Pick one {MULTI}\n{BACK}\nThere is nothing to pick.";
    let result = Converter::new(&options).parse(text);
    assert!(matches!(result, Err(CardSyntaxError::NoChoices { line: 1 })));
}

#[test]
fn broken_table_degrades_and_warns() {
    let text = "| a | b |\n|---|---|\n| 1 | 2 | 3 |\nnext";
    let rendered = convert(text, &without_toc()).expect("converts");
    assert!(matches!(
        rendered.warnings.first(),
        Some(Warning::BlockFallback { construct: "table", line: 1, .. })
    ));
    assert!(to_html(&rendered.nodes, 2).contains("|&nbsp;a&nbsp;|&nbsp;b&nbsp;|"));
}

#[test]
fn repeated_headings_get_distinct_stable_ids() {
    let text = "# Intro\n\ntext\n\n# Intro";
    let ids = || {
        let rendered = convert(text, &without_toc()).expect("converts");
        rendered
            .nodes
            .iter()
            .filter_map(Node::as_element)
            .filter(|e| e.is_heading())
            .filter_map(|e| e.attr("id").map(str::to_string))
            .collect::<Vec<_>>()
    };
    let first = ids();
    assert_eq!(first.len(), 2);
    assert_eq!(first[1], format!("{}1", first[0]));
    assert_eq!(first, ids());
}

#[test]
fn footnote_round_trip() {
    let text = "A claim[^x].\n\n[^x]: The source.";
    let rendered = convert(text, &without_toc()).expect("converts");
    let html = to_html(&rendered.nodes, 2);
    assert!(html.contains(r##"<a href="#footnote-x" class="footnote-ref" id="ref-x">[1]</a>"##));
    assert!(html.contains(r#"<span id="footnote-x">1.</span> The source."#));
    assert!(html.contains(r##"<a href="#ref-x"> &#8617;</a>"##));
}

#[test]
fn fixture_document() {
    let options = Options::default();
    let rendered = convert(&fixture("biology"), &options).expect("converts");
    assert!(rendered.warnings.is_empty(), "{:?}", rendered.warnings);

    let kinds: Vec<&str> = rendered.cards.iter().map(|c| c.kind).collect();
    assert_eq!(kinds, vec!["QuestionCard", "AnswerCard", "MultipleChoiceCard"]);

    let first = rendered.nodes.first().and_then(Node::as_element).expect("toc");
    assert!(first.has_class("toc"));
    assert!(first.inner_text().contains("Card: What is the powerhouse of the cell?"));

    let last = rendered.nodes.last().and_then(Node::as_element).expect("footnotes");
    assert!(last.has_class("footnotes-div"));
    assert!(last.inner_text().starts_with("1. Robert Hooke, 1665."));

    let html = to_html(&rendered.nodes, 2);
    assert!(html.contains(r#"<div class="card AnswerCard" id="1">"#));
    assert!(html.contains(r#"value="incorrect""#));
}

#[test]
fn fixture_cards_only_shuffled() {
    let options = Options::default();
    let mut parsed = Converter::new(&options)
        .parse(&fixture("biology"))
        .expect("parses");
    parsed.cards_mut().shuffle();
    let rendered = parsed.into_cards_only().expect("assembles");
    assert!(rendered.warnings.is_empty(), "{:?}", rendered.warnings);
    // Table of contents plus three cards; the document footnote is unreferenced.
    assert_eq!(rendered.nodes.len(), 4);

    let records = rendered.cards.records(false);
    let answer = records
        .iter()
        .find(|r| r.kind == "AnswerCard")
        .expect("answer card");
    assert_eq!(answer.back, "It is the nucleus.");
}

struct Svg;

impl LatexRenderer for Svg {
    fn render_svg(&self, source: &str, _display: bool) -> Result<String, LatexError> {
        Ok(format!("<svg>{source}</svg>"))
    }
}

#[test]
fn latex_goes_through_the_renderer_when_enabled() {
    let options = Options {
        prerender_latex: true,
        ..without_toc()
    };
    let parsed = Converter::new(&options)
        .with_latex(&Svg)
        .parse("Energy $E=mc^2$ here")
        .expect("parses");
    let rendered = parsed.into_document().expect("assembles");
    let html = to_html(&rendered.nodes, 2);
    assert!(html.contains(r#"<span class="latex inline-latex"><svg>E=mc^2</svg></span>"#));
}
