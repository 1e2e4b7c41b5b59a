use std::sync::OnceLock;

use regex::Regex;

use crate::cards::kind::{BackContent, CardInfo, CardKind};
use crate::context::ParseContext;
use crate::error::CardSyntaxError;
use crate::node::{Element, Node};
use crate::parsing::{parse_blocks, tokenize};

/// A card whose back contains the expected answer in braces, e.g.
/// `The capital is {Paris}.`
///
/// The reader types an answer into a text field and the page compares it
/// with the braced span. Without a braced span the whole back is the answer.
pub struct AnswerCard;

impl AnswerCard {
    pub const MARKER: &'static str = "{ANSWER}";
    pub const INPUT_CLASS: &'static str = "answer-input";
    pub const SPAN_CLASS: &'static str = "answer-span";
    pub const CONTENT_CLASS: &'static str = "answer-content";

    fn answer_regex() -> &'static Regex {
        static RE: OnceLock<Regex> = OnceLock::new();
        RE.get_or_init(|| Regex::new(r"\{(\S.*)\}").expect("Invalid answer regex"))
    }
}

/// Text around the answer span. A side that meets the span on a line break
/// is laid out as paragraphs, otherwise it flows inline with the span.
fn around(text: &str, paragraph: bool, ctx: &mut ParseContext) -> Vec<Node> {
    let lines: Vec<&str> = text.lines().collect();
    if paragraph {
        return parse_blocks(&lines, true, false, ctx);
    }
    let mut out = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            out.push(Node::br());
        }
        out.extend(tokenize(line, ctx));
    }
    out
}

impl CardKind for AnswerCard {
    fn name(&self) -> &'static str {
        "AnswerCard"
    }

    fn marker(&self) -> &'static str {
        Self::MARKER
    }

    fn render_back(
        &self,
        back: &str,
        card: CardInfo,
        ctx: &mut ParseContext,
    ) -> Result<BackContent, CardSyntaxError> {
        let (answer, pre, post) = match Self::answer_regex().captures(back) {
            Some(caps) => {
                let span = caps.get(0).map_or(0..0, |m| m.range());
                (
                    caps[1].to_string(),
                    &back[..span.start],
                    &back[span.end..],
                )
            }
            None => (back.trim().to_string(), "", ""),
        };

        let pre = around(pre, pre.ends_with('\n'), ctx);
        let post = around(post, post.starts_with('\n'), ctx);
        let id = card.id;
        let answer_span = Element::new("span")
            .with_attr("name", format!("answer{id}"))
            .with_class(Self::SPAN_CLASS)
            .with_child(html_escape::encode_text(&answer).into_owned());

        if !ctx.options.collapse {
            let div = Element::new("div")
                .with_children(pre)
                .with_child(answer_span)
                .with_children(post);
            return Ok(BackContent::revealed(vec![div.into()]));
        }

        let input = Element::new("input")
            .with_attr("type", "text")
            .with_class(Self::INPUT_CLASS)
            .with_attr("name", format!("answer_field{id}"))
            .with_attr("autocomplete", "off");
        let button = Element::new("input")
            .with_attr("value", ctx.options.labels.check_answer.as_str())
            .with_attr("type", "submit")
            .with_class("answer-btn card-btn")
            .with_id(format!("answer_btn{id}"))
            .with_attr("onclick", "answerOnClick(this)");
        let form = Element::new("form")
            .with_child(input.self_closing())
            .with_child(Node::br())
            .with_child(button.self_closing())
            .with_attr("action", "javascript:void(0);");
        let content = Element::new("div")
            .with_class(Self::CONTENT_CLASS)
            .with_attr("name", format!("answer_content{id}"))
            .with_child(
                Element::new("p")
                    .with_children(pre)
                    .with_child(answer_span)
                    .with_children(post),
            );
        Ok(BackContent::revealed(vec![form.into(), content.into()]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Options;
    use crate::render::html::to_html;
    use insta::assert_snapshot;
    use pretty_assertions::assert_eq;

    const CARD: CardInfo = CardInfo { id: 3, line: 1 };

    fn render(back: &str, options: &Options) -> BackContent {
        let mut ctx = ParseContext::new(options);
        AnswerCard.render_back(back, CARD, &mut ctx).expect("renders")
    }

    #[test]
    fn braced_span_becomes_the_answer() {
        let back = render("The capital is {Paris}.", &Options::default());
        assert!(!back.collapse);
        assert_snapshot!(to_html(&back.nodes, 2), @r#"
        <form action="javascript:void(0);">
          <input type="text" class="answer-input" name="answer_field3" autocomplete="off"/>
          <br/>
          <input value="Check Answer" type="submit" class="answer-btn card-btn" id="answer_btn3" onclick="answerOnClick(this)"/>
        </form>
        <div class="answer-content" name="answer_content3">
          <p>The capital is <span name="answer3" class="answer-span">Paris</span>.</p>
        </div>
        "#);
    }

    #[test]
    fn without_braces_the_whole_back_is_the_answer() {
        let options = Options {
            collapse: false,
            ..Options::default()
        };
        let back = render("\n  just this  \n", &options);
        assert_eq!(
            back.nodes,
            vec![
                Element::new("div")
                    .with_child(
                        Element::new("span")
                            .with_attr("name", "answer3")
                            .with_class("answer-span")
                            .with_child("just this")
                    )
                    .into()
            ]
        );
    }

    #[test]
    fn text_on_its_own_line_becomes_a_paragraph() {
        let options = Options {
            collapse: false,
            ..Options::default()
        };
        let back = render("Intro line\n{42}\nafter", &options);
        let div = back.nodes[0].as_element().expect("div");
        assert!(div.children[0].is_tag("p"));
        assert!(div.children[1].is_tag("span"));
        assert!(div.children[2].is_tag("p"));
    }
}
