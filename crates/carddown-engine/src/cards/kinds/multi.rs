use crate::cards::kind::{BackContent, CardInfo, CardKind};
use crate::context::ParseContext;
use crate::error::CardSyntaxError;
use crate::node::{Element, Node};
use crate::parsing::{parse_blocks, tokenize};

/// Multiple choice: the back lists options as `- [x] right` / `- [ ] wrong`.
///
/// Text before the options is the question body; text after them is shown
/// once the reader checks their choice.
pub struct MultipleChoiceCard;

impl MultipleChoiceCard {
    pub const MARKER: &'static str = "{MULTI}";
    pub const CORRECT: &'static str = "- [x] ";
    pub const INCORRECT: &'static str = "- [ ] ";

    /// `(correct, label text)` for a choice line.
    pub fn choice(line: &str) -> Option<(bool, &str)> {
        if let Some(text) = line.strip_prefix(Self::CORRECT) {
            Some((true, text))
        } else {
            line.strip_prefix(Self::INCORRECT).map(|text| (false, text))
        }
    }
}

/// The contiguous run of choices starting at `start`, blank lines allowed.
/// Returns the choices and the index of the first line after them.
fn collect_choices<'l>(lines: &[&'l str], start: usize) -> (Vec<(bool, &'l str)>, usize) {
    let mut choices = Vec::new();
    let mut i = start;
    while i < lines.len() {
        let line = lines[i];
        if line.trim().is_empty() {
            i += 1;
            continue;
        }
        match MultipleChoiceCard::choice(line) {
            Some(choice) => choices.push(choice),
            None => break,
        }
        i += 1;
    }
    (choices, i)
}

fn choice_form(
    choices: &[(bool, &str)],
    rest: &[&str],
    card: CardInfo,
    ctx: &mut ParseContext,
) -> Element {
    let mut form = Element::new("form")
        .with_class("multi")
        .with_attr("name", format!("multiform{}", card.id))
        .with_attr("action", "javascript:void(0)");

    for &(correct, text) in choices {
        let text = text.trim();
        let id = format!("choice_{}", ctx.ids.unique_hash(text));
        let checkbox = Element::new("input")
            .with_class("choice")
            .with_attr("type", "checkbox")
            .with_id(&id)
            .with_attr("value", if correct { "correct" } else { "incorrect" })
            .with_attr("autocomplete", "off");
        let label = Element::new("label")
            .with_attr("name", "label")
            .with_attr("for", id)
            .with_children(tokenize(text, ctx));
        form.push(checkbox.self_closing());
        form.push(label);
    }

    let submit = Element::new("input")
        .with_attr("value", ctx.options.labels.check_answer.as_str())
        .with_id(format!("multi_btn{}", card.id))
        .with_attr("type", "submit")
        .with_class("multi-btn card-btn")
        .with_attr("onclick", "multiOnClick(this)");
    form.push(Node::br());
    form.push(submit.self_closing());
    form.push(
        Element::new("div")
            .with_class("multicontent")
            .with_children(parse_blocks(rest, true, true, ctx)),
    );
    form
}

impl CardKind for MultipleChoiceCard {
    fn name(&self) -> &'static str {
        "MultipleChoiceCard"
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
        let lines: Vec<&str> = back.lines().collect();
        let Some(first) = lines.iter().position(|l| Self::choice(l).is_some()) else {
            return Err(CardSyntaxError::NoChoices { line: card.line });
        };

        if !ctx.options.collapse {
            let div = Element::new("div").with_children(parse_blocks(&lines, true, true, ctx));
            return Ok(BackContent::revealed(vec![div.into()]));
        }

        let (choices, end) = collect_choices(&lines, first);
        let mut nodes = parse_blocks(&lines[..first], true, true, ctx);
        nodes.push(choice_form(&choices, &lines[end..], card, ctx).into());
        Ok(BackContent::revealed(nodes))
    }
}
