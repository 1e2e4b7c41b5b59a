use std::iter::Peekable;

use super::headings::HeadingEntry;
use crate::context::{ParseContext, Warning};
use crate::node::{Element, Node};
use crate::options::Options;

type TocItem = (u8, Element);

/// The headings that go into the table of contents, each with its nesting
/// level.
///
/// Card headings nest under the last document heading before them and a
/// card's top heading is prefixed with the localized "Card" label.
fn toc_items(headings: &[HeadingEntry], include_cards: bool, options: &Options) -> Vec<TocItem> {
    let mut items = Vec::new();
    let mut last_doc_level = 0;
    for h in headings {
        if h.level > options.toc_max_heading {
            continue;
        }
        let in_card = h.in_card || h.in_back;
        if in_card && !include_cards {
            continue;
        }
        if h.text.trim().is_empty()
            || (h.in_back && !options.toc_show_back_headings_cards)
            || (in_card && h.level > options.toc_max_heading_cards)
        {
            continue;
        }

        let mut level = h.level;
        let mut text = h.text.clone();
        if in_card {
            if level == 1 {
                text = format!("{}: {text}", options.labels.card);
            }
            level += last_doc_level;
        } else {
            last_doc_level = level;
        }
        let link = Element::new("a")
            .with_attr("href", format!("#{}", h.id))
            .with_class("toc-link")
            .with_child(text);
        items.push((level, Element::new("li").with_child(link)));
    }
    items
}

/// Items at `level`. A deeper item opens a nested list inside the previous
/// item; a shallower one ends the list.
fn nest<I: Iterator<Item = TocItem>>(items: &mut Peekable<I>, level: u8) -> Element {
    let mut list = Element::new("ul").with_class("toc-ul");
    while let Some(&(next, _)) = items.peek() {
        if next > level {
            let sublist = nest(items, next);
            match list.children.last_mut().and_then(Node::as_element_mut) {
                Some(item) => item.push(sublist),
                None => list.push(sublist),
            }
        } else if next == level {
            if let Some((_, item)) = items.next() {
                list.push(item);
            }
        } else {
            break;
        }
    }
    list
}

/// The table of contents, or `None` if no heading qualifies.
///
/// Entries with a level outside 1-6 make the whole table malformed: it is
/// left out with a warning.
pub fn table_of_contents(
    headings: &[HeadingEntry],
    include_cards: bool,
    ctx: &mut ParseContext,
) -> Option<Node> {
    if headings.iter().any(|h| !(1..=6).contains(&h.level)) {
        ctx.warn(Warning::MalformedToc);
        return None;
    }
    let options = ctx.options;
    let mut items = toc_items(headings, include_cards, options)
        .into_iter()
        .peekable();
    let mut lists = Vec::new();
    while let Some(&(level, _)) = items.peek() {
        lists.push(Node::from(nest(&mut items, level)));
    }
    if lists.is_empty() {
        return None;
    }

    let toggle = Element::new("button")
        .with_id("toc-btn")
        .with_child(Element::new("i").with_class("fa-solid fa-chevron-up"));
    let title = Element::new("h1")
        .with_child(options.labels.toc.as_str())
        .with_child(toggle);
    let toc = Element::new("div")
        .with_class("toc")
        .with_child(Element::new("span").with_child(title))
        .with_child(Element::new("div").with_class("toc-content").with_children(lists));
    Some(toc.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::html::to_html;
    use insta::assert_snapshot;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn entry(level: u8, text: &str, in_card: bool, in_back: bool) -> HeadingEntry {
        HeadingEntry {
            level,
            id: format!("h-{}", text.to_lowercase()),
            text: text.to_string(),
            in_card,
            in_back,
        }
    }

    fn levels(headings: &[HeadingEntry], options: &Options) -> Vec<(u8, String)> {
        toc_items(headings, options.toc_include_cards, options)
            .into_iter()
            .map(|(level, li)| (level, li.inner_text()))
            .collect()
    }

    #[test]
    fn card_headings_nest_under_the_document() {
        let options = Options::default();
        let headings = [
            entry(1, "Doc", false, false),
            entry(2, "Section", false, false),
            entry(1, "Question", true, false),
            entry(2, "Detail", true, false),
            entry(1, "Answer", true, true),
            entry(4, "Deep", false, false),
            entry(2, "", false, false),
        ];
        assert_eq!(
            levels(&headings, &options),
            vec![
                (1, "Doc".to_string()),
                (2, "Section".to_string()),
                (3, "Card: Question".to_string()),
            ]
        );
    }

    #[test]
    fn card_headings_can_be_left_out() {
        let options = Options {
            toc_include_cards: false,
            ..Options::default()
        };
        let headings = [entry(1, "Doc", false, false), entry(1, "Q", true, false)];
        assert_eq!(levels(&headings, &options).len(), 1);
    }

    #[test]
    fn nested_list_markup() {
        let options = Options::default();
        let mut ctx = ParseContext::new(&options);
        let headings = [
            entry(2, "Early", false, false),
            entry(1, "Top", false, false),
            entry(2, "Sub", false, false),
        ];
        let toc = table_of_contents(&headings, true, &mut ctx).expect("toc");
        assert_snapshot!(to_html(&[toc], 2), @r##"
        <div class="toc">
          <span><h1>Contents<button id="toc-btn"><i class="fa-solid fa-chevron-up"></i></button></h1></span>
          <div class="toc-content">
            <ul class="toc-ul">
              <li><a href="#h-early" class="toc-link">Early</a></li>
            </ul>
            <ul class="toc-ul">
              <li><a href="#h-top" class="toc-link">Top</a><ul class="toc-ul">
                <li><a href="#h-sub" class="toc-link">Sub</a></li>
              </ul></li>
            </ul>
          </div>
        </div>
        "##);
    }

    #[rstest]
    #[case(0)]
    #[case(7)]
    fn out_of_range_level_omits_the_toc(#[case] level: u8) {
        let options = Options::default();
        let mut ctx = ParseContext::new(&options);
        let headings = [entry(1, "Doc", false, false), entry(level, "Odd", false, false)];
        assert_eq!(table_of_contents(&headings, true, &mut ctx), None);
        assert_eq!(ctx.warnings(), &[Warning::MalformedToc]);
    }

    #[test]
    fn no_headings_no_toc() {
        let options = Options::default();
        let mut ctx = ParseContext::new(&options);
        assert_eq!(table_of_contents(&[], true, &mut ctx), None);
    }
}
