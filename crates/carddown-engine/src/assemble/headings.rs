use crate::hash::{IdRegistry, clean, short_hash};
use crate::node::Node;

/// A heading seen while assigning ids, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingEntry {
    pub level: u8,
    pub id: String,
    pub text: String,
    pub in_card: bool,
    pub in_back: bool,
}

/// Gives every heading its anchor id, `h-` plus the short hash of its key.
///
/// The key is the explicit `{#key}` tag if the heading had one, its text
/// otherwise. Repeated keys get a counter suffix. The counter starts fresh
/// on every call, so the same document always gets the same ids.
pub fn assign_heading_ids(nodes: &mut [Node]) -> Vec<HeadingEntry> {
    let mut ids = IdRegistry::new();
    let mut entries = Vec::new();
    for node in nodes {
        visit(node, false, false, &mut ids, &mut entries);
    }
    entries
}

fn visit(
    node: &mut Node,
    in_card: bool,
    in_back: bool,
    ids: &mut IdRegistry,
    entries: &mut Vec<HeadingEntry>,
) {
    let Some(e) = node.as_element_mut() else {
        return;
    };
    if let Some(level) = e.heading_level() {
        let text = e.inner_text();
        let key = e.attr("id").map_or_else(|| text.clone(), str::to_string);
        let id = format!("h-{}", ids.disambiguate(short_hash(&clean(&key))));
        e.set_attr("id", &id);
        entries.push(HeadingEntry {
            level,
            id,
            text,
            in_card,
            in_back,
        });
        return;
    }
    let in_card = in_card || e.has_class("card");
    let in_back = in_back || e.has_class("back");
    for child in &mut e.children {
        visit(child, in_card, in_back, ids, entries);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::anchor_id;
    use crate::node::Element;
    use pretty_assertions::assert_eq;

    fn heading(level: u8, text: &str) -> Node {
        Element::new(format!("h{level}")).with_child(text).into()
    }

    #[test]
    fn repeated_text_is_disambiguated() {
        let mut nodes = vec![heading(1, "Intro"), heading(2, "Intro")];
        let entries = assign_heading_ids(&mut nodes);
        let base = anchor_id("Intro");
        assert_eq!(entries[0].id, base);
        assert_eq!(entries[1].id, format!("{base}1"));
    }

    #[test]
    fn ids_are_deterministic_across_runs() {
        let doc = || vec![heading(1, "Same"), heading(1, "Same"), heading(2, "Other")];
        let (mut a, mut b) = (doc(), doc());
        assert_eq!(assign_heading_ids(&mut a), assign_heading_ids(&mut b));
        assert_eq!(a, b);
    }

    #[test]
    fn explicit_key_matches_fragment_links() {
        let mut nodes = vec![
            Element::new("h2")
                .with_id("intro-text")
                .with_child("Anything")
                .into(),
        ];
        let entries = assign_heading_ids(&mut nodes);
        assert_eq!(entries[0].id, anchor_id("Intro Text"));
        assert_eq!(entries[0].text, "Anything");
    }

    #[test]
    fn card_and_back_are_tracked() {
        let card = Element::new("div")
            .with_class("card QuestionCard")
            .with_child(Element::new("div").with_class("front QuestionCard").with_child(heading(1, "Q")))
            .with_child(Element::new("div").with_class("back QuestionCard").with_child(heading(2, "A")));
        let mut nodes = vec![heading(1, "Doc"), card.into()];
        let entries = assign_heading_ids(&mut nodes);
        let flags: Vec<(bool, bool)> = entries.iter().map(|e| (e.in_card, e.in_back)).collect();
        assert_eq!(flags, vec![(false, false), (true, false), (true, true)]);
    }
}
