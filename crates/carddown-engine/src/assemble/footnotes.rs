use std::collections::HashMap;

use crate::context::{ParseContext, Warning};
use crate::error::AssembleError;
use crate::node::walk::{Walk, remove_elements, visit_elements_mut};
use crate::node::{Element, Node};
use crate::parsing::blocks::kinds::FootnoteBlock;
use crate::parsing::inline::kinds::footnote::FootnoteRef;

/// Where footnote definitions may come from.
pub struct FootnoteSources {
    /// Definitions found outside the rendered nodes, e.g. in the markdown
    /// parts when only cards are rendered. Never reported as unreferenced.
    pub extra: Vec<Element>,
    /// Warn about definitions in the rendered nodes that nothing references.
    pub report_unreferenced: bool,
}

/// Numbers every reference in document order and collects the referenced
/// definitions into one container appended at the end.
///
/// Repeated references to a key share its number. A reference without a
/// definition is an error.
pub fn resolve_footnotes(
    nodes: &mut Vec<Node>,
    sources: FootnoteSources,
    ctx: &mut ParseContext,
) -> Result<(), AssembleError> {
    let is_container = |e: &Element| e.has_class(FootnoteBlock::CONTAINER_CLASS);
    let own = definitions(remove_elements(nodes, &is_container));
    let own_keys: Vec<String> = own.iter().map(|(key, _)| key.clone()).collect();

    let mut defs: HashMap<String, Element> = HashMap::new();
    for (key, div) in own.into_iter().chain(definitions(sources.extra)) {
        defs.entry(key).or_insert(div);
    }

    let mut numbers: HashMap<String, usize> = HashMap::new();
    let mut order: Vec<String> = Vec::new();
    visit_elements_mut(nodes, &mut |e| {
        if e.tag != "a" || !e.has_class(FootnoteRef::CLASS) {
            return;
        }
        let Some(key) = e.attr("id").and_then(|id| id.strip_prefix(FootnoteRef::ID_PREFIX))
        else {
            return;
        };
        let next = numbers.len() + 1;
        let n = *numbers.entry(key.to_string()).or_insert_with(|| {
            order.push(key.to_string());
            next
        });
        e.children = vec![Node::text(format!("[{n}]"))];
    });

    let mut container = Element::new("div").with_class(FootnoteBlock::CONTAINER_CLASS);
    for (i, key) in order.iter().enumerate() {
        let Some(mut def) = defs.remove(key) else {
            return Err(AssembleError::UnresolvedFootnote { key: key.clone() });
        };
        let label_id = format!("{}{key}", FootnoteBlock::ID_PREFIX);
        let label = format!("{}.", i + 1);
        visit_elements_mut(&mut def.children, &mut |e| {
            if e.attr("id") == Some(label_id.as_str()) {
                e.children = vec![Node::text(label.clone())];
            }
        });
        container.push(def);
    }

    if sources.report_unreferenced {
        for key in own_keys {
            if defs.remove(&key).is_some() {
                ctx.warn(Warning::UnreferencedFootnote { key });
            }
        }
    }

    if !container.children.is_empty() {
        nodes.push(container.into());
    }
    Ok(())
}

/// `(key, div.footnote)` pairs of the given containers, in order.
fn definitions(containers: Vec<Element>) -> Vec<(String, Element)> {
    containers
        .into_iter()
        .flat_map(|c| c.children)
        .filter_map(|node| match node {
            Node::Element(div) if div.has_class(FootnoteBlock::FOOTNOTE_CLASS) => {
                definition_key(&div).map(|key| (key, div))
            }
            _ => None,
        })
        .collect()
}

fn definition_key(div: &Element) -> Option<String> {
    Walk::new(&div.children)
        .filter_map(Node::as_element)
        .filter_map(|e| e.attr("id"))
        .find_map(|id| id.strip_prefix(FootnoteBlock::ID_PREFIX))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Options;
    use crate::parsing::parse_markdown;
    use crate::render::html::to_html;
    use insta::assert_snapshot;
    use pretty_assertions::assert_eq;

    fn resolve(text: &str) -> (Result<Vec<Node>, AssembleError>, Vec<Warning>) {
        let options = Options::default();
        let mut ctx = ParseContext::new(&options);
        let mut nodes = parse_markdown(text, &mut ctx);
        let sources = FootnoteSources {
            extra: Vec::new(),
            report_unreferenced: true,
        };
        let result = resolve_footnotes(&mut nodes, sources, &mut ctx).map(|()| nodes);
        (result, ctx.take_warnings())
    }

    #[test]
    fn references_are_numbered_in_order() {
        let text = "First[^b] then[^a] and[^b] again.\n\n[^a]: Alpha\n[^b]: Beta";
        let (nodes, warnings) = resolve(text);
        let nodes = nodes.expect("resolves");
        assert!(warnings.is_empty());
        assert_snapshot!(to_html(&nodes, 2), @r##"
        <p>First<sup><a href="#footnote-b" class="footnote-ref" id="ref-b">[1]</a></sup> then<sup><a href="#footnote-a" class="footnote-ref" id="ref-a">[2]</a></sup> and<sup><a href="#footnote-b" class="footnote-ref" id="ref-b">[1]</a></sup> again.</p>
        <div class="footnotes-div">
          <div class="footnote">
            <p class="footnote-paragraph"><span id="footnote-b">1.</span> Beta<a href="#ref-b"> &#8617;</a></p>
          </div>
          <div class="footnote">
            <p class="footnote-paragraph"><span id="footnote-a">2.</span> Alpha<a href="#ref-a"> &#8617;</a></p>
          </div>
        </div>
        "##);
    }

    #[test]
    fn missing_definition_is_an_error() {
        let (result, _) = resolve("See[^nope].");
        assert_eq!(
            result.map(|_| ()),
            Err(AssembleError::UnresolvedFootnote { key: "nope".into() })
        );
    }

    #[test]
    fn unreferenced_definition_is_dropped_with_a_warning() {
        let (nodes, warnings) = resolve("Text\n\n[^lost]: nobody links here");
        let nodes = nodes.expect("resolves");
        assert_eq!(nodes.len(), 1);
        assert_eq!(warnings, vec![Warning::UnreferencedFootnote { key: "lost".into() }]);
    }

    #[test]
    fn extra_definitions_resolve_quietly() {
        let options = Options::default();
        let mut ctx = ParseContext::new(&options);
        let mut outside = parse_markdown("[^x]: from elsewhere\n[^y]: unused", &mut ctx);
        let extra = remove_elements(&mut outside, &|e| e.has_class(FootnoteBlock::CONTAINER_CLASS));
        let mut nodes = parse_markdown("Ref[^x]", &mut ctx);
        let sources = FootnoteSources {
            extra,
            report_unreferenced: true,
        };
        resolve_footnotes(&mut nodes, sources, &mut ctx).expect("resolves");
        assert_eq!(nodes.len(), 2);
        assert!(nodes[1].inner_text().contains("from elsewhere"));
        assert!(ctx.warnings().is_empty());
    }
}
