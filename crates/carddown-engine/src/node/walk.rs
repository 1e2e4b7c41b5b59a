use super::{Element, Node};

/// Pre-order traversal over a forest of nodes.
pub struct Walk<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Walk<'a> {
    pub fn new(roots: &'a [Node]) -> Self {
        Self {
            stack: roots.iter().rev().collect(),
        }
    }
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        if let Some(e) = node.as_element() {
            self.stack.extend(e.children.iter().rev());
        }
        Some(node)
    }
}

/// Calls `f` on every element in pre-order (parents before their children).
pub fn visit_elements_mut(nodes: &mut [Node], f: &mut impl FnMut(&mut Element)) {
    for node in nodes {
        if let Some(e) = node.as_element_mut() {
            f(e);
            visit_elements_mut(&mut e.children, f);
        }
    }
}

/// Detaches every element matching `pred` from the forest and returns them in
/// document order. Matching elements are not searched further.
pub fn remove_elements(nodes: &mut Vec<Node>, pred: &impl Fn(&Element) -> bool) -> Vec<Element> {
    let mut removed = Vec::new();
    remove_into(nodes, pred, &mut removed);
    removed
}

fn remove_into(nodes: &mut Vec<Node>, pred: &impl Fn(&Element) -> bool, out: &mut Vec<Element>) {
    let old = std::mem::take(nodes);
    for mut node in old {
        match node {
            Node::Element(e) | Node::SelfClosing(e) if pred(&e) => out.push(e),
            _ => {
                if let Some(e) = node.as_element_mut() {
                    remove_into(&mut e.children, pred, out);
                }
                nodes.push(node);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Vec<Node> {
        vec![
            Element::new("div")
                .with_child(Element::new("span").with_child("a"))
                .with_child(Element::new("aside").with_child("x"))
                .into(),
            Element::new("aside").with_child("y").into(),
            Node::text("b"),
        ]
    }

    #[test]
    fn walk_is_preorder() {
        let nodes = sample();
        let tags: Vec<_> = Walk::new(&nodes)
            .map(|n| n.tag().unwrap_or("#text").to_string())
            .collect();
        assert_eq!(
            tags,
            vec!["div", "span", "#text", "aside", "#text", "aside", "#text", "#text"]
        );
    }

    #[test]
    fn remove_elements_detaches_in_document_order() {
        let mut nodes = sample();
        let removed = remove_elements(&mut nodes, &|e| e.tag == "aside");
        let texts: Vec<_> = removed.iter().map(|e| e.inner_text()).collect();
        assert_eq!(texts, vec!["x", "y"]);
        assert_eq!(nodes.len(), 2);
        assert_eq!(Walk::new(&nodes).filter(|n| n.is_tag("aside")).count(), 0);
    }

    #[test]
    fn visit_reaches_nested_elements() {
        let mut nodes = sample();
        let mut count = 0;
        visit_elements_mut(&mut nodes, &mut |e| {
            count += 1;
            e.set_attr("data-seen", "1");
        });
        assert_eq!(count, 4);
        assert_eq!(nodes[0].as_element().and_then(|e| e.attr("data-seen")), Some("1"));
    }
}
