use crate::node::{Element, Node};

/// Collects block output, gathering consecutive text lines into a paragraph.
///
/// In paragraph mode each text line is followed by a `<br/>` and the run is
/// wrapped in `<p>` when a block boundary or blank line flushes it. Outside
/// paragraph mode (card fronts and backs) text goes straight to the output,
/// optionally followed by a `<br/>`.
pub struct BlockBuilder {
    paragraph_mode: bool,
    trailing_break: bool,
    pending: Vec<Node>,
    out: Vec<Node>,
}

impl BlockBuilder {
    pub fn new(paragraph_mode: bool, trailing_break: bool) -> Self {
        Self {
            paragraph_mode,
            trailing_break,
            pending: Vec::new(),
            out: Vec::new(),
        }
    }

    pub fn push_text(&mut self, nodes: Vec<Node>) {
        if self.paragraph_mode {
            self.pending.extend(nodes);
            self.pending.push(Node::br());
        } else {
            self.out.extend(nodes);
            if self.trailing_break {
                self.out.push(Node::br());
            }
        }
    }

    pub fn push_block(&mut self, node: Node) {
        self.flush_paragraph();
        self.out.push(node);
    }

    /// A blank line ends the paragraph. It renders as a `<br/>` unless empty
    /// lines are ignored.
    pub fn blank(&mut self, ignore_empty_lines: bool) {
        self.flush_paragraph();
        if !ignore_empty_lines {
            self.out.push(Node::br());
        }
    }

    pub fn finish(mut self) -> Vec<Node> {
        self.flush_paragraph();
        self.out
    }

    fn flush_paragraph(&mut self) {
        let mut children = std::mem::take(&mut self.pending);
        if children.is_empty() {
            return;
        }
        if children.last().is_some_and(|n| n.is_tag("br")) {
            children.pop();
        }
        // A paragraph without text (e.g. only an image) is not wrapped.
        if children.iter().any(Node::contains_text) {
            self.out.push(Element::new("p").with_children(children).into());
        } else {
            self.out.extend(children);
        }
    }
}
