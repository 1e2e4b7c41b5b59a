//! Single-line blocks without content.

use crate::node::{Element, Node};

/// `{PAGEBREAK}` on a line of its own.
pub struct PageBreak;

impl PageBreak {
    pub const MARKER: &'static str = "{PAGEBREAK}";

    pub fn matches(line: &str) -> bool {
        line.trim() == Self::MARKER
    }

    pub fn node() -> Node {
        Element::new("div").with_class("page-break").into()
    }
}

/// Three or more of the same `-`, `*` or `_`, spaces allowed in between.
pub struct HorizontalRule;

impl HorizontalRule {
    pub const CHARS: [char; 3] = ['-', '*', '_'];
    pub const MIN_LEN: usize = 3;

    pub fn matches(line: &str) -> bool {
        let mut chars = line.chars().filter(|c| !c.is_whitespace());
        let Some(first) = chars.next() else {
            return false;
        };
        if !Self::CHARS.contains(&first) {
            return false;
        }
        let mut count = 1;
        for c in chars {
            if c != first {
                return false;
            }
            count += 1;
        }
        count >= Self::MIN_LEN
    }

    pub fn node() -> Node {
        Element::new("hr").self_closing()
    }
}
