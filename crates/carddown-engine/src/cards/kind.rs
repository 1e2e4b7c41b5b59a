use crate::context::ParseContext;
use crate::error::CardSyntaxError;
use crate::node::Node;
use crate::parsing::parse_markdown;

/// Splits `{BACK}` cards and marks where the front ends.
pub const BACK_MARKER: &str = "{BACK}";

/// Ends a card region. The line itself belongs to neither side.
pub const END_MARKER: &str = "{END}";

/// Rendered back of a card.
#[derive(Debug, Clone, PartialEq)]
pub struct BackContent {
    pub nodes: Vec<Node>,
    /// Wrap the back in the "show backside" toggle. Kinds with their own
    /// reveal flow turn this off.
    pub collapse: bool,
}

impl BackContent {
    pub fn collapsible(nodes: Vec<Node>) -> Self {
        Self {
            nodes,
            collapse: true,
        }
    }

    pub fn revealed(nodes: Vec<Node>) -> Self {
        Self {
            nodes,
            collapse: false,
        }
    }
}

/// Identity of the card being rendered, for ids and error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardInfo {
    pub id: u32,
    /// 1-based document line of the card's first line.
    pub line: usize,
}

/// One kind of learning card.
///
/// A kind is recognised by its marker on a `# ` heading line, decides where
/// the front ends and the back begins, and renders the back.
pub trait CardKind: Send + Sync {
    /// Shown as a class on the card and as `type` in exports.
    fn name(&self) -> &'static str;

    /// Token on the first line, e.g. `{CARD}`.
    fn marker(&self) -> &'static str;

    fn matches(&self, line: &str) -> bool {
        line.starts_with("# ") && line.contains(self.marker())
    }

    /// Front and back of a region. The back is always a suffix of `region`.
    ///
    /// Splits at the first `{BACK}`; without one, the first line is the front
    /// and the rest is the back.
    fn split<'t>(&self, region: &'t str) -> (&'t str, &'t str) {
        if let Some(at) = region.find(BACK_MARKER) {
            return (&region[..at], &region[at + BACK_MARKER.len()..]);
        }
        match region.find('\n') {
            Some(nl) => (&region[..nl], &region[nl + 1..]),
            None => (region, ""),
        }
    }

    /// Removes the markers that must not show up in the rendered card.
    fn strip_markers(&self, side: &str) -> String {
        side.replace(BACK_MARKER, "").replace(self.marker(), "")
    }

    fn render_back(
        &self,
        back: &str,
        _card: CardInfo,
        ctx: &mut ParseContext,
    ) -> Result<BackContent, CardSyntaxError> {
        Ok(BackContent::collapsible(parse_markdown(back, ctx)))
    }
}
