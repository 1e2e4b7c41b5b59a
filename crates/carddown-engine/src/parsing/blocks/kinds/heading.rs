use std::sync::OnceLock;

use regex::Regex;

use crate::context::ParseContext;
use crate::node::{Element, Node};
use crate::parsing::inline::tokenize;

/// `#` to `######` followed by a space. A `{#key}` tag sets the anchor key.
pub struct Heading;

impl Heading {
    pub const MARKER: char = '#';
    pub const MAX_LEVEL: usize = 6;

    fn id_tag() -> &'static Regex {
        static RE: OnceLock<Regex> = OnceLock::new();
        RE.get_or_init(|| Regex::new(r"\{#(\S+?)\}").expect("Invalid heading id regex"))
    }

    pub fn matches(line: &str) -> bool {
        Self::level(line).is_some()
    }

    fn level(line: &str) -> Option<usize> {
        let hashes = line.len() - line.trim_start_matches(Self::MARKER).len();
        let level_ok = (1..=Self::MAX_LEVEL).contains(&hashes);
        (level_ok && line[hashes..].starts_with(' ')).then_some(hashes)
    }

    /// The explicit key is kept as the `id` attribute until heading ids are
    /// assigned over the whole document.
    pub fn parse(line: &str, ctx: &mut ParseContext) -> Node {
        let Some(level) = Self::level(line) else {
            return Node::text(line);
        };
        let mut text = line[level + 1..].to_string();
        let mut heading = Element::new(format!("h{level}"));
        if let Some(caps) = Self::id_tag().captures(&text) {
            heading.set_attr("id", &caps[1]);
            text = Self::id_tag().replace(&text, "").into_owned();
        }
        heading.extend(tokenize(text.trim(), ctx));
        heading.into()
    }
}
