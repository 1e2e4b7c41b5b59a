//! Markdown to node tree: [`blocks`] walks lines, [`inline`] tokenizes the
//! text inside them.

pub mod blocks;
pub mod inline;
pub mod span;

pub use blocks::{parse_blocks, parse_markdown};
pub use inline::{find_tokens, tokenize};

/// Deepest list, blockquote or inline nesting that is still parsed.
pub const MAX_NESTING: usize = 32;
