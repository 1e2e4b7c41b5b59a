//! # Inline Parsing
//!
//! Regex-driven tokens over a single line, rendered by a cursor walk.
//!
//! ## Modules
//!
//! - **`types`**: [`TokenKind`] (priority order) and [`InlineToken`]
//! - **`rule`**: [`TokenRule`], how one kind is matched and rendered
//! - **`kinds`**: the delimiters and renderers of each construct
//! - **`registry`**: the rule table and [`find_tokens`]
//! - **`cursor`**: [`Cursor`] for char-by-char walking with byte offsets
//! - **`scanner`**: [`tokenize`], the entry point
//!
//! ## Overlaps
//!
//! Tokens are found on the whole line first, keyed by start offset. The
//! scanner takes a token only when it starts at the cursor and lies inside
//! the range being scanned, so a token inside an already taken one is only
//! used when that outer token's content is scanned. Code spans, inline
//! equations and raw HTML never have their content scanned.

pub mod cursor;
pub mod kinds;
pub mod registry;
pub mod rule;
pub mod scanner;
pub mod types;

pub use cursor::Cursor;
pub use registry::find_tokens;
pub use rule::TokenRule;
pub use scanner::tokenize;
pub use types::{InlineToken, TokenKind};
