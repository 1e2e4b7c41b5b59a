//! # Block Kinds
//!
//! Each module owns the syntax of one construct: its line predicate and, for
//! multi-line constructs, a parser with the [`BlockParser`] signature.
//!
//! [`BlockParser`]: super::open::BlockParser

pub mod block_quote;
pub mod code_block;
pub mod code_fence;
pub mod def_list;
pub mod footnote;
pub mod heading;
pub mod indented_code;
pub mod latex_block;
pub mod list;
pub mod table;
pub mod thematic;

pub use block_quote::{BlockQuote, parse_block_quote};
pub use code_fence::{CodeFence, FenceKind, parse_fenced_code};
pub use def_list::{DefinitionList, parse_def_list};
pub use footnote::{FootnoteBlock, parse_footnotes};
pub use heading::Heading;
pub use indented_code::{IndentedCode, parse_indented_code};
pub use latex_block::{LatexBlock, parse_latex_block};
pub use list::{List, ListTag, parse_list};
pub use table::{Table, parse_table};
pub use thematic::{HorizontalRule, PageBreak};
