pub mod assemble;
pub mod cards;
pub mod context;
pub mod convert;
pub mod emoji;
pub mod error;
pub mod escape;
pub mod hash;
pub mod latex;
pub mod node;
pub mod options;
pub mod parsing;
pub mod render;

// Re-export key types for easier usage
pub use cards::{
    AnswerCard, Card, CardCollection, CardKind, CardRecord, CardRegistry, MultipleChoiceCard,
    QuestionCard,
};
pub use context::{ParseContext, Warning};
pub use convert::{Converter, ParsedFile, Part, Rendered, convert};
pub use error::{AssembleError, CardSyntaxError, ConvertError, MarkdownSyntaxError};
pub use latex::{CachingRenderer, LatexError, LatexRenderer};
pub use node::{Element, Node};
pub use options::{Labels, Options, TableAlign};
pub use parsing::{find_tokens, parse_blocks, parse_markdown, tokenize};
pub use render::{HtmlPage, inline_html, node_to_html, to_html};
