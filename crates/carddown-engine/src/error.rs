use thiserror::Error;

/// A block construct that could not be parsed.
///
/// Never leaves the block parser: the per-construct adapter turns it into a
/// warning and degrades the offending line to literal text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MarkdownSyntaxError {
    #[error("table has no alignment row")]
    MissingTableHeader,

    #[error("invalid table alignment row: '{row}'")]
    InvalidAlignmentRow { row: String },

    #[error("inconsistent number of columns in table: expected {expected}, found {found}")]
    InconsistentColumns { expected: usize, found: usize },

    #[error("nesting deeper than {depth} levels")]
    NestingTooDeep { depth: usize },

    #[error("line does not start a block quote")]
    NotAQuote,
}

/// An author mistake inside a card. Stops the whole conversion.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CardSyntaxError {
    #[error("empty backside on card starting at line {line}")]
    EmptyBackside { line: usize },

    #[error("multiple choice card starting at line {line} has no choices")]
    NoChoices { line: usize },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AssembleError {
    #[error("footnote reference [^{key}] has no definition")]
    UnresolvedFootnote { key: String },
}

/// Everything that can abort a conversion.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error(transparent)]
    Card(#[from] CardSyntaxError),

    #[error(transparent)]
    Assemble(#[from] AssembleError),
}
