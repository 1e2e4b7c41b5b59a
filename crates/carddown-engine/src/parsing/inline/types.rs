use crate::parsing::span::Span;

/// The inline constructs the tokenizer knows about.
///
/// Declaration order is priority order: when two kinds produce a token at the
/// same offset, the later kind wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    RawHtml,
    Link,
    Image,
    AutoLink,
    Bold,
    Emph,
    Strike,
    Code,
    Subscript,
    Superscript,
    Highlight,
    Arrow,
    InlineEquation,
    FootnoteRef,
    Emoji,
}

impl TokenKind {
    pub const ALL: [TokenKind; 15] = [
        TokenKind::RawHtml,
        TokenKind::Link,
        TokenKind::Image,
        TokenKind::AutoLink,
        TokenKind::Bold,
        TokenKind::Emph,
        TokenKind::Strike,
        TokenKind::Code,
        TokenKind::Subscript,
        TokenKind::Superscript,
        TokenKind::Highlight,
        TokenKind::Arrow,
        TokenKind::InlineEquation,
        TokenKind::FootnoteRef,
        TokenKind::Emoji,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::RawHtml => "RawHtml",
            Self::Link => "Link",
            Self::Image => "Image",
            Self::AutoLink => "AutoLink",
            Self::Bold => "Bold",
            Self::Emph => "Emph",
            Self::Strike => "Strike",
            Self::Code => "Code",
            Self::Subscript => "Subscript",
            Self::Superscript => "Superscript",
            Self::Highlight => "Highlight",
            Self::Arrow => "Arrow",
            Self::InlineEquation => "InlineEquation",
            Self::FootnoteRef => "FootnoteRef",
            Self::Emoji => "Emoji",
        }
    }

    /// Looks a kind up by name; a trailing `Token` is accepted (`"EmphToken"`).
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.strip_suffix("Token").unwrap_or(name);
        Self::ALL.into_iter().find(|k| k.name() == name)
    }

    /// All kinds in priority order except those named in `ignored`.
    pub fn enabled(ignored: &[String]) -> Vec<Self> {
        let ignored: Vec<Self> = ignored
            .iter()
            .filter_map(|name| {
                let kind = Self::from_name(name);
                if kind.is_none() {
                    log::warn!("unknown inline token kind '{name}' in ignore list");
                }
                kind
            })
            .collect();
        Self::ALL
            .into_iter()
            .filter(|k| !ignored.contains(k))
            .collect()
    }
}

/// One matched inline construct. Transient: lives only while its line is
/// being tokenized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineToken {
    pub kind: TokenKind,
    /// The whole construct, delimiters included.
    pub span: Span,
    /// The part that becomes the node's children. Empty for kinds whose
    /// renderer builds its own children.
    pub content: Span,
    /// Whether `content` is tokenized again or inserted verbatim.
    pub parse_content: bool,
    /// Capture groups of the match, `groups[0]` being the whole match.
    pub groups: Vec<Option<Span>>,
}

impl InlineToken {
    /// Text of capture group `i`, if it participated in the match.
    pub fn group<'l>(&self, line: &'l str, i: usize) -> Option<&'l str> {
        self.groups.get(i).copied().flatten().map(|s| s.slice(line))
    }

    pub fn content_str<'l>(&self, line: &'l str) -> &'l str {
        self.content.slice(line)
    }
}
