//! Configuration snapshot consumed by the parser, card renderer and assembler.
//!
//! The engine never loads configuration itself; callers build an [`Options`]
//! (usually via the config crate) and pass it by reference.

use std::fmt;
use std::str::FromStr;

/// Table column alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl TableAlign {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }

    /// Inline style attribute value for a cell.
    pub fn style(self) -> String {
        format!("text-align:{}", self.as_str())
    }
}

impl fmt::Display for TableAlign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TableAlign {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Self::Left),
            "center" => Ok(Self::Center),
            "right" => Ok(Self::Right),
            other => Err(format!("unknown table alignment '{other}'")),
        }
    }
}

/// Localized UI strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    pub show_backside: String,
    pub hide_backside: String,
    pub check_answer: String,
    pub toc: String,
    pub card: String,
    pub copied: String,
}

impl Labels {
    pub const LANGUAGES: &'static [&'static str] = &["en", "de"];

    pub fn english() -> Self {
        Self {
            show_backside: "Show Backside".into(),
            hide_backside: "Hide Backside".into(),
            check_answer: "Check Answer".into(),
            toc: "Contents".into(),
            card: "Card".into(),
            copied: "Copied!".into(),
        }
    }

    pub fn german() -> Self {
        Self {
            show_backside: "R&uuml;ckseite einblenden".into(),
            hide_backside: "R&uuml;ckseite ausblenden".into(),
            check_answer: "Pr&uuml;fen".into(),
            toc: "Inhalte".into(),
            card: "Karte".into(),
            copied: "Kopiert!".into(),
        }
    }

    pub fn for_lang(lang: &str) -> Option<Self> {
        match lang {
            "en" => Some(Self::english()),
            "de" => Some(Self::german()),
            _ => None,
        }
    }
}

impl Default for Labels {
    fn default() -> Self {
        Self::english()
    }
}

#[derive(Debug, Clone)]
pub struct Options {
    // Markdown
    pub list_item_chars: Vec<char>,
    pub ignore_empty_lines: bool,
    pub table_align: TableAlign,
    /// Inline token kind names to skip, e.g. `"Emph"` or `"EmphToken"`.
    pub ignore_inline_tokens: Vec<String>,
    pub tabsize: usize,
    pub checkbox_disabled: bool,
    pub prettyprint_inline_code: bool,
    pub prettyprint_multiline_code: bool,
    pub prerender_latex: bool,
    pub image_max_width: String,
    pub codeblock_copy_btn: bool,

    // Cards
    pub collapse: bool,
    /// Warn when a card without `{END}` spans at least this many lines.
    pub length_warning: Option<usize>,
    /// Element appended to every card, e.g. `hr`.
    pub card_separator: Option<String>,

    // Document
    pub table_of_contents: bool,
    pub toc_max_heading: u8,
    pub toc_include_cards: bool,
    pub toc_max_heading_cards: u8,
    pub toc_show_back_headings_cards: bool,
    pub indent_html: usize,

    pub labels: Labels,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            list_item_chars: vec!['-', '+', '*'],
            ignore_empty_lines: true,
            table_align: TableAlign::Left,
            ignore_inline_tokens: Vec::new(),
            tabsize: 4,
            checkbox_disabled: true,
            prettyprint_inline_code: false,
            prettyprint_multiline_code: false,
            prerender_latex: false,
            image_max_width: "80%".into(),
            codeblock_copy_btn: true,
            collapse: true,
            length_warning: Some(30),
            card_separator: Some("hr".into()),
            table_of_contents: true,
            toc_max_heading: 3,
            toc_include_cards: true,
            toc_max_heading_cards: 1,
            toc_show_back_headings_cards: false,
            indent_html: 2,
            labels: Labels::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_align_parses_known_values() {
        assert_eq!("center".parse::<TableAlign>(), Ok(TableAlign::Center));
        assert!("middle".parse::<TableAlign>().is_err());
        assert_eq!(TableAlign::Right.style(), "text-align:right");
    }

    #[test]
    fn labels_fall_back_to_none_for_unknown_lang() {
        assert_eq!(Labels::for_lang("de").map(|l| l.card), Some("Karte".to_string()));
        assert!(Labels::for_lang("fr").is_none());
    }
}
