//! Per-document parse state.
//!
//! A [`ParseContext`] is created for one conversion and dropped with it.
//! Card ids, generated element ids and warnings never leak from one document
//! into the next.

use std::fmt;

use crate::hash::IdRegistry;
use crate::latex::{LatexError, LatexRenderer};
use crate::options::Options;
use crate::parsing::inline::TokenKind;

/// A non-fatal condition noticed while converting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    UnclosedCodeBlock { start_line: usize, end_line: usize },
    UnclosedMathBlock { start_line: usize, end_line: usize },
    LongCard { start_line: usize, end_line: usize },
    BlockFallback { construct: &'static str, line: usize, message: String },
    MalformedToc,
    LatexRender { source: String, message: String },
    UnreferencedFootnote { key: String },
    NestingTooDeep { line: usize },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnclosedCodeBlock { start_line, end_line } => {
                write!(f, "unclosed multiline code detected (line {start_line}-{end_line})")
            }
            Self::UnclosedMathBlock { start_line, end_line } => {
                write!(f, "unclosed $$ block detected (line {start_line}-{end_line})")
            }
            Self::LongCard { start_line, end_line } => write!(
                f,
                "unusually long card detected (line {start_line}-{end_line}), did you forget an {{END}} tag?"
            ),
            Self::BlockFallback { construct, line, message } => {
                write!(f, "failed to parse {construct} at line {line}: {message}")
            }
            Self::MalformedToc => f.write_str("could not build the table of contents"),
            Self::LatexRender { source, message } => {
                write!(f, "could not render LaTeX '{source}': {message}")
            }
            Self::UnreferencedFootnote { key } => {
                write!(f, "footnote [^{key}] is never referenced")
            }
            Self::NestingTooDeep { line } => {
                write!(f, "inline nesting too deep at line {line}, rest rendered as text")
            }
        }
    }
}

pub struct ParseContext<'a> {
    pub options: &'a Options,
    latex: Option<&'a dyn LatexRenderer>,
    pub ids: IdRegistry,
    inline_kinds: Vec<TokenKind>,
    warnings: Vec<Warning>,
    next_card_id: u32,
    /// 0-based index of the first line of the text currently being parsed,
    /// relative to the whole document.
    pub line_base: usize,
    /// 0-based index of the line the block parser is looking at.
    pub line: usize,
}

impl<'a> ParseContext<'a> {
    pub fn new(options: &'a Options) -> Self {
        Self {
            options,
            latex: None,
            ids: IdRegistry::new(),
            inline_kinds: TokenKind::enabled(&options.ignore_inline_tokens),
            warnings: Vec::new(),
            next_card_id: 0,
            line_base: 0,
            line: 0,
        }
    }

    pub fn with_latex(mut self, renderer: &'a dyn LatexRenderer) -> Self {
        self.latex = Some(renderer);
        self
    }

    /// Inline token kinds in priority order, minus the ignored ones.
    pub fn inline_kinds(&self) -> &[TokenKind] {
        &self.inline_kinds
    }

    /// Logs `warning` and keeps it for the caller.
    pub fn warn(&mut self, warning: Warning) {
        log::warn!("{warning}");
        self.warnings.push(warning);
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn take_warnings(&mut self) -> Vec<Warning> {
        std::mem::take(&mut self.warnings)
    }

    pub fn next_card_id(&mut self) -> u32 {
        let id = self.next_card_id;
        self.next_card_id += 1;
        id
    }

    /// 1-based document line for an index into the text being parsed.
    pub fn doc_line(&self, index: usize) -> usize {
        self.line_base + index + 1
    }

    /// Renders LaTeX if pre-rendering is on and a renderer is attached.
    ///
    /// `None` means the caller should fall back to showing the source; a
    /// renderer failure is recorded as a warning.
    pub fn render_latex(&mut self, source: &str, display: bool) -> Option<String> {
        if !self.options.prerender_latex {
            return None;
        }
        let renderer = self.latex?;
        match renderer.render_svg(source, display) {
            Ok(svg) => Some(svg),
            Err(err) => {
                self.report_latex_error(source, &err);
                None
            }
        }
    }

    fn report_latex_error(&mut self, source: &str, err: &LatexError) {
        self.warn(Warning::LatexRender {
            source: source.to_string(),
            message: err.to_string(),
        });
    }
}
