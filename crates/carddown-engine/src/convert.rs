//! Text in, document tree and cards out.
//!
//! ```text
//! protect escapes → split lines → markdown parts ┐
//!                              → card regions    ┴→ ParsedFile → assemble → Rendered
//! ```

use crate::assemble::{Mode, assemble};
use crate::cards::{Card, CardCollection, CardRegistry, find_region};
use crate::context::{ParseContext, Warning};
use crate::error::{AssembleError, CardSyntaxError, ConvertError};
use crate::escape;
use crate::latex::LatexRenderer;
use crate::node::Node;
use crate::node::walk::remove_elements;
use crate::options::Options;
use crate::parsing::blocks::kinds::FootnoteBlock;
use crate::parsing::parse_blocks;

/// A piece of the document in reading order.
#[derive(Debug, Clone, PartialEq)]
pub enum Part {
    Markdown(Vec<Node>),
    /// Id of a card in the collection.
    Card(u32),
}

pub struct Converter<'a> {
    options: &'a Options,
    latex: Option<&'a dyn LatexRenderer>,
    registry: CardRegistry,
}

impl<'a> Converter<'a> {
    pub fn new(options: &'a Options) -> Self {
        Self {
            options,
            latex: None,
            registry: CardRegistry::builtin(),
        }
    }

    pub fn with_latex(mut self, renderer: &'a dyn LatexRenderer) -> Self {
        self.latex = Some(renderer);
        self
    }

    pub fn with_registry(mut self, registry: CardRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn registry(&self) -> &CardRegistry {
        &self.registry
    }

    /// Parses a whole document. A card syntax error stops the conversion.
    pub fn parse(&self, text: &str) -> Result<ParsedFile<'a>, CardSyntaxError> {
        let text = escape::protect(text);
        let lines: Vec<&str> = text.lines().collect();
        let mut ctx = ParseContext::new(self.options);
        if let Some(latex) = self.latex {
            ctx = ctx.with_latex(latex);
        }

        let mut parts = Vec::new();
        let mut cards = CardCollection::new();
        let mut chunk_start = 0;
        let mut i = 0;
        while i < lines.len() {
            let Some(kind) = self.registry.match_line(lines[i]) else {
                i += 1;
                continue;
            };
            push_markdown(&lines[chunk_start..i], chunk_start, &mut ctx, &mut parts);
            let region = find_region(&lines, i, &self.registry, &mut ctx);
            let card = Card::parse(kind, &lines[region.start..region.end], region.start, &mut ctx)?;
            log::debug!(
                "card {} ({}) at lines {}-{}",
                card.id,
                card.kind,
                region.start + 1,
                region.end
            );
            parts.push(Part::Card(card.id));
            cards.push(card);
            i = region.next;
            chunk_start = i;
        }
        push_markdown(&lines[chunk_start..], chunk_start, &mut ctx, &mut parts);

        Ok(ParsedFile { ctx, parts, cards })
    }
}

fn push_markdown(lines: &[&str], start: usize, ctx: &mut ParseContext, parts: &mut Vec<Part>) {
    if lines.is_empty() {
        return;
    }
    ctx.line_base = start;
    let nodes = parse_blocks(lines, true, true, ctx);
    ctx.line_base = 0;
    if !nodes.is_empty() {
        parts.push(Part::Markdown(nodes));
    }
}

/// A parsed document, before assembly.
pub struct ParsedFile<'a> {
    ctx: ParseContext<'a>,
    parts: Vec<Part>,
    cards: CardCollection,
}

impl<'a> ParsedFile<'a> {
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn cards(&self) -> &CardCollection {
        &self.cards
    }

    /// For shuffling before [`into_cards_only`](Self::into_cards_only).
    pub fn cards_mut(&mut self) -> &mut CardCollection {
        &mut self.cards
    }

    pub fn warnings(&self) -> &[Warning] {
        self.ctx.warnings()
    }

    /// Markdown and cards in document order.
    pub fn into_document(self) -> Result<Rendered, AssembleError> {
        let Self {
            mut ctx,
            parts,
            cards,
        } = self;
        let mut nodes = Vec::new();
        for part in parts {
            match part {
                Part::Markdown(markdown) => nodes.extend(markdown),
                Part::Card(id) => {
                    if let Some(card) = cards.get(id) {
                        nodes.push(card.html.clone().into());
                    }
                }
            }
        }
        let nodes = assemble(nodes, Vec::new(), Mode::Document, &mut ctx)?;
        Ok(Rendered {
            nodes,
            cards,
            warnings: ctx.take_warnings(),
        })
    }

    /// Only the cards, in collection order. Footnotes defined in the
    /// markdown parts still resolve references from cards.
    pub fn into_cards_only(self) -> Result<Rendered, AssembleError> {
        let Self {
            mut ctx,
            parts,
            cards,
        } = self;
        let mut extra = Vec::new();
        for part in parts {
            if let Part::Markdown(mut markdown) = part {
                extra.extend(remove_elements(&mut markdown, &|e| {
                    e.has_class(FootnoteBlock::CONTAINER_CLASS)
                }));
            }
        }
        let nodes = cards.iter().map(|card| card.html.clone().into()).collect();
        let nodes = assemble(nodes, extra, Mode::CardsOnly, &mut ctx)?;
        Ok(Rendered {
            nodes,
            cards,
            warnings: ctx.take_warnings(),
        })
    }
}

/// Final document tree plus everything a caller may want to export.
#[derive(Debug)]
pub struct Rendered {
    pub nodes: Vec<Node>,
    pub cards: CardCollection,
    pub warnings: Vec<Warning>,
}

/// Converts a whole document with the built-in card kinds.
pub fn convert(text: &str, options: &Options) -> Result<Rendered, ConvertError> {
    Ok(Converter::new(options).parse(text)?.into_document()?)
}
