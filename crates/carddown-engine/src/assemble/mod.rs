//! # Document Assembly
//!
//! Runs once the whole document (markdown parts and cards) is parsed:
//!
//! 1. **Footnotes**: references are renumbered `[1]`, `[2]`, … in reading
//!    order and the referenced definitions move into one container at the end.
//! 2. **Heading ids**: every heading gets a content-derived anchor.
//! 3. **Table of contents**: built from the headings and put in front.
//! 4. **Escapes**: placeholders turn back into the characters they stand for.

pub mod footnotes;
pub mod headings;
pub mod toc;

pub use footnotes::{FootnoteSources, resolve_footnotes};
pub use headings::{HeadingEntry, assign_heading_ids};
pub use toc::table_of_contents;

use crate::context::ParseContext;
use crate::error::AssembleError;
use crate::escape;
use crate::node::{Element, Node};

/// What is being rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Markdown and cards in document order.
    Document,
    /// Only the cards. Card headings are always part of the table of contents.
    CardsOnly,
}

/// Finishes `nodes` into the final document tree.
///
/// `extra_footnotes` are footnote containers from parts of the document
/// that are not rendered; they only resolve references.
pub fn assemble(
    mut nodes: Vec<Node>,
    extra_footnotes: Vec<Element>,
    mode: Mode,
    ctx: &mut ParseContext,
) -> Result<Vec<Node>, AssembleError> {
    let sources = FootnoteSources {
        extra: extra_footnotes,
        report_unreferenced: mode == Mode::Document,
    };
    resolve_footnotes(&mut nodes, sources, ctx)?;

    let headings = assign_heading_ids(&mut nodes);
    log::debug!("assigned ids to {} headings", headings.len());
    if ctx.options.table_of_contents {
        let include_cards = mode == Mode::CardsOnly || ctx.options.toc_include_cards;
        if let Some(toc) = table_of_contents(&headings, include_cards, ctx) {
            nodes.insert(0, toc);
        }
    }

    escape::restore_tree(&mut nodes);
    Ok(nodes)
}
