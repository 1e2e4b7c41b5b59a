use super::kind::END_MARKER;
use super::registry::CardRegistry;
use crate::context::{ParseContext, Warning};

/// The lines of one card: `start..end` in the document, continuing at `next`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardRegion {
    pub start: usize,
    pub end: usize,
    pub next: usize,
}

/// Finds the region of the card starting at `lines[start]`.
///
/// The region ends before an `{END}` line (which is consumed), before the
/// next card (which is not), or at the end of the document. Without an
/// `{END}` line a region of `length_warning` lines or more is reported.
pub fn find_region(
    lines: &[&str],
    start: usize,
    registry: &CardRegistry,
    ctx: &mut ParseContext,
) -> CardRegion {
    let mut i = start + 1;
    while i < lines.len() {
        let line = lines[i];
        if line.trim_end() == END_MARKER {
            return CardRegion {
                start,
                end: i,
                next: i + 1,
            };
        }
        if registry.is_card(line) {
            break;
        }
        i += 1;
    }

    if let Some(limit) = ctx.options.length_warning.filter(|&l| l > 0)
        && i - start >= limit
    {
        ctx.warn(Warning::LongCard {
            start_line: ctx.doc_line(start),
            end_line: ctx.doc_line(i - 1),
        });
    }
    CardRegion {
        start,
        end: i,
        next: i,
    }
}
