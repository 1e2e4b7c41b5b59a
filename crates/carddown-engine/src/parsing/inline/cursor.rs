use crate::parsing::span::Span;

/// A cursor for char-by-char scanning of one range of a line.
///
/// Positions are byte offsets into the whole line, so token spans found on
/// the full line can be compared directly against the cursor.
#[derive(Clone)]
pub struct Cursor<'a> {
    /// The whole line.
    pub s: &'a str,
    /// Current byte offset.
    pub i: usize,
    /// Exclusive end of the scanned range.
    pub end: usize,
}

impl<'a> Cursor<'a> {
    /// Creates a cursor at the start of `range`.
    pub fn new(s: &'a str, range: Span) -> Self {
        Self {
            s,
            i: range.start,
            end: range.end.min(s.len()),
        }
    }

    pub fn pos(&self) -> usize {
        self.i
    }

    pub fn eof(&self) -> bool {
        self.i >= self.end
    }

    pub fn peek(&self) -> Option<char> {
        if self.eof() {
            return None;
        }
        self.s[self.i..].chars().next()
    }

    /// Advances by one char, returning it.
    pub fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.i += c.len_utf8();
        Some(c)
    }

    /// Moves to `pos`, clamped to the end of the range.
    pub fn jump_to(&mut self, pos: usize) {
        self.i = pos.min(self.end);
    }
}
