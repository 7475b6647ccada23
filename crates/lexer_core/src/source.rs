//! Append-only source buffer with stream preprocessing.
//!
//! Storage model:
//! - Code points are stored post-normalization as `u32` values; indices into
//!   the buffer identify positions in the input.
//! - A parallel vector records the (line, column) origin of each stored code
//!   point.
//! - The buffer is append-only while any index into it is live; growth is
//!   `Vec`'s amortized doubling over the declared capacity hint.
//!
//! Stream preprocessing (applied to every incoming code point):
//! - U+0000 NULL becomes U+FFFD.
//! - U+000C FORM FEED and U+000D CARRIAGE RETURN become U+000A LINE FEED.
//! - A U+000A immediately following a raw U+000D is dropped, so CR LF
//!   collapses to a single stored LINE FEED.
//!
//! Preprocessing is idempotent: a stream that contains none of the replaced
//! code points is stored unchanged.

use memchr::memchr3;

use crate::position::SourcePosition;

/// End-of-input sentinel, outside the valid code-point range.
pub const EOF_SENTINEL: u32 = u32::MAX;

/// U+FFFD REPLACEMENT CHARACTER.
pub const REPLACEMENT: u32 = 0xFFFD;

const NULL: u32 = 0x00;
const LINE_FEED: u32 = 0x0A;
const FORM_FEED: u32 = 0x0C;
const CARRIAGE_RETURN: u32 = 0x0D;

/// Normalized code-point storage with per-code-point positions.
#[derive(Debug)]
pub struct SourceBuffer {
    code_points: Vec<u32>,
    positions: Vec<SourcePosition>,
    /// Position the next appended code point will be recorded at.
    position: SourcePosition,
    last_was_cr: bool,
}

impl SourceBuffer {
    /// Create a buffer sized for roughly `size_hint` code points.
    pub fn with_capacity(size_hint: usize) -> Self {
        Self {
            code_points: Vec::with_capacity(size_hint),
            positions: Vec::with_capacity(size_hint),
            position: SourcePosition::START,
            last_was_cr: false,
        }
    }

    /// Number of stored (post-normalization) code points.
    pub fn len(&self) -> usize {
        self.code_points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.code_points.is_empty()
    }

    /// The stored code point at `index`.
    pub fn get(&self, index: usize) -> u32 {
        self.code_points[index]
    }

    /// The (line, column) origin of the stored code point at `index`.
    pub fn position(&self, index: usize) -> SourcePosition {
        self.positions[index]
    }

    /// The position one past the last stored code point.
    pub fn end_position(&self) -> SourcePosition {
        self.position
    }

    pub fn slice(&self, start: usize, end: usize) -> &[u32] {
        &self.code_points[start..end]
    }

    /// Lossy `String` form of a stored range.
    pub fn slice_string(&self, start: usize, end: usize) -> String {
        self.code_points[start..end]
            .iter()
            .map(|&cp| char::from_u32(cp).unwrap_or('\u{FFFD}'))
            .collect()
    }

    /// Normalize and append a chunk of raw code points, returning the range
    /// of newly stored indices.
    pub fn ingest_chunk(&mut self, chunk: &[u32]) -> std::ops::Range<usize> {
        let start = self.code_points.len();
        for &raw in chunk {
            self.ingest(raw);
        }
        start..self.code_points.len()
    }

    /// Normalize and append a text chunk, returning the range of newly
    /// stored indices.
    ///
    /// Chunks free of NUL/FF/CR (the overwhelmingly common case) skip the
    /// per-code-point replacement branch entirely.
    pub fn ingest_str(&mut self, text: &str) -> std::ops::Range<usize> {
        let start = self.code_points.len();
        if !self.last_was_cr && memchr3(0x00, 0x0C, 0x0D, text.as_bytes()).is_none() {
            for ch in text.chars() {
                self.append(ch as u32);
            }
        } else {
            for ch in text.chars() {
                self.ingest(ch as u32);
            }
        }
        start..self.code_points.len()
    }

    /// Normalize and append one raw code point.
    ///
    /// Returns the stored code point, or `None` when the code point was a
    /// LINE FEED swallowed by a preceding CARRIAGE RETURN.
    pub fn ingest(&mut self, raw: u32) -> Option<u32> {
        let after_cr = self.last_was_cr;
        self.last_was_cr = raw == CARRIAGE_RETURN;
        if after_cr && raw == LINE_FEED {
            return None;
        }
        let cp = match raw {
            NULL => REPLACEMENT,
            FORM_FEED | CARRIAGE_RETURN => LINE_FEED,
            _ => raw,
        };
        self.append(cp);
        Some(cp)
    }

    fn append(&mut self, cp: u32) {
        self.code_points.push(cp);
        self.positions.push(self.position);
        if cp == LINE_FEED {
            self.position.line += 1;
            self.position.column = 1;
        } else {
            self.position.column += 1;
        }
    }

    /// Up to `limit` code points of context preceding `index`.
    pub fn context_before(&self, index: usize, limit: usize) -> String {
        let from = index.saturating_sub(limit);
        self.slice_string(from, index)
    }

    /// Up to `limit` code points starting at `start`, capped at `end`.
    pub fn region(&self, start: usize, end: usize, limit: usize) -> String {
        let to = end.min(start + limit);
        self.slice_string(start, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ingest_all(text: &str) -> SourceBuffer {
        let mut buffer = SourceBuffer::with_capacity(16);
        buffer.ingest_str(text);
        buffer
    }

    fn stored(buffer: &SourceBuffer) -> String {
        buffer.slice_string(0, buffer.len())
    }

    #[test]
    fn replaces_null_form_feed_and_carriage_return() {
        let buffer = ingest_all("a\0b\x0Cc\rd");
        assert_eq!(stored(&buffer), "a\u{FFFD}b\nc\nd");
    }

    #[test]
    fn crlf_collapses_to_one_line_feed() {
        let buffer = ingest_all("a\r\nb");
        assert_eq!(stored(&buffer), "a\nb");
        assert_eq!(buffer.position(2), SourcePosition { line: 2, column: 1 });
    }

    #[test]
    fn crlf_split_across_chunks_still_collapses() {
        let mut buffer = SourceBuffer::with_capacity(16);
        buffer.ingest_str("a\r");
        buffer.ingest_str("\nb");
        assert_eq!(stored(&buffer), "a\nb");
    }

    #[test]
    fn preprocessing_is_idempotent() {
        let once = stored(&ingest_all("x\r\n\x0C\0y"));
        let twice = stored(&ingest_all(&once));
        assert_eq!(once, twice);
    }

    #[test]
    fn positions_track_lines_and_columns() {
        let buffer = ingest_all("ab\ncd");
        assert_eq!(buffer.position(0), SourcePosition::START);
        assert_eq!(buffer.position(1), SourcePosition { line: 1, column: 2 });
        assert_eq!(buffer.position(2), SourcePosition { line: 1, column: 3 });
        assert_eq!(buffer.position(3), SourcePosition { line: 2, column: 1 });
        assert_eq!(buffer.position(4), SourcePosition { line: 2, column: 2 });
        assert_eq!(
            buffer.end_position(),
            SourcePosition { line: 2, column: 3 }
        );
    }

    #[test]
    fn snippets_clamp_to_limits() {
        let buffer = ingest_all("0123456789");
        assert_eq!(buffer.context_before(8, 4), "4567");
        assert_eq!(buffer.region(2, 10, 3), "234");
    }
}
