//! Columnar token storage.
//!
//! Tokens live in parallel typed columns instead of heterogeneous records:
//! one vector each for kind, exclusive source end index, and two
//! kind-specific slots. Decoded string values, integer values, and float
//! values live in separate arenas indexed from the slots:
//!
//! | kind                           | slot-a                        | slot-b |
//! |--------------------------------|-------------------------------|--------|
//! | IDENT/FUNCTION/AT_KEYWORD/     | value start                   | value end |
//! | STRING/URL/BAD_URL             |                               |        |
//! | HASH                           | `(value start << 1) \| is_id` | value end |
//! | DELIM                          | the code point                | unused |
//! | NUMBER                         | 0 integer / 1 float           | value index |
//! | PERCENTAGE                     | float value index             | unused |
//! | DIMENSION                      | unit value start              | unit value end; `values[end]` holds the 0/1 numeric flag and `values[end + 1]` the value index |
//! | everything else                | unused                        | unused |
//!
//! Invariants:
//! - Columns are append-only; a slot assigned at emission is never mutated.
//! - `ends` is strictly increasing (no token is zero-width).
//! - The string-value watermark advances monotonically at each emission;
//!   committed value slices are never overwritten.

use lexer_core::SourceBuffer;
use lexer_core::SourcePosition;

use super::token::{HashFlag, NumericValue, TokenKind};

#[derive(Debug)]
pub struct TokenStore {
    kinds: Vec<TokenKind>,
    ends: Vec<u32>,
    slot_a: Vec<u32>,
    slot_b: Vec<u32>,
    values: Vec<u32>,
    integers: Vec<i64>,
    floats: Vec<f64>,
    watermark: u32,
}

impl TokenStore {
    /// Reserve columns proportionally to the declared input size.
    pub fn with_capacity_hint(size_hint: usize) -> Self {
        let tokens = size_hint / 4;
        Self {
            kinds: Vec::with_capacity(tokens),
            ends: Vec::with_capacity(tokens),
            slot_a: Vec::with_capacity(tokens),
            slot_b: Vec::with_capacity(tokens),
            values: Vec::with_capacity(size_hint / 4),
            integers: Vec::with_capacity(size_hint / 32),
            floats: Vec::with_capacity(size_hint / 32),
            watermark: 0,
        }
    }

    /// Total number of stored tokens, comments included.
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    pub fn kind(&self, index: usize) -> TokenKind {
        self.kinds[index]
    }

    /// Exclusive source end index of token `index`.
    pub fn end(&self, index: usize) -> usize {
        self.ends[index] as usize
    }

    /// Source start index of token `index` (the previous token's end, or 0).
    pub fn start(&self, index: usize) -> usize {
        if index == 0 {
            0
        } else {
            self.ends[index - 1] as usize
        }
    }

    /// Source end of the last emitted token (0 before any emission).
    pub(crate) fn last_end(&self) -> usize {
        self.ends.last().map_or(0, |&end| end as usize)
    }

    pub(crate) fn push(&mut self, kind: TokenKind, end: usize, a: u32, b: u32) {
        debug_assert!(
            end > self.last_end(),
            "token ends must be strictly increasing (end={end}, last={})",
            self.last_end()
        );
        self.kinds.push(kind);
        self.ends.push(end as u32);
        self.slot_a.push(a);
        self.slot_b.push(b);
    }

    /// Append one decoded code point to the in-progress string value.
    pub(crate) fn push_value(&mut self, cp: u32) {
        self.values.push(cp);
    }

    /// The decoded value accumulated for the in-progress token.
    pub(crate) fn pending_value(&self) -> &[u32] {
        &self.values[self.watermark as usize..]
    }

    /// Drop the in-progress value without advancing the watermark.
    pub(crate) fn discard_pending_value(&mut self) {
        self.values.truncate(self.watermark as usize);
    }

    /// Seal the in-progress value; returns its `(start, end)` span.
    pub(crate) fn commit_value(&mut self) -> (u32, u32) {
        let start = self.watermark;
        let end = self.values.len() as u32;
        self.watermark = end;
        (start, end)
    }

    /// Seal the in-progress value as a dimension unit, stashing the numeric
    /// flag and value index in the two arena slots after it.
    pub(crate) fn commit_dimension_value(&mut self, is_float: bool, value_index: u32) -> (u32, u32) {
        let start = self.watermark;
        let end = self.values.len() as u32;
        self.values.push(is_float as u32);
        self.values.push(value_index);
        self.watermark = end + 2;
        (start, end)
    }

    pub(crate) fn push_integer(&mut self, value: i64) -> u32 {
        self.integers.push(value);
        (self.integers.len() - 1) as u32
    }

    pub(crate) fn push_float(&mut self, value: f64) -> u32 {
        self.floats.push(value);
        (self.floats.len() - 1) as u32
    }

    fn value_slice(&self, start: u32, end: u32) -> &[u32] {
        &self.values[start as usize..end as usize]
    }

    fn string_value_span(&self, index: usize) -> Option<(u32, u32)> {
        let kind = self.kinds[index];
        if !kind.has_string_value() {
            return None;
        }
        let a = self.slot_a[index];
        let b = self.slot_b[index];
        if kind == TokenKind::Hash {
            Some((a >> 1, b))
        } else {
            Some((a, b))
        }
    }

    pub fn string_value_code_points(&self, index: usize) -> Option<&[u32]> {
        self.string_value_span(index)
            .map(|(start, end)| self.value_slice(start, end))
    }

    pub fn hash_flag(&self, index: usize) -> Option<HashFlag> {
        if self.kinds[index] != TokenKind::Hash {
            return None;
        }
        Some(if self.slot_a[index] & 1 == 1 {
            HashFlag::Id
        } else {
            HashFlag::Unrestricted
        })
    }

    pub fn numeric_value(&self, index: usize) -> Option<NumericValue> {
        match self.kinds[index] {
            TokenKind::Number => {
                let value_index = self.slot_b[index] as usize;
                Some(if self.slot_a[index] == 0 {
                    NumericValue::Integer(self.integers[value_index])
                } else {
                    NumericValue::Float(self.floats[value_index])
                })
            }
            TokenKind::Percentage => {
                Some(NumericValue::Float(self.floats[self.slot_a[index] as usize]))
            }
            TokenKind::Dimension => {
                let unit_end = self.slot_b[index] as usize;
                let is_float = self.values[unit_end] == 1;
                let value_index = self.values[unit_end + 1] as usize;
                Some(if is_float {
                    NumericValue::Float(self.floats[value_index])
                } else {
                    NumericValue::Integer(self.integers[value_index])
                })
            }
            _ => None,
        }
    }

    pub fn dimension_unit_code_points(&self, index: usize) -> Option<&[u32]> {
        if self.kinds[index] != TokenKind::Dimension {
            return None;
        }
        Some(self.value_slice(self.slot_a[index], self.slot_b[index]))
    }

    pub fn delim_code_point(&self, index: usize) -> Option<u32> {
        (self.kinds[index] == TokenKind::Delim).then(|| self.slot_a[index])
    }
}

/// Read-only token introspection over a finished (or in-progress) store.
///
/// Views borrow the tokenizer's buffers; they cannot be retained across
/// calls that may grow them.
#[derive(Clone, Copy)]
pub struct Tokens<'t> {
    store: &'t TokenStore,
    source: &'t SourceBuffer,
}

impl<'t> Tokens<'t> {
    pub(crate) fn new(store: &'t TokenStore, source: &'t SourceBuffer) -> Self {
        Self { store, source }
    }

    /// Total stored tokens, comments included.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn get(&self, index: usize) -> TokenView<'t> {
        assert!(index < self.store.len(), "token index out of range");
        TokenView {
            store: self.store,
            source: self.source,
            index,
        }
    }

    /// Iterate tokens in source order, with internal COMMENT tokens
    /// filtered out.
    pub fn iter(self) -> impl Iterator<Item = TokenView<'t>> {
        let Tokens { store, source } = self;
        (0..store.len())
            .filter(move |&index| store.kind(index) != TokenKind::Comment)
            .map(move |index| TokenView {
                store,
                source,
                index,
            })
    }
}

/// One token, by index, with access to its semantic values.
#[derive(Clone, Copy)]
pub struct TokenView<'t> {
    store: &'t TokenStore,
    source: &'t SourceBuffer,
    index: usize,
}

impl<'t> TokenView<'t> {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn kind(&self) -> TokenKind {
        self.store.kind(self.index)
    }

    pub fn start(&self) -> usize {
        self.store.start(self.index)
    }

    pub fn end(&self) -> usize {
        self.store.end(self.index)
    }

    /// Line/column of the token's first code point.
    pub fn origin(&self) -> SourcePosition {
        self.source.position(self.start())
    }

    pub fn source_code_points(&self) -> &'t [u32] {
        self.source.slice(self.start(), self.end())
    }

    pub fn source_string(&self) -> String {
        self.source.slice_string(self.start(), self.end())
    }

    /// Decoded string value of identifier-like and string-like tokens.
    pub fn string_value_code_points(&self) -> Option<&'t [u32]> {
        self.store.string_value_code_points(self.index)
    }

    pub fn string_value(&self) -> Option<String> {
        self.string_value_code_points().map(code_points_to_string)
    }

    /// Whether decoding this token's value consumed at least one escape.
    ///
    /// A raw U+005C inside an emitted token's source necessarily began an
    /// escape (otherwise it would have ended the token or raised an error),
    /// so scanning the source slice is exact.
    pub fn has_decoded_escape(&self) -> bool {
        self.source_code_points().contains(&0x5C)
    }

    pub fn hash_flag(&self) -> Option<HashFlag> {
        self.store.hash_flag(self.index)
    }

    pub fn numeric_value(&self) -> Option<NumericValue> {
        self.store.numeric_value(self.index)
    }

    /// Decoded unit of a DIMENSION token.
    pub fn unit(&self) -> Option<String> {
        self.store
            .dimension_unit_code_points(self.index)
            .map(code_points_to_string)
    }

    pub fn delim_code_point(&self) -> Option<u32> {
        self.store.delim_code_point(self.index)
    }
}

fn code_points_to_string(code_points: &[u32]) -> String {
    code_points
        .iter()
        .map(|&cp| char::from_u32(cp).unwrap_or('\u{FFFD}'))
        .collect()
}
