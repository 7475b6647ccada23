//! Token emission and numeric commit helpers.
//!
//! Every emission closes the current token at `cursor - retain`, hands the
//! `retain` trailing code points back through the replay ring, and returns
//! the machine to the initial state. `retain` never exceeds 3.

use crate::syntax::states::State;
use crate::syntax::token::TokenKind;

use super::{CssTokenizer, Trace, decoded_starts_ident_sequence, token_fmt};

impl CssTokenizer {
    fn emit_raw(&mut self, kind: TokenKind, end: usize, a: u32, b: u32) {
        self.store.push(kind, end, a, b);
        self.stats.tokens_emitted += 1;
        if self.config.trace == Some(Trace::Lexing) {
            let index = self.store.len() - 1;
            log::debug!(
                target: "css.tokenizer",
                "{}",
                token_fmt::trace_line(&self.store, &self.source, index)
            );
        }
    }

    /// Close the current token `retain` code points back and queue those
    /// code points for replay. Returns the token's end index.
    ///
    /// The handed-back code points precede anything already queued, so they
    /// are pushed to the ring's front (in reverse, preserving source order).
    fn give_back(&mut self, retain: usize) -> usize {
        debug_assert!(retain <= 3, "reconsumption is bounded at three code points");
        let end = self.cursor - retain;
        self.cursor = end;
        for offset in (0..retain).rev() {
            self.pending.push_front(self.source.get(end + offset));
        }
        debug_assert!(self.pending.len() <= 4, "replay ring overflow");
        end
    }

    pub(super) fn emit_simple(&mut self, kind: TokenKind, retain: usize) {
        let end = self.give_back(retain);
        self.emit_raw(kind, end, 0, 0);
        self.transition(State::Initial);
    }

    pub(super) fn emit_delim(&mut self, code_point: u32, retain: usize) {
        let end = self.give_back(retain);
        self.emit_raw(TokenKind::Delim, end, code_point, 0);
        self.transition(State::Initial);
    }

    /// Emit a token whose slots hold the in-progress decoded string value.
    pub(super) fn emit_valued(&mut self, kind: TokenKind, retain: usize) {
        let end = self.give_back(retain);
        let (a, b) = self.store.commit_value();
        self.emit_raw(kind, end, a, b);
        self.transition(State::Initial);
    }

    pub(super) fn emit_hash(&mut self, retain: usize) {
        let is_id = decoded_starts_ident_sequence(self.store.pending_value());
        let end = self.give_back(retain);
        let (a, b) = self.store.commit_value();
        self.emit_raw(TokenKind::Hash, end, (a << 1) | u32::from(is_id), b);
        self.transition(State::Initial);
    }

    /// Parse the number's source slice (excluding the trailing `exclude`
    /// code points) with the host IEEE-754 parser and store the value in the
    /// integer or float arena per the is-float flag.
    pub(super) fn commit_number(&mut self, exclude: usize) {
        let value = self.number_literal(exclude);
        self.number_value_index = if self.number_is_float {
            self.store.push_float(value)
        } else {
            self.store.push_integer(value as i64)
        };
    }

    /// Percentage values always live in the float arena.
    pub(super) fn commit_number_as_float(&mut self, exclude: usize) -> u32 {
        let value = self.number_literal(exclude);
        self.store.push_float(value)
    }

    fn number_literal(&self, exclude: usize) -> f64 {
        let start = self.store.last_end();
        let end = self.cursor - exclude;
        let text = self.source.slice_string(start, end);
        // The number states only reach a commit with a well-formed decimal
        // literal in the slice.
        text.parse()
            .expect("number states produced an unparsable literal")
    }

    pub(super) fn emit_number(&mut self, retain: usize) {
        self.commit_number(retain);
        let end = self.give_back(retain);
        self.emit_raw(
            TokenKind::Number,
            end,
            u32::from(self.number_is_float),
            self.number_value_index,
        );
        self.transition(State::Initial);
    }

    pub(super) fn emit_percentage(&mut self, value_index: u32) {
        let end = self.give_back(0);
        self.emit_raw(TokenKind::Percentage, end, value_index, 0);
        self.transition(State::Initial);
    }

    pub(super) fn emit_dimension(&mut self, retain: usize) {
        let end = self.give_back(retain);
        let (a, b) = self
            .store
            .commit_dimension_value(self.number_is_float, self.number_value_index);
        self.emit_raw(TokenKind::Dimension, end, a, b);
        self.transition(State::Initial);
    }

    /// Resolve `url(` followed by a quote: FUNCTION "url" ends just after
    /// the parenthesis, the skipped whitespace becomes its own token, and
    /// the quote opens a string. Token output is identical to reconsuming
    /// the whitespace run and the quote.
    pub(super) fn emit_function_url_then_string(&mut self, quote: u32) {
        let whitespace = self.url_whitespace as usize;
        let function_end = self.cursor - whitespace - 1;
        let (a, b) = self.store.commit_value();
        self.emit_raw(TokenKind::Function, function_end, a, b);
        if whitespace > 0 {
            self.emit_raw(TokenKind::Whitespace, self.cursor - 1, 0, 0);
        }
        self.string_delim = quote;
        self.transition(State::StringBody);
    }
}
