//! CSS tokenizer public API.
//!
//! This is a streaming tokenizer: it consumes normalized code points one at
//! a time and emits tokens into a columnar store. The tokenizer is an
//! explicit state machine and is resumable at any chunk boundary.
//!
//! Invariants:
//! - Chunk-equivalence: feeding input in one chunk or many chunks yields the
//!   same token sequence for equivalent input.
//! - Tokens are emitted in strictly increasing source order and partition
//!   the normalized source (comments included, as internal tokens).
//! - Reconsumption is bounded: at most three already-stored code points are
//!   ever replayed into a new state.
//! - Strict mode stops at the first parse error; recover mode accretes
//!   errors and keeps the stream a valid tokenization of some CSS.

use std::collections::VecDeque;

use lexer_core::{Diagnostic, EOF_SENTINEL, REPLACEMENT, SourceBuffer};

use super::error::{ParseError, ParseErrorKind};
use super::states::State;
use super::store::{TokenStore, Tokens};
use super::token::TokenKind;

mod emit;
mod token_fmt;


pub use token_fmt::describe;

/// Configuration for the tokenizer.
#[derive(Clone, Debug)]
pub struct TokenizerConfig {
    /// Expected input length in code points; a capacity hint only.
    pub size_hint: usize,
    /// Accrete parse errors and continue instead of failing on the first.
    pub recover: bool,
    /// Produce the legacy CSS 2.1 match tokens (`~=`, `|=`, `^=`, `$=`,
    /// `*=`, `||`) instead of decomposing them into DELIM sequences.
    pub legacy_match_tokens: bool,
    /// Optional debug tracing of the token stream.
    pub trace: Option<Trace>,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            size_hint: 65_536,
            recover: true,
            legacy_match_tokens: false,
            trace: None,
        }
    }
}

/// Debug tracing modes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trace {
    /// Log each emitted token in tabular form.
    Lexing,
}

/// Minimal tokenizer instrumentation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TokenizerStats {
    pub code_points: u64,
    pub tokens_emitted: u64,
    pub errors: u64,
}

/// Streaming CSS tokenizer.
///
/// One instance is owned by exactly one producer and driven through
/// [`push_chunk`](Self::push_chunk) / [`push_str`](Self::push_str) followed
/// by exactly one [`finish`](Self::finish). Pushing after `finish`, or after
/// a fatal (strict-mode) parse error, is a caller contract violation and
/// panics.
pub struct CssTokenizer {
    config: TokenizerConfig,
    state: State,
    /// Continue-after-escape state for the shared hex-escape accumulator.
    return_state: State,
    source: SourceBuffer,
    store: TokenStore,
    errors: Vec<ParseError>,
    fatal: Option<ParseError>,
    /// Replay ring for reconsumption; never holds more than three stored
    /// code points plus one end-of-input re-signal.
    pending: VecDeque<u32>,
    /// Count of code points consumed and settled into emitted or
    /// in-progress tokens. Decremented on reconsumption.
    cursor: usize,
    string_delim: u32,
    escape_value: u32,
    escape_digits: u8,
    number_is_float: bool,
    number_value_index: u32,
    url_whitespace: u32,
    finished: bool,
    stats: TokenizerStats,
}

impl CssTokenizer {
    pub fn new(config: TokenizerConfig) -> Self {
        let size_hint = config.size_hint;
        Self {
            config,
            state: State::Initial,
            return_state: State::Initial,
            source: SourceBuffer::with_capacity(size_hint),
            store: TokenStore::with_capacity_hint(size_hint),
            errors: Vec::new(),
            fatal: None,
            pending: VecDeque::with_capacity(4),
            cursor: 0,
            string_delim: 0,
            escape_value: 0,
            escape_digits: 0,
            number_is_float: false,
            number_value_index: 0,
            url_whitespace: 0,
            finished: false,
            stats: TokenizerStats::default(),
        }
    }

    /// Normalize and consume a chunk of raw code points.
    ///
    /// In strict mode the first parse error is returned and the rest of the
    /// chunk is not consumed; in recover mode the result is always `Ok` and
    /// errors are readable from [`errors`](Self::errors).
    pub fn push_chunk(&mut self, chunk: &[u32]) -> Result<(), ParseError> {
        self.assert_accepting("push_chunk");
        let range = self.source.ingest_chunk(chunk);
        self.run(range)
    }

    /// Normalize and consume a text chunk.
    pub fn push_str(&mut self, text: &str) -> Result<(), ParseError> {
        self.assert_accepting("push_str");
        let range = self.source.ingest_str(text);
        self.run(range)
    }

    /// Signal end of input.
    ///
    /// The current state either completes its in-progress token or raises a
    /// parse error; afterwards no further input is accepted.
    pub fn finish(&mut self) -> Result<(), ParseError> {
        self.assert_accepting("finish");
        self.feed(EOF_SENTINEL);
        if let Some(error) = self.fatal.take() {
            return Err(error);
        }
        debug_assert!(
            matches!(self.state, State::Done),
            "end of input did not settle the state machine (state={:?})",
            self.state
        );
        debug_assert_eq!(
            self.store.last_end(),
            self.source.len(),
            "emitted tokens must cover the normalized source"
        );
        self.finished = true;
        Ok(())
    }

    /// Read-only token introspection.
    ///
    /// Any token emitted so far may be read while tokenization is still in
    /// progress; the returned view borrows the tokenizer and cannot be
    /// retained across further pushes.
    pub fn tokens(&self) -> Tokens<'_> {
        Tokens::new(&self.store, &self.source)
    }

    /// Parse errors accreted in recover mode.
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    /// The normalized source consumed so far.
    pub fn source(&self) -> &SourceBuffer {
        &self.source
    }

    pub fn stats(&self) -> TokenizerStats {
        self.stats
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    fn assert_accepting(&self, entry: &str) {
        assert!(
            !self.finished,
            "CssTokenizer::{entry} called after finish(); this violates the end-of-stream contract"
        );
        assert!(
            self.state != State::Failed,
            "CssTokenizer::{entry} called after a fatal parse error"
        );
    }

    fn run(&mut self, range: std::ops::Range<usize>) -> Result<(), ParseError> {
        for index in range {
            let cp = self.source.get(index);
            self.stats.code_points += 1;
            self.feed(cp);
            if let Some(error) = self.fatal.take() {
                return Err(error);
            }
        }
        Ok(())
    }

    /// Drive one code point through the state machine, then drain any
    /// reconsumption replays it queued.
    fn feed(&mut self, cp: u32) {
        self.dispatch(cp);
        while let Some(replayed) = self.pending.pop_front() {
            if self.state == State::Failed {
                self.pending.clear();
                break;
            }
            self.dispatch(replayed);
        }
    }

    fn dispatch(&mut self, cp: u32) {
        if cp != EOF_SENTINEL {
            self.cursor += 1;
            debug_assert!(
                self.cursor <= self.source.len(),
                "cursor ran past the stored source"
            );
        }
        self.step(cp);
    }

    fn transition(&mut self, next: State) {
        #[cfg(any(test, feature = "debug-stats"))]
        if self.state != next {
            log::trace!(
                target: "css.tokenizer",
                "state {:?} -> {:?} @{}",
                self.state,
                next,
                self.cursor
            );
        }
        self.state = next;
    }

    /// Queue `cp` to be re-fed to the (new) current state.
    ///
    /// The ring always holds the contiguous run of unconsumed stored code
    /// points starting at `cursor`, optionally followed by the end-of-input
    /// sentinel: a handed-back stored code point goes to the front, an
    /// end-of-input re-signal to the back.
    fn reprocess(&mut self, cp: u32) {
        if cp == EOF_SENTINEL {
            self.pending.push_back(cp);
        } else {
            debug_assert!(
                self.cursor > self.store.last_end(),
                "cannot reconsume into an already emitted token"
            );
            self.cursor -= 1;
            self.pending.push_front(cp);
        }
        debug_assert!(self.pending.len() <= 4, "replay ring overflow");
    }

    fn step(&mut self, cp: u32) {
        match self.state {
            State::Initial => self.step_initial(cp),
            State::Whitespace => self.step_whitespace(cp),
            State::StringBody => self.step_string_body(cp),
            State::StringBackslash => self.step_string_backslash(cp),
            State::EscapeHex => self.step_escape_hex(cp),
            State::IdentBody => self.step_ident_body(cp),
            State::IdentBackslash => self.step_ident_backslash(cp),
            State::BackslashInitial => self.step_backslash_initial(cp),
            State::HashStart => self.step_hash_start(cp),
            State::HashStartBackslash => self.step_hash_start_backslash(cp),
            State::HashBody => self.step_hash_body(cp),
            State::HashBackslash => self.step_hash_backslash(cp),
            State::AtStart => self.step_at_start(cp),
            State::AtMinus => self.step_at_minus(cp),
            State::AtMinusBackslash => self.step_at_minus_backslash(cp),
            State::AtBackslash => self.step_at_backslash(cp),
            State::AtBody => self.step_at_body(cp),
            State::AtBodyBackslash => self.step_at_body_backslash(cp),
            State::Plus => self.step_plus(cp),
            State::PlusDot => self.step_plus_dot(cp),
            State::Minus => self.step_minus(cp),
            State::MinusDot => self.step_minus_dot(cp),
            State::MinusMinus => self.step_minus_minus(cp),
            State::MinusBackslash => self.step_minus_backslash(cp),
            State::Dot => self.step_dot(cp),
            State::NumberInt => self.step_number_int(cp),
            State::NumberDot => self.step_number_dot(cp),
            State::NumberFrac => self.step_number_frac(cp),
            State::NumberExpMark => self.step_number_exp_mark(cp),
            State::NumberExpSign => self.step_number_exp_sign(cp),
            State::NumberExp => self.step_number_exp(cp),
            State::NumberMinus => self.step_number_minus(cp),
            State::NumberMinusBackslash => self.step_number_minus_backslash(cp),
            State::NumberBackslash => self.step_number_backslash(cp),
            State::UnitBody => self.step_unit_body(cp),
            State::UnitBackslash => self.step_unit_backslash(cp),
            State::UrlLeadingWhitespace => self.step_url_leading_whitespace(cp),
            State::UrlBody => self.step_url_body(cp),
            State::UrlBackslash => self.step_url_backslash(cp),
            State::UrlTrailingWhitespace => self.step_url_trailing_whitespace(cp),
            State::BadUrlBody => self.step_bad_url_body(cp),
            State::BadUrlBackslash => self.step_bad_url_backslash(cp),
            State::Slash => self.step_slash(cp),
            State::CommentBody => self.step_comment_body(cp),
            State::CommentStar => self.step_comment_star(cp),
            State::LessThan => self.step_less_than(cp),
            State::LessThanBang => self.step_less_than_bang(cp),
            State::LessThanBangDash => self.step_less_than_bang_dash(cp),
            State::Pipe => self.step_match_lookahead(cp, 0x7C, TokenKind::Column, TokenKind::DashMatch),
            State::Tilde => self.step_match_equals(cp, 0x7E, TokenKind::IncludeMatch),
            State::Caret => self.step_match_equals(cp, 0x5E, TokenKind::PrefixMatch),
            State::Dollar => self.step_match_equals(cp, 0x24, TokenKind::SuffixMatch),
            State::Asterisk => self.step_match_equals(cp, 0x2A, TokenKind::SubstringMatch),
            State::Done => {
                debug_assert!(false, "code point fed after end of input");
            }
            State::Failed => {}
        }
    }

    fn step_initial(&mut self, cp: u32) {
        if cp != EOF_SENTINEL {
            debug_assert_eq!(
                self.cursor - 1,
                self.store.last_end(),
                "a new token must start at the previous token's end"
            );
        }
        match cp {
            0x09 | 0x0A | 0x20 => self.transition(State::Whitespace),
            0x22 | 0x27 => {
                self.string_delim = cp;
                self.transition(State::StringBody);
            }
            0x23 => self.transition(State::HashStart),
            0x28 => self.emit_simple(TokenKind::LeftParenthesis, 0),
            0x29 => self.emit_simple(TokenKind::RightParenthesis, 0),
            0x2B => {
                self.number_is_float = false;
                self.transition(State::Plus);
            }
            0x2C => self.emit_simple(TokenKind::Comma, 0),
            0x2D => {
                self.number_is_float = false;
                self.transition(State::Minus);
            }
            0x2E => {
                self.number_is_float = false;
                self.transition(State::Dot);
            }
            0x2F => self.transition(State::Slash),
            0x30..=0x39 => {
                self.number_is_float = false;
                self.transition(State::NumberInt);
            }
            0x3A => self.emit_simple(TokenKind::Colon, 0),
            0x3B => self.emit_simple(TokenKind::Semicolon, 0),
            0x3C => self.transition(State::LessThan),
            0x40 => self.transition(State::AtStart),
            0x5B => self.emit_simple(TokenKind::LeftBracket, 0),
            0x5C => self.transition(State::BackslashInitial),
            0x5D => self.emit_simple(TokenKind::RightBracket, 0),
            0x7B => self.emit_simple(TokenKind::LeftBrace, 0),
            0x7D => self.emit_simple(TokenKind::RightBrace, 0),
            0x7C if self.config.legacy_match_tokens => self.transition(State::Pipe),
            0x7E if self.config.legacy_match_tokens => self.transition(State::Tilde),
            0x5E if self.config.legacy_match_tokens => self.transition(State::Caret),
            0x24 if self.config.legacy_match_tokens => self.transition(State::Dollar),
            0x2A if self.config.legacy_match_tokens => self.transition(State::Asterisk),
            EOF_SENTINEL => self.transition(State::Done),
            _ if is_ident_start(cp) => {
                self.store.push_value(cp);
                self.transition(State::IdentBody);
            }
            _ => self.emit_delim(cp, 0),
        }
    }

    fn step_whitespace(&mut self, cp: u32) {
        match cp {
            0x09 | 0x0A | 0x20 => {}
            EOF_SENTINEL => {
                self.emit_simple(TokenKind::Whitespace, 0);
                self.reprocess(EOF_SENTINEL);
            }
            _ => self.emit_simple(TokenKind::Whitespace, 1),
        }
    }

    fn step_string_body(&mut self, cp: u32) {
        match cp {
            _ if cp == self.string_delim => self.emit_valued(TokenKind::String, 0),
            0x5C => self.transition(State::StringBackslash),
            0x0A => {
                if !self.parse_error(ParseErrorKind::UnterminatedString, cp) {
                    return;
                }
                // Close the string before the line feed; the line feed is
                // handed back and becomes whitespace.
                self.emit_valued(TokenKind::String, 1);
            }
            EOF_SENTINEL => {
                if !self.parse_error(ParseErrorKind::UnterminatedString, cp) {
                    return;
                }
                self.emit_valued(TokenKind::String, 0);
                self.reprocess(EOF_SENTINEL);
            }
            _ => self.store.push_value(cp),
        }
    }

    fn step_string_backslash(&mut self, cp: u32) {
        match cp {
            // Escaped line feed: line continuation, nothing is appended.
            0x0A => self.transition(State::StringBody),
            EOF_SENTINEL => {
                if !self.parse_error(ParseErrorKind::InvalidEscape, cp) {
                    return;
                }
                self.store.push_value(REPLACEMENT);
                self.emit_valued(TokenKind::String, 0);
                self.reprocess(EOF_SENTINEL);
            }
            _ if is_hex_digit(cp) => self.begin_hex_escape(cp, State::StringBody),
            _ => {
                self.store.push_value(cp);
                self.transition(State::StringBody);
            }
        }
    }

    fn begin_hex_escape(&mut self, first: u32, return_state: State) {
        self.escape_value = hex_value(first);
        self.escape_digits = 1;
        self.return_state = return_state;
        self.transition(State::EscapeHex);
    }

    fn step_escape_hex(&mut self, cp: u32) {
        if self.escape_digits < 6 && is_hex_digit(cp) {
            self.escape_value = self.escape_value * 16 + hex_value(cp);
            self.escape_digits += 1;
            return;
        }
        self.finish_hex_escape();
        let return_state = self.return_state;
        self.transition(return_state);
        match cp {
            // A single trailing whitespace code point terminates the escape
            // and is consumed with it.
            0x09 | 0x0A | 0x20 => {}
            _ => self.reprocess(cp),
        }
    }

    fn finish_hex_escape(&mut self) {
        let value = self.escape_value;
        let decoded = if value == 0 || value > 0x10FFFF || (0xD800..=0xDFFF).contains(&value) {
            REPLACEMENT
        } else {
            value
        };
        self.store.push_value(decoded);
    }

    fn step_ident_body(&mut self, cp: u32) {
        match cp {
            _ if is_ident_continue(cp) => self.store.push_value(cp),
            0x5C => self.transition(State::IdentBackslash),
            0x28 => {
                if is_url_name(self.store.pending_value()) {
                    self.url_whitespace = 0;
                    self.transition(State::UrlLeadingWhitespace);
                } else {
                    self.emit_valued(TokenKind::Function, 0);
                }
            }
            EOF_SENTINEL => {
                self.emit_valued(TokenKind::Ident, 0);
                self.reprocess(EOF_SENTINEL);
            }
            _ => self.emit_valued(TokenKind::Ident, 1),
        }
    }

    fn step_ident_backslash(&mut self, cp: u32) {
        match cp {
            // Backslash-newline is not an escape here: the ident ends before
            // the backslash, which re-runs from the top (and errors there).
            0x0A => self.emit_valued(TokenKind::Ident, 2),
            EOF_SENTINEL => {
                if !self.parse_error(ParseErrorKind::InvalidEscape, cp) {
                    return;
                }
                self.store.push_value(REPLACEMENT);
                self.emit_valued(TokenKind::Ident, 0);
                self.reprocess(EOF_SENTINEL);
            }
            _ if is_hex_digit(cp) => self.begin_hex_escape(cp, State::IdentBody),
            _ => {
                self.store.push_value(cp);
                self.transition(State::IdentBody);
            }
        }
    }

    fn step_backslash_initial(&mut self, cp: u32) {
        match cp {
            0x0A => {
                if !self.parse_error(ParseErrorKind::InvalidEscape, cp) {
                    return;
                }
                self.emit_delim(0x5C, 1);
            }
            EOF_SENTINEL => {
                if !self.parse_error(ParseErrorKind::InvalidEscape, cp) {
                    return;
                }
                self.emit_delim(0x5C, 0);
                self.reprocess(EOF_SENTINEL);
            }
            _ if is_hex_digit(cp) => self.begin_hex_escape(cp, State::IdentBody),
            _ => {
                self.store.push_value(cp);
                self.transition(State::IdentBody);
            }
        }
    }

    fn step_hash_start(&mut self, cp: u32) {
        match cp {
            0x5C => self.transition(State::HashStartBackslash),
            _ if is_ident_continue(cp) => {
                self.store.push_value(cp);
                self.transition(State::HashBody);
            }
            EOF_SENTINEL => {
                self.emit_delim(0x23, 0);
                self.reprocess(EOF_SENTINEL);
            }
            _ => self.emit_delim(0x23, 1),
        }
    }

    fn step_hash_start_backslash(&mut self, cp: u32) {
        match cp {
            // `#` then `\` then newline: no hash; the backslash re-runs from
            // the top and raises the error there.
            0x0A => self.emit_delim(0x23, 2),
            EOF_SENTINEL => {
                self.emit_delim(0x23, 1);
                self.reprocess(EOF_SENTINEL);
            }
            _ if is_hex_digit(cp) => self.begin_hex_escape(cp, State::HashBody),
            _ => {
                self.store.push_value(cp);
                self.transition(State::HashBody);
            }
        }
    }

    fn step_hash_body(&mut self, cp: u32) {
        match cp {
            _ if is_ident_continue(cp) => self.store.push_value(cp),
            0x5C => self.transition(State::HashBackslash),
            EOF_SENTINEL => {
                self.emit_hash(0);
                self.reprocess(EOF_SENTINEL);
            }
            _ => self.emit_hash(1),
        }
    }

    fn step_hash_backslash(&mut self, cp: u32) {
        match cp {
            0x0A => self.emit_hash(2),
            EOF_SENTINEL => {
                if !self.parse_error(ParseErrorKind::InvalidEscape, cp) {
                    return;
                }
                // `#-\` at end of input: the dangling escape decodes to
                // U+FFFD, which is >= U+0080 and thus identifier-start, so
                // the id check over the decoded value yields an ID-typed
                // hash. The upstream csswg-drafts discussion suggests this
                // may be a spec error; the behavior is kept deliberately.
                self.store.push_value(REPLACEMENT);
                self.emit_hash(0);
                self.reprocess(EOF_SENTINEL);
            }
            _ if is_hex_digit(cp) => self.begin_hex_escape(cp, State::HashBody),
            _ => {
                self.store.push_value(cp);
                self.transition(State::HashBody);
            }
        }
    }

    fn step_at_start(&mut self, cp: u32) {
        match cp {
            0x2D => self.transition(State::AtMinus),
            0x5C => self.transition(State::AtBackslash),
            _ if is_ident_start(cp) => {
                self.store.push_value(cp);
                self.transition(State::AtBody);
            }
            EOF_SENTINEL => {
                self.emit_delim(0x40, 0);
                self.reprocess(EOF_SENTINEL);
            }
            _ => self.emit_delim(0x40, 1),
        }
    }

    fn step_at_minus(&mut self, cp: u32) {
        match cp {
            0x5C => self.transition(State::AtMinusBackslash),
            _ if is_ident_start(cp) || cp == 0x2D => {
                self.store.push_value(0x2D);
                self.store.push_value(cp);
                self.transition(State::AtBody);
            }
            EOF_SENTINEL => {
                self.emit_delim(0x40, 1);
                self.reprocess(EOF_SENTINEL);
            }
            _ => self.emit_delim(0x40, 2),
        }
    }

    fn step_at_minus_backslash(&mut self, cp: u32) {
        match cp {
            0x0A => self.emit_delim(0x40, 3),
            EOF_SENTINEL => {
                self.emit_delim(0x40, 2);
                self.reprocess(EOF_SENTINEL);
            }
            _ if is_hex_digit(cp) => {
                self.store.push_value(0x2D);
                self.begin_hex_escape(cp, State::AtBody);
            }
            _ => {
                self.store.push_value(0x2D);
                self.store.push_value(cp);
                self.transition(State::AtBody);
            }
        }
    }

    fn step_at_backslash(&mut self, cp: u32) {
        match cp {
            0x0A => self.emit_delim(0x40, 2),
            EOF_SENTINEL => {
                self.emit_delim(0x40, 1);
                self.reprocess(EOF_SENTINEL);
            }
            _ if is_hex_digit(cp) => self.begin_hex_escape(cp, State::AtBody),
            _ => {
                self.store.push_value(cp);
                self.transition(State::AtBody);
            }
        }
    }

    fn step_at_body(&mut self, cp: u32) {
        match cp {
            _ if is_ident_continue(cp) => self.store.push_value(cp),
            0x5C => self.transition(State::AtBodyBackslash),
            EOF_SENTINEL => {
                self.emit_valued(TokenKind::AtKeyword, 0);
                self.reprocess(EOF_SENTINEL);
            }
            _ => self.emit_valued(TokenKind::AtKeyword, 1),
        }
    }

    fn step_at_body_backslash(&mut self, cp: u32) {
        match cp {
            0x0A => self.emit_valued(TokenKind::AtKeyword, 2),
            EOF_SENTINEL => {
                if !self.parse_error(ParseErrorKind::InvalidEscape, cp) {
                    return;
                }
                self.store.push_value(REPLACEMENT);
                self.emit_valued(TokenKind::AtKeyword, 0);
                self.reprocess(EOF_SENTINEL);
            }
            _ if is_hex_digit(cp) => self.begin_hex_escape(cp, State::AtBody),
            _ => {
                self.store.push_value(cp);
                self.transition(State::AtBody);
            }
        }
    }

    fn step_plus(&mut self, cp: u32) {
        match cp {
            0x30..=0x39 => self.transition(State::NumberInt),
            0x2E => self.transition(State::PlusDot),
            EOF_SENTINEL => {
                self.emit_delim(0x2B, 0);
                self.reprocess(EOF_SENTINEL);
            }
            _ => self.emit_delim(0x2B, 1),
        }
    }

    fn step_plus_dot(&mut self, cp: u32) {
        match cp {
            0x30..=0x39 => {
                self.number_is_float = true;
                self.transition(State::NumberFrac);
            }
            EOF_SENTINEL => {
                self.emit_delim(0x2B, 1);
                self.reprocess(EOF_SENTINEL);
            }
            _ => self.emit_delim(0x2B, 2),
        }
    }

    fn step_minus(&mut self, cp: u32) {
        match cp {
            0x30..=0x39 => self.transition(State::NumberInt),
            0x2E => self.transition(State::MinusDot),
            0x2D => self.transition(State::MinusMinus),
            0x5C => self.transition(State::MinusBackslash),
            _ if is_ident_start(cp) => {
                self.store.push_value(0x2D);
                self.store.push_value(cp);
                self.transition(State::IdentBody);
            }
            EOF_SENTINEL => {
                self.emit_delim(0x2D, 0);
                self.reprocess(EOF_SENTINEL);
            }
            _ => self.emit_delim(0x2D, 1),
        }
    }

    fn step_minus_dot(&mut self, cp: u32) {
        match cp {
            0x30..=0x39 => {
                self.number_is_float = true;
                self.transition(State::NumberFrac);
            }
            EOF_SENTINEL => {
                self.emit_delim(0x2D, 1);
                self.reprocess(EOF_SENTINEL);
            }
            _ => self.emit_delim(0x2D, 2),
        }
    }

    fn step_minus_minus(&mut self, cp: u32) {
        if cp == 0x3E {
            self.emit_simple(TokenKind::Cdc, 0);
            return;
        }
        // `--` starts an ident sequence (custom properties).
        self.store.push_value(0x2D);
        self.store.push_value(0x2D);
        self.transition(State::IdentBody);
        self.reprocess(cp);
    }

    fn step_minus_backslash(&mut self, cp: u32) {
        match cp {
            0x0A => self.emit_delim(0x2D, 2),
            EOF_SENTINEL => {
                self.emit_delim(0x2D, 1);
                self.reprocess(EOF_SENTINEL);
            }
            _ if is_hex_digit(cp) => {
                self.store.push_value(0x2D);
                self.begin_hex_escape(cp, State::IdentBody);
            }
            _ => {
                self.store.push_value(0x2D);
                self.store.push_value(cp);
                self.transition(State::IdentBody);
            }
        }
    }

    fn step_dot(&mut self, cp: u32) {
        match cp {
            0x30..=0x39 => {
                self.number_is_float = true;
                self.transition(State::NumberFrac);
            }
            EOF_SENTINEL => {
                self.emit_delim(0x2E, 0);
                self.reprocess(EOF_SENTINEL);
            }
            _ => self.emit_delim(0x2E, 1),
        }
    }

    fn step_number_int(&mut self, cp: u32) {
        match cp {
            0x30..=0x39 => {}
            0x2E => self.transition(State::NumberDot),
            0x45 | 0x65 => self.transition(State::NumberExpMark),
            _ => self.number_boundary(cp),
        }
    }

    fn step_number_dot(&mut self, cp: u32) {
        match cp {
            0x30..=0x39 => {
                self.number_is_float = true;
                self.transition(State::NumberFrac);
            }
            EOF_SENTINEL => {
                self.emit_number(1);
                self.reprocess(EOF_SENTINEL);
            }
            _ => self.emit_number(2),
        }
    }

    fn step_number_frac(&mut self, cp: u32) {
        match cp {
            0x30..=0x39 => {}
            0x45 | 0x65 => self.transition(State::NumberExpMark),
            _ => self.number_boundary(cp),
        }
    }

    fn step_number_exp_mark(&mut self, cp: u32) {
        match cp {
            0x30..=0x39 => {
                self.number_is_float = true;
                self.transition(State::NumberExp);
            }
            0x2B | 0x2D => self.transition(State::NumberExpSign),
            EOF_SENTINEL => {
                self.emit_number(1);
                self.reprocess(EOF_SENTINEL);
            }
            _ => self.emit_number(2),
        }
    }

    fn step_number_exp_sign(&mut self, cp: u32) {
        match cp {
            0x30..=0x39 => {
                self.number_is_float = true;
                self.transition(State::NumberExp);
            }
            EOF_SENTINEL => {
                self.emit_number(2);
                self.reprocess(EOF_SENTINEL);
            }
            _ => self.emit_number(3),
        }
    }

    fn step_number_exp(&mut self, cp: u32) {
        match cp {
            0x30..=0x39 => {}
            _ => self.number_boundary(cp),
        }
    }

    /// Shared post-number dispatch: percentage, dimension unit, or a plain
    /// number followed by something else.
    fn number_boundary(&mut self, cp: u32) {
        match cp {
            0x25 => {
                let value_index = self.commit_number_as_float(1);
                self.emit_percentage(value_index);
            }
            0x2D => self.transition(State::NumberMinus),
            0x5C => self.transition(State::NumberBackslash),
            _ if is_ident_start(cp) => {
                self.commit_number(1);
                self.store.push_value(cp);
                self.transition(State::UnitBody);
            }
            EOF_SENTINEL => {
                self.emit_number(0);
                self.reprocess(EOF_SENTINEL);
            }
            _ => self.emit_number(1),
        }
    }

    fn step_number_minus(&mut self, cp: u32) {
        match cp {
            0x5C => self.transition(State::NumberMinusBackslash),
            _ if is_ident_start(cp) || cp == 0x2D => {
                self.commit_number(2);
                self.store.push_value(0x2D);
                self.store.push_value(cp);
                self.transition(State::UnitBody);
            }
            EOF_SENTINEL => {
                self.emit_number(1);
                self.reprocess(EOF_SENTINEL);
            }
            _ => self.emit_number(2),
        }
    }

    fn step_number_minus_backslash(&mut self, cp: u32) {
        match cp {
            0x0A => self.emit_number(3),
            EOF_SENTINEL => {
                self.emit_number(2);
                self.reprocess(EOF_SENTINEL);
            }
            _ if is_hex_digit(cp) => {
                self.commit_number(3);
                self.store.push_value(0x2D);
                self.begin_hex_escape(cp, State::UnitBody);
            }
            _ => {
                self.commit_number(3);
                self.store.push_value(0x2D);
                self.store.push_value(cp);
                self.transition(State::UnitBody);
            }
        }
    }

    fn step_number_backslash(&mut self, cp: u32) {
        match cp {
            0x0A => self.emit_number(2),
            EOF_SENTINEL => {
                self.emit_number(1);
                self.reprocess(EOF_SENTINEL);
            }
            _ if is_hex_digit(cp) => {
                self.commit_number(2);
                self.begin_hex_escape(cp, State::UnitBody);
            }
            _ => {
                self.commit_number(2);
                self.store.push_value(cp);
                self.transition(State::UnitBody);
            }
        }
    }

    fn step_unit_body(&mut self, cp: u32) {
        match cp {
            _ if is_ident_continue(cp) => self.store.push_value(cp),
            0x5C => self.transition(State::UnitBackslash),
            EOF_SENTINEL => {
                self.emit_dimension(0);
                self.reprocess(EOF_SENTINEL);
            }
            _ => self.emit_dimension(1),
        }
    }

    fn step_unit_backslash(&mut self, cp: u32) {
        match cp {
            0x0A => self.emit_dimension(2),
            EOF_SENTINEL => {
                if !self.parse_error(ParseErrorKind::InvalidEscape, cp) {
                    return;
                }
                self.store.push_value(REPLACEMENT);
                self.emit_dimension(0);
                self.reprocess(EOF_SENTINEL);
            }
            _ if is_hex_digit(cp) => self.begin_hex_escape(cp, State::UnitBody),
            _ => {
                self.store.push_value(cp);
                self.transition(State::UnitBody);
            }
        }
    }

    fn step_url_leading_whitespace(&mut self, cp: u32) {
        match cp {
            0x09 | 0x0A | 0x20 => self.url_whitespace += 1,
            0x22 | 0x27 => {
                // `url(` followed by a string re-reads as FUNCTION "url":
                // close the function right after the parenthesis, surface
                // the skipped whitespace as its own token, and take the
                // quote as a string opener.
                self.emit_function_url_then_string(cp);
            }
            EOF_SENTINEL => {
                self.store.discard_pending_value();
                self.emit_valued(TokenKind::Url, 0);
                self.reprocess(EOF_SENTINEL);
            }
            _ => {
                // A URL literal: the accumulated "url" name is not part of
                // the value.
                self.store.discard_pending_value();
                self.transition(State::UrlBody);
                self.reprocess(cp);
            }
        }
    }

    fn step_url_body(&mut self, cp: u32) {
        match cp {
            0x29 => self.emit_valued(TokenKind::Url, 0),
            0x09 | 0x0A | 0x20 => self.transition(State::UrlTrailingWhitespace),
            0x5C => self.transition(State::UrlBackslash),
            EOF_SENTINEL => {
                self.emit_valued(TokenKind::Url, 0);
                self.reprocess(EOF_SENTINEL);
            }
            0x22 | 0x27 | 0x28 => {
                if !self.parse_error(ParseErrorKind::BadUrl, cp) {
                    return;
                }
                self.transition(State::BadUrlBody);
            }
            _ if is_url_non_printable(cp) => {
                if !self.parse_error(ParseErrorKind::BadUrl, cp) {
                    return;
                }
                self.transition(State::BadUrlBody);
            }
            _ => self.store.push_value(cp),
        }
    }

    fn step_url_backslash(&mut self, cp: u32) {
        match cp {
            0x0A => {
                if !self.parse_error(ParseErrorKind::BadUrl, cp) {
                    return;
                }
                self.transition(State::BadUrlBody);
            }
            EOF_SENTINEL => {
                if !self.parse_error(ParseErrorKind::InvalidEscape, cp) {
                    return;
                }
                self.store.push_value(REPLACEMENT);
                self.emit_valued(TokenKind::Url, 0);
                self.reprocess(EOF_SENTINEL);
            }
            _ if is_hex_digit(cp) => self.begin_hex_escape(cp, State::UrlBody),
            _ => {
                self.store.push_value(cp);
                self.transition(State::UrlBody);
            }
        }
    }

    fn step_url_trailing_whitespace(&mut self, cp: u32) {
        match cp {
            0x09 | 0x0A | 0x20 => {}
            0x29 => self.emit_valued(TokenKind::Url, 0),
            EOF_SENTINEL => {
                self.emit_valued(TokenKind::Url, 0);
                self.reprocess(EOF_SENTINEL);
            }
            _ => {
                if !self.parse_error(ParseErrorKind::BadUrl, cp) {
                    return;
                }
                self.transition(State::BadUrlBody);
            }
        }
    }

    fn step_bad_url_body(&mut self, cp: u32) {
        match cp {
            0x29 => self.emit_valued(TokenKind::BadUrl, 0),
            0x5C => self.transition(State::BadUrlBackslash),
            EOF_SENTINEL => {
                self.emit_valued(TokenKind::BadUrl, 0);
                self.reprocess(EOF_SENTINEL);
            }
            _ => {}
        }
    }

    fn step_bad_url_backslash(&mut self, cp: u32) {
        match cp {
            EOF_SENTINEL => {
                self.emit_valued(TokenKind::BadUrl, 0);
                self.reprocess(EOF_SENTINEL);
            }
            // An escaped `)` does not end the bad url.
            _ => self.transition(State::BadUrlBody),
        }
    }

    fn step_slash(&mut self, cp: u32) {
        match cp {
            0x2A => self.transition(State::CommentBody),
            EOF_SENTINEL => {
                self.emit_delim(0x2F, 0);
                self.reprocess(EOF_SENTINEL);
            }
            _ => self.emit_delim(0x2F, 1),
        }
    }

    fn step_comment_body(&mut self, cp: u32) {
        match cp {
            0x2A => self.transition(State::CommentStar),
            EOF_SENTINEL => {
                if !self.parse_error(ParseErrorKind::UnterminatedComment, cp) {
                    return;
                }
                self.emit_simple(TokenKind::Comment, 0);
                self.reprocess(EOF_SENTINEL);
            }
            _ => {}
        }
    }

    fn step_comment_star(&mut self, cp: u32) {
        match cp {
            0x2F => self.emit_simple(TokenKind::Comment, 0),
            0x2A => {}
            EOF_SENTINEL => {
                if !self.parse_error(ParseErrorKind::UnterminatedComment, cp) {
                    return;
                }
                self.emit_simple(TokenKind::Comment, 0);
                self.reprocess(EOF_SENTINEL);
            }
            _ => self.transition(State::CommentBody),
        }
    }

    fn step_less_than(&mut self, cp: u32) {
        match cp {
            0x21 => self.transition(State::LessThanBang),
            EOF_SENTINEL => {
                self.emit_delim(0x3C, 0);
                self.reprocess(EOF_SENTINEL);
            }
            _ => self.emit_delim(0x3C, 1),
        }
    }

    fn step_less_than_bang(&mut self, cp: u32) {
        match cp {
            0x2D => self.transition(State::LessThanBangDash),
            EOF_SENTINEL => {
                self.emit_delim(0x3C, 1);
                self.reprocess(EOF_SENTINEL);
            }
            _ => self.emit_delim(0x3C, 2),
        }
    }

    fn step_less_than_bang_dash(&mut self, cp: u32) {
        match cp {
            0x2D => self.emit_simple(TokenKind::Cdo, 0),
            EOF_SENTINEL => {
                self.emit_delim(0x3C, 2);
                self.reprocess(EOF_SENTINEL);
            }
            _ => self.emit_delim(0x3C, 3),
        }
    }

    /// `|` lookahead under the legacy flag: `||`, `|=`, or a plain delim.
    fn step_match_lookahead(
        &mut self,
        cp: u32,
        delim: u32,
        double: TokenKind,
        equals: TokenKind,
    ) {
        match cp {
            _ if cp == delim => self.emit_simple(double, 0),
            0x3D => self.emit_simple(equals, 0),
            EOF_SENTINEL => {
                self.emit_delim(delim, 0);
                self.reprocess(EOF_SENTINEL);
            }
            _ => self.emit_delim(delim, 1),
        }
    }

    /// `~` / `^` / `$` / `*` lookahead under the legacy flag.
    fn step_match_equals(&mut self, cp: u32, delim: u32, equals: TokenKind) {
        match cp {
            0x3D => self.emit_simple(equals, 0),
            EOF_SENTINEL => {
                self.emit_delim(delim, 0);
                self.reprocess(EOF_SENTINEL);
            }
            _ => self.emit_delim(delim, 1),
        }
    }

    /// Record a parse error. Returns `true` when tokenization continues
    /// (recover mode) and `false` when the error is fatal.
    fn parse_error(&mut self, kind: ParseErrorKind, cp: u32) -> bool {
        let error = self.build_error(kind, cp);
        self.stats.errors += 1;
        if self.config.recover {
            log::debug!(
                target: "css.tokenizer",
                "recovered parse error: {} at {}",
                error.kind.message(),
                error.diagnostic.position
            );
            self.errors.push(error);
            true
        } else {
            self.fatal = Some(error);
            self.transition(State::Failed);
            false
        }
    }

    fn build_error(&self, kind: ParseErrorKind, cp: u32) -> ParseError {
        const SNIPPET_LIMIT: usize = 60;
        let position = if cp == EOF_SENTINEL {
            self.source.end_position()
        } else {
            self.source.position(self.cursor - 1)
        };
        let token_start = self.store.last_end();
        ParseError {
            kind,
            diagnostic: Diagnostic {
                position,
                context: self.source.context_before(token_start, SNIPPET_LIMIT),
                offense: self.source.region(token_start, self.cursor, SNIPPET_LIMIT),
                spec: kind.spec_url(),
            },
        }
    }
}

/// CSS name-start code point (ASCII letters, `_`, and everything at or
/// above U+0080).
fn is_ident_start(cp: u32) -> bool {
    matches!(cp, 0x41..=0x5A | 0x61..=0x7A | 0x5F) || (0x80..=0x10FFFF).contains(&cp)
}

/// CSS name code point: name-start, digit, or `-`.
fn is_ident_continue(cp: u32) -> bool {
    is_ident_start(cp) || matches!(cp, 0x30..=0x39 | 0x2D)
}

fn is_hex_digit(cp: u32) -> bool {
    matches!(cp, 0x30..=0x39 | 0x41..=0x46 | 0x61..=0x66)
}

fn hex_value(cp: u32) -> u32 {
    match cp {
        0x30..=0x39 => cp - 0x30,
        0x41..=0x46 => cp - 0x41 + 10,
        0x61..=0x66 => cp - 0x61 + 10,
        _ => unreachable!("hex_value called on a non-hex code point"),
    }
}

/// Non-printable code points rejected inside URL literals.
fn is_url_non_printable(cp: u32) -> bool {
    matches!(cp, 0x00..=0x08 | 0x0B | 0x0E..=0x1F | 0x7F)
}

/// ASCII case-insensitive check for the decoded name `url`.
fn is_url_name(value: &[u32]) -> bool {
    match value {
        [u, r, l] => {
            (*u | 0x20) == u32::from(b'u')
                && (*r | 0x20) == u32::from(b'r')
                && (*l | 0x20) == u32::from(b'l')
        }
        _ => false,
    }
}

/// Whether a decoded value would start an ident sequence (the hash token
/// ID/UNRESTRICTED split).
fn decoded_starts_ident_sequence(value: &[u32]) -> bool {
    match value {
        [] => false,
        [first, ..] if is_ident_start(*first) => true,
        [0x2D, second, ..] => is_ident_start(*second) || *second == 0x2D,
        _ => false,
    }
}
