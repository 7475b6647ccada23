//! Tokenizer state machine definitions.
//!
//! Each state consumes exactly one code point per step; the CSS Syntax §4.3
//! algorithms' look-ahead is linearized into dedicated states, so a state's
//! name records what has already been consumed. `*Backslash` states sit one
//! code point past a backslash and decide between an escape, a fallback
//! DELIM, and an error.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum State {
    /// Dispatch on the first code point of a new token.
    Initial,
    Whitespace,

    StringBody,
    StringBackslash,

    /// Shared hex-escape accumulator; the continue-after-escape state is
    /// held in the dispatcher's `return_state` field.
    EscapeHex,

    IdentBody,
    IdentBackslash,
    /// `\` seen at top level.
    BackslashInitial,

    /// `#` seen.
    HashStart,
    HashStartBackslash,
    HashBody,
    HashBackslash,

    /// `@` seen.
    AtStart,
    AtMinus,
    AtMinusBackslash,
    AtBackslash,
    AtBody,
    AtBodyBackslash,

    /// `+` seen.
    Plus,
    PlusDot,
    /// `-` seen.
    Minus,
    MinusDot,
    MinusMinus,
    MinusBackslash,
    /// `.` seen.
    Dot,

    NumberInt,
    NumberDot,
    NumberFrac,
    NumberExpMark,
    NumberExpSign,
    NumberExp,
    /// `-` seen after a complete number body (dimension unit candidate).
    NumberMinus,
    NumberMinusBackslash,
    /// `\` seen after a complete number body (dimension unit candidate).
    NumberBackslash,
    UnitBody,
    UnitBackslash,

    /// Inside `url(`, before the first non-whitespace code point.
    UrlLeadingWhitespace,
    UrlBody,
    UrlBackslash,
    UrlTrailingWhitespace,
    /// Recover-mode absorption up to `)` or end of input.
    BadUrlBody,
    BadUrlBackslash,

    /// `/` seen.
    Slash,
    CommentBody,
    CommentStar,

    /// `<` seen.
    LessThan,
    LessThanBang,
    LessThanBangDash,

    // Legacy match-token lookahead (only entered under the legacy flag).
    Pipe,
    Tilde,
    Caret,
    Dollar,
    Asterisk,

    /// End of input acknowledged; no further code points are accepted.
    Done,
    /// A fatal (strict-mode) parse error was raised.
    Failed,
}
