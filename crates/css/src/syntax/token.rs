//! CSS token kinds and token-level value types.

/// The complete set of token kinds the tokenizer can store.
///
/// `Comment` is internal: comments are recorded for source coverage but
/// filtered from the token iterator. `BadUrl` is only produced in recover
/// mode. The match kinds (`Column`, `DashMatch`, `IncludeMatch`,
/// `PrefixMatch`, `SubstringMatch`, `SuffixMatch`) are only produced when
/// the legacy-match-tokens flag is set; without it the same input decomposes
/// into `Delim` sequences per current CSS Syntax 3. `UnicodeRange` is part
/// of the legacy enumeration but is never produced: unicode-range is a
/// higher-layer reparse over IDENT/NUMBER/DELIM sequences.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    AtKeyword,
    BadUrl,
    Cdc,
    Cdo,
    Colon,
    Column,
    Comma,
    Comment,
    DashMatch,
    Delim,
    Dimension,
    Function,
    Hash,
    Ident,
    IncludeMatch,
    LeftBrace,
    LeftBracket,
    LeftParenthesis,
    Number,
    Percentage,
    PrefixMatch,
    RightBrace,
    RightBracket,
    RightParenthesis,
    Semicolon,
    String,
    SubstringMatch,
    SuffixMatch,
    UnicodeRange,
    Url,
    Whitespace,
}

impl TokenKind {
    /// Stable display name for logging and test snapshots.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::AtKeyword => "AT_KEYWORD",
            TokenKind::BadUrl => "BAD_URL",
            TokenKind::Cdc => "CDC",
            TokenKind::Cdo => "CDO",
            TokenKind::Colon => "COLON",
            TokenKind::Column => "COLUMN",
            TokenKind::Comma => "COMMA",
            TokenKind::Comment => "COMMENT",
            TokenKind::DashMatch => "DASH_MATCH",
            TokenKind::Delim => "DELIM",
            TokenKind::Dimension => "DIMENSION",
            TokenKind::Function => "FUNCTION",
            TokenKind::Hash => "HASH",
            TokenKind::Ident => "IDENT",
            TokenKind::IncludeMatch => "INCLUDE_MATCH",
            TokenKind::LeftBrace => "LEFT_BRACE",
            TokenKind::LeftBracket => "LEFT_BRACKET",
            TokenKind::LeftParenthesis => "LEFT_PARENTHESIS",
            TokenKind::Number => "NUMBER",
            TokenKind::Percentage => "PERCENTAGE",
            TokenKind::PrefixMatch => "PREFIX_MATCH",
            TokenKind::RightBrace => "RIGHT_BRACE",
            TokenKind::RightBracket => "RIGHT_BRACKET",
            TokenKind::RightParenthesis => "RIGHT_PARENTHESIS",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::String => "STRING",
            TokenKind::SubstringMatch => "SUBSTRING_MATCH",
            TokenKind::SuffixMatch => "SUFFIX_MATCH",
            TokenKind::UnicodeRange => "UNICODE_RANGE",
            TokenKind::Url => "URL",
            TokenKind::Whitespace => "WHITESPACE",
        }
    }

    /// Kinds whose string-value slots hold a decoded value
    /// (the dimension slots hold the unit, exposed separately).
    pub(crate) fn has_string_value(self) -> bool {
        matches!(
            self,
            TokenKind::Ident
                | TokenKind::Function
                | TokenKind::AtKeyword
                | TokenKind::String
                | TokenKind::Url
                | TokenKind::BadUrl
                | TokenKind::Hash
        )
    }
}

/// Hash token subtype.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HashFlag {
    Unrestricted,
    Id,
}

/// Numeric value of a NUMBER, PERCENTAGE, or DIMENSION token.
///
/// The stored value equals the IEEE-754 parse of the token's decimal source;
/// integers are the truncation of that parse.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NumericValue {
    Integer(i64),
    Float(f64),
}

impl NumericValue {
    pub fn is_integer(self) -> bool {
        matches!(self, NumericValue::Integer(_))
    }

    /// The value as an `f64` regardless of subtype.
    pub fn as_f64(self) -> f64 {
        match self {
            NumericValue::Integer(value) => value as f64,
            NumericValue::Float(value) => value,
        }
    }
}
