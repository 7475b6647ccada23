//! Parse errors for tokenization.

use lexer_core::Diagnostic;

/// Conditions CSS Syntax 3 names as parse errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    /// `\` followed by end of input, or (in hash/ident/at-keyword start
    /// contexts) `\` followed by a line feed.
    InvalidEscape,
    /// A line feed inside a string without a preceding `\`, or end of input
    /// inside a string.
    UnterminatedString,
    /// An unescaped `"`, `'`, `(`, or non-printable code point inside a URL
    /// literal, or content between the URL value and the closing `)`.
    BadUrl,
    /// End of input inside `/* ... */`.
    UnterminatedComment,
}

impl ParseErrorKind {
    pub fn message(self) -> &'static str {
        match self {
            ParseErrorKind::InvalidEscape => "invalid escape",
            ParseErrorKind::UnterminatedString => "unterminated string",
            ParseErrorKind::BadUrl => "bad url",
            ParseErrorKind::UnterminatedComment => "unterminated comment",
        }
    }

    /// Fragment of the CSS Syntax 3 draft that defines the error.
    pub fn spec_url(self) -> &'static str {
        match self {
            ParseErrorKind::InvalidEscape => {
                "https://drafts.csswg.org/css-syntax-3/#consume-escaped-code-point"
            }
            ParseErrorKind::UnterminatedString => {
                "https://drafts.csswg.org/css-syntax-3/#consume-string-token"
            }
            ParseErrorKind::BadUrl => "https://drafts.csswg.org/css-syntax-3/#consume-url-token",
            ParseErrorKind::UnterminatedComment => {
                "https://drafts.csswg.org/css-syntax-3/#consume-comment"
            }
        }
    }
}

/// A parse error with the location where it became evident (which may
/// differ from the start of the offending region) and context/offense
/// snippets into the normalized source.
#[derive(Clone, Debug, PartialEq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub diagnostic: Diagnostic,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.diagnostic.render(f, self.kind.message())
    }
}

impl std::error::Error for ParseError {}
