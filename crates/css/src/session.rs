//! Input adapters: bytes, text, and files.
//!
//! A [`LexSession`] owns a tokenizer together with the streaming UTF-8
//! decoder state (split-sequence carry, leading-BOM skip), so producers can
//! feed raw byte chunks as they arrive. `tokenize` and `tokenize_file` are
//! the one-shot conveniences on top of it.

use std::path::Path;

use tools::utf8::Utf8Decoder;

use crate::syntax::error::ParseError;
use crate::syntax::tokenizer::{CssTokenizer, TokenizerConfig};

/// A tokenizer fed from a byte stream.
pub struct LexSession {
    tokenizer: CssTokenizer,
    decoder: Utf8Decoder,
    scratch: Vec<u32>,
}

impl LexSession {
    pub fn new(config: TokenizerConfig) -> Self {
        Self {
            tokenizer: CssTokenizer::new(config),
            decoder: Utf8Decoder::new(),
            scratch: Vec::new(),
        }
    }

    /// Decode and consume a chunk of UTF-8 bytes.
    pub fn push_bytes(&mut self, bytes: &[u8]) -> Result<(), ParseError> {
        self.scratch.clear();
        self.decoder.push_chunk(bytes, &mut self.scratch);
        self.tokenizer.push_chunk(&self.scratch)
    }

    /// Consume already-decoded text.
    pub fn push_str(&mut self, text: &str) -> Result<(), ParseError> {
        self.tokenizer.push_str(text)
    }

    /// Flush the decoder, signal end of input, and hand back the tokenizer.
    pub fn finish(mut self) -> Result<CssTokenizer, ParseError> {
        self.scratch.clear();
        self.decoder.finish(&mut self.scratch);
        self.tokenizer.push_chunk(&self.scratch)?;
        self.tokenizer.finish()?;
        Ok(self.tokenizer)
    }

    /// The tokenizer mid-stream, for introspection of completed tokens.
    pub fn tokenizer(&self) -> &CssTokenizer {
        &self.tokenizer
    }
}

/// Tokenize a complete string with the default configuration.
pub fn tokenize(input: &str) -> Result<CssTokenizer, ParseError> {
    tokenize_with(TokenizerConfig::default(), input)
}

/// Tokenize a complete string.
pub fn tokenize_with(config: TokenizerConfig, input: &str) -> Result<CssTokenizer, ParseError> {
    let mut tokenizer = CssTokenizer::new(config);
    tokenizer.push_str(input)?;
    tokenizer.finish()?;
    Ok(tokenizer)
}

/// Failure surface of [`tokenize_file`].
#[derive(Debug)]
pub enum SessionError {
    Io(std::io::Error),
    Parse(ParseError),
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::Io(error) => write!(f, "io error: {error}"),
            SessionError::Parse(error) => write!(f, "{error}"),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Io(error) => Some(error),
            SessionError::Parse(error) => Some(error),
        }
    }
}

impl From<std::io::Error> for SessionError {
    fn from(error: std::io::Error) -> Self {
        SessionError::Io(error)
    }
}

impl From<ParseError> for SessionError {
    fn from(error: ParseError) -> Self {
        SessionError::Parse(error)
    }
}

/// Read and tokenize a file, sizing buffers from the file length.
pub fn tokenize_file(path: &Path) -> Result<CssTokenizer, SessionError> {
    tokenize_file_with(TokenizerConfig::default(), path)
}

pub fn tokenize_file_with(
    mut config: TokenizerConfig,
    path: &Path,
) -> Result<CssTokenizer, SessionError> {
    let bytes = std::fs::read(path)?;
    config.size_hint = bytes.len().max(1);
    let mut session = LexSession::new(config);
    session.push_bytes(&bytes)?;
    Ok(session.finish()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::token::TokenKind;

    #[test]
    fn bytes_split_inside_a_code_point_still_tokenize() {
        let mut session = LexSession::new(TokenizerConfig::default());
        let bytes = "a { content: \"é\" }".as_bytes();
        let (head, tail) = bytes.split_at(15);
        session.push_bytes(head).unwrap();
        session.push_bytes(tail).unwrap();
        let tokenizer = session.finish().unwrap();
        let strings: Vec<String> = tokenizer
            .tokens()
            .iter()
            .filter(|t| t.kind() == TokenKind::String)
            .map(|t| t.string_value().unwrap())
            .collect();
        assert_eq!(strings, ["é"]);
    }

    #[test]
    fn leading_bom_is_not_tokenized() {
        let mut session = LexSession::new(TokenizerConfig::default());
        session.push_bytes(b"\xEF\xBB\xBFa").unwrap();
        let tokenizer = session.finish().unwrap();
        let kinds: Vec<TokenKind> = tokenizer.tokens().iter().map(|t| t.kind()).collect();
        assert_eq!(kinds, [TokenKind::Ident]);
    }

    #[test]
    fn tokenize_convenience_matches_session() {
        let via_session = {
            let mut session = LexSession::new(TokenizerConfig::default());
            session.push_bytes(b"#id{}").unwrap();
            session.finish().unwrap()
        };
        let via_str = tokenize("#id{}").unwrap();
        let a: Vec<TokenKind> = via_session.tokens().iter().map(|t| t.kind()).collect();
        let b: Vec<TokenKind> = via_str.tokens().iter().map(|t| t.kind()).collect();
        assert_eq!(a, b);
    }
}
