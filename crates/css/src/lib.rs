//! Streaming tokenizer for the CSS Syntax Module Level 3 lexical grammar.
//!
//! The tokenizer consumes a stream of Unicode code points and produces a
//! linear sequence of tokens, each annotated with its source range, its
//! source position (line/column), and kind-specific metadata: the
//! escape-decoded string value, the numeric value, the hash and number
//! subtypes, and the dimension unit.
//!
//! ```
//! let tokenizer = css::tokenize("a { color: #fff }").unwrap();
//! for token in tokenizer.tokens().iter() {
//!     println!("{} {}", token.origin(), css::describe(&token));
//! }
//! ```
//!
//! The tokenizer is push-driven and chunk-invariant: feed it byte chunks
//! through [`LexSession`], text chunks through
//! [`CssTokenizer::push_str`], or raw code points through
//! [`CssTokenizer::push_chunk`], in any split, and the token stream comes
//! out the same. Parse errors are fatal in strict mode and accreted in
//! recover mode (the default); see [`TokenizerConfig`].

pub mod session;
pub mod syntax;

pub use session::{LexSession, SessionError, tokenize, tokenize_file, tokenize_with};
pub use syntax::error::{ParseError, ParseErrorKind};
pub use syntax::store::{TokenStore, TokenView, Tokens};
pub use syntax::token::{HashFlag, NumericValue, TokenKind};
pub use syntax::tokenizer::{CssTokenizer, Trace, TokenizerConfig, TokenizerStats, describe};
