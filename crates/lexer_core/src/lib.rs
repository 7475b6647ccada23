//! Generic streaming lexer framework.
//!
//! A lexer built on this crate is push-driven: a producer feeds code points
//! (or text chunks) one at a time and the lexer's state machine reacts to
//! each. This crate owns the pieces that are independent of any particular
//! lexical grammar:
//!
//! - [`SourceBuffer`]: append-only normalized code-point storage with a
//!   per-code-point line/column record and stream preprocessing.
//! - [`SourcePosition`]: 1-based line/column origins.
//! - [`Diagnostic`]: error locations with context/offense snippets and a
//!   specification reference.
//!
//! Invariants:
//! - Stored code points and their positions are written once and never
//!   mutated; indices into the buffer stay valid for the buffer's lifetime.
//! - Position advance is deterministic and depends only on the sequence of
//!   post-normalization code points seen so far.

mod diagnostic;
mod position;
mod source;

pub use diagnostic::Diagnostic;
pub use position::SourcePosition;
pub use source::{EOF_SENTINEL, REPLACEMENT, SourceBuffer};
