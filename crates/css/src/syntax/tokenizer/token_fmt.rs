//! Deterministic token formatting for tracing and test snapshots.
//!
//! `describe` is the stable snapshot surface used by golden tests;
//! `trace_line` is the tabular form logged under `Trace::Lexing`.

use lexer_core::SourceBuffer;

use crate::syntax::store::{TokenStore, TokenView};
use crate::syntax::token::{HashFlag, NumericValue, TokenKind};

const TRACE_SNIPPET_LIMIT: usize = 24;

/// One tabular line per emitted token: index, origin, kind, source extract.
pub(crate) fn trace_line(store: &TokenStore, source: &SourceBuffer, index: usize) -> String {
    let start = store.start(index);
    let end = store.end(index);
    let origin = source.position(start);
    let clipped = end.min(start + TRACE_SNIPPET_LIMIT);
    let mut snippet = escape_text(&source.slice_string(start, clipped));
    if end > clipped {
        snippet.push_str("...");
    }
    format!(
        "{index:>5} {:>4}:{:<4} {:<18} {snippet}",
        origin.line,
        origin.column,
        store.kind(index).name(),
    )
}

/// Compact, deterministic description of one token.
pub fn describe(token: &TokenView<'_>) -> String {
    let kind = token.kind();
    match kind {
        TokenKind::Ident
        | TokenKind::Function
        | TokenKind::AtKeyword
        | TokenKind::String
        | TokenKind::Url
        | TokenKind::BadUrl => {
            let value = token.string_value().unwrap_or_default();
            format!("{} \"{}\"", kind.name(), escape_text(&value))
        }
        TokenKind::Hash => {
            let flag = match token.hash_flag() {
                Some(HashFlag::Id) => "ID",
                _ => "UNRESTRICTED",
            };
            let value = token.string_value().unwrap_or_default();
            format!("HASH({flag}) \"{}\"", escape_text(&value))
        }
        TokenKind::Delim => {
            let cp = token.delim_code_point().unwrap_or(0);
            format!("DELIM '{}'", char::from_u32(cp).unwrap_or('\u{FFFD}'))
        }
        TokenKind::Number | TokenKind::Percentage => {
            format!("{} {}", kind.name(), format_numeric(token.numeric_value()))
        }
        TokenKind::Dimension => format!(
            "DIMENSION {} {}",
            format_numeric(token.numeric_value()),
            token.unit().unwrap_or_default()
        ),
        _ => kind.name().to_string(),
    }
}

fn format_numeric(value: Option<NumericValue>) -> String {
    match value {
        // Debug formatting keeps the float/integer split visible: `10`
        // against `10.0`.
        Some(NumericValue::Integer(value)) => value.to_string(),
        Some(NumericValue::Float(value)) => format!("{value:?}"),
        None => "?".to_string(),
    }
}

fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            ch if ch < ' ' || ch == '\u{7f}' => {
                use std::fmt::Write;
                let _ = write!(&mut out, "\\u{{{:02X}}}", ch as u32);
            }
            _ => out.push(ch),
        }
    }
    out
}
