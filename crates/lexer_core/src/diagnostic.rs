//! Diagnostic payloads for lexer errors.

use crate::position::SourcePosition;

/// Where and how a lexer error surfaced.
///
/// `context` holds up to 60 code points preceding the offending region and
/// `offense` up to 60 code points of the region itself, starting at the
/// current token. `spec` is a URL into the governing specification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub position: SourcePosition,
    pub context: String,
    pub offense: String,
    pub spec: &'static str,
}

impl Diagnostic {
    /// Render `message` with location, snippet, offense pointer, and spec
    /// reference:
    ///
    /// ```text
    /// unterminated string at 3:12
    ///   | a { content: "line
    ///   |              ^~~~~
    ///   see https://drafts.csswg.org/css-syntax-3/#consume-string-token
    /// ```
    pub fn render(&self, f: &mut std::fmt::Formatter<'_>, message: &str) -> std::fmt::Result {
        writeln!(f, "{message} at {}", self.position)?;
        let context = sanitize(&self.context);
        let offense = sanitize(&self.offense);
        writeln!(f, "  | {context}{offense}")?;
        write!(f, "  | ")?;
        for _ in context.chars() {
            write!(f, " ")?;
        }
        write!(f, "^")?;
        for _ in offense.chars().skip(1) {
            write!(f, "~")?;
        }
        writeln!(f)?;
        write!(f, "  see {}", self.spec)
    }
}

/// Keep the snippet on one line so the pointer row stays aligned.
fn sanitize(snippet: &str) -> String {
    snippet
        .chars()
        .map(|ch| if ch.is_control() { ' ' } else { ch })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Rendered<'a>(&'a Diagnostic);

    impl std::fmt::Display for Rendered<'_> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            self.0.render(f, "boom")
        }
    }

    #[test]
    fn render_points_at_offense_start() {
        let diagnostic = Diagnostic {
            position: SourcePosition { line: 2, column: 5 },
            context: "a { ".to_string(),
            offense: "\"x".to_string(),
            spec: "https://example.test/#frag",
        };
        let text = Rendered(&diagnostic).to_string();
        assert_eq!(
            text,
            "boom at 2:5\n  | a { \"x\n  |     ^~\n  see https://example.test/#frag"
        );
    }

    #[test]
    fn control_characters_do_not_break_alignment() {
        let diagnostic = Diagnostic {
            position: SourcePosition::START,
            context: "a\nb".to_string(),
            offense: "c".to_string(),
            spec: "https://example.test/",
        };
        let text = Rendered(&diagnostic).to_string();
        assert!(text.contains("a b"));
    }
}
