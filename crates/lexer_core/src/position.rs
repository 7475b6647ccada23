//! Line/column positions of stored code points.

/// 1-based line and column of a code point in the normalized source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SourcePosition {
    pub line: u32,
    pub column: u32,
}

impl SourcePosition {
    /// The position of the first code point of any input.
    pub const START: SourcePosition = SourcePosition { line: 1, column: 1 };
}

impl std::fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
