//! Byte offset to line/column mapping

use super::Span;

/// 1-based line and column; the column counts characters, not bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub const START: Position = Position { line: 1, column: 1 };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceRange {
    pub start: Position,
    pub end: Position,
}

/// Line start table for one document
#[derive(Debug, Clone)]
pub struct LineIndex<'a> {
    source: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    pub fn new(source: &'a str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            source
                .char_indices()
                .filter(|&(_, c)| c == '\n')
                .map(|(i, _)| i + 1),
        );
        Self { source, line_starts }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Position of a byte offset; offsets past the end clamp to the end
    pub fn position(&self, offset: usize) -> Position {
        let offset = offset.min(self.source.len());
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        let line_start = self.line_starts[line];
        let column = self
            .source
            .get(line_start..offset)
            .map_or(offset - line_start, |text| text.chars().count());
        Position {
            line: line + 1,
            column: column + 1,
        }
    }

    pub fn range(&self, span: Span) -> SourceRange {
        SourceRange {
            start: self.position(span.start),
            end: self.position(span.end),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_line() {
        let index = LineIndex::new("let x = 1;");
        assert_eq!(index.position(0), Position::START);
        assert_eq!(index.position(4), Position { line: 1, column: 5 });
    }

    #[test]
    fn test_multiple_lines() {
        let source = "let a = 1;\nlet b = 2;\n\nlet c = 3;";
        let index = LineIndex::new(source);
        assert_eq!(index.line_count(), 4);

        let b = source.find('b').unwrap();
        assert_eq!(index.position(b), Position { line: 2, column: 5 });

        let c = source.find('c').unwrap();
        assert_eq!(index.position(c), Position { line: 4, column: 5 });
    }

    #[test]
    fn test_column_counts_characters() {
        let source = "const s = \"héllo\"; let n = 1;";
        let index = LineIndex::new(source);
        let n = source.find("let n").unwrap() + 4;
        // the two-byte character counts as one column
        assert_eq!(index.position(n).column, n);
    }

    #[test]
    fn test_offset_past_end_clamps() {
        let index = LineIndex::new("ab\ncd");
        assert_eq!(index.position(100), Position { line: 2, column: 3 });
    }

    #[test]
    fn test_range() {
        let index = LineIndex::new("x\nyz");
        let range = index.range(Span::new(2, 4));
        assert_eq!(range.start, Position { line: 2, column: 1 });
        assert_eq!(range.end, Position { line: 2, column: 3 });
    }
}
