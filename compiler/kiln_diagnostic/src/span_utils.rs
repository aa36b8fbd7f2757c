//! Line and column lookup for rendering diagnostics.

use kiln_ir::Span;

/// Byte offsets of each line start, for repeated lookups in one source.
#[derive(Clone, Debug, Default)]
pub struct LineOffsetTable {
    offsets: Vec<u32>,
}

impl LineOffsetTable {
    /// Scan `source` once for line starts.
    pub fn build(source: &str) -> Self {
        let mut offsets = vec![0];
        for (i, byte) in source.bytes().enumerate() {
            if byte == b'\n' {
                offsets.push(u32::try_from(i + 1).unwrap_or(u32::MAX));
            }
        }
        LineOffsetTable { offsets }
    }

    /// 1-based `(line, column)` for a byte offset. Columns count bytes.
    pub fn line_col(&self, offset: u32) -> (u32, u32) {
        let line_index = match self.offsets.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert) => insert.saturating_sub(1),
        };
        let line_start = self.offsets.get(line_index).copied().unwrap_or(0);
        let line = u32::try_from(line_index + 1).unwrap_or(u32::MAX);
        (line, offset - line_start + 1)
    }
}

/// Render `path:line:col` for the start of `span`.
pub fn location(path: &str, source: &str, span: Span) -> String {
    let (line, col) = LineOffsetTable::build(source).line_col(span.start);
    format!("{path}:{line}:{col}")
}
