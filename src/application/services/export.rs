//! Delimited text export of a (filtered) table.

use std::borrow::Cow;
use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::application::{ApplicationResult, IoResultExt};
use crate::domain::Table;
use crate::infrastructure::traits::FileSystem;

/// Default name of the exported file.
pub const DEFAULT_EXPORT_FILE: &str = "filtered_tree_structure.csv";

/// Render the table as CSV: header row, no index column, `\n` line ends.
pub fn to_csv(table: &Table) -> String {
    let mut out = String::new();
    push_line(&mut out, &table.headers());
    for row in table.rows() {
        push_line(&mut out, &row.cells(table.score_columns()));
    }
    out
}

fn push_line(out: &mut String, cells: &[String]) {
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&escape(cell));
    }
    out.push('\n');
}

/// Quote a cell when it holds a delimiter, quote or line break.
fn escape(cell: &str) -> Cow<'_, str> {
    let needs_quote = cell.contains([',', '"', '\n', '\r']);
    if needs_quote {
        Cow::Owned(format!("\"{}\"", cell.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(cell)
    }
}

/// Service writing CSV exports through the filesystem seam.
pub struct ExportService {
    fs: Arc<dyn FileSystem>,
}

impl ExportService {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Write `table` as UTF-8 CSV to `path`, creating parent directories.
    pub fn export(&self, table: &Table, path: &Path) -> ApplicationResult<()> {
        debug!("export: {} rows to {}", table.len(), path.display());
        self.fs
            .ensure_parent(path)
            .with_path_context("create parent of", path)?;
        self.fs
            .write(path, &to_csv(table))
            .with_path_context("write export", path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_plain_cell_when_escaping_then_unchanged() {
        assert_eq!(escape("abc"), "abc");
    }

    #[test]
    fn given_cell_with_comma_and_quote_when_escaping_then_quoted() {
        assert_eq!(escape(r#"a,"b""#), r#""a,""b""""#);
    }

    #[test]
    fn given_cell_with_newline_when_escaping_then_quoted() {
        assert_eq!(escape("a\nb"), "\"a\nb\"");
    }
}
