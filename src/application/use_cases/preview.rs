use serde::{Deserialize, Serialize};

use crate::domain::table::{ColumnKind, Table};

/// Column header as shown in a preview: name plus inferred kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewColumn {
    pub name: String,
    pub kind: ColumnKind,
}

/// Display data for the first rows of a table. Purely observational;
/// the renderer is an external collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TablePreview {
    pub columns: Vec<PreviewColumn>,
    /// Row-major display values; `None` marks a missing cell.
    pub rows: Vec<Vec<Option<String>>>,
    pub total_rows: usize,
}

/// Expose the first `limit` rows of the table for display.
pub fn preview(table: &Table, limit: usize) -> TablePreview {
    let columns = table
        .columns()
        .iter()
        .map(|c| PreviewColumn {
            name: c.name.clone(),
            kind: c.kind(),
        })
        .collect();

    let shown = limit.min(table.row_count());
    let rows = (0..shown)
        .map(|index| table.row(index).iter().map(|cell| cell.display()).collect())
        .collect();

    TablePreview {
        columns,
        rows,
        total_rows: table.row_count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::codec::CsvCodec;

    #[test]
    fn test_preview_limits_rows() {
        let table = CsvCodec::new()
            .decode(b"a\n1\n2\n3\n4\n5\n6\n7")
            .unwrap();
        let preview = preview(&table, 5);

        assert_eq!(preview.rows.len(), 5);
        assert_eq!(preview.total_rows, 7);
        assert_eq!(preview.rows[0][0], Some("1".to_string()));
    }

    #[test]
    fn test_preview_marks_missing_cells() {
        let table = CsvCodec::new().decode(b"a,b\nx,\n").unwrap();
        let preview = preview(&table, 5);

        assert_eq!(preview.rows[0][1], None);
        assert_eq!(preview.columns[0].kind, ColumnKind::Text);
    }
}
