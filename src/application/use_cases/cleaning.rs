// ============================================================
// CLEANING OPERATIONS
// ============================================================
// Duplicate removal and mean-fill of missing numeric cells

use std::collections::HashSet;

use crate::domain::table::{Cell, ColumnKind, Table};

/// Remove rows that are exact duplicates of an earlier row, keeping
/// the first occurrence. Returns how many rows were dropped.
pub fn remove_duplicates(table: &mut Table) -> usize {
    let mut seen = HashSet::new();
    let mask: Vec<bool> = (0..table.row_count())
        .map(|index| seen.insert(table.row_key(index)))
        .collect();

    let removed = mask.iter().filter(|&&keep| !keep).count();
    if removed > 0 {
        table.retain_rows(&mask);
    }
    removed
}

/// Result of a mean-fill pass.
#[derive(Debug, Clone, Default)]
pub struct MeanFillOutcome {
    /// Missing numeric cells replaced with their column mean.
    pub cells_filled: usize,

    /// Columns that had missing cells but no values to average
    /// (all-missing): left untouched.
    pub skipped_columns: Vec<String>,
}

/// Replace missing cells in numeric columns with the column's mean.
///
/// Means are computed for every column before any cell is written, so
/// the fill is simultaneous across columns rather than sequential.
/// Non-numeric columns are never touched; all-missing columns have no
/// mean and are reported back instead of guessed at.
pub fn fill_missing_with_mean(table: &mut Table) -> MeanFillOutcome {
    let means: Vec<Option<f64>> = table
        .columns()
        .iter()
        .map(|column| {
            if column.kind() == ColumnKind::Numeric {
                column.mean()
            } else {
                None
            }
        })
        .collect();

    let mut outcome = MeanFillOutcome::default();

    for (column, mean) in table.columns_mut().iter_mut().zip(means) {
        match mean {
            Some(mean) => {
                for cell in &mut column.cells {
                    if cell.is_missing() {
                        *cell = Cell::Number(mean);
                        outcome.cells_filled += 1;
                    }
                }
            }
            None => {
                if column.kind() == ColumnKind::Empty && !column.cells.is_empty() {
                    outcome.skipped_columns.push(column.name.clone());
                }
            }
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::codec::CsvCodec;

    fn decode(content: &str) -> Table {
        CsvCodec::new().decode(content.as_bytes()).unwrap()
    }

    #[test]
    fn test_remove_duplicates_keeps_first_occurrence() {
        let mut table = decode("a,b\n1,x\n2,y\n1,x\n2,z");
        let removed = remove_duplicates(&mut table);

        assert_eq!(removed, 1);
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.row(0)[0], &Cell::Number(1.0));
        assert_eq!(table.row(2)[1], &Cell::Text("z".to_string()));
    }

    #[test]
    fn test_remove_duplicates_is_idempotent() {
        let mut table = decode("a,b\n1,x\n1,x\n2,y");
        remove_duplicates(&mut table);
        let again = table.clone();
        let removed = remove_duplicates(&mut table);

        assert_eq!(removed, 0);
        assert_eq!(table, again);
    }

    #[test]
    fn test_missing_cells_participate_in_row_identity() {
        let mut table = decode("a,b\n1,\n1,\n1,2");
        let removed = remove_duplicates(&mut table);

        assert_eq!(removed, 1);
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn test_mean_fill_uses_pre_fill_means() {
        let mut table = decode("a,b\n1,\n3,4\n,6");
        let outcome = fill_missing_with_mean(&mut table);

        assert_eq!(outcome.cells_filled, 2);
        // a: mean of {1, 3} = 2; b: mean of {4, 6} = 5
        assert_eq!(table.row(2)[0], &Cell::Number(2.0));
        assert_eq!(table.row(0)[1], &Cell::Number(5.0));
    }

    #[test]
    fn test_mean_fill_skips_text_columns() {
        let mut table = decode("name,score\nAlice,1\n,2");
        let outcome = fill_missing_with_mean(&mut table);

        assert_eq!(outcome.cells_filled, 0);
        assert!(outcome.skipped_columns.is_empty());
        assert_eq!(table.row(1)[0], &Cell::Missing);
    }

    #[test]
    fn test_mean_fill_reports_all_missing_columns() {
        let mut table = decode("a,b\n1,\n2,");
        let outcome = fill_missing_with_mean(&mut table);

        assert_eq!(outcome.cells_filled, 0);
        assert_eq!(outcome.skipped_columns, vec!["b".to_string()]);
        assert_eq!(table.row(0)[1], &Cell::Missing);
    }

    #[test]
    fn test_mean_fill_is_idempotent_once_complete() {
        let mut table = decode("a,b\n1,x\n,y\n3,z");
        fill_missing_with_mean(&mut table);
        let filled = table.clone();
        let outcome = fill_missing_with_mean(&mut table);

        assert_eq!(outcome.cells_filled, 0);
        assert_eq!(table, filled);
    }

    #[test]
    fn test_dedup_then_fill_scenario() {
        // rows (1,_),(_,4),(1,_): dedup drops the third, fill then uses
        // mean{1}=1 for a and mean{4}=4 for b
        let mut table = decode("a,b\n1,\n,4\n1,\n");
        let removed = remove_duplicates(&mut table);
        assert_eq!(removed, 1);

        let outcome = fill_missing_with_mean(&mut table);
        assert_eq!(outcome.cells_filled, 2);

        assert_eq!(table.row(0)[0], &Cell::Number(1.0));
        assert_eq!(table.row(0)[1], &Cell::Number(4.0));
        assert_eq!(table.row(1)[0], &Cell::Number(1.0));
        assert_eq!(table.row(1)[1], &Cell::Number(4.0));
    }
}
