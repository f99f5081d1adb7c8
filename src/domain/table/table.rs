// ============================================================
// TABLE
// ============================================================
// Column-ordered in-memory table, the pipeline's working structure

use serde::{Deserialize, Serialize};

use super::cell::{Cell, CellKey};
use super::column::Column;
use crate::domain::error::{AppError, Result};

/// Ordered collection of named columns, all the same length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<Column>,
    rows: usize,
}

impl Table {
    /// Build a table from columns, which must all have equal length.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let rows = columns.first().map(|c| c.cells.len()).unwrap_or(0);
        for column in &columns {
            if column.cells.len() != rows {
                return Err(AppError::ValidationError(format!(
                    "Column '{}' has {} cells, expected {}",
                    column.name,
                    column.cells.len(),
                    rows
                )));
            }
        }
        Ok(Self { columns, rows })
    }

    /// Build a table from a header row and cell rows. Ragged rows are
    /// padded with missing cells; extra cells beyond the header are
    /// dropped.
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        let width = headers.len();
        let mut columns: Vec<Column> = headers
            .into_iter()
            .map(|name| Column::new(name, Vec::with_capacity(rows.len())))
            .collect();

        for mut row in rows {
            row.resize(width, Cell::Missing);
            for (column, cell) in columns.iter_mut().zip(row) {
                column.cells.push(cell);
            }
        }

        let row_count = columns.first().map(|c| c.cells.len()).unwrap_or(0);
        Self {
            columns,
            rows: row_count,
        }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn columns_mut(&mut self) -> &mut [Column] {
        &mut self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// One row as a slice of cell references, in column order.
    pub fn row(&self, index: usize) -> Vec<&Cell> {
        self.columns.iter().map(|c| &c.cells[index]).collect()
    }

    /// Hashable identity of a row, used for exact-duplicate detection.
    pub fn row_key(&self, index: usize) -> Vec<CellKey> {
        self.columns.iter().map(|c| c.cells[index].key()).collect()
    }

    /// Keep only the rows where `mask` is true. The mask length must
    /// match the row count.
    pub fn retain_rows(&mut self, mask: &[bool]) {
        debug_assert_eq!(mask.len(), self.rows);
        for column in &mut self.columns {
            let mut idx = 0;
            column.cells.retain(|_| {
                let keep = mask[idx];
                idx += 1;
                keep
            });
        }
        self.rows = mask.iter().filter(|&&k| k).count();
    }

    /// Narrow the table to the chosen column names, preserving the
    /// original relative order. Every requested name must exist.
    pub fn select_columns(&self, names: &[String]) -> Result<Table> {
        for name in names {
            if !self.columns.iter().any(|c| &c.name == name) {
                return Err(AppError::Selection(format!(
                    "Unknown column '{}'; available: {}",
                    name,
                    self.column_names().join(", ")
                )));
            }
        }

        let columns: Vec<Column> = self
            .columns
            .iter()
            .filter(|c| names.contains(&c.name))
            .cloned()
            .collect();

        Ok(Table {
            columns,
            rows: self.rows,
        })
    }

    /// The first columns of numeric kind, up to `cap`.
    pub fn numeric_columns(&self, cap: usize) -> Vec<&Column> {
        self.columns
            .iter()
            .filter(|c| c.is_numeric())
            .take(cap)
            .collect()
    }
}
