// ============================================================
// COLUMN TYPES
// ============================================================
// Named cell sequences with an inferred scalar kind

use serde::{Deserialize, Serialize};

use super::cell::Cell;

/// Inferred kind of a column, derived from its cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    /// At least one number and no text among the non-missing cells.
    Numeric,
    /// At least one non-missing cell that is text.
    Text,
    /// No non-missing cells at all.
    Empty,
}

/// A named, ordered sequence of cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub cells: Vec<Cell>,
}

impl Column {
    pub fn new(name: impl Into<String>, cells: Vec<Cell>) -> Self {
        Self {
            name: name.into(),
            cells,
        }
    }

    /// Infer the column kind from current cell contents.
    pub fn kind(&self) -> ColumnKind {
        let mut has_number = false;
        for cell in &self.cells {
            match cell {
                Cell::Number(_) => has_number = true,
                Cell::Text(_) => return ColumnKind::Text,
                Cell::Missing => {}
            }
        }
        if has_number {
            ColumnKind::Numeric
        } else {
            ColumnKind::Empty
        }
    }

    pub fn is_numeric(&self) -> bool {
        self.kind() == ColumnKind::Numeric
    }

    /// Arithmetic mean of the non-missing numeric values, if any exist.
    pub fn mean(&self) -> Option<f64> {
        let values: Vec<f64> = self.cells.iter().filter_map(|c| c.as_number()).collect();
        if values.is_empty() {
            return None;
        }
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }

    /// Count of missing cells.
    pub fn missing_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_missing()).count()
    }
}
