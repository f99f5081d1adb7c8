// ============================================================
// CELL TYPES
// ============================================================
// Type-tagged scalar values making up a table

use serde::{Deserialize, Serialize};

/// A single cell value with an explicit type tag.
///
/// `Missing` is distinct from zero and from empty text: it is the
/// absence of a value, and the only state mean-fill ever replaces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Cell {
    Number(f64),
    Text(String),
    Missing,
}

impl Cell {
    /// Build a cell from raw text, inferring the scalar type.
    ///
    /// Whitespace-only input is missing; anything that parses as a
    /// finite float is a number; everything else stays text.
    pub fn from_text(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Cell::Missing;
        }
        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() => Cell::Number(n),
            _ => Cell::Text(trimmed.to_string()),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Render the cell for display or CSV output. Missing cells have
    /// no rendering.
    pub fn display(&self) -> Option<String> {
        match self {
            Cell::Number(n) => Some(format!("{}", n)),
            Cell::Text(s) => Some(s.clone()),
            Cell::Missing => None,
        }
    }

    /// Hashable identity used for exact-duplicate row detection.
    /// Numbers compare by bit pattern so equal floats collapse.
    pub fn key(&self) -> CellKey {
        match self {
            Cell::Number(n) => CellKey::Number(n.to_bits()),
            Cell::Text(s) => CellKey::Text(s.clone()),
            Cell::Missing => CellKey::Missing,
        }
    }
}

/// Owned, hashable form of a cell used as a row-identity component.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CellKey {
    Number(u64),
    Text(String),
    Missing,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text_infers_types() {
        assert_eq!(Cell::from_text("42"), Cell::Number(42.0));
        assert_eq!(Cell::from_text(" 3.5 "), Cell::Number(3.5));
        assert_eq!(Cell::from_text("hello"), Cell::Text("hello".to_string()));
        assert_eq!(Cell::from_text(""), Cell::Missing);
        assert_eq!(Cell::from_text("   "), Cell::Missing);
    }

    #[test]
    fn test_non_finite_stays_text() {
        assert_eq!(Cell::from_text("NaN"), Cell::Text("NaN".to_string()));
        assert_eq!(Cell::from_text("inf"), Cell::Text("inf".to_string()));
    }

    #[test]
    fn test_display_round_trips_integers() {
        assert_eq!(Cell::Number(1.0).display().unwrap(), "1");
        assert_eq!(Cell::Number(1.5).display().unwrap(), "1.5");
        assert_eq!(Cell::Missing.display(), None);
    }

    #[test]
    fn test_key_equality() {
        assert_eq!(Cell::Number(1.0).key(), Cell::from_text("1").key());
        assert_ne!(Cell::Number(1.0).key(), Cell::Text("1".to_string()).key());
    }
}
