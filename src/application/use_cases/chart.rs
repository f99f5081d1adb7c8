use serde::{Deserialize, Serialize};

use crate::domain::table::Table;

/// One numeric column prepared for the bar-chart renderer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartSeries {
    pub name: String,
    /// `None` marks a missing cell the renderer should skip.
    pub values: Vec<Option<f64>>,
}

/// Series data for the visualization surface, taken from the first
/// numeric columns of the table's current state. No table mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartData {
    pub series: Vec<ChartSeries>,
}

/// Extract up to `cap` numeric series (the original tool charts two).
/// Tables with fewer numeric columns yield fewer series; none is fine.
pub fn chart_data(table: &Table, cap: usize) -> ChartData {
    let series = table
        .numeric_columns(cap)
        .into_iter()
        .map(|column| ChartSeries {
            name: column.name.clone(),
            values: column.cells.iter().map(|cell| cell.as_number()).collect(),
        })
        .collect();

    ChartData { series }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::codec::CsvCodec;

    #[test]
    fn test_takes_first_two_numeric_columns() {
        let table = CsvCodec::new()
            .decode(b"name,a,b,c\nx,1,2,3\ny,4,5,6")
            .unwrap();
        let chart = chart_data(&table, 2);

        let names: Vec<&str> = chart.series.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(chart.series[0].values, vec![Some(1.0), Some(4.0)]);
    }

    #[test]
    fn test_no_numeric_columns_yields_empty_chart() {
        let table = CsvCodec::new().decode(b"name\nx\ny").unwrap();
        let chart = chart_data(&table, 2);
        assert!(chart.series.is_empty());
    }

    #[test]
    fn test_missing_values_stay_gaps() {
        let table = CsvCodec::new().decode(b"a\n1\n\n3").unwrap();
        let chart = chart_data(&table, 2);
        assert_eq!(chart.series[0].values.len(), table.row_count());
    }
}
