// ============================================================
// XLSX CODEC
// ============================================================
// Read workbooks through calamine, write them through rust_xlsxwriter

use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};
use rust_xlsxwriter::Workbook;

use crate::domain::error::{AppError, Result};
use crate::domain::table::{Cell, Table};

pub struct XlsxCodec;

impl XlsxCodec {
    /// Decode workbook bytes into a table. The first worksheet is
    /// used; its first row is the header row.
    pub fn decode(bytes: &[u8]) -> Result<Table> {
        let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))
            .map_err(|e| AppError::Decode(format!("Failed to open workbook: {}", e)))?;

        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| AppError::Decode("Workbook has no worksheets".to_string()))?
            .map_err(|e| AppError::Decode(format!("Failed to read worksheet: {}", e)))?;

        let mut rows = range.rows();

        let headers: Vec<String> = match rows.next() {
            Some(header_row) => header_row.iter().map(Self::header_text).collect(),
            None => return Ok(Table::from_rows(Vec::new(), Vec::new())),
        };

        let data: Vec<Vec<Cell>> = rows
            .map(|row| row.iter().map(Self::data_to_cell).collect())
            .collect();

        Ok(Table::from_rows(headers, data))
    }

    /// Encode a table as a single-sheet workbook with one header row
    /// and no index column.
    pub fn encode(table: &Table) -> Result<Vec<u8>> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();

        for (c, column) in table.columns().iter().enumerate() {
            let col = c as u16;
            worksheet
                .write_string(0, col, column.name.as_str())
                .map_err(|e| AppError::Encode(format!("Failed to write header: {}", e)))?;

            for (r, cell) in column.cells.iter().enumerate() {
                let row = (r + 1) as u32;
                match cell {
                    Cell::Number(n) => {
                        worksheet
                            .write_number(row, col, *n)
                            .map_err(|e| AppError::Encode(format!("Failed to write cell: {}", e)))?;
                    }
                    Cell::Text(s) => {
                        worksheet
                            .write_string(row, col, s.as_str())
                            .map_err(|e| AppError::Encode(format!("Failed to write cell: {}", e)))?;
                    }
                    // Missing cells stay blank
                    Cell::Missing => {}
                }
            }
        }

        workbook
            .save_to_buffer()
            .map_err(|e| AppError::Encode(format!("Failed to serialize workbook: {}", e)))
    }

    fn data_to_cell(data: &Data) -> Cell {
        match data {
            Data::Empty => Cell::Missing,
            Data::Float(f) => Cell::Number(*f),
            Data::Int(i) => Cell::Number(*i as f64),
            Data::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    Cell::Missing
                } else {
                    Cell::Text(trimmed.to_string())
                }
            }
            Data::Bool(b) => Cell::Text(b.to_string()),
            Data::DateTime(dt) => Cell::Number(dt.as_f64()),
            Data::DateTimeIso(s) => Cell::Text(s.clone()),
            Data::DurationIso(s) => Cell::Text(s.clone()),
            // Formula errors carry no usable value
            Data::Error(_) => Cell::Missing,
        }
    }

    fn header_text(data: &Data) -> String {
        match data {
            Data::String(s) => s.trim().to_string(),
            Data::Empty | Data::Error(_) => String::new(),
            other => format!("{}", other),
        }
    }
}
