// ============================================================
// CSV CODEC
// ============================================================
// Decode CSV bytes with encoding and delimiter detection; encode
// tables back to comma-separated text

use csv::{ReaderBuilder, Trim, WriterBuilder};

use crate::domain::error::{AppError, Result};
use crate::domain::table::{Cell, Table};

/// CSV reader/writer with delimiter and encoding detection on the
/// decode side. Output is always comma-delimited UTF-8 with a header
/// row and no index column.
pub struct CsvCodec {
    /// Delimiter character used for decoding (default: detected).
    delimiter: Option<u8>,

    /// Whether to trim whitespace from values
    trim: bool,
}

impl Default for CsvCodec {
    fn default() -> Self {
        Self {
            delimiter: None,
            trim: true,
        }
    }
}

impl CsvCodec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Force a fixed decode delimiter instead of detecting one.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    /// Decode raw bytes into a table. The first record is the header
    /// row; ragged data rows are padded with missing cells.
    pub fn decode(&self, bytes: &[u8]) -> Result<Table> {
        let content = Self::decode_text(bytes);
        let delimiter = self
            .delimiter
            .unwrap_or_else(|| Self::detect_delimiter(&content));

        let mut reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .trim(if self.trim { Trim::All } else { Trim::None })
            .flexible(true) // Allow rows with different lengths
            .from_reader(content.as_bytes());

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| AppError::Decode(format!("Failed to read CSV headers: {}", e)))?
            .iter()
            .map(|h| h.to_string())
            .collect();

        if headers.is_empty() {
            return Err(AppError::Decode("CSV input has no header row".to_string()));
        }

        let mut rows = Vec::new();
        for (index, result) in reader.records().enumerate() {
            let record = result.map_err(|e| {
                AppError::Decode(format!("Failed to parse CSV row {}: {}", index + 1, e))
            })?;
            rows.push(record.iter().map(Cell::from_text).collect());
        }

        Ok(Table::from_rows(headers, rows))
    }

    /// Encode a table as comma-separated UTF-8 with a header row.
    pub fn encode(&self, table: &Table) -> Result<Vec<u8>> {
        if table.column_count() == 0 {
            // The csv crate refuses zero-field records; a column-less
            // table encodes to empty output.
            return Ok(Vec::new());
        }

        let mut writer = WriterBuilder::new().from_writer(Vec::new());

        writer
            .write_record(table.column_names())
            .map_err(|e| AppError::Encode(format!("Failed to write CSV header: {}", e)))?;

        for index in 0..table.row_count() {
            let record: Vec<String> = table
                .row(index)
                .iter()
                .map(|cell| cell.display().unwrap_or_default())
                .collect();
            writer
                .write_record(&record)
                .map_err(|e| AppError::Encode(format!("Failed to write CSV row {}: {}", index + 1, e)))?;
        }

        writer
            .into_inner()
            .map_err(|e| AppError::Encode(format!("Failed to flush CSV output: {}", e)))
    }

    /// Decode bytes to text: UTF-8 when valid, Windows-1252 otherwise.
    fn decode_text(bytes: &[u8]) -> String {
        match std::str::from_utf8(bytes) {
            Ok(content) => content.to_string(),
            Err(_) => {
                let (content, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
                content.into_owned()
            }
        }
    }

    /// Detect delimiter from content (comma, semicolon, tab, pipe)
    pub fn detect_delimiter(content: &str) -> u8 {
        let candidates = [b',', b';', b'\t', b'|'];

        let mut best_delimiter = b',';
        let mut best_score = 0.0f32;

        for &delimiter in &candidates {
            let sample_lines: Vec<_> = content.lines().take(10).collect();

            if sample_lines.is_empty() {
                continue;
            }

            let mut field_counts = Vec::new();

            for line in &sample_lines {
                let count = line.chars().filter(|&c| c as u8 == delimiter).count();
                field_counts.push(count);
            }

            // Score by consistency (low standard deviation) and frequency
            if !field_counts.is_empty() {
                let avg = field_counts.iter().sum::<usize>() as f32 / field_counts.len() as f32;
                let variance = field_counts
                    .iter()
                    .map(|&x| (x as f32 - avg).powi(2))
                    .sum::<f32>()
                    / field_counts.len() as f32;

                let score = avg / (1.0 + variance.sqrt());

                if score > best_score {
                    best_score = score;
                    best_delimiter = delimiter;
                }
            }
        }

        best_delimiter
    }
}
