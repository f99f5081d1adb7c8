// ============================================================
// TABULAR CODECS
// ============================================================
// Format-specific decoding and encoding, dispatched on the declared
// extension (never sniffed from content)

mod csv_codec;
mod xlsx_codec;

pub use csv_codec::CsvCodec;
pub use xlsx_codec::XlsxCodec;

use crate::domain::error::Result;
use crate::domain::table::Table;
use crate::domain::upload::{TableFormat, UploadedFile};

/// Decode an uploaded item into a table based on its declared
/// extension. Fails with `UnsupportedFormat` for anything that is
/// neither csv nor xlsx.
pub fn decode_table(file: &UploadedFile) -> Result<Table> {
    match file.format()? {
        TableFormat::Csv => CsvCodec::new().decode(&file.bytes),
        TableFormat::Xlsx => XlsxCodec::decode(&file.bytes),
    }
}

/// Encode a table into the target format's bytes.
pub fn encode_table(table: &Table, target: TableFormat) -> Result<Vec<u8>> {
    match target {
        TableFormat::Csv => CsvCodec::new().encode(table),
        TableFormat::Xlsx => XlsxCodec::encode(table),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::AppError;

    #[test]
    fn test_decode_dispatches_on_declared_extension() {
        let file = UploadedFile::new("data.csv", b"a,b\n1,2".to_vec());
        let table = decode_table(&file).unwrap();
        assert_eq!(table.column_names(), vec!["a", "b"]);
    }

    #[test]
    fn test_decode_rejects_undeclared_formats() {
        let file = UploadedFile::new("notes.txt", b"a,b\n1,2".to_vec());
        assert!(matches!(
            decode_table(&file),
            Err(AppError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_cross_format_conversion() {
        let file = UploadedFile::new("data.csv", b"a,b\n1,2\n3,4".to_vec());
        let table = decode_table(&file).unwrap();

        let bytes = encode_table(&table, TableFormat::Xlsx).unwrap();
        let back = XlsxCodec::decode(&bytes).unwrap();
        assert_eq!(back.column_names(), vec!["a", "b"]);
        assert_eq!(back.row_count(), 2);
    }
}
