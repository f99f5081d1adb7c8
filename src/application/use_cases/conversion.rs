use crate::domain::artifact::DownloadArtifact;
use crate::domain::error::Result;
use crate::domain::table::Table;
use crate::domain::upload::{TableFormat, UploadedFile};
use crate::infrastructure::codec::encode_table;

/// Encode the table's current state into the target format and
/// package it for download. The artifact name is the uploaded file's
/// base name with the target extension.
pub fn convert(file: &UploadedFile, table: &Table, target: TableFormat) -> Result<DownloadArtifact> {
    let bytes = encode_table(table, target)?;
    let file_name = format!("{}.{}", file.base_name(), target.extension());
    Ok(DownloadArtifact::new(file_name, target.mime_type(), bytes))
}
