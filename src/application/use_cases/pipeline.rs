// ============================================================
// FILE PROCESSING PIPELINE
// ============================================================
// Per-item orchestration: decode, preview, clean, select, chart,
// convert, offer download

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::use_cases::chart::{chart_data, ChartData};
use crate::application::use_cases::cleaning::{fill_missing_with_mean, remove_duplicates};
use crate::application::use_cases::conversion::convert;
use crate::application::use_cases::preview::{preview, TablePreview};
use crate::domain::error::Result;
use crate::domain::upload::{TableFormat, UploadedFile};
use crate::infrastructure::artifact_store::ArtifactStore;
use crate::infrastructure::codec::decode_table;
use crate::infrastructure::server_config::ServerConfig;
use crate::interfaces::http::{add_log, LogEntry};

/// User-triggered cleaning toggles. An operation is applied only when
/// explicitly requested.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct CleaningOptions {
    #[serde(default)]
    pub remove_duplicates: bool,

    #[serde(default)]
    pub fill_missing: bool,
}

/// Everything the session asked for on one uploaded item.
#[derive(Debug, Clone)]
pub struct FileRequest {
    pub file: UploadedFile,
    pub cleaning: CleaningOptions,

    /// Column names to keep; `None` keeps all columns.
    pub selected_columns: Option<Vec<String>>,

    pub include_chart: bool,

    /// Conversion target; `None` skips conversion and download.
    pub convert_to: Option<TableFormat>,
}

/// Reference to a stored artifact, returned in place of the bytes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactHandle {
    pub id: Uuid,
    pub file_name: String,
    pub mime_type: String,
    pub size_bytes: usize,
}

/// What one successfully processed item produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileOutcome {
    /// Head of the table as decoded, before any cleaning.
    pub preview: TablePreview,

    /// Column names after cleaning and selection.
    pub columns: Vec<String>,

    pub duplicates_removed: Option<usize>,
    pub cells_filled: Option<usize>,
    pub chart: Option<ChartData>,
    pub artifact: Option<ArtifactHandle>,
}

/// Per-item result; an error here never affects sibling items.
#[derive(Debug, Clone)]
pub struct FileReport {
    pub file_name: String,
    pub result: Result<FileOutcome>,
}

/// The pipeline itself. Stateless between interactions: every call
/// recomputes from each item's raw bytes, so no intermediate table
/// state can go stale.
pub struct FileProcessingPipeline {
    preview_rows: usize,
    chart_columns: usize,
    store: Arc<ArtifactStore>,
}

impl FileProcessingPipeline {
    pub fn new(config: &ServerConfig, store: Arc<ArtifactStore>) -> Self {
        Self {
            preview_rows: config.preview_rows,
            chart_columns: config.chart_columns,
            store,
        }
    }

    /// Run the full pipeline over every item. Items are independent;
    /// one failure is recorded in its report and the rest proceed.
    pub fn process_all(
        &self,
        requests: &[FileRequest],
        logs: &Arc<Mutex<Vec<LogEntry>>>,
    ) -> Vec<FileReport> {
        requests
            .iter()
            .map(|request| FileReport {
                file_name: request.file.name.clone(),
                result: self.process_file(request, logs),
            })
            .collect()
    }

    /// Run the full pipeline over a single item.
    pub fn process_file(
        &self,
        request: &FileRequest,
        logs: &Arc<Mutex<Vec<LogEntry>>>,
    ) -> Result<FileOutcome> {
        let name = &request.file.name;
        tracing::info!(file = %name, "processing uploaded file");

        let mut table = decode_table(&request.file).map_err(|e| {
            add_log(logs, "ERROR", "Pipeline", &format!("{}: {}", name, e));
            e
        })?;

        // Preview reflects the table as uploaded, before cleaning.
        let table_preview = preview(&table, self.preview_rows);

        let duplicates_removed = if request.cleaning.remove_duplicates {
            let removed = remove_duplicates(&mut table);
            add_log(
                logs,
                "INFO",
                "Pipeline",
                &format!("{}: removed {} duplicate rows", name, removed),
            );
            Some(removed)
        } else {
            None
        };

        let cells_filled = if request.cleaning.fill_missing {
            let outcome = fill_missing_with_mean(&mut table);
            for column in &outcome.skipped_columns {
                tracing::warn!(file = %name, column = %column, "column has no values to average");
                add_log(
                    logs,
                    "WARN",
                    "Pipeline",
                    &format!(
                        "{}: column '{}' has no values to average; left as-is",
                        name, column
                    ),
                );
            }
            add_log(
                logs,
                "INFO",
                "Pipeline",
                &format!("{}: filled {} missing cells", name, outcome.cells_filled),
            );
            Some(outcome.cells_filled)
        } else {
            None
        };

        if let Some(names) = &request.selected_columns {
            table = table.select_columns(names).map_err(|e| {
                add_log(logs, "ERROR", "Pipeline", &format!("{}: {}", name, e));
                e
            })?;
        }

        let chart = request
            .include_chart
            .then(|| chart_data(&table, self.chart_columns));

        let artifact = match request.convert_to {
            Some(target) => {
                let artifact = convert(&request.file, &table, target).map_err(|e| {
                    add_log(logs, "ERROR", "Pipeline", &format!("{}: {}", name, e));
                    e
                })?;

                let handle = ArtifactHandle {
                    file_name: artifact.file_name.clone(),
                    mime_type: artifact.mime_type.clone(),
                    size_bytes: artifact.size_bytes(),
                    id: self.store.insert(artifact),
                };
                add_log(
                    logs,
                    "INFO",
                    "Pipeline",
                    &format!("{}: converted to {}", name, handle.file_name),
                );
                Some(handle)
            }
            None => None,
        };

        add_log(
            logs,
            "INFO",
            "Pipeline",
            &format!("{} processed successfully", name),
        );

        Ok(FileOutcome {
            preview: table_preview,
            columns: table.column_names().iter().map(|s| s.to_string()).collect(),
            duplicates_removed,
            cells_filled,
            chart,
            artifact,
        })
    }
}
