use actix_cors::Cors;
use actix_web::{dev::Server, get, post, web, App, HttpResponse, HttpServer, Responder};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::application::use_cases::pipeline::{
    CleaningOptions, FileOutcome, FileProcessingPipeline, FileRequest,
};
use crate::domain::upload::{TableFormat, UploadedFile};
use crate::infrastructure::artifact_store::ArtifactStore;
use crate::infrastructure::server_config::ServerConfig;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LogEntry {
    pub time: String,
    pub level: String,
    pub source: String,
    pub message: String,
}

pub struct HttpState {
    pub pipeline: FileProcessingPipeline,
    pub store: Arc<ArtifactStore>,
    pub logs: Arc<Mutex<Vec<LogEntry>>>,
}

impl HttpState {
    pub fn new(config: &ServerConfig) -> Self {
        let store = Arc::new(ArtifactStore::new());
        Self {
            pipeline: FileProcessingPipeline::new(config, store.clone()),
            store,
            logs: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[derive(Deserialize)]
pub struct ProcessRequest {
    pub files: Vec<ProcessFileRequest>,
}

#[derive(Deserialize)]
pub struct ProcessFileRequest {
    pub name: String,
    pub content_base64: String,

    #[serde(default)]
    pub cleaning: CleaningOptions,

    /// Column names to keep; omitted keeps all columns.
    #[serde(default)]
    pub columns: Option<Vec<String>>,

    #[serde(default)]
    pub chart: bool,

    #[serde(default)]
    pub convert_to: Option<TableFormat>,
}

#[derive(Serialize, Deserialize)]
pub struct ProcessResponse {
    pub files: Vec<FileReportResponse>,
}

#[derive(Serialize, Deserialize)]
pub struct FileReportResponse {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<FileOutcome>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[post("/process")]
async fn process_files(
    data: web::Data<HttpState>,
    req: web::Json<ProcessRequest>,
) -> impl Responder {
    add_log(
        &data.logs,
        "INFO",
        "HttpApi",
        &format!("Processing {} uploaded files", req.files.len()),
    );

    let mut reports = Vec::with_capacity(req.files.len());

    for file in &req.files {
        let report = match BASE64.decode(&file.content_base64) {
            Ok(bytes) => {
                let request = FileRequest {
                    file: UploadedFile::new(file.name.clone(), bytes),
                    cleaning: file.cleaning,
                    selected_columns: file.columns.clone(),
                    include_chart: file.chart,
                    convert_to: file.convert_to,
                };
                match data.pipeline.process_file(&request, &data.logs) {
                    Ok(outcome) => FileReportResponse {
                        name: file.name.clone(),
                        outcome: Some(outcome),
                        error: None,
                    },
                    Err(e) => FileReportResponse {
                        name: file.name.clone(),
                        outcome: None,
                        error: Some(e.to_string()),
                    },
                }
            }
            Err(e) => {
                add_log(
                    &data.logs,
                    "ERROR",
                    "HttpApi",
                    &format!("{}: invalid base64 content: {}", file.name, e),
                );
                FileReportResponse {
                    name: file.name.clone(),
                    outcome: None,
                    error: Some(format!("Validation error: invalid base64 content: {}", e)),
                }
            }
        };
        reports.push(report);
    }

    HttpResponse::Ok().json(ProcessResponse { files: reports })
}

#[get("/artifacts/{id}")]
async fn download_artifact(data: web::Data<HttpState>, path: web::Path<String>) -> impl Responder {
    let id = match Uuid::parse_str(&path) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid artifact id"),
    };

    match data.store.get(&id) {
        Some(artifact) => HttpResponse::Ok()
            .content_type(artifact.mime_type.clone())
            .insert_header((
                "Content-Disposition",
                format!("attachment; filename=\"{}\"", artifact.file_name),
            ))
            .body(artifact.bytes),
        None => HttpResponse::NotFound().body(format!("Artifact not found: {}", id)),
    }
}

#[get("/logs")]
async fn get_logs(data: web::Data<HttpState>) -> impl Responder {
    let entries = data.logs.lock().unwrap().clone();
    HttpResponse::Ok().json(entries)
}

pub fn add_log_entry(
    logs: &Mutex<Vec<LogEntry>>,
    level: &str,
    source: &str,
    message: &str,
) -> LogEntry {
    let entry = LogEntry {
        time: Local::now().format("%H:%M:%S").to_string(),
        level: level.to_string(),
        source: source.to_string(),
        message: message.to_string(),
    };
    let mut logs = logs.lock().unwrap();
    logs.push(entry.clone());
    if logs.len() > 100 {
        logs.remove(0);
    }
    entry
}

pub fn add_log(logs: &Mutex<Vec<LogEntry>>, level: &str, source: &str, message: &str) {
    add_log_entry(logs, level, source, message);
}

/// All API routes under one scope, shared by the server and tests.
fn api_scope() -> actix_web::Scope {
    web::scope("/api")
        .service(process_files)
        .service(download_artifact)
        .service(get_logs)
}

pub fn start_server(config: ServerConfig) -> std::io::Result<Server> {
    let state = web::Data::new(HttpState::new(&config));

    let server = HttpServer::new(move || {
        let cors = Cors::permissive(); // Allow all origins for local tool

        App::new()
            .wrap(cors)
            .app_data(state.clone())
            .service(api_scope())
    })
    .bind((config.host.as_str(), config.port))?
    .run();

    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test;

    fn state() -> web::Data<HttpState> {
        web::Data::new(HttpState::new(&ServerConfig::default()))
    }

    fn upload(name: &str, content: &[u8]) -> serde_json::Value {
        serde_json::json!({
            "name": name,
            "content_base64": BASE64.encode(content),
        })
    }

    #[actix_web::test]
    async fn test_process_and_download_round_trip() {
        let app =
            test::init_service(App::new().app_data(state()).service(api_scope())).await;

        let mut file = upload("report.csv", b"a,b\n1,2\n1,2\n3,4");
        file["cleaning"] = serde_json::json!({ "remove_duplicates": true });
        file["convert_to"] = serde_json::json!("xlsx");

        let req = test::TestRequest::post()
            .uri("/api/process")
            .set_json(serde_json::json!({ "files": [file] }))
            .to_request();
        let resp: ProcessResponse = test::call_and_read_body_json(&app, req).await;

        let outcome = resp.files[0].outcome.as_ref().unwrap();
        assert_eq!(outcome.duplicates_removed, Some(1));
        let handle = outcome.artifact.as_ref().unwrap();
        assert_eq!(handle.file_name, "report.xlsx");

        let req = test::TestRequest::get()
            .uri(&format!("/api/artifacts/{}", handle.id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
        assert_eq!(
            resp.headers().get("content-type").unwrap(),
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        );

        let body = test::read_body(resp).await;
        assert_eq!(body.len(), handle.size_bytes);
    }

    #[actix_web::test]
    async fn test_one_bad_file_does_not_sink_the_rest() {
        let app =
            test::init_service(App::new().app_data(state()).service(api_scope())).await;

        let req = test::TestRequest::post()
            .uri("/api/process")
            .set_json(serde_json::json!({
                "files": [upload("notes.txt", b"plain text"), upload("ok.csv", b"a\n1")],
            }))
            .to_request();
        let resp: ProcessResponse = test::call_and_read_body_json(&app, req).await;

        assert!(resp.files[0]
            .error
            .as_ref()
            .unwrap()
            .contains("Unsupported file type"));
        assert!(resp.files[1].outcome.is_some());
    }

    #[actix_web::test]
    async fn test_unknown_artifact_is_404() {
        let app =
            test::init_service(App::new().app_data(state()).service(api_scope())).await;

        let req = test::TestRequest::get()
            .uri(&format!("/api/artifacts/{}", Uuid::new_v4()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_logs_capture_processing() {
        let app =
            test::init_service(App::new().app_data(state()).service(api_scope())).await;

        let req = test::TestRequest::post()
            .uri("/api/process")
            .set_json(serde_json::json!({ "files": [upload("x.csv", b"a\n1")] }))
            .to_request();
        let _: ProcessResponse = test::call_and_read_body_json(&app, req).await;

        let req = test::TestRequest::get().uri("/api/logs").to_request();
        let entries: Vec<LogEntry> = test::call_and_read_body_json(&app, req).await;
        assert!(entries
            .iter()
            .any(|e| e.message.contains("processed successfully")));
    }
}
