//! Document endpoints
//!
//! - `POST /upload-pdf/` - multipart `file`, returns the extracted text
//! - `POST /upload-excel/` - multipart `file`, returns columns and records
//! - `POST /generate-flowchart/` - form field `steps`, returns a PDF download
//!
//! Parsing and rendering run on the blocking pool.

use std::time::Instant;

use axum::{
    extract::{
        multipart::{Multipart, MultipartRejection},
        rejection::FormRejection,
    },
    response::Response,
    Form, Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::{
    documents::{pdf, spreadsheet, DocumentError, Flowchart},
    error::{AppError, AppResult},
    routes::{attachment, metrics::observe},
};

/// Multipart field carrying the uploaded file
const FILE_FIELD: &str = "file";

/// An uploaded file
#[derive(Debug)]
pub struct Upload {
    pub filename: Option<String>,
    pub bytes: Bytes,
}

/// Extracted PDF text
#[derive(Debug, Serialize, Deserialize)]
pub struct PdfTextResponse {
    pub filename: Option<String>,
    pub pages: usize,
    pub text: String,
}

/// Parsed spreadsheet
#[derive(Debug, Serialize, Deserialize)]
pub struct SpreadsheetResponse {
    pub filename: Option<String>,
    pub columns: Vec<String>,
    pub data: Vec<serde_json::Map<String, serde_json::Value>>,
}

/// Flowchart form
#[derive(Debug, Deserialize)]
pub struct FlowchartForm {
    pub steps: String,
}

/// Pull the `file` field out of a multipart body
async fn read_upload(
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Upload> {
    let mut multipart = multipart.map_err(|e| AppError::rejected(e.status(), e.body_text()))?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::rejected(e.status(), e.body_text()))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field.file_name().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::rejected(e.status(), e.body_text()))?;

        debug!(filename = ?filename, size = bytes.len(), "Received upload");
        return Ok(Upload { filename, bytes });
    }

    Err(AppError::BadRequest(format!(
        "missing multipart field `{}`",
        FILE_FIELD
    )))
}

/// Run CPU-bound document work off the async runtime
async fn blocking<T, F>(work: F) -> AppResult<T>
where
    F: FnOnce() -> Result<T, DocumentError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Document task failed: {}", e)))?
        .map_err(AppError::from)
}

pub async fn upload_pdf(
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<PdfTextResponse>> {
    let start = Instant::now();
    let result = extract_pdf(multipart).await;
    observe("pdf", start, &result);
    result.map(Json)
}

async fn extract_pdf(
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<PdfTextResponse> {
    let upload = read_upload(multipart).await?;
    let bytes = upload.bytes;
    let extracted = blocking(move || pdf::extract_text(&bytes)).await?;

    Ok(PdfTextResponse {
        filename: upload.filename,
        pages: extracted.pages,
        text: extracted.text,
    })
}

pub async fn upload_excel(
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<SpreadsheetResponse>> {
    let start = Instant::now();
    let result = parse_spreadsheet(multipart).await;
    observe("spreadsheet", start, &result);
    result.map(Json)
}

async fn parse_spreadsheet(
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<SpreadsheetResponse> {
    let upload = read_upload(multipart).await?;
    let bytes = upload.bytes;
    let table = blocking(move || spreadsheet::parse_workbook(&bytes)).await?;

    Ok(SpreadsheetResponse {
        filename: upload.filename,
        columns: table.columns,
        data: table.data,
    })
}

pub async fn generate_flowchart(
    form: Result<Form<FlowchartForm>, FormRejection>,
) -> AppResult<Response> {
    let start = Instant::now();
    let result = render_flowchart(form).await;
    observe("flowchart", start, &result);

    let pdf = result?;
    let filename = format!("flowchart-{}.pdf", Uuid::new_v4());
    Ok(attachment("application/pdf", &filename, pdf))
}

async fn render_flowchart(form: Result<Form<FlowchartForm>, FormRejection>) -> AppResult<Vec<u8>> {
    let Form(form) = form.map_err(|e| AppError::rejected(e.status(), e.body_text()))?;
    let flowchart = Flowchart::parse(&form.steps)?;
    debug!(description = %flowchart.description(), "Rendering flowchart");

    blocking(move || flowchart.render_pdf()).await
}
