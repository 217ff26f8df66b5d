//! Document endpoint integration tests
//!
//! - POST /upload-pdf/
//! - POST /upload-excel/
//! - POST /generate-flowchart/

use agent_gateway::{
    documents::{pdf, Flowchart},
    error::ErrorResponse,
    routes::documents::{PdfTextResponse, SpreadsheetResponse},
};
use axum::http::StatusCode;
use bytes::Bytes;
use pretty_assertions::assert_eq;
use rust_xlsxwriter::Workbook;
use serde_json::json;

use crate::common::{multipart_file, server_for, test_config, Credentials, TestApp};

fn two_by_two_workbook() -> Vec<u8> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.write_string(0, 0, "name").unwrap();
    worksheet.write_string(0, 1, "score").unwrap();
    worksheet.write_string(1, 0, "ada").unwrap();
    worksheet.write_number(1, 1, 9.5).unwrap();
    worksheet.write_string(2, 0, "linus").unwrap();
    worksheet.write_number(2, 1, 7.25).unwrap();
    workbook.save_to_buffer().unwrap()
}

#[tokio::test]
async fn test_upload_excel_returns_columns_and_rows() {
    let app = TestApp::spawn(Credentials::Missing).await;
    let (content_type, body) = multipart_file(
        "file",
        "scores.xlsx",
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        &two_by_two_workbook(),
    );

    let response = app
        .server
        .post("/upload-excel/")
        .content_type(&content_type)
        .bytes(Bytes::from(body))
        .await;

    response.assert_status_ok();
    let parsed: SpreadsheetResponse = response.json();
    assert_eq!(parsed.filename.as_deref(), Some("scores.xlsx"));
    assert_eq!(parsed.columns.len(), 2);
    assert_eq!(parsed.columns, vec!["name", "score"]);
    assert_eq!(
        serde_json::to_value(&parsed.data).unwrap(),
        json!([
            { "name": "ada", "score": 9.5 },
            { "name": "linus", "score": 7.25 }
        ])
    );
}

#[tokio::test]
async fn test_upload_excel_rejects_non_spreadsheet() {
    let app = TestApp::spawn(Credentials::Missing).await;
    let (content_type, body) =
        multipart_file("file", "notes.txt", "text/plain", b"just some text");

    let response = app
        .server
        .post("/upload-excel/")
        .content_type(&content_type)
        .bytes(Bytes::from(body))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: ErrorResponse = response.json();
    assert_eq!(body.error.code, "PROCESSING_ERROR");
    assert!(body.error.message.starts_with("Failed to read spreadsheet"));
}

#[tokio::test]
async fn test_upload_pdf_returns_text() {
    let app = TestApp::spawn(Credentials::Missing).await;
    let document = Flowchart::parse("Plan,Build,Ship")
        .unwrap()
        .render_pdf()
        .unwrap();
    let expected = pdf::extract_text(&document).unwrap();

    let (content_type, body) = multipart_file("file", "plan.pdf", "application/pdf", &document);
    let response = app
        .server
        .post("/upload-pdf/")
        .content_type(&content_type)
        .bytes(Bytes::from(body))
        .await;

    response.assert_status_ok();
    let extracted: PdfTextResponse = response.json();
    assert_eq!(extracted.filename.as_deref(), Some("plan.pdf"));
    assert_eq!(extracted.pages, 1);
    assert_eq!(extracted.text, expected.text);
    assert!(extracted.text.contains("Build"));
}

#[tokio::test]
async fn test_upload_over_limit_is_payload_too_large() {
    let mut config = test_config("http://127.0.0.1:1", Credentials::Missing);
    config.max_upload_bytes = 1024;
    let server = server_for(config);
    let (content_type, body) =
        multipart_file("file", "big.pdf", "application/pdf", &vec![b'x'; 8 * 1024]);

    let response = server
        .post("/upload-pdf/")
        .content_type(&content_type)
        .bytes(Bytes::from(body))
        .await;

    assert_eq!(response.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
    let body: ErrorResponse = response.json();
    assert_eq!(body.error.code, "PAYLOAD_TOO_LARGE");
}

#[tokio::test]
async fn test_upload_pdf_rejects_malformed_file() {
    let app = TestApp::spawn(Credentials::Missing).await;
    let (content_type, body) =
        multipart_file("file", "broken.pdf", "application/pdf", b"%PDF-1.4 truncated");

    let response = app
        .server
        .post("/upload-pdf/")
        .content_type(&content_type)
        .bytes(Bytes::from(body))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: ErrorResponse = response.json();
    assert_eq!(body.error.code, "PROCESSING_ERROR");
}

#[tokio::test]
async fn test_upload_without_file_field_is_bad_request() {
    let app = TestApp::spawn(Credentials::Missing).await;
    let (content_type, body) =
        multipart_file("attachment", "plan.pdf", "application/pdf", b"%PDF-1.4");

    let response = app
        .server
        .post("/upload-pdf/")
        .content_type(&content_type)
        .bytes(Bytes::from(body))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: ErrorResponse = response.json();
    assert_eq!(body.error.code, "BAD_REQUEST");
    assert!(body.error.message.contains("`file`"));
}

#[tokio::test]
async fn test_upload_without_multipart_body_is_bad_request() {
    let app = TestApp::spawn(Credentials::Missing).await;

    let response = app
        .server
        .post("/upload-excel/")
        .json(&json!({ "file": "nope" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: ErrorResponse = response.json();
    assert_eq!(body.error.code, "BAD_REQUEST");
}

#[tokio::test]
async fn test_generate_flowchart_returns_pdf_download() {
    let app = TestApp::spawn(Credentials::Missing).await;

    let response = app
        .server
        .post("/generate-flowchart/")
        .form(&[("steps", "A,B,C")])
        .await;

    response.assert_status_ok();
    assert_eq!(response.header("content-type"), "application/pdf");
    let disposition = response.header("content-disposition");
    let disposition = disposition.to_str().unwrap();
    assert!(disposition.starts_with("attachment; filename=\"flowchart-"));
    assert!(disposition.ends_with(".pdf\""));

    let bytes = response.as_bytes();
    assert!(bytes.starts_with(b"%PDF"));
    let text = pdf::extract_text(bytes).unwrap().text;
    for step in ["A", "B", "C"] {
        assert!(text.contains(step));
    }
}

#[tokio::test]
async fn test_generate_flowchart_requires_steps() {
    let app = TestApp::spawn(Credentials::Missing).await;

    let response = app
        .server
        .post("/generate-flowchart/")
        .form(&[("steps", " , ")])
        .await;

    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: ErrorResponse = response.json();
    assert_eq!(body.error.code, "PROCESSING_ERROR");
    assert_eq!(body.error.message, "Flowchart needs at least one step");
}

#[tokio::test]
async fn test_generate_flowchart_missing_field_is_bad_request() {
    let app = TestApp::spawn(Credentials::Missing).await;

    let response = app
        .server
        .post("/generate-flowchart/")
        .form(&[("stages", "A,B")])
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: ErrorResponse = response.json();
    assert_eq!(body.error.code, "BAD_REQUEST");
}
