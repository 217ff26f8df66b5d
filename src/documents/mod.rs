//! Local document processing
//!
//! PDF text extraction, spreadsheet parsing and flowchart rendering. These run
//! entirely in-process and are CPU bound, so callers should move them onto a
//! blocking thread.

pub mod flowchart;
pub mod pdf;
pub mod spreadsheet;

use thiserror::Error;

pub use flowchart::Flowchart;
pub use pdf::ExtractedText;
pub use spreadsheet::Table;

/// Failures while reading or producing a document
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Failed to read PDF: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("Failed to read spreadsheet: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("Spreadsheet contains no worksheets")]
    NoWorksheet,

    #[error("Flowchart needs at least one step")]
    NoSteps,

    #[error("Failed to render PDF: {0}")]
    Render(String),
}
