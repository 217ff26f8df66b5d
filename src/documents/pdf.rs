//! Text extraction from uploaded PDFs

use lopdf::Document;
use serde::Serialize;
use tracing::debug;

use super::DocumentError;

/// Text of every page, in page order
#[derive(Debug, Clone, Serialize)]
pub struct ExtractedText {
    pub pages: usize,
    pub text: String,
}

pub fn extract_text(bytes: &[u8]) -> Result<ExtractedText, DocumentError> {
    let document = Document::load_mem(bytes)?;

    let page_numbers: Vec<u32> = document.get_pages().keys().copied().collect();
    let mut text = String::new();
    for page in &page_numbers {
        let page_text = document.extract_text(&[*page])?;
        text.push_str(page_text.trim_end());
        text.push('\n');
    }

    debug!(pages = page_numbers.len(), chars = text.len(), "Extracted PDF text");

    Ok(ExtractedText {
        pages: page_numbers.len(),
        text: text.trim_end().to_string(),
    })
}
