//! Flowchart rendering
//!
//! A comma-separated list of steps becomes a top-down diagram description
//! (`graph TD` with the steps chained by `-->`) and is drawn into a PDF: one
//! labelled box per step, connected by arrows, flowing onto further pages when
//! a page fills up.

use lopdf::{
    content::{Content, Operation},
    dictionary, Dictionary, Document, Object, ObjectId, Stream,
};

use super::DocumentError;

const PAGE_WIDTH: f32 = 595.0;
const PAGE_HEIGHT: f32 = 842.0;
const MARGIN: f32 = 60.0;
const BOX_WIDTH: f32 = 320.0;
const BOX_HEIGHT: f32 = 40.0;
const GAP: f32 = 30.0;
const FONT_SIZE: f32 = 12.0;
const ARROW_HEAD: f32 = 6.0;
const MAX_LABEL_CHARS: usize = 48;

/// Ordered steps of a linear flowchart
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flowchart {
    steps: Vec<String>,
}

impl Flowchart {
    /// Split `steps` on commas, dropping blank entries
    pub fn parse(steps: &str) -> Result<Self, DocumentError> {
        let steps: Vec<String> = steps
            .split(',')
            .map(str::trim)
            .filter(|step| !step.is_empty())
            .map(str::to_string)
            .collect();

        if steps.is_empty() {
            return Err(DocumentError::NoSteps);
        }

        Ok(Self { steps })
    }

    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    /// Diagram description in Mermaid flowchart syntax
    pub fn description(&self) -> String {
        format!("graph TD\n    {}", self.steps.join(" --> "))
    }

    fn steps_per_page() -> usize {
        ((PAGE_HEIGHT - 2.0 * MARGIN + GAP) / (BOX_HEIGHT + GAP)) as usize
    }

    /// Draw the flowchart into a standalone PDF document
    pub fn render_pdf(&self) -> Result<Vec<u8>, DocumentError> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });

        let per_page = Self::steps_per_page();
        let chunks: Vec<&[String]> = self.steps.chunks(per_page).collect();
        let last_chunk = chunks.len() - 1;

        let mut kids: Vec<Object> = Vec::with_capacity(chunks.len());
        for (index, chunk) in chunks.iter().enumerate() {
            let content = page_content(chunk, index < last_chunk);
            let content_id = doc.add_object(Stream::new(
                Dictionary::new(),
                content
                    .encode()
                    .map_err(|e| DocumentError::Render(e.to_string()))?,
            ));

            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => dictionary! {
                    "Font" => dictionary! { "F1" => font_id },
                },
            });
            kids.push(page_id.into());
        }

        let page_count = kids.len() as i64;
        let media_box: Vec<Object> = vec![
            Object::Integer(0),
            Object::Integer(0),
            PAGE_WIDTH.into(),
            PAGE_HEIGHT.into(),
        ];
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => page_count,
                "MediaBox" => media_box,
            }),
        );

        let catalog_id: ObjectId = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer)
            .map_err(|e| DocumentError::Render(e.to_string()))?;
        Ok(buffer)
    }
}

/// WinAnsi-safe, length-limited label
fn label(step: &str) -> String {
    let ascii: String = step
        .chars()
        .map(|c| if c.is_ascii() && !c.is_ascii_control() { c } else { '?' })
        .collect();

    if ascii.chars().count() > MAX_LABEL_CHARS {
        let truncated: String = ascii.chars().take(MAX_LABEL_CHARS - 3).collect();
        format!("{}...", truncated)
    } else {
        ascii
    }
}

fn page_content(steps: &[String], continues: bool) -> Content {
    let box_x = (PAGE_WIDTH - BOX_WIDTH) / 2.0;
    let center_x = PAGE_WIDTH / 2.0;
    let mut operations = vec![Operation::new("w", vec![1.0_f32.into()])];

    for (index, step) in steps.iter().enumerate() {
        let top = PAGE_HEIGHT - MARGIN - index as f32 * (BOX_HEIGHT + GAP);
        let bottom = top - BOX_HEIGHT;

        operations.push(Operation::new(
            "re",
            vec![box_x.into(), bottom.into(), BOX_WIDTH.into(), BOX_HEIGHT.into()],
        ));
        operations.push(Operation::new("S", vec![]));

        let text = label(step);
        // Helvetica averages roughly half an em per glyph
        let text_width = text.len() as f32 * FONT_SIZE * 0.5;
        let text_x = center_x - text_width / 2.0;
        let text_y = bottom + (BOX_HEIGHT - FONT_SIZE) / 2.0 + 2.0;

        operations.extend([
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), FONT_SIZE.into()]),
            Operation::new("Td", vec![text_x.into(), text_y.into()]),
            Operation::new("Tj", vec![Object::string_literal(text)]),
            Operation::new("ET", vec![]),
        ]);

        let has_next = index + 1 < steps.len() || continues;
        if has_next {
            arrow(&mut operations, center_x, bottom, bottom - GAP);
        }
    }

    Content { operations }
}

/// Vertical arrow from `from_y` down to `to_y`
fn arrow(operations: &mut Vec<Operation>, x: f32, from_y: f32, to_y: f32) {
    operations.extend([
        Operation::new("m", vec![x.into(), from_y.into()]),
        Operation::new("l", vec![x.into(), (to_y + ARROW_HEAD).into()]),
        Operation::new("S", vec![]),
        Operation::new("m", vec![(x - ARROW_HEAD / 2.0).into(), (to_y + ARROW_HEAD).into()]),
        Operation::new("l", vec![(x + ARROW_HEAD / 2.0).into(), (to_y + ARROW_HEAD).into()]),
        Operation::new("l", vec![x.into(), to_y.into()]),
        Operation::new("f", vec![]),
    ]);
}
