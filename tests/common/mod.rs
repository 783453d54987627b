pub mod fixtures;
pub mod pdf_assertions;

use chrono::NaiveDate;
use folio::{DocumentPipeline, DocumentPipelineBuilder, DocumentSpec, GeneratedDocument, PipelineError};
use lopdf::Document as LopdfDocument;
use serde_json::Value;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Fixed generation date so filenames and footers are stable.
pub fn generation_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 5).unwrap_or_default()
}

/// Wrapper around a generated PDF with helper methods
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
    pub filename: String,
}

impl GeneratedPdf {
    pub fn from_document(document: GeneratedDocument) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&document.bytes)?;
        Ok(Self {
            bytes: document.bytes,
            doc,
            filename: document.filename,
        })
    }

    /// Get the number of pages in the PDF
    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Text of a single 1-based page.
    pub fn page_text(&self, page: u32) -> String {
        self.doc.extract_text(&[page]).unwrap_or_default()
    }

    /// Save PDF to a file for manual debugging
    #[allow(dead_code)]
    pub fn save_for_debug(&self, name: &str) -> std::io::Result<()> {
        std::fs::write(format!("test_output_{}.pdf", name), &self.bytes)
    }
}

/// Runs a JSON document spec through `pipeline`.
pub fn try_generate_with(pipeline: &DocumentPipeline, spec: Value) -> Result<GeneratedDocument, PipelineError> {
    let spec = DocumentSpec::from_value(spec)?;
    pipeline.generate_on(&spec, generation_date())
}

/// Runs a JSON document spec through a default pipeline.
#[allow(dead_code)]
pub fn try_generate(spec: Value) -> Result<GeneratedDocument, PipelineError> {
    let pipeline = DocumentPipelineBuilder::new().build()?;
    try_generate_with(&pipeline, spec)
}

#[allow(dead_code)]
pub fn generate_pdf_with(
    pipeline: &DocumentPipeline,
    spec: Value,
) -> Result<GeneratedPdf, Box<dyn std::error::Error>> {
    GeneratedPdf::from_document(try_generate_with(pipeline, spec)?)
}

/// Generate a PDF from a JSON document spec with the default pipeline
#[allow(dead_code)]
pub fn generate_pdf(spec: Value) -> Result<GeneratedPdf, Box<dyn std::error::Error>> {
    GeneratedPdf::from_document(try_generate(spec)?)
}
