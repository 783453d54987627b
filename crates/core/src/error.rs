//! The top-level error type for document generation.
//!
//! Only fatal conditions surface here. Per-chart, per-cell and branding failures are
//! logged and replaced with visible fallbacks where they happen.

use folio_layout::LayoutError;
use folio_render_lopdf::RenderError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Unsupported document type: '{0}'")]
    UnsupportedDocumentType(String),
    #[error("No report configuration registered for '{0}'")]
    MissingReportConfig(String),
    #[error("Invalid document content: {0}")]
    InvalidContent(String),
    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),
    #[error("Rendering error: {0}")]
    Render(#[from] RenderError),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Configuration error: {0}")]
    Config(String),
}

impl PipelineError {
    /// Whether the error belongs to the request itself rather than the environment.
    pub fn is_request_error(&self) -> bool {
        matches!(
            self,
            PipelineError::UnsupportedDocumentType(_)
                | PipelineError::MissingReportConfig(_)
                | PipelineError::InvalidContent(_)
        )
    }
}
