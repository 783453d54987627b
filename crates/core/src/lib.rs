//! # folio-core
//!
//! The document composition engine.
//!
//! A [`DocumentSpec`] names a document type and carries its content. The
//! [`DocumentEngine`] resolves it (report catalog lookup, data transformation, chart
//! rasterization), then flows its sections across pages with a [`compose::Composer`]
//! and stamps footers once the page count is known:
//!
//! - **document**: request types for reports, invoices and letters
//! - **catalog**: registered report configurations
//! - **compose**: page flow, header band, footers, theme
//! - **sections**: title, KPI grid, charts and the paginated table
//! - **documents**: section sequencing per document type
//! - **engine**: `generate`, the single entry point
//!
//! Sections are emitted strictly in order; the only asynchronous step is chart
//! rasterization, which completes before the first page is drawn.

// Re-export foundation crates
pub use folio_format as format;
pub use folio_layout as layout;
pub use folio_style as style;
pub use folio_traits as traits;
pub use folio_types as types;

pub mod catalog;
pub mod compose;
pub mod config;
pub mod document;
pub mod documents;
pub mod engine;
pub mod error;
pub mod filename;
pub mod sections;

pub use catalog::{ReportCatalog, ReportConfig};
pub use config::EngineConfig;
pub use document::{
    DocumentBody, DocumentSpec, InvoiceContent, LetterContent, LineItem, Party, ReportContent,
};
pub use engine::{DocumentEngine, GeneratedDocument};
pub use error::PipelineError;
pub use filename::document_filename;

pub use folio_style::BrandingProfile;
pub use folio_traits::{
    ChartRasterizer, InMemoryResourceProvider, ResourceError, ResourceProvider,
    SharedResourceData,
};
