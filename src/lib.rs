//! # folio
//!
//! Branded, paginated PDF documents (reports, invoices, letters) from JSON document
//! specs. This crate is the facade over the workspace: it re-exports the public types
//! and provides [`DocumentPipeline`], a synchronous entry point that owns the async
//! runtime used for chart rasterization.
//!
//! ```no_run
//! use folio::{DocumentPipelineBuilder, DocumentSpec};
//!
//! # fn main() -> Result<(), folio::PipelineError> {
//! let pipeline = DocumentPipelineBuilder::new().with_asset_dir("assets").build()?;
//! let spec = DocumentSpec::from_json(r#"{"type": "letter", "content": {
//!     "recipient": { "name": "Amina Otieno" },
//!     "body": ["Your lease renews on 1 April."]
//! }}"#)?;
//! let path = pipeline.generate_to_dir(&spec, "out")?;
//! println!("{}", path.display());
//! # Ok(())
//! # }
//! ```

pub mod pipeline;

pub use pipeline::{DocumentPipeline, DocumentPipelineBuilder};

pub use folio_core::{
    document_filename, BrandingProfile, DocumentBody, DocumentEngine, DocumentSpec,
    EngineConfig, GeneratedDocument, InvoiceContent, LetterContent, LineItem, Party,
    PipelineError, ReportCatalog, ReportConfig, ReportContent,
};

pub use folio_branding::{
    BrandingOrigin, BrandingResolver, BrandingSource, JsonFileSource, StaticSource,
    TenantDirectorySource,
};
pub use folio_chart::{ChartOutcome, SkiaRasterizer};
pub use folio_resource::AssetDirectory;
pub use folio_traits::{ChartRasterizer, InMemoryResourceProvider, ResourceProvider};
pub use folio_transform::ReportType;

// Foundation crates for callers building content programmatically.
pub use folio_format as format;
pub use folio_layout as layout;
pub use folio_types as types;
