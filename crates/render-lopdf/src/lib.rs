//! PDF output using lopdf.
//!
//! [`PdfWriter`] owns the in-memory document: the shared font and image resources, the
//! page tree and the document info. Pages are drawn with a [`PageCanvas`], which speaks
//! the top-down point coordinates used by layout and flips them into PDF space.

mod canvas;
mod encoding;
mod error;
mod writer;

pub use canvas::{PageCanvas, TextAnchor, TextStyle};
pub use encoding::to_win_ansi;
pub use error::RenderError;
pub use writer::{DocumentInfo, ImageHandle, PdfWriter};
