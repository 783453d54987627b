pub mod branding;
pub mod dimension;
pub mod font;

pub use branding::{BrandingProfile, ChartDimensions, KpiStyle, LayoutDensity, LayoutPreferences};
pub use dimension::{Margins, PageSize};
pub use font::StandardFont;
