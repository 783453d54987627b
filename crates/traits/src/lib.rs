pub mod branding;
pub mod raster;
pub mod resource;

pub use branding::{BrandingError, BrandingSource};
pub use raster::{
    AxisTick, ChartError, ChartRasterizer, LegendEntry, PixelRect, RasterChart, RasterKind,
    RasterRequest,
};
pub use resource::{InMemoryResourceProvider, ResourceError, ResourceProvider, SharedResourceData};
