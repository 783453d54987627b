//! Chart rasterization.
//!
//! [`SkiaRasterizer`] draws the plot area of a chart into an RGB image with
//! `tiny-skia`; [`ChartPipeline`] runs any [`ChartRasterizer`] off the async runtime,
//! bounds the wait for it, and turns every failure into a per-chart outcome the
//! document can still render.

mod palette;
mod pipeline;
mod placeholder;
mod scale;
mod skia;

pub use folio_traits::{
    AxisTick, ChartError, ChartRasterizer, LegendEntry, PixelRect, RasterChart, RasterKind,
    RasterRequest,
};
pub use palette::{brand_palette, format_axis_value, is_currency_chart, ACCENT_COLORS};
pub use pipeline::{ChartOutcome, ChartPipeline, DEFAULT_SETTLE_TIMEOUT};
pub use placeholder::no_data_raster;
pub use scale::AxisScale;
pub use skia::SkiaRasterizer;
