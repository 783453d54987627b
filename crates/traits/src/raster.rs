//! The capability interface a chart drawing backend implements.
//!
//! A rasterizer turns one `ChartSpec` into a pixel image of the plot area. Text
//! (titles, tick labels, legend) is returned as metadata so the document renderer can
//! set it as crisp vector text next to the embedded image.

use folio_format::Formatter;
use folio_types::{ChartSpec, Color};
use image::RgbImage;
use std::fmt::Debug;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    #[error("Chart '{id}' cannot be drawn: {message}")]
    InvalidSpec { id: String, message: String },

    #[error("Could not allocate a {width}x{height} drawing surface")]
    Surface { width: u32, height: u32 },

    #[error("Chart '{0}' did not finish within {1} ms")]
    Timeout(String, u64),

    #[error("Chart worker failed: {0}")]
    Worker(String),
}

/// What the rasterizer is asked to produce.
#[derive(Debug, Clone)]
pub struct RasterRequest {
    pub width: u32,
    pub height: u32,
    /// Series colors, assigned round-robin.
    pub palette: Vec<Color>,
    pub formatter: Formatter,
}

impl RasterRequest {
    pub fn new(width: u32, height: u32, palette: Vec<Color>, formatter: Formatter) -> Self {
        Self {
            width,
            height,
            palette,
            formatter,
        }
    }

    /// Color of the `index`-th series.
    pub fn series_color(&self, index: usize) -> Color {
        if self.palette.is_empty() {
            return Color::gray(0x60);
        }
        self.palette[index % self.palette.len()]
    }
}

/// Plot rectangle inside the image, in pixels from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PixelRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// A labelled position along an axis, in pixels from the image's top (y axis) or
/// left (x axis).
#[derive(Debug, Clone, PartialEq)]
pub struct AxisTick {
    pub position: f32,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub color: Color,
    /// Formatted share or total, shown next to circular chart slices.
    pub value: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RasterKind {
    Chart,
    /// The chart carried no usable data; the image is a neutral placeholder.
    NoData,
}

#[derive(Debug, Clone)]
pub struct RasterChart {
    pub image: RgbImage,
    pub kind: RasterKind,
    pub plot_area: PixelRect,
    pub y_ticks: Vec<AxisTick>,
    pub x_labels: Vec<AxisTick>,
    pub legend: Vec<LegendEntry>,
}

impl RasterChart {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

pub trait ChartRasterizer: Send + Sync + Debug {
    /// Draws `spec` synchronously. Implementations must be deterministic: the same spec
    /// and request always yield the same pixels.
    fn render(&self, spec: &ChartSpec, request: &RasterRequest) -> Result<RasterChart, ChartError>;

    fn name(&self) -> &'static str;
}
