use crate::skia::Surface;
use folio_traits::{ChartError, PixelRect, RasterChart, RasterKind};
use folio_types::Color;

const BACKGROUND: Color = Color::rgb(0xF7, 0xF7, 0xF7);
const BORDER: Color = Color::rgb(0xBD, 0xBD, 0xBD);
const ICON: Color = Color::rgb(0xD0, 0xD0, 0xD0);

/// Neutral image for a chart with nothing to plot: a dashed frame around three muted
/// bars. The caller sets the "no data" caption over it.
pub fn no_data_raster(width: u32, height: u32) -> Result<RasterChart, ChartError> {
    let mut surface = Surface::new(width, height)?;
    let unit = surface.unit();
    let (w, h) = (width as f32, height as f32);

    surface.fill_rect(0.0, 0.0, w, h, BACKGROUND, 255);
    let inset = 2.0 * unit;
    surface.stroke_dashed(
        &[
            (inset, inset),
            (w - inset, inset),
            (w - inset, h - inset),
            (inset, h - inset),
            (inset, inset),
        ],
        BORDER,
        1.5 * unit,
    );

    let bar = 14.0 * unit;
    let base = h * 0.45;
    let left = w / 2.0 - 2.5 * bar;
    for (i, fraction) in [0.5f32, 0.8, 0.35].iter().enumerate() {
        let bar_height = h * 0.2 * fraction;
        let x = left + i as f32 * 2.0 * bar;
        surface.fill_rect(x, base - bar_height, bar, bar_height, ICON, 255);
    }

    Ok(RasterChart {
        image: surface.into_image()?,
        kind: RasterKind::NoData,
        plot_area: PixelRect {
            x: 0.0,
            y: 0.0,
            width: w,
            height: h,
        },
        y_ticks: Vec::new(),
        x_labels: Vec::new(),
        legend: Vec::new(),
    })
}
