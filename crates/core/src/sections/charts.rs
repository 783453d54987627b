//! Chart placement. Rasters are embedded as images; titles, axis labels and legends
//! are set as vector text from the metadata returned with each raster.

use crate::compose::{Composer, Theme, NO_DATA_TEXT};
use crate::error::PipelineError;
use folio_chart::{ChartOutcome, RasterChart};
use folio_layout::{char_budget, pack_rows, truncate_chars, PackItem};
use folio_render_lopdf::{ImageHandle, PageCanvas, TextAnchor, TextStyle};
use folio_style::{ChartDimensions, StandardFont};
use folio_types::{ChartSpec, Rect, Size};
use log::warn;

/// Printed points per raster pixel at most. Charts are rasterized at no less than
/// twice their printed size.
pub const POINTS_PER_PIXEL: f32 = 0.5;

const ROW_GAP: f32 = 12.0;
const AXIS_TEXT: f32 = 6.5;
const LEGEND_TEXT: f32 = 7.5;
const SWATCH: f32 = 7.0;

pub const UNAVAILABLE_TEXT: &str = "Chart unavailable";

/// Printed size of a chart's image area on a row `row_width` wide. Large charts take
/// the whole row; the other tiers take half of it less half the gap, so two of them
/// sit side by side. The raster's aspect ratio is kept.
pub fn chart_size(dimensions: ChartDimensions, row_width: f32) -> Size {
    let (w, h) = dimensions.pixel_box();
    let width = match dimensions {
        ChartDimensions::Large => row_width.max(0.0),
        _ => ((row_width - ROW_GAP) / 2.0)
            .max(0.0)
            .min(w as f32 * POINTS_PER_PIXEL),
    };
    Size::new(width, width * h as f32 / w as f32)
}

/// Chart title cut to the width of its block.
fn fit_title(title: &str, width: f32, theme: &Theme) -> String {
    truncate_chars(title, char_budget(width, StandardFont::HelveticaBold, theme.body_size))
}

fn legend_below(spec: &ChartSpec, outcome: &ChartOutcome) -> bool {
    !spec.chart_type.is_circular()
        && outcome
            .raster()
            .map(|raster| !raster.legend.is_empty())
            .unwrap_or(false)
}

struct Block<'s> {
    spec: &'s ChartSpec,
    outcome: &'s ChartOutcome,
    size: Size,
}

impl Block<'_> {
    fn title_height(theme: &Theme) -> f32 {
        theme.line(theme.body_size) + 2.0
    }

    fn height(&self, theme: &Theme) -> f32 {
        let legend = if legend_below(self.spec, self.outcome) {
            theme.line(LEGEND_TEXT) + 2.0
        } else {
            0.0
        };
        Self::title_height(theme) + self.size.height + legend
    }
}

/// The charts section: every chart in order, non-circular neighbours paired on one
/// row when both fit across the page.
pub fn render_charts(
    c: &mut Composer,
    specs: &[ChartSpec],
    outcomes: &[ChartOutcome],
) -> Result<(), PipelineError> {
    let theme = *c.theme();
    let dimensions = c.profile().layout.chart_dimensions;
    let size = chart_size(dimensions, c.width());
    let blocks: Vec<Block> = specs
        .iter()
        .zip(outcomes)
        .map(|(spec, outcome)| Block { spec, outcome, size })
        .collect();

    let first_height = blocks.first().map(|b| b.height(&theme)).unwrap_or(0.0);
    c.heading("Charts", first_height)?;
    if blocks.is_empty() {
        c.notice(NO_DATA_TEXT)?;
        c.gap(theme.section_gap);
        return Ok(());
    }

    let items: Vec<PackItem> = blocks
        .iter()
        .map(|b| PackItem {
            width: b.size.width,
            full_row: b.spec.chart_type.is_circular(),
        })
        .collect();
    for row in pack_rows(&items, c.width(), ROW_GAP) {
        let row_height = row
            .iter()
            .map(|&i| blocks[i].height(&theme))
            .fold(0.0f32, f32::max);
        c.ensure(row_height, false)?;
        let top = c.y();
        let mut x = c.left();
        for i in row {
            draw_block(c, &blocks[i], x, top)?;
            x += blocks[i].size.width + ROW_GAP;
        }
        c.advance(row_height + ROW_GAP);
    }
    c.gap(theme.section_gap - ROW_GAP);
    Ok(())
}

fn draw_block(c: &mut Composer, block: &Block, x: f32, top: f32) -> Result<(), PipelineError> {
    let theme = *c.theme();
    let title = TextStyle::bold(theme.body_size, theme.text);
    let text = fit_title(&block.spec.title, block.size.width, &theme);
    c.canvas().text(&text, x, top, title, TextAnchor::Left);
    let area = Rect::new(
        x,
        top + Block::title_height(&theme),
        block.size.width,
        block.size.height,
    );

    let Some(raster) = block.outcome.raster() else {
        draw_unavailable(c.canvas(), area, &theme);
        return Ok(());
    };
    let handle = match c.add_image(&raster.image) {
        Ok(handle) => handle,
        Err(e) => {
            warn!("Chart '{}' could not be embedded: {}", block.spec.id, e);
            draw_unavailable(c.canvas(), area, &theme);
            return Ok(());
        }
    };
    let circular = block.spec.chart_type.is_circular();
    draw_raster(c.canvas(), &handle, raster, area, circular, &theme);
    if matches!(block.outcome, ChartOutcome::NoData(_)) {
        let style = TextStyle::new(StandardFont::HelveticaOblique, theme.body_size, theme.muted);
        c.canvas().text(
            NO_DATA_TEXT,
            area.x + area.width / 2.0,
            area.y + area.height * 0.62,
            style,
            TextAnchor::Center,
        );
    }
    Ok(())
}

fn draw_raster(
    canvas: &mut PageCanvas,
    handle: &ImageHandle,
    raster: &RasterChart,
    area: Rect,
    circular: bool,
    theme: &Theme,
) {
    canvas.image(handle, area);
    let scale = area.width / raster.width().max(1) as f32;
    let axis = TextStyle::regular(AXIS_TEXT, theme.muted);

    let plot_left = area.x + raster.plot_area.x * scale;
    for tick in &raster.y_ticks {
        let top = area.y + tick.position * scale - AXIS_TEXT / 2.0;
        canvas.text(&tick.label, plot_left - 3.0, top, axis, TextAnchor::Right);
    }
    let plot_bottom = area.y + (raster.plot_area.y + raster.plot_area.height) * scale;
    for label in &raster.x_labels {
        canvas.text(
            &label.label,
            area.x + label.position * scale,
            plot_bottom + 3.0,
            axis,
            TextAnchor::Center,
        );
    }

    if raster.legend.is_empty() {
        return;
    }
    let legend = TextStyle::regular(LEGEND_TEXT, theme.text);
    if circular {
        // A column of entries to the right of the disc.
        let left = area.x + (raster.plot_area.x + raster.plot_area.width) * scale + 16.0;
        let row = legend.size * 1.6;
        let rows = ((area.height - 8.0) / row).floor().max(1.0) as usize;
        let mut y = area.y + (area.height - row * rows.min(raster.legend.len()) as f32) / 2.0;
        for entry in raster.legend.iter().take(rows) {
            canvas.fill_rect(Rect::new(left, y, SWATCH, SWATCH), entry.color);
            let text = match &entry.value {
                Some(value) => format!("{}  {}", entry.label, value),
                None => entry.label.clone(),
            };
            canvas.text(&text, left + SWATCH + 5.0, y - 0.5, legend, TextAnchor::Left);
            y += row;
        }
    } else {
        let mut x = area.x + raster.plot_area.x * scale;
        let y = area.bottom() + 2.0;
        for entry in &raster.legend {
            canvas.fill_rect(Rect::new(x, y, SWATCH, SWATCH), entry.color);
            canvas.text(&entry.label, x + SWATCH + 4.0, y - 0.5, legend, TextAnchor::Left);
            x += SWATCH + 4.0 + legend.width(&entry.label) + 12.0;
            if x > area.right() {
                break;
            }
        }
    }
}

/// Bordered box with a muted icon and caption, drawn in place of a chart that could
/// not be rasterized.
pub fn draw_unavailable(canvas: &mut PageCanvas, area: Rect, theme: &Theme) {
    canvas.fill_rect(area, theme.card_fill);
    canvas.stroke_rect(area, theme.rule, 1.0);

    let icon = theme.muted.tint(0.5);
    let (cx, cy) = (area.x + area.width / 2.0, area.y + area.height * 0.42);
    let r = (area.height * 0.09).clamp(6.0, 14.0);
    canvas.fill_circle((cx, cy), r, icon);
    canvas.fill_rect(Rect::new(cx - r * 0.14, cy - r * 0.6, r * 0.28, r * 0.7), theme.card_fill);
    canvas.fill_circle((cx, cy + r * 0.45), r * 0.15, theme.card_fill);

    let style = TextStyle::new(StandardFont::HelveticaOblique, theme.body_size, theme.muted);
    canvas.text(UNAVAILABLE_TEXT, cx, cy + r + 6.0, style, TextAnchor::Center);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_follow_density_and_row_width() {
        let standard = chart_size(ChartDimensions::Standard, 523.28);
        assert!((standard.width - 255.64).abs() < 0.01);
        assert!((standard.height - standard.width / 2.0).abs() < 0.01);
        assert_eq!(chart_size(ChartDimensions::Compact, 523.28), Size::new(250.0, 125.0));
        assert_eq!(chart_size(ChartDimensions::UltraCompact, 523.28), Size::new(200.0, 100.0));
        let large = chart_size(ChartDimensions::Large, 300.0);
        assert_eq!(large.width, 300.0);
        assert_eq!(large.height, 150.0);
    }

    #[test]
    fn two_charts_share_a_row_below_large() {
        let row = 523.28;
        for dimensions in [
            ChartDimensions::UltraCompact,
            ChartDimensions::Compact,
            ChartDimensions::Standard,
        ] {
            let item = PackItem {
                width: chart_size(dimensions, row).width,
                full_row: false,
            };
            assert_eq!(pack_rows(&[item, item], row, ROW_GAP), vec![vec![0, 1]], "{:?}", dimensions);
        }
        let large = PackItem {
            width: chart_size(ChartDimensions::Large, row).width,
            full_row: false,
        };
        assert_eq!(pack_rows(&[large, large], row, ROW_GAP), vec![vec![0], vec![1]]);
    }

    #[test]
    fn long_titles_are_cut_to_the_block() {
        let theme = Theme::from_profile(&folio_style::BrandingProfile::default());
        let long = "Collections versus invoiced rent by property and month for the quarter";
        let fitted = fit_title(long, 120.0, &theme);
        assert!(fitted.chars().count() < long.chars().count());
        assert!(fitted.ends_with('\u{2026}'));
        assert_eq!(fit_title("Revenue", 120.0, &theme), "Revenue");
    }
}
