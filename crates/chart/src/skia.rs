//! Plot drawing on a `tiny-skia` pixmap.
//!
//! Geometry is laid out for a 600px wide reference surface and scaled by `unit`, so
//! every density tier produces the same picture at a different resolution.

use crate::palette::{format_axis_value, is_currency_chart};
use crate::placeholder::no_data_raster;
use crate::scale::AxisScale;
use folio_traits::{
    AxisTick, ChartError, ChartRasterizer, LegendEntry, PixelRect, RasterChart, RasterKind,
    RasterRequest,
};
use folio_types::{ChartSpec, ChartType, Color, Dataset};
use image::RgbImage;
use std::f32::consts::{FRAC_PI_2, TAU};
use tiny_skia::{FillRule, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Rect, Stroke, Transform};

const MIN_EDGE: u32 = 64;
const MAX_X_LABELS: usize = 12;
const Y_TICKS: usize = 5;
const GRID: Color = Color::rgb(0xE6, 0xE6, 0xE6);
const AXIS: Color = Color::rgb(0x9E, 0x9E, 0x9E);

#[derive(Debug, Default, Clone, Copy)]
pub struct SkiaRasterizer;

impl SkiaRasterizer {
    pub fn new() -> Self {
        Self
    }
}

impl ChartRasterizer for SkiaRasterizer {
    fn render(&self, spec: &ChartSpec, request: &RasterRequest) -> Result<RasterChart, ChartError> {
        if request.width < MIN_EDGE || request.height < MIN_EDGE {
            return Err(ChartError::InvalidSpec {
                id: spec.id.to_string(),
                message: format!(
                    "{}x{} is below the {}px minimum",
                    request.width, request.height, MIN_EDGE
                ),
            });
        }
        if spec.has_no_data() {
            return no_data_raster(request.width, request.height);
        }
        let datasets = spec.datasets();
        if spec.chart_type.is_circular() {
            draw_circular(spec, &datasets, request)
        } else {
            draw_cartesian(spec, &datasets, request)
        }
    }

    fn name(&self) -> &'static str {
        "tiny-skia"
    }
}

pub(crate) struct Surface {
    pixmap: Pixmap,
    unit: f32,
}

impl Surface {
    pub(crate) fn new(width: u32, height: u32) -> Result<Self, ChartError> {
        let mut pixmap = Pixmap::new(width, height).ok_or(ChartError::Surface { width, height })?;
        pixmap.fill(tiny_skia::Color::WHITE);
        Ok(Self {
            pixmap,
            unit: width as f32 / 600.0,
        })
    }

    pub(crate) fn unit(&self) -> f32 {
        self.unit
    }

    fn paint(color: Color, alpha: u8) -> Paint<'static> {
        let mut paint = Paint::default();
        paint.set_color_rgba8(color.r, color.g, color.b, alpha);
        paint.anti_alias = true;
        paint
    }

    pub(crate) fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color, alpha: u8) {
        if let Some(rect) = Rect::from_xywh(x, y, w, h) {
            self.pixmap
                .fill_rect(rect, &Self::paint(color, alpha), Transform::identity(), None);
        }
    }

    pub(crate) fn fill_polygon(&mut self, points: &[(f32, f32)], color: Color, alpha: u8) {
        let mut pb = PathBuilder::new();
        for (i, (x, y)) in points.iter().enumerate() {
            if i == 0 {
                pb.move_to(*x, *y);
            } else {
                pb.line_to(*x, *y);
            }
        }
        pb.close();
        if let Some(path) = pb.finish() {
            self.pixmap.fill_path(
                &path,
                &Self::paint(color, alpha),
                FillRule::Winding,
                Transform::identity(),
                None,
            );
        }
    }

    pub(crate) fn stroke_polyline(&mut self, points: &[(f32, f32)], color: Color, width: f32) {
        self.stroke(points, color, width, None);
    }

    pub(crate) fn stroke_dashed(&mut self, points: &[(f32, f32)], color: Color, width: f32) {
        let dash = tiny_skia::StrokeDash::new(vec![6.0 * self.unit, 4.0 * self.unit], 0.0);
        self.stroke(points, color, width, dash);
    }

    fn stroke(
        &mut self,
        points: &[(f32, f32)],
        color: Color,
        width: f32,
        dash: Option<tiny_skia::StrokeDash>,
    ) {
        let mut pb = PathBuilder::new();
        for (i, (x, y)) in points.iter().enumerate() {
            if i == 0 {
                pb.move_to(*x, *y);
            } else {
                pb.line_to(*x, *y);
            }
        }
        let Some(path) = pb.finish() else {
            return;
        };
        let stroke = Stroke {
            width,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            dash,
            ..Stroke::default()
        };
        self.pixmap
            .stroke_path(&path, &Self::paint(color, 255), &stroke, Transform::identity(), None);
    }

    pub(crate) fn fill_circle(&mut self, cx: f32, cy: f32, r: f32, color: Color) {
        if let Some(path) = PathBuilder::from_circle(cx, cy, r) {
            self.pixmap.fill_path(
                &path,
                &Self::paint(color, 255),
                FillRule::Winding,
                Transform::identity(),
                None,
            );
        }
    }

    /// The surface is opaque, so premultiplied and straight RGB coincide.
    pub(crate) fn into_image(self) -> Result<RgbImage, ChartError> {
        let (width, height) = (self.pixmap.width(), self.pixmap.height());
        let rgb: Vec<u8> = self
            .pixmap
            .data()
            .chunks_exact(4)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect();
        RgbImage::from_raw(width, height, rgb).ok_or(ChartError::Surface { width, height })
    }
}

fn value_range(datasets: &[Dataset], stacked: bool, categories: usize) -> (f64, f64) {
    if stacked {
        let mut lo: f64 = 0.0;
        let mut hi: f64 = 0.0;
        for i in 0..categories {
            let (pos, neg) = datasets
                .iter()
                .filter_map(|d| d.values.get(i))
                .fold((0.0, 0.0), |(p, n), v| if *v >= 0.0 { (p + v, n) } else { (p, n + v) });
            hi = hi.max(pos);
            lo = lo.min(neg);
        }
        return (lo, hi);
    }
    datasets
        .iter()
        .flat_map(|d| d.values.iter().copied())
        .fold((0.0, 0.0), |(lo, hi), v| (f64::min(lo, v), f64::max(hi, v)))
}

fn draw_cartesian(
    spec: &ChartSpec,
    datasets: &[Dataset],
    request: &RasterRequest,
) -> Result<RasterChart, ChartError> {
    let (w, h) = (request.width as f32, request.height as f32);
    let plot = PixelRect {
        x: w * 0.14,
        y: h * 0.05,
        width: w * 0.83,
        height: h * 0.81,
    };
    let (top, bottom) = (plot.y, plot.y + plot.height);
    let categories = spec.categories();
    let n = categories.len().max(1);
    let stacked = spec.stacked && spec.chart_type != ChartType::Line;
    let (lo, hi) = value_range(datasets, stacked, n);
    let scale = AxisScale::new(lo, hi, Y_TICKS);
    let currency = is_currency_chart(spec);

    let mut surface = Surface::new(request.width, request.height)?;
    let unit = surface.unit();

    let mut y_ticks = Vec::new();
    for tick in scale.ticks() {
        let y = scale.project(tick, top, bottom);
        surface.fill_rect(plot.x, y - 0.5 * unit, plot.width, unit.max(1.0), GRID, 255);
        y_ticks.push(AxisTick {
            position: y,
            label: format_axis_value(&request.formatter, tick, currency, scale.step),
        });
    }

    let slot = plot.width / n as f32;
    let x_at = |i: usize| plot.x + slot * (i as f32 + 0.5);

    match spec.chart_type {
        ChartType::Bar => draw_bars(&mut surface, datasets, request, &scale, (top, bottom), slot, stacked, &x_at),
        _ => draw_lines(
            &mut surface,
            datasets,
            request,
            &scale,
            (top, bottom),
            spec.chart_type == ChartType::Area,
            stacked,
            &x_at,
        ),
    }

    let zero_y = scale.project(0.0, top, bottom);
    surface.fill_rect(plot.x, zero_y - 0.75 * unit, plot.width, 1.5 * unit, AXIS, 255);
    surface.fill_rect(plot.x - 0.75 * unit, top, 1.5 * unit, plot.height, AXIS, 255);

    let label_step = n.div_ceil(MAX_X_LABELS);
    let x_labels = categories
        .into_iter()
        .enumerate()
        .filter(|(i, _)| i % label_step == 0)
        .map(|(i, label)| AxisTick {
            position: x_at(i),
            label,
        })
        .collect();

    let legend = if spec.options.show_legend && datasets.len() > 1 {
        datasets
            .iter()
            .enumerate()
            .map(|(i, d)| LegendEntry {
                label: d.label.clone(),
                color: request.series_color(i),
                value: None,
            })
            .collect()
    } else {
        Vec::new()
    };

    Ok(RasterChart {
        image: surface.into_image()?,
        kind: RasterKind::Chart,
        plot_area: plot,
        y_ticks,
        x_labels,
        legend,
    })
}

#[allow(clippy::too_many_arguments)]
fn draw_bars(
    surface: &mut Surface,
    datasets: &[Dataset],
    request: &RasterRequest,
    scale: &AxisScale,
    (top, bottom): (f32, f32),
    slot: f32,
    stacked: bool,
    x_at: &dyn Fn(usize) -> f32,
) {
    let group = slot * 0.7;
    let series = datasets.len().max(1);
    let mut positive = vec![0.0f64; datasets.first().map_or(0, |d| d.values.len())];
    let mut negative = positive.clone();

    for (s, dataset) in datasets.iter().enumerate() {
        let color = request.series_color(s);
        for (i, value) in dataset.values.iter().enumerate() {
            let (x, width, from, to) = if stacked {
                let base = if *value >= 0.0 { &mut positive[i] } else { &mut negative[i] };
                let from = *base;
                *base += value;
                (x_at(i) - group / 2.0, group, from, *base)
            } else {
                let bar = group / series as f32;
                (x_at(i) - group / 2.0 + bar * s as f32, bar, 0.0, *value)
            };
            let y1 = scale.project(from, top, bottom);
            let y2 = scale.project(to, top, bottom);
            let inset = if stacked { 0.0 } else { width * 0.06 };
            let height = (y1 - y2).abs();
            if height > 0.0 {
                surface.fill_rect(x + inset, y1.min(y2), width - 2.0 * inset, height, color, 255);
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_lines(
    surface: &mut Surface,
    datasets: &[Dataset],
    request: &RasterRequest,
    scale: &AxisScale,
    (top, bottom): (f32, f32),
    area: bool,
    stacked: bool,
    x_at: &dyn Fn(usize) -> f32,
) {
    let unit = surface.unit();
    let points = datasets.first().map_or(0, |d| d.values.len());
    let mut baseline = vec![0.0f64; points];

    for (s, dataset) in datasets.iter().enumerate() {
        let color = request.series_color(s);
        let tops: Vec<f64> = dataset
            .values
            .iter()
            .enumerate()
            .map(|(i, v)| if stacked { baseline[i] + v } else { *v })
            .collect();
        let line: Vec<(f32, f32)> = tops
            .iter()
            .enumerate()
            .map(|(i, v)| (x_at(i), scale.project(*v, top, bottom)))
            .collect();

        if area {
            let mut polygon = line.clone();
            polygon.extend((0..tops.len()).rev().map(|i| {
                let floor = if stacked { baseline[i] } else { 0.0 };
                (x_at(i), scale.project(floor, top, bottom))
            }));
            surface.fill_polygon(&polygon, color, if stacked { 150 } else { 80 });
        }
        surface.stroke_polyline(&line, color, 2.5 * unit);
        if line.len() <= 24 {
            for (x, y) in &line {
                surface.fill_circle(*x, *y, 3.0 * unit, color);
            }
        }
        if stacked {
            baseline = tops;
        }
    }
}

fn wedge(cx: f32, cy: f32, r: f32, start: f32, end: f32) -> Vec<(f32, f32)> {
    let sweep = end - start;
    let steps = ((sweep / 2f32.to_radians()).ceil() as usize).max(2);
    let mut points = Vec::with_capacity(steps + 2);
    points.push((cx, cy));
    for k in 0..=steps {
        let angle = start + sweep * k as f32 / steps as f32;
        points.push((cx + r * angle.cos(), cy + r * angle.sin()));
    }
    points
}

fn draw_circular(
    spec: &ChartSpec,
    datasets: &[Dataset],
    request: &RasterRequest,
) -> Result<RasterChart, ChartError> {
    let Some(first) = datasets.first() else {
        return no_data_raster(request.width, request.height);
    };
    let slices: Vec<(String, f64)> = spec
        .categories()
        .into_iter()
        .zip(first.values.iter().copied())
        .filter(|(_, v)| *v > 0.0)
        .collect();
    let total: f64 = slices.iter().map(|(_, v)| v).sum();
    if total <= 0.0 {
        return no_data_raster(request.width, request.height);
    }

    let (w, h) = (request.width as f32, request.height as f32);
    let size = (h * 0.9).min(w * 0.5);
    let r = size / 2.0;
    let (cx, cy) = (w * 0.05 + r, h / 2.0);
    let mut surface = Surface::new(request.width, request.height)?;
    let unit = surface.unit();

    let mut angle = -FRAC_PI_2;
    let mut boundaries = Vec::with_capacity(slices.len());
    for (i, (_, value)) in slices.iter().enumerate() {
        let sweep = (value / total) as f32 * TAU;
        surface.fill_polygon(&wedge(cx, cy, r, angle, angle + sweep), request.series_color(i), 255);
        boundaries.push(angle);
        angle += sweep;
    }
    if slices.len() > 1 {
        for a in boundaries {
            let edge = (cx + r * a.cos(), cy + r * a.sin());
            surface.stroke_polyline(&[(cx, cy), edge], Color::WHITE, 2.0 * unit);
        }
    }
    if spec.chart_type == ChartType::Doughnut {
        surface.fill_circle(cx, cy, r * 0.55, Color::WHITE);
    }

    let legend = if spec.options.show_legend {
        slices
            .iter()
            .enumerate()
            .map(|(i, (label, value))| LegendEntry {
                label: label.clone(),
                color: request.series_color(i),
                value: Some(request.formatter.format_percent(value / total * 100.0)),
            })
            .collect()
    } else {
        Vec::new()
    };

    Ok(RasterChart {
        image: surface.into_image()?,
        kind: RasterKind::Chart,
        plot_area: PixelRect {
            x: cx - r,
            y: cy - r,
            width: size,
            height: size,
        },
        y_ticks: Vec::new(),
        x_labels: Vec::new(),
        legend,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_format::Formatter;
    use serde_json::json;

    const PRIMARY: Color = Color::rgb(0x1B, 0x36, 0x5D);

    fn request(width: u32, height: u32) -> RasterRequest {
        RasterRequest::new(width, height, vec![PRIMARY, Color::rgb(0xF2, 0x9E, 0x4C)], Formatter::default())
    }

    fn monthly(chart_type: ChartType) -> ChartSpec {
        ChartSpec::new("collections", "Collections", chart_type)
            .with_keys("month", &["collected", "expected"])
            .with_data(vec![
                json!({"month": "Jan", "collected": 120000, "expected": 150000}),
                json!({"month": "Feb", "collected": 140000, "expected": 150000}),
                json!({"month": "Mar", "collected": 90000, "expected": 150000}),
            ])
    }

    fn has_color(image: &RgbImage, color: Color) -> bool {
        image.pixels().any(|p| p.0 == [color.r, color.g, color.b])
    }

    #[test]
    fn bar_chart_uses_requested_box_and_palette() {
        let chart = SkiaRasterizer.render(&monthly(ChartType::Bar), &request(600, 300)).unwrap();
        assert_eq!((chart.width(), chart.height()), (600, 300));
        assert_eq!(chart.kind, RasterKind::Chart);
        assert!(has_color(&chart.image, PRIMARY));
        assert_eq!(chart.x_labels.len(), 3);
        assert_eq!(chart.x_labels[0].label, "Jan");
        assert_eq!(chart.legend.len(), 2);
        assert!(chart.y_ticks.iter().any(|t| t.label == "0"));
    }

    #[test]
    fn every_cartesian_type_renders() {
        for chart_type in [ChartType::Line, ChartType::Area, ChartType::Bar] {
            let mut spec = monthly(chart_type);
            let chart = SkiaRasterizer.render(&spec, &request(600, 300)).unwrap();
            assert!(has_color(&chart.image, PRIMARY), "{:?}", chart_type);
            spec.stacked = true;
            assert!(SkiaRasterizer.render(&spec, &request(400, 200)).is_ok());
        }
    }

    #[test]
    fn pie_legend_carries_shares() {
        let spec = ChartSpec::new("mix", "Unit Mix", ChartType::Doughnut)
            .with_keys("type", &["units"])
            .with_data(vec![
                json!({"type": "Studio", "units": 25}),
                json!({"type": "1BR", "units": 75}),
                json!({"type": "Vacant", "units": 0}),
            ]);
        let chart = SkiaRasterizer.render(&spec, &request(600, 300)).unwrap();
        assert_eq!(chart.legend.len(), 2);
        assert_eq!(chart.legend[0].value.as_deref(), Some("25.0%"));
        assert_eq!(chart.legend[1].value.as_deref(), Some("75.0%"));
        assert_eq!(chart.plot_area.width, chart.plot_area.height);
    }

    #[test]
    fn all_zero_series_yield_placeholder() {
        let spec = ChartSpec::new("empty", "Empty", ChartType::Line)
            .with_keys("m", &["v"])
            .with_data(vec![json!({"m": "Jan", "v": 0})]);
        let chart = SkiaRasterizer.render(&spec, &request(400, 200)).unwrap();
        assert_eq!(chart.kind, RasterKind::NoData);
    }

    #[test]
    fn tiny_surfaces_are_rejected() {
        let result = SkiaRasterizer.render(&monthly(ChartType::Bar), &request(20, 20));
        assert!(matches!(result, Err(ChartError::InvalidSpec { .. })));
    }

    #[test]
    fn rendering_is_deterministic() {
        let spec = monthly(ChartType::Area);
        let a = SkiaRasterizer.render(&spec, &request(500, 250)).unwrap();
        let b = SkiaRasterizer.render(&spec, &request(500, 250)).unwrap();
        assert_eq!(a.image.as_raw(), b.image.as_raw());
    }
}
