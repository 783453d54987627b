//! Vector drawing onto a single page's content stream.

use crate::encoding::to_win_ansi;
use crate::error::RenderError;
use crate::writer::ImageHandle;
use folio_style::StandardFont;
use folio_types::{Color, Rect};
use lopdf::content::{Content, Operation};
use lopdf::{Object, StringFormat};

/// Control-point distance for approximating a quarter circle with one cubic Bézier.
const KAPPA: f32 = 0.552_284_8;

/// Ascent used to place a baseline below the top of a line box.
const BASELINE_RATIO: f32 = 0.8;

/// Horizontal anchoring of a text run relative to its `x` coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAnchor {
    #[default]
    Left,
    Center,
    Right,
}

/// Face, size and color of a text run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font: StandardFont,
    pub size: f32,
    pub color: Color,
}

impl TextStyle {
    pub fn new(font: StandardFont, size: f32, color: Color) -> Self {
        Self { font, size, color }
    }

    pub fn regular(size: f32, color: Color) -> Self {
        Self::new(StandardFont::Helvetica, size, color)
    }

    pub fn bold(size: f32, color: Color) -> Self {
        Self::new(StandardFont::HelveticaBold, size, color)
    }

    pub fn with_size(self, size: f32) -> Self {
        Self { size, ..self }
    }

    /// Width of `text` set in this style.
    pub fn width(&self, text: &str) -> f32 {
        self.font.text_width(text, self.size)
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
struct CanvasState {
    font: Option<(StandardFont, f32)>,
    fill: Option<Color>,
    stroke: Option<Color>,
    line_width: Option<f32>,
}

/// Collects drawing operations for one page.
///
/// All coordinates are in points with `y` growing downward from the top edge of the
/// page; the canvas flips them into PDF user space as operations are recorded.
#[derive(Debug)]
pub struct PageCanvas {
    page_height: f32,
    operations: Vec<Operation>,
    state: CanvasState,
}

impl PageCanvas {
    pub fn new(page_height: f32) -> Self {
        Self {
            page_height,
            operations: Vec::new(),
            state: CanvasState::default(),
        }
    }

    pub fn page_height(&self) -> f32 {
        self.page_height
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    fn flip(&self, y: f32) -> f32 {
        self.page_height - y
    }

    fn push(&mut self, operator: &str, operands: Vec<Object>) {
        self.operations.push(Operation::new(operator, operands));
    }

    fn set_fill(&mut self, color: Color) {
        if self.state.fill != Some(color) {
            let [r, g, b] = color.to_unit_rgb();
            self.push("rg", vec![r.into(), g.into(), b.into()]);
            self.state.fill = Some(color);
        }
    }

    fn set_stroke(&mut self, color: Color, width: f32) {
        if self.state.stroke != Some(color) {
            let [r, g, b] = color.to_unit_rgb();
            self.push("RG", vec![r.into(), g.into(), b.into()]);
            self.state.stroke = Some(color);
        }
        if self.state.line_width != Some(width) {
            self.push("w", vec![width.into()]);
            self.state.line_width = Some(width);
        }
    }

    fn set_font(&mut self, font: StandardFont, size: f32) {
        if self.state.font != Some((font, size)) {
            self.push(
                "Tf",
                vec![Object::Name(font.resource_name().as_bytes().to_vec()), size.into()],
            );
            self.state.font = Some((font, size));
        }
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        if rect.width <= 0.0 || rect.height <= 0.0 {
            return;
        }
        self.set_fill(color);
        let y = self.flip(rect.bottom());
        self.push("re", vec![rect.x.into(), y.into(), rect.width.into(), rect.height.into()]);
        self.push("f", vec![]);
    }

    pub fn stroke_rect(&mut self, rect: Rect, color: Color, width: f32) {
        self.set_stroke(color, width);
        let y = self.flip(rect.bottom());
        self.push("re", vec![rect.x.into(), y.into(), rect.width.into(), rect.height.into()]);
        self.push("S", vec![]);
    }

    /// Strokes the outline of `rect` with a dash pattern of `dash` on, `dash` off.
    pub fn stroke_rect_dashed(&mut self, rect: Rect, color: Color, width: f32, dash: f32) {
        self.push("d", vec![Object::Array(vec![dash.into(), dash.into()]), 0.into()]);
        self.stroke_rect(rect, color, width);
        self.push("d", vec![Object::Array(Vec::new()), 0.into()]);
    }

    pub fn line(&mut self, from: (f32, f32), to: (f32, f32), color: Color, width: f32) {
        self.set_stroke(color, width);
        let (x1, y1) = (from.0, self.flip(from.1));
        let (x2, y2) = (to.0, self.flip(to.1));
        self.push("m", vec![x1.into(), y1.into()]);
        self.push("l", vec![x2.into(), y2.into()]);
        self.push("S", vec![]);
    }

    pub fn fill_polygon(&mut self, points: &[(f32, f32)], color: Color) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        self.set_fill(color);
        let start = (first.0, self.flip(first.1));
        self.push("m", vec![start.0.into(), start.1.into()]);
        for &(x, y) in rest {
            let y = self.flip(y);
            self.push("l", vec![x.into(), y.into()]);
        }
        self.push("h", vec![]);
        self.push("f", vec![]);
    }

    pub fn fill_circle(&mut self, center: (f32, f32), radius: f32, color: Color) {
        if radius <= 0.0 {
            return;
        }
        self.set_fill(color);
        let (cx, cy) = (center.0, self.flip(center.1));
        let k = radius * KAPPA;
        self.push("m", vec![(cx + radius).into(), cy.into()]);
        let quarters = [
            [cx + radius, cy + k, cx + k, cy + radius, cx, cy + radius],
            [cx - k, cy + radius, cx - radius, cy + k, cx - radius, cy],
            [cx - radius, cy - k, cx - k, cy - radius, cx, cy - radius],
            [cx + k, cy - radius, cx + radius, cy - k, cx + radius, cy],
        ];
        for quarter in quarters {
            self.push("c", quarter.iter().map(|v| (*v).into()).collect());
        }
        self.push("f", vec![]);
    }

    /// Draws one line of text whose line box starts at `top`.
    pub fn text(&mut self, text: &str, x: f32, top: f32, style: TextStyle, anchor: TextAnchor) {
        if text.trim().is_empty() {
            return;
        }
        let TextStyle { font, size, color } = style;
        let width = font.text_width(text, size);
        let x = match anchor {
            TextAnchor::Left => x,
            TextAnchor::Center => x - width / 2.0,
            TextAnchor::Right => x - width,
        };
        let baseline = self.flip(top + size * BASELINE_RATIO);
        self.push("BT", vec![]);
        self.set_font(font, size);
        self.set_fill(color);
        self.push("Td", vec![x.into(), baseline.into()]);
        self.push(
            "Tj",
            vec![Object::String(to_win_ansi(text), StringFormat::Literal)],
        );
        self.push("ET", vec![]);
    }

    /// Paints a registered image XObject stretched over `rect`.
    pub fn image(&mut self, image: &ImageHandle, rect: Rect) {
        let y = self.flip(rect.bottom());
        self.push("q", vec![]);
        self.push(
            "cm",
            vec![
                rect.width.into(),
                0.into(),
                0.into(),
                rect.height.into(),
                rect.x.into(),
                y.into(),
            ],
        );
        self.push("Do", vec![Object::Name(image.name().as_bytes().to_vec())]);
        self.push("Q", vec![]);
    }

    pub fn into_content(self) -> Content {
        Content { operations: self.operations }
    }

    pub fn encode(self) -> Result<Vec<u8>, RenderError> {
        Ok(self.into_content().encode()?)
    }
}
