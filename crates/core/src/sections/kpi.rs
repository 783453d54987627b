//! KPI grid: fixed-size cards in row-major order.

use crate::compose::{Composer, Theme, NO_DATA_TEXT};
use crate::error::PipelineError;
use folio_format::{compact_label, Formatter};
use folio_layout::{fit_text, FittedText, GridLayout};
use folio_render_lopdf::{PageCanvas, TextAnchor, TextStyle};
use folio_style::{KpiStyle, StandardFont};
use folio_types::{Color, KpiItem, Rect, Trend};

const PADDING: f32 = 8.0;
const ACCENT_WIDTH: f32 = 3.0;
const GLYPH_SIZE: f32 = 7.0;

/// Fitted value and label of one card.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedCard {
    pub value: FittedText,
    pub label: FittedText,
}

/// Fits a card's value and label into `inner_width`: full text, then the compact
/// form, then a smaller size down to the floor, then an ellipsis.
pub fn fit_card(
    item: &KpiItem,
    formatter: &Formatter,
    theme: &Theme,
    inner_width: f32,
    floor: f32,
) -> FittedCard {
    let value_text = formatter.format_kpi(&item.value);
    let value_width = if item.trend.is_some() {
        inner_width - GLYPH_SIZE - 4.0
    } else {
        inner_width
    };
    let value = fit_text(
        &value_text,
        StandardFont::HelveticaBold,
        value_width.max(1.0),
        theme.kpi_value_size,
        floor,
        |text| formatter.compact_formatted(text),
    );

    let change_width = item
        .change
        .map(|change| {
            TextStyle::bold(theme.small_size, theme.muted).width(&formatter.format_change(change)) + 4.0
        })
        .unwrap_or_default();
    let label_floor = (floor - 2.5).max(6.0);
    let label = fit_text(
        &item.label,
        StandardFont::Helvetica,
        (inner_width - change_width).max(1.0),
        theme.kpi_label_size,
        label_floor,
        compact_label,
    );
    FittedCard { value, label }
}

fn trend_color(theme: &Theme, trend: Trend) -> Color {
    match trend {
        Trend::Up => theme.success,
        Trend::Down => theme.danger,
        Trend::Stable => theme.muted,
    }
}

/// ▲ / ▼ / ● drawn as vector shapes with the top-left corner at `(x, y)`.
fn draw_trend(canvas: &mut PageCanvas, trend: Trend, x: f32, y: f32, color: Color) {
    let s = GLYPH_SIZE;
    match trend {
        Trend::Up => canvas.fill_polygon(&[(x, y + s), (x + s / 2.0, y), (x + s, y + s)], color),
        Trend::Down => canvas.fill_polygon(&[(x, y), (x + s, y), (x + s / 2.0, y + s)], color),
        Trend::Stable => canvas.fill_circle((x + s / 2.0, y + s / 2.0), s * 0.4, color),
    }
}

fn draw_card(
    canvas: &mut PageCanvas,
    item: &KpiItem,
    fitted: &FittedCard,
    rect: Rect,
    theme: &Theme,
    formatter: &Formatter,
) {
    match theme.kpi_style {
        KpiStyle::Cards => {
            canvas.fill_rect(rect, theme.card_fill);
            canvas.fill_rect(Rect::new(rect.x, rect.y, ACCENT_WIDTH, rect.height), theme.primary);
        }
        KpiStyle::Detailed => {
            canvas.fill_rect(rect, theme.card_fill);
            canvas.stroke_rect(rect, theme.rule, 0.5);
            canvas.fill_rect(Rect::new(rect.x, rect.y, ACCENT_WIDTH, rect.height), theme.primary);
        }
        KpiStyle::Minimal => {
            canvas.line((rect.x, rect.bottom()), (rect.right(), rect.bottom()), theme.rule, 0.75);
        }
    }

    let left = rect.x + PADDING + if theme.kpi_style == KpiStyle::Minimal { 0.0 } else { ACCENT_WIDTH };
    let right = rect.right() - PADDING;
    let value_top = rect.y + PADDING;
    canvas.text(
        &fitted.value.text,
        left,
        value_top,
        TextStyle::bold(fitted.value.size, theme.text),
        TextAnchor::Left,
    );

    let label_top = value_top + theme.kpi_value_size * 1.25;
    canvas.text(
        &fitted.label.text,
        left,
        label_top,
        TextStyle::regular(fitted.label.size, theme.muted),
        TextAnchor::Left,
    );

    if let Some(trend) = item.trend {
        let color = trend_color(theme, trend);
        draw_trend(canvas, trend, right - GLYPH_SIZE, value_top + 2.0, color);
        if let Some(change) = item.change {
            let text = formatter.format_change(change);
            let top = if theme.kpi_style == KpiStyle::Detailed {
                rect.bottom() - PADDING - theme.small_size
            } else {
                label_top
            };
            canvas.text(&text, right, top, TextStyle::bold(theme.small_size, color), TextAnchor::Right);
        }
    }
}

/// The "Key Metrics" section. An empty list renders a no-data notice.
pub fn render_kpis(c: &mut Composer, kpis: &[KpiItem]) -> Result<(), PipelineError> {
    let theme = *c.theme();
    c.heading("Key Metrics", theme.kpi_card_height)?;
    if kpis.is_empty() {
        c.notice(NO_DATA_TEXT)?;
        c.gap(theme.section_gap);
        return Ok(());
    }

    let columns = c.profile().layout.kpi_columns();
    let grid = GridLayout::new(kpis.len(), columns, c.width(), theme.kpi_gap);
    let accent = if theme.kpi_style == KpiStyle::Minimal { 0.0 } else { ACCENT_WIDTH };
    let inner_width = grid.cell_width - 2.0 * PADDING - accent;
    let floor = c.kpi_font_floor();
    let formatter = c.formatter().clone();
    let fitted: Vec<FittedCard> = kpis
        .iter()
        .map(|item| fit_card(item, &formatter, &theme, inner_width, floor))
        .collect();

    for row in grid.row_ranges() {
        c.ensure(theme.kpi_card_height, false)?;
        let top = c.y();
        let left = c.left();
        for index in row {
            let (column, _) = grid.position(index);
            let rect = Rect::new(
                left + grid.column_x(column),
                top,
                grid.cell_width,
                theme.kpi_card_height,
            );
            draw_card(c.canvas(), &kpis[index], &fitted[index], rect, &theme, &formatter);
        }
        c.advance(theme.kpi_card_height + theme.kpi_gap);
    }
    c.gap(theme.section_gap - theme.kpi_gap);
    Ok(())
}
