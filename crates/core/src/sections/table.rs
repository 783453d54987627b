//! Paginated detail table.
//!
//! The page plan comes from [`plan_table`]; this module only draws it. A row is never
//! split, every page after the first repeats the header under a continuation marker,
//! and a page that leaves rows behind ends with a count of what follows.

use crate::compose::{Composer, Theme, NO_DATA_TEXT};
use crate::error::PipelineError;
use folio_format::Formatter;
use folio_layout::{char_budget, plan_table, truncate_chars, TablePage};
use folio_render_lopdf::{PageCanvas, TextAnchor, TextStyle};
use folio_style::StandardFont;
use folio_types::{Align, ColumnFormat, Rect, TableColumn, TableData, TableRow};
use log::{debug, warn};
use serde_json::Value;

pub const CONTINUED_TEXT: &str = "(Continued from previous page)";

/// How a table section is introduced and capped.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableOptions<'t> {
    pub title: Option<&'t str>,
    /// Rows beyond this count are left out with a note saying so.
    pub max_rows: Option<usize>,
}

/// What was drawn, for callers and tests.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableSummary {
    pub rows_rendered: usize,
    pub rows_total: usize,
    pub pages: Vec<TablePage>,
}

/// Display text of one cell. A value that cannot be formatted for its column becomes
/// a dash.
pub fn format_cell(formatter: &Formatter, column: &TableColumn, row: &TableRow) -> String {
    let value = row.get(&column.key).unwrap_or(&Value::Null);
    let format = column.format.unwrap_or(ColumnFormat::Text);
    match formatter.format_value(value, format, column.decimals) {
        Ok(text) => text,
        Err(e) => {
            warn!("Cell '{}' could not be formatted: {}", column.key, e);
            "-".to_string()
        }
    }
}

fn cell_x(rect: Rect, align: Align, padding: f32) -> (f32, TextAnchor) {
    match align {
        Align::Left => (rect.x + padding, TextAnchor::Left),
        Align::Center => (rect.x + rect.width / 2.0, TextAnchor::Center),
        Align::Right => (rect.right() - padding, TextAnchor::Right),
    }
}

struct Grid<'t> {
    columns: &'t [TableColumn],
    widths: Vec<f32>,
    left: f32,
}

impl Grid<'_> {
    fn cells(&self, top: f32, height: f32) -> impl Iterator<Item = (&TableColumn, Rect)> + '_ {
        let mut x = self.left;
        self.columns.iter().zip(&self.widths).map(move |(column, width)| {
            let rect = Rect::new(x, top, *width, height);
            x += width;
            (column, rect)
        })
    }

    fn width(&self) -> f32 {
        self.widths.iter().sum()
    }
}

fn draw_header(canvas: &mut PageCanvas, grid: &Grid, top: f32, theme: &Theme) {
    let height = theme.table.header_height;
    canvas.fill_rect(Rect::new(grid.left, top, grid.width(), height), theme.primary);
    let style = TextStyle::bold(theme.table_size, folio_types::Color::WHITE);
    for (column, rect) in grid.cells(top, height) {
        let budget = char_budget(rect.width - 2.0 * theme.cell_padding, style.font, style.size);
        let label = truncate_chars(&column.label, budget);
        let (x, anchor) = cell_x(rect, column.align, theme.cell_padding);
        let text_top = rect.y + (height - style.size) / 2.0;
        canvas.text(&label, x, text_top, style, anchor);
    }
}

fn draw_row(
    canvas: &mut PageCanvas,
    grid: &Grid,
    row: &TableRow,
    index: usize,
    top: f32,
    theme: &Theme,
    formatter: &Formatter,
) {
    let height = theme.table.row_height;
    if index % 2 == 1 {
        canvas.fill_rect(Rect::new(grid.left, top, grid.width(), height), theme.zebra);
    }
    let style = TextStyle::regular(theme.table_size, theme.text);
    for (column, rect) in grid.cells(top, height) {
        let text = format_cell(formatter, column, row);
        let budget = char_budget(rect.width - 2.0 * theme.cell_padding, style.font, style.size);
        let text = truncate_chars(&text, budget);
        let (x, anchor) = cell_x(rect, column.align, theme.cell_padding);
        canvas.text(&text, x, rect.y + (height - style.size) / 2.0, style, anchor);
    }
    let bottom = top + height;
    canvas.line((grid.left, bottom), (grid.left + grid.width(), bottom), theme.rule, 0.4);
}

fn draw_note(c: &mut Composer, text: &str, height: f32) {
    let theme = *c.theme();
    let style = TextStyle::new(StandardFont::HelveticaOblique, theme.small_size, theme.muted);
    let (x, y) = (c.left(), c.y() + (height - style.size) / 2.0);
    c.canvas().text(text, x, y, style, TextAnchor::Left);
    c.advance(height);
}

/// Draws `table`, paginating it across as many pages as it needs.
pub fn render_table(
    c: &mut Composer,
    table: &TableData,
    options: TableOptions,
) -> Result<TableSummary, PipelineError> {
    let theme = *c.theme();
    let metrics = theme.table;
    if let Some(title) = options.title {
        c.heading(title, metrics.header_height + 3.0 * metrics.row_height)?;
    }
    if table.rows.is_empty() {
        c.notice(NO_DATA_TEXT)?;
        c.gap(theme.section_gap);
        return Ok(TableSummary::default());
    }

    let inferred;
    let columns = if table.columns.is_empty() {
        inferred = TableData::infer_columns(&table.rows);
        &inferred
    } else {
        &table.columns
    };
    let labels: Vec<&str> = columns.iter().map(|col| col.label.as_str()).collect();
    let grid = Grid {
        columns,
        widths: c.optimizer().column_widths(&labels, c.width()),
        left: c.left(),
    };

    let total = table.rows.len();
    let shown = options.max_rows.map_or(total, |max| max.min(total));
    if shown < total {
        debug!("Table capped at {} of {} rows", shown, total);
    }
    let page_available = c.constraints().content_height();
    let pages = plan_table(shown, c.available_height(), page_available, &metrics)?;
    let formatter = c.formatter().clone();

    for page in &pages {
        if page.break_before && !c.at_page_top() {
            c.page_break()?;
        }
        if page.continued {
            draw_note(c, CONTINUED_TEXT, metrics.marker_height);
        }
        let top = c.y();
        draw_header(c.canvas(), &grid, top, &theme);
        c.advance(metrics.header_height);
        for index in page.rows.clone() {
            let top = c.y();
            draw_row(c.canvas(), &grid, &table.rows[index], index, top, &theme, &formatter);
            c.advance(metrics.row_height);
        }
        if page.remaining > 0 {
            draw_note(c, &format!("({} more items)", page.remaining), metrics.notice_height);
        }
    }

    if shown < total {
        c.ensure(metrics.notice_height, false)?;
        draw_note(
            c,
            &format!("(Showing first {} of {} rows)", shown, total),
            metrics.notice_height,
        );
    }
    c.gap(theme.section_gap);
    Ok(TableSummary {
        rows_rendered: shown,
        rows_total: total,
        pages,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_format::FormatConfig;
    use serde_json::json;

    fn row(value: Value) -> TableRow {
        match value {
            Value::Object(map) => map,
            _ => TableRow::new(),
        }
    }

    #[test]
    fn cells_are_formatted_by_column() {
        let formatter = Formatter::new(FormatConfig::default());
        let r = row(json!({ "amount": 25000, "paid_on": "2025-03-01", "note": "Late fee waived" }));
        let amount = TableColumn::numeric("amount", "Amount", ColumnFormat::Currency);
        let date = TableColumn::new("paid_on", "Paid").with_format(ColumnFormat::Date);
        let note = TableColumn::new("note", "Note");
        assert_eq!(format_cell(&formatter, &amount, &r), "KSh 25,000");
        assert_eq!(format_cell(&formatter, &date, &r), "Mar 01, 2025");
        assert_eq!(format_cell(&formatter, &note, &r), "Late fee waived");
    }

    #[test]
    fn unformattable_cells_become_dashes() {
        let formatter = Formatter::new(FormatConfig::default());
        let r = row(json!({ "amount": "n/a", "paid_on": "someday" }));
        let amount = TableColumn::numeric("amount", "Amount", ColumnFormat::Currency);
        let date = TableColumn::new("paid_on", "Paid").with_format(ColumnFormat::Date);
        assert_eq!(format_cell(&formatter, &amount, &r), "-");
        assert_eq!(format_cell(&formatter, &date, &r), "-");
        let missing = TableColumn::new("unit", "Unit");
        assert_eq!(format_cell(&formatter, &missing, &r), "");
    }
}
