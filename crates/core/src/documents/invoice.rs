use crate::compose::Composer;
use crate::document::InvoiceContent;
use crate::error::PipelineError;
use crate::sections::{render_table, render_title, TableOptions};
use folio_format::Formatter;
use folio_render_lopdf::{TextAnchor, TextStyle};
use folio_types::{ColumnFormat, Rect, TableColumn, TableData, TableRow};
use log::warn;
use serde_json::Value;

/// An invoice date as display text; unparseable input is shown as given.
pub(crate) fn display_date(formatter: &Formatter, raw: &str) -> String {
    formatter.format_date(raw).unwrap_or_else(|e| {
        warn!("{}; showing it verbatim", e);
        raw.to_string()
    })
}

/// Line items as a table: description, quantity, unit price, amount.
pub fn line_item_table(invoice: &InvoiceContent) -> TableData {
    let columns = vec![
        TableColumn::new("description", "Description"),
        TableColumn::numeric("quantity", "Qty", ColumnFormat::Number),
        TableColumn::numeric("unit_price", "Unit Price", ColumnFormat::Currency),
        TableColumn::numeric("amount", "Amount", ColumnFormat::Currency),
    ];
    let rows = invoice
        .items
        .iter()
        .map(|item| {
            let mut row = TableRow::new();
            row.insert("description".into(), Value::from(item.description.clone()));
            row.insert("quantity".into(), Value::from(item.quantity));
            row.insert("unit_price".into(), Value::from(item.unit_price));
            row.insert("amount".into(), Value::from(item.amount()));
            row
        })
        .collect();
    TableData::new(columns, rows)
}

fn bill_to(c: &mut Composer, invoice: &InvoiceContent) -> Result<(), PipelineError> {
    let theme = *c.theme();
    let formatter = c.formatter().clone();
    let line = theme.line(theme.body_size);
    let address: Vec<&str> = invoice
        .bill_to
        .address
        .as_deref()
        .map(|a| a.lines().map(str::trim).filter(|l| !l.is_empty()).collect())
        .unwrap_or_default();
    let height = line * (2 + address.len()) as f32;
    c.ensure(height, false)?;

    let (left, right, top) = (c.left(), c.left() + c.width(), c.y());
    let label = TextStyle::bold(theme.small_size, theme.muted);
    let body = TextStyle::regular(theme.body_size, theme.text);
    let canvas = c.canvas();
    canvas.text("BILL TO", left, top, label, TextAnchor::Left);
    canvas.text(&invoice.bill_to.name, left, top + line, TextStyle::bold(theme.body_size, theme.text), TextAnchor::Left);
    for (i, address_line) in address.iter().enumerate() {
        canvas.text(address_line, left, top + line * (i + 2) as f32, body, TextAnchor::Left);
    }

    let issued = format!("Issue date: {}", display_date(&formatter, &invoice.issue_date));
    canvas.text(&issued, right, top, body, TextAnchor::Right);
    if let Some(due) = &invoice.due_date {
        let due = format!("Due date: {}", display_date(&formatter, due));
        canvas.text(&due, right, top + line, TextStyle::bold(theme.body_size, theme.text), TextAnchor::Right);
    }
    c.advance(height);
    c.gap(theme.section_gap);
    Ok(())
}

fn totals(c: &mut Composer, invoice: &InvoiceContent) -> Result<(), PipelineError> {
    let theme = *c.theme();
    let formatter = c.formatter().clone();
    let row = theme.table.row_height;
    let mut lines = vec![("Subtotal".to_string(), invoice.subtotal())];
    if let Some(rate) = invoice.tax_rate {
        lines.push((format!("Tax ({})", formatter.format_percent(rate)), invoice.tax()));
    }
    let height = row * (lines.len() + 1) as f32 + 4.0;
    c.ensure(height, false)?;

    let width = (c.width() * 0.4).max(160.0).min(c.width());
    let left = c.left() + c.width() - width;
    let right = c.left() + c.width();
    let label = TextStyle::regular(theme.body_size, theme.muted);
    let amount = TextStyle::regular(theme.body_size, theme.text);
    let padding = theme.cell_padding;
    for (text, value) in &lines {
        let top = c.y();
        let text_top = top + (row - theme.body_size) / 2.0;
        let canvas = c.canvas();
        canvas.text(text, left + padding, text_top, label, TextAnchor::Left);
        canvas.text(&formatter.format_currency(*value), right - padding, text_top, amount, TextAnchor::Right);
        c.advance(row);
    }

    c.advance(4.0);
    let top = c.y();
    let band = Rect::new(left, top, width, row);
    let strong = TextStyle::bold(theme.body_size, folio_types::Color::WHITE);
    let text_top = top + (row - theme.body_size) / 2.0;
    let canvas = c.canvas();
    canvas.fill_rect(band, theme.primary);
    canvas.text("Total", left + padding, text_top, strong, TextAnchor::Left);
    canvas.text(&formatter.format_currency(invoice.total()), right - padding, text_top, strong, TextAnchor::Right);
    c.advance(row);
    c.gap(theme.section_gap);
    Ok(())
}

/// Bill-to block, paginated line items, totals and notes.
pub fn compose_invoice(c: &mut Composer, invoice: &InvoiceContent) -> Result<(), PipelineError> {
    render_title(c, "Invoice", &format!("No. {}", invoice.number))?;
    bill_to(c, invoice)?;
    render_table(
        c,
        &line_item_table(invoice),
        TableOptions { title: Some("Items"), max_rows: None },
    )?;
    totals(c, invoice)?;
    if let Some(notes) = invoice.notes.as_deref().filter(|n| !n.trim().is_empty()) {
        let theme = *c.theme();
        c.heading("Notes", theme.line(theme.body_size))?;
        c.paragraph(notes, TextStyle::regular(theme.body_size, theme.text), 0.0)?;
    }
    Ok(())
}
