use crate::helpers::{count, label_for};
use crate::{ReportTransformer, ReportType};
use folio_format::is_currency_label;
use folio_types::{ChartSpec, ColumnFormat, KpiItem, KpiValue, ReportData, TableData, TableRow};
use serde_json::Value;

/// Elements of an array payload shown as individual cells.
const ARRAY_PREVIEW: usize = 6;

/// Fallback for report ids without a dedicated strategy.
///
/// Structured payloads pass through unchanged; any other JSON shape becomes a single
/// table row so the caller still sees what came back.
#[derive(Debug, Default, Clone, Copy)]
pub struct Generic;

fn passthrough_row(value: &Value) -> TableRow {
    match value {
        Value::Object(map) => map.clone(),
        Value::Array(items) => {
            let mut row = TableRow::new();
            row.insert("count".to_string(), Value::from(items.len()));
            for (i, item) in items.iter().take(ARRAY_PREVIEW).enumerate() {
                row.insert(format!("item_{}", i + 1), item.clone());
            }
            row
        }
        Value::Null => TableRow::new(),
        scalar => {
            let mut row = TableRow::new();
            row.insert("value".to_string(), scalar.clone());
            row
        }
    }
}

impl Generic {
    fn rows(&self, data: &ReportData) -> Vec<TableRow> {
        if let Some(extra) = &data.extra {
            let row = passthrough_row(extra);
            return if row.is_empty() { Vec::new() } else { vec![row] };
        }
        data.table_rows()
    }
}

impl ReportTransformer for Generic {
    fn report_type(&self) -> ReportType {
        ReportType::Generic
    }

    fn generate_kpis(&self, data: &ReportData) -> Vec<KpiItem> {
        let supplied: Vec<KpiItem> = data
            .kpis
            .keys()
            .map(|key| {
                let format = if is_currency_label(key) {
                    ColumnFormat::Currency
                } else {
                    ColumnFormat::Number
                };
                KpiItem::new(label_for(key), KpiValue::raw(data.kpi(key), format))
            })
            .collect();
        if supplied.is_empty() {
            vec![count("Records", self.rows(data).len() as f64)]
        } else {
            supplied
        }
    }

    fn generate_charts(&self, _data: &ReportData) -> Vec<ChartSpec> {
        Vec::new()
    }

    fn format_table_data(&self, data: &ReportData) -> TableData {
        let rows = self.rows(data);
        TableData::new(TableData::infer_columns(&rows), rows)
    }
}
