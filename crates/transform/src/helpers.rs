//! Small builders shared by the strategies.

use folio_types::{
    humanize_key, ChartSpec, ChartType, ColumnFormat, KpiItem, KpiValue, ReportData, TableColumn,
    TableData, TableRow,
};

pub(crate) fn money(label: &str, value: f64) -> KpiItem {
    KpiItem::new(label, KpiValue::raw(value, ColumnFormat::Currency))
}

pub(crate) fn percent(label: &str, value: f64) -> KpiItem {
    KpiItem::new(label, KpiValue::raw(value, ColumnFormat::Percent))
}

pub(crate) fn count(label: &str, value: f64) -> KpiItem {
    KpiItem::new(label, KpiValue::raw(value, ColumnFormat::Number))
}

/// Attaches the period-over-period change stored under `key`, if supplied.
pub(crate) fn with_change(item: KpiItem, data: &ReportData, key: &str) -> KpiItem {
    if data.has_kpi(key) {
        item.with_change(data.kpi(key))
    } else {
        item
    }
}

/// The supplied KPI, or `derived` when the upstream payload omitted it.
pub(crate) fn kpi_or(data: &ReportData, key: &str, derived: impl FnOnce() -> f64) -> f64 {
    if data.has_kpi(key) {
        data.kpi(key)
    } else {
        let value = derived();
        if value.is_finite() { value } else { 0.0 }
    }
}

/// `part / whole` as a percentage, zero when `whole` is not positive.
pub(crate) fn ratio_percent(part: f64, whole: f64) -> f64 {
    if whole > 0.0 { part / whole * 100.0 } else { 0.0 }
}

pub(crate) fn series_chart(
    data: &ReportData,
    series_key: &str,
    title: &str,
    chart_type: ChartType,
    x_key: &str,
    y_keys: &[(&str, &str)],
) -> ChartSpec {
    let keys: Vec<&str> = y_keys.iter().map(|(k, _)| *k).collect();
    let mut spec = ChartSpec::new(series_key, title, chart_type)
        .with_keys(x_key, &keys)
        .with_data(data.series(series_key).to_vec());
    for (key, label) in y_keys {
        spec = spec.with_series_label(key, label);
    }
    spec
}

/// Keeps the preferred columns that occur in the rows. When none do, the rows' own
/// keys are used instead.
pub(crate) fn table_with(preferred: Vec<TableColumn>, rows: Vec<TableRow>) -> TableData {
    if rows.is_empty() {
        return TableData::new(preferred, rows);
    }
    let present: Vec<TableColumn> = preferred
        .into_iter()
        .filter(|col| rows.iter().any(|row| row.contains_key(&col.key)))
        .collect();
    let columns = if present.is_empty() {
        TableData::infer_columns(&rows)
    } else {
        present
    };
    TableData::new(columns, rows)
}

pub(crate) fn text(key: &str, label: &str) -> TableColumn {
    TableColumn::new(key, label)
}

pub(crate) fn currency(key: &str, label: &str) -> TableColumn {
    TableColumn::numeric(key, label, ColumnFormat::Currency)
}

pub(crate) fn number(key: &str, label: &str) -> TableColumn {
    TableColumn::numeric(key, label, ColumnFormat::Number)
}

pub(crate) fn pct(key: &str, label: &str) -> TableColumn {
    TableColumn::numeric(key, label, ColumnFormat::Percent)
}

pub(crate) fn date(key: &str, label: &str) -> TableColumn {
    TableColumn::new(key, label).with_format(ColumnFormat::Date)
}

/// Humanized label for an arbitrary key.
pub(crate) fn label_for(key: &str) -> String {
    humanize_key(key)
}
