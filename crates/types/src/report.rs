//! The report data model: raw query results in, KPI/chart/table descriptions out.
//!
//! Everything here is immutable once a generation run starts. Accessors are lenient on
//! purpose: upstream payloads routinely omit fields or send `null`, and the renderers treat
//! absence as zero / empty rather than as an error.

use crate::color::Color;
use crate::ids::ChartId;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// A flat key → value record. Column keys index into it.
pub type TableRow = Map<String, Value>;

/// Raw results handed over by the query layer: `{ kpis, charts, table }`.
///
/// Payloads that do not follow that shape are kept verbatim in `extra` so the generic
/// transformer can still expose them.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReportData {
    pub kpis: Map<String, Value>,
    pub charts: BTreeMap<String, Vec<Value>>,
    pub table: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra: Option<Value>,
}

impl ReportData {
    /// Builds report data from an arbitrary JSON value without ever failing.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(obj)
                if obj.contains_key("kpis") || obj.contains_key("charts") || obj.contains_key("table") =>
            {
                let kpis = match obj.get("kpis") {
                    Some(Value::Object(map)) => map.clone(),
                    _ => Map::new(),
                };
                let charts = match obj.get("charts") {
                    Some(Value::Object(map)) => map
                        .iter()
                        .map(|(k, v)| {
                            let rows = match v {
                                Value::Array(rows) => rows.clone(),
                                _ => Vec::new(),
                            };
                            (k.clone(), rows)
                        })
                        .collect(),
                    _ => BTreeMap::new(),
                };
                let table = match obj.get("table") {
                    Some(Value::Array(rows)) => rows.clone(),
                    _ => Vec::new(),
                };
                Self { kpis, charts, table, extra: None }
            }
            Value::Null => Self::default(),
            other => Self { extra: Some(other), ..Self::default() },
        }
    }

    /// Numeric KPI by key. Absent, `null`, non-numeric and non-finite values read as `0`.
    pub fn kpi(&self, key: &str) -> f64 {
        value_as_f64(self.kpis.get(key))
    }

    /// Whether the KPI key was supplied with a usable number.
    pub fn has_kpi(&self, key: &str) -> bool {
        self.kpis.get(key).and_then(number_from_value).is_some()
    }

    /// Series rows for a chart key, `[]` when absent.
    pub fn series(&self, key: &str) -> &[Value] {
        self.charts.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Table rows that are JSON objects. Other entries are skipped.
    pub fn table_rows(&self) -> Vec<TableRow> {
        self.table
            .iter()
            .filter_map(|row| row.as_object().cloned())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.kpis.is_empty() && self.charts.values().all(Vec::is_empty) && self.table.is_empty() && self.extra.is_none()
    }
}

impl<'de> Deserialize<'de> for ReportData {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(ReportData::from_value(Value::deserialize(deserializer)?))
    }
}

fn number_from_value(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(',', "").parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

/// Reads a JSON value as a finite number, defaulting to `0.0`.
pub fn value_as_f64(value: Option<&Value>) -> f64 {
    value.and_then(number_from_value).unwrap_or(0.0)
}

/// Reads a JSON value as display text. `null` and absent values become an empty string.
pub fn value_as_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(other) => other.to_string(),
    }
}

/// Turns `total_collected` or `totalCollected` into `Total Collected`.
pub fn humanize_key(key: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;
    for ch in key.chars() {
        if ch == '_' || ch == '-' || ch == ' ' {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }
        if ch.is_uppercase() && prev_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        prev_lower = ch.is_lowercase() || ch.is_ascii_digit();
        current.push(ch);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
        .into_iter()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

/// How a raw value should be turned into display text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColumnFormat {
    #[default]
    Text,
    Number,
    Currency,
    Percent,
    Date,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// A KPI value is either pre-formatted text or a raw number with a format hint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KpiValue {
    Formatted(String),
    Number(f64),
    Raw {
        raw: f64,
        #[serde(default)]
        format: ColumnFormat,
    },
}

impl KpiValue {
    pub fn raw(value: f64, format: ColumnFormat) -> Self {
        KpiValue::Raw { raw: value, format }
    }
}

/// A single labelled summary metric. Insertion order is display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiItem {
    pub label: String,
    pub value: KpiValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend: Option<Trend>,
    /// Percentage change against the previous period.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change: Option<f64>,
}

impl KpiItem {
    pub fn new(label: impl Into<String>, value: KpiValue) -> Self {
        Self { label: label.into(), value, trend: None, change: None }
    }

    pub fn with_trend(mut self, trend: Trend) -> Self {
        self.trend = Some(trend);
        self
    }

    pub fn with_change(mut self, change: f64) -> Self {
        self.change = Some(change);
        self.trend.get_or_insert(if change > 0.0 {
            Trend::Up
        } else if change < 0.0 {
            Trend::Down
        } else {
            Trend::Stable
        });
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableColumn {
    pub key: String,
    pub label: String,
    #[serde(default)]
    pub align: Align,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<ColumnFormat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decimals: Option<u8>,
}

impl TableColumn {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            align: Align::Left,
            format: None,
            decimals: None,
        }
    }

    /// A right-aligned column with a numeric format hint.
    pub fn numeric(key: impl Into<String>, label: impl Into<String>, format: ColumnFormat) -> Self {
        Self {
            align: Align::Right,
            format: Some(format),
            ..Self::new(key, label)
        }
    }

    pub fn with_format(mut self, format: ColumnFormat) -> Self {
        self.format = Some(format);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TableData {
    #[serde(default)]
    pub columns: Vec<TableColumn>,
    #[serde(default)]
    pub rows: Vec<TableRow>,
}

impl TableData {
    pub fn new(columns: Vec<TableColumn>, rows: Vec<TableRow>) -> Self {
        Self { columns, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Infers left-aligned text columns from the keys of the first row.
    pub fn infer_columns(rows: &[TableRow]) -> Vec<TableColumn> {
        rows.first()
            .map(|row| {
                row.iter()
                    .map(|(key, value)| {
                        if value.is_number() {
                            TableColumn::numeric(key.clone(), humanize_key(key), ColumnFormat::Number)
                        } else {
                            TableColumn::new(key.clone(), humanize_key(key))
                        }
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Line,
    Bar,
    Area,
    Pie,
    Doughnut,
}

impl ChartType {
    /// Pie and doughnut charts are always placed full width.
    pub fn is_circular(&self) -> bool {
        matches!(self, ChartType::Pie | ChartType::Doughnut)
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    /// Forces currency (`true`) or plain (`false`) value formatting instead of inferring it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<bool>,
    /// Display labels for series keys.
    #[serde(default)]
    pub series_labels: BTreeMap<String, String>,
    #[serde(default = "default_true")]
    pub show_legend: bool,
    /// Overrides the brand palette when non-empty.
    #[serde(default)]
    pub colors: Vec<Color>,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            currency: None,
            series_labels: BTreeMap::new(),
            show_legend: true,
            colors: Vec::new(),
        }
    }
}

/// One numeric series extracted from a chart's rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub key: String,
    pub label: String,
    pub values: Vec<f64>,
}

/// Describes one visual. Chart specs are independent of each other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSpec {
    pub id: ChartId,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "type")]
    pub chart_type: ChartType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_key: Option<String>,
    #[serde(default)]
    pub y_keys: Vec<String>,
    #[serde(default)]
    pub stacked: bool,
    #[serde(default)]
    pub data: Vec<Value>,
    #[serde(default)]
    pub options: ChartOptions,
}

impl ChartSpec {
    pub fn new(id: impl Into<ChartId>, title: impl Into<String>, chart_type: ChartType) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            chart_type,
            x_key: None,
            y_keys: Vec::new(),
            stacked: false,
            data: Vec::new(),
            options: ChartOptions::default(),
        }
    }

    pub fn with_keys(mut self, x_key: &str, y_keys: &[&str]) -> Self {
        self.x_key = Some(x_key.to_string());
        self.y_keys = y_keys.iter().map(|k| k.to_string()).collect();
        self
    }

    pub fn with_data(mut self, data: Vec<Value>) -> Self {
        self.data = data;
        self
    }

    pub fn stacked(mut self) -> Self {
        self.stacked = true;
        self
    }

    pub fn with_series_label(mut self, key: &str, label: &str) -> Self {
        self.options.series_labels.insert(key.to_string(), label.to_string());
        self
    }

    /// Category labels read from `x_key`, falling back to 1-based row numbers.
    pub fn categories(&self) -> Vec<String> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, row)| match &self.x_key {
                Some(key) => {
                    let text = value_as_text(row.get(key));
                    if text.is_empty() { (i + 1).to_string() } else { text }
                }
                None => (i + 1).to_string(),
            })
            .collect()
    }

    /// One dataset per y key, missing cells read as zero.
    pub fn datasets(&self) -> Vec<Dataset> {
        self.y_keys
            .iter()
            .map(|key| Dataset {
                key: key.clone(),
                label: self
                    .options
                    .series_labels
                    .get(key)
                    .cloned()
                    .unwrap_or_else(|| humanize_key(key)),
                values: self.data.iter().map(|row| value_as_f64(row.get(key))).collect(),
            })
            .collect()
    }

    /// True when there is nothing meaningful to draw: no rows, no series, or only zeros.
    pub fn has_no_data(&self) -> bool {
        let datasets = self.datasets();
        datasets.is_empty()
            || self.data.is_empty()
            || datasets.iter().all(|d| d.values.iter().all(|v| *v == 0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_kpis_read_as_zero() {
        let data = ReportData::from_value(json!({ "kpis": { "a": null, "b": "n/a", "c": 12.5 } }));
        assert_eq!(data.kpi("a"), 0.0);
        assert_eq!(data.kpi("b"), 0.0);
        assert_eq!(data.kpi("missing"), 0.0);
        assert_eq!(data.kpi("c"), 12.5);
        assert!(!data.has_kpi("a"));
        assert!(data.has_kpi("c"));
    }

    #[test]
    fn non_standard_shapes_are_kept_as_extra() {
        let data = ReportData::from_value(json!([{ "x": 1 }]));
        assert!(data.kpis.is_empty());
        assert_eq!(data.extra, Some(json!([{ "x": 1 }])));

        let data: ReportData = serde_json::from_value(json!({ "charts": { "s": null } })).unwrap();
        assert!(data.series("s").is_empty());
        assert!(data.series("absent").is_empty());
    }

    #[test]
    fn humanizes_snake_and_camel_case() {
        assert_eq!(humanize_key("total_collected"), "Total Collected");
        assert_eq!(humanize_key("totalCollected"), "Total Collected");
        assert_eq!(humanize_key("rent"), "Rent");
    }

    #[test]
    fn chart_datasets_default_missing_cells() {
        let spec = ChartSpec::new("c", "Collections", ChartType::Bar)
            .with_keys("month", &["expected", "collected"])
            .with_data(vec![
                json!({ "month": "Jan", "expected": 100, "collected": 80 }),
                json!({ "month": "Feb", "expected": 120 }),
            ]);
        assert_eq!(spec.categories(), vec!["Jan", "Feb"]);
        let sets = spec.datasets();
        assert_eq!(sets[1].values, vec![80.0, 0.0]);
        assert_eq!(sets[1].label, "Collected");
        assert!(!spec.has_no_data());
    }

    #[test]
    fn all_zero_series_counts_as_no_data() {
        let spec = ChartSpec::new("c", "Empty", ChartType::Line)
            .with_keys("m", &["v"])
            .with_data(vec![json!({ "m": "Jan", "v": 0 })]);
        assert!(spec.has_no_data());
        assert!(ChartSpec::new("d", "None", ChartType::Pie).has_no_data());
    }

    #[test]
    fn kpi_value_accepts_all_shapes() {
        let v: KpiValue = serde_json::from_value(json!("KSh 1,000")).unwrap();
        assert_eq!(v, KpiValue::Formatted("KSh 1,000".into()));
        let v: KpiValue = serde_json::from_value(json!(42.0)).unwrap();
        assert_eq!(v, KpiValue::Number(42.0));
        let v: KpiValue = serde_json::from_value(json!({ "raw": 5, "format": "currency" })).unwrap();
        assert_eq!(v, KpiValue::raw(5.0, ColumnFormat::Currency));
    }

    #[test]
    fn change_implies_trend() {
        let item = KpiItem::new("Occupancy", KpiValue::Number(90.0)).with_change(-2.0);
        assert_eq!(item.trend, Some(Trend::Down));
    }
}
