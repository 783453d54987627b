//! Pure formatting functions shared by every renderer.
//!
//! A [`Formatter`] is built once from a [`FormatConfig`] and maps raw values to display
//! strings: grouped numbers, currency, percentages, dates, and the compact `12.3M` forms
//! used when a cell or card is too narrow for the full value.

mod compact;

pub use compact::{compact_label, compact_number};

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use folio_types::{ColumnFormat, KpiValue};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormatError {
    #[error("Value '{0}' is not a number")]
    NotANumber(String),
    #[error("Value '{0}' is not a recognised date")]
    InvalidDate(String),
}

/// Dataset/series labels that mark a value as money.
pub const CURRENCY_KEYWORDS: [&str; 7] =
    ["amount", "revenue", "expense", "income", "cost", "balance", "rent"];

/// Whether a series or column label describes a currency amount.
pub fn is_currency_label(label: &str) -> bool {
    let lower = label.to_lowercase();
    CURRENCY_KEYWORDS.iter().any(|kw| lower.contains(kw))
}

fn default_currency_symbol() -> String {
    "KSh".to_string()
}

fn default_thousands() -> char {
    ','
}

fn default_decimal() -> char {
    '.'
}

fn default_date_format() -> String {
    "%b %d, %Y".to_string()
}

fn default_percent_decimals() -> u8 {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatConfig {
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    #[serde(default)]
    pub currency_decimals: u8,
    #[serde(default = "default_thousands")]
    pub thousands_separator: char,
    #[serde(default = "default_decimal")]
    pub decimal_separator: char,
    #[serde(default = "default_date_format")]
    pub date_format: String,
    #[serde(default = "default_percent_decimals")]
    pub percent_decimals: u8,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency_symbol(),
            currency_decimals: 0,
            thousands_separator: default_thousands(),
            decimal_separator: default_decimal(),
            date_format: default_date_format(),
            percent_decimals: default_percent_decimals(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Formatter {
    config: FormatConfig,
}

impl Formatter {
    pub fn new(config: FormatConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FormatConfig {
        &self.config
    }

    /// Groups the integer part with the configured thousands separator.
    fn group_digits(&self, digits: &str) -> String {
        let len = digits.len();
        let mut out = String::with_capacity(len + len / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (len - i) % 3 == 0 {
                out.push(self.config.thousands_separator);
            }
            out.push(ch);
        }
        out
    }

    /// `12345.678` with 2 decimals → `12,345.68`.
    pub fn format_number(&self, value: f64, decimals: u8) -> String {
        if !value.is_finite() {
            return "-".to_string();
        }
        let fixed = format!("{:.*}", decimals as usize, value.abs());
        let (int_part, frac_part) = match fixed.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (fixed.as_str(), None),
        };
        let mut out = String::new();
        let is_zero = fixed.chars().all(|c| c == '0' || c == '.');
        if value < 0.0 && !is_zero {
            out.push('-');
        }
        out.push_str(&self.group_digits(int_part));
        if let Some(frac) = frac_part {
            out.push(self.config.decimal_separator);
            out.push_str(frac);
        }
        out
    }

    /// `12345678` → `KSh 12,345,678`; negatives put the sign before the symbol.
    pub fn format_currency(&self, value: f64) -> String {
        self.with_currency(value, &self.format_number(value.abs(), self.config.currency_decimals))
    }

    fn with_currency(&self, value: f64, magnitude: &str) -> String {
        let sign = if value < 0.0 && magnitude.chars().any(|c| c.is_ascii_digit() && c != '0') {
            "-"
        } else {
            ""
        };
        if self.config.currency_symbol.is_empty() {
            format!("{}{}", sign, magnitude)
        } else {
            format!("{}{} {}", sign, self.config.currency_symbol, magnitude)
        }
    }

    /// `85.46` → `85.5%`. The value is already a percentage, not a ratio.
    pub fn format_percent(&self, value: f64) -> String {
        format!("{}%", self.format_number(value, self.config.percent_decimals))
    }

    /// Signed percentage change, e.g. `+5.2%`.
    pub fn format_change(&self, change: f64) -> String {
        let body = self.format_percent(change.abs());
        if change > 0.0 {
            format!("+{}", body)
        } else if change < 0.0 {
            format!("-{}", body)
        } else {
            body
        }
    }

    /// `12345678` → `12.3M`.
    pub fn format_compact(&self, value: f64) -> String {
        compact_number(value, self.config.decimal_separator)
    }

    /// `12345678` → `KSh 12.3M`.
    pub fn format_compact_currency(&self, value: f64) -> String {
        self.with_currency(value, &compact_number(value.abs(), self.config.decimal_separator))
    }

    /// Parses ISO dates, RFC 3339 timestamps and `dd/mm/yyyy`, formatting them with the
    /// configured pattern.
    pub fn format_date(&self, input: &str) -> Result<String, FormatError> {
        let date = parse_date(input).ok_or_else(|| FormatError::InvalidDate(input.to_string()))?;
        Ok(date.format(&self.config.date_format).to_string())
    }

    pub fn format_naive_date(&self, date: NaiveDate) -> String {
        date.format(&self.config.date_format).to_string()
    }

    /// Formats a raw cell value according to a column hint.
    pub fn format_value(
        &self,
        value: &Value,
        format: ColumnFormat,
        decimals: Option<u8>,
    ) -> Result<String, FormatError> {
        if value.is_null() {
            return Ok(String::new());
        }
        match format {
            ColumnFormat::Text => Ok(folio_types::value_as_text(Some(value))),
            ColumnFormat::Number => {
                let n = require_number(value)?;
                Ok(self.format_number(n, decimals.unwrap_or(if n.fract() == 0.0 { 0 } else { 2 })))
            }
            ColumnFormat::Currency => {
                let n = require_number(value)?;
                let digits = self.format_number(n.abs(), decimals.unwrap_or(self.config.currency_decimals));
                Ok(self.with_currency(n, &digits))
            }
            ColumnFormat::Percent => {
                let n = require_number(value)?;
                Ok(format!(
                    "{}%",
                    self.format_number(n, decimals.unwrap_or(self.config.percent_decimals))
                ))
            }
            ColumnFormat::Date => match value {
                Value::String(s) => self.format_date(s),
                other => Err(FormatError::InvalidDate(other.to_string())),
            },
        }
    }

    /// Display text for a KPI card value.
    pub fn format_kpi(&self, value: &KpiValue) -> String {
        match value {
            KpiValue::Formatted(text) => text.clone(),
            KpiValue::Number(n) => self.format_number(*n, if n.fract() == 0.0 { 0 } else { 1 }),
            KpiValue::Raw { raw, format } => self
                .format_value(&Value::from(*raw), *format, None)
                .unwrap_or_else(|_| "-".to_string()),
        }
    }

    /// Compacts an already formatted value, keeping any currency prefix or unit suffix.
    ///
    /// `KSh 12,345,678` → `KSh 12.3M`. Returns `None` when the text holds no number, the
    /// number is below one thousand, or the text is already compact.
    pub fn compact_formatted(&self, text: &str) -> Option<String> {
        let start = text.find(|c: char| c.is_ascii_digit())?;
        let rest = &text[start..];
        let end = rest
            .find(|c: char| {
                !(c.is_ascii_digit()
                    || c == self.config.thousands_separator
                    || c == self.config.decimal_separator)
            })
            .unwrap_or(rest.len());
        let thousands = self.config.thousands_separator;
        let decimal = self.config.decimal_separator;
        let number_text = rest[..end].trim_end_matches(|c: char| c == thousands || c == decimal);
        let suffix = &rest[number_text.len()..];
        if suffix.starts_with(|c: char| matches!(c, 'K' | 'M' | 'B')) {
            return None;
        }
        let normalized: String = number_text
            .chars()
            .filter(|c| *c != thousands)
            .map(|c| if c == decimal { '.' } else { c })
            .collect();
        let value: f64 = normalized.parse().ok()?;
        if value.abs() < 1000.0 {
            return None;
        }
        let prefix = &text[..start];
        Some(format!(
            "{}{}{}",
            prefix,
            compact_number(value, self.config.decimal_separator),
            suffix
        ))
    }
}

fn require_number(value: &Value) -> Result<f64, FormatError> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(',', "").parse::<f64>().ok(),
        _ => None,
    };
    n.filter(|n| n.is_finite())
        .ok_or_else(|| FormatError::NotANumber(folio_types::value_as_text(Some(value))))
}

/// Accepts `2025-03-05`, RFC 3339 timestamps, `2025-03-05T10:00:00` and `05/03/2025`.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.date_naive());
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, pattern) {
            return Some(dt.date());
        }
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(input, "%d/%m/%Y").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fmt() -> Formatter {
        Formatter::default()
    }

    #[test]
    fn groups_thousands() {
        assert_eq!(fmt().format_number(12345678.0, 0), "12,345,678");
        assert_eq!(fmt().format_number(-1234.567, 2), "-1,234.57");
        assert_eq!(fmt().format_number(999.0, 0), "999");
        assert_eq!(fmt().format_number(-0.001, 0), "0");
        assert_eq!(fmt().format_number(f64::NAN, 0), "-");
    }

    #[test]
    fn formats_currency_with_symbol() {
        assert_eq!(fmt().format_currency(12345678.0), "KSh 12,345,678");
        assert_eq!(fmt().format_currency(-1200.0), "-KSh 1,200");
        assert_eq!(fmt().format_compact_currency(12345678.0), "KSh 12.3M");
    }

    #[test]
    fn european_separators() {
        let f = Formatter::new(FormatConfig {
            currency_symbol: "EUR".into(),
            thousands_separator: '.',
            decimal_separator: ',',
            currency_decimals: 2,
            ..FormatConfig::default()
        });
        assert_eq!(f.format_currency(1234.5), "EUR 1.234,50");
        assert_eq!(f.compact_formatted("EUR 1.234.567,00").as_deref(), Some("EUR 1,2M"));
    }

    #[test]
    fn compacts_formatted_strings() {
        let f = fmt();
        assert_eq!(f.compact_formatted("KSh 12,345,678").as_deref(), Some("KSh 12.3M"));
        assert_eq!(f.compact_formatted("1,500 units").as_deref(), Some("1.5K units"));
        assert_eq!(f.compact_formatted("85.5%"), None);
        assert_eq!(f.compact_formatted("KSh 12.3M"), None);
        assert_eq!(f.compact_formatted("n/a"), None);
    }

    #[test]
    fn formats_values_by_hint() {
        let f = fmt();
        assert_eq!(f.format_value(&json!(1500), ColumnFormat::Currency, None).unwrap(), "KSh 1,500");
        assert_eq!(f.format_value(&json!("2025-03-05"), ColumnFormat::Date, None).unwrap(), "Mar 05, 2025");
        assert_eq!(f.format_value(&json!(92.34), ColumnFormat::Percent, None).unwrap(), "92.3%");
        assert_eq!(f.format_value(&json!(null), ColumnFormat::Currency, None).unwrap(), "");
        assert!(f.format_value(&json!("soon"), ColumnFormat::Date, None).is_err());
        assert!(f.format_value(&json!({"a": 1}), ColumnFormat::Number, None).is_err());
    }

    #[test]
    fn parses_common_date_shapes() {
        let expected = NaiveDate::from_ymd_opt(2025, 3, 5);
        assert_eq!(parse_date("2025-03-05"), expected);
        assert_eq!(parse_date("2025-03-05T10:30:00Z"), expected);
        assert_eq!(parse_date("2025-03-05T10:30:00"), expected);
        assert_eq!(parse_date("05/03/2025"), expected);
    }

    #[test]
    fn signed_change() {
        assert_eq!(fmt().format_change(5.23), "+5.2%");
        assert_eq!(fmt().format_change(-1.0), "-1.0%");
    }

    #[test]
    fn currency_keywords() {
        assert!(is_currency_label("Total Revenue"));
        assert!(is_currency_label("rent_due"));
        assert!(is_currency_label("Expenses"));
        assert!(!is_currency_label("Occupied Units"));
    }

    #[test]
    fn kpi_values() {
        let f = fmt();
        assert_eq!(f.format_kpi(&KpiValue::Formatted("12 units".into())), "12 units");
        assert_eq!(f.format_kpi(&KpiValue::Number(1200.0)), "1,200");
        assert_eq!(f.format_kpi(&KpiValue::raw(2500.0, ColumnFormat::Currency)), "KSh 2,500");
    }
}
