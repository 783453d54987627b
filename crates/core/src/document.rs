//! Document requests: a `type` tag plus the content for that type.

use crate::error::PipelineError;
use folio_types::{ChartSpec, KpiItem, TableData};
use serde::{Deserialize, Serialize};
use serde_json::Value;

fn default_true() -> bool {
    true
}

fn default_quantity() -> f64 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportContent {
    #[serde(default)]
    pub title: Option<String>,
    /// Catalog id of the report. When set, KPIs, charts and table are derived from
    /// `data` by the report type's transformer.
    #[serde(default)]
    pub report_id: Option<String>,
    /// Property owner or tenant the report is prepared for; used in the filename.
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub period: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub kpis: Vec<KpiItem>,
    #[serde(default)]
    pub charts: Vec<ChartSpec>,
    #[serde(default)]
    pub table: Option<TableData>,
    /// Raw query results for `report_id`.
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default = "default_true")]
    pub include_charts: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Party {
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub description: String,
    #[serde(default = "default_quantity")]
    pub quantity: f64,
    pub unit_price: f64,
}

impl LineItem {
    pub fn amount(&self) -> f64 {
        self.quantity * self.unit_price
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceContent {
    pub number: String,
    pub issue_date: String,
    #[serde(default)]
    pub due_date: Option<String>,
    pub bill_to: Party,
    #[serde(default)]
    pub items: Vec<LineItem>,
    /// Tax as a percentage of the subtotal.
    #[serde(default)]
    pub tax_rate: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl InvoiceContent {
    pub fn subtotal(&self) -> f64 {
        self.items.iter().map(LineItem::amount).sum()
    }

    pub fn tax(&self) -> f64 {
        self.subtotal() * self.tax_rate.unwrap_or(0.0) / 100.0
    }

    pub fn total(&self) -> f64 {
        self.subtotal() + self.tax()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LetterContent {
    #[serde(default)]
    pub date: Option<String>,
    pub recipient: Party,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub salutation: Option<String>,
    /// Paragraphs, in order.
    #[serde(default)]
    pub body: Vec<String>,
    #[serde(default)]
    pub closing: Option<String>,
    #[serde(default)]
    pub signatory: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DocumentBody {
    Report(ReportContent),
    Invoice(InvoiceContent),
    Letter(LetterContent),
}

/// A generation request: `{ "type": ..., "content": {...}, "tenant"?: ... }`.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentSpec {
    /// Tenant whose branding applies. `None` selects the platform default.
    pub tenant: Option<String>,
    pub body: DocumentBody,
}

impl DocumentSpec {
    pub fn report(content: ReportContent) -> Self {
        Self { tenant: None, body: DocumentBody::Report(content) }
    }

    pub fn invoice(content: InvoiceContent) -> Self {
        Self { tenant: None, body: DocumentBody::Invoice(content) }
    }

    pub fn letter(content: LetterContent) -> Self {
        Self { tenant: None, body: DocumentBody::Letter(content) }
    }

    pub fn with_tenant(mut self, tenant: impl Into<String>) -> Self {
        self.tenant = Some(tenant.into());
        self
    }

    pub fn from_json(json: &str) -> Result<Self, PipelineError> {
        Self::from_value(serde_json::from_str(json)?)
    }

    /// Reads the `type` tag first so that an unknown type is reported as such rather
    /// than as a malformed payload.
    pub fn from_value(value: Value) -> Result<Self, PipelineError> {
        let Value::Object(mut obj) = value else {
            return Err(PipelineError::InvalidContent(
                "document spec must be a JSON object".to_string(),
            ));
        };
        let kind = match obj.get("type") {
            Some(Value::String(kind)) => kind.to_lowercase(),
            Some(other) => return Err(PipelineError::UnsupportedDocumentType(other.to_string())),
            None => {
                return Err(PipelineError::InvalidContent(
                    "document spec has no 'type'".to_string(),
                ));
            }
        };
        let tenant = match obj.remove("tenant") {
            Some(Value::String(t)) if !t.trim().is_empty() => Some(t),
            _ => None,
        };
        let content = obj.remove("content").unwrap_or(Value::Object(Default::default()));

        fn parse<T: serde::de::DeserializeOwned>(kind: &str, content: Value) -> Result<T, PipelineError> {
            serde_json::from_value(content)
                .map_err(|e| PipelineError::InvalidContent(format!("{} content: {}", kind, e)))
        }

        let body = match kind.as_str() {
            "report" => DocumentBody::Report(parse(&kind, content)?),
            "invoice" => DocumentBody::Invoice(parse(&kind, content)?),
            "letter" => DocumentBody::Letter(parse(&kind, content)?),
            _ => return Err(PipelineError::UnsupportedDocumentType(kind)),
        };
        Ok(Self { tenant, body })
    }

    pub fn kind(&self) -> &'static str {
        match self.body {
            DocumentBody::Report(_) => "report",
            DocumentBody::Invoice(_) => "invoice",
            DocumentBody::Letter(_) => "letter",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_a_report_with_defaults() {
        let spec = DocumentSpec::from_value(json!({
            "type": "report",
            "tenant": "acme",
            "content": { "reportId": "rent_collection", "period": "March 2025", "data": { "kpis": {} } }
        }))
        .unwrap();
        assert_eq!(spec.tenant.as_deref(), Some("acme"));
        let DocumentBody::Report(report) = spec.body else {
            panic!("expected a report");
        };
        assert!(report.include_charts);
        assert_eq!(report.report_id.as_deref(), Some("rent_collection"));
        assert!(report.kpis.is_empty());
    }

    #[test]
    fn unknown_type_is_unsupported() {
        let err = DocumentSpec::from_value(json!({ "type": "spreadsheet", "content": {} })).unwrap_err();
        assert!(matches!(err, PipelineError::UnsupportedDocumentType(t) if t == "spreadsheet"));
    }

    #[test]
    fn malformed_content_is_invalid() {
        let err = DocumentSpec::from_value(json!({ "type": "invoice", "content": { "number": 7 } })).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidContent(_)));
        assert!(DocumentSpec::from_value(json!([1, 2])).is_err());
    }

    #[test]
    fn invoice_totals() {
        let spec = DocumentSpec::from_value(json!({
            "type": "Invoice",
            "content": {
                "number": "INV-001",
                "issueDate": "2025-03-01",
                "billTo": { "name": "Jane Wanjiru" },
                "items": [
                    { "description": "Rent", "unitPrice": 25000 },
                    { "description": "Service charge", "quantity": 2, "unitPrice": 1500 }
                ],
                "taxRate": 16
            }
        }))
        .unwrap();
        let DocumentBody::Invoice(invoice) = spec.body else {
            panic!("expected an invoice");
        };
        assert_eq!(invoice.subtotal(), 28000.0);
        assert_eq!(invoice.tax(), 4480.0);
        assert_eq!(invoice.total(), 32480.0);
    }
}
