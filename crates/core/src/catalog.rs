//! Registered report configurations.
//!
//! A report request names its report by id. An id absent from the catalog is a fatal
//! error for that request; the generic transformer only applies to ids that are
//! registered with [`ReportType::Generic`].

use crate::error::PipelineError;
use folio_transform::ReportType;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportConfig {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub report_type: ReportType,
}

impl ReportConfig {
    pub fn new(id: impl Into<String>, title: impl Into<String>, report_type: ReportType) -> Self {
        Self {
            id: normalize_id(&id.into()),
            title: title.into(),
            description: String::new(),
            report_type,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

fn normalize_id(id: &str) -> String {
    id.trim()
        .chars()
        .map(|c| if c == '-' || c == ' ' { '_' } else { c.to_ascii_lowercase() })
        .collect()
}

static BUILTIN: Lazy<ReportCatalog> = Lazy::new(|| {
    let mut catalog = ReportCatalog::new();
    let descriptions = [
        (ReportType::RentCollection, "Expected against collected rent, by tenant"),
        (ReportType::Occupancy, "Occupied and vacant units, by property"),
        (ReportType::ExpenseSummary, "Operating expenses by category and vendor"),
        (ReportType::Maintenance, "Maintenance requests, resolution times and cost"),
        (ReportType::TenantArrears, "Outstanding balances and their age"),
        (ReportType::FinancialSummary, "Revenue, expenses and net income"),
    ];
    for (report_type, description) in descriptions {
        catalog.register(
            ReportConfig::new(report_type.id(), report_type.title(), report_type)
                .with_description(description),
        );
    }
    catalog
});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportCatalog {
    entries: BTreeMap<String, ReportConfig>,
}

impl ReportCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// One entry per known report type.
    pub fn builtin() -> Self {
        BUILTIN.clone()
    }

    /// Adds or replaces the entry for `config.id`.
    pub fn register(&mut self, config: ReportConfig) -> &mut Self {
        let id = normalize_id(&config.id);
        self.entries.insert(id.clone(), ReportConfig { id, ..config });
        self
    }

    pub fn get(&self, id: &str) -> Option<&ReportConfig> {
        self.entries.get(&normalize_id(id))
    }

    pub fn resolve(&self, id: &str) -> Result<&ReportConfig, PipelineError> {
        self.get(id)
            .ok_or_else(|| PipelineError::MissingReportConfig(id.to_string()))
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
