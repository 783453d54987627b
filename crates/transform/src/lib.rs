//! Report data transformation.
//!
//! Each known report type has a strategy implementing [`ReportTransformer`]; the set of
//! types is closed ([`ReportType`]) and any unrecognised id resolves to the generic
//! passthrough strategy. Strategies are pure and never fail: absent numbers read as
//! zero, absent series and rows as empty.

mod helpers;
mod report_type;
mod strategies;

pub use report_type::ReportType;
pub use strategies::{
    ExpenseSummary, FinancialSummary, Generic, Maintenance, Occupancy, RentCollection,
    TenantArrears,
};

use folio_types::{ChartSpec, KpiItem, ReportData, TableData};
use log::debug;

pub trait ReportTransformer: Send + Sync {
    fn report_type(&self) -> ReportType;

    fn generate_kpis(&self, data: &ReportData) -> Vec<KpiItem>;

    fn generate_charts(&self, data: &ReportData) -> Vec<ChartSpec>;

    fn format_table_data(&self, data: &ReportData) -> TableData;
}

/// The normalized `{kpis, charts, table}` triple handed to the composition engine.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TransformedReport {
    pub kpis: Vec<KpiItem>,
    pub charts: Vec<ChartSpec>,
    pub table: TableData,
}

/// Runs the strategy registered for `report_id` (or the generic one) over `data`.
pub fn transform(report_id: &str, data: &ReportData) -> TransformedReport {
    let report_type = ReportType::from_id(report_id);
    debug!("Transforming '{}' as {:?}", report_id, report_type);
    transform_as(report_type, data)
}

pub fn transform_as(report_type: ReportType, data: &ReportData) -> TransformedReport {
    let strategy = report_type.transformer();
    TransformedReport {
        kpis: strategy.generate_kpis(data),
        charts: strategy.generate_charts(data),
        table: strategy.format_table_data(data),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_types::KpiValue;
    use serde_json::json;

    fn raw_value(item: &KpiItem) -> f64 {
        match item.value {
            KpiValue::Raw { raw, .. } => raw,
            KpiValue::Number(n) => n,
            KpiValue::Formatted(_) => panic!("strategies emit raw values"),
        }
    }

    #[test]
    fn missing_kpis_default_to_zero_for_every_type() {
        let empty = ReportData::default();
        for report_type in ReportType::all() {
            let report = transform_as(report_type, &empty);
            assert!(!report.kpis.is_empty(), "{:?}", report_type);
            for kpi in &report.kpis {
                let value = raw_value(kpi);
                assert_eq!(value, 0.0, "{:?} {}", report_type, kpi.label);
                assert!(value.is_finite());
            }
            assert!(report.table.rows.is_empty());
            for chart in &report.charts {
                assert!(chart.data.is_empty());
            }
        }
    }

    #[test]
    fn null_and_garbage_fields_do_not_panic() {
        let data = ReportData::from_value(json!({
            "kpis": { "total_collected": null, "total_expected": "n/a" },
            "charts": { "monthly_trend": "oops" },
            "table": [1, "two", null]
        }));
        let report = transform("rent_collection", &data);
        assert!(report.kpis.iter().all(|k| raw_value(k) == 0.0));
        assert!(report.table.rows.is_empty());
    }

    #[test]
    fn unknown_type_falls_back_to_passthrough() {
        let data = ReportData::from_value(json!({ "building": "Block A", "floors": 4 }));
        let report = transform("quarterly_widgets", &data);
        assert!(!report.kpis.is_empty());
        assert!(report.charts.is_empty());
        assert_eq!(report.table.rows.len(), 1);
        assert_eq!(report.table.rows[0]["building"], json!("Block A"));
    }
}
