use crate::helpers::{count, currency, date, kpi_or, money, percent, ratio_percent, series_chart, table_with, text, with_change};
use crate::{ReportTransformer, ReportType};
use folio_types::{ChartSpec, ChartType, KpiItem, ReportData, TableData};

#[derive(Debug, Default, Clone, Copy)]
pub struct RentCollection;

impl ReportTransformer for RentCollection {
    fn report_type(&self) -> ReportType {
        ReportType::RentCollection
    }

    fn generate_kpis(&self, data: &ReportData) -> Vec<KpiItem> {
        let expected = data.kpi("total_expected");
        let collected = data.kpi("total_collected");
        let rate = kpi_or(data, "collection_rate", || ratio_percent(collected, expected));
        let outstanding = kpi_or(data, "outstanding", || (expected - collected).max(0.0));
        vec![
            money("Total Expected", expected),
            with_change(money("Total Collected", collected), data, "collected_change"),
            with_change(percent("Collection Rate", rate), data, "collection_rate_change"),
            money("Outstanding", outstanding),
            count("Tenants Paid", data.kpi("tenants_paid")),
        ]
    }

    fn generate_charts(&self, data: &ReportData) -> Vec<ChartSpec> {
        vec![
            series_chart(
                data,
                "monthly_trend",
                "Collected vs Expected Rent",
                ChartType::Bar,
                "month",
                &[("expected", "Expected Rent"), ("collected", "Collected Rent")],
            ),
            series_chart(
                data,
                "payment_methods",
                "Payments by Method",
                ChartType::Pie,
                "method",
                &[("amount", "Amount")],
            ),
        ]
    }

    fn format_table_data(&self, data: &ReportData) -> TableData {
        table_with(
            vec![
                text("tenant", "Tenant"),
                text("property", "Property"),
                text("unit", "Unit"),
                currency("amount_due", "Amount Due"),
                currency("amount_paid", "Amount Paid"),
                currency("balance", "Balance"),
                date("payment_date", "Payment Date"),
                text("status", "Status"),
            ],
            data.table_rows(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_types::{KpiValue, Trend};
    use serde_json::json;

    #[test]
    fn derives_rate_and_outstanding() {
        let data = ReportData::from_value(json!({
            "kpis": { "total_expected": 200000, "total_collected": 150000, "collection_rate_change": -2.5 }
        }));
        let kpis = RentCollection.generate_kpis(&data);
        assert_eq!(kpis[2].value, KpiValue::raw(75.0, folio_types::ColumnFormat::Percent));
        assert_eq!(kpis[2].trend, Some(Trend::Down));
        assert_eq!(kpis[3].value, KpiValue::raw(50000.0, folio_types::ColumnFormat::Currency));
    }

    #[test]
    fn table_keeps_only_present_columns() {
        let data = ReportData::from_value(json!({
            "table": [{ "tenant": "Jane Wanjiru", "unit": "A4", "amount_paid": 25000, "status": "Paid" }]
        }));
        let table = RentCollection.format_table_data(&data);
        let keys: Vec<&str> = table.columns.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["tenant", "unit", "amount_paid", "status"]);
    }

    #[test]
    fn charts_follow_series_keys() {
        let data = ReportData::from_value(json!({
            "charts": { "monthly_trend": [{ "month": "Jan", "expected": 10, "collected": 8 }] }
        }));
        let charts = RentCollection.generate_charts(&data);
        assert_eq!(charts[0].data.len(), 1);
        assert_eq!(charts[0].datasets()[1].label, "Collected Rent");
        assert!(charts[1].data.is_empty());
    }
}
