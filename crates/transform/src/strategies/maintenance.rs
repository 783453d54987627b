use crate::helpers::{count, currency, date, kpi_or, money, number, series_chart, table_with, text};
use crate::{ReportTransformer, ReportType};
use folio_types::{ChartSpec, ChartType, ColumnFormat, KpiItem, KpiValue, ReportData, TableData};

#[derive(Debug, Default, Clone, Copy)]
pub struct Maintenance;

impl ReportTransformer for Maintenance {
    fn report_type(&self) -> ReportType {
        ReportType::Maintenance
    }

    fn generate_kpis(&self, data: &ReportData) -> Vec<KpiItem> {
        let open = data.kpi("open_requests");
        let completed = data.kpi("completed_requests");
        let total = kpi_or(data, "total_requests", || open + completed);
        vec![
            count("Total Requests", total),
            count("Open Requests", open),
            count("Completed", completed),
            KpiItem::new(
                "Avg. Resolution (days)",
                KpiValue::raw(data.kpi("avg_resolution_days"), ColumnFormat::Number),
            ),
            money("Maintenance Cost", data.kpi("total_cost")),
        ]
    }

    fn generate_charts(&self, data: &ReportData) -> Vec<ChartSpec> {
        vec![
            series_chart(
                data,
                "by_status",
                "Requests by Status",
                ChartType::Doughnut,
                "status",
                &[("count", "Requests")],
            ),
            series_chart(
                data,
                "by_category",
                "Requests by Category",
                ChartType::Bar,
                "category",
                &[("count", "Requests")],
            ),
        ]
    }

    fn format_table_data(&self, data: &ReportData) -> TableData {
        table_with(
            vec![
                text("request_id", "Request ID"),
                text("property", "Property"),
                text("unit", "Unit"),
                text("category", "Category"),
                text("status", "Status"),
                date("reported_date", "Reported"),
                number("days_open", "Days Open"),
                currency("cost", "Cost"),
            ],
            data.table_rows(),
        )
    }
}
