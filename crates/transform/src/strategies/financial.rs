use crate::helpers::{currency, kpi_or, money, pct, percent, ratio_percent, series_chart, table_with, text, with_change};
use crate::{ReportTransformer, ReportType};
use folio_types::{ChartSpec, ChartType, KpiItem, ReportData, TableData};

#[derive(Debug, Default, Clone, Copy)]
pub struct FinancialSummary;

impl ReportTransformer for FinancialSummary {
    fn report_type(&self) -> ReportType {
        ReportType::FinancialSummary
    }

    fn generate_kpis(&self, data: &ReportData) -> Vec<KpiItem> {
        let revenue = data.kpi("total_revenue");
        let expenses = data.kpi("total_expenses");
        let net = kpi_or(data, "net_income", || revenue - expenses);
        let margin = kpi_or(data, "profit_margin", || ratio_percent(net, revenue));
        vec![
            with_change(money("Total Revenue", revenue), data, "revenue_change"),
            with_change(money("Total Expenses", expenses), data, "expenses_change"),
            with_change(money("Net Income", net), data, "net_income_change"),
            percent("Profit Margin", margin),
        ]
    }

    fn generate_charts(&self, data: &ReportData) -> Vec<ChartSpec> {
        vec![
            series_chart(
                data,
                "revenue_vs_expenses",
                "Revenue vs Expenses",
                ChartType::Bar,
                "month",
                &[("revenue", "Revenue"), ("expenses", "Expenses")],
            ),
            series_chart(
                data,
                "net_income_trend",
                "Net Income Trend",
                ChartType::Area,
                "month",
                &[("net_income", "Net Income")],
            ),
        ]
    }

    fn format_table_data(&self, data: &ReportData) -> TableData {
        table_with(
            vec![
                text("month", "Month"),
                text("property", "Property"),
                currency("revenue", "Revenue"),
                currency("expenses", "Expenses"),
                currency("net_income", "Net Income"),
                pct("margin", "Margin"),
            ],
            data.table_rows(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_types::{ColumnFormat, KpiValue, Trend};
    use serde_json::json;

    #[test]
    fn net_income_and_margin_are_derived() {
        let data = ReportData::from_value(json!({
            "kpis": { "total_revenue": 1000, "total_expenses": 750, "revenue_change": 4.0 }
        }));
        let kpis = FinancialSummary.generate_kpis(&data);
        assert_eq!(kpis[0].trend, Some(Trend::Up));
        assert_eq!(kpis[2].value, KpiValue::raw(250.0, ColumnFormat::Currency));
        assert_eq!(kpis[3].value, KpiValue::raw(25.0, ColumnFormat::Percent));
    }
}
