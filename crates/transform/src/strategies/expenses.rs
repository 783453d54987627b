use crate::helpers::{count, currency, date, kpi_or, money, series_chart, table_with, text, with_change};
use crate::{ReportTransformer, ReportType};
use folio_types::{ChartSpec, ChartType, KpiItem, ReportData, TableData};

#[derive(Debug, Default, Clone, Copy)]
pub struct ExpenseSummary;

impl ReportTransformer for ExpenseSummary {
    fn report_type(&self) -> ReportType {
        ReportType::ExpenseSummary
    }

    fn generate_kpis(&self, data: &ReportData) -> Vec<KpiItem> {
        let total = data.kpi("total_expenses");
        let budget = data.kpi("budget");
        let variance = kpi_or(data, "variance", || budget - total);
        let entries = kpi_or(data, "expense_count", || data.table_rows().len() as f64);
        vec![
            with_change(money("Total Expenses", total), data, "expenses_change"),
            money("Budget", budget),
            money("Budget Variance", variance),
            count("Expense Entries", entries),
        ]
    }

    fn generate_charts(&self, data: &ReportData) -> Vec<ChartSpec> {
        vec![
            series_chart(
                data,
                "by_category",
                "Expenses by Category",
                ChartType::Pie,
                "category",
                &[("amount", "Amount")],
            ),
            series_chart(
                data,
                "monthly_expenses",
                "Monthly Expenses",
                ChartType::Bar,
                "month",
                &[("amount", "Expense Amount")],
            ),
        ]
    }

    fn format_table_data(&self, data: &ReportData) -> TableData {
        table_with(
            vec![
                date("date", "Date"),
                text("category", "Category"),
                text("description", "Description"),
                text("property", "Property"),
                text("vendor", "Vendor"),
                currency("amount", "Amount"),
            ],
            data.table_rows(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_types::{ColumnFormat, KpiValue};
    use serde_json::json;

    #[test]
    fn entry_count_falls_back_to_rows() {
        let data = ReportData::from_value(json!({
            "kpis": { "total_expenses": 120, "budget": 100 },
            "table": [{ "amount": 70 }, { "amount": 50 }]
        }));
        let kpis = ExpenseSummary.generate_kpis(&data);
        assert_eq!(kpis[2].value, KpiValue::raw(-20.0, ColumnFormat::Currency));
        assert_eq!(kpis[3].value, KpiValue::raw(2.0, ColumnFormat::Number));
    }
}
