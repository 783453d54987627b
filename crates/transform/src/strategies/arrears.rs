use crate::helpers::{count, currency, date, kpi_or, money, number, series_chart, table_with, text, with_change};
use crate::{ReportTransformer, ReportType};
use folio_types::{ChartSpec, ChartType, KpiItem, ReportData, TableData};

#[derive(Debug, Default, Clone, Copy)]
pub struct TenantArrears;

impl ReportTransformer for TenantArrears {
    fn report_type(&self) -> ReportType {
        ReportType::TenantArrears
    }

    fn generate_kpis(&self, data: &ReportData) -> Vec<KpiItem> {
        let total = data.kpi("total_arrears");
        let tenants = data.kpi("tenants_in_arrears");
        let average = kpi_or(data, "average_arrears", || {
            if tenants > 0.0 { total / tenants } else { 0.0 }
        });
        vec![
            with_change(money("Total Arrears", total), data, "arrears_change"),
            count("Tenants in Arrears", tenants),
            money("Average Arrears", average),
            money("Over 90 Days", data.kpi("over_90_days")),
        ]
    }

    fn generate_charts(&self, data: &ReportData) -> Vec<ChartSpec> {
        vec![series_chart(
            data,
            "aging",
            "Arrears Aging",
            ChartType::Bar,
            "bucket",
            &[("amount", "Arrears Amount")],
        )]
    }

    fn format_table_data(&self, data: &ReportData) -> TableData {
        table_with(
            vec![
                text("tenant", "Tenant"),
                text("property", "Property"),
                text("unit", "Unit"),
                currency("balance", "Balance"),
                number("days_overdue", "Days Overdue"),
                date("last_payment_date", "Last Payment"),
                text("phone", "Phone"),
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
    fn average_guards_against_zero_tenants() {
        let data = ReportData::from_value(json!({ "kpis": { "total_arrears": 5000 } }));
        let kpis = TenantArrears.generate_kpis(&data);
        assert_eq!(kpis[2].value, KpiValue::raw(0.0, ColumnFormat::Currency));

        let data = ReportData::from_value(json!({ "kpis": { "total_arrears": 5000, "tenants_in_arrears": 4 } }));
        assert_eq!(
            TenantArrears.generate_kpis(&data)[2].value,
            KpiValue::raw(1250.0, ColumnFormat::Currency)
        );
    }
}
