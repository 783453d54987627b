use crate::helpers::{count, kpi_or, number, pct, percent, ratio_percent, series_chart, table_with, text, with_change};
use crate::{ReportTransformer, ReportType};
use folio_types::{ChartSpec, ChartType, KpiItem, ReportData, TableData};

#[derive(Debug, Default, Clone, Copy)]
pub struct Occupancy;

impl ReportTransformer for Occupancy {
    fn report_type(&self) -> ReportType {
        ReportType::Occupancy
    }

    fn generate_kpis(&self, data: &ReportData) -> Vec<KpiItem> {
        let total = data.kpi("total_units");
        let occupied = data.kpi("occupied_units");
        let vacant = kpi_or(data, "vacant_units", || (total - occupied).max(0.0));
        let rate = kpi_or(data, "occupancy_rate", || ratio_percent(occupied, total));
        vec![
            count("Total Units", total),
            count("Occupied Units", occupied),
            count("Vacant Units", vacant),
            with_change(percent("Occupancy Rate", rate), data, "occupancy_rate_change"),
        ]
    }

    fn generate_charts(&self, data: &ReportData) -> Vec<ChartSpec> {
        vec![
            series_chart(
                data,
                "occupancy_trend",
                "Occupancy Rate Trend",
                ChartType::Line,
                "month",
                &[("occupancy_rate", "Occupancy Rate")],
            ),
            series_chart(
                data,
                "unit_status",
                "Units by Status",
                ChartType::Doughnut,
                "status",
                &[("count", "Units")],
            ),
        ]
    }

    fn format_table_data(&self, data: &ReportData) -> TableData {
        table_with(
            vec![
                text("property", "Property"),
                number("total_units", "Total Units"),
                number("occupied", "Occupied"),
                number("vacant", "Vacant"),
                pct("occupancy_rate", "Occupancy Rate"),
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
    fn vacancy_is_derived_from_totals() {
        let data = ReportData::from_value(json!({ "kpis": { "total_units": 40, "occupied_units": 34 } }));
        let kpis = Occupancy.generate_kpis(&data);
        assert_eq!(kpis[2].value, KpiValue::raw(6.0, ColumnFormat::Number));
        assert_eq!(kpis[3].value, KpiValue::raw(85.0, ColumnFormat::Percent));
    }
}
