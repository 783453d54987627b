use crate::catalog::ReportCatalog;
use crate::compose::Composer;
use crate::document::ReportContent;
use crate::error::PipelineError;
use crate::sections::{
    render_charts, render_kpis, render_summary, render_table, render_title, TableOptions,
    TableSummary,
};
use folio_chart::ChartOutcome;
use folio_transform::transform_as;
use folio_types::{ChartSpec, KpiItem, ReportData, TableData};
use log::debug;

/// A report with its catalog entry applied and its data transformed.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedReport {
    pub title: String,
    pub period: String,
    pub summary: String,
    pub owner: Option<String>,
    pub kpis: Vec<KpiItem>,
    pub charts: Vec<ChartSpec>,
    pub table: TableData,
    pub include_charts: bool,
}

impl ResolvedReport {
    /// Looks up `reportId` (fatal when unregistered) and fills whatever the request
    /// did not supply from the report type's transformer.
    pub fn resolve(content: &ReportContent, catalog: &ReportCatalog) -> Result<Self, PipelineError> {
        let mut resolved = Self {
            title: content.title.clone().unwrap_or_else(|| "Report".to_string()),
            period: content.period.clone(),
            summary: content.summary.clone(),
            owner: content.owner.clone(),
            kpis: content.kpis.clone(),
            charts: content.charts.clone(),
            table: content.table.clone().unwrap_or_default(),
            include_charts: content.include_charts,
        };

        let Some(report_id) = &content.report_id else {
            return Ok(resolved);
        };
        let config = catalog.resolve(report_id)?;
        if content.title.is_none() {
            resolved.title = config.title.clone();
        }
        let data = ReportData::from_value(content.data.clone().unwrap_or_default());
        let transformed = transform_as(config.report_type, &data);
        debug!(
            "Report '{}' transformed: {} KPIs, {} charts, {} rows",
            config.id,
            transformed.kpis.len(),
            transformed.charts.len(),
            transformed.table.rows.len()
        );
        if resolved.kpis.is_empty() {
            resolved.kpis = transformed.kpis;
        }
        if resolved.charts.is_empty() {
            resolved.charts = transformed.charts;
        }
        if resolved.table.rows.is_empty() {
            resolved.table = transformed.table;
        }
        Ok(resolved)
    }

    /// Charts that will be drawn.
    pub fn visible_charts(&self) -> &[ChartSpec] {
        if self.include_charts { &self.charts } else { &[] }
    }
}

/// Title, summary, KPI grid, charts and detail table, in that order.
pub fn compose_report(
    c: &mut Composer,
    report: &ResolvedReport,
    outcomes: &[ChartOutcome],
    max_rows: Option<usize>,
) -> Result<TableSummary, PipelineError> {
    render_title(c, &report.title, &report.period)?;
    render_summary(c, &report.summary)?;
    render_kpis(c, &report.kpis)?;
    if report.include_charts {
        render_charts(c, report.visible_charts(), outcomes)?;
    }
    render_table(
        c,
        &report.table,
        TableOptions { title: Some("Details"), max_rows },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn content(value: serde_json::Value) -> ReportContent {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn report_id_derives_sections_from_data() {
        let report = ResolvedReport::resolve(
            &content(json!({
                "reportId": "rent_collection",
                "period": "March 2025",
                "data": { "kpis": { "total_expected": 100000, "total_collected": 80000 } }
            })),
            &ReportCatalog::builtin(),
        )
        .unwrap();
        assert_eq!(report.title, "Rent Collection Report");
        assert!(!report.kpis.is_empty());
        assert!(!report.charts.is_empty());
        assert!(report.table.rows.is_empty());
    }

    #[test]
    fn supplied_sections_win() {
        let report = ResolvedReport::resolve(
            &content(json!({
                "title": "Quarterly Review",
                "kpis": [{ "label": "Units", "value": 12 }],
                "includeCharts": false
            })),
            &ReportCatalog::builtin(),
        )
        .unwrap();
        assert_eq!(report.title, "Quarterly Review");
        assert_eq!(report.kpis.len(), 1);
        assert!(report.visible_charts().is_empty());
    }

    #[test]
    fn unregistered_report_id_is_fatal() {
        let err = ResolvedReport::resolve(
            &content(json!({ "reportId": "portfolio_valuation" })),
            &ReportCatalog::builtin(),
        )
        .unwrap_err();
        assert!(matches!(err, PipelineError::MissingReportConfig(_)));
    }
}
