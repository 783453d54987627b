mod common;

use common::fixtures::*;
use common::pdf_assertions::{count_images, image_placements};
use common::{TestResult, generate_pdf, generate_pdf_with};
use folio::{ChartRasterizer, DocumentPipelineBuilder, SkiaRasterizer};
use folio::types::ChartSpec;
use folio_traits::{ChartError, RasterChart, RasterRequest};
use serde_json::json;
use std::sync::Arc;

/// Delegates to the software rasterizer but panics on one chart id.
#[derive(Debug)]
struct PanicsOn(&'static str);

impl ChartRasterizer for PanicsOn {
    fn render(&self, spec: &ChartSpec, request: &RasterRequest) -> Result<RasterChart, ChartError> {
        if spec.id.as_str() == self.0 {
            panic!("rasterizer crashed on {}", self.0);
        }
        SkiaRasterizer.render(spec, request)
    }

    fn name(&self) -> &'static str {
        "panics-on"
    }
}

/// Never finishes within any sensible settle timeout.
#[derive(Debug)]
struct Stalls;

impl ChartRasterizer for Stalls {
    fn render(&self, spec: &ChartSpec, request: &RasterRequest) -> Result<RasterChart, ChartError> {
        std::thread::sleep(std::time::Duration::from_millis(600));
        SkiaRasterizer.render(spec, request)
    }

    fn name(&self) -> &'static str {
        "stalls"
    }
}

#[test]
fn test_charts_render_as_images() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let pdf = generate_pdf(charted_report("revenue", "collections"))?;
    assert_eq!(count_images(&pdf.doc), 2);
    assert_pdf_contains_text!(pdf, "Revenue by Month");
    assert_pdf_contains_text!(pdf, "Collections by Month");
    assert_pdf_not_contains_text!(pdf, "Chart unavailable");
    Ok(())
}

#[test]
fn test_bar_charts_pair_on_one_row_by_default() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let pdf = generate_pdf(charted_report("revenue", "collections"))?;
    let placements = image_placements(&pdf.doc);
    assert_eq!(placements.len(), 2, "{:?}", placements);
    let (first, second) = (placements[0], placements[1]);

    // A4 less default margins.
    let content_width = 595.28 - 72.0;
    assert_eq!(first.page, second.page);
    assert!((first.y - second.y).abs() < 0.5, "{:?}", placements);
    assert!(second.x > first.x + first.width, "{:?}", placements);
    for placement in &placements {
        assert!(placement.width > 0.0 && placement.width <= content_width / 2.0, "{:?}", placement);
    }
    Ok(())
}

#[test]
fn test_one_failing_chart_does_not_sink_the_document() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let pipeline = DocumentPipelineBuilder::new()
        .with_rasterizer(Arc::new(PanicsOn("collections")))
        .build()?;
    let pdf = generate_pdf_with(&pipeline, charted_report("revenue", "collections"))?;

    assert_eq!(count_images(&pdf.doc), 1);
    assert_pdf_contains_text!(pdf, "Revenue by Month");
    assert_pdf_contains_text!(pdf, "Collections by Month");
    assert_eq!(common::pdf_assertions::count_text(&pdf.doc, "Chart unavailable"), 1);
    Ok(())
}

#[test]
fn test_slow_charts_time_out_to_fallbacks() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut config = folio::EngineConfig::default();
    config.chart_timeout_ms = 50;
    let pipeline = DocumentPipelineBuilder::new()
        .with_config(config)
        .with_rasterizer(Arc::new(Stalls))
        .build()?;
    let pdf = generate_pdf_with(&pipeline, charted_report("revenue", "collections"))?;

    assert_eq!(count_images(&pdf.doc), 0);
    assert_eq!(common::pdf_assertions::count_text(&pdf.doc, "Chart unavailable"), 2);
    Ok(())
}

#[test]
fn test_empty_series_show_no_data_placeholder() -> TestResult {
    let spec = json!({
        "type": "report",
        "content": {
            "title": "Occupancy",
            "period": "March 2025",
            "charts": [{ "id": "trend", "type": "line", "title": "Occupancy Trend", "xKey": "month", "yKeys": ["rate"], "data": [] }]
        }
    });
    let pdf = generate_pdf(spec)?;
    assert_pdf_contains_text!(pdf, "Occupancy Trend");
    assert_pdf_not_contains_text!(pdf, "Chart unavailable");
    assert_pdf_contains_text!(pdf, "No data for this period");
    Ok(())
}

#[test]
fn test_include_charts_false_skips_the_section() -> TestResult {
    let mut spec = charted_report("revenue", "collections");
    spec["content"]["includeCharts"] = json!(false);
    let pdf = generate_pdf(spec)?;
    assert_eq!(count_images(&pdf.doc), 0);
    assert_pdf_not_contains_text!(pdf, "Revenue by Month");
    Ok(())
}
