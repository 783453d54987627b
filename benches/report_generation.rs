//! End-to-end document generation benchmarks
//!
//! Measures a full report run: transformation, chart rasterization, composition and
//! PDF serialization.

use chrono::NaiveDate;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use folio::{DocumentPipeline, DocumentPipelineBuilder, DocumentSpec, EngineConfig};
use serde_json::{Value, json};

fn report(rows: usize, include_charts: bool) -> Value {
    let table: Vec<Value> = (1..=rows)
        .map(|i| {
            json!({
                "tenant": format!("Tenant {}", i),
                "unit": format!("U{}", i),
                "amount_due": 25000,
                "amount_paid": 20000 + (i % 5) * 1000,
                "status": "Paid"
            })
        })
        .collect();
    let months: Vec<Value> = ["Jan", "Feb", "Mar", "Apr", "May", "Jun"]
        .iter()
        .enumerate()
        .map(|(i, m)| json!({ "month": m, "expected": 900000, "collected": 800000 + i * 15000 }))
        .collect();
    json!({
        "type": "report",
        "content": {
            "reportId": "rent_collection",
            "period": "H1 2025",
            "includeCharts": include_charts,
            "data": {
                "kpis": { "total_expected": 5400000, "total_collected": 5025000 },
                "charts": {
                    "monthly_trend": months,
                    "payment_methods": [
                        { "method": "M-Pesa", "amount": 3100000 },
                        { "method": "Bank", "amount": 1925000 }
                    ]
                },
                "table": table
            }
        }
    })
}

fn pipeline() -> DocumentPipeline {
    let config = EngineConfig {
        max_table_rows: None,
        ..EngineConfig::default()
    };
    match DocumentPipelineBuilder::new().with_config(config).build() {
        Ok(pipeline) => pipeline,
        Err(e) => panic!("pipeline: {}", e),
    }
}

fn bench_reports(c: &mut Criterion) {
    let pipeline = pipeline();
    let date = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap_or_default();
    let mut group = c.benchmark_group("report_generation");
    group.sample_size(20);

    for (rows, charts) in [(20usize, false), (20, true), (500, false)] {
        let spec = match DocumentSpec::from_value(report(rows, charts)) {
            Ok(spec) => spec,
            Err(e) => panic!("fixture: {}", e),
        };
        let id = format!("{}_rows{}", rows, if charts { "_charts" } else { "" });
        group.bench_with_input(BenchmarkId::from_parameter(id), &spec, |b, spec| {
            b.iter(|| pipeline.generate_on(spec, date))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_reports);
criterion_main!(benches);
