//! Benchmark for loading the raw result document and building report rows.
//!
//! Measures the performance of:
//! 1. Parsing and indexing a full nested result document
//! 2. Building comparison rows from a variation view

use criterion::{Criterion, criterion_group, criterion_main};
use sg_bench_report::{
    MetricConfig, ResultIndex, VariationSpec, VariationView, build_comparison_rows,
};
use std::hint::black_box;

fn leaf(total_ms: u64) -> String {
    format!(
        r#"{{"time": {{"secs": 0, "nanos": {}}},
            "cache_read_time": {{"secs": 0, "nanos": 1000000}},
            "cache_store_time": {{"secs": 0, "nanos": 500000}},
            "edges_traversed": 120, "nodes_visited": 60,
            "cache_reads": 10, "cache_writes": 4, "cache_hits": 6,
            "cache_size_estimate": 2048, "cache_size": 1024, "graph_size": 4096}}"#,
        total_ms * 1_000_000
    )
}

/// A document shaped like a real run: 4 patterns × 2 heads × 3 variants ×
/// 2 modes × 3 query counts = 144 leaves.
fn full_document() -> String {
    let patterns = ["sg_tree", "sg_linear", "sg_diamond", "sg_circle"];
    let heads = ["fanchain-25-10", "linear-100"];

    let mut doc = String::from("{");
    for (pi, pattern) in patterns.iter().enumerate() {
        if pi > 0 {
            doc.push(',');
        }
        doc.push_str(&format!(r#""{pattern}": {{"#));
        for (hi, head) in heads.iter().enumerate() {
            if hi > 0 {
                doc.push(',');
            }
            doc.push_str(&format!(r#""{head}": {{"#));
            for vi in 0..3 {
                if vi > 0 {
                    doc.push(',');
                }
                doc.push_str(&format!(r#""var-{vi}": {{"#));
                for (mi, mode) in ["base", "cached"].iter().enumerate() {
                    if mi > 0 {
                        doc.push(',');
                    }
                    doc.push_str(&format!(r#""{mode}": {{"#));
                    for (qi, q) in [1u64, 2, 5].iter().enumerate() {
                        if qi > 0 {
                            doc.push(',');
                        }
                        let ms = if mi == 0 { 100 + 10 * q } else { 40 + 4 * q };
                        doc.push_str(&format!(r#""{q}": {}"#, leaf(ms)));
                    }
                    doc.push('}');
                }
                doc.push('}');
            }
            doc.push('}');
        }
        doc.push('}');
    }
    doc.push('}');
    doc
}

fn bench_index_build(c: &mut Criterion) {
    let json = full_document();
    c.bench_function("index_build_144_leaves", |b| {
        b.iter(|| ResultIndex::from_json_str(black_box(&json)).unwrap());
    });
}

fn bench_comparison_rows(c: &mut Criterion) {
    let json = full_document();
    let index = ResultIndex::from_json_str(&json).unwrap();
    let spec = VariationSpec::new(
        "sg_tree",
        "fanchain-25-10",
        "Tree",
        &["var-0", "var-1", "var-2"],
    );
    let config = MetricConfig::default();

    c.bench_function("comparison_rows_per_variation", |b| {
        b.iter(|| {
            let view = VariationView::build(black_box(&index), &spec);
            build_comparison_rows(&view, &config).unwrap()
        });
    });
}

criterion_group!(benches, bench_index_build, bench_comparison_rows);
criterion_main!(benches);
