//! End-to-end test: raw JSON document → index → views → rows and series.

use sg_bench_report::{
    DEFAULT_QUERY_COUNTS, MetricConfig, Mode, Rating, ReportError, ResultIndex, SegmentKind,
    VariationSpec, VariationView, build_cache_size_rows, build_chart_series,
    build_comparison_rows,
};

fn leaf(total_ms: u64, cache_ms: u64, circle_ms: u64, cache_size: u64, graph_size: u64) -> String {
    format!(
        r#"{{"time": {{"secs": 0, "nanos": {total}}},
            "circle_check_time": {{"secs": 0, "nanos": {circle}}},
            "cache_read_time": {{"secs": 0, "nanos": {cache}}},
            "cache_store_time": {{"secs": 0, "nanos": 0}},
            "edges_traversed": 10, "nodes_visited": 5,
            "cache_reads": 3, "cache_writes": 2, "cache_hits": 1,
            "cache_size_estimate": {cache_size},
            "cache_size": {cache_size}, "graph_size": {graph_size}}}"#,
        total = total_ms * 1_000_000,
        cache = cache_ms * 1_000_000,
        circle = circle_ms * 1_000_000,
    )
}

/// A document covering one tree variant and one circle variant, both under
/// the fan head, at the three reference query counts.
fn results_document() -> String {
    let mode_block = |leaves: &[(u64, String)]| -> String {
        let entries: Vec<String> = leaves
            .iter()
            .map(|(q, leaf)| format!(r#""{q}": {leaf}"#))
            .collect();
        entries.join(", ")
    };

    let tree_base = mode_block(&[
        (1, leaf(100, 0, 0, 0, 0)),
        (2, leaf(190, 0, 0, 0, 0)),
        (5, leaf(460, 0, 0, 0, 0)),
    ]);
    let tree_cached = mode_block(&[
        (1, leaf(40, 5, 0, 1024, 4096)),
        (2, leaf(55, 8, 0, 1280, 4096)),
        (5, leaf(80, 12, 0, 1536, 4096)),
    ]);
    let circle_base = mode_block(&[
        (1, leaf(200, 0, 20, 0, 0)),
        (2, leaf(380, 0, 38, 0, 0)),
        (5, leaf(900, 0, 90, 0, 0)),
    ]);
    let circle_cached = mode_block(&[
        (1, leaf(90, 6, 12, 8192, 2048)),
        (2, leaf(110, 9, 14, 9216, 2048)),
        (5, leaf(150, 15, 18, 10240, 2048)),
    ]);

    format!(
        r#"{{
            "sg_tree": {{"fanchain-25-10": {{"tree-40": {{
                "base": {{{tree_base}}},
                "cached": {{{tree_cached}}}
            }}}}}},
            "sg_circle": {{"fanchain-25-10": {{"circle-4": {{
                "base": {{{circle_base}}},
                "cached": {{{circle_cached}}}
            }}}}}}
        }}"#
    )
}

#[test]
fn loads_all_leaves() {
    let index = ResultIndex::from_json_str(&results_document()).unwrap();
    assert_eq!(index.len(), 12);
    let r = index
        .lookup("sg_circle", "fanchain-25-10", "circle-4", Mode::Cached, 5)
        .unwrap();
    assert_eq!(r.cache_size, 10240);
}

#[test]
fn tree_variation_report() {
    let index = ResultIndex::from_json_str(&results_document()).unwrap();
    let spec = VariationSpec::new("sg_tree", "fanchain-25-10", "Tree", &["tree-40"]);
    let view = VariationView::build(&index, &spec);
    let config = MetricConfig::default();

    let rows = build_comparison_rows(&view, &config).unwrap();
    assert_eq!(rows.len(), 3);
    // Non-circular pattern: effective time equals total (circle time is 0).
    assert!((rows[0].speedup - 100.0 / 40.0).abs() < 1e-9);
    assert_eq!(rows[0].speedup_rating, Rating::Good);
    assert_eq!(rows[0].break_even, Some(2));

    let sizes = build_cache_size_rows(&view, &config).unwrap();
    assert_eq!(sizes[0].query_count, 5);
    // 1536 / 4096.
    assert!((sizes[0].cache_fraction - 0.375).abs() < 1e-12);
    assert_eq!(sizes[0].fraction_rating, Rating::Good);

    let series = build_chart_series(&view, DEFAULT_QUERY_COUNTS).unwrap();
    assert_eq!(series.len(), 6);
    assert!(series[..3].iter().all(|s| s.mode == Mode::Base));
    assert!(series[3..].iter().all(|s| s.mode == Mode::Cached));
    // Tree pattern: no circle segment.
    assert!(
        series[3..]
            .iter()
            .all(|s| s.segments.iter().all(|seg| seg.kind != SegmentKind::CircleCheck))
    );
}

#[test]
fn circle_variation_report() {
    let index = ResultIndex::from_json_str(&results_document()).unwrap();
    let spec = VariationSpec::new("sg_circle", "fanchain-25-10", "Circle", &["circle-4"]);
    let view = VariationView::build(&index, &spec);
    let config = MetricConfig::default();

    let rows = build_comparison_rows(&view, &config).unwrap();
    // Circular pattern keeps circle-check time in the effective total.
    assert!((rows[0].effective_ms - 90.0).abs() < 1e-9);
    assert!((rows[0].speedup - 200.0 / 90.0).abs() < 1e-9);
    assert_eq!(rows[0].break_even, Some(5));

    let sizes = build_cache_size_rows(&view, &config).unwrap();
    // 10240 / 2048 = 5.0: between the fraction thresholds.
    assert!((sizes[0].cache_fraction - 5.0).abs() < 1e-12);
    assert_eq!(sizes[0].fraction_rating, Rating::Neutral);
    // Shares sum to 100% of the effective total.
    let sum = sizes[0].uncached_pct + sizes[0].cache_pct + sizes[0].circle_pct;
    assert!((sum - 100.0).abs() < 1e-9);

    let series = build_chart_series(&view, DEFAULT_QUERY_COUNTS).unwrap();
    let cached = series.iter().find(|s| s.mode == Mode::Cached).unwrap();
    assert_eq!(cached.segments.last().unwrap().kind, SegmentKind::CircleCheck);
}

#[test]
fn uncovered_variation_fails_loudly() {
    let index = ResultIndex::from_json_str(&results_document()).unwrap();
    let spec = VariationSpec::new("sg_diamond", "fanchain-25-10", "Diamond", &["diamond-4-1"]);
    let view = VariationView::build(&index, &spec);
    let config = MetricConfig::default();

    assert!(matches!(
        build_comparison_rows(&view, &config),
        Err(ReportError::EmptySeries { .. })
    ));
    assert!(matches!(
        build_cache_size_rows(&view, &config),
        Err(ReportError::EmptySeries { .. })
    ));
    assert!(matches!(
        build_chart_series(&view, DEFAULT_QUERY_COUNTS),
        Err(ReportError::NotFound(_))
    ));
}

#[test]
fn chart_and_report_files_are_written() {
    let index = ResultIndex::from_json_str(&results_document()).unwrap();
    let spec = VariationSpec::new("sg_tree", "fanchain-25-10", "Tree pattern", &["tree-40"])
        .with_file_stem("sg_tree-fan");
    let view = VariationView::build(&index, &spec);
    let config = MetricConfig::default();

    let series = build_chart_series(&view, DEFAULT_QUERY_COUNTS).unwrap();
    let comparison = build_comparison_rows(&view, &config).unwrap();
    let cache_sizes = build_cache_size_rows(&view, &config).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let chart_path = dir.path().join("sg_tree-fan.svg");
    sg_bench_report::charts::variation_chart(&spec.title, &spec.variants, &series, &chart_path)
        .unwrap();
    assert!(chart_path.exists());

    let mut out = String::new();
    sg_bench_report::markdown::write_header(&mut out);
    sg_bench_report::markdown::write_variation_section(&mut out, &spec, &comparison, &cache_sizes);
    sg_bench_report::markdown::save_report(&out, dir.path()).unwrap();

    let report = std::fs::read_to_string(dir.path().join("report.md")).unwrap();
    assert!(report.contains("## Tree pattern"));
    assert!(report.contains("](sg_tree-fan.svg)"));
}
