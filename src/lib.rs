//! Aggregation and comparative reporting for scope-graph caching benchmarks.
//!
//! The benchmark harness writes one nested JSON document per run, keyed by
//! `pattern → head → variant → mode → query_count`. This crate loads that
//! document into a typed, immutable [`ResultIndex`], slices it into
//! [`VariationView`]s per reporting target, derives comparative metrics
//! (speedups, time-component shares, cache-size fractions, three-way
//! classifications), and turns them into chart series and table rows. Chart
//! rendering ([`charts`]) and Markdown assembly ([`markdown`]) are thin
//! presentation layers over those rows.
//!
//! # Example
//!
//! ```
//! use sg_bench_report::{
//!     MetricConfig, ResultIndex, VariationSpec, VariationView,
//!     report::build_comparison_rows,
//! };
//!
//! let json = r#"{"sg_tree": {"fanchain-25-10": {"tree-40": {
//!     "base":   {"1": {"time": {"secs": 0, "nanos": 100000000},
//!                      "edges_traversed": 9, "nodes_visited": 4,
//!                      "cache_reads": 0, "cache_writes": 0, "cache_hits": 0,
//!                      "cache_size_estimate": 0}},
//!     "cached": {"1": {"time": {"secs": 0, "nanos": 40000000},
//!                      "edges_traversed": 3, "nodes_visited": 2,
//!                      "cache_reads": 2, "cache_writes": 1, "cache_hits": 1,
//!                      "cache_size_estimate": 128}}
//! }}}}"#;
//!
//! let index = ResultIndex::from_json_str(json).unwrap();
//! let spec = VariationSpec::new("sg_tree", "fanchain-25-10", "Tree", &["tree-40"]);
//! let view = VariationView::build(&index, &spec);
//! let rows = build_comparison_rows(&view, &MetricConfig::default()).unwrap();
//!
//! assert!((rows[0].speedup - 2.5).abs() < 1e-9);
//! ```

pub mod charts;
pub mod duration;
pub mod error;
pub mod index;
pub mod markdown;
pub mod metrics;
pub mod record;
pub mod report;
pub mod variation;

pub use duration::BenchTime;
pub use error::{ReportError, Result};
pub use index::{RawStats, ResultIndex};
pub use metrics::{
    MetricConfig, Rating, Thresholds, effective_time, requires_circle_check, speedup,
};
pub use record::{HeadKind, MeasurementKey, MeasurementRecord, Mode};
pub use report::{
    CacheSizeRow, ChartSegment, ChartSeries, ComparisonRow, SegmentKind, build_cache_size_rows,
    build_chart_series, build_comparison_rows,
};
pub use variation::{DEFAULT_QUERY_COUNTS, VariationSpec, VariationView, reference_variations};
