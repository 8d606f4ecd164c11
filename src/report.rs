//! Report rows and chart series derived from a variation view.
//!
//! Consumes a [`VariationView`] and produces pure data for the presentation
//! layer: comparison rows (baseline vs cached, with classified speedups),
//! cache-size rows (time-component shares and size fractions), and labeled
//! numeric series for the stacked bar charts. No formatting or rendering
//! happens here.

use std::fmt;

use crate::error::{ReportError, Result};
use crate::metrics::{MetricConfig, Rating, effective_time, requires_circle_check, speedup};
use crate::record::{HeadKind, MeasurementKey, MeasurementRecord, Mode};
use crate::variation::VariationView;

// ---------------------------------------------------------------------------
// Comparison rows
// ---------------------------------------------------------------------------

/// One baseline-vs-cached comparison at a single query count.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRow {
    /// Head label of the variation.
    pub head: String,
    /// Size variant label.
    pub variant: String,
    /// Query count both records were measured at.
    pub query_count: u64,
    /// Baseline wall time in milliseconds.
    pub baseline_ms: f64,
    /// Cached effective time in milliseconds.
    pub effective_ms: f64,
    /// Speedup of the cached record over the baseline.
    pub speedup: f64,
    /// Verdict on the speedup.
    pub speedup_rating: Rating,
    /// Break-even query count from the reference table, when known.
    pub break_even: Option<u64>,
}

/// Build one comparison row per aligned `(baseline, cached)` pair, for every
/// variant in the view's spec.
///
/// # Errors
///
/// - [`ReportError::EmptySeries`] when a variant has no baseline or no cached
///   records at all.
/// - [`ReportError::Alignment`] when the two series differ in length or in
///   query count at some position; rows are never built from truncated or
///   shifted pairs.
/// - [`ReportError::DegenerateMetric`] when a cached effective time is zero.
pub fn build_comparison_rows(
    view: &VariationView<'_>,
    config: &MetricConfig,
) -> Result<Vec<ComparisonRow>> {
    let spec = view.spec();
    let include_circle = requires_circle_check(&spec.pattern);
    let head_kind = HeadKind::from_label(&spec.head);
    let break_even =
        head_kind.and_then(|kind| config.break_even_query_count(kind, &spec.pattern));

    let mut rows = Vec::new();
    for variant in &spec.variants {
        let baseline = view.baseline_series(variant);
        let cached = view.cached_series(variant);

        if baseline.is_empty() {
            return Err(empty_series(view, variant, Mode::Base));
        }
        if cached.is_empty() {
            return Err(empty_series(view, variant, Mode::Cached));
        }
        if baseline.len() != cached.len() {
            return Err(ReportError::Alignment {
                variant: variant.clone(),
                detail: format!(
                    "baseline has {} query counts, cached has {}",
                    baseline.len(),
                    cached.len()
                ),
            });
        }

        for (base, cand) in baseline.iter().zip(cached) {
            if base.key.query_count != cand.key.query_count {
                return Err(ReportError::Alignment {
                    variant: variant.clone(),
                    detail: format!(
                        "query count {} in baseline vs {} in cached at the same position",
                        base.key.query_count, cand.key.query_count
                    ),
                });
            }
            let sp = speedup(base, cand, include_circle)?;
            rows.push(ComparisonRow {
                head: spec.head.clone(),
                variant: variant.clone(),
                query_count: base.key.query_count,
                baseline_ms: base.total_time.as_millis(),
                effective_ms: effective_time(cand, include_circle).as_millis(),
                speedup: sp,
                speedup_rating: config.speedup.classify(sp),
                break_even,
            });
        }
    }
    Ok(rows)
}

// ---------------------------------------------------------------------------
// Cache-size rows
// ---------------------------------------------------------------------------

/// Time-component shares and cache-size fraction for one variant, taken from
/// its largest-query-count cached record.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheSizeRow {
    /// Size variant label.
    pub variant: String,
    /// Query count of the record the row was derived from.
    pub query_count: u64,
    /// Uncached time as a percentage of the effective total.
    pub uncached_pct: f64,
    /// Cache-access time as a percentage of the effective total.
    pub cache_pct: f64,
    /// Circle-check time as a percentage of the effective total.
    pub circle_pct: f64,
    /// Cache size over graph size (0 when the graph size is unknown).
    pub cache_fraction: f64,
    /// Verdict on the cache-size fraction.
    pub fraction_rating: Rating,
}

/// Build one cache-size row per variant from the largest-query-count cached
/// record.
///
/// # Errors
///
/// [`ReportError::EmptySeries`] when a variant has no cached records;
/// [`ReportError::DegenerateMetric`] when the effective total is zero.
pub fn build_cache_size_rows(
    view: &VariationView<'_>,
    config: &MetricConfig,
) -> Result<Vec<CacheSizeRow>> {
    let spec = view.spec();
    let include_circle = requires_circle_check(&spec.pattern);

    let mut rows = Vec::new();
    for variant in &spec.variants {
        let cached = view.cached_series(variant);
        // The series is sorted ascending, so the last record has the largest
        // query count.
        let Some(record) = cached.last() else {
            return Err(empty_series(view, variant, Mode::Cached));
        };

        let total_ms = effective_time(record, include_circle).as_millis();
        if total_ms == 0.0 {
            return Err(ReportError::DegenerateMetric(record.key.clone()));
        }
        let share = |ms: f64| ms / total_ms * 100.0;

        let fraction = record.cache_fraction();
        rows.push(CacheSizeRow {
            variant: variant.clone(),
            query_count: record.key.query_count,
            uncached_pct: share(record.time_uncached().as_millis()),
            cache_pct: share(record.cache_access_time().as_millis()),
            circle_pct: share(record.circle_check_time.as_millis()),
            cache_fraction: fraction,
            fraction_rating: config.cache_fraction.classify(fraction),
        });
    }
    Ok(rows)
}

// ---------------------------------------------------------------------------
// Chart series
// ---------------------------------------------------------------------------

/// One stacked segment of a chart series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// Time not attributable to the cache or cycle detection.
    Uncached,
    /// Cache read plus store time.
    CacheAccess,
    /// Cycle-detection time.
    CircleCheck,
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uncached => write!(f, "uncached"),
            Self::CacheAccess => write!(f, "cache access"),
            Self::CircleCheck => write!(f, "circle check"),
        }
    }
}

/// One segment of a series: a kind plus one value (ms) per variant, in the
/// spec's variant order.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSegment {
    /// What this segment measures.
    pub kind: SegmentKind,
    /// Milliseconds per variant, in spec order.
    pub values: Vec<f64>,
}

/// One labeled series of a stacked bar chart: a `(mode, query count)` pair
/// with its stacked segments.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    /// Legend label, e.g. `cache (5 queries)`.
    pub label: String,
    /// Measurement mode of the series.
    pub mode: Mode,
    /// Query count of the series.
    pub query_count: u64,
    /// Stacked segments in fixed order: uncached, cache access, circle check.
    pub segments: Vec<ChartSegment>,
}

impl ChartSeries {
    /// Total stacked height (ms) at `variant_index`.
    pub fn total_at(&self, variant_index: usize) -> f64 {
        self.segments
            .iter()
            .map(|s| s.values.get(variant_index).copied().unwrap_or(0.0))
            .sum()
    }
}

/// Build the chart series for a view: per query count, one single-segment
/// series for the baseline (uncached time) followed by one stacked series for
/// the cached mode (uncached, cache access, and circle check for circle
/// patterns).
///
/// # Errors
///
/// [`ReportError::NotFound`] with the full key when any `(variant, mode,
/// query count)` combination is missing from the view.
pub fn build_chart_series(
    view: &VariationView<'_>,
    query_counts: &[u64],
) -> Result<Vec<ChartSeries>> {
    let spec = view.spec();
    let include_circle = requires_circle_check(&spec.pattern);

    let mut series = Vec::with_capacity(query_counts.len() * 2);

    for &count in query_counts {
        let mut values = Vec::with_capacity(spec.variants.len());
        for variant in &spec.variants {
            let record = find_at(view, variant, Mode::Base, count)?;
            values.push(record.time_uncached().as_millis());
        }
        series.push(ChartSeries {
            label: format!("no cache ({count} queries)"),
            mode: Mode::Base,
            query_count: count,
            segments: vec![ChartSegment {
                kind: SegmentKind::Uncached,
                values,
            }],
        });
    }

    for &count in query_counts {
        let mut uncached = Vec::with_capacity(spec.variants.len());
        let mut cache = Vec::with_capacity(spec.variants.len());
        let mut circle = Vec::with_capacity(spec.variants.len());
        for variant in &spec.variants {
            let record = find_at(view, variant, Mode::Cached, count)?;
            uncached.push(record.time_uncached().as_millis());
            cache.push(record.cache_access_time().as_millis());
            circle.push(record.circle_check_time.as_millis());
        }
        let mut segments = vec![
            ChartSegment {
                kind: SegmentKind::Uncached,
                values: uncached,
            },
            ChartSegment {
                kind: SegmentKind::CacheAccess,
                values: cache,
            },
        ];
        if include_circle {
            segments.push(ChartSegment {
                kind: SegmentKind::CircleCheck,
                values: circle,
            });
        }
        series.push(ChartSeries {
            label: format!("cache ({count} queries)"),
            mode: Mode::Cached,
            query_count: count,
            segments,
        });
    }

    Ok(series)
}

fn find_at<'a>(
    view: &VariationView<'a>,
    variant: &str,
    mode: Mode,
    query_count: u64,
) -> Result<&'a MeasurementRecord> {
    let records = match mode {
        Mode::Base => view.baseline_series(variant),
        Mode::Cached => view.cached_series(variant),
    };
    records
        .iter()
        .find(|r| r.key.query_count == query_count)
        .copied()
        .ok_or_else(|| {
            let spec = view.spec();
            ReportError::NotFound(MeasurementKey {
                pattern: spec.pattern.clone(),
                head: spec.head.clone(),
                variant: variant.to_string(),
                mode,
                query_count,
            })
        })
}

fn empty_series(view: &VariationView<'_>, variant: &str, mode: Mode) -> ReportError {
    let spec = view.spec();
    ReportError::EmptySeries {
        pattern: spec.pattern.clone(),
        head: spec.head.clone(),
        variant: variant.to_string(),
        mode,
    }
}
