//! Derived metrics: effective time, speedup, and three-way classification.
//!
//! Pure functions over one or a pair of [`MeasurementRecord`]s. The
//! classification thresholds and the break-even table are empirically tuned
//! reporting parameters, so they live on [`MetricConfig`] and are passed in
//! explicitly rather than read from module constants.

use std::collections::BTreeMap;
use std::fmt;

use crate::duration::BenchTime;
use crate::error::{ReportError, Result};
use crate::record::{HeadKind, MeasurementRecord};

/// Three-way verdict on a derived metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rating {
    /// Past the favorable threshold.
    Good,
    /// Between the thresholds.
    Neutral,
    /// Past the unfavorable threshold.
    Bad,
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Good => write!(f, "good"),
            Self::Neutral => write!(f, "neutral"),
            Self::Bad => write!(f, "bad"),
        }
    }
}

/// Which side of a threshold pair is favorable.
///
/// Speedups improve upward; size ratios improve downward. Classification is
/// parameterized on this instead of assuming one monotonicity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Larger values are better (speedup).
    HigherIsBetter,
    /// Smaller values are better (cache-size fraction).
    LowerIsBetter,
}

/// A threshold pair with its favorable direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// Lower threshold.
    pub low: f64,
    /// Upper threshold.
    pub high: f64,
    /// Which direction is favorable.
    pub direction: Direction,
}

impl Thresholds {
    /// Classify `value`: strictly below `low` and strictly above `high` take
    /// the direction-dependent verdicts, anything between is neutral.
    pub fn classify(&self, value: f64) -> Rating {
        let (below, above) = match self.direction {
            Direction::HigherIsBetter => (Rating::Bad, Rating::Good),
            Direction::LowerIsBetter => (Rating::Good, Rating::Bad),
        };
        if value < self.low {
            below
        } else if value > self.high {
            above
        } else {
            Rating::Neutral
        }
    }
}

/// Break-even reference data: `(head kind, pattern) → smallest query count at
/// which the cached approach is known to beat the baseline`.
///
/// This is annotation data from prior measurement campaigns, not computed
/// from the loaded dataset.
pub type BreakEvenTable = BTreeMap<(HeadKind, String), u64>;

/// The empirically observed break-even counts for the reference patterns.
pub fn default_break_even_table() -> BreakEvenTable {
    let entries = [
        (HeadKind::Fanout, "sg_tree", 2),
        (HeadKind::Fanout, "sg_linear", 2),
        (HeadKind::Fanout, "sg_diamond", 3),
        (HeadKind::Fanout, "sg_circle", 5),
        (HeadKind::Linear, "sg_tree", 1),
        (HeadKind::Linear, "sg_linear", 1),
        (HeadKind::Linear, "sg_diamond", 2),
        (HeadKind::Linear, "sg_circle", 4),
    ];
    entries
        .into_iter()
        .map(|(head, pattern, count)| ((head, pattern.to_string()), count))
        .collect()
}

/// Tunable reporting parameters for the derived-metric engine.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricConfig {
    /// Speedup classification: bad below 1.0, good above 1.0001.
    pub speedup: Thresholds,
    /// Cache-size fraction classification: good below 1.0, bad above 10.0.
    pub cache_fraction: Thresholds,
    /// Break-even reference table.
    pub break_even: BreakEvenTable,
}

impl Default for MetricConfig {
    fn default() -> Self {
        Self {
            speedup: Thresholds {
                low: 1.0,
                high: 1.0001,
                direction: Direction::HigherIsBetter,
            },
            cache_fraction: Thresholds {
                low: 1.0,
                high: 10.0,
                direction: Direction::LowerIsBetter,
            },
            break_even: default_break_even_table(),
        }
    }
}

impl MetricConfig {
    /// The smallest query count at which the cached approach beats the
    /// baseline for `(head, pattern)`, per the reference table. `None` for
    /// combinations the table does not cover.
    pub fn break_even_query_count(&self, head: HeadKind, pattern: &str) -> Option<u64> {
        self.break_even.get(&(head, pattern.to_string())).copied()
    }
}

/// Whether a pattern semantically requires cycle detection, so its
/// circle-check time counts toward the effective time. A per-pattern
/// property, not per-record.
pub fn requires_circle_check(pattern: &str) -> bool {
    pattern.contains("circle")
}

/// The time a record is charged with for comparison purposes.
///
/// With `include_circle_check` the full wall time counts; without it the
/// circle-check contribution is deducted (uncached time plus cache-access
/// time remain).
pub fn effective_time(record: &MeasurementRecord, include_circle_check: bool) -> BenchTime {
    if include_circle_check {
        record.total_time
    } else {
        record.total_time - record.circle_check_time
    }
}

/// Speedup of `candidate` over `baseline`: baseline wall time divided by the
/// candidate's effective time, in milliseconds.
///
/// # Errors
///
/// [`ReportError::DegenerateMetric`] when the candidate's effective time is
/// zero; the ratio is never silently reported as infinity.
pub fn speedup(
    baseline: &MeasurementRecord,
    candidate: &MeasurementRecord,
    include_circle_check: bool,
) -> Result<f64> {
    let denominator = effective_time(candidate, include_circle_check).as_millis();
    if denominator == 0.0 {
        return Err(ReportError::DegenerateMetric(candidate.key.clone()));
    }
    Ok(baseline.total_time.as_millis() / denominator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{MeasurementKey, Mode};

    fn record(pattern: &str, mode: Mode, total_ms: u64, cache_ms: u64, circle_ms: u64) -> MeasurementRecord {
        MeasurementRecord {
            key: MeasurementKey {
                pattern: pattern.to_string(),
                head: "fanchain-25-10".to_string(),
                variant: "x-1".to_string(),
                mode,
                query_count: 1,
            },
            total_time: BenchTime::from_millis(total_ms),
            circle_check_time: BenchTime::from_millis(circle_ms),
            cache_read_time: BenchTime::from_millis(cache_ms),
            cache_store_time: BenchTime::ZERO,
            edges_traversed: 0,
            nodes_visited: 0,
            cache_reads: 0,
            cache_writes: 0,
            cache_hits: 0,
            cache_size_estimate: 0,
            cache_size: 0,
            graph_size: 0,
        }
    }

    #[test]
    fn test_effective_time_deducts_circle_check_only() {
        let r = record("sg_circle", Mode::Cached, 40, 5, 8);
        assert_eq!(effective_time(&r, true), BenchTime::from_millis(40));
        // total - circle = uncached + cache access
        assert_eq!(effective_time(&r, false), BenchTime::from_millis(32));
        assert_eq!(
            effective_time(&r, false),
            r.time_uncached() + r.cache_access_time()
        );
    }

    #[test]
    fn test_speedup_reference_example() {
        // baseline 100ms; cached 40ms total, 5ms cache access, 0ms circle.
        let baseline = record("sg_tree", Mode::Base, 100, 0, 0);
        let cached = record("sg_tree", Mode::Cached, 40, 5, 0);
        let sp = speedup(&baseline, &cached, false).unwrap();
        assert!((sp - 2.5).abs() < 1e-12);
        let config = MetricConfig::default();
        assert_eq!(config.speedup.classify(sp), Rating::Good);
    }

    #[test]
    fn test_speedup_zero_denominator_is_an_error() {
        let baseline = record("sg_tree", Mode::Base, 100, 0, 0);
        let cached = record("sg_tree", Mode::Cached, 0, 0, 0);
        let err = speedup(&baseline, &cached, false).unwrap_err();
        assert!(matches!(err, ReportError::DegenerateMetric(_)));
    }

    #[test]
    fn test_speedup_classification_tracks_effective_time() {
        let config = MetricConfig::default();
        let baseline = record("sg_tree", Mode::Base, 100, 0, 0);

        let faster = record("sg_tree", Mode::Cached, 50, 0, 0);
        let sp = speedup(&baseline, &faster, false).unwrap();
        assert_eq!(config.speedup.classify(sp), Rating::Good);

        let slower = record("sg_tree", Mode::Cached, 200, 0, 0);
        let sp = speedup(&baseline, &slower, false).unwrap();
        assert_eq!(config.speedup.classify(sp), Rating::Bad);

        let even = record("sg_tree", Mode::Cached, 100, 0, 0);
        let sp = speedup(&baseline, &even, false).unwrap();
        assert_eq!(config.speedup.classify(sp), Rating::Neutral);
    }

    #[test]
    fn test_cache_fraction_direction_is_inverted() {
        let config = MetricConfig::default();
        assert_eq!(config.cache_fraction.classify(0.5), Rating::Good);
        assert_eq!(config.cache_fraction.classify(5.0), Rating::Neutral);
        assert_eq!(config.cache_fraction.classify(25.0), Rating::Bad);
    }

    #[test]
    fn test_break_even_table() {
        let config = MetricConfig::default();
        assert_eq!(
            config.break_even_query_count(HeadKind::Fanout, "sg_circle"),
            Some(5)
        );
        assert_eq!(
            config.break_even_query_count(HeadKind::Linear, "sg_tree"),
            Some(1)
        );
        assert_eq!(config.break_even_query_count(HeadKind::Fanout, "sg_star"), None);
    }

    #[test]
    fn test_break_even_table_is_overridable() {
        let mut config = MetricConfig::default();
        config
            .break_even
            .insert((HeadKind::Fanout, "sg_circle".to_string()), 7);
        assert_eq!(
            config.break_even_query_count(HeadKind::Fanout, "sg_circle"),
            Some(7)
        );
    }

    #[test]
    fn test_requires_circle_check() {
        assert!(requires_circle_check("sg_circle"));
        assert!(!requires_circle_check("sg_tree"));
        assert!(!requires_circle_check("sg_diamond"));
    }
}
