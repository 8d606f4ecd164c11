//! Measurement records and the five-dimensional key that identifies them.
//!
//! One record corresponds to one leaf of the raw benchmark document: a fixed
//! pattern, head, size variant, measurement mode, and query count, together
//! with the timing breakdown and traversal/cache counters observed for that
//! combination.

use std::fmt;
use std::str::FromStr;

use crate::duration::BenchTime;
use crate::error::ReportError;

/// Measurement mode: plain resolution or resolution through the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Mode {
    /// No caching ("base" in the raw document).
    Base,
    /// Cached resolution ("cached" in the raw document).
    Cached,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Base => write!(f, "base"),
            Self::Cached => write!(f, "cached"),
        }
    }
}

impl FromStr for Mode {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "base" => Ok(Self::Base),
            "cached" => Ok(Self::Cached),
            other => Err(ReportError::MalformedInput(format!(
                "unknown measurement mode '{other}' (expected 'base' or 'cached')"
            ))),
        }
    }
}

/// The shape of the head sub-structure attached to a pattern.
///
/// Head labels are produced by the benchmark generator as
/// `fanchain-{length}-{decls}` or `linear-{length}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HeadKind {
    /// A chain of fanouts.
    Fanout,
    /// A linear chain.
    Linear,
}

impl HeadKind {
    /// Classify a head label by its generator prefix. Returns `None` for
    /// labels neither generator produces.
    pub fn from_label(label: &str) -> Option<Self> {
        if label.starts_with("fanchain-") {
            Some(Self::Fanout)
        } else if label.starts_with("linear-") {
            Some(Self::Linear)
        } else {
            None
        }
    }
}

impl fmt::Display for HeadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fanout => write!(f, "fanout"),
            Self::Linear => write!(f, "linear"),
        }
    }
}

/// The five-dimensional key identifying one measurement.
///
/// Identity is structural: two keys are equal iff all five components are
/// equal. The `Display` form (`pattern/head/variant/mode/query_count`) is for
/// error messages only and never participates in comparisons.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MeasurementKey {
    /// Pattern family name, e.g. `sg_tree`.
    pub pattern: String,
    /// Head label, e.g. `fanchain-25-10`.
    pub head: String,
    /// Size variant label, e.g. `tree-80`.
    pub variant: String,
    /// Measurement mode.
    pub mode: Mode,
    /// Number of queries issued in the measured run (positive).
    pub query_count: u64,
}

impl fmt::Display for MeasurementKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}/{}",
            self.pattern, self.head, self.variant, self.mode, self.query_count
        )
    }
}

/// One raw benchmark sample: timing breakdown plus traversal/cache counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeasurementRecord {
    /// The five-dimensional key this record was filed under.
    pub key: MeasurementKey,
    /// Wall time for the full operation.
    pub total_time: BenchTime,
    /// Time spent in cycle detection; zero when not applicable to the mode.
    pub circle_check_time: BenchTime,
    /// Time spent reading from the cache.
    pub cache_read_time: BenchTime,
    /// Time spent writing to the cache.
    pub cache_store_time: BenchTime,
    /// Edges traversed during resolution.
    pub edges_traversed: u64,
    /// Nodes visited during resolution.
    pub nodes_visited: u64,
    /// Number of cache read operations.
    pub cache_reads: u64,
    /// Number of cache write operations.
    pub cache_writes: u64,
    /// Number of cache hits.
    pub cache_hits: u64,
    /// Estimated cache size in bytes, as reported by the harness.
    pub cache_size_estimate: u64,
    /// Measured cache size in bytes.
    pub cache_size: u64,
    /// Measured graph size in bytes; zero for runs that did not measure it.
    pub graph_size: u64,
}

impl MeasurementRecord {
    /// Total time spent on cache traffic: reads plus stores.
    pub fn cache_access_time(&self) -> BenchTime {
        self.cache_read_time + self.cache_store_time
    }

    /// Time not attributable to the cache or to cycle detection:
    /// `total - cache access - circle check`.
    pub fn time_uncached(&self) -> BenchTime {
        self.total_time - self.cache_access_time() - self.circle_check_time
    }

    /// Ratio of cache size to graph size, or `0.0` when the graph size was
    /// not measured (`graph_size == 0`).
    pub fn cache_fraction(&self) -> f64 {
        if self.graph_size == 0 {
            0.0
        } else {
            self.cache_size as f64 / self.graph_size as f64
        }
    }

    /// The head kind of this record, if its head label is recognized.
    pub fn head_kind(&self) -> Option<HeadKind> {
        HeadKind::from_label(&self.key.head)
    }
}
