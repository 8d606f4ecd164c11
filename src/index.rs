//! Loading the raw benchmark document into a keyed, immutable index.
//!
//! The harness writes one nested JSON document per run, keyed in the order
//! `pattern → head → variant → mode → query_count`, terminating in a stats
//! leaf. [`ResultIndex`] deserializes the whole document into typed records
//! at the boundary, validates every level, and serves exact-match lookups for
//! the rest of the process. It is built once per file and never mutated.

use hashbrown::HashMap;
use indexmap::IndexMap;
use serde::Deserialize;

use crate::duration::BenchTime;
use crate::error::{ReportError, Result};
use crate::record::{MeasurementKey, MeasurementRecord, Mode};

// ---------------------------------------------------------------------------
// Raw document shapes
// ---------------------------------------------------------------------------

/// One stats leaf of the raw document.
///
/// Older harness versions do not emit `circle_check_time`, the cache timing
/// split, or the size pair; those fields default to zero so earlier result
/// files remain loadable. Everything else is required and its absence fails
/// the load.
#[derive(Debug, Clone, Deserialize)]
pub struct RawStats {
    /// Wall time for the full operation.
    pub time: BenchTime,
    /// Cycle-detection time (absent before the circle patterns existed).
    #[serde(default)]
    pub circle_check_time: BenchTime,
    /// Cache read time (absent in older schemas).
    #[serde(default)]
    pub cache_read_time: BenchTime,
    /// Cache store time (absent in older schemas).
    #[serde(default)]
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
    /// Estimated cache size in bytes.
    pub cache_size_estimate: u64,
    /// Measured cache size in bytes (absent in older schemas).
    #[serde(default)]
    pub cache_size: u64,
    /// Measured graph size in bytes (absent in older schemas).
    #[serde(default)]
    pub graph_size: u64,
}

/// The full nested document: `pattern → head → variant → mode → query_count
/// → stats`. [`IndexMap`] keeps document order, so records iterate in the
/// order the harness wrote them.
pub type RawDocument =
    IndexMap<String, IndexMap<String, IndexMap<String, IndexMap<String, IndexMap<String, RawStats>>>>>;

// ---------------------------------------------------------------------------
// Index
// ---------------------------------------------------------------------------

/// The keyed collection of all measurement records from one result file.
///
/// Built once at load time, read-only afterwards. Lookups are exact
/// five-tuple matches and fail loudly on absent keys.
#[derive(Debug, Default)]
pub struct ResultIndex {
    records: Vec<MeasurementRecord>,
    by_key: HashMap<MeasurementKey, usize>,
}

impl ResultIndex {
    /// Parse and index a raw JSON document.
    ///
    /// # Errors
    ///
    /// [`ReportError::MalformedInput`] if the JSON does not match the nested
    /// schema, or [`ReportError::DuplicateKey`] if two leaves collide on the
    /// same key (e.g. query-count keys `"5"` and `"05"`).
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: RawDocument = serde_json::from_str(json)
            .map_err(|e| ReportError::MalformedInput(e.to_string()))?;
        Self::from_raw(raw)
    }

    /// Index an already-deserialized raw document.
    ///
    /// # Errors
    ///
    /// [`ReportError::MalformedInput`] if a query-count key is not a positive
    /// integer or a mode key is unknown; [`ReportError::DuplicateKey`] if two
    /// leaves map to the same five-tuple.
    pub fn from_raw(raw: RawDocument) -> Result<Self> {
        let mut index = Self::default();
        for (pattern, heads) in raw {
            for (head, variants) in heads {
                for (variant, modes) in variants {
                    for (mode_label, runs) in modes {
                        let mode: Mode = mode_label.parse()?;
                        for (count_label, stats) in runs {
                            let query_count = parse_query_count(
                                &count_label,
                                &pattern,
                                &head,
                                &variant,
                                mode,
                            )?;
                            let key = MeasurementKey {
                                pattern: pattern.clone(),
                                head: head.clone(),
                                variant: variant.clone(),
                                mode,
                                query_count,
                            };
                            index.insert(key, stats)?;
                        }
                    }
                }
            }
        }
        Ok(index)
    }

    fn insert(&mut self, key: MeasurementKey, stats: RawStats) -> Result<()> {
        if self.by_key.contains_key(&key) {
            return Err(ReportError::DuplicateKey(key));
        }
        let record = MeasurementRecord {
            key: key.clone(),
            total_time: stats.time,
            circle_check_time: stats.circle_check_time,
            cache_read_time: stats.cache_read_time,
            cache_store_time: stats.cache_store_time,
            edges_traversed: stats.edges_traversed,
            nodes_visited: stats.nodes_visited,
            cache_reads: stats.cache_reads,
            cache_writes: stats.cache_writes,
            cache_hits: stats.cache_hits,
            cache_size_estimate: stats.cache_size_estimate,
            cache_size: stats.cache_size,
            graph_size: stats.graph_size,
        };
        self.by_key.insert(key, self.records.len());
        self.records.push(record);
        Ok(())
    }

    /// Number of records in the index.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the index holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records, in document order.
    pub fn records(&self) -> &[MeasurementRecord] {
        &self.records
    }

    /// Fetch a record by key, or `None`.
    pub fn get(&self, key: &MeasurementKey) -> Option<&MeasurementRecord> {
        self.by_key.get(key).map(|&i| &self.records[i])
    }

    /// Exact five-tuple lookup.
    ///
    /// # Errors
    ///
    /// [`ReportError::NotFound`] reporting the full requested key when no
    /// record matches.
    pub fn lookup(
        &self,
        pattern: &str,
        head: &str,
        variant: &str,
        mode: Mode,
        query_count: u64,
    ) -> Result<&MeasurementRecord> {
        let key = MeasurementKey {
            pattern: pattern.to_string(),
            head: head.to_string(),
            variant: variant.to_string(),
            mode,
            query_count,
        };
        self.get(&key).ok_or(ReportError::NotFound(key))
    }
}

fn parse_query_count(
    label: &str,
    pattern: &str,
    head: &str,
    variant: &str,
    mode: Mode,
) -> Result<u64> {
    match label.parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ReportError::MalformedInput(format!(
            "query-count key '{label}' under {pattern}/{head}/{variant}/{mode} \
             is not a positive integer"
        ))),
    }
}
