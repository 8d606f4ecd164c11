//! Variation selection: named slices of the result index.
//!
//! A [`VariationSpec`] fixes one pattern and one head and names the ordered
//! set of size variants to compare; [`VariationView`] materializes the
//! matching records grouped by mode and variant, each group sorted by query
//! count. The ten reference variations mirror the standard reporting targets
//! of the benchmark suite.

use std::collections::BTreeMap;

use crate::index::ResultIndex;
use crate::record::{MeasurementRecord, Mode};

/// Query counts measured for every reference variation.
pub const DEFAULT_QUERY_COUNTS: &[u64] = &[1, 2, 5];

/// Head label of the fanout-chain head used by the reference variations.
pub const FAN_HEAD: &str = "fanchain-25-10";

/// Head label of the linear head used by the reference variations.
pub const LINEAR_HEAD: &str = "linear-100";

/// A read-only descriptor of one reporting target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariationSpec {
    /// Pattern family name, e.g. `sg_tree`.
    pub pattern: String,
    /// Head label, e.g. `fanchain-25-10`.
    pub head: String,
    /// Size variants to compare, in display order.
    pub variants: Vec<String>,
    /// Title used for the chart caption and the report section.
    pub title: String,
    /// Output identifier used for file names.
    pub file_stem: String,
}

impl VariationSpec {
    /// Create a spec with the default file stem `bench-{pattern}-{head}`.
    pub fn new(
        pattern: impl Into<String>,
        head: impl Into<String>,
        title: impl Into<String>,
        variants: &[&str],
    ) -> Self {
        let pattern = pattern.into();
        let head = head.into();
        Self {
            file_stem: format!("bench-{pattern}-{head}"),
            variants: variants.iter().map(|v| (*v).to_string()).collect(),
            title: title.into(),
            pattern,
            head,
        }
    }

    /// Replace the output file stem.
    #[must_use]
    pub fn with_file_stem(mut self, stem: impl Into<String>) -> Self {
        self.file_stem = stem.into();
        self
    }
}

/// The ten standard reporting targets: tree, linear, diamond (width and
/// height sweeps), and circle patterns, each under the fanout and the linear
/// head.
pub fn reference_variations() -> Vec<VariationSpec> {
    let tree = &["tree-40", "tree-80", "tree-160"];
    let linear = &["linear-40", "linear-80", "linear-160"];
    let diamond_w = &["diamond-4-1", "diamond-8-1", "diamond-16-1"];
    let diamond_h = &["diamond-4-1", "diamond-4-2", "diamond-4-4"];
    let circle = &["circle-4", "circle-16", "circle-64"];

    vec![
        VariationSpec::new("sg_tree", FAN_HEAD, "Tree pattern with fan head", tree)
            .with_file_stem("sg_tree-fan"),
        VariationSpec::new("sg_tree", LINEAR_HEAD, "Tree pattern with linear head", tree)
            .with_file_stem("sg_tree-lin"),
        VariationSpec::new("sg_linear", FAN_HEAD, "Linear pattern with fan head", linear)
            .with_file_stem("sg_linear-fan"),
        VariationSpec::new(
            "sg_linear",
            LINEAR_HEAD,
            "Linear pattern with linear head",
            linear,
        )
        .with_file_stem("sg_linear-lin"),
        VariationSpec::new(
            "sg_diamond",
            FAN_HEAD,
            "Diamond pattern (varying width) with fan head",
            diamond_w,
        )
        .with_file_stem("sg_diamond-w-fan"),
        VariationSpec::new(
            "sg_diamond",
            LINEAR_HEAD,
            "Diamond pattern (varying width) with linear head",
            diamond_w,
        )
        .with_file_stem("sg_diamond-w-lin"),
        VariationSpec::new(
            "sg_diamond",
            FAN_HEAD,
            "Diamond pattern (varying height) with fan head",
            diamond_h,
        )
        .with_file_stem("sg_diamond-h-fan"),
        VariationSpec::new(
            "sg_diamond",
            LINEAR_HEAD,
            "Diamond pattern (varying height) with linear head",
            diamond_h,
        )
        .with_file_stem("sg_diamond-h-lin"),
        VariationSpec::new("sg_circle", FAN_HEAD, "Circle pattern with fan head", circle)
            .with_file_stem("sg_circle-fan"),
        VariationSpec::new(
            "sg_circle",
            LINEAR_HEAD,
            "Circle pattern with linear head",
            circle,
        )
        .with_file_stem("sg_circle-lin"),
    ]
}

/// A materialized slice of the index for one [`VariationSpec`]: records
/// grouped by `(mode, variant)`, each group sorted by ascending query count.
///
/// A variant with no matching records yields an empty bucket rather than an
/// error; the report builders fail when they later require an entry from it.
#[derive(Debug)]
pub struct VariationView<'a> {
    spec: &'a VariationSpec,
    buckets: BTreeMap<(Mode, String), Vec<&'a MeasurementRecord>>,
}

impl<'a> VariationView<'a> {
    /// Filter `index` down to the records named by `spec`.
    pub fn build(index: &'a ResultIndex, spec: &'a VariationSpec) -> Self {
        let mut buckets: BTreeMap<(Mode, String), Vec<&'a MeasurementRecord>> = BTreeMap::new();
        for record in index.records() {
            let key = &record.key;
            if key.pattern == spec.pattern
                && key.head == spec.head
                && spec.variants.iter().any(|v| *v == key.variant)
            {
                buckets
                    .entry((key.mode, key.variant.clone()))
                    .or_default()
                    .push(record);
            }
        }
        for bucket in buckets.values_mut() {
            bucket.sort_by_key(|r| r.key.query_count);
        }
        Self { spec, buckets }
    }

    /// The spec this view was built from.
    pub fn spec(&self) -> &VariationSpec {
        self.spec
    }

    /// Baseline records for `variant`, ordered by query count.
    pub fn baseline_series(&self, variant: &str) -> &[&'a MeasurementRecord] {
        self.series(Mode::Base, variant)
    }

    /// Cached records for `variant`, ordered by query count.
    pub fn cached_series(&self, variant: &str) -> &[&'a MeasurementRecord] {
        self.series(Mode::Cached, variant)
    }

    fn series(&self, mode: Mode, variant: &str) -> &[&'a MeasurementRecord] {
        self.buckets
            .get(&(mode, variant.to_string()))
            .map_or(&[], Vec::as_slice)
    }
}
