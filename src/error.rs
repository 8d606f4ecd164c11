//! Error types for benchmark-report generation.
//!
//! Every error is raised eagerly at the first violation and propagated to the
//! caller of the report-building step; the core never substitutes defaults or
//! placeholders, since a wrong number silently included in a performance
//! report is worse than a visible failure.

use crate::record::{MeasurementKey, Mode};

/// Errors that can occur while loading benchmark results or building reports.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReportError {
    /// The raw document is missing a required field or level, or a key could
    /// not be parsed. Aborts the load.
    #[error("malformed benchmark document: {0}")]
    MalformedInput(String),

    /// Two leaves of the raw document map to the same five-dimensional key.
    #[error("duplicate measurement key: {0}")]
    DuplicateKey(MeasurementKey),

    /// A lookup or report step required a key with no matching record.
    #[error("no measurement found for {0}")]
    NotFound(MeasurementKey),

    /// A report step required a series that has no records at all.
    #[error("no {mode} measurements for {pattern}/{head}/{variant}")]
    EmptySeries {
        /// Pattern family name.
        pattern: String,
        /// Head label.
        head: String,
        /// Size variant label.
        variant: String,
        /// Measurement mode of the missing series.
        mode: Mode,
    },

    /// Baseline and cached series for a variant disagree on query counts.
    #[error("baseline and cached series disagree for variant '{variant}': {detail}")]
    Alignment {
        /// Size variant label.
        variant: String,
        /// What exactly disagreed.
        detail: String,
    },

    /// A derived ratio has a zero denominator.
    #[error("effective time is zero for {0}; ratio is undefined")]
    DegenerateMetric(MeasurementKey),
}

/// Result alias used across the crate.
pub type Result<T> = core::result::Result<T, ReportError>;
