//! Markdown report assembly from report rows.
//!
//! Produces `report.md`: one section per variation with the embedded chart,
//! the baseline-vs-cached comparison table, and the cache-size table. This is
//! presentation glue only; every number comes from the report builders.

use std::fmt::Write;
use std::path::Path;

use crate::metrics::Rating;
use crate::report::{CacheSizeRow, ComparisonRow};
use crate::variation::VariationSpec;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Format milliseconds as a human-readable string.
pub fn fmt_ms(ms: f64) -> String {
    if ms >= 1_000.0 {
        format!("{:.2} s", ms / 1_000.0)
    } else if ms >= 1.0 {
        format!("{:.2} ms", ms)
    } else {
        format!("{:.1} µs", ms * 1_000.0)
    }
}

/// Render a classified value; good verdicts are bolded.
fn fmt_rated(value: &str, rating: Rating) -> String {
    match rating {
        Rating::Good => format!("**{value}** ({rating})"),
        Rating::Neutral | Rating::Bad => format!("{value} ({rating})"),
    }
}

// ---------------------------------------------------------------------------
// Report sections
// ---------------------------------------------------------------------------

/// Write the report title and methodology preamble.
pub fn write_header(out: &mut String) {
    writeln!(out, "# Scope-Graph Caching Benchmark Report\n").unwrap();
    writeln!(
        out,
        "Baseline (no cache) vs cached query resolution across graph patterns, \
         head shapes, size variants, and query counts. Cached times are effective \
         times: for non-circular patterns the cycle-detection component is \
         excluded, since those patterns do not require it.\n"
    )
    .unwrap();
    writeln!(
        out,
        "Break-even counts come from prior measurement campaigns, not from the \
         loaded dataset.\n"
    )
    .unwrap();
}

/// Write one variation section: chart reference plus both tables.
pub fn write_variation_section(
    out: &mut String,
    spec: &VariationSpec,
    comparison: &[ComparisonRow],
    cache_sizes: &[CacheSizeRow],
) {
    writeln!(out, "## {}\n", spec.title).unwrap();
    writeln!(out, "![{}]({}.svg)\n", spec.title, spec.file_stem).unwrap();

    writeln!(
        out,
        "| Head | Variant | Queries | Baseline | Cached (effective) | Speedup | Break-even |"
    )
    .unwrap();
    writeln!(
        out,
        "|------|---------|---------|----------|--------------------|---------|------------|"
    )
    .unwrap();
    for row in comparison {
        let speedup = fmt_rated(&format!("{:.2}×", row.speedup), row.speedup_rating);
        let break_even = row
            .break_even
            .map_or_else(|| "—".to_string(), |n| n.to_string());
        writeln!(
            out,
            "| {} | {} | {} | {} | {} | {} | {} |",
            row.head,
            row.variant,
            row.query_count,
            fmt_ms(row.baseline_ms),
            fmt_ms(row.effective_ms),
            speedup,
            break_even,
        )
        .unwrap();
    }
    writeln!(out).unwrap();

    writeln!(out, "### Time shares and cache size\n").unwrap();
    writeln!(
        out,
        "| Variant | Queries | Uncached | Cache access | Circle check | Cache / graph |"
    )
    .unwrap();
    writeln!(
        out,
        "|---------|---------|----------|--------------|--------------|---------------|"
    )
    .unwrap();
    for row in cache_sizes {
        let fraction = fmt_rated(
            &format!("{:.3}", row.cache_fraction),
            row.fraction_rating,
        );
        writeln!(
            out,
            "| {} | {} | {:.1}% | {:.1}% | {:.1}% | {} |",
            row.variant,
            row.query_count,
            row.uncached_pct,
            row.cache_pct,
            row.circle_pct,
            fraction,
        )
        .unwrap();
    }
    writeln!(out).unwrap();
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Write the assembled report to `output_dir/report.md`.
pub fn save_report(report: &str, output_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::create_dir_all(output_dir)?;
    let report_path = output_dir.join("report.md");
    std::fs::write(&report_path, report)?;
    eprintln!("    Saved: {}", report_path.display());
    Ok(())
}
