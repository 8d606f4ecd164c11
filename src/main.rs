//! Benchmark report generator.
//!
//! Reads the harness's nested `results.json`, produces one SVG chart per
//! reference variation and a Markdown summary report.
//!
//! Run: `cargo run [-- <results.json> <output_dir>]`

use std::path::PathBuf;
use std::process::ExitCode;

use sg_bench_report::{
    DEFAULT_QUERY_COUNTS, MetricConfig, ResultIndex, VariationView, charts, markdown,
    reference_variations, report,
};

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    let results_path = if args.len() > 1 {
        PathBuf::from(&args[1])
    } else {
        PathBuf::from("output/benches/results.json")
    };

    let output_dir = if args.len() > 2 {
        PathBuf::from(&args[2])
    } else {
        PathBuf::from("plots")
    };

    let json = match std::fs::read_to_string(&results_path) {
        Ok(json) => json,
        Err(e) => {
            eprintln!("error: cannot read '{}': {e}", results_path.display());
            return ExitCode::FAILURE;
        }
    };

    let index = match ResultIndex::from_json_str(&json) {
        Ok(index) => index,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };
    eprintln!("Loaded {} benchmark results", index.len());

    if index.is_empty() {
        eprintln!("error: no benchmark results in '{}'", results_path.display());
        return ExitCode::FAILURE;
    }

    if let Err(e) = std::fs::create_dir_all(&output_dir) {
        eprintln!("error: cannot create '{}': {e}", output_dir.display());
        return ExitCode::FAILURE;
    }

    let config = MetricConfig::default();
    let mut out = String::with_capacity(16 * 1024);
    markdown::write_header(&mut out);

    let mut skipped = 0usize;
    for spec in reference_variations() {
        eprintln!("Reporting {} ({})...", spec.pattern, spec.head);
        let view = VariationView::build(&index, &spec);

        // A variation that the loaded file does not cover is skipped with a
        // warning; a wrong number is never substituted for a missing one.
        let section = report::build_chart_series(&view, DEFAULT_QUERY_COUNTS)
            .and_then(|series| {
                let comparison = report::build_comparison_rows(&view, &config)?;
                let cache_sizes = report::build_cache_size_rows(&view, &config)?;
                Ok((series, comparison, cache_sizes))
            });
        let (series, comparison, cache_sizes) = match section {
            Ok(section) => section,
            Err(e) => {
                eprintln!("warning: skipping {}: {e}", spec.file_stem);
                skipped += 1;
                continue;
            }
        };

        let chart_path = output_dir.join(format!("{}.svg", spec.file_stem));
        if let Err(e) = charts::variation_chart(&spec.title, &spec.variants, &series, &chart_path)
        {
            eprintln!("error generating chart for {}: {e}", spec.file_stem);
            return ExitCode::FAILURE;
        }

        markdown::write_variation_section(&mut out, &spec, &comparison, &cache_sizes);
    }

    if let Err(e) = markdown::save_report(&out, &output_dir) {
        eprintln!("error writing report: {e}");
        return ExitCode::FAILURE;
    }

    if skipped > 0 {
        eprintln!("\nDone with {skipped} variation(s) skipped.");
    } else {
        eprintln!("\nDone! Report at: {}", output_dir.join("report.md").display());
    }
    ExitCode::SUCCESS
}
