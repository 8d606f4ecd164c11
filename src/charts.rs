//! SVG chart rendering for variation series.
//!
//! Draws one grouped, stacked bar chart per variation using the `plotters`
//! SVG backend: one group per size variant, one bar per `(mode, query count)`
//! series, stacked segments for the time components. Baseline bars are green,
//! cached bars purple, shaded lighter as the query count grows.

use plotters::prelude::*;
use std::path::Path;

use crate::record::Mode;
use crate::report::ChartSeries;

const COLOR_BASE: RGBColor = RGBColor(27, 94, 32); //  green
const COLOR_CACHED: RGBColor = RGBColor(106, 27, 154); //  purple

/// Opacity per stacked segment: uncached, cache access, circle check.
const SEGMENT_MIX: &[f64] = &[0.9, 0.6, 0.35];

fn series_color(mode: Mode, shade: usize) -> RGBColor {
    let base = match mode {
        Mode::Base => COLOR_BASE,
        Mode::Cached => COLOR_CACHED,
    };
    let lift = u8::try_from(shade).unwrap_or(u8::MAX).saturating_mul(36);
    RGBColor(
        base.0.saturating_add(lift),
        base.1.saturating_add(lift),
        base.2.saturating_add(lift),
    )
}

fn y_fmt(y: &f64) -> String {
    let v = *y;
    if v >= 1_000.0 {
        format!("{:.1} s", v / 1_000.0)
    } else if v >= 1.0 {
        format!("{:.0} ms", v)
    } else {
        format!("{:.0} µs", v * 1_000.0)
    }
}

/// Draw the stacked bar chart for one variation.
///
/// X-axis: one group per variant (labels at group centers). Y-axis:
/// execution time in milliseconds. Series order follows `series`, which the
/// report builder emits as all baseline query counts followed by all cached
/// query counts.
///
/// Returns `Ok(())` without writing anything when there is nothing to draw.
pub fn variation_chart(
    title: &str,
    variants: &[String],
    series: &[ChartSeries],
    output: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    if variants.is_empty() || series.is_empty() {
        return Ok(());
    }

    let n_series = series.len();
    let slot = n_series + 1; // one empty slot between variant groups
    let x_max = (variants.len() * slot) as f64;

    let y_max = series
        .iter()
        .flat_map(|s| (0..variants.len()).map(|vi| s.total_at(vi)))
        .fold(0.0f64, f64::max);
    if y_max == 0.0 {
        return Ok(());
    }

    let root = SVGBackend::new(output, (900, 540)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 18))
        .margin(14)
        .x_label_area_size(40)
        .y_label_area_size(80)
        .build_cartesian_2d(0f64..x_max, 0f64..y_max * 1.15)?;

    let variant_labels = variants.to_vec();
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(variants.len() * slot)
        .x_desc("Pattern variant")
        .y_desc("Execution time (ms)")
        .y_label_formatter(&y_fmt)
        .x_label_formatter(&move |x| {
            // Only label at group centers.
            let group = (*x / slot as f64).floor() as usize;
            let center = group as f64 * slot as f64 + n_series as f64 / 2.0;
            if (*x - center).abs() > 0.45 {
                return String::new();
            }
            variant_labels.get(group).cloned().unwrap_or_default()
        })
        .draw()?;

    let mut shade_base = 0;
    let mut shade_cached = 0;
    for (si, s) in series.iter().enumerate() {
        let shade = match s.mode {
            Mode::Base => {
                shade_base += 1;
                shade_base - 1
            }
            Mode::Cached => {
                shade_cached += 1;
                shade_cached - 1
            }
        };
        let color = series_color(s.mode, shade);

        let mut cumulative = vec![0.0f64; variants.len()];
        for (k, segment) in s.segments.iter().enumerate() {
            let mix = SEGMENT_MIX.get(k).copied().unwrap_or(0.3);
            let mut rects = Vec::with_capacity(variants.len());
            for (vi, &value) in segment.values.iter().enumerate() {
                let x0 = (vi * slot + si) as f64;
                let y0 = cumulative[vi];
                let y1 = y0 + value;
                cumulative[vi] = y1;
                rects.push(Rectangle::new(
                    [(x0, y0), (x0 + 1.0, y1)],
                    color.mix(mix).filled(),
                ));
            }
            let drawn = chart.draw_series(rects)?;
            // The bottom segment carries the legend entry for the series.
            if k == 0 {
                drawn.label(s.label.as_str()).legend(move |(x, y)| {
                    Rectangle::new([(x, y - 5), (x + 12, y + 5)], color.filled())
                });
            }
        }
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .margin(12)
        .background_style(WHITE.mix(0.9))
        .border_style(BLACK.mix(0.3))
        .label_font(("sans-serif", 13))
        .draw()?;

    root.present()?;
    eprintln!("    Saved: {}", output.display());
    Ok(())
}
