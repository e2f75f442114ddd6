//! Distribution shaping: fixed-width histogram bins and box-plot summaries

use tracing::warn;

use crate::models::{BoxStats, HistogramBin};

/// Bucket values into `width`-wide bins spanning `[min, max]`
///
/// Bins are half-open except the last, which includes `max`. Values outside
/// the domain and non-finite values are not counted. An input with nothing
/// in range yields all-zero bins, never an error. A non-positive width or a
/// non-finite domain yields no bins.
pub fn histogram_bins(values: &[f64], min: f64, max: f64, width: f64) -> Vec<HistogramBin> {
    if !(min.is_finite() && max.is_finite() && width.is_finite()) || width <= 0.0 {
        return Vec::new();
    }

    let bin_count = ((max - min) / width).round().max(0.0) as usize;
    let mut bins: Vec<HistogramBin> = (0..bin_count)
        .map(|i| HistogramBin {
            start: min + i as f64 * width,
            end: min + (i + 1) as f64 * width,
            count: 0,
        })
        .collect();

    if bins.is_empty() {
        return bins;
    }

    let mut skipped = 0usize;
    for &v in values {
        if !v.is_finite() || v < min || v > max {
            skipped += 1;
            continue;
        }
        let index = (((v - min) / width).floor() as usize).min(bin_count - 1);
        bins[index].count += 1;
    }

    if skipped > 0 {
        warn!(skipped, min, max, "Values outside histogram domain");
    }

    bins
}

/// Linear-interpolated quantile of an ascending slice
fn quantile(sorted: &[f64], p: f64) -> f64 {
    let position = p * (sorted.len() - 1) as f64;
    let lo = position.floor() as usize;
    let hi = position.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (position - lo as f64)
}

/// Five-number summary with Tukey whiskers (1.5 × IQR)
pub fn box_stats(values: &[f64]) -> Option<BoxStats> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let q1 = quantile(&sorted, 0.25);
    let median = quantile(&sorted, 0.5);
    let q3 = quantile(&sorted, 0.75);
    let fence = 1.5 * (q3 - q1);
    let (low_fence, high_fence) = (q1 - fence, q3 + fence);

    let inside = || sorted.iter().copied().filter(|v| *v >= low_fence && *v <= high_fence);
    // q1 and q3 always lie inside the fences, so the fallbacks never trigger
    let lower_whisker = inside().reduce(f64::min).unwrap_or(q1);
    let upper_whisker = inside().reduce(f64::max).unwrap_or(q3);
    let outliers = sorted
        .iter()
        .copied()
        .filter(|v| *v < low_fence || *v > high_fence)
        .collect();

    Some(BoxStats {
        lower_whisker,
        q1,
        median,
        q3,
        upper_whisker,
        outliers,
    })
}
