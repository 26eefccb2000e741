//! Five-number box summaries with Tukey whiskers.

/// Box-plot statistics for one series of error samples.
///
/// Quartiles use linear interpolation between closest ranks. Whiskers
/// extend to the most extreme samples within 1.5 IQR of the box, so a
/// whisker always coincides with an actual sample; everything beyond the
/// whiskers is a flier.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxSummary {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub whisker_low: f64,
    pub whisker_high: f64,
    pub fliers: Vec<f64>,
}

impl BoxSummary {
    /// Computes the summary for one series. Returns `None` for an empty one.
    pub fn from_samples(samples: &[f64]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }
        let mut sorted = samples.to_vec();
        sorted.sort_by(f64::total_cmp);

        let q1 = percentile(&sorted, 25.0);
        let median = percentile(&sorted, 50.0);
        let q3 = percentile(&sorted, 75.0);
        let iqr = q3 - q1;
        let low_fence = q1 - 1.5 * iqr;
        let high_fence = q3 + 1.5 * iqr;

        // Most extreme samples still inside the fences. A sample at or above
        // q1 always exists, so the fallbacks never fire.
        let whisker_low = sorted
            .iter()
            .copied()
            .find(|v| *v >= low_fence)
            .unwrap_or(q1);
        let whisker_high = sorted
            .iter()
            .rev()
            .copied()
            .find(|v| *v <= high_fence)
            .unwrap_or(q3);

        let fliers: Vec<f64> = sorted
            .iter()
            .copied()
            .filter(|v| *v < whisker_low || *v > whisker_high)
            .collect();

        Some(BoxSummary {
            q1,
            median,
            q3,
            whisker_low,
            whisker_high,
            fliers,
        })
    }

    /// Smallest and largest values the glyph occupies on the value axis,
    /// fliers included.
    pub fn extent(&self) -> (f64, f64) {
        let lo = self.fliers.iter().copied().fold(self.whisker_low, f64::min);
        let hi = self.fliers.iter().copied().fold(self.whisker_high, f64::max);
        (lo, hi)
    }
}

/// Linear-interpolation percentile over a sorted slice.
///
/// `p` is in `[0, 100]`; the fractional rank `p/100 * (n-1)` is interpolated
/// between its neighbouring samples.
fn percentile(sorted: &[f64], p: f64) -> f64 {
    debug_assert!(!sorted.is_empty());
    if sorted.len() == 1 {
        return sorted[0];
    }
    let rank = p / 100.0 * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    if lower == upper {
        sorted[lower]
    } else {
        let weight = rank - lower as f64;
        sorted[lower] * (1.0 - weight) + sorted[upper] * weight
    }
}
