//! Histogram descriptors for client-side distribution charts.
//!
//! Bins are equal-width over the [P0.5, P99.5] range of the finite values,
//! which keeps a handful of extreme tails from flattening the chart; the
//! summary statistics are taken over all finite values, untrimmed.

use crate::core::Indicator;
use crate::math::{finite_mean_std, percentile_sorted, sorted_finite};

/// Number of bins per histogram.
pub const HISTOGRAM_BINS: usize = 30;

/// Trim levels bounding the binned range.
const TRIM_LO: f64 = 0.5;
const TRIM_HI: f64 = 99.5;

/// One indicator's histogram plus chart annotations.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// Bin midpoints, length [`HISTOGRAM_BINS`].
    pub centers: Vec<f64>,
    /// Scenario counts per bin; values outside the trimmed range are dropped.
    pub counts: Vec<u32>,
    /// Bin boundaries, length [`HISTOGRAM_BINS`] + 1.
    pub edges: Vec<f64>,
    /// Mean over all finite values.
    pub mean: f64,
    /// Population standard deviation over all finite values.
    pub std: f64,
    /// P10 over all finite values.
    pub p10: f64,
    /// P50 over all finite values.
    pub p50: f64,
    /// P90 over all finite values.
    pub p90: f64,
    /// X-axis label with units.
    pub xlabel: String,
    /// Y-axis label.
    pub ylabel: String,
    /// Chart title.
    pub title: String,
}

/// Builds the histogram for one indicator vector.
///
/// Returns `None` when no entry is finite; an indicator with zero feasible
/// scenarios has no distribution to chart.
pub fn histogram(indicator: Indicator, values: &[f64], n_sims: usize) -> Option<Histogram> {
    let sorted = sorted_finite(values);
    if sorted.is_empty() {
        return None;
    }

    let mut lo = percentile_sorted(&sorted, TRIM_LO);
    let mut hi = percentile_sorted(&sorted, TRIM_HI);
    if lo == hi {
        // Degenerate sample: widen symmetrically so bins stay well-formed.
        lo -= 0.5;
        hi += 0.5;
    }
    let width = (hi - lo) / HISTOGRAM_BINS as f64;

    let edges: Vec<f64> = (0..=HISTOGRAM_BINS).map(|k| lo + k as f64 * width).collect();
    let centers: Vec<f64> = edges.windows(2).map(|w| 0.5 * (w[0] + w[1])).collect();

    let mut counts = vec![0u32; HISTOGRAM_BINS];
    for &v in &sorted {
        if v < lo || v > hi {
            continue;
        }
        let bin = (((v - lo) / width) as usize).min(HISTOGRAM_BINS - 1);
        counts[bin] += 1;
    }

    let (mean, std) = finite_mean_std(&sorted);
    Some(Histogram {
        centers,
        counts,
        edges,
        mean,
        std,
        p10: percentile_sorted(&sorted, 10.0),
        p50: percentile_sorted(&sorted, 50.0),
        p90: percentile_sorted(&sorted, 90.0),
        xlabel: axis_label(indicator).to_string(),
        ylabel: "Frequency (Number of Scenarios)".to_string(),
        title: format!(
            "{} Distribution ({} Simulations)",
            indicator.as_str(),
            group_thousands(n_sims)
        ),
    })
}

fn axis_label(indicator: Indicator) -> &'static str {
    match indicator {
        Indicator::Npv => "Net Present Value (€)",
        Indicator::Irr => "Internal Rate of Return (%)",
        Indicator::Roi => "Return on Investment (%)",
        Indicator::Pbp => "Payback Period (years)",
        Indicator::Dpp => "Discounted Payback Period (years)",
    }
}

fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rand_distr::{Distribution, Normal};

    #[test]
    fn bin_geometry_is_consistent() {
        let mut rng = StdRng::seed_from_u64(42);
        let normal = Normal::new(5_000.0, 1_200.0).unwrap();
        let values: Vec<f64> = (0..10_000).map(|_| normal.sample(&mut rng)).collect();

        let h = histogram(Indicator::Npv, &values, 10_000).unwrap();
        assert_eq!(h.edges.len(), HISTOGRAM_BINS + 1);
        assert_eq!(h.centers.len(), HISTOGRAM_BINS);
        assert_eq!(h.counts.len(), HISTOGRAM_BINS);
        for (center, pair) in h.centers.iter().zip(h.edges.windows(2)) {
            assert_relative_eq!(*center, 0.5 * (pair[0] + pair[1]), epsilon = 1e-9);
        }
        // Equal widths.
        let w0 = h.edges[1] - h.edges[0];
        for pair in h.edges.windows(2) {
            assert_relative_eq!(pair[1] - pair[0], w0, epsilon = 1e-9);
        }
    }

    #[test]
    fn trimming_drops_only_the_extreme_tails() {
        let mut rng = StdRng::seed_from_u64(7);
        let normal = Normal::new(0.0, 1.0).unwrap();
        let values: Vec<f64> = (0..10_000).map(|_| normal.sample(&mut rng)).collect();

        let h = histogram(Indicator::Irr, &values, 10_000).unwrap();
        let total: u32 = h.counts.iter().sum();
        // 99 % of the sample lies inside [P0.5, P99.5].
        assert!(total >= 9_850 && total <= 10_000);
        assert!((h.mean).abs() < 0.05);
        assert!((h.std - 1.0).abs() < 0.05);
    }

    #[test]
    fn statistics_cover_untrimmed_finite_values() {
        // One enormous outlier must move the mean but stay out of the bins.
        let mut values = vec![1.0; 999];
        values.push(1_000_000.0);
        let h = histogram(Indicator::Roi, &values, 1_000).unwrap();
        assert!(h.mean > 900.0);
        let binned: u32 = h.counts.iter().sum();
        assert_eq!(binned as usize, 999);
    }

    #[test]
    fn nan_only_vector_has_no_histogram() {
        assert!(histogram(Indicator::Pbp, &[f64::NAN; 10], 10).is_none());
    }

    #[test]
    fn degenerate_sample_widens_the_range() {
        let h = histogram(Indicator::Dpp, &[7.0; 500], 500).unwrap();
        assert!(h.edges[0] < 7.0 && *h.edges.last().unwrap() > 7.0);
        assert_eq!(h.counts.iter().sum::<u32>(), 500);
    }

    #[test]
    fn labels_name_the_indicator_and_scenario_count() {
        let h = histogram(Indicator::Npv, &[1.0, 2.0, 3.0], 10_000).unwrap();
        assert_eq!(h.xlabel, "Net Present Value (€)");
        assert_eq!(h.title, "NPV Distribution (10,000 Simulations)");
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(100_000), "100,000");
        assert_eq!(group_thousands(999), "999");
    }
}
