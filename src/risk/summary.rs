//! Percentile summaries and success probabilities over the scenario ensemble.
//!
//! Percentiles are taken over the finite entries of an indicator vector,
//! so infeasible scenarios shift no quantile. The two payback
//! probabilities instead count NaN as failures: a scenario that never
//! breaks even is a scenario where payback did not happen.

use crate::core::{IndicatorSet, MAX_LIFETIME};
use crate::engines::monte_carlo::RawIndicators;
use crate::math::{finite_count, percentile_sorted, sorted_finite};

/// Percentile levels reported per indicator: P10 through P90.
pub const PERCENTILE_LEVELS: [u32; 9] = [10, 20, 30, 40, 50, 60, 70, 80, 90];

/// Fewest finite entries before a summary is flagged low-confidence.
pub const LOW_CONFIDENCE_THRESHOLD: usize = 100;

/// P10..P90 of one indicator, aligned with [`PERCENTILE_LEVELS`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Percentiles(pub [f64; 9]);

impl Percentiles {
    /// Value at one of the nine levels (e.g. `50` for the median).
    pub fn at(&self, level: u32) -> f64 {
        match PERCENTILE_LEVELS.iter().position(|&l| l == level) {
            Some(idx) => self.0[idx],
            None => f64::NAN,
        }
    }

    /// The median, P50.
    pub fn p50(&self) -> f64 {
        self.at(50)
    }

    /// Pairs of (level, value) in ascending level order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        PERCENTILE_LEVELS.into_iter().zip(self.0)
    }
}

/// Computes P10..P90 over the finite entries of `values`.
///
/// All nine entries are NaN when no value is finite.
pub fn percentiles(values: &[f64]) -> Percentiles {
    let sorted = sorted_finite(values);
    let mut out = [f64::NAN; 9];
    for (slot, level) in out.iter_mut().zip(PERCENTILE_LEVELS) {
        *slot = percentile_sorted(&sorted, level as f64);
    }
    Percentiles(out)
}

/// The three ensemble success probabilities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SuccessProbabilities {
    /// Share of finite-NPV scenarios with NPV > 0.
    pub npv_positive: f64,
    /// Share of all scenarios whose simple payback lands inside the horizon.
    pub pbp_within_lifetime: f64,
    /// Share of all scenarios whose discounted payback lands inside the horizon.
    pub dpp_within_lifetime: f64,
    /// Horizon used for the two payback probabilities.
    pub lifetime: usize,
}

/// Computes the three success probabilities for one run.
///
/// `Pr(NPV > 0)` is conditional on a finite NPV; the payback probabilities
/// divide by the full scenario count so an infeasible scenario counts as a
/// failure.
pub fn success_probabilities(raw: &RawIndicators, lifetime: usize) -> SuccessProbabilities {
    debug_assert!(lifetime >= 1 && lifetime <= MAX_LIFETIME);
    let n = raw.n_sims();

    let finite_npv = finite_count(&raw.npv);
    let npv_positive = if finite_npv == 0 {
        0.0
    } else {
        let wins = raw.npv.iter().filter(|v| v.is_finite() && **v > 0.0).count();
        wins as f64 / finite_npv as f64
    };

    let within = |values: &[f64]| {
        if n == 0 {
            return 0.0;
        }
        let hits = values
            .iter()
            .filter(|v| v.is_finite() && **v < lifetime as f64)
            .count();
        hits as f64 / n as f64
    };

    SuccessProbabilities {
        npv_positive,
        pbp_within_lifetime: within(&raw.pbp),
        dpp_within_lifetime: within(&raw.dpp),
        lifetime,
    }
}

/// True when any requested indicator has fewer than
/// [`LOW_CONFIDENCE_THRESHOLD`] finite scenarios.
pub fn low_confidence(raw: &RawIndicators, requested: IndicatorSet) -> bool {
    requested
        .iter()
        .any(|ind| finite_count(raw.get(ind)) < LOW_CONFIDENCE_THRESHOLD)
}
