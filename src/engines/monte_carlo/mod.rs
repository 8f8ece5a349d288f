//! Monte Carlo evaluation of retrofit-investment indicators.
//!
//! The engine draws N market trajectories, synthesizes one cash-flow
//! series per trajectory, and evaluates the five indicators on each,
//! producing N-length indicator vectors with NaN marking infeasible
//! scenarios.
//!
//! All randomness is consumed while drawing the sample bundle; the
//! per-scenario evaluation is pure, so the `parallel` feature can fan it
//! out across threads without affecting determinism.

pub mod cashflow;
pub mod indicators;
pub mod rng;
pub mod sampler;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::core::{AssessmentError, Indicator, ProjectInputs};
use crate::engines::monte_carlo::sampler::{MarketSamples, draw_market_samples};
use crate::market::MarketDistributions;

pub use cashflow::{CashFlowTimeline, median_scenario_timeline};
pub use sampler::SampleMatrix;

/// The five indicator vectors of one simulation run.
///
/// Every vector has length `n_sims`; NaN denotes an infeasible scenario.
#[derive(Debug, Clone, PartialEq)]
pub struct RawIndicators {
    pub irr: Vec<f64>,
    pub npv: Vec<f64>,
    pub roi: Vec<f64>,
    pub pbp: Vec<f64>,
    pub dpp: Vec<f64>,
}

impl RawIndicators {
    fn with_capacity(n: usize) -> Self {
        Self {
            irr: Vec::with_capacity(n),
            npv: Vec::with_capacity(n),
            roi: Vec::with_capacity(n),
            pbp: Vec::with_capacity(n),
            dpp: Vec::with_capacity(n),
        }
    }

    /// Scenario vector for one indicator.
    pub fn get(&self, indicator: Indicator) -> &[f64] {
        match indicator {
            Indicator::Irr => &self.irr,
            Indicator::Npv => &self.npv,
            Indicator::Roi => &self.roi,
            Indicator::Pbp => &self.pbp,
            Indicator::Dpp => &self.dpp,
        }
    }

    /// Number of scenarios.
    pub fn n_sims(&self) -> usize {
        self.npv.len()
    }
}

/// Monte Carlo engine configuration for one request.
///
/// # Examples
/// ```
/// use retrorisk::core::ProjectInputs;
/// use retrorisk::engines::monte_carlo::MonteCarloEngine;
/// use retrorisk::market::{MarketDistributions, MarketForecasts};
///
/// let inputs = ProjectInputs::equity_only(60_000.0, 2_000.0, 27_400.0, 20);
/// let dist = MarketDistributions::build(MarketForecasts::embedded(), 20).unwrap();
/// let raw = MonteCarloEngine::new(1_000, 42).run(&inputs, &dist).unwrap();
/// assert_eq!(raw.npv.len(), 1_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonteCarloEngine {
    /// Number of simulated scenarios.
    pub n_sims: usize,
    /// Seed of the per-request generator.
    pub seed: u64,
    /// Optional fixed loan rate replacing the sampled interest matrix.
    pub fixed_loan_rate: Option<f64>,
}

impl MonteCarloEngine {
    /// Engine with market-sampled loan rates.
    pub fn new(n_sims: usize, seed: u64) -> Self {
        Self {
            n_sims,
            seed,
            fixed_loan_rate: None,
        }
    }

    /// Pins the loan rate instead of sampling it.
    pub fn with_fixed_loan_rate(mut self, rate: Option<f64>) -> Self {
        self.fixed_loan_rate = rate;
        self
    }

    /// Draws the sample bundle and evaluates all five indicators.
    ///
    /// # Errors
    /// Propagates [`AssessmentError::InvalidForecast`] from the sampler;
    /// per-scenario numeric failures are reported as NaN, never as errors.
    pub fn run(
        &self,
        inputs: &ProjectInputs,
        dist: &MarketDistributions,
    ) -> Result<RawIndicators, AssessmentError> {
        let samples = draw_market_samples(dist, self.n_sims, self.seed, self.fixed_loan_rate)?;
        Ok(evaluate_scenarios(inputs, &samples))
    }
}

/// Evaluates one scenario row into `[irr, npv, roi, pbp, dpp]`.
fn evaluate_one(
    inputs: &ProjectInputs,
    samples: &MarketSamples,
    scratch: &mut Vec<f64>,
    i: usize,
) -> [f64; 5] {
    cashflow::net_cash_flows(
        inputs,
        samples.electricity.row(i),
        samples.inflation.row(i),
        samples.loan_interest.row(i),
        scratch,
    );

    // A series with no activity after year 0 has no defined indicators.
    if scratch[1..].iter().all(|&f| f == 0.0) {
        return [f64::NAN; 5];
    }

    let discount_rate = samples.discount[i];
    [
        indicators::irr(scratch),
        indicators::npv(discount_rate, scratch),
        indicators::roi(scratch),
        indicators::payback_period(scratch),
        indicators::discounted_payback(discount_rate, scratch),
    ]
}

#[cfg(feature = "parallel")]
fn evaluate_scenarios(inputs: &ProjectInputs, samples: &MarketSamples) -> RawIndicators {
    let n = samples.discount.len();
    let rows: Vec<[f64; 5]> = (0..n)
        .into_par_iter()
        .map_init(
            || Vec::with_capacity(inputs.project_lifetime + 1),
            |scratch, i| evaluate_one(inputs, samples, scratch, i),
        )
        .collect();
    collect_rows(n, rows)
}

#[cfg(not(feature = "parallel"))]
fn evaluate_scenarios(inputs: &ProjectInputs, samples: &MarketSamples) -> RawIndicators {
    let n = samples.discount.len();
    let mut scratch = Vec::with_capacity(inputs.project_lifetime + 1);
    let rows: Vec<[f64; 5]> = (0..n)
        .map(|i| evaluate_one(inputs, samples, &mut scratch, i))
        .collect();
    collect_rows(n, rows)
}

fn collect_rows(n: usize, rows: Vec<[f64; 5]>) -> RawIndicators {
    let mut raw = RawIndicators::with_capacity(n);
    for [irr, npv, roi, pbp, dpp] in rows {
        raw.irr.push(irr);
        raw.npv.push(npv);
        raw.roi.push(roi);
        raw.pbp.push(pbp);
        raw.dpp.push(dpp);
    }
    raw
}
