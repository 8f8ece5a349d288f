//! Market-trajectory sampling.
//!
//! Draws the per-request sample bundle from the year-resolved distribution
//! parameters. Draw order is fixed and part of the determinism contract:
//! the inflation matrix first, then the loan-interest matrix (skipped
//! entirely under a fixed loan rate), then one discount draw per scenario,
//! then the electricity matrix; matrices fill row by row.
//!
//! Discount enters the cash-flow layer as a single rate per scenario
//! (constant over time), so only a length-N vector is materialized.

use rand_distr::{Distribution, Normal};

use crate::core::AssessmentError;
use crate::engines::monte_carlo::rng::Pcg64;
use crate::market::MarketDistributions;

/// Lowest admissible sampled inflation or interest rate.
const MIN_RATE: f64 = -0.5;
/// Lowest admissible sampled discount rate; keeps 1 + r away from zero.
const MIN_DISCOUNT: f64 = -0.99;
/// Lowest admissible sampled electricity price.
const MIN_PRICE: f64 = 1e-9;

/// Dense row-major scenario-by-year sample matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleMatrix {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl SampleMatrix {
    fn with_capacity(rows: usize, cols: usize) -> Self {
        Self {
            data: Vec::with_capacity(rows * cols),
            rows,
            cols,
        }
    }

    /// Matrix filled with one constant.
    pub fn constant(value: f64, rows: usize, cols: usize) -> Self {
        Self {
            data: vec![value; rows * cols],
            rows,
            cols,
        }
    }

    /// Number of scenarios.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of years.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// One scenario's year-indexed values.
    #[inline]
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }
}

/// Sample bundle for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketSamples {
    /// Inflation rate per scenario and year.
    pub inflation: SampleMatrix,
    /// Loan interest rate per scenario and year.
    pub loan_interest: SampleMatrix,
    /// Discount rate per scenario (constant over the horizon).
    pub discount: Vec<f64>,
    /// Electricity price per scenario and year, already exponentiated.
    pub electricity: SampleMatrix,
}

/// Draws `n_sims` market trajectories with the given seed.
///
/// A fresh [`Pcg64`] is constructed per call, so identical
/// `(dist, n_sims, seed, fixed_loan_rate)` yield bit-identical samples.
///
/// # Errors
/// [`AssessmentError::InvalidForecast`] if a distribution parameter cannot
/// form a Normal (non-finite mean); sigma is floored upstream.
pub fn draw_market_samples(
    dist: &MarketDistributions,
    n_sims: usize,
    seed: u64,
    fixed_loan_rate: Option<f64>,
) -> Result<MarketSamples, AssessmentError> {
    let horizon = dist.horizon;
    let mut rng = Pcg64::seed_from_u64(seed);

    let yearly_normals = |mu: &[f64], sigma: &[f64]| -> Result<Vec<Normal<f64>>, AssessmentError> {
        mu.iter()
            .zip(sigma)
            .map(|(&m, &s)| {
                Normal::new(m, s).map_err(|e| {
                    AssessmentError::InvalidForecast(format!(
                        "cannot sample Normal(mu = {m}, sigma = {s}): {e}"
                    ))
                })
            })
            .collect()
    };

    let fill_matrix = |rng: &mut Pcg64, dists: &[Normal<f64>], floor: f64| -> SampleMatrix {
        let mut matrix = SampleMatrix::with_capacity(n_sims, horizon);
        for _ in 0..n_sims {
            for normal in dists {
                matrix.data.push(normal.sample(rng).max(floor));
            }
        }
        matrix
    };

    let inflation_dists = yearly_normals(&dist.inflation.mu, &dist.inflation.sigma)?;
    let inflation = fill_matrix(&mut rng, &inflation_dists, MIN_RATE);

    let loan_interest = match fixed_loan_rate {
        Some(rate) => SampleMatrix::constant(rate.max(MIN_RATE), n_sims, horizon),
        None => {
            let dists = yearly_normals(&dist.loan_interest.mu, &dist.loan_interest.sigma)?;
            fill_matrix(&mut rng, &dists, MIN_RATE)
        }
    };

    let discount_dist = yearly_normals(&dist.discount.mu[..1], &dist.discount.sigma[..1])?;
    let discount: Vec<f64> = (0..n_sims)
        .map(|_| discount_dist[0].sample(&mut rng).max(MIN_DISCOUNT))
        .collect();

    let log_dists = yearly_normals(&dist.electricity_log.mu, &dist.electricity_log.sigma)?;
    let mut electricity = SampleMatrix::with_capacity(n_sims, horizon);
    for _ in 0..n_sims {
        for normal in &log_dists {
            electricity
                .data
                .push(normal.sample(&mut rng).exp().max(MIN_PRICE));
        }
    }

    Ok(MarketSamples {
        inflation,
        loan_interest,
        discount,
        electricity,
    })
}
