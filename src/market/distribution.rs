//! Derivation of per-year sampling parameters from three-scenario forecasts.
//!
//! Each year's (pessimistic, moderate, optimistic) triple is read as the
//! (P10, P50, P90) of that year's marginal distribution. Inflation, loan
//! interest, and discount rate are Normal on the linear scale; electricity
//! price is lognormal, i.e. Normal in log-space, which keeps sampled
//! prices positive and reflects multiplicative price dynamics.
//!
//! With Z90 = Φ⁻¹(0.9), a Normal fit to a (P10, P50, P90) triple is
//! μ = P50 and σ = (P90 − P10) / (2·Z90).

use crate::core::AssessmentError;
use crate::market::forecast::{ForecastBand, MarketForecasts};

/// Inverse standard-normal CDF at 0.9.
pub const Z90: f64 = 1.2815515655446004;

/// Guard against degenerate spreads; keeps every Normal well-formed.
const SIGMA_FLOOR: f64 = 1e-12;

/// Year-resolved Normal parameters for one market variable.
#[derive(Debug, Clone, PartialEq)]
pub struct YearlyNormal {
    /// Per-year mean.
    pub mu: Vec<f64>,
    /// Per-year standard deviation, floored at a tiny positive value.
    pub sigma: Vec<f64>,
}

impl YearlyNormal {
    fn from_triples(pess: &[f64], moderate: &[f64], opt: &[f64]) -> Self {
        let mu = moderate.to_vec();
        let sigma = pess
            .iter()
            .zip(opt)
            .map(|(&p, &o)| ((o - p) / (2.0 * Z90)).max(SIGMA_FLOOR))
            .collect();
        Self { mu, sigma }
    }
}

/// Sampling parameters for all four market variables over one horizon.
///
/// # Examples
/// ```
/// use retrorisk::market::{MarketDistributions, MarketForecasts};
///
/// let dist = MarketDistributions::build(MarketForecasts::embedded(), 20).unwrap();
/// assert_eq!(dist.horizon, 20);
/// assert_eq!(dist.inflation.mu.len(), 20);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MarketDistributions {
    /// Yearly inflation rate, Normal on the linear scale.
    pub inflation: YearlyNormal,
    /// Yearly loan interest rate, Normal on the linear scale.
    pub loan_interest: YearlyNormal,
    /// Discount rate, Normal, broadcast from a scalar triple.
    pub discount: YearlyNormal,
    /// Electricity price in log-space: μ_ln and σ_ln per year.
    pub electricity_log: YearlyNormal,
    /// Number of years covered by every parameter vector.
    pub horizon: usize,
}

impl MarketDistributions {
    /// Builds per-year distribution parameters for `horizon` years.
    ///
    /// Bands are padded by repeating their final element and truncated to
    /// `horizon`. The discount band is broadcast from its first triple so
    /// the rate is constant across years.
    ///
    /// # Errors
    /// [`AssessmentError::InvalidForecast`] when a padded triple is
    /// unordered, an electricity price input is non-positive, or a path
    /// is empty.
    pub fn build(
        market: &MarketForecasts,
        horizon: usize,
    ) -> Result<MarketDistributions, AssessmentError> {
        if horizon == 0 {
            return Err(AssessmentError::InvalidForecast(
                "horizon must be at least one year".to_string(),
            ));
        }

        market.inflation.validate("inflation", horizon, false)?;
        market
            .electricity_price
            .validate("electricity_price", horizon, true)?;
        market.loan_interest.validate("loan_interest", horizon, false)?;
        market.discount.validate("discount", horizon, false)?;

        let (pess, moderate, opt) = market.inflation.padded(horizon);
        let inflation = YearlyNormal::from_triples(&pess, &moderate, &opt);

        let (pess, moderate, opt) = market.loan_interest.padded(horizon);
        let loan_interest = YearlyNormal::from_triples(&pess, &moderate, &opt);

        let discount = broadcast_scalar(&market.discount, horizon);

        let (pess, moderate, opt) = market.electricity_price.padded(horizon);
        let ln = |v: &[f64]| v.iter().map(|x| x.ln()).collect::<Vec<f64>>();
        let electricity_log = YearlyNormal::from_triples(&ln(&pess), &ln(&moderate), &ln(&opt));

        Ok(MarketDistributions {
            inflation,
            loan_interest,
            discount,
            electricity_log,
            horizon,
        })
    }

    /// Median (P50) electricity-price trajectory, `exp(μ_ln)` per year.
    pub fn median_electricity_price(&self) -> Vec<f64> {
        self.electricity_log.mu.iter().map(|m| m.exp()).collect()
    }

    /// Median discount rate (constant across years).
    pub fn median_discount_rate(&self) -> f64 {
        self.discount.mu[0]
    }

    /// Median loan interest rate in year 0.
    pub fn median_loan_rate(&self) -> f64 {
        self.loan_interest.mu[0]
    }
}

fn broadcast_scalar(band: &ForecastBand, horizon: usize) -> YearlyNormal {
    let (pess, moderate, opt) = band.padded(1);
    let sigma = ((opt[0] - pess[0]) / (2.0 * Z90)).max(SIGMA_FLOOR);
    YearlyNormal {
        mu: vec![moderate[0]; horizon],
        sigma: vec![sigma; horizon],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn normal_params_follow_the_p10_p90_spread() {
        let market = MarketForecasts::embedded();
        let dist = MarketDistributions::build(market, 20).unwrap();

        // Year 0 inflation triple is (0.028, 0.030, 0.035).
        assert_relative_eq!(dist.inflation.mu[0], 0.030);
        assert_relative_eq!(
            dist.inflation.sigma[0],
            (0.035 - 0.028) / (2.0 * Z90),
            epsilon = 1e-15
        );
    }

    #[test]
    fn electricity_params_are_derived_in_log_space() {
        let market = MarketForecasts::embedded();
        let dist = MarketDistributions::build(market, 5).unwrap();

        assert_relative_eq!(dist.electricity_log.mu[0], 0.246_f64.ln());
        assert_relative_eq!(
            dist.electricity_log.sigma[0],
            (0.271_f64.ln() - 0.221_f64.ln()) / (2.0 * Z90),
            epsilon = 1e-15
        );
        assert_relative_eq!(dist.median_electricity_price()[0], 0.246, epsilon = 1e-12);
    }

    #[test]
    fn discount_is_broadcast_constant() {
        let dist = MarketDistributions::build(MarketForecasts::embedded(), 12).unwrap();
        assert_eq!(dist.discount.mu.len(), 12);
        assert!(dist.discount.mu.iter().all(|&m| m == 0.05));
        assert!(dist.discount.sigma.windows(2).all(|w| w[0] == w[1]));
        assert_relative_eq!(dist.median_discount_rate(), 0.05);
    }

    #[test]
    fn degenerate_spread_is_floored() {
        let mut market = MarketForecasts::embedded().clone();
        market.inflation = ForecastBand::scalar(0.02, 0.02, 0.02);
        let dist = MarketDistributions::build(&market, 3).unwrap();
        assert!(dist.inflation.sigma.iter().all(|&s| s > 0.0));
    }

    #[test]
    fn unordered_band_fails_the_build() {
        let mut market = MarketForecasts::embedded().clone();
        market.loan_interest = ForecastBand::scalar(0.05, 0.04, 0.06);
        assert!(MarketDistributions::build(&market, 10).is_err());
    }

    #[test]
    fn z90_matches_the_standard_normal_quantile() {
        use statrs::distribution::{ContinuousCDF, Normal};
        let normal = Normal::new(0.0, 1.0).unwrap();
        assert_relative_eq!(normal.inverse_cdf(0.9), Z90, epsilon = 1e-9);
    }
}
