//! Top-level risk-assessment workflow.
//!
//! One request flows leaves-first through the pipeline: validate inputs,
//! derive sampling distributions from the forecast tables, draw market
//! trajectories, evaluate the indicator kernel per scenario, then shape
//! the ensemble into the audience-specific envelope.

mod private;
mod professional;

use std::collections::BTreeMap;

use crate::core::{
    AssessmentError, IndicatorSet, Metadata, OutputLevel, ProjectInputs, ResultEnvelope, RunConfig,
};
use crate::engines::monte_carlo::{MonteCarloEngine, RawIndicators};
use crate::market::{MarketDistributions, MarketForecasts};
use crate::risk::{low_confidence, percentiles};

/// Runs a full Monte Carlo risk assessment.
///
/// # Errors
/// [`AssessmentError::InvalidInputs`] when the project record or run
/// configuration fails validation; [`AssessmentError::InvalidForecast`]
/// when the forecast tables cannot form sampling distributions. Numeric
/// failures inside individual scenarios are reported as NaN-driven gaps
/// in the envelope, never as errors.
///
/// # Examples
/// ```
/// use retrorisk::assessment::run_risk_assessment;
/// use retrorisk::core::{OutputLevel, ProjectInputs, RunConfig};
/// use retrorisk::market::MarketForecasts;
///
/// let inputs = ProjectInputs::equity_only(60_000.0, 2_000.0, 27_400.0, 20);
/// let config = RunConfig::new(OutputLevel::Private).with_sims(1_000);
/// let envelope = run_risk_assessment(&inputs, MarketForecasts::embedded(), &config).unwrap();
/// assert!(envelope.metadata.cash_flow_data.is_some());
/// ```
pub fn run_risk_assessment(
    inputs: &ProjectInputs,
    market: &MarketForecasts,
    config: &RunConfig,
) -> Result<ResultEnvelope, AssessmentError> {
    inputs.validate()?;
    config.validate()?;

    let dist = MarketDistributions::build(market, inputs.project_lifetime)?;
    let raw = MonteCarloEngine::new(config.n_sims, config.seed)
        .with_fixed_loan_rate(config.fixed_loan_rate)
        .run(inputs, &dist)?;

    let envelope = match config.output_level {
        OutputLevel::Private => private::build_envelope(inputs, config, &dist, &raw),
        OutputLevel::Professional => professional::build_envelope(inputs, config, &dist, &raw),
    };
    Ok(envelope)
}

/// P10..P90 maps for every requested indicator, omitting non-finite levels.
fn percentile_maps(
    raw: &RawIndicators,
    requested: IndicatorSet,
) -> BTreeMap<String, BTreeMap<String, f64>> {
    let mut maps = BTreeMap::new();
    for indicator in requested.iter() {
        let mut map = BTreeMap::new();
        for (level, value) in percentiles(raw.get(indicator)).iter() {
            if value.is_finite() {
                map.insert(format!("P{level}"), value);
            }
        }
        maps.insert(indicator.as_str().to_string(), map);
    }
    maps
}

/// Median point forecast per requested indicator; `None` when infeasible.
fn median_point_forecasts(
    raw: &RawIndicators,
    requested: IndicatorSet,
) -> BTreeMap<String, Option<f64>> {
    requested
        .iter()
        .map(|indicator| {
            let p50 = percentiles(raw.get(indicator)).p50();
            (indicator.as_str().to_string(), p50.is_finite().then_some(p50))
        })
        .collect()
}

/// Metadata shared by both envelope shapes.
fn base_metadata(
    inputs: &ProjectInputs,
    config: &RunConfig,
    dist: &MarketDistributions,
    raw: &RawIndicators,
) -> Metadata {
    let (annual_loan_payment, loan_rate_percent) = if inputs.has_loan() {
        let rate = config.fixed_loan_rate.unwrap_or_else(|| dist.median_loan_rate());
        (
            Some(annuity_payment(rate, inputs.loan_term, inputs.loan_amount)),
            Some(rate * 100.0),
        )
    } else {
        (None, None)
    };

    Metadata {
        n_sims: config.n_sims,
        project_lifetime: inputs.project_lifetime,
        capex: inputs.capex,
        annual_maintenance_cost: inputs.annual_maintenance_cost,
        annual_energy_savings: inputs.annual_energy_savings,
        loan_amount: inputs.loan_amount,
        loan_term: inputs.loan_term,
        annual_loan_payment,
        loan_rate_percent,
        low_confidence: low_confidence(raw, config.indicators),
        cash_flow_data: None,
        chart_metadata: None,
    }
}

/// Constant yearly annuity repaying `principal` over `term` years at `rate`.
fn annuity_payment(rate: f64, term: usize, principal: f64) -> f64 {
    if term == 0 {
        return 0.0;
    }
    if rate.abs() < 1e-12 {
        return principal / term as f64;
    }
    principal * rate / (1.0 - (1.0 + rate).powi(-(term as i32)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn annuity_payment_matches_reference_value() {
        // 25000 over 15 years at 3.5 %: standard annuity formula.
        let payment = annuity_payment(0.035, 15, 25_000.0);
        assert_relative_eq!(payment, 2_170.6, epsilon = 0.5);
        // Zero-rate annuity degenerates to straight-line repayment.
        assert_relative_eq!(annuity_payment(0.0, 10, 1_000.0), 100.0);
    }

    #[test]
    fn invalid_inputs_fail_before_simulation() {
        let inputs = ProjectInputs {
            capex: 60_000.0,
            annual_maintenance_cost: 2_000.0,
            annual_energy_savings: 27_400.0,
            project_lifetime: 20,
            loan_amount: 61_000.0,
            loan_term: 15,
        };
        let config = RunConfig::new(OutputLevel::Private);
        let err = run_risk_assessment(&inputs, MarketForecasts::embedded(), &config).unwrap_err();
        assert!(matches!(err, AssessmentError::InvalidInputs(_)));
    }

    #[test]
    fn out_of_range_sims_are_rejected() {
        let inputs = ProjectInputs::equity_only(60_000.0, 2_000.0, 27_400.0, 20);
        let config = RunConfig::new(OutputLevel::Private).with_sims(500);
        assert!(run_risk_assessment(&inputs, MarketForecasts::embedded(), &config).is_err());
    }
}
