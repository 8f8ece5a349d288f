//! Private (homeowner) envelope assembly.
//!
//! Focused on intuition: percentile bands per indicator, a median cash-flow
//! timeline the frontend can chart directly, and two plain-language point
//! forecasts (average monthly savings, probability of a positive outcome).
//! Carries neither probabilities nor histogram chart metadata.

use crate::core::{ProjectInputs, ResultEnvelope, RunConfig};
use crate::engines::monte_carlo::cashflow::{median_scenario_savings, median_scenario_timeline};
use crate::engines::monte_carlo::RawIndicators;
use crate::market::MarketDistributions;
use crate::risk::success_probabilities;

pub(super) fn build_envelope(
    inputs: &ProjectInputs,
    config: &RunConfig,
    dist: &MarketDistributions,
    raw: &RawIndicators,
) -> ResultEnvelope {
    let mut point_forecasts = super::median_point_forecasts(raw, config.indicators);

    // Average monthly benefit over the whole horizon, median scenario.
    let total_savings: f64 = median_scenario_savings(inputs, dist).iter().sum();
    let monthly_avg = total_savings / (12.0 * inputs.project_lifetime as f64);
    point_forecasts.insert(
        "MonthlyAvgSavings".to_string(),
        monthly_avg.is_finite().then_some(monthly_avg),
    );

    let success_rate = success_probabilities(raw, inputs.project_lifetime).npv_positive;
    point_forecasts.insert("SuccessRate".to_string(), Some(success_rate));

    let mut metadata = super::base_metadata(inputs, config, dist, raw);
    metadata.cash_flow_data = Some(median_scenario_timeline(inputs, dist).into());

    ResultEnvelope {
        point_forecasts,
        percentiles: super::percentile_maps(raw, config.indicators),
        probabilities: None,
        metadata,
    }
}
