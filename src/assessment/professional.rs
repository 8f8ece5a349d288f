//! Professional (consultant) envelope assembly.
//!
//! Technical depth over intuition: median point forecasts per indicator,
//! full percentile bands, the three success probabilities, and per-indicator
//! histogram descriptors for client-side distribution charts. Carries no
//! cash-flow timeline.

use std::collections::BTreeMap;

use crate::core::{ChartMetadata, ProjectInputs, ResultEnvelope, RunConfig};
use crate::engines::monte_carlo::RawIndicators;
use crate::market::MarketDistributions;
use crate::risk::{histogram, success_probabilities};

pub(super) fn build_envelope(
    inputs: &ProjectInputs,
    config: &RunConfig,
    dist: &MarketDistributions,
    raw: &RawIndicators,
) -> ResultEnvelope {
    let lifetime = inputs.project_lifetime;
    let probs = success_probabilities(raw, lifetime);
    let mut probabilities = BTreeMap::new();
    probabilities.insert("Pr(NPV > 0)".to_string(), probs.npv_positive);
    probabilities.insert(format!("Pr(PBP < {lifetime}y)"), probs.pbp_within_lifetime);
    probabilities.insert(format!("Pr(DPP < {lifetime}y)"), probs.dpp_within_lifetime);

    let mut chart_metadata: BTreeMap<String, ChartMetadata> = BTreeMap::new();
    for indicator in config.indicators.iter() {
        if let Some(h) = histogram(indicator, raw.get(indicator), config.n_sims) {
            chart_metadata.insert(indicator.as_str().to_string(), h.into());
        }
    }

    let mut metadata = super::base_metadata(inputs, config, dist, raw);
    metadata.chart_metadata = Some(chart_metadata);

    ResultEnvelope {
        point_forecasts: super::median_point_forecasts(raw, config.indicators),
        percentiles: super::percentile_maps(raw, config.indicators),
        probabilities: Some(probabilities),
        metadata,
    }
}

#[cfg(test)]
mod tests {
    use crate::assessment::run_risk_assessment;
    use crate::core::{Indicator, IndicatorSet, OutputLevel, ProjectInputs, RunConfig};
    use crate::market::MarketForecasts;

    #[test]
    fn professional_envelope_has_probabilities_and_charts() {
        let inputs = ProjectInputs::equity_only(50_000.0, 1_500.0, 20_000.0, 15);
        let config = RunConfig::new(OutputLevel::Professional).with_sims(1_000);
        let envelope =
            run_risk_assessment(&inputs, MarketForecasts::embedded(), &config).unwrap();

        assert!(envelope.metadata.cash_flow_data.is_none());
        assert!(!envelope.point_forecasts.contains_key("MonthlyAvgSavings"));
        assert!(!envelope.point_forecasts.contains_key("SuccessRate"));

        let probs = envelope.probabilities.expect("probabilities");
        assert_eq!(probs.len(), 3);
        assert!(probs.contains_key("Pr(NPV > 0)"));
        assert!(probs.contains_key("Pr(PBP < 15y)"));
        assert!(probs.contains_key("Pr(DPP < 15y)"));

        let charts = envelope.metadata.chart_metadata.expect("charts");
        assert_eq!(charts.len(), 5);
        let npv_chart = &charts["NPV"];
        assert_eq!(npv_chart.bins.edges.len(), 31);
        assert_eq!(npv_chart.bins.counts.len(), 30);
        assert_eq!(npv_chart.chart_config.title, "NPV Distribution (1,000 Simulations)");
    }

    #[test]
    fn indicator_subset_restricts_charts_but_not_probabilities() {
        let inputs = ProjectInputs::equity_only(50_000.0, 1_500.0, 20_000.0, 15);
        let config = RunConfig::new(OutputLevel::Professional)
            .with_sims(1_000)
            .with_indicators(IndicatorSet::from_slice(&[Indicator::Npv]));
        let envelope =
            run_risk_assessment(&inputs, MarketForecasts::embedded(), &config).unwrap();

        assert_eq!(envelope.point_forecasts.len(), 1);
        assert_eq!(envelope.percentiles.len(), 1);
        let charts = envelope.metadata.chart_metadata.expect("charts");
        assert_eq!(charts.len(), 1);
        // The kernel evaluates every indicator, so all three probabilities remain.
        assert_eq!(envelope.probabilities.expect("probabilities").len(), 3);
    }
}
