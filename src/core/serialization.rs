//! Canonical result-envelope payloads and JSON helpers.
//!
//! These types define the stable serde shapes the HTTP adapter puts on the
//! wire. The wire format is NaN-free: non-finite percentile entries are
//! omitted from their maps at build time, and scalar point forecasts are
//! `Option<f64>` so an infeasible median serializes as `null`.
//!
//! # Examples
//! ```
//! use retrorisk::assessment::run_risk_assessment;
//! use retrorisk::core::{OutputLevel, ProjectInputs, RunConfig, to_json};
//! use retrorisk::market::MarketForecasts;
//!
//! let inputs = ProjectInputs::equity_only(60_000.0, 2_000.0, 27_400.0, 20);
//! let config = RunConfig::new(OutputLevel::Professional).with_sims(1_000);
//! let envelope = run_risk_assessment(&inputs, MarketForecasts::embedded(), &config).unwrap();
//! let json = to_json(&envelope).unwrap();
//! assert!(json.contains("point_forecasts"));
//! assert!(!json.contains("NaN"));
//! ```

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;

use crate::engines::monte_carlo::CashFlowTimeline;
use crate::risk::Histogram;

/// Audience-shaped assessment result.
///
/// A private envelope carries `cash_flow_data` in its metadata and never
/// `probabilities` or `chart_metadata`; a professional envelope carries
/// `probabilities` and `chart_metadata` and never `cash_flow_data`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ResultEnvelope {
    /// Scalar forecasts per indicator (P50), plus audience-specific extras;
    /// `None` marks an indicator with no feasible scenarios.
    pub point_forecasts: BTreeMap<String, Option<f64>>,
    /// P10..P90 per requested indicator; non-finite levels are omitted.
    pub percentiles: BTreeMap<String, BTreeMap<String, f64>>,
    /// Success probabilities, professional envelopes only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probabilities: Option<BTreeMap<String, f64>>,
    /// Run parameters and audience-specific payloads.
    pub metadata: Metadata,
}

/// Run parameters echoed back with the result.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Metadata {
    pub n_sims: usize,
    pub project_lifetime: usize,
    pub capex: f64,
    pub annual_maintenance_cost: f64,
    pub annual_energy_savings: f64,
    pub loan_amount: f64,
    pub loan_term: usize,
    /// Annuity-equivalent yearly payment at the median market loan rate;
    /// absent without a loan.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annual_loan_payment: Option<f64>,
    /// Median market loan rate as a percentage; absent without a loan.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loan_rate_percent: Option<f64>,
    /// True when a requested indicator had fewer than 100 feasible scenarios.
    pub low_confidence: bool,
    /// Median-scenario cash-flow timeline, private envelopes only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cash_flow_data: Option<CashFlowData>,
    /// Histogram descriptors per indicator, professional envelopes only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart_metadata: Option<BTreeMap<String, ChartMetadata>>,
}

/// Median-scenario cash-flow timeline for frontend rendering.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CashFlowData {
    /// Year labels 0..=T.
    pub years: Vec<usize>,
    /// Equity invested at year 0.
    pub initial_investment: f64,
    /// Revenue per year, zero at index 0.
    pub annual_inflows: Vec<f64>,
    /// Costs per year, the equity outflow at index 0.
    pub annual_outflows: Vec<f64>,
    /// Net position per year.
    pub annual_net_cash_flow: Vec<f64>,
    /// Running sum of the net series.
    pub cumulative_cash_flow: Vec<f64>,
    /// First year the cumulative position is non-negative, else `null`.
    pub breakeven_year: Option<usize>,
    /// Loan tenor, `null` without a loan.
    pub loan_term: Option<usize>,
}

impl From<CashFlowTimeline> for CashFlowData {
    fn from(timeline: CashFlowTimeline) -> Self {
        Self {
            years: timeline.years,
            initial_investment: timeline.initial_investment,
            annual_inflows: timeline.annual_inflows,
            annual_outflows: timeline.annual_outflows,
            annual_net_cash_flow: timeline.annual_net_cash_flow,
            cumulative_cash_flow: timeline.cumulative_cash_flow,
            breakeven_year: timeline.breakeven_year,
            loan_term: timeline.loan_term,
        }
    }
}

/// One indicator's distribution chart payload.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ChartMetadata {
    pub bins: HistogramBins,
    pub statistics: HistogramStatistics,
    pub chart_config: ChartConfig,
}

/// Bin geometry and scenario counts.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HistogramBins {
    pub centers: Vec<f64>,
    pub counts: Vec<u32>,
    pub edges: Vec<f64>,
}

/// Summary statistics over all finite values of the indicator.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HistogramStatistics {
    pub mean: f64,
    pub std: f64,
    #[serde(rename = "P10")]
    pub p10: f64,
    #[serde(rename = "P50")]
    pub p50: f64,
    #[serde(rename = "P90")]
    pub p90: f64,
}

/// Axis labels and title for the rendered chart.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ChartConfig {
    pub xlabel: String,
    pub ylabel: String,
    pub title: String,
}

impl From<Histogram> for ChartMetadata {
    fn from(h: Histogram) -> Self {
        Self {
            bins: HistogramBins {
                centers: h.centers,
                counts: h.counts,
                edges: h.edges,
            },
            statistics: HistogramStatistics {
                mean: h.mean,
                std: h.std,
                p10: h.p10,
                p50: h.p50,
                p90: h.p90,
            },
            chart_config: ChartConfig {
                xlabel: h.xlabel,
                ylabel: h.ylabel,
                title: h.title,
            },
        }
    }
}

/// Serializes a payload to compact JSON.
pub fn to_json<T: serde::Serialize>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string(value)
}

/// Serializes a payload to pretty-printed JSON.
pub fn to_json_pretty<T: serde::Serialize>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

/// Deserializes a payload from JSON.
pub fn from_json<T: DeserializeOwned>(json: &str) -> Result<T, serde_json::Error> {
    serde_json::from_str(json)
}
