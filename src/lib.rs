//! RetroRisk is a Monte Carlo risk-assessment engine for energy-retrofit
//! investments: it samples year-resolved market trajectories from
//! percentile-encoded forecasts, synthesizes yearly cash-flow series (with
//! or without amortizing debt), evaluates five financial indicators per
//! trajectory (NPV, IRR, ROI, simple and discounted payback), and
//! aggregates the ensemble into audience-shaped result envelopes.
//!
//! The crate layers bottom-up:
//! - `market`: three-scenario forecast tables and their conversion into
//!   per-year Normal / lognormal sampling parameters.
//! - `engines::monte_carlo`: the seeded trajectory sampler and the
//!   cash-flow & indicator kernel.
//! - `risk`: percentile summaries, success probabilities, histogram
//!   descriptors.
//! - `assessment`: the end-to-end `run_risk_assessment` workflow and the
//!   private/professional envelope builders.
//!
//! Numerical considerations:
//! - NaN is the only infeasibility sentinel; a scenario that never breaks
//!   even or has no real IRR root contributes NaN and never poisons its
//!   neighbors. The wire format is NaN-free (values omitted or `null`).
//! - Determinism: a per-request PCG64 generator plus a fixed draw order
//!   make identical `(inputs, forecasts, n_sims, seed)` bit-reproducible.
//! - The kernel pre-draws all randomness, so the optional `parallel`
//!   feature changes wall-clock time, never results.
//!
//! # Feature Flags
//! - `parallel`: enables Rayon-powered scenario-level parallelism in the
//!   indicator kernel.
//!
//! # Quick Start
//! Assess a retrofit project for a homeowner:
//! ```rust
//! use retrorisk::assessment::run_risk_assessment;
//! use retrorisk::core::{OutputLevel, ProjectInputs, RunConfig};
//! use retrorisk::market::MarketForecasts;
//!
//! let inputs = ProjectInputs {
//!     capex: 60_000.0,
//!     annual_maintenance_cost: 2_000.0,
//!     annual_energy_savings: 27_400.0,
//!     project_lifetime: 20,
//!     loan_amount: 25_000.0,
//!     loan_term: 15,
//! };
//! let config = RunConfig::new(OutputLevel::Private).with_sims(1_000).with_seed(42);
//! let envelope = run_risk_assessment(&inputs, MarketForecasts::embedded(), &config).unwrap();
//!
//! assert!(envelope.point_forecasts.contains_key("NPV"));
//! assert!(envelope.metadata.cash_flow_data.is_some());
//! ```
//!
//! Evaluate a single cash-flow series:
//! ```rust
//! use retrorisk::engines::monte_carlo::indicators::{irr, npv, payback_period};
//!
//! let flows = [-10_000.0, 3_000.0, 3_500.0, 4_000.0, 4_500.0];
//! assert!(npv(0.05, &flows) > 0.0);
//! assert!(irr(&flows) > 0.10);
//! assert!(payback_period(&flows) < 4.0);
//! ```
//!
//! Inspect the sampling distributions behind a run:
//! ```rust
//! use retrorisk::market::{MarketDistributions, MarketForecasts};
//!
//! let dist = MarketDistributions::build(MarketForecasts::embedded(), 20).unwrap();
//! assert_eq!(dist.median_electricity_price().len(), 20);
//! assert!(dist.median_discount_rate() > 0.0);
//! ```
//!
//! Serialize an envelope for the wire:
//! ```rust
//! use retrorisk::assessment::run_risk_assessment;
//! use retrorisk::core::{OutputLevel, ProjectInputs, RunConfig, to_json};
//! use retrorisk::market::MarketForecasts;
//!
//! let inputs = ProjectInputs::equity_only(60_000.0, 2_000.0, 27_400.0, 20);
//! let config = RunConfig::new(OutputLevel::Professional).with_sims(1_000);
//! let envelope = run_risk_assessment(&inputs, MarketForecasts::embedded(), &config).unwrap();
//! let json = to_json(&envelope).unwrap();
//! assert!(json.contains("chart_metadata"));
//! ```

pub mod assessment;
pub mod core;
pub mod engines;
pub mod market;
pub mod math;
pub mod risk;

/// Common imports for ergonomic usage.
pub mod prelude {
    pub use crate::assessment::run_risk_assessment;
    pub use crate::core::{
        AssessmentError, Indicator, IndicatorSet, OutputLevel, ProjectInputs, ResultEnvelope,
        RunConfig, to_json, to_json_pretty,
    };
    pub use crate::engines::monte_carlo::MonteCarloEngine;
    pub use crate::market::{MarketDistributions, MarketForecasts};
}
