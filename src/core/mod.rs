//! Core domain types, error structures, and wire-format serialization.

pub mod engine;
pub mod serialization;
pub mod types;

pub use engine::AssessmentError;
pub use serialization::{
    CashFlowData, ChartConfig, ChartMetadata, HistogramBins, HistogramStatistics, Metadata,
    ResultEnvelope, from_json, to_json, to_json_pretty,
};
pub use types::{
    Indicator, IndicatorSet, MAX_LIFETIME, MAX_SIMS, MIN_SIMS, OutputLevel, ProjectInputs,
    RunConfig,
};
