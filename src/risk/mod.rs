//! Ensemble aggregation: percentiles, success probabilities, histograms.

pub mod histogram;
pub mod summary;

pub use histogram::{HISTOGRAM_BINS, Histogram, histogram};
pub use summary::{
    LOW_CONFIDENCE_THRESHOLD, PERCENTILE_LEVELS, Percentiles, SuccessProbabilities,
    low_confidence, percentiles, success_probabilities,
};
