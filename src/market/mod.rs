//! Market-forecast tables and their conversion into sampling distributions.

pub mod distribution;
pub mod forecast;

pub use distribution::{MarketDistributions, YearlyNormal, Z90};
pub use forecast::{ForecastBand, MarketForecasts};
