//! Three-scenario market forecasts.
//!
//! Every market variable is described by three ordered year-indexed paths:
//! pessimistic, moderate, and optimistic, interpreted as the P10/P50/P90 of
//! that year's marginal distribution. Rates are fractions (0.03 = 3 %),
//! electricity prices are currency per kWh.
//!
//! Tables shorter than the project horizon are padded by repeating their
//! final element; longer tables are truncated. The embedded dataset lives
//! in `data/market_forecasts.json` and is parsed once per process.

use std::sync::OnceLock;

use crate::core::AssessmentError;

/// Longest forecast horizon shipped with the embedded dataset.
pub const FORECAST_HORIZON: usize = 30;

const EMBEDDED_DATASET: &str = include_str!("../../data/market_forecasts.json");

/// One market variable's three scenario paths.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ForecastBand {
    /// P10 path (lowest plausible values).
    pub pessimistic: Vec<f64>,
    /// P50 path (median values).
    pub moderate: Vec<f64>,
    /// P90 path (highest plausible values).
    pub optimistic: Vec<f64>,
}

impl ForecastBand {
    /// Builds a band from three scenario paths.
    pub fn new(pessimistic: Vec<f64>, moderate: Vec<f64>, optimistic: Vec<f64>) -> Self {
        Self {
            pessimistic,
            moderate,
            optimistic,
        }
    }

    /// Band holding one constant scenario triple, for broadcast variables.
    pub fn scalar(pessimistic: f64, moderate: f64, optimistic: f64) -> Self {
        Self::new(vec![pessimistic], vec![moderate], vec![optimistic])
    }

    /// The three paths padded (or truncated) to `horizon` years.
    ///
    /// Padding repeats the final element of each path.
    pub fn padded(&self, horizon: usize) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
        (
            pad_to(&self.pessimistic, horizon),
            pad_to(&self.moderate, horizon),
            pad_to(&self.optimistic, horizon),
        )
    }

    /// Validates ordering and finiteness of the padded triple.
    ///
    /// `require_positive` additionally demands strictly positive values
    /// (electricity prices).
    ///
    /// # Errors
    /// [`AssessmentError::InvalidForecast`] naming the variable and the
    /// offending year.
    pub fn validate(
        &self,
        name: &str,
        horizon: usize,
        require_positive: bool,
    ) -> Result<(), AssessmentError> {
        if self.pessimistic.is_empty() || self.moderate.is_empty() || self.optimistic.is_empty() {
            return Err(AssessmentError::InvalidForecast(format!(
                "{name}: forecast paths must not be empty"
            )));
        }

        let (pess, moderate, opt) = self.padded(horizon);
        for t in 0..horizon {
            let (p, m, o) = (pess[t], moderate[t], opt[t]);
            if !p.is_finite() || !m.is_finite() || !o.is_finite() {
                return Err(AssessmentError::InvalidForecast(format!(
                    "{name}: non-finite value at year {t}"
                )));
            }
            if !(p <= m && m <= o) {
                return Err(AssessmentError::InvalidForecast(format!(
                    "{name}: scenario triple not ordered at year {t} ({p} / {m} / {o})"
                )));
            }
            if require_positive && p <= 0.0 {
                return Err(AssessmentError::InvalidForecast(format!(
                    "{name}: values must be positive, got {p} at year {t}"
                )));
            }
        }
        Ok(())
    }
}

fn pad_to(values: &[f64], len: usize) -> Vec<f64> {
    let mut out: Vec<f64> = values.iter().copied().take(len).collect();
    if let Some(&last) = values.last() {
        while out.len() < len {
            out.push(last);
        }
    }
    out
}

/// Three-scenario forecast tables for the four market variables.
///
/// Process-wide read-only data: loaded once at startup and shared across
/// requests without synchronization.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MarketForecasts {
    /// Dataset revision tag, carried from the data file.
    #[serde(default)]
    pub version: String,
    /// Yearly inflation rate (fraction).
    pub inflation: ForecastBand,
    /// Grid electricity price (currency per kWh).
    pub electricity_price: ForecastBand,
    /// Annual loan interest rate (fraction).
    pub loan_interest: ForecastBand,
    /// Discount rate (fraction), a scalar triple broadcast over the horizon.
    pub discount: ForecastBand,
}

impl MarketForecasts {
    /// The forecast tables shipped with the crate.
    ///
    /// Parsed and validated on first use; the embedded dataset is part of
    /// the build, so a failure here is a packaging defect and panics at
    /// startup rather than surfacing per-request.
    pub fn embedded() -> &'static MarketForecasts {
        static EMBEDDED: OnceLock<MarketForecasts> = OnceLock::new();
        EMBEDDED.get_or_init(|| {
            let forecasts: MarketForecasts = serde_json::from_str(EMBEDDED_DATASET)
                .expect("embedded market forecast dataset must parse");
            forecasts
                .validate()
                .expect("embedded market forecast dataset must validate");
            forecasts
        })
    }

    /// Validates every band over the full embedded horizon.
    ///
    /// # Errors
    /// [`AssessmentError::InvalidForecast`] for the first violated band.
    pub fn validate(&self) -> Result<(), AssessmentError> {
        self.inflation.validate("inflation", FORECAST_HORIZON, false)?;
        self.electricity_price
            .validate("electricity_price", FORECAST_HORIZON, true)?;
        self.loan_interest
            .validate("loan_interest", FORECAST_HORIZON, false)?;
        self.discount.validate("discount", FORECAST_HORIZON, false)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_dataset_parses_and_validates() {
        let forecasts = MarketForecasts::embedded();
        assert_eq!(forecasts.version, "2025.1");
        assert_eq!(forecasts.inflation.moderate.len(), 30);
        assert_eq!(forecasts.electricity_price.moderate.len(), 18);
        assert_eq!(forecasts.discount.moderate, vec![0.05]);
    }

    #[test]
    fn padding_repeats_final_element_and_truncates() {
        let band = ForecastBand::new(vec![1.0, 2.0], vec![2.0, 3.0], vec![3.0, 4.0]);
        let (pess, moderate, opt) = band.padded(4);
        assert_eq!(pess, vec![1.0, 2.0, 2.0, 2.0]);
        assert_eq!(moderate, vec![2.0, 3.0, 3.0, 3.0]);
        assert_eq!(opt, vec![3.0, 4.0, 4.0, 4.0]);

        let (pess, _, _) = band.padded(1);
        assert_eq!(pess, vec![1.0]);
    }

    #[test]
    fn unordered_triple_is_rejected() {
        let band = ForecastBand::new(vec![2.0], vec![1.0], vec![3.0]);
        let err = band.validate("inflation", 5, false).unwrap_err();
        assert!(err.to_string().contains("not ordered"));
    }

    #[test]
    fn non_positive_price_is_rejected() {
        let band = ForecastBand::new(vec![0.0], vec![0.2], vec![0.3]);
        assert!(band.validate("electricity_price", 3, true).is_err());
        let band = ForecastBand::new(vec![0.1], vec![0.2], vec![0.3]);
        assert!(band.validate("electricity_price", 3, true).is_ok());
    }

    #[test]
    fn empty_path_is_rejected() {
        let band = ForecastBand::new(vec![], vec![1.0], vec![2.0]);
        assert!(band.validate("inflation", 3, false).is_err());
    }
}
