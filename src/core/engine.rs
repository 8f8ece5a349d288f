//! Library-wide error structures shared by every layer of the engine.

/// Errors surfaced at the assessment entry boundary.
///
/// Per-scenario numeric failures never appear here: they are contained
/// inside the Monte Carlo kernel and reported as NaN in the affected
/// scenario's indicator slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssessmentError {
    /// Project inputs or run configuration failed validation.
    InvalidInputs(String),
    /// Market-forecast tables violate ordering or positivity constraints.
    InvalidForecast(String),
}

impl std::fmt::Display for AssessmentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInputs(msg) => write!(f, "invalid inputs: {msg}"),
            Self::InvalidForecast(msg) => write!(f, "invalid forecast: {msg}"),
        }
    }
}

impl std::error::Error for AssessmentError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_kind_and_message() {
        let err = AssessmentError::InvalidInputs("loan_amount exceeds capex".to_string());
        assert_eq!(err.to_string(), "invalid inputs: loan_amount exceeds capex");

        let err = AssessmentError::InvalidForecast("unordered triple at year 3".to_string());
        assert!(err.to_string().starts_with("invalid forecast:"));
    }
}
