//! Common domain types: project inputs, indicator identifiers, run configuration.

use crate::core::AssessmentError;

/// Number of simulated scenarios accepted per request.
pub const MIN_SIMS: usize = 1_000;
/// Upper bound on simulated scenarios per request.
pub const MAX_SIMS: usize = 100_000;
/// Longest supported evaluation horizon in years.
pub const MAX_LIFETIME: usize = 30;

/// Financial indicator computed per simulated scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Indicator {
    /// Internal rate of return.
    Irr,
    /// Net present value.
    Npv,
    /// Return on investment.
    Roi,
    /// Simple (undiscounted) payback period.
    Pbp,
    /// Discounted payback period.
    Dpp,
}

impl Indicator {
    /// All five indicators, in canonical order.
    pub const ALL: [Indicator; 5] = [Self::Irr, Self::Npv, Self::Roi, Self::Pbp, Self::Dpp];

    /// Short uppercase identifier used in output envelopes.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Irr => "IRR",
            Self::Npv => "NPV",
            Self::Roi => "ROI",
            Self::Pbp => "PBP",
            Self::Dpp => "DPP",
        }
    }
}

impl std::fmt::Display for Indicator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compact set of requested indicators.
///
/// The kernel always evaluates all five indicator vectors; the set only
/// restricts which indicators appear in percentiles, histograms, and
/// point forecasts of the output envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndicatorSet(u8);

impl IndicatorSet {
    /// Set containing all five indicators.
    pub const ALL: Self = Self(0b1_1111);

    /// Empty set.
    pub const fn empty() -> Self {
        Self(0)
    }

    const fn bit(indicator: Indicator) -> u8 {
        1 << indicator as u8
    }

    /// Returns the set extended with `indicator`.
    pub const fn with(self, indicator: Indicator) -> Self {
        Self(self.0 | Self::bit(indicator))
    }

    /// Membership test.
    pub const fn contains(self, indicator: Indicator) -> bool {
        self.0 & Self::bit(indicator) != 0
    }

    /// True when no indicator is requested.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Builds a set from a slice of indicators.
    pub fn from_slice(indicators: &[Indicator]) -> Self {
        indicators
            .iter()
            .fold(Self::empty(), |set, &ind| set.with(ind))
    }

    /// Iterates members in canonical order.
    pub fn iter(self) -> impl Iterator<Item = Indicator> {
        Indicator::ALL.into_iter().filter(move |&i| self.contains(i))
    }
}

impl Default for IndicatorSet {
    fn default() -> Self {
        Self::ALL
    }
}

/// Audience for the result envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputLevel {
    /// Individual homeowners: point forecasts, percentiles, cash-flow timeline.
    Private,
    /// Energy consultants: percentiles, probabilities, histogram chart metadata.
    Professional,
}

/// Validated description of a retrofit investment project.
///
/// All monetary values share one currency unit; rates cross the API as
/// fractions (0.05 means 5 %).
///
/// # Examples
/// ```
/// use retrorisk::core::ProjectInputs;
///
/// let inputs = ProjectInputs {
///     capex: 60_000.0,
///     annual_maintenance_cost: 2_000.0,
///     annual_energy_savings: 27_400.0,
///     project_lifetime: 20,
///     loan_amount: 25_000.0,
///     loan_term: 15,
/// };
/// assert!(inputs.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ProjectInputs {
    /// Up-front capital expenditure, strictly positive.
    pub capex: f64,
    /// Yearly operation and maintenance cost in today's money.
    pub annual_maintenance_cost: f64,
    /// Nominal energy saved per year, in kWh.
    pub annual_energy_savings: f64,
    /// Evaluation horizon in years, within [1, 30].
    pub project_lifetime: usize,
    /// Principal borrowed at year 0; zero for equity-only projects.
    pub loan_amount: f64,
    /// Loan tenor in years; zero exactly when there is no loan.
    pub loan_term: usize,
}

impl ProjectInputs {
    /// Equity-only inputs without any debt overlay.
    pub fn equity_only(
        capex: f64,
        annual_maintenance_cost: f64,
        annual_energy_savings: f64,
        project_lifetime: usize,
    ) -> Self {
        Self {
            capex,
            annual_maintenance_cost,
            annual_energy_savings,
            project_lifetime,
            loan_amount: 0.0,
            loan_term: 0,
        }
    }

    /// True when the project carries an amortizing loan.
    pub fn has_loan(&self) -> bool {
        self.loan_amount > 0.0
    }

    /// Checks every structural invariant of the record.
    ///
    /// # Errors
    /// Returns [`AssessmentError::InvalidInputs`] naming the first violated
    /// constraint.
    pub fn validate(&self) -> Result<(), AssessmentError> {
        let invalid = |msg: String| Err(AssessmentError::InvalidInputs(msg));

        if !self.capex.is_finite() || self.capex <= 0.0 {
            return invalid(format!("capex must be positive, got {}", self.capex));
        }
        if !self.annual_maintenance_cost.is_finite() || self.annual_maintenance_cost < 0.0 {
            return invalid(format!(
                "annual_maintenance_cost must be non-negative, got {}",
                self.annual_maintenance_cost
            ));
        }
        if !self.annual_energy_savings.is_finite() || self.annual_energy_savings <= 0.0 {
            return invalid(format!(
                "annual_energy_savings must be positive, got {}",
                self.annual_energy_savings
            ));
        }
        if self.project_lifetime == 0 || self.project_lifetime > MAX_LIFETIME {
            return invalid(format!(
                "project_lifetime must be within [1, {MAX_LIFETIME}], got {}",
                self.project_lifetime
            ));
        }
        if !self.loan_amount.is_finite() || self.loan_amount < 0.0 {
            return invalid(format!(
                "loan_amount must be non-negative, got {}",
                self.loan_amount
            ));
        }
        if self.loan_amount > self.capex {
            return invalid(format!(
                "loan_amount ({}) cannot exceed capex ({})",
                self.loan_amount, self.capex
            ));
        }
        if self.loan_term > self.project_lifetime {
            return invalid(format!(
                "loan_term ({}) cannot exceed project_lifetime ({})",
                self.loan_term, self.project_lifetime
            ));
        }
        if self.loan_amount > 0.0 && self.loan_term == 0 {
            return invalid(format!(
                "loan_term must be positive when loan_amount > 0, got loan_amount = {}",
                self.loan_amount
            ));
        }

        Ok(())
    }
}

/// Run configuration for one assessment request.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    /// Number of Monte Carlo scenarios, within [1000, 100000].
    pub n_sims: usize,
    /// Seed for the per-request pseudo-random generator.
    pub seed: u64,
    /// Audience shape of the result envelope.
    pub output_level: OutputLevel,
    /// Indicators to include in the envelope; defaults to all five.
    pub indicators: IndicatorSet,
    /// Optional fixed annual loan rate (fraction). When set, the interest
    /// matrix holds this constant instead of market-sampled rates.
    pub fixed_loan_rate: Option<f64>,
}

impl RunConfig {
    /// Default scenario count.
    pub const DEFAULT_SIMS: usize = 10_000;
    /// Default seed.
    pub const DEFAULT_SEED: u64 = 42;

    /// Canonical configuration for the given audience.
    pub fn new(output_level: OutputLevel) -> Self {
        Self {
            n_sims: Self::DEFAULT_SIMS,
            seed: Self::DEFAULT_SEED,
            output_level,
            indicators: IndicatorSet::ALL,
            fixed_loan_rate: None,
        }
    }

    /// Overrides the scenario count.
    pub fn with_sims(mut self, n_sims: usize) -> Self {
        self.n_sims = n_sims;
        self
    }

    /// Overrides the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Restricts the indicators present in the envelope.
    pub fn with_indicators(mut self, indicators: IndicatorSet) -> Self {
        self.indicators = indicators;
        self
    }

    /// Pins the loan rate instead of sampling it from the market.
    pub fn with_fixed_loan_rate(mut self, rate: f64) -> Self {
        self.fixed_loan_rate = Some(rate);
        self
    }

    /// Checks the request-level constraints.
    ///
    /// # Errors
    /// Returns [`AssessmentError::InvalidInputs`] on out-of-range scenario
    /// counts or a non-finite / sub-unity-destroying fixed loan rate.
    pub fn validate(&self) -> Result<(), AssessmentError> {
        if self.n_sims < MIN_SIMS || self.n_sims > MAX_SIMS {
            return Err(AssessmentError::InvalidInputs(format!(
                "n_sims must be within [{MIN_SIMS}, {MAX_SIMS}], got {}",
                self.n_sims
            )));
        }
        if let Some(rate) = self.fixed_loan_rate {
            if !rate.is_finite() || rate <= -1.0 {
                return Err(AssessmentError::InvalidInputs(format!(
                    "fixed_loan_rate must be finite and greater than -1, got {rate}"
                )));
            }
        }
        Ok(())
    }
}
