//! Yearly net cash-flow synthesis.
//!
//! A project's series has length `project_lifetime + 1`. Index 0 is the
//! equity outflow `-(capex - loan_amount)`; indices 1..=T hold the net
//! yearly position: energy savings at the year's electricity price, minus
//! maintenance inflated by cumulative inflation since project start,
//! minus debt service while the loan runs.
//!
//! Loans amortize constant-principal: equal principal each year, interest
//! on the declining balance.

use crate::core::ProjectInputs;
use crate::market::MarketDistributions;

/// Debt service due in year `t` (1-based), zero outside the loan tenor.
#[inline]
pub fn debt_service(inputs: &ProjectInputs, t: usize, interest_rate: f64) -> f64 {
    if inputs.loan_amount <= 0.0 || t > inputs.loan_term {
        return 0.0;
    }
    let principal = inputs.loan_amount / inputs.loan_term as f64;
    let outstanding = inputs.loan_amount - principal * (t as f64 - 1.0);
    principal + outstanding * interest_rate
}

/// Builds one scenario's net cash-flow series into `out`.
///
/// `electricity`, `inflation`, and `interest` are year-indexed slices of
/// length `project_lifetime`; `out` is cleared and refilled, so callers
/// can reuse one buffer across scenarios.
pub fn net_cash_flows(
    inputs: &ProjectInputs,
    electricity: &[f64],
    inflation: &[f64],
    interest: &[f64],
    out: &mut Vec<f64>,
) {
    let lifetime = inputs.project_lifetime;
    out.clear();
    out.reserve(lifetime + 1);
    out.push(-(inputs.capex - inputs.loan_amount));

    let mut cumulative_inflation = 1.0;
    for t in 1..=lifetime {
        cumulative_inflation *= 1.0 + inflation[t - 1];
        let savings = inputs.annual_energy_savings * electricity[t - 1];
        let maintenance = inputs.annual_maintenance_cost * cumulative_inflation;
        let operating = savings - maintenance;
        out.push(operating - debt_service(inputs, t, interest[t - 1]));
    }
}

/// Deterministic cash-flow timeline of the median scenario.
///
/// Every market variable is fixed at its P50 trajectory (no sampling);
/// arrays are year-indexed with index 0 being the investment year.
#[derive(Debug, Clone, PartialEq)]
pub struct CashFlowTimeline {
    /// Year labels 0..=T.
    pub years: Vec<usize>,
    /// Equity invested at year 0, `capex - loan_amount`.
    pub initial_investment: f64,
    /// Energy-savings revenue per year; zero at year 0.
    pub annual_inflows: Vec<f64>,
    /// Maintenance plus debt service per year; the equity outflow at year 0.
    pub annual_outflows: Vec<f64>,
    /// Inflows minus outflows, negative at year 0.
    pub annual_net_cash_flow: Vec<f64>,
    /// Running sum of the net series.
    pub cumulative_cash_flow: Vec<f64>,
    /// First year with non-negative cumulative position, if any.
    pub breakeven_year: Option<usize>,
    /// Loan tenor, present only when the project carries debt.
    pub loan_term: Option<usize>,
}

/// Computes the median-scenario timeline for the private envelope.
pub fn median_scenario_timeline(
    inputs: &ProjectInputs,
    dist: &MarketDistributions,
) -> CashFlowTimeline {
    let lifetime = inputs.project_lifetime;
    let electricity = dist.median_electricity_price();
    let inflation = &dist.inflation.mu;
    let interest = &dist.loan_interest.mu;

    let initial_investment = inputs.capex - inputs.loan_amount;
    let mut annual_inflows = Vec::with_capacity(lifetime + 1);
    let mut annual_outflows = Vec::with_capacity(lifetime + 1);
    annual_inflows.push(0.0);
    annual_outflows.push(initial_investment);

    let mut cumulative_inflation = 1.0;
    for t in 1..=lifetime {
        cumulative_inflation *= 1.0 + inflation[t - 1];
        let savings = inputs.annual_energy_savings * electricity[t - 1];
        let maintenance = inputs.annual_maintenance_cost * cumulative_inflation;
        annual_inflows.push(savings);
        annual_outflows.push(maintenance + debt_service(inputs, t, interest[t - 1]));
    }

    let annual_net_cash_flow: Vec<f64> = annual_inflows
        .iter()
        .zip(&annual_outflows)
        .map(|(inflow, outflow)| inflow - outflow)
        .collect();

    let mut cumulative_cash_flow = Vec::with_capacity(lifetime + 1);
    let mut running = 0.0;
    for &net in &annual_net_cash_flow {
        running += net;
        cumulative_cash_flow.push(running);
    }

    let breakeven_year = cumulative_cash_flow.iter().position(|&c| c >= 0.0);

    CashFlowTimeline {
        years: (0..=lifetime).collect(),
        initial_investment,
        annual_inflows,
        annual_outflows,
        annual_net_cash_flow,
        cumulative_cash_flow,
        breakeven_year,
        loan_term: inputs.has_loan().then_some(inputs.loan_term),
    }
}

/// Median-scenario yearly savings, used for the monthly-savings forecast.
pub fn median_scenario_savings(inputs: &ProjectInputs, dist: &MarketDistributions) -> Vec<f64> {
    dist.median_electricity_price()
        .iter()
        .map(|price| inputs.annual_energy_savings * price)
        .collect()
}
