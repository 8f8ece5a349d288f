//! Per-scenario financial indicators.
//!
//! Each function evaluates one indicator on a net cash-flow series whose
//! index 0 is the initial outflow. NaN is the only infeasibility sentinel:
//! a series that never breaks even, an IRR without a real root, a degenerate
//! denominator, all yield NaN rather than an error, so one pathological
//! scenario never poisons the rest of the ensemble.

use crate::math::{bisect, newton_raphson};

/// Newton starting guess for the internal rate of return.
const IRR_INITIAL_GUESS: f64 = 0.05;
/// Bracket scan for the bisection fallback, in steps of `IRR_SCAN_STEP`.
const IRR_SCAN_LO: f64 = -0.99;
const IRR_SCAN_HI: f64 = 10.0;
const IRR_SCAN_STEP: f64 = 0.05;

/// Net present value at discount rate `rate`.
///
/// Returns NaN when `1 + rate <= 0` or the series is empty.
pub fn npv(rate: f64, flows: &[f64]) -> f64 {
    if flows.is_empty() || 1.0 + rate <= 0.0 {
        return f64::NAN;
    }

    let base = 1.0 + rate;
    let mut discount = 1.0;
    let mut total = 0.0;
    for &flow in flows {
        total += flow / discount;
        discount *= base;
    }
    total
}

/// Derivative of [`npv`] with respect to the rate.
fn npv_derivative(rate: f64, flows: &[f64]) -> f64 {
    let base = 1.0 + rate;
    let mut total = 0.0;
    for (t, &flow) in flows.iter().enumerate().skip(1) {
        total -= t as f64 * flow / base.powi(t as i32 + 1);
    }
    total
}

/// Internal rate of return: the rate at which [`npv`] is zero.
///
/// Requires at least one positive and one negative flow; otherwise no real
/// root exists and NaN is returned. The solver is Newton-Raphson from a
/// 5 % guess with a bisection fallback on the first sign-change bracket
/// found scanning upward from −99 %; with multiple sign changes the result
/// is the first root this procedure converges to. NaN on divergence.
pub fn irr(flows: &[f64]) -> f64 {
    if flows.len() < 2 {
        return f64::NAN;
    }
    let has_positive = flows.iter().any(|&f| f > 0.0);
    let has_negative = flows.iter().any(|&f| f < 0.0);
    if !has_positive || !has_negative {
        return f64::NAN;
    }

    let f = |r: f64| npv(r, flows);
    let df = |r: f64| npv_derivative(r, flows);

    if let Ok(root) = newton_raphson(&f, &df, IRR_INITIAL_GUESS, 1e-9, 100) {
        if root > -1.0 && root.is_finite() {
            return root;
        }
    }

    // Newton diverged or left the admissible domain; bracket and bisect.
    let mut lo = IRR_SCAN_LO;
    let mut f_lo = f(lo);
    while lo < IRR_SCAN_HI {
        let hi = lo + IRR_SCAN_STEP;
        let f_hi = f(hi);
        if f_lo.is_finite() && f_hi.is_finite() && f_lo.signum() != f_hi.signum() {
            return bisect(&f, lo, hi, 1e-10, 200).unwrap_or(f64::NAN);
        }
        lo = hi;
        f_lo = f_hi;
    }

    f64::NAN
}

/// Return on investment: net profit over the initial outlay.
///
/// NaN when the year-0 flow is zero.
pub fn roi(flows: &[f64]) -> f64 {
    if flows.is_empty() || flows[0] == 0.0 {
        return f64::NAN;
    }
    let initial = flows[0].abs();
    let net_inflows: f64 = flows[1..].iter().sum();
    (net_inflows - initial) / initial
}

/// Simple (undiscounted) payback period in fractional years.
///
/// Zero when the year-0 flow is already non-negative (a loan covering all
/// of capex); NaN when the cumulative position never reaches zero within
/// the horizon.
pub fn payback_period(flows: &[f64]) -> f64 {
    if flows.is_empty() {
        return f64::NAN;
    }
    if flows[0] >= 0.0 {
        return 0.0;
    }

    let mut cumulative = flows[0];
    for (t, &flow) in flows.iter().enumerate().skip(1) {
        let previous = cumulative;
        cumulative += flow;
        if cumulative >= 0.0 {
            // previous < 0 here, so the crossing lies inside year t.
            return (t - 1) as f64 + (-previous) / flow;
        }
    }
    f64::NAN
}

/// Discounted payback period: [`payback_period`] on present-valued flows.
///
/// NaN when `1 + rate <= 0` or discounted flows never break even.
pub fn discounted_payback(rate: f64, flows: &[f64]) -> f64 {
    if flows.is_empty() || 1.0 + rate <= 0.0 {
        return f64::NAN;
    }
    if flows[0] >= 0.0 {
        return 0.0;
    }

    let base = 1.0 + rate;
    let mut discount = 1.0;
    let mut cumulative = flows[0];
    for (t, &flow) in flows.iter().enumerate().skip(1) {
        discount *= base;
        let discounted = flow / discount;
        let previous = cumulative;
        cumulative += discounted;
        if cumulative >= 0.0 {
            return (t - 1) as f64 + (-previous) / discounted;
        }
    }
    f64::NAN
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn npv_matches_hand_computation() {
        let flows = [-1_000.0, 500.0, 500.0, 500.0];
        let expected = -1_000.0 + 500.0 / 1.1 + 500.0 / 1.1_f64.powi(2) + 500.0 / 1.1_f64.powi(3);
        assert_relative_eq!(npv(0.10, &flows), expected, epsilon = 1e-12);
    }

    #[test]
    fn npv_at_zero_rate_is_the_flow_sum() {
        let flows = [-100.0, 40.0, 40.0, 40.0];
        assert_relative_eq!(npv(0.0, &flows), 20.0, epsilon = 1e-12);
    }

    #[test]
    fn npv_rejects_degenerate_rate() {
        assert!(npv(-1.0, &[-100.0, 50.0]).is_nan());
        assert!(npv(-1.5, &[-100.0, 50.0]).is_nan());
    }

    #[test]
    fn irr_recovers_a_known_root() {
        // -1000 + 1100/(1+r) = 0  =>  r = 0.10
        let flows = [-1_000.0, 1_100.0];
        assert_relative_eq!(irr(&flows), 0.10, epsilon = 1e-7);
    }

    #[test]
    fn irr_zeroes_the_npv() {
        let flows = [-10_000.0, 3_000.0, 3_500.0, 4_000.0, 4_500.0];
        let root = irr(&flows);
        assert!(root.is_finite());
        assert_relative_eq!(npv(root, &flows), 0.0, epsilon = 1e-5);
    }

    #[test]
    fn irr_without_sign_change_is_nan() {
        assert!(irr(&[-100.0, -50.0, -25.0]).is_nan());
        assert!(irr(&[100.0, 50.0, 25.0]).is_nan());
        assert!(irr(&[-100.0, 0.0, 0.0]).is_nan());
    }

    #[test]
    fn irr_handles_deeply_negative_roots() {
        // Sum of inflows barely above nothing: root far below zero.
        let flows = [-1_000.0, 10.0, 10.0, 10.0];
        let root = irr(&flows);
        assert!(root.is_nan() || npv(root, &flows).abs() < 1e-4);
    }

    #[test]
    fn roi_is_profit_over_outlay() {
        let flows = [-1_000.0, 600.0, 600.0];
        assert_relative_eq!(roi(&flows), 0.2, epsilon = 1e-12);
        assert!(roi(&[0.0, 100.0]).is_nan());
    }

    #[test]
    fn payback_interpolates_within_the_crossing_year() {
        // Cumulative: -1000, -400, 200 => crossing at 1 + 400/600.
        let flows = [-1_000.0, 600.0, 600.0];
        assert_relative_eq!(payback_period(&flows), 1.0 + 400.0 / 600.0, epsilon = 1e-12);
    }

    #[test]
    fn payback_is_zero_when_loan_covers_capex() {
        assert_relative_eq!(payback_period(&[0.0, 100.0]), 0.0);
        assert_relative_eq!(discounted_payback(0.05, &[0.0, 100.0]), 0.0);
    }

    #[test]
    fn payback_never_reached_is_nan() {
        assert!(payback_period(&[-1_000.0, 10.0, 10.0]).is_nan());
        assert!(discounted_payback(0.05, &[-1_000.0, 10.0, 10.0]).is_nan());
    }

    #[test]
    fn exact_breakeven_lands_on_the_year() {
        let flows = [-1_000.0, 400.0, 600.0];
        assert_relative_eq!(payback_period(&flows), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn discounting_stretches_the_payback() {
        let flows = [-1_000.0, 400.0, 400.0, 400.0, 400.0];
        let simple = payback_period(&flows);
        let discounted = discounted_payback(0.08, &flows);
        assert!(discounted > simple);
    }

    #[test]
    fn discounted_payback_at_zero_rate_equals_simple() {
        let flows = [-1_000.0, 300.0, 500.0, 700.0];
        assert_relative_eq!(
            discounted_payback(0.0, &flows),
            payback_period(&flows),
            epsilon = 1e-12
        );
    }
}
