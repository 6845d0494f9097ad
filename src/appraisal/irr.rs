//! Internal Rate of Return via bracketed bisection
//!
//! The solver looks for the monthly rate that zeroes the NPV of the
//! cash-flow vector inside a single fixed bracket. No multi-bracket search
//! is attempted: if both bracket ends have the same sign the IRR is
//! reported as absent.

use serde::{Deserialize, Serialize};

use super::npv::npv_at_monthly_rate;

/// Lower bracket bound: -99% monthly
const BRACKET_LOW: f64 = -0.99;
/// Upper bracket bound: +500% monthly
const BRACKET_HIGH: f64 = 5.0;
/// Absolute NPV tolerance for declaring convergence
const NPV_TOLERANCE: f64 = 1e-7;
/// Iteration budget for the bisection
const MAX_ITERATIONS: u32 = 1000;

/// Annualized IRR with its convergence status
///
/// `converged == false` means the iteration budget ran out before the NPV
/// tolerance was met and the value is the best midpoint found; callers that
/// need an exact root must check the flag.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct IrrEstimate {
    /// Annual rate in percent
    pub annual_pct: f64,

    /// Whether the bisection met the NPV tolerance
    pub converged: bool,
}

/// Solve for the IRR of a monthly cash-flow vector
///
/// Returns `None` when the vector is too short or has no sign change within
/// the bracket. Fully deterministic: identical inputs always produce the
/// identical estimate.
pub fn solve_irr(cashflows: &[f64]) -> Option<IrrEstimate> {
    if cashflows.len() < 2 {
        return None;
    }

    let mut low = BRACKET_LOW;
    let mut high = BRACKET_HIGH;
    let mut f_low = npv_at_monthly_rate(cashflows, low);
    let f_high = npv_at_monthly_rate(cashflows, high);

    if f_low * f_high > 0.0 {
        return None;
    }

    let mut mid = (low + high) / 2.0;
    for _ in 0..MAX_ITERATIONS {
        let f_mid = npv_at_monthly_rate(cashflows, mid);

        if f_mid.abs() < NPV_TOLERANCE {
            return Some(IrrEstimate {
                annual_pct: annualize(mid),
                converged: true,
            });
        }

        if f_low * f_mid < 0.0 {
            high = mid;
        } else {
            low = mid;
            f_low = f_mid;
        }
        mid = (low + high) / 2.0;
    }

    // Budget exhausted: report the best midpoint rather than failing.
    Some(IrrEstimate {
        annual_pct: annualize(mid),
        converged: false,
    })
}

/// Convert a monthly rate to an annual percentage
fn annualize(monthly_rate: f64) -> f64 {
    ((1.0 + monthly_rate).powi(12) - 1.0) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_annual_return() {
        // 1,000 out, 1,100 back after 12 months: 10% annual IRR
        let mut cashflows = vec![-1_000.0];
        cashflows.extend(vec![0.0; 11]);
        cashflows.push(1_100.0);

        let irr = solve_irr(&cashflows).unwrap();
        assert!((irr.annual_pct - 10.0).abs() < 1e-3, "got {}", irr.annual_pct);
    }

    #[test]
    fn test_root_zeroes_npv() {
        let mut cashflows = vec![1_000.0];
        cashflows.extend(vec![-88.85; 12]);

        let irr = solve_irr(&cashflows).unwrap();
        let monthly = (1.0 + irr.annual_pct / 100.0).powf(1.0 / 12.0) - 1.0;
        let residual = npv_at_monthly_rate(&cashflows, monthly);
        assert!(residual.abs() < 1e-5, "NPV at IRR was {residual}");
    }

    #[test]
    fn test_determinism() {
        let mut cashflows = vec![150_000.0];
        cashflows.extend(vec![-1_301.73; 240]);

        let a = solve_irr(&cashflows).unwrap();
        let b = solve_irr(&cashflows).unwrap();
        assert_eq!(a.annual_pct.to_bits(), b.annual_pct.to_bits());
        assert_eq!(a.converged, b.converged);
    }

    #[test]
    fn test_all_negative_has_no_irr() {
        let cashflows = vec![-500.0, -100.0, -100.0, -100.0];
        assert!(solve_irr(&cashflows).is_none());
    }

    #[test]
    fn test_all_positive_has_no_irr() {
        let cashflows = vec![500.0, 100.0, 100.0];
        assert!(solve_irr(&cashflows).is_none());
    }

    #[test]
    fn test_too_short_vector() {
        assert!(solve_irr(&[1_000.0]).is_none());
        assert!(solve_irr(&[]).is_none());
    }
}
