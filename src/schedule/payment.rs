//! Fixed installment (PMT) under the French amortization method

use crate::error::{EngineError, EngineResult};

/// Compute the fixed periodic installment for a balance amortized over
/// `periods` months at `monthly_rate`
///
/// A zero rate falls back to straight-line repayment. The rate converter
/// never produces a zero rate, but the schedule builder reuses this for the
/// post-grace segment, so the degenerate case stays supported.
pub fn fixed_payment(principal: f64, monthly_rate: f64, periods: u32) -> EngineResult<f64> {
    if periods == 0 {
        return Err(EngineError::InvalidTerm(
            "installment requires at least one period".to_string(),
        ));
    }

    if monthly_rate == 0.0 {
        return Ok(principal / periods as f64);
    }

    let n = periods as i32;
    Ok(principal * monthly_rate / (1.0 - (1.0 + monthly_rate).powi(-n)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_payment() {
        // 150,000 over 240 months at 8.5%/12 nominal-monthly
        let pmt = fixed_payment(150_000.0, 0.085 / 12.0, 240).unwrap();
        assert!((pmt - 1301.73).abs() < 0.01, "got {pmt}");
    }

    #[test]
    fn test_zero_rate_is_straight_line() {
        let pmt = fixed_payment(12_000.0, 0.0, 24).unwrap();
        assert!((pmt - 500.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_periods_is_rejected() {
        assert!(matches!(
            fixed_payment(10_000.0, 0.01, 0),
            Err(EngineError::InvalidTerm(_))
        ));
    }

    #[test]
    fn test_single_period_repays_balance_plus_interest() {
        let pmt = fixed_payment(1_000.0, 0.01, 1).unwrap();
        assert!((pmt - 1_010.0).abs() < 1e-9);
    }
}
