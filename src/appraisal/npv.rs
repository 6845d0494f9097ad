//! Net present value of a monthly cash-flow vector

use crate::error::{EngineError, EngineResult};
use crate::rates::annual_to_monthly;

/// Discount a cash-flow vector at an annual rate quoted in percent
///
/// The annual rate is converted to a monthly rate with the same effective
/// compounding used for loan rates, then each flow is discounted by its
/// month index. Zero and negative rates are accepted down to (not
/// including) -100%.
pub fn npv(cashflows: &[f64], annual_discount_pct: f64) -> EngineResult<f64> {
    if annual_discount_pct <= -100.0 || !annual_discount_pct.is_finite() {
        return Err(EngineError::InvalidRate(format!(
            "discount rate must be greater than -100%, got {annual_discount_pct}"
        )));
    }

    let monthly = annual_to_monthly(annual_discount_pct / 100.0);
    Ok(npv_at_monthly_rate(cashflows, monthly))
}

/// NPV at a raw monthly rate; shared with the IRR solver
pub(crate) fn npv_at_monthly_rate(cashflows: &[f64], monthly_rate: f64) -> f64 {
    cashflows
        .iter()
        .enumerate()
        .map(|(t, &cf)| cf / (1.0 + monthly_rate).powi(t as i32))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_zero_discount_is_plain_sum() {
        let cashflows = [1_000.0, -300.0, -300.0, -300.0];
        let value = npv(&cashflows, 0.0).unwrap();
        assert_relative_eq!(value, 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_known_discounting() {
        // 1,000 out, 1,100 back after 12 months, discounted at 10% annual:
        // NPV = -1000 + 1100/1.10 = 0
        let mut cashflows = vec![-1_000.0];
        cashflows.extend(vec![0.0; 11]);
        cashflows.push(1_100.0);

        let value = npv(&cashflows, 10.0).unwrap();
        assert!(value.abs() < 1e-9, "got {value}");
    }

    #[test]
    fn test_negative_discount_rate_is_accepted() {
        let cashflows = [-100.0, 50.0, 50.0];
        assert!(npv(&cashflows, -5.0).is_ok());
    }

    #[test]
    fn test_discount_floor_is_rejected() {
        let cashflows = [-100.0, 50.0, 50.0];
        assert!(matches!(
            npv(&cashflows, -100.0),
            Err(EngineError::InvalidRate(_))
        ));
    }
}
