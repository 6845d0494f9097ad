//! Rate-basis conversion
//!
//! Normalizes a quoted annual rate (effective, or nominal with a stated
//! capitalization frequency) into the effective monthly rate that drives the
//! amortization recurrence. All rates enter as percentages and leave as
//! decimals.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// How the quoted annual rate is to be interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RateBasis {
    /// True annual compounding (TEA)
    Effective,
    /// Nominal annual rate requiring a capitalization frequency (TNA)
    Nominal,
}

/// Capitalization frequencies accepted for nominal rates (periods per year)
pub const SUPPORTED_CAPITALIZATIONS: [u32; 4] = [1, 2, 4, 12];

/// Convert an annual rate in percent to the effective annual rate as a decimal
///
/// For an effective quote this is just `rate / 100`. For a nominal quote with
/// capitalization `m`, the effective rate is `(1 + (rate/100)/m)^m - 1`.
pub fn effective_annual(rate_pct: f64, basis: RateBasis, capitalization: u32) -> EngineResult<f64> {
    if rate_pct <= 0.0 || !rate_pct.is_finite() {
        return Err(EngineError::InvalidRate(format!(
            "annual rate must be a positive percentage, got {rate_pct}"
        )));
    }

    match basis {
        RateBasis::Effective => Ok(rate_pct / 100.0),
        RateBasis::Nominal => {
            if !SUPPORTED_CAPITALIZATIONS.contains(&capitalization) {
                return Err(EngineError::InvalidRate(format!(
                    "unsupported capitalization frequency {capitalization} (expected one of {SUPPORTED_CAPITALIZATIONS:?})"
                )));
            }
            let m = capitalization as f64;
            Ok((1.0 + rate_pct / 100.0 / m).powf(m) - 1.0)
        }
    }
}

/// Convert an effective annual rate (decimal) to the equivalent monthly rate
pub fn annual_to_monthly(annual: f64) -> f64 {
    (1.0 + annual).powf(1.0 / 12.0) - 1.0
}

/// Normalize a quoted annual rate into an effective monthly rate (decimal)
pub fn monthly_rate(rate_pct: f64, basis: RateBasis, capitalization: u32) -> EngineResult<f64> {
    let annual = effective_annual(rate_pct, basis, capitalization)?;
    let monthly = annual_to_monthly(annual);

    if monthly <= 0.0 || !monthly.is_finite() {
        return Err(EngineError::InvalidRate(format!(
            "rate {rate_pct}% converts to a non-positive monthly rate"
        )));
    }

    Ok(monthly)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_effective_annual_passthrough() {
        let a = effective_annual(8.5, RateBasis::Effective, 12).unwrap();
        assert_relative_eq!(a, 0.085, epsilon = 1e-12);
    }

    #[test]
    fn test_nominal_monthly_capitalization() {
        // 10% nominal capitalized monthly -> (1 + 0.10/12)^12 - 1 ~= 10.4713%
        let a = effective_annual(10.0, RateBasis::Nominal, 12).unwrap();
        assert_relative_eq!(a, 0.10471306744129724, epsilon = 1e-12);

        // Round trip: the monthly rate recovers the nominal/12 quote
        let m = monthly_rate(10.0, RateBasis::Nominal, 12).unwrap();
        assert_relative_eq!(m, 0.10 / 12.0, epsilon = 1e-12);
    }

    #[test]
    fn test_nominal_annual_capitalization_is_effective() {
        // Capitalization of 1 makes nominal and effective coincide
        let nominal = effective_annual(8.5, RateBasis::Nominal, 1).unwrap();
        let effective = effective_annual(8.5, RateBasis::Effective, 1).unwrap();
        assert_relative_eq!(nominal, effective, epsilon = 1e-12);
    }

    #[test]
    fn test_effective_to_monthly() {
        let m = monthly_rate(8.5, RateBasis::Effective, 12).unwrap();
        let expected = 1.085_f64.powf(1.0 / 12.0) - 1.0;
        assert_relative_eq!(m, expected, epsilon = 1e-14);
        // Monthly compounding of the monthly rate recovers the annual rate
        assert_relative_eq!((1.0 + m).powi(12) - 1.0, 0.085, epsilon = 1e-12);
    }

    #[test]
    fn test_rejects_non_positive_rate() {
        assert!(matches!(
            monthly_rate(0.0, RateBasis::Effective, 12),
            Err(EngineError::InvalidRate(_))
        ));
        assert!(matches!(
            monthly_rate(-3.0, RateBasis::Effective, 12),
            Err(EngineError::InvalidRate(_))
        ));
    }

    #[test]
    fn test_rejects_unsupported_capitalization() {
        assert!(matches!(
            monthly_rate(10.0, RateBasis::Nominal, 7),
            Err(EngineError::InvalidRate(_))
        ));
    }
}
