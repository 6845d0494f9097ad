//! Loan parameter structures matching the simulator input format

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::rates::RateBasis;

/// Default capitalization frequency for nominal rates (monthly)
fn default_capitalization() -> u32 {
    12
}

/// Display currency for amounts; never converted, label only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Peruvian sol (S/)
    Pen,
    /// US dollar ($)
    Usd,
}

impl Currency {
    /// Symbol used when printing amounts
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Pen => "S/",
            Currency::Usd => "$",
        }
    }
}

/// Unit the term was entered in; the engine always works in whole months
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TermUnit {
    Years,
    Months,
}

/// Grace period regime for the initial deferral span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraceRegime {
    /// No deferral: a single fixed installment covers the whole term
    None,
    /// Nothing is paid; interest capitalizes into the balance
    Total,
    /// Interest-only payments; the balance stays unchanged
    Partial,
}

/// Full set of inputs for one loan simulation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanParameters {
    /// Loan amount before any subsidy deduction
    pub principal: f64,

    /// Display currency
    #[serde(default = "LoanParameters::default_currency")]
    pub currency: Currency,

    /// Quoted annual rate in percent
    pub annual_rate: f64,

    /// Whether the quoted rate is effective or nominal
    #[serde(default = "LoanParameters::default_rate_basis")]
    pub rate_basis: RateBasis,

    /// Capitalization frequency for nominal rates (periods per year)
    #[serde(default = "default_capitalization")]
    pub capitalization: u32,

    /// Term as entered by the caller, interpreted per `term_unit`
    pub term_value: f64,

    /// Unit of `term_value`
    #[serde(default = "LoanParameters::default_term_unit")]
    pub term_unit: TermUnit,

    /// Grace period regime
    #[serde(default = "LoanParameters::default_grace_regime")]
    pub grace_regime: GraceRegime,

    /// Grace period length in months
    #[serde(default)]
    pub grace_months: u32,

    /// Housing subsidy (bono) subtracted from the principal before financing
    #[serde(default)]
    pub subsidy: f64,
}

impl LoanParameters {
    fn default_currency() -> Currency {
        Currency::Pen
    }

    fn default_rate_basis() -> RateBasis {
        RateBasis::Effective
    }

    fn default_term_unit() -> TermUnit {
        TermUnit::Years
    }

    fn default_grace_regime() -> GraceRegime {
        GraceRegime::None
    }

    /// Create parameters for a plain loan without grace or subsidy
    pub fn new(principal: f64, annual_rate: f64, term_value: f64, term_unit: TermUnit) -> Self {
        Self {
            principal,
            currency: Currency::Pen,
            annual_rate,
            rate_basis: RateBasis::Effective,
            capitalization: 12,
            term_value,
            term_unit,
            grace_regime: GraceRegime::None,
            grace_months: 0,
            subsidy: 0.0,
        }
    }

    /// Amount actually financed after deducting the subsidy
    pub fn financed_amount(&self) -> f64 {
        self.principal - self.subsidy
    }

    /// Term normalized to whole months
    pub fn term_months(&self) -> u32 {
        let months = match self.term_unit {
            TermUnit::Years => self.term_value * 12.0,
            TermUnit::Months => self.term_value,
        };
        months.round().max(0.0) as u32
    }

    /// Term expressed in whole years, as persisted by the history record
    pub fn term_years(&self) -> u32 {
        let years = match self.term_unit {
            TermUnit::Years => self.term_value,
            TermUnit::Months => self.term_value / 12.0,
        };
        years.round().max(0.0) as u32
    }

    /// Check every structural invariant before any computation happens
    ///
    /// Rate validity is checked separately by the rate converter, which also
    /// owns the capitalization whitelist.
    pub fn validate(&self) -> EngineResult<()> {
        let financed = self.financed_amount();
        if self.subsidy < 0.0 || financed <= 0.0 || !financed.is_finite() {
            return Err(EngineError::InvalidFinancing {
                principal: self.principal,
                subsidy: self.subsidy,
            });
        }

        let term_months = self.term_months();
        if term_months == 0 {
            return Err(EngineError::InvalidTerm(format!(
                "term of {} {:?} normalizes to zero months",
                self.term_value, self.term_unit
            )));
        }

        if self.grace_regime != GraceRegime::None && self.grace_months >= term_months {
            return Err(EngineError::InvalidGrace {
                grace_months: self.grace_months,
                term_months,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_term_normalization() {
        let in_years = LoanParameters::new(100_000.0, 8.5, 20.0, TermUnit::Years);
        assert_eq!(in_years.term_months(), 240);
        assert_eq!(in_years.term_years(), 20);

        let in_months = LoanParameters::new(100_000.0, 8.5, 18.0, TermUnit::Months);
        assert_eq!(in_months.term_months(), 18);
        assert_eq!(in_months.term_years(), 2); // 1.5 years rounds up
    }

    #[test]
    fn test_financed_amount_subtracts_subsidy() {
        let mut params = LoanParameters::new(150_000.0, 8.5, 20.0, TermUnit::Years);
        params.subsidy = 25_000.0;
        assert!((params.financed_amount() - 125_000.0).abs() < 1e-9);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_subsidy_consuming_principal_is_rejected() {
        let mut params = LoanParameters::new(50_000.0, 8.5, 20.0, TermUnit::Years);
        params.subsidy = 50_000.0;
        assert!(matches!(
            params.validate(),
            Err(EngineError::InvalidFinancing { .. })
        ));

        params.subsidy = 60_000.0;
        assert!(matches!(
            params.validate(),
            Err(EngineError::InvalidFinancing { .. })
        ));
    }

    #[test]
    fn test_zero_term_is_rejected() {
        let params = LoanParameters::new(100_000.0, 8.5, 0.02, TermUnit::Months);
        assert!(matches!(
            params.validate(),
            Err(EngineError::InvalidTerm(_))
        ));
    }

    #[test]
    fn test_grace_must_be_shorter_than_term() {
        let mut params = LoanParameters::new(100_000.0, 8.5, 12.0, TermUnit::Months);
        params.grace_regime = GraceRegime::Partial;
        params.grace_months = 12;
        assert!(matches!(
            params.validate(),
            Err(EngineError::InvalidGrace {
                grace_months: 12,
                term_months: 12,
            })
        ));

        // Same length is fine when no grace regime is selected
        params.grace_regime = GraceRegime::None;
        assert!(params.validate().is_ok());
    }
}
