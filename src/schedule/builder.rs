//! Period-by-period schedule construction
//!
//! The three grace regimes each own their recurrence rule:
//! - none: one installment computed over the full term
//! - total: nothing is paid during grace, interest capitalizes, then the
//!   installment is recomputed over the remaining periods
//! - partial: interest-only payments during grace with an unchanged balance,
//!   then the installment is recomputed over the remaining periods

use super::payment::fixed_payment;
use super::rows::{AmortizationRow, Schedule};
use crate::error::{EngineError, EngineResult};
use crate::loan::GraceRegime;

/// Relative tolerance for the final-row residue clamp
const BALANCE_RESIDUE_TOLERANCE: f64 = 1e-6;

/// Builds the amortization schedule for a financed balance
#[derive(Debug, Clone)]
pub struct ScheduleBuilder {
    financed: f64,
    monthly_rate: f64,
    term_months: u32,
    grace_regime: GraceRegime,
    grace_months: u32,
}

impl ScheduleBuilder {
    /// Create a builder without a grace period
    pub fn new(financed: f64, monthly_rate: f64, term_months: u32) -> Self {
        Self {
            financed,
            monthly_rate,
            term_months,
            grace_regime: GraceRegime::None,
            grace_months: 0,
        }
    }

    /// Select a grace regime for the initial months
    pub fn with_grace(mut self, regime: GraceRegime, months: u32) -> Self {
        self.grace_regime = regime;
        self.grace_months = months;
        self
    }

    /// Build the full schedule
    ///
    /// All structural checks run before the first row is produced, so an
    /// error never leaves a partial schedule behind.
    pub fn build(self) -> EngineResult<Schedule> {
        if self.financed <= 0.0 || !self.financed.is_finite() {
            return Err(EngineError::InvalidFinancing {
                principal: self.financed,
                subsidy: 0.0,
            });
        }
        if self.term_months == 0 {
            return Err(EngineError::InvalidTerm(
                "term must cover at least one month".to_string(),
            ));
        }
        if self.grace_regime != GraceRegime::None && self.grace_months >= self.term_months {
            return Err(EngineError::InvalidGrace {
                grace_months: self.grace_months,
                term_months: self.term_months,
            });
        }

        // Validation guarantees grace < term; the clamp keeps the invariant
        // local to the recurrence below.
        let grace = match self.grace_regime {
            GraceRegime::None => 0,
            _ => self.grace_months.min(self.term_months - 1),
        };

        let mut rows = Vec::with_capacity(self.term_months as usize);

        let balance_after_grace = match self.grace_regime {
            GraceRegime::None => self.financed,
            GraceRegime::Total => self.push_total_grace(&mut rows, grace),
            GraceRegime::Partial => self.push_partial_grace(&mut rows, grace),
        };

        let remaining = self.term_months - grace;
        let steady_payment = fixed_payment(balance_after_grace, self.monthly_rate, remaining)?;
        self.amortize(&mut rows, balance_after_grace, steady_payment, grace);

        normalize_final_balance(&mut rows, self.financed);

        Ok(Schedule {
            rows,
            steady_payment,
        })
    }

    /// Total grace: no payment, interest capitalizes into the balance
    fn push_total_grace(&self, rows: &mut Vec<AmortizationRow>, grace: u32) -> f64 {
        let mut balance = self.financed;
        for period in 1..=grace {
            let interest = balance * self.monthly_rate;
            balance += interest;
            rows.push(AmortizationRow {
                period,
                payment: 0.0,
                interest,
                principal: 0.0,
                balance,
            });
        }
        balance
    }

    /// Partial grace: interest-only payment, balance unchanged
    fn push_partial_grace(&self, rows: &mut Vec<AmortizationRow>, grace: u32) -> f64 {
        let balance = self.financed;
        for period in 1..=grace {
            let interest = balance * self.monthly_rate;
            rows.push(AmortizationRow {
                period,
                payment: interest,
                interest,
                principal: 0.0,
                balance,
            });
        }
        balance
    }

    /// Standard French amortization for the periods after any grace span
    fn amortize(
        &self,
        rows: &mut Vec<AmortizationRow>,
        opening_balance: f64,
        payment: f64,
        grace: u32,
    ) {
        let mut balance = opening_balance;
        for period in (grace + 1)..=self.term_months {
            let interest = balance * self.monthly_rate;
            let principal = payment - interest;
            balance -= principal;
            rows.push(AmortizationRow {
                period,
                payment,
                interest,
                principal,
                balance,
            });
        }
    }
}

/// Clamp the final row's floating residue to an exact zero
///
/// Deliberately touches only the last row; a sizable residue anywhere else
/// would point at a recurrence bug and must stay visible.
fn normalize_final_balance(rows: &mut [AmortizationRow], financed: f64) {
    if let Some(last) = rows.last_mut() {
        let tolerance = BALANCE_RESIDUE_TOLERANCE * financed.max(1.0);
        if last.balance.abs() < tolerance {
            last.balance = 0.0;
        } else {
            log::warn!(
                "final balance residue {:.6} exceeds tolerance {:.6}",
                last.balance,
                tolerance
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RATE: f64 = 0.085 / 12.0;

    fn assert_row_identity(schedule: &Schedule) {
        for row in &schedule.rows {
            assert!(
                (row.payment - (row.interest + row.principal)).abs() < 1e-9,
                "period {}: payment {} != interest {} + principal {}",
                row.period,
                row.payment,
                row.interest,
                row.principal
            );
        }
    }

    #[test]
    fn test_no_grace_schedule() {
        let schedule = ScheduleBuilder::new(150_000.0, RATE, 240).build().unwrap();

        assert_eq!(schedule.len(), 240);
        assert_eq!(schedule.final_balance(), 0.0);
        assert_row_identity(&schedule);

        // Periods are contiguous and 1-based
        for (i, row) in schedule.rows.iter().enumerate() {
            assert_eq!(row.period, i as u32 + 1);
        }

        // Every installment equals the steady payment
        for row in &schedule.rows {
            assert!((row.payment - schedule.steady_payment).abs() < 1e-9);
        }

        // Principal portions add back up to the financed amount
        let summary = schedule.summary();
        assert!((summary.total_principal - 150_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_total_grace_capitalizes_interest() {
        let rate = 0.10 / 12.0;
        let schedule = ScheduleBuilder::new(100_000.0, rate, 120)
            .with_grace(GraceRegime::Total, 6)
            .build()
            .unwrap();

        assert_eq!(schedule.len(), 120);

        // First 6 rows: no payment, growing balance
        let mut expected_balance = 100_000.0;
        for row in &schedule.rows[..6] {
            assert_eq!(row.payment, 0.0);
            assert_eq!(row.principal, 0.0);
            expected_balance *= 1.0 + rate;
            assert!((row.balance - expected_balance).abs() < 1e-6);
        }

        // Steady payment covers the capitalized balance over 114 periods
        let capitalized = 100_000.0 * (1.0 + rate).powi(6);
        let expected_pmt = fixed_payment(capitalized, rate, 114).unwrap();
        assert!((schedule.steady_payment - expected_pmt).abs() < 1e-9);
        assert!((schedule.rows[6].payment - expected_pmt).abs() < 1e-9);

        assert_eq!(schedule.final_balance(), 0.0);
    }

    #[test]
    fn test_partial_grace_is_interest_only() {
        let schedule = ScheduleBuilder::new(80_000.0, RATE, 60)
            .with_grace(GraceRegime::Partial, 4)
            .build()
            .unwrap();

        let expected_interest = 80_000.0 * RATE;
        for row in &schedule.rows[..4] {
            assert!((row.payment - expected_interest).abs() < 1e-9);
            assert!((row.interest - expected_interest).abs() < 1e-9);
            assert_eq!(row.principal, 0.0);
            assert!((row.balance - 80_000.0).abs() < 1e-9);
        }

        // Post-grace installment amortizes the untouched balance over 56 months
        let expected_pmt = fixed_payment(80_000.0, RATE, 56).unwrap();
        assert!((schedule.steady_payment - expected_pmt).abs() < 1e-9);

        assert_row_identity(&schedule);
        assert_eq!(schedule.final_balance(), 0.0);
    }

    #[test]
    fn test_grace_spanning_term_is_rejected() {
        let err = ScheduleBuilder::new(100_000.0, RATE, 12)
            .with_grace(GraceRegime::Partial, 12)
            .build()
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidGrace { .. }));
    }

    #[test]
    fn test_single_month_term() {
        let schedule = ScheduleBuilder::new(1_000.0, 0.01, 1).build().unwrap();
        assert_eq!(schedule.len(), 1);
        let row = &schedule.rows[0];
        assert!((row.payment - 1_010.0).abs() < 1e-9);
        assert_eq!(row.balance, 0.0);
    }

    #[test]
    fn test_zero_financed_is_rejected() {
        let err = ScheduleBuilder::new(0.0, RATE, 12).build().unwrap_err();
        assert!(matches!(err, EngineError::InvalidFinancing { .. }));
    }
}
