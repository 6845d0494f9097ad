//! Schedule output structures

use serde::{Deserialize, Serialize};

/// A single period of the amortization schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationRow {
    /// Period index, 1-based and contiguous across the grace boundary
    pub period: u32,

    /// Installment paid this period (0 during total grace, interest-only
    /// during partial grace)
    pub payment: f64,

    /// Interest accrued on the opening balance
    pub interest: f64,

    /// Principal repaid this period (0 during any grace period)
    pub principal: f64,

    /// Remaining balance after the period, never negative
    pub balance: f64,
}

/// Complete amortization schedule for one loan
///
/// Owned by a single computation call and immutable once produced; a
/// recompute replaces the whole schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schedule {
    /// Ordered rows, one per month of the term
    pub rows: Vec<AmortizationRow>,

    /// Fixed installment applied over the amortizing periods (after any
    /// grace span)
    pub steady_payment: f64,
}

impl Schedule {
    /// Number of periods in the schedule
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Balance after the final period
    pub fn final_balance(&self) -> f64 {
        self.rows.last().map(|r| r.balance).unwrap_or(0.0)
    }

    /// Aggregate totals over the whole schedule
    pub fn summary(&self) -> ScheduleSummary {
        let total_paid: f64 = self.rows.iter().map(|r| r.payment).sum();
        let total_interest: f64 = self.rows.iter().map(|r| r.interest).sum();
        let total_principal: f64 = self.rows.iter().map(|r| r.principal).sum();

        ScheduleSummary {
            total_months: self.rows.len() as u32,
            total_paid,
            total_interest,
            total_principal,
        }
    }
}

/// Aggregate totals for a schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub total_months: u32,
    pub total_paid: f64,
    pub total_interest: f64,
    pub total_principal: f64,
}
