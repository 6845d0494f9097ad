//! Signed cash-flow vector from the borrower's perspective

use crate::schedule::Schedule;

/// Project a schedule into the cash-flow vector used for appraisal
///
/// Index 0 is the disbursement received by the borrower; indices 1..=T are
/// the installments paid out. Pure transformation, no failure modes.
pub fn project_cashflows(financed: f64, schedule: &Schedule) -> Vec<f64> {
    let mut cashflows = Vec::with_capacity(schedule.len() + 1);
    cashflows.push(financed);
    cashflows.extend(schedule.rows.iter().map(|row| -row.payment));
    cashflows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::ScheduleBuilder;

    #[test]
    fn test_projection_shape_and_signs() {
        let schedule = ScheduleBuilder::new(10_000.0, 0.01, 12).build().unwrap();
        let cashflows = project_cashflows(10_000.0, &schedule);

        assert_eq!(cashflows.len(), 13);
        assert!((cashflows[0] - 10_000.0).abs() < 1e-9);
        for (t, cf) in cashflows.iter().enumerate().skip(1) {
            assert!(*cf < 0.0, "outflow expected at index {t}");
            assert!((cf + schedule.rows[t - 1].payment).abs() < 1e-12);
        }
    }
}
