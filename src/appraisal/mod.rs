//! Investment appraisal over the schedule's cash-flow stream

mod cashflow;
mod irr;
mod npv;

pub use cashflow::project_cashflows;
pub use irr::{solve_irr, IrrEstimate};
pub use npv::npv;

use serde::{Deserialize, Serialize};

/// Appraisal metrics derived from one simulation's cash flows
///
/// A missing IRR means the cash-flow vector had no sign change inside the
/// search bracket; it is a defined absent state, not a failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppraisalResult {
    /// Net present value at the caller's discount rate, if one was given
    pub npv: Option<f64>,

    /// Annualized internal rate of return, if the solver found a bracket
    pub irr: Option<IrrEstimate>,
}
