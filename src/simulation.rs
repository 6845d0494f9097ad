//! Top-level simulation entry point
//!
//! Wires the rate converter, schedule builder and appraisal together into
//! the single function-call contract the surrounding application consumes.
//! Every call is a pure function over its inputs; nothing is cached or
//! shared between calls.

use serde::{Deserialize, Serialize};

use crate::appraisal::{self, AppraisalResult};
use crate::error::EngineResult;
use crate::loan::LoanParameters;
use crate::rates;
use crate::schedule::{Schedule, ScheduleBuilder};

/// Complete output of one simulation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Amount actually financed (principal minus subsidy)
    pub financed_amount: f64,

    /// Effective monthly rate driving the recurrence (decimal)
    pub monthly_rate: f64,

    /// Steady installment over the amortizing periods
    pub monthly_payment: f64,

    /// Full amortization schedule
    pub schedule: Schedule,

    /// NPV / IRR metrics for the schedule's cash-flow stream
    pub appraisal: AppraisalResult,
}

/// Simulation engine configured with an optional appraisal discount rate
#[derive(Debug, Clone, Default)]
pub struct Simulator {
    /// Annual discount rate in percent used for NPV; when absent only the
    /// IRR is computed
    discount_rate_pct: Option<f64>,
}

impl Simulator {
    /// Create a simulator that appraises at the given annual discount rate
    pub fn new(discount_rate_pct: Option<f64>) -> Self {
        Self { discount_rate_pct }
    }

    /// Run the full pipeline for one set of loan parameters
    ///
    /// Structural validation happens up front; an error means no schedule
    /// row was ever produced.
    pub fn simulate(&self, params: &LoanParameters) -> EngineResult<SimulationResult> {
        params.validate()?;

        let financed = params.financed_amount();
        let monthly_rate =
            rates::monthly_rate(params.annual_rate, params.rate_basis, params.capitalization)?;

        log::debug!(
            "simulating {:.2} {} over {} months at monthly rate {:.6} ({:?} grace of {})",
            financed,
            params.currency.symbol(),
            params.term_months(),
            monthly_rate,
            params.grace_regime,
            params.grace_months,
        );

        let schedule = ScheduleBuilder::new(financed, monthly_rate, params.term_months())
            .with_grace(params.grace_regime, params.grace_months)
            .build()?;

        let cashflows = appraisal::project_cashflows(financed, &schedule);

        let npv = match self.discount_rate_pct {
            Some(rate) => Some(appraisal::npv(&cashflows, rate)?),
            None => None,
        };
        let irr = appraisal::solve_irr(&cashflows);

        if irr.is_none() {
            log::debug!("no sign change in cash-flow vector, IRR reported as absent");
        }

        Ok(SimulationResult {
            financed_amount: financed,
            monthly_rate,
            monthly_payment: schedule.steady_payment,
            schedule,
            appraisal: AppraisalResult { npv, irr },
        })
    }
}

/// One-shot convenience wrapper around [`Simulator`]
pub fn simulate(
    params: &LoanParameters,
    discount_rate_pct: Option<f64>,
) -> EngineResult<SimulationResult> {
    Simulator::new(discount_rate_pct).simulate(params)
}
