//! Scenario runner for comparing loan offers
//!
//! Holds a configured simulator so many parameter sets (different banks,
//! rates, grace spans) can be appraised against the same discount rate.
//! Simulations are independent pure calls, so batches parallelize freely.

use rayon::prelude::*;

use crate::error::EngineResult;
use crate::loan::LoanParameters;
use crate::simulation::{SimulationResult, Simulator};

/// Pre-configured runner for batch simulations
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new(Some(6.0));
/// for rate in [7.5, 8.5, 9.5] {
///     let mut offer = base.clone();
///     offer.annual_rate = rate;
///     let result = runner.run(&offer)?;
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    simulator: Simulator,
}

impl ScenarioRunner {
    /// Create a runner appraising at the given annual discount rate
    pub fn new(discount_rate_pct: Option<f64>) -> Self {
        Self {
            simulator: Simulator::new(discount_rate_pct),
        }
    }

    /// Run a single simulation
    pub fn run(&self, params: &LoanParameters) -> EngineResult<SimulationResult> {
        self.simulator.simulate(params)
    }

    /// Run many independent simulations in parallel
    ///
    /// Each loan keeps its own result slot; one invalid offer does not
    /// abort the rest of the batch.
    pub fn run_batch(&self, loans: &[LoanParameters]) -> Vec<EngineResult<SimulationResult>> {
        loans
            .par_iter()
            .map(|params| self.simulator.simulate(params))
            .collect()
    }

    /// Sweep a base offer across alternative annual rates
    pub fn run_rate_sweep(
        &self,
        base: &LoanParameters,
        annual_rates: &[f64],
    ) -> Vec<EngineResult<SimulationResult>> {
        annual_rates
            .par_iter()
            .map(|&rate| {
                let mut params = base.clone();
                params.annual_rate = rate;
                self.simulator.simulate(&params)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loan::TermUnit;

    fn base_loan() -> LoanParameters {
        LoanParameters::new(150_000.0, 8.5, 20.0, TermUnit::Years)
    }

    #[test]
    fn test_rate_sweep_orders_payments() {
        let runner = ScenarioRunner::new(None);
        let results = runner.run_rate_sweep(&base_loan(), &[7.5, 8.5, 9.5]);
        assert_eq!(results.len(), 3);

        let payments: Vec<f64> = results
            .iter()
            .map(|r| r.as_ref().unwrap().monthly_payment)
            .collect();
        assert!(payments[0] < payments[1]);
        assert!(payments[1] < payments[2]);
    }

    #[test]
    fn test_batch_keeps_per_loan_failures() {
        let mut bad = base_loan();
        bad.subsidy = 200_000.0;

        let runner = ScenarioRunner::new(Some(6.0));
        let results = runner.run_batch(&[base_loan(), bad]);

        assert!(results[0].is_ok());
        assert!(results[1].is_err());
    }

    #[test]
    fn test_batch_matches_sequential() {
        let runner = ScenarioRunner::new(Some(6.0));
        let loans = vec![base_loan(); 4];

        let batch = runner.run_batch(&loans);
        let single = runner.run(&loans[0]).unwrap();

        for result in batch {
            let result = result.unwrap();
            assert_eq!(
                result.monthly_payment.to_bits(),
                single.monthly_payment.to_bits()
            );
        }
    }
}
