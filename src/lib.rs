//! Credit Simulator - deterministic loan amortization and appraisal engine
//!
//! This library provides:
//! - Rate-basis normalization (effective and nominal annual quotes)
//! - French-method amortization schedules with total/partial grace periods
//! - Subsidy (bono) handling against the financed principal
//! - NPV and IRR appraisal of the resulting cash-flow stream
//! - Batch scenario runs for comparing loan offers

pub mod appraisal;
pub mod error;
pub mod loan;
pub mod rates;
pub mod record;
pub mod schedule;
pub mod scenario;
pub mod simulation;

// Re-export commonly used types
pub use appraisal::{AppraisalResult, IrrEstimate};
pub use error::{EngineError, EngineResult};
pub use loan::{Currency, GraceRegime, LoanParameters, TermUnit};
pub use rates::RateBasis;
pub use record::{SavedSimulation, SimulationRecord};
pub use scenario::ScenarioRunner;
pub use schedule::{AmortizationRow, Schedule, ScheduleBuilder};
pub use simulation::{simulate, SimulationResult, Simulator};
