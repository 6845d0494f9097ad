//! Amortization schedule construction

mod builder;
mod payment;
mod rows;

pub use builder::ScheduleBuilder;
pub use payment::fixed_payment;
pub use rows::{AmortizationRow, Schedule, ScheduleSummary};
