//! Loan parameter model and batch loading

mod data;
mod loader;

pub use data::{Currency, GraceRegime, LoanParameters, TermUnit};
pub use loader::{load_loans, load_loans_from_reader};
