//! Typed failure modes for the simulation engine
//!
//! Every structural violation is detected before a single schedule row is
//! produced, so a failed computation never returns partial output. A missing
//! IRR is not represented here: it is a normal absent-result state carried
//! by `AppraisalResult`.

use thiserror::Error;

/// Errors raised while validating loan parameters or building a schedule
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("invalid rate: {0}")]
    InvalidRate(String),

    #[error("invalid term: {0}")]
    InvalidTerm(String),

    #[error("invalid grace period: grace of {grace_months} months must be shorter than the {term_months}-month term")]
    InvalidGrace {
        grace_months: u32,
        term_months: u32,
    },

    #[error("invalid financing: principal {principal:.2} minus subsidy {subsidy:.2} leaves nothing to finance")]
    InvalidFinancing { principal: f64, subsidy: f64 },
}

/// Convenience alias used throughout the engine
pub type EngineResult<T> = Result<T, EngineError>;
