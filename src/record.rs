//! Flattened record shapes exchanged with the persistence collaborator
//!
//! The engine never performs I/O itself: [`SimulationRecord`] is the value
//! bundle handed to whatever stores simulations, and [`SavedSimulation`] is
//! the tolerant shape used to read records back. The retrieval side has
//! gone through several backends with both English and Spanish column
//! names, so every historical alias is accepted on deserialization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::loan::{Currency, GraceRegime, LoanParameters};
use crate::rates::RateBasis;
use crate::simulation::SimulationResult;

/// Product label persisted with every simulation
pub const DEFAULT_PRODUCT_TYPE: &str = "Crédito Mivivienda";

/// Outbound record: one simulation flattened for persistence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationRecord {
    /// Identifier of the acting user, supplied by the session collaborator
    pub user_id: Option<u32>,

    pub amount: f64,
    pub currency: Currency,
    pub annual_rate: f64,
    pub rate_basis: RateBasis,
    pub capitalization: u32,

    /// Term persisted in whole years
    pub term_years: u32,

    pub monthly_payment: f64,
    pub grace_regime: GraceRegime,
    pub grace_months: u32,
    pub subsidy: f64,

    pub bank_name: Option<String>,
    pub product_type: String,
    pub notes: String,

    pub npv: Option<f64>,
    /// Annualized IRR in percent; absent when the solver found no bracket
    pub irr: Option<f64>,

    pub created_at: DateTime<Utc>,
}

impl SimulationRecord {
    /// Flatten a simulation into the shape the persistence collaborator accepts
    pub fn from_result(
        params: &LoanParameters,
        result: &SimulationResult,
        user_id: Option<u32>,
    ) -> Self {
        Self {
            user_id,
            amount: params.principal,
            currency: params.currency,
            annual_rate: params.annual_rate,
            rate_basis: params.rate_basis,
            capitalization: params.capitalization,
            term_years: params.term_years(),
            monthly_payment: result.monthly_payment,
            grace_regime: params.grace_regime,
            grace_months: params.grace_months,
            subsidy: params.subsidy,
            bank_name: None,
            product_type: DEFAULT_PRODUCT_TYPE.to_string(),
            notes: String::new(),
            npv: result.appraisal.npv,
            irr: result.appraisal.irr.map(|irr| irr.annual_pct),
            created_at: Utc::now(),
        }
    }

    /// Attach the bank label shown in the history table
    pub fn with_bank(mut self, bank_name: impl Into<String>) -> Self {
        self.bank_name = Some(bank_name.into());
        self
    }

    /// Attach a free-text note
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }
}

/// Inbound record: a previously persisted simulation in whatever naming
/// convention the backend of the day used
///
/// Optional everywhere: older rows predate several of these columns.
#[derive(Debug, Clone, Deserialize)]
pub struct SavedSimulation {
    pub id: u64,

    #[serde(alias = "monto")]
    pub amount: f64,

    #[serde(alias = "tasa_anual")]
    pub annual_rate: f64,

    #[serde(alias = "años_plazo", alias = "plazo_años")]
    pub term_years: u32,

    #[serde(alias = "pago_mensual")]
    pub monthly_payment: f64,

    #[serde(default, alias = "moneda")]
    pub currency: Option<String>,

    #[serde(default, alias = "tipo_tasa")]
    pub rate_type: Option<String>,

    #[serde(default, alias = "capitalizacion")]
    pub capitalization: Option<u32>,

    #[serde(default, alias = "tipo_gracia")]
    pub grace_type: Option<String>,

    #[serde(default, alias = "meses_gracia")]
    pub grace_months: Option<u32>,

    #[serde(default, alias = "monto_bono", rename = "bono_amount")]
    pub subsidy: Option<f64>,

    #[serde(default, alias = "entidad", alias = "entity_name")]
    pub bank_name: Option<String>,

    #[serde(default, alias = "tipo_de_producto")]
    pub product_type: Option<String>,

    #[serde(default, alias = "notas")]
    pub notes: Option<String>,

    #[serde(default, alias = "van")]
    pub npv: Option<f64>,

    #[serde(default, alias = "tir")]
    pub irr: Option<f64>,

    /// Kept as text: historical backends disagree on the timestamp format
    #[serde(default, alias = "creado_en")]
    pub created_at: Option<String>,
}

/// Envelope returned by the retrieval collaborator's list endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct SimulationListResponse {
    pub ok: bool,

    #[serde(default, alias = "simulaciones")]
    pub simulations: Vec<SavedSimulation>,

    #[serde(default)]
    pub error: Option<String>,
}
