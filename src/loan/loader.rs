//! Load batches of loan parameters from CSV

use csv::Reader;
use std::error::Error;
use std::path::Path;

use super::{Currency, GraceRegime, LoanParameters, TermUnit};
use crate::rates::RateBasis;

/// Raw CSV row; string columns are mapped to enums explicitly so that a bad
/// cell names the offending value instead of failing inside serde
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "Principal")]
    principal: f64,
    #[serde(rename = "Currency", default)]
    currency: Option<String>,
    #[serde(rename = "AnnualRate")]
    annual_rate: f64,
    #[serde(rename = "RateBasis", default)]
    rate_basis: Option<String>,
    #[serde(rename = "Capitalization", default)]
    capitalization: Option<u32>,
    #[serde(rename = "TermValue")]
    term_value: f64,
    #[serde(rename = "TermUnit", default)]
    term_unit: Option<String>,
    #[serde(rename = "GraceRegime", default)]
    grace_regime: Option<String>,
    #[serde(rename = "GraceMonths", default)]
    grace_months: Option<u32>,
    #[serde(rename = "Subsidy", default)]
    subsidy: Option<f64>,
}

impl CsvRow {
    fn to_loan(self) -> Result<LoanParameters, Box<dyn Error>> {
        let currency = match self.currency.as_deref() {
            None | Some("PEN") => Currency::Pen,
            Some("USD") => Currency::Usd,
            Some(other) => return Err(format!("Unknown Currency: {}", other).into()),
        };

        let rate_basis = match self.rate_basis.as_deref() {
            None | Some("effective") => RateBasis::Effective,
            Some("nominal") => RateBasis::Nominal,
            Some(other) => return Err(format!("Unknown RateBasis: {}", other).into()),
        };

        let term_unit = match self.term_unit.as_deref() {
            None | Some("years") => TermUnit::Years,
            Some("months") => TermUnit::Months,
            Some(other) => return Err(format!("Unknown TermUnit: {}", other).into()),
        };

        let grace_regime = match self.grace_regime.as_deref() {
            None | Some("none") => GraceRegime::None,
            Some("total") => GraceRegime::Total,
            Some("partial") => GraceRegime::Partial,
            Some(other) => return Err(format!("Unknown GraceRegime: {}", other).into()),
        };

        Ok(LoanParameters {
            principal: self.principal,
            currency,
            annual_rate: self.annual_rate,
            rate_basis,
            capitalization: self.capitalization.unwrap_or(12),
            term_value: self.term_value,
            term_unit,
            grace_regime,
            grace_months: self.grace_months.unwrap_or(0),
            subsidy: self.subsidy.unwrap_or(0.0),
        })
    }
}

/// Load all loan parameter sets from a CSV file
pub fn load_loans<P: AsRef<Path>>(path: P) -> Result<Vec<LoanParameters>, Box<dyn Error>> {
    let mut reader = Reader::from_path(path)?;
    let mut loans = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        loans.push(row.to_loan()?);
    }

    Ok(loans)
}

/// Load loan parameter sets from any reader (e.g., string buffer, network stream)
pub fn load_loans_from_reader<R: std::io::Read>(
    reader: R,
) -> Result<Vec<LoanParameters>, Box<dyn Error>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut loans = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        loans.push(row.to_loan()?);
    }

    Ok(loans)
}
