//! AWS Lambda handler for running loan simulations
//!
//! Accepts one or more loan parameter sets as JSON and returns the steady
//! payment, appraisal metrics and (optionally) the full schedule for each.
//! Supports Lambda Function URLs for direct HTTP access.

use credit_sim::{AmortizationRow, LoanParameters, ScenarioRunner};
use lambda_http::{run, service_fn, Body, Error, Request, Response};
use serde::{Deserialize, Serialize};

/// Input for one invocation
#[derive(Debug, Deserialize)]
struct SimulationRequest {
    /// Loan parameter sets to simulate
    loans: Vec<LoanParameters>,

    /// Annual discount rate in percent for the NPV appraisal
    #[serde(default)]
    discount_rate: Option<f64>,

    /// Whether to include the full schedule per loan (can be large)
    #[serde(default)]
    include_schedule: bool,
}

/// Per-loan outcome; either the simulation values or an error message
#[derive(Debug, Serialize)]
struct LoanResponse {
    ok: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    financed_amount: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    monthly_payment: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    term_months: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    npv: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    irr: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    irr_converged: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    schedule: Option<Vec<AmortizationRow>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct SimulationResponse {
    ok: bool,
    results: Vec<LoanResponse>,
    execution_time_ms: u128,

    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn json_response<T: Serialize>(body: &T) -> Response<Body> {
    Response::builder()
        .status(200)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "POST, OPTIONS")
        .header("Access-Control-Allow-Headers", "Content-Type")
        .body(Body::Text(serde_json::to_string(body).unwrap()))
        .unwrap()
}

fn error_response(status: u16, message: &str) -> Response<Body> {
    let body = SimulationResponse {
        ok: false,
        results: Vec::new(),
        execution_time_ms: 0,
        error: Some(message.to_string()),
    };
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .body(Body::Text(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

/// Lambda handler function
async fn handler(event: Request) -> Result<Response<Body>, Error> {
    let start = std::time::Instant::now();

    // Handle CORS preflight
    if event.method().as_str() == "OPTIONS" {
        return Ok(Response::builder()
            .status(200)
            .header("Access-Control-Allow-Origin", "*")
            .header("Access-Control-Allow-Methods", "POST, OPTIONS")
            .header("Access-Control-Allow-Headers", "Content-Type")
            .body(Body::Empty)
            .unwrap());
    }

    // Parse request body
    let body_str = match event.body() {
        Body::Text(s) => s.clone(),
        Body::Binary(b) => String::from_utf8_lossy(b).to_string(),
        Body::Empty => "{}".to_string(),
    };

    let request: SimulationRequest = match serde_json::from_str(&body_str) {
        Ok(r) => r,
        Err(e) => {
            return Ok(error_response(400, &format!("Invalid JSON: {}", e)));
        }
    };

    if request.loans.is_empty() {
        return Ok(error_response(400, "No loans supplied"));
    }

    let runner = ScenarioRunner::new(request.discount_rate);
    let results: Vec<LoanResponse> = runner
        .run_batch(&request.loans)
        .into_iter()
        .map(|outcome| match outcome {
            Ok(result) => LoanResponse {
                ok: true,
                financed_amount: Some(result.financed_amount),
                monthly_payment: Some(result.monthly_payment),
                term_months: Some(result.schedule.len() as u32),
                npv: result.appraisal.npv,
                irr: result.appraisal.irr.map(|irr| irr.annual_pct),
                irr_converged: result.appraisal.irr.map(|irr| irr.converged),
                schedule: request.include_schedule.then(|| result.schedule.rows),
                error: None,
            },
            Err(e) => LoanResponse {
                ok: false,
                financed_amount: None,
                monthly_payment: None,
                term_months: None,
                npv: None,
                irr: None,
                irr_converged: None,
                schedule: None,
                error: Some(e.to_string()),
            },
        })
        .collect();

    let response = SimulationResponse {
        ok: results.iter().all(|r| r.ok),
        results,
        execution_time_ms: start.elapsed().as_millis(),
        error: None,
    };

    Ok(json_response(&response))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
