//! Public delivery endpoints.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use std::time::Instant;

use crate::http::request::{ChargeRequest, CheckRequest};
use crate::http::response::{ApiError, ChargeResponse, CheckResponse};
use crate::http::server::AppState;
use crate::observability::metrics::{self, Outcome};
use crate::zones::{check_serviceability, evaluate_delivery, ZoneStore};

const CHARGE: &str = "charge";
const CHECK: &str = "check";

/// `POST /api/delivery/charge`
pub async fn delivery_charge(
    State(state): State<AppState>,
    payload: Result<Json<ChargeRequest>, JsonRejection>,
) -> Result<Json<ChargeResponse>, ApiError> {
    let start = Instant::now();
    let Json(request) = payload.inspect_err(|_| state.record(CHARGE, Outcome::Rejected, start))?;
    let postal_code = request.postal_code.trim();

    let zones = state.zones.list_active_zones();
    let quote = evaluate_delivery(&zones, postal_code, request.cart_total)
        .inspect_err(|e| {
            tracing::debug!(error = %e, "Delivery charge request rejected");
            state.record(CHARGE, Outcome::Rejected, start);
        })?;

    let outcome = if quote.is_serviceable() {
        Outcome::Serviceable
    } else {
        Outcome::NotServiceable
    };
    tracing::debug!(
        postal_code = %postal_code,
        cart_total = ?request.cart_total,
        outcome = outcome.as_str(),
        "Delivery charge evaluated"
    );
    state.record(CHARGE, outcome, start);

    Ok(Json(quote.into()))
}

/// `POST /api/delivery/check`
pub async fn delivery_check(
    State(state): State<AppState>,
    payload: Result<Json<CheckRequest>, JsonRejection>,
) -> Result<Json<CheckResponse>, ApiError> {
    let start = Instant::now();
    let Json(request) = payload.inspect_err(|_| state.record(CHECK, Outcome::Rejected, start))?;
    let postal_code = request.postal_code.trim();

    let zones = state.zones.list_active_zones();
    let zone = check_serviceability(&zones, postal_code).inspect_err(|e| {
        tracing::debug!(error = %e, "Serviceability check rejected");
        state.record(CHECK, Outcome::Rejected, start);
    })?;

    let outcome = if zone.is_some() {
        Outcome::Serviceable
    } else {
        Outcome::NotServiceable
    };
    tracing::debug!(
        postal_code = %postal_code,
        zone = zone.map(|z| z.id.as_str()),
        "Serviceability checked"
    );
    state.record(CHECK, outcome, start);

    Ok(Json(CheckResponse::from(zone)))
}

impl AppState {
    fn record(&self, endpoint: &'static str, outcome: Outcome, start: Instant) {
        self.stats.record(outcome);
        metrics::record_request(endpoint, outcome, start);
    }
}
