//! Response payloads and error mapping.
//!
//! # Responsibilities
//! - Shape engine results into the public JSON contract (camelCase)
//! - Map request and engine errors to HTTP status codes
//!
//! # Design Decisions
//! - Not serviceable is a successful response with `available: false`
//! - Errors always carry a JSON body `{"error": "..."}`

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::zones::{DeliveryError, DeliveryQuote, EstimatedDays, Zone};

/// Response of `POST /api/delivery/charge`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeResponse {
    pub available: bool,
    #[serde(flatten)]
    pub details: Option<ChargeDetails>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeDetails {
    pub delivery_charge: f64,
    pub is_free: bool,
    pub free_delivery_threshold: Option<f64>,
    pub estimated_days: EstimatedDays,
    pub cod_available: bool,
    pub zone_name: String,
}

impl From<DeliveryQuote> for ChargeResponse {
    fn from(quote: DeliveryQuote) -> Self {
        match quote {
            DeliveryQuote::Serviceable {
                zone_name,
                breakdown,
                ..
            } => Self {
                available: true,
                details: Some(ChargeDetails {
                    delivery_charge: breakdown.charge,
                    is_free: breakdown.is_free,
                    free_delivery_threshold: breakdown.free_delivery_threshold,
                    estimated_days: breakdown.estimated_days,
                    cod_available: breakdown.cod_available,
                    zone_name,
                }),
            },
            DeliveryQuote::NotServiceable => Self {
                available: false,
                details: None,
            },
        }
    }
}

/// Response of `POST /api/delivery/check`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResponse {
    pub serviceable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone: Option<ZoneSummary>,
}

/// Public view of a zone.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneSummary {
    pub id: String,
    pub name: String,
    pub delivery_charge: f64,
    pub free_delivery_threshold: Option<f64>,
    pub estimated_days: EstimatedDays,
    pub cod_available: bool,
}

impl From<&Zone> for ZoneSummary {
    fn from(zone: &Zone) -> Self {
        Self {
            id: zone.id.clone(),
            name: zone.name.clone(),
            delivery_charge: zone.delivery_charge,
            free_delivery_threshold: zone.free_delivery_threshold,
            estimated_days: zone.estimated_days,
            cod_available: zone.cod_available,
        }
    }
}

impl From<Option<&Zone>> for CheckResponse {
    fn from(zone: Option<&Zone>) -> Self {
        Self {
            serviceable: zone.is_some(),
            zone: zone.map(ZoneSummary::from),
        }
    }
}

/// Errors returned by HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Delivery(#[from] DeliveryError),

    #[error("{0}")]
    Body(#[from] JsonRejection),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Delivery(DeliveryError::InvalidInput(_)) => StatusCode::BAD_REQUEST,
            Self::Body(rejection) => rejection.status(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match &self {
            Self::Delivery(e) => e.to_string(),
            Self::Body(rejection) => rejection.body_text(),
        };
        (self.status(), Json(serde_json::json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zones::compute_charge;
    use serde_json::json;

    #[test]
    fn test_unavailable_has_no_details() {
        let body =
            serde_json::to_value(ChargeResponse::from(DeliveryQuote::NotServiceable)).unwrap();
        assert_eq!(body, json!({ "available": false }));

        let body = serde_json::to_value(CheckResponse::from(None)).unwrap();
        assert_eq!(body, json!({ "serviceable": false }));
    }

    #[test]
    fn test_available_shape() {
        let zone = Zone::new("mum", "Mumbai", 100.0).with_free_delivery_threshold(999.0);
        let quote = DeliveryQuote::Serviceable {
            zone_id: zone.id.clone(),
            zone_name: zone.name.clone(),
            breakdown: compute_charge(&zone, Some(500.0)),
        };

        let body = serde_json::to_value(ChargeResponse::from(quote)).unwrap();
        assert_eq!(
            body,
            json!({
                "available": true,
                "deliveryCharge": 100.0,
                "isFree": false,
                "freeDeliveryThreshold": 999.0,
                "estimatedDays": { "min": 3, "max": 7 },
                "codAvailable": true,
                "zoneName": "Mumbai"
            })
        );
    }

    #[test]
    fn test_invalid_input_is_bad_request() {
        let err = ApiError::from(DeliveryError::InvalidInput("postal code is required".into()));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}
