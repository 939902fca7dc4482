//! Request identification and payloads.
//!
//! # Responsibilities
//! - Generate and propagate `x-request-id` (UUID v4)
//! - Define the JSON bodies accepted by the delivery endpoints
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - A missing `postalCode` deserializes to empty and is rejected by the engine,
//!   so "missing" and "blank" produce the same error

use axum::http::{HeaderName, Request};
use serde::{Deserialize, Serialize};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};

pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Assigns a UUID request ID when the client did not send one.
pub fn set_request_id_layer() -> SetRequestIdLayer<MakeRequestUuid> {
    SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuid)
}

/// Copies the request ID onto the response.
pub fn propagate_request_id_layer() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::new(X_REQUEST_ID)
}

/// Request ID header value, or `"unknown"`.
pub fn request_id<B>(request: &Request<B>) -> &str {
    request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

/// Body of `POST /api/delivery/charge`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeRequest {
    #[serde(default)]
    pub postal_code: String,
    #[serde(default)]
    pub cart_total: Option<f64>,
}

/// Body of `POST /api/delivery/check`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckRequest {
    #[serde(default)]
    pub postal_code: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_default() {
        let request: ChargeRequest = serde_json::from_str("{}").unwrap();
        assert!(request.postal_code.is_empty());
        assert_eq!(request.cart_total, None);

        let request: ChargeRequest =
            serde_json::from_str(r#"{"postalCode":"560001","cartTotal":1200.5}"#).unwrap();
        assert_eq!(request.postal_code, "560001");
        assert_eq!(request.cart_total, Some(1200.5));
    }

    #[test]
    fn test_request_id_fallback() {
        let request = Request::builder().body(()).unwrap();
        assert_eq!(request_id(&request), "unknown");

        let request = Request::builder()
            .header("x-request-id", "abc-123")
            .body(())
            .unwrap();
        assert_eq!(request_id(&request), "abc-123");
    }
}
