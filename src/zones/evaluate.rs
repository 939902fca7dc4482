//! Top-level delivery evaluation.

use thiserror::Error;

use crate::zones::charge::{compute_charge, ChargeBreakdown};
use crate::zones::resolver::resolve;
use crate::zones::types::Zone;

/// Errors surfaced to callers of the evaluation functions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeliveryError {
    /// The request could not be evaluated as given.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for delivery evaluation.
pub type DeliveryResult<T> = Result<T, DeliveryError>;

/// Outcome of a delivery charge query.
#[derive(Debug, Clone, PartialEq)]
pub enum DeliveryQuote {
    Serviceable {
        zone_id: String,
        zone_name: String,
        breakdown: ChargeBreakdown,
    },
    NotServiceable,
}

impl DeliveryQuote {
    pub fn is_serviceable(&self) -> bool {
        matches!(self, Self::Serviceable { .. })
    }
}

fn require_code(code: &str) -> DeliveryResult<()> {
    if code.is_empty() {
        return Err(DeliveryError::InvalidInput("postal code is required".into()));
    }
    Ok(())
}

/// Resolve `code` and price delivery for `cart_total`.
pub fn evaluate_delivery(
    zones: &[Zone],
    code: &str,
    cart_total: Option<f64>,
) -> DeliveryResult<DeliveryQuote> {
    require_code(code)?;

    Ok(match resolve(zones, code) {
        Some(zone) => DeliveryQuote::Serviceable {
            zone_id: zone.id.clone(),
            zone_name: zone.name.clone(),
            breakdown: compute_charge(zone, cart_total),
        },
        None => DeliveryQuote::NotServiceable,
    })
}

/// Resolve `code` without pricing; `None` means not serviceable.
pub fn check_serviceability<'a>(
    zones: &'a [Zone],
    code: &str,
) -> DeliveryResult<Option<&'a Zone>> {
    require_code(code)?;
    Ok(resolve(zones, code))
}
