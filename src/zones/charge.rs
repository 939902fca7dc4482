//! Delivery charge computation.

use serde::Serialize;

use crate::zones::types::{EstimatedDays, Zone};

/// Charge owed for one delivery plus the zone details shown alongside it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeBreakdown {
    pub charge: f64,
    pub is_free: bool,
    pub free_delivery_threshold: Option<f64>,
    pub estimated_days: EstimatedDays,
    pub cod_available: bool,
}

/// Compute the delivery charge for `zone` at the given cart total.
///
/// A missing or non-finite total counts as `0`. The threshold comparison is
/// inclusive: a cart exactly at the threshold ships free.
pub fn compute_charge(zone: &Zone, cart_total: Option<f64>) -> ChargeBreakdown {
    let cart_total = cart_total.filter(|t| t.is_finite()).unwrap_or(0.0);

    let is_free = zone
        .free_delivery_threshold
        .is_some_and(|threshold| cart_total >= threshold);

    ChargeBreakdown {
        charge: if is_free { 0.0 } else { zone.delivery_charge },
        is_free,
        free_delivery_threshold: zone.free_delivery_threshold,
        estimated_days: zone.estimated_days,
        cod_available: zone.cod_available,
    }
}
