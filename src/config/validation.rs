//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (charges non-negative, windows ordered)
//! - Check zone identity (ids present and unique)
//! - Flag patterns that can never match, without rejecting them
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServiceConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::fmt;
use std::net::SocketAddr;

use crate::config::schema::{ServiceConfig, PLACEHOLDER_API_KEY};
use crate::zones::Zone;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    InvalidAddress { field: &'static str, value: String },
    ZeroValue { field: &'static str },
    PlaceholderApiKey,
    EmptyZoneId { index: usize },
    DuplicateZoneId { id: String },
    EmptyZoneName { id: String },
    InvalidAmount { id: String, field: &'static str, value: f64 },
    InvertedEstimate { id: String, min: u32, max: u32 },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidAddress { field, value } => {
                write!(f, "{field}: '{value}' is not a socket address")
            }
            Self::ZeroValue { field } => write!(f, "{field} must be greater than zero"),
            Self::PlaceholderApiKey => {
                write!(f, "admin.api_key must be changed when the admin API is enabled")
            }
            Self::EmptyZoneId { index } => write!(f, "zones[{index}] has an empty id"),
            Self::DuplicateZoneId { id } => write!(f, "zone id '{id}' is used more than once"),
            Self::EmptyZoneName { id } => write!(f, "zone '{id}' has an empty name"),
            Self::InvalidAmount { id, field, value } => {
                write!(f, "zone '{id}': {field} must be a non-negative number, got {value}")
            }
            Self::InvertedEstimate { id, min, max } => {
                write!(f, "zone '{id}': estimated_days.min ({min}) exceeds max ({max})")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate a parsed configuration.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_address(&mut errors, "listener.bind_address", &config.listener.bind_address);
    if config.observability.metrics_enabled {
        check_address(
            &mut errors,
            "observability.metrics_address",
            &config.observability.metrics_address,
        );
    }
    if config.listener.max_connections == 0 {
        errors.push(ValidationError::ZeroValue {
            field: "listener.max_connections",
        });
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroValue {
            field: "timeouts.request_secs",
        });
    }
    if config.security.max_body_size == 0 {
        errors.push(ValidationError::ZeroValue {
            field: "security.max_body_size",
        });
    }
    if config.admin.enabled && config.admin.api_key == PLACEHOLDER_API_KEY {
        errors.push(ValidationError::PlaceholderApiKey);
    }

    validate_zones(&mut errors, &config.zones);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_address(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field,
            value: value.to_string(),
        });
    }
}

fn validate_zones(errors: &mut Vec<ValidationError>, zones: &[Zone]) {
    let mut seen = HashSet::new();

    for (index, zone) in zones.iter().enumerate() {
        if zone.id.trim().is_empty() {
            errors.push(ValidationError::EmptyZoneId { index });
        } else if !seen.insert(zone.id.as_str()) {
            errors.push(ValidationError::DuplicateZoneId {
                id: zone.id.clone(),
            });
        }

        if zone.name.trim().is_empty() {
            errors.push(ValidationError::EmptyZoneName {
                id: zone.id.clone(),
            });
        }

        if !is_amount(zone.delivery_charge) {
            errors.push(ValidationError::InvalidAmount {
                id: zone.id.clone(),
                field: "delivery_charge",
                value: zone.delivery_charge,
            });
        }
        if let Some(threshold) = zone.free_delivery_threshold {
            if !is_amount(threshold) {
                errors.push(ValidationError::InvalidAmount {
                    id: zone.id.clone(),
                    field: "free_delivery_threshold",
                    value: threshold,
                });
            }
        }

        if zone.estimated_days.min > zone.estimated_days.max {
            errors.push(ValidationError::InvertedEstimate {
                id: zone.id.clone(),
                min: zone.estimated_days.min,
                max: zone.estimated_days.max,
            });
        }
    }
}

fn is_amount(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

/// Patterns that are accepted but can never match as written.
///
/// Returned as `(zone id, pattern)` pairs for the loader to report.
pub fn dead_patterns(config: &ServiceConfig) -> Vec<(String, String)> {
    config
        .zones
        .iter()
        .flat_map(|zone| {
            zone.pincode_patterns
                .iter()
                .filter(|p| p.is_dead_range())
                .map(|p| (zone.id.clone(), p.as_str().to_string()))
        })
        .collect()
}
