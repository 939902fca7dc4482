//! Delivery-zone resolution engine.
//!
//! # Data Flow
//! ```text
//! (postal code, cart total)
//!     → store.rs (snapshot of active zones)
//!     → resolver.rs (priority order, first match wins)
//!         → pattern.rs (exact / range / wildcard per pattern)
//!     → charge.rs (charge, free-delivery flag, estimate)
//!     → evaluate.rs: Serviceable or NotServiceable
//! ```
//!
//! # Design Decisions
//! - Every function here is pure and synchronous; no logging, no I/O
//! - Patterns are compiled when zones are loaded, never per request
//! - Only `pincode_patterns` decide a match, whatever the zone type

pub mod charge;
pub mod evaluate;
pub mod pattern;
pub mod resolver;
pub mod store;
pub mod types;

pub use charge::{compute_charge, ChargeBreakdown};
pub use evaluate::{
    check_serviceability, evaluate_delivery, DeliveryError, DeliveryQuote, DeliveryResult,
};
pub use pattern::{matches, PatternRule, PincodePattern};
pub use resolver::{candidates, resolve, resolve_match, ZoneMatch};
pub use store::{LiveZoneStore, ZoneCatalog, ZoneStore};
pub use types::{EstimatedDays, Zone, ZoneType, DEFAULT_PRIORITY};
