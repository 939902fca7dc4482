//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize, compile zone patterns)
//!     → validation.rs (semantic checks)
//!     → ServiceConfig (validated, immutable)
//!     → zones published to the LiveZoneStore
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → atomic swap of the zone catalog and settings
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require full reload
//! - All fields except zone identity and charge have defaults
//! - A config that fails validation never replaces a running one

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, parse_config, report_dead_patterns, ConfigError};
pub use schema::{
    AdminConfig, ListenerConfig, LogFormat, ObservabilityConfig, SecurityConfig, ServiceConfig,
    TimeoutConfig,
};
