//! Configuration loading from disk.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::ServiceConfig;
use crate::config::validation::{dead_patterns, validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<ServiceConfig, ConfigError> {
    let config: ServiceConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load and validate configuration from a TOML file.
///
/// Patterns that can never match are accepted; see [`report_dead_patterns`].
pub fn load_config(path: &Path) -> Result<ServiceConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config = parse_config(&content)?;

    tracing::debug!(path = %path.display(), zones = config.zones.len(), "Configuration parsed");
    Ok(config)
}

/// Emit a warning for every range pattern that can never match.
///
/// Called once logging is up, both at startup and after each reload.
/// Returns the number of patterns reported.
pub fn report_dead_patterns(config: &ServiceConfig) -> usize {
    let dead = dead_patterns(config);
    for (zone, pattern) in &dead {
        tracing::warn!(zone = %zone, pattern = %pattern, "Range pattern can never match");
    }
    dead.len()
}
