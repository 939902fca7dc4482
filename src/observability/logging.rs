//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber once per process
//! - Pick pretty or JSON output from config
//!
//! # Design Decisions
//! - `RUST_LOG` wins over `observability.log_level` when set
//! - The configured level applies to this crate and `tower_http`

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogFormat, ObservabilityConfig};

/// Filter directives derived from the configured level.
pub fn default_directives(level: &str) -> String {
    format!("delivery_zones={level},tower_http={level}")
}

/// Install the global subscriber.
pub fn init_logging(
    config: &ObservabilityConfig,
) -> Result<(), tracing_subscriber::util::TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(&config.log_level)));

    let (pretty, json) = match config.log_format {
        LogFormat::Pretty => (Some(tracing_subscriber::fmt::layer()), None),
        LogFormat::Json => (None, Some(tracing_subscriber::fmt::layer().json())),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(pretty)
        .with(json)
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directives_cover_crate_and_http() {
        let directives = default_directives("debug");
        assert!(directives.contains("delivery_zones=debug"));
        assert!(directives.contains("tower_http=debug"));
        assert!(EnvFilter::try_new(directives).is_ok());
    }
}
