//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, limits, request ID)
//! - Bind server to listener
//! - Apply validated config reloads while serving
//! - Graceful shutdown on the shared broadcast signal

use arc_swap::ArcSwap;
use axum::{
    body::Body,
    extract::DefaultBodyLimit,
    http::Request,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::admin::setup_admin_router;
use crate::config::ServiceConfig;
use crate::http::delivery::{delivery_charge, delivery_check};
use crate::http::request::{propagate_request_id_layer, request_id, set_request_id_layer};
use crate::observability::metrics::{self, Outcome};
use crate::zones::LiveZoneStore;

/// Request counters reported by the admin API.
#[derive(Debug, Default)]
pub struct RequestStats {
    serviceable: AtomicU64,
    not_serviceable: AtomicU64,
    rejected: AtomicU64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    pub total: u64,
    pub serviceable: u64,
    pub not_serviceable: u64,
    pub rejected: u64,
}

impl RequestStats {
    pub fn record(&self, outcome: Outcome) {
        let counter = match outcome {
            Outcome::Serviceable => &self.serviceable,
            Outcome::NotServiceable => &self.not_serviceable,
            Outcome::Rejected => &self.rejected,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        let serviceable = self.serviceable.load(Ordering::Relaxed);
        let not_serviceable = self.not_serviceable.load(Ordering::Relaxed);
        let rejected = self.rejected.load(Ordering::Relaxed);
        StatsSnapshot {
            total: serviceable + not_serviceable + rejected,
            serviceable,
            not_serviceable,
            rejected,
        }
    }
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub zones: Arc<LiveZoneStore>,
    pub settings: Arc<ArcSwap<ServiceConfig>>,
    pub stats: Arc<RequestStats>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(config: ServiceConfig) -> Self {
        let zones = Arc::new(LiveZoneStore::new(config.zones.clone()));
        metrics::record_active_zones(zones.snapshot().active().len());

        Self {
            zones,
            settings: Arc::new(ArcSwap::from_pointee(config)),
            stats: Arc::new(RequestStats::default()),
            started_at: Instant::now(),
        }
    }

    /// Publish a reloaded config. Returns the new catalog generation.
    ///
    /// Zones and the admin key apply immediately. Everything baked into the
    /// router, the listener or the global subscriber only applies on restart.
    pub fn apply_config(&self, config: ServiceConfig) -> u64 {
        let pending = restart_required(&self.settings.load(), &config);
        if !pending.is_empty() {
            tracing::warn!(settings = ?pending, "Settings changed that only apply after restart");
        }

        let generation = self.zones.replace(config.zones.clone());
        let active = self.zones.snapshot().active().len();
        self.settings.store(Arc::new(config));

        metrics::record_active_zones(active);
        metrics::record_config_reload(true);
        tracing::info!(generation, active_zones = active, "Zone catalog reloaded");
        generation
    }
}

/// Settings that differ between `previous` and `next` but are only read at startup.
pub fn restart_required(previous: &ServiceConfig, next: &ServiceConfig) -> Vec<&'static str> {
    let checks = [
        (
            "listener.bind_address",
            previous.listener.bind_address != next.listener.bind_address,
        ),
        (
            "listener.max_connections",
            previous.listener.max_connections != next.listener.max_connections,
        ),
        (
            "timeouts.request_secs",
            previous.timeouts.request_secs != next.timeouts.request_secs,
        ),
        (
            "security.max_body_size",
            previous.security.max_body_size != next.security.max_body_size,
        ),
        (
            "observability.log_level",
            previous.observability.log_level != next.observability.log_level,
        ),
        (
            "observability.log_format",
            previous.observability.log_format != next.observability.log_format,
        ),
        (
            "observability.metrics_enabled",
            previous.observability.metrics_enabled != next.observability.metrics_enabled,
        ),
        (
            "observability.metrics_address",
            previous.observability.metrics_address != next.observability.metrics_address,
        ),
        ("admin.enabled", previous.admin.enabled != next.admin.enabled),
    ];

    checks
        .into_iter()
        .filter_map(|(name, changed)| changed.then_some(name))
        .collect()
}

#[derive(Serialize)]
struct Health {
    status: &'static str,
}

async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// HTTP server for the delivery-zone service.
pub struct HttpServer {
    router: Router,
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServiceConfig) -> Self {
        let state = AppState::new(config.clone());
        let router = Self::build_router(&config, state.clone());

        tracing::info!(
            zones = config.zones.len(),
            admin_enabled = config.admin.enabled,
            "HTTP server configured"
        );

        Self { router, state }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        let mut router = Router::new()
            .route("/health", get(health))
            .route("/api/delivery/charge", post(delivery_charge))
            .route("/api/delivery/check", post(delivery_check))
            .with_state(state.clone());

        if config.admin.enabled {
            router = router.merge(setup_admin_router(state));
        }

        router
            .layer(DefaultBodyLimit::max(config.security.max_body_size))
            .layer(GlobalConcurrencyLimitLayer::new(config.listener.max_connections))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(propagate_request_id_layer())
            .layer(
                TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                    tracing::info_span!(
                        "request",
                        method = %request.method(),
                        path = %request.uri().path(),
                        request_id = %request_id(request),
                    )
                }),
            )
            .layer(set_request_id_layer())
    }

    /// Shared state, for inspection and for applying config out of band.
    pub fn state(&self) -> AppState {
        self.state.clone()
    }

    /// Run the server until `shutdown` fires, applying config updates as they arrive.
    pub async fn run(
        self,
        listener: TcpListener,
        mut config_updates: mpsc::UnboundedReceiver<ServiceConfig>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let state = self.state.clone();
        let mut reload_shutdown = shutdown.resubscribe();
        let reloader = tokio::spawn(async move {
            loop {
                tokio::select! {
                    update = config_updates.recv() => match update {
                        Some(config) => {
                            state.apply_config(config);
                        }
                        None => break,
                    },
                    _ = reload_shutdown.recv() => break,
                }
            }
        });

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        reloader.abort();
        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
