//! Read-only admin API.
//!
//! # Responsibilities
//! - Report service status and request counters
//! - List the loaded zones, inactive ones included
//! - Explain how a postal code resolves
//!
//! # Design Decisions
//! - Every route sits behind the bearer-key middleware
//! - Zones are edited in the config file; there are no write routes

pub mod auth;
pub mod handlers;

use axum::{middleware, routing::get, Router};

use self::auth::admin_auth_middleware;
use self::handlers::*;
use crate::http::server::AppState;

pub fn setup_admin_router(state: AppState) -> Router {
    Router::new()
        .route("/admin/status", get(get_status))
        .route("/admin/zones", get(get_zones))
        .route("/admin/resolve/{postal_code}", get(explain_resolution))
        .route("/admin/stats", get(get_stats))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            admin_auth_middleware,
        ))
        .with_state(state)
}
