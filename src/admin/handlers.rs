use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::http::server::{AppState, StatsSnapshot};
use crate::zones::{candidates, resolve_match, Zone};

#[derive(Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub status: &'static str,
    pub zones_total: usize,
    pub zones_active: usize,
    pub generation: u64,
    pub uptime_secs: u64,
}

#[derive(Debug, Serialize)]
pub struct CandidateZone {
    pub id: String,
    pub priority: i32,
}

#[derive(Debug, Serialize)]
pub struct MatchedZone {
    pub id: String,
    pub name: String,
    pub priority: i32,
    pub pattern: String,
}

/// How one postal code resolves against the current catalog.
#[derive(Debug, Serialize)]
pub struct ResolutionExplanation {
    pub postal_code: String,
    pub generation: u64,
    pub evaluation_order: Vec<CandidateZone>,
    pub matched: Option<MatchedZone>,
}

pub async fn get_status(State(state): State<AppState>) -> Json<SystemStatus> {
    let catalog = state.zones.snapshot();

    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
        zones_total: catalog.all().len(),
        zones_active: catalog.active().len(),
        generation: catalog.generation(),
        uptime_secs: state.started_at.elapsed().as_secs(),
    })
}

/// All configured zones, active first, each group in evaluation order.
pub async fn get_zones(State(state): State<AppState>) -> Json<Vec<Zone>> {
    let catalog = state.zones.snapshot();
    let mut zones = catalog.all().to_vec();
    zones.sort_by_key(|z| (!z.is_active, z.priority));
    Json(zones)
}

pub async fn explain_resolution(
    State(state): State<AppState>,
    Path(postal_code): Path<String>,
) -> Json<ResolutionExplanation> {
    let catalog = state.zones.snapshot();
    let zones = catalog.all();

    let evaluation_order = candidates(zones)
        .into_iter()
        .map(|z| CandidateZone {
            id: z.id.clone(),
            priority: z.priority,
        })
        .collect();

    let matched = resolve_match(zones, &postal_code).map(|m| MatchedZone {
        id: m.zone.id.clone(),
        name: m.zone.name.clone(),
        priority: m.zone.priority,
        pattern: m.pattern.to_string(),
    });

    Json(ResolutionExplanation {
        postal_code,
        generation: catalog.generation(),
        evaluation_order,
        matched,
    })
}

pub async fn get_stats(State(state): State<AppState>) -> Json<StatsSnapshot> {
    Json(state.stats.snapshot())
}
