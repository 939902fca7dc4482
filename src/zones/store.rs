//! Zone snapshots shared with request handlers.
//!
//! # Responsibilities
//! - Hold one validated set of zones as an immutable catalog
//! - Publish replacement catalogs atomically on reload
//!
//! # Design Decisions
//! - Readers never lock: `ArcSwap` hands out the current `Arc<ZoneCatalog>`
//! - The active subset is computed once per catalog, not per request
//! - Ordering of the supplied zones is preserved; resolution sorts

use arc_swap::ArcSwap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::SystemTime;

use crate::zones::types::Zone;

/// Source of zone snapshots for resolution.
pub trait ZoneStore: Send + Sync {
    /// Active zones, in arbitrary order.
    fn list_active_zones(&self) -> Arc<[Zone]>;
}

/// An immutable set of zones.
#[derive(Debug)]
pub struct ZoneCatalog {
    zones: Vec<Zone>,
    active: Arc<[Zone]>,
    generation: u64,
    loaded_at: SystemTime,
}

impl ZoneCatalog {
    pub fn new(zones: Vec<Zone>) -> Self {
        Self::with_generation(zones, 0)
    }

    fn with_generation(zones: Vec<Zone>, generation: u64) -> Self {
        let active: Arc<[Zone]> = zones.iter().filter(|z| z.is_active).cloned().collect();
        Self {
            zones,
            active,
            generation,
            loaded_at: SystemTime::now(),
        }
    }

    /// Every configured zone, active or not.
    pub fn all(&self) -> &[Zone] {
        &self.zones
    }

    pub fn active(&self) -> &[Zone] {
        &self.active
    }

    pub fn get(&self, id: &str) -> Option<&Zone> {
        self.zones.iter().find(|z| z.id == id)
    }

    /// Number of catalog swaps before this one was published.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn loaded_at(&self) -> SystemTime {
        self.loaded_at
    }
}

impl ZoneStore for ZoneCatalog {
    fn list_active_zones(&self) -> Arc<[Zone]> {
        self.active.clone()
    }
}

/// The current catalog, replaceable while requests are in flight.
#[derive(Debug)]
pub struct LiveZoneStore {
    current: ArcSwap<ZoneCatalog>,
    generation: AtomicU64,
}

impl LiveZoneStore {
    pub fn new(zones: Vec<Zone>) -> Self {
        Self {
            current: ArcSwap::from_pointee(ZoneCatalog::new(zones)),
            generation: AtomicU64::new(0),
        }
    }

    /// Current catalog; stays valid even if a reload happens meanwhile.
    pub fn snapshot(&self) -> Arc<ZoneCatalog> {
        self.current.load_full()
    }

    /// Publish a new catalog and return its generation.
    pub fn replace(&self, zones: Vec<Zone>) -> u64 {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.current
            .store(Arc::new(ZoneCatalog::with_generation(zones, generation)));
        generation
    }
}

impl ZoneStore for LiveZoneStore {
    fn list_active_zones(&self) -> Arc<[Zone]> {
        self.current.load().list_active_zones()
    }
}
