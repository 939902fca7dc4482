//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Validate → Logging → Metrics → Watcher → Listener
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Stop accepting → Drain requests → Exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Fail fast: an invalid config at startup is fatal
//! - Config changes arrive through the file watcher, not SIGHUP

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
