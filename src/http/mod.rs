//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, request ID)
//!     → request.rs (JSON body → ChargeRequest / CheckRequest)
//!     → delivery.rs (trim postal code, snapshot zones, evaluate)
//!     → response.rs (public JSON contract or error body)
//!     → Send to client
//! ```

pub mod delivery;
pub mod request;
pub mod response;
pub mod server;

pub use request::{ChargeRequest, CheckRequest, X_REQUEST_ID};
pub use response::{ApiError, ChargeResponse, CheckResponse, ZoneSummary};
pub use server::{AppState, HttpServer};
