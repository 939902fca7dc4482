//! Delivery-zone resolution service.

pub mod admin;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod zones;

pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
