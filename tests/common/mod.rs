//! Shared utilities for integration tests.
#![allow(dead_code)]

use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use delivery_zones::config::{parse_config, ServiceConfig};
use delivery_zones::http::AppState;
use delivery_zones::{HttpServer, Shutdown};

pub const ADMIN_KEY: &str = "test-admin-key";

/// Zones resembling a small storefront rollout.
pub const STOREFRONT_ZONES: &str = r#"
[admin]
enabled = true
api_key = "test-admin-key"

[observability]
metrics_enabled = false

[[zones]]
id = "blr-metro"
name = "Bangalore Metro"
zone_type = "city"
cities = ["Bangalore"]
pincode_patterns = ["560*"]
delivery_charge = 150.0
free_delivery_threshold = 5000.0
estimated_days = { min = 1, max = 2 }
priority = 1

[[zones]]
id = "blr-east"
name = "Bangalore East"
pincode_patterns = ["560100-560200"]
delivery_charge = 80.0
priority = 2

[[zones]]
id = "mumbai"
name = "Mumbai"
pincode_patterns = ["400001-400100", "abc-xyz"]
delivery_charge = 100.0
free_delivery_threshold = 999.0
cod_available = false
priority = 5

[[zones]]
id = "retired"
name = "Retired Zone"
pincode_patterns = ["*"]
delivery_charge = 10.0
priority = 0
is_active = false
"#;

pub fn storefront_config() -> ServiceConfig {
    parse_config(STOREFRONT_ZONES).expect("storefront config is valid")
}

/// A running server on an ephemeral port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub state: AppState,
    pub updates: mpsc::UnboundedSender<ServiceConfig>,
    pub shutdown: Shutdown,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

pub async fn start_server(mut config: ServiceConfig) -> TestServer {
    config.listener.bind_address = "127.0.0.1:0".into();
    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = HttpServer::new(config);
    let state = server.state();
    let shutdown = Shutdown::new();
    let (updates, config_updates) = mpsc::unbounded_channel();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, config_updates, server_shutdown).await;
    });

    // Wait for server to start
    tokio::time::sleep(Duration::from_millis(50)).await;

    TestServer {
        addr,
        state,
        updates,
        shutdown,
    }
}
