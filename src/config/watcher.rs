//! Configuration file watcher for hot reload.

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc;

use crate::config::loader::{parse_config, report_dead_patterns, ConfigError};
use crate::config::schema::ServiceConfig;
use crate::observability::metrics;

/// A watcher that monitors the configuration file for changes.
pub struct ConfigWatcher {
    path: PathBuf,
    update_tx: mpsc::UnboundedSender<ServiceConfig>,
}

/// What a file change amounts to.
#[derive(Debug)]
enum Reload {
    /// Same content as the last accepted config, or a save caught mid-write.
    Unchanged,
    Accepted(ServiceConfig),
    Rejected(ConfigError),
}

/// Decide what to do with freshly read file content.
///
/// `last_content` only advances on an accepted config, so a rejected edit
/// followed by a revert to the running config is also `Unchanged`.
fn reload(content: String, last_content: &mut Option<String>) -> Reload {
    // An empty read is a save caught between truncate and write.
    if content.trim().is_empty() || last_content.as_deref() == Some(content.as_str()) {
        return Reload::Unchanged;
    }

    match parse_config(&content) {
        Ok(config) => {
            *last_content = Some(content);
            Reload::Accepted(config)
        }
        Err(e) => Reload::Rejected(e),
    }
}

impl ConfigWatcher {
    /// Create a new ConfigWatcher.
    ///
    /// Returns the watcher and a receiver for validated configuration updates.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<ServiceConfig>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (
            Self {
                path: path.to_path_buf(),
                update_tx,
            },
            update_rx,
        )
    }

    /// Start watching the file on notify's background thread.
    ///
    /// The returned watcher must be kept alive for updates to keep flowing.
    /// Editors often emit several events per save; a reload is only sent
    /// when the file content actually changed.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let tx = self.update_tx;
        let path = self.path.clone();
        let mut last_content = fs::read_to_string(&path).ok();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) if event.kind.is_modify() || event.kind.is_create() => {
                    let content = match fs::read_to_string(&path) {
                        Ok(content) => content,
                        Err(e) => {
                            tracing::error!(
                                path = %path.display(),
                                error = %e,
                                "Failed to read config"
                            );
                            return;
                        }
                    };

                    match reload(content, &mut last_content) {
                        Reload::Unchanged => {}
                        Reload::Accepted(new_config) => {
                            tracing::info!(
                                path = %path.display(),
                                "Config file changed, reloading"
                            );
                            report_dead_patterns(&new_config);
                            let _ = tx.send(new_config);
                        }
                        Reload::Rejected(e) => {
                            metrics::record_config_reload(false);
                            tracing::error!(
                                error = %e,
                                "Failed to reload config, keeping current zones"
                            );
                        }
                    }
                }
                Ok(_) => {}
                Err(e) => tracing::error!(error = ?e, "Watch error"),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&self.path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, "Config watcher started");
        Ok(watcher)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zones_toml(charge: f64) -> String {
        format!(
            r#"
            [[zones]]
            id = "pune"
            name = "Pune"
            pincode_patterns = ["411*"]
            delivery_charge = {charge:.1}
            "#
        )
    }

    const INVALID: &str = r#"
        [[zones]]
        id = "pune"
        name = "Pune"
        delivery_charge = -1.0
    "#;

    #[test]
    fn test_reload_accepts_new_content() {
        let mut last = Some(zones_toml(60.0));
        let next = zones_toml(75.0);

        match reload(next.clone(), &mut last) {
            Reload::Accepted(config) => assert_eq!(config.zones[0].delivery_charge, 75.0),
            other => panic!("expected Accepted, got {other:?}"),
        }
        assert_eq!(last, Some(next));
    }

    #[test]
    fn test_reload_skips_identical_and_empty_content() {
        let mut last = Some(zones_toml(60.0));

        assert!(matches!(reload(zones_toml(60.0), &mut last), Reload::Unchanged));
        assert!(matches!(reload(String::new(), &mut last), Reload::Unchanged));
        assert!(matches!(reload("  \n".into(), &mut last), Reload::Unchanged));
    }

    #[test]
    fn test_rejected_reload_keeps_last_accepted_content() {
        let mut last = Some(zones_toml(60.0));

        assert!(matches!(
            reload(INVALID.to_string(), &mut last),
            Reload::Rejected(ConfigError::Validation(_))
        ));
        assert_eq!(last, Some(zones_toml(60.0)));

        // Reverting to the running config sends nothing.
        assert!(matches!(reload(zones_toml(60.0), &mut last), Reload::Unchanged));
    }

    #[tokio::test]
    async fn test_file_edits_reach_the_channel() {
        let path = std::env::temp_dir().join(format!(
            "delivery_zones_watcher_test_{}.toml",
            std::process::id()
        ));
        fs::write(&path, zones_toml(60.0)).unwrap();

        let (watcher, mut updates) = ConfigWatcher::new(&path);
        let _watcher = watcher.run().unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;

        fs::write(&path, zones_toml(75.0)).unwrap();
        let config = tokio::time::timeout(Duration::from_secs(5), updates.recv())
            .await
            .expect("no reload after a valid edit")
            .unwrap();
        assert_eq!(config.zones[0].delivery_charge, 75.0);

        // Same content again: deduplicated.
        fs::write(&path, zones_toml(75.0)).unwrap();
        assert!(
            tokio::time::timeout(Duration::from_millis(500), updates.recv())
                .await
                .is_err()
        );

        // Invalid content: rejected, nothing sent.
        fs::write(&path, INVALID).unwrap();
        assert!(
            tokio::time::timeout(Duration::from_millis(500), updates.recv())
                .await
                .is_err()
        );

        fs::remove_file(&path).unwrap_or_default();
    }
}
