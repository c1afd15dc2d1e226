//! Config reload while the server is running.
//!
//! The form reads the config on every render, so a reload takes effect on the
//! next request. `bind_addr` and the shutdown timeout are only read at startup.

use crate::config::{ConfigError, ConfigStore};

/// Reload the store from its file. On failure the old config stays in place.
pub fn reload_and_log(store: &ConfigStore) -> Result<(), ConfigError> {
    match store.reload() {
        Ok(()) => {
            tracing::info!(path = %store.path().display(), "Config reloaded");
            Ok(())
        }
        Err(e) => {
            tracing::warn!(path = %store.path().display(), error = %e, "Config reload failed, keeping previous config");
            Err(e)
        }
    }
}

/// Reload the config on every SIGHUP until shutdown.
#[cfg(unix)]
pub async fn reload_on_hangup(
    store: ConfigStore,
    shutdown: std::sync::Arc<crate::server::shutdown::ShutdownManager>,
) {
    use tokio::signal::unix::{signal, SignalKind};

    let mut hangup = match signal(SignalKind::hangup()) {
        Ok(stream) => stream,
        Err(e) => {
            tracing::warn!("Failed to install SIGHUP handler: {}", e);
            return;
        }
    };

    let stopped = shutdown.wait_for_shutdown();
    tokio::pin!(stopped);

    loop {
        tokio::select! {
            _ = &mut stopped => return,
            Some(()) = hangup.recv() => {
                // Errors are already logged; keep serving the old config.
                let _ = reload_and_log(&store);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    #[cfg(unix)]
    use crate::server::shutdown::ShutdownManager;
    #[cfg(unix)]
    use std::sync::Arc;

    #[test]
    fn test_failed_reload_keeps_config() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[calculator]\ntitle = \"Before\"\n").unwrap();
        let store = ConfigStore::new(Config::load_from(&path).unwrap(), path.clone());

        std::fs::write(&path, "[calculator\n").unwrap();
        assert!(matches!(
            reload_and_log(&store),
            Err(ConfigError::ParseError { .. })
        ));
        assert_eq!(store.get().calculator.title, "Before");

        std::fs::write(&path, "[calculator]\ntitle = \"After\"\n").unwrap();
        reload_and_log(&store).unwrap();
        assert_eq!(store.get().calculator.title, "After");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_hangup_task_stops_on_shutdown() {
        let store = ConfigStore::new(Config::default(), "/tmp/simple-interest-unused.toml".into());
        let shutdown = Arc::new(ShutdownManager::new());
        let task = tokio::spawn(reload_on_hangup(store, shutdown.clone()));

        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        shutdown.signal_shutdown();

        tokio::time::timeout(std::time::Duration::from_secs(2), task)
            .await
            .expect("reload task did not stop")
            .unwrap();
    }
}
