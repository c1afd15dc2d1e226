pub mod connection;
pub mod error;
pub mod fields;
pub mod handlers;
pub mod health;
pub mod page;
pub mod reload;
pub mod request_log;
pub mod router;
pub mod shutdown;

use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;

use crate::config::{ConfigError, ConfigStore};
use crate::server::connection::ConnectionCounter;
use crate::server::router::build_router;
use crate::server::shutdown::ShutdownManager;

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: ConfigStore,
}

/// Errors raised while starting or running the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("bind() must be called before run()")]
    NotBound,

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

pub struct InterestServer {
    pub addr: SocketAddr,
    /// The bound listener, kept alive so the port cannot be taken between
    /// bind() and run().
    listener: Option<TcpListener>,
    config: ConfigStore,
    shutdown: Arc<ShutdownManager>,
}

impl InterestServer {
    pub fn new(config: ConfigStore) -> Result<Self, ServerError> {
        let addr = config.get().bind_addr()?;
        Ok(Self {
            addr,
            listener: None,
            config,
            shutdown: Arc::new(ShutdownManager::new()),
        })
    }

    /// Bind the configured address. Port 0 picks a free port; the actual
    /// address is returned and stored in `addr`.
    pub async fn bind(&mut self) -> Result<SocketAddr, ServerError> {
        let listener = TcpListener::bind(self.addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: self.addr,
                source,
            })?;
        let actual_addr = listener.local_addr()?;

        self.addr = actual_addr;
        self.listener = Some(listener);
        tracing::info!("Server bound to {}", actual_addr);
        Ok(actual_addr)
    }

    pub fn handle(&self) -> ServerHandle {
        ServerHandle {
            shutdown: self.shutdown.clone(),
            config: self.config.clone(),
        }
    }

    /// Run the server until shutdown is signaled.
    ///
    /// Consumes self to take ownership of the pre-bound listener.
    pub async fn run(self) -> Result<(), ServerError> {
        let listener = self.listener.ok_or(ServerError::NotBound)?;
        let drain_timeout =
            Duration::from_secs(self.config.get().server.shutdown_timeout_seconds);

        tracing::info!("Serving calculator on http://{}", self.addr);

        let app = build_router(AppState {
            config: self.config.clone(),
        });
        let make_service = ConnectionCounter::new(app.into_make_service(), self.shutdown.clone());

        #[cfg(unix)]
        let reloader = tokio::spawn(reload::reload_on_hangup(
            self.config.clone(),
            self.shutdown.clone(),
        ));

        let shutdown = self.shutdown.clone();
        let served = axum::serve(listener, make_service)
            .with_graceful_shutdown(async move { shutdown.wait_for_shutdown().await })
            .into_future()
            .await;

        #[cfg(unix)]
        reloader.abort();
        served?;

        self.shutdown.wait_for_connections(drain_timeout).await;
        tracing::info!("Shutting down gracefully");

        Ok(())
    }
}

/// Controls a running server from another task.
#[derive(Clone)]
pub struct ServerHandle {
    shutdown: Arc<ShutdownManager>,
    config: ConfigStore,
}

impl ServerHandle {
    pub fn shutdown(&self) {
        self.shutdown.signal_shutdown();
    }

    /// Re-read the config file, same as sending SIGHUP.
    pub fn reload_config(&self) -> Result<(), ConfigError> {
        reload::reload_and_log(&self.config)
    }
}
