//! API server implementation

use std::future::Future;
use std::net::SocketAddr;

use axum::Router;
use mergington_core::{ActivityStore, ServerConfig};
use tokio::net::TcpListener;

use crate::Result;
use crate::routes::{AppState, router};

/// Mergington API server, configured but not yet listening.
pub struct Server {
    addr: SocketAddr,
    state: AppState,
}

impl Server {
    /// Create a server for `store` listening on the configured address.
    pub fn new(config: &ServerConfig, store: ActivityStore) -> Result<Self> {
        Ok(Self::from_state(config.socket_addr()?, AppState::new(store)))
    }

    /// Create a server from prepared state.
    pub fn from_state(addr: SocketAddr, state: AppState) -> Self {
        Self { addr, state }
    }

    /// Address the server will bind.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Bind the listener.
    pub async fn bind(self) -> Result<BoundServer> {
        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "mergington-api listening");
        Ok(BoundServer {
            listener,
            router: router(self.state),
        })
    }
}

/// A server with a bound listener.
pub struct BoundServer {
    listener: TcpListener,
    router: Router,
}

impl BoundServer {
    /// Address actually bound (resolves port 0).
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Serve until SIGINT or SIGTERM.
    pub async fn serve(self) -> Result<()> {
        self.serve_with_shutdown(shutdown_signal()).await
    }

    /// Serve until `signal` resolves, then drain in-flight requests.
    pub async fn serve_with_shutdown<F>(self, signal: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(signal)
            .await?;
        tracing::info!("mergington-api stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};
        match (
            signal(SignalKind::terminate()),
            signal(SignalKind::interrupt()),
        ) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = sigint.recv() => {}
                }
            }
            _ => {
                tracing::warn!("could not register signal handlers, falling back to ctrl-c");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
    tracing::info!("shutdown signal received");
}
