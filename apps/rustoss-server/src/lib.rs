//! RustOSS server: the in-memory store behind the OSS HTTP service.
//!
//! The binary in `main.rs` wires configuration, tracing and signals around
//! [`serve`]. Tests and embedders use [`spawn`] to run a server on an
//! ephemeral port and stop it again.

pub mod handler;

use std::future::Future;
use std::net::SocketAddr;

use anyhow::{Context, Result};
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as HttpConnBuilder;
use rustoss_core::{OssConfig, RustOss};
use rustoss_http::dispatch::OssHandler;
use rustoss_http::service::{OssHttpConfig, OssHttpService};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

pub use handler::RustOssHandler;

/// Build the [`OssHttpConfig`] from the store configuration.
#[must_use]
pub fn build_http_config(config: &OssConfig) -> OssHttpConfig {
    OssHttpConfig {
        domain: config.oss_domain.clone(),
        virtual_hosting: config.oss_virtual_hosting,
    }
}

/// Run the accept loop until `shutdown` resolves, then drain open connections.
pub async fn serve<H, F>(
    listener: TcpListener,
    service: OssHttpService<H>,
    shutdown: F,
) -> Result<()>
where
    H: OssHandler,
    F: Future<Output = ()>,
{
    let graceful = hyper_util::server::graceful::GracefulShutdown::new();
    let http = HttpConnBuilder::new(TokioExecutor::new());

    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            result = listener.accept() => {
                let (stream, peer_addr) = match result {
                    Ok(conn) => conn,
                    Err(e) => {
                        warn!(error = %e, "failed to accept connection");
                        continue;
                    }
                };

                let conn = http.serve_connection(TokioIo::new(stream), service.clone());
                let conn = graceful.watch(conn.into_owned());

                tokio::spawn(async move {
                    if let Err(e) = conn.await {
                        error!(peer_addr = %peer_addr, error = %e, "connection error");
                    }
                });
            }

            () = &mut shutdown => {
                info!("shutting down gracefully");
                break;
            }
        }
    }

    graceful.shutdown().await;
    info!("all connections drained");

    Ok(())
}

/// A server started by [`spawn`].
#[derive(Debug)]
pub struct ServerHandle {
    addr: SocketAddr,
    provider: RustOss,
    shutdown: oneshot::Sender<()>,
    task: JoinHandle<Result<()>>,
}

impl ServerHandle {
    /// The address the server listens on.
    #[must_use]
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Base URL for clients, e.g. `http://127.0.0.1:41234`.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// The store behind the server.
    #[must_use]
    pub fn provider(&self) -> &RustOss {
        &self.provider
    }

    /// Stop accepting connections and wait for the accept loop to finish.
    pub async fn shutdown(self) -> Result<()> {
        // The receiver is gone only if the loop already exited.
        let _ = self.shutdown.send(());
        self.task.await.context("server task panicked")?
    }
}

/// Bind `config.gateway_listen` and serve in a background task.
///
/// Use `127.0.0.1:0` to get an ephemeral port.
pub async fn spawn(config: OssConfig) -> Result<ServerHandle> {
    let listener = TcpListener::bind(&config.gateway_listen)
        .await
        .with_context(|| format!("failed to bind to {}", config.gateway_listen))?;
    let addr = listener
        .local_addr()
        .context("failed to read bound address")?;

    let provider = RustOss::new(config.clone());
    let service = OssHttpService::new(
        RustOssHandler(provider.clone()),
        build_http_config(&config),
    );

    let (tx, rx) = oneshot::channel::<()>();
    let task = tokio::spawn(serve(listener, service, async move {
        rx.await.ok();
    }));

    info!(%addr, "spawned RustOSS server");
    Ok(ServerHandle {
        addr,
        provider,
        shutdown: tx,
        task,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_build_http_config_from_oss_config() {
        let config = OssConfig::builder()
            .oss_domain("oss.example.test".to_owned())
            .oss_virtual_hosting(false)
            .build();
        let http_config = build_http_config(&config);
        assert_eq!(http_config.domain, "oss.example.test");
        assert!(!http_config.virtual_hosting);
    }

    #[tokio::test]
    async fn test_should_spawn_and_stop_on_ephemeral_port() {
        let config = OssConfig::builder()
            .gateway_listen("127.0.0.1:0".to_owned())
            .build();
        let server = spawn(config)
            .await
            .unwrap_or_else(|e| panic!("spawn failed: {e}"));
        assert_ne!(server.addr().port(), 0);
        assert!(server.endpoint().starts_with("http://127.0.0.1:"));

        server
            .shutdown()
            .await
            .unwrap_or_else(|e| panic!("shutdown failed: {e}"));
    }
}
