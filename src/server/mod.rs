//! Fixed-body HTTP target server
//!
//! Answers every request, whatever its method or path, with status 200 and
//! the configured body. The body is a single immutable buffer shared by all
//! connection tasks. The only fatal condition is failing to bind.

use crate::{
    error::{AppError, Result},
    logging::Logger,
    models::ServerConfig,
};
use hyper::body::Bytes;
use hyper::service::{make_service_fn, service_fn};
use hyper::{Body, Request, Response, Server};
use std::convert::Infallible;
use std::future::Future;
use std::net::{SocketAddr, TcpListener};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// A bound, not yet serving, target server
pub struct TargetServer {
    listener: TcpListener,
    local_addr: SocketAddr,
    body: Bytes,
    logger: Logger,
}

impl TargetServer {
    /// Bind the listening socket; failure here is fatal for the server binary
    pub fn bind(config: &ServerConfig) -> Result<Self> {
        let addr = config.socket_addr()?;
        let listener = TcpListener::bind(addr)
            .map_err(|e| AppError::bind(format!("Failed to bind {}: {}", addr, e)))?;
        let local_addr = listener.local_addr()?;

        Ok(Self {
            listener,
            local_addr,
            body: Bytes::from(config.body.clone()),
            logger: Logger::new("SERVER"),
        })
    }

    /// Use the given logger
    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    /// Address actually bound (resolves port 0)
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Base URL for reaching the server
    pub fn url(&self) -> String {
        format!("http://{}/", self.local_addr)
    }

    /// Serve until the process is killed
    pub async fn serve(self) -> Result<()> {
        self.serve_with_shutdown(std::future::pending::<()>()).await
    }

    /// Serve until `signal` resolves
    pub async fn serve_with_shutdown<F>(self, signal: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        let body = self.body.clone();
        let make_svc = make_service_fn(move |_conn| {
            let body = body.clone();
            async move {
                Ok::<_, Infallible>(service_fn(move |req| respond(body.clone(), req)))
            }
        });

        let server = Server::from_tcp(self.listener)?
            .serve(make_svc)
            .with_graceful_shutdown(signal);

        self.logger.info("Target server listening")
            .field("addr", self.local_addr.to_string())
            .field("body_bytes", self.body.len())
            .log()
            .await;

        server.await?;
        Ok(())
    }

    /// Serve on a background task, returning a handle that can stop it
    pub fn spawn(self) -> ServerHandle {
        let (tx, rx) = oneshot::channel::<()>();
        let addr = self.local_addr;
        let task = tokio::spawn(self.serve_with_shutdown(async {
            let _ = rx.await;
        }));

        ServerHandle {
            addr,
            shutdown: Some(tx),
            task,
        }
    }
}

/// Handle to a server running on a background task
///
/// Dropping the handle also signals shutdown.
pub struct ServerHandle {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    task: JoinHandle<Result<()>>,
}

impl ServerHandle {
    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Base URL for reaching the server
    pub fn url(&self) -> String {
        format!("http://{}/", self.addr)
    }

    /// Stop accepting, drain open connections and wait for the task
    pub async fn shutdown(mut self) -> Result<()> {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        self.task
            .await
            .map_err(|e| AppError::internal(format!("Server task failed: {}", e)))?
    }
}

async fn respond(body: Bytes, _req: Request<Body>) -> std::result::Result<Response<Body>, Infallible> {
    Ok(Response::new(Body::from(body)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_serves_fixed_body_on_any_path_and_method() {
        let handle = TargetServer::bind(&ServerConfig::loopback("ok")).unwrap().spawn();
        let client = reqwest::Client::builder().no_proxy().build().unwrap();

        let root = client.get(handle.url()).send().await.unwrap();
        assert_eq!(root.status(), 200);
        assert_eq!(root.text().await.unwrap(), "ok");

        let other = client
            .post(format!("{}some/other/path?x=1", handle.url()))
            .body("ignored")
            .send()
            .await
            .unwrap();
        assert_eq!(other.status(), 200);
        assert_eq!(other.text().await.unwrap(), "ok");

        handle.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_configured_body() {
        let handle = TargetServer::bind(&ServerConfig::loopback("fail")).unwrap().spawn();
        let client = reqwest::Client::builder().no_proxy().build().unwrap();

        let text = client.get(handle.url()).send().await.unwrap().text().await.unwrap();
        assert_eq!(text, "fail");

        handle.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_bind_conflict_is_fatal_bind_error() {
        let occupied = TcpListener::bind("127.0.0.1:0").unwrap();
        let mut config = ServerConfig::loopback("ok");
        config.port = occupied.local_addr().unwrap().port();

        let err = TargetServer::bind(&config).err().unwrap();
        assert!(matches!(err, AppError::Bind(_)));
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn test_ephemeral_port_is_resolved() {
        let server = TargetServer::bind(&ServerConfig::loopback("ok")).unwrap();
        assert_ne!(server.local_addr().port(), 0);
        assert!(server.url().starts_with("http://127.0.0.1:"));
    }
}
