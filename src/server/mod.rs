//! HTTP Service
//!
//! Exposes the validation engine over a small JSON API:
//! - `GET /api/health`
//! - `POST /api/validate`

pub mod error;
pub mod http;
pub mod routes;

use anyhow::{Context, Result};
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};
use tokio::time::timeout;

use crate::config::ServerConfig;
use crate::server::http::{read_request, write_response, READ_TIMEOUT};

pub use error::RequestError;
pub use routes::{route, ValidateRequest};

/// Bind the configured address and serve until Ctrl-C
pub async fn serve(config: &ServerConfig) -> Result<()> {
    let listener = TcpListener::bind((config.host.as_str(), config.port))
        .await
        .with_context(|| format!("Failed to bind {}:{}", config.host, config.port))?;
    log::info!(
        "Pixel grid server running on http://{}",
        listener.local_addr()?
    );

    tokio::select! {
        result = serve_listener(listener) => result,
        _ = tokio::signal::ctrl_c() => {
            log::info!("Shutting down");
            Ok(())
        }
    }
}

/// Accept connections on an already bound listener, one task per connection
pub async fn serve_listener(listener: TcpListener) -> Result<()> {
    loop {
        let (stream, peer) = match listener.accept().await {
            Ok(conn) => conn,
            Err(e) => {
                log::warn!("Failed to accept connection: {}", e);
                continue;
            }
        };

        tokio::spawn(async move {
            if let Err(e) = handle_connection(stream).await {
                log::warn!("Connection from {} failed: {}", peer, e);
            }
        });
    }
}

async fn handle_connection(mut stream: TcpStream) -> std::io::Result<()> {
    let request = match timeout(READ_TIMEOUT, read_request(&mut stream)).await {
        Ok(request) => request?,
        Err(_) => {
            log::debug!("Timed out reading request");
            return Ok(());
        }
    };
    let Some(request) = request else {
        return Ok(());
    };

    log::debug!("{} {}", request.method, request.path);
    let response = route(&request);
    write_response(&mut stream, &response, request.method == "HEAD").await?;
    stream.shutdown().await
}
