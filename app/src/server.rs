//! Keep-alive HTTP endpoint for hosts that require a listening port.

use axum::{Router, routing::get};
use std::net::SocketAddr;
use tracing::info;

const RUNNING: &str = "Telegram bot is running ✅";

fn router() -> Router {
    Router::new()
        .route("/", get(|| async { RUNNING }))
        .route("/health", get(|| async { "ok" }))
}

/// Serve until the process exits.
pub async fn serve(port: u16) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Listening on port {port}");
    axum::serve(listener, router()).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[expect(clippy::unwrap_used, reason = "Test failure should panic")]
    async fn answers_root_and_health() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, router()).await });

        for (path, expected) in [("/", RUNNING), ("/health", "ok")] {
            let body = get_body(addr, path).await;
            assert!(body.ends_with(expected), "{path}: {body}");
        }
    }

    #[expect(clippy::unwrap_used, reason = "Test failure should panic")]
    async fn get_body(addr: SocketAddr, path: &str) -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
        let request = format!("GET {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n");
        stream.write_all(request.as_bytes()).await.unwrap();

        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        response
    }
}
