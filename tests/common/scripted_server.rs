//! Raw HTTP server for artifact responses httpmock cannot express
//!
//! Writes a fixed header block and body prefix, then either closes the
//! connection or stalls, so transfers can be cut off mid-body.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// What the server does after writing the body prefix
#[derive(Debug, Clone, Copy)]
pub enum AfterBody {
    /// Drop the connection
    Close,
    /// Keep the connection open without sending anything
    Stall(Duration),
}

pub struct ScriptedHttpServer {
    addr: SocketAddr,
    _handle: tokio::task::JoinHandle<()>,
}

impl ScriptedHttpServer {
    /// Serve `body` while announcing `declared_length` bytes
    ///
    /// # Errors
    ///
    /// Returns an error if the server cannot bind to a port.
    pub async fn start(
        declared_length: usize,
        body: Vec<u8>,
        after: AfterBody,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let body = Arc::new(body);

        let handle = tokio::spawn(async move {
            while let Ok((mut stream, _)) = listener.accept().await {
                let body = body.clone();

                tokio::spawn(async move {
                    let mut buffer = [0; 4096];
                    if stream.read(&mut buffer).await.is_err() {
                        return;
                    }

                    let headers = format!(
                        "HTTP/1.1 200 OK\r\nContent-Type: application/octet-stream\r\nContent-Length: {declared_length}\r\nConnection: close\r\n\r\n"
                    );
                    if stream.write_all(headers.as_bytes()).await.is_err() {
                        return;
                    }
                    let _ = stream.write_all(&body).await;
                    let _ = stream.flush().await;

                    match after {
                        AfterBody::Close => {
                            let _ = stream.shutdown().await;
                        }
                        AfterBody::Stall(duration) => tokio::time::sleep(duration).await,
                    }
                });
            }
        });

        Ok(Self {
            addr,
            _handle: handle,
        })
    }

    /// URL of `path` on this server
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }
}
