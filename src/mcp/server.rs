//! MCP stdio server — read loop, per-request tasks, single writer.

use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncWrite};
use tokio::sync::{mpsc, Semaphore};
use tokio_util::sync::CancellationToken;

use crate::mcp::codec::{read_message, write_message, Inbound};
use crate::mcp::router::{self, error_response, RpcError};
use crate::tools::ToolExecutor;
use crate::types::ServerConfig;

/// MCP server wrapping the tool executor.
#[derive(Debug)]
pub struct McpServer {
    executor: Arc<ToolExecutor>,
    config: ServerConfig,
    cancel: CancellationToken,
}

impl McpServer {
    pub fn new(executor: Arc<ToolExecutor>, config: ServerConfig) -> Self {
        Self {
            executor,
            config,
            cancel: CancellationToken::new(),
        }
    }

    /// Token that stops the read loop when cancelled.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Serve one session until EOF or shutdown.
    ///
    /// Each request runs in its own task (bounded by `max_concurrent_calls`);
    /// replies go through one writer task, so they may arrive out of order.
    /// In-flight calls finish and are flushed before this returns.
    pub async fn serve<R, W>(&self, mut reader: R, writer: W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(self.config.response_channel_capacity.max(1));
        let writer_task = tokio::spawn(write_loop(writer, rx));
        let limiter = Arc::new(Semaphore::new(self.config.max_concurrent_calls.max(1)));

        tracing::info!(
            name = %self.config.name,
            version = %self.config.version,
            max_concurrent_calls = self.config.max_concurrent_calls,
            "MCP server ready on stdio"
        );

        loop {
            tokio::select! {
                _ = self.cancel.cancelled() => {
                    tracing::info!("MCP server shutting down");
                    break;
                }
                inbound = read_message(&mut reader, self.config.max_message_bytes) => {
                    let line = match inbound? {
                        Some(Inbound::Message(line)) => line,
                        Some(Inbound::TooLarge(size)) => {
                            tracing::warn!(size, limit = self.config.max_message_bytes, "Message too large");
                            let reply = error_response(
                                serde_json::Value::Null,
                                &RpcError::invalid_request(format!(
                                    "Message too large: {} bytes (limit {})",
                                    size, self.config.max_message_bytes
                                )),
                            );
                            if tx.send(reply).await.is_err() {
                                break;
                            }
                            continue;
                        }
                        None => {
                            tracing::info!("stdin closed");
                            break;
                        }
                    };

                    // Backpressure: wait for a slot before reading further.
                    let permit = limiter.clone().acquire_owned().await.map_err(std::io::Error::other)?;
                    let executor = self.executor.clone();
                    let config = self.config.clone();
                    let tx = tx.clone();
                    tokio::spawn(async move {
                        let _permit = permit;
                        if let Some(reply) = router::handle_message(&executor, &config, &line).await {
                            if tx.send(reply).await.is_err() {
                                tracing::warn!("Writer closed; dropping reply");
                            }
                        }
                    });
                }
            }
        }

        // Writer drains once every in-flight task has dropped its sender.
        drop(tx);
        writer_task
            .await
            .map_err(std::io::Error::other)?
    }
}

async fn write_loop<W>(
    mut writer: W,
    mut rx: mpsc::Receiver<serde_json::Value>,
) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    while let Some(message) = rx.recv().await {
        if let Err(e) = write_message(&mut writer, &message).await {
            tracing::error!(error = %e, "Failed to write reply");
            return Err(e);
        }
    }
    Ok(())
}
