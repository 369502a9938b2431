//! Stdio transport — reads JSON-RPC from stdin, writes to stdout.

use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinSet;

use crate::protocol::Dispatcher;
use crate::types::{McpError, McpResult};

use super::framing;

/// Default bound on requests dispatched but not yet answered.
pub const DEFAULT_MAX_IN_FLIGHT: usize = 16;

/// Stdio transport for desktop MCP clients.
///
/// Each line is dispatched on the blocking pool, so slow tools do not hold
/// up the reader. Replies are written in completion order.
pub struct StdioTransport {
    dispatcher: Arc<Dispatcher>,
    max_in_flight: usize,
}

impl StdioTransport {
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self {
            dispatcher,
            max_in_flight: DEFAULT_MAX_IN_FLIGHT,
        }
    }

    pub fn with_max_in_flight(self, max_in_flight: usize) -> Self {
        Self {
            max_in_flight: max_in_flight.max(1),
            ..self
        }
    }

    /// Run the transport loop on the process's stdin and stdout.
    pub async fn run(&self) -> McpResult<()> {
        self.serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .await
    }

    /// Serve newline-delimited requests from `reader` until EOF, writing
    /// replies to `writer`. Returns once every in-flight request is answered.
    pub async fn serve<R, W>(&self, mut reader: R, writer: W) -> McpResult<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let (tx, rx) = mpsc::channel::<Vec<u8>>(self.max_in_flight);
        let writer_task = tokio::spawn(write_frames(writer, rx));
        let permits = Arc::new(Semaphore::new(self.max_in_flight));
        let mut tasks = JoinSet::new();
        let mut line = Vec::new();

        tracing::info!("Stdio transport started");

        loop {
            line.clear();
            if reader.read_until(b'\n', &mut line).await.map_err(McpError::Io)? == 0 {
                break;
            }
            let Some(message) = framing::unframe(&line) else {
                continue;
            };
            let message = message.to_vec();

            let permit = permits
                .clone()
                .acquire_owned()
                .await
                .map_err(|e| McpError::Transport(e.to_string()))?;
            let dispatcher = self.dispatcher.clone();
            let tx = tx.clone();

            tasks.spawn(async move {
                let reply = tokio::task::spawn_blocking(move || dispatcher.handle(&message)).await;
                match reply {
                    Ok(Some(encoded)) => {
                        if tx.send(framing::frame(encoded)).await.is_err() {
                            tracing::warn!("Writer closed, dropping reply");
                        }
                    }
                    Ok(None) => {}
                    Err(e) => tracing::error!("Dispatch task failed: {e}"),
                }
                drop(permit);
            });

            while tasks.try_join_next().is_some() {}
        }

        tracing::info!("EOF on input, draining {} in-flight requests", tasks.len());
        while tasks.join_next().await.is_some() {}
        drop(tx);

        writer_task
            .await
            .map_err(|e| McpError::Transport(e.to_string()))?
            .map_err(McpError::Io)?;

        tracing::info!("Stdio transport stopped");
        Ok(())
    }
}

async fn write_frames<W>(mut writer: W, mut rx: mpsc::Receiver<Vec<u8>>) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    while let Some(frame) = rx.recv().await {
        writer.write_all(&frame).await?;
        writer.flush().await?;
    }
    Ok(())
}
