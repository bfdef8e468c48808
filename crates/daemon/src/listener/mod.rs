// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Listener task for handling socket I/O.
//!
//! Accepts loopback connections and spawns one task per connection. Each
//! connection carries exactly one request and one response.

use std::sync::Arc;

use bluedim_storage::SettingsStore;
use bluedim_wire::{self as protocol, Request, Response};
use parking_lot::Mutex;
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpListener;
use tracing::{debug, error, info};

use crate::env::ipc_timeout;

/// Shared daemon context for all request handlers.
pub struct ListenCtx {
    pub store: Arc<Mutex<SettingsStore>>,
}

/// Listener task for accepting socket connections.
pub struct Listener {
    tcp: TcpListener,
    ctx: Arc<ListenCtx>,
}

/// Errors from connection handling.
#[derive(Debug, Error)]
pub(crate) enum ConnectionError {
    #[error("Protocol error: {0}")]
    Protocol(#[from] protocol::ProtocolError),
}

impl Listener {
    pub fn new(tcp: TcpListener, ctx: Arc<ListenCtx>) -> Self {
        Self { tcp, ctx }
    }

    /// Run the accept loop forever, spawning a task for each connection.
    pub async fn run(self) {
        if let Ok(addr) = self.tcp.local_addr() {
            info!(%addr, "accepting connections");
        }
        loop {
            match self.tcp.accept().await {
                Ok((stream, addr)) => {
                    debug!(%addr, "connection accepted");
                    let ctx = Arc::clone(&self.ctx);
                    tokio::spawn(async move {
                        let (reader, writer) = stream.into_split();
                        if let Err(e) = handle_connection(reader, writer, &ctx).await {
                            log_connection_error(e);
                        }
                    });
                }
                Err(e) => error!("TCP accept error: {}", e),
            }
        }
    }
}

fn log_connection_error(e: ConnectionError) {
    match e {
        ConnectionError::Protocol(protocol::ProtocolError::ConnectionClosed) => {
            debug!("Client disconnected without a request")
        }
        ConnectionError::Protocol(protocol::ProtocolError::Timeout) => {
            debug!("Timed out writing response")
        }
        _ => error!("Connection error: {}", e),
    }
}

/// Handle a single client connection.
///
/// Reads one framed request with no deadline, answers it and closes the
/// write half. A connection that closes before delivering a full frame gets
/// no response. A frame that does not decode into a known request gets
/// `{"status":"error"}`.
pub(crate) async fn handle_connection<R, W>(
    mut reader: R,
    mut writer: W,
    ctx: &ListenCtx,
) -> Result<(), ConnectionError>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let data = protocol::read_message(&mut reader).await?;

    let response = match protocol::decode::<Request>(&data) {
        Ok(request) => {
            debug!(request = ?request, "received request");
            handle_request(request, ctx)
        }
        Err(e) => {
            debug!(error = %e, "rejecting malformed request");
            Response::Error
        }
    };

    protocol::write_response(&mut writer, &response, ipc_timeout()).await?;
    let _ = writer.shutdown().await;
    Ok(())
}

/// Dispatch one request against the shared store.
///
/// The lock is held for the whole store call, so a write never interleaves
/// with another write or a snapshot.
fn handle_request(request: Request, ctx: &ListenCtx) -> Response {
    match request {
        Request::Read => Response::with_state(ctx.store.lock().snapshot()),
        Request::Write { changes } => {
            // Persists synchronously on this worker thread, holding the lock
            let applied = ctx.store.lock().apply_changes(&changes);
            debug!(applied, "write applied");
            Response::ok()
        }
    }
}

#[cfg(test)]
#[path = "../listener_tests.rs"]
mod tests;
