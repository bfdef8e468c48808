// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Client for the settings daemon.
//!
//! Every call resolves the port record, opens a fresh loopback connection,
//! exchanges one request and one response, and closes.

use std::io;
use std::net::Ipv4Addr;
use std::time::Duration;

use bluedim_core::{Changes, Settings};
use bluedim_daemon::{env, Config, LifecycleError};
use bluedim_storage::PortRegistry;
use bluedim_wire::{read_response, write_request, ProtocolError, Request, Response};
use serde::Serialize;
use thiserror::Error;
use tokio::net::TcpStream;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("daemon not running")]
    NotRunning,

    #[error("daemon unavailable on port {port}: {source}")]
    Unavailable {
        port: u16,
        #[source]
        source: io::Error,
    },

    #[error("daemon did not respond within {0:?}")]
    Timeout(Duration),

    #[error("daemon closed the connection without responding")]
    NoResponse,

    #[error("daemon rejected the request")]
    Rejected,

    #[error("unexpected reply from daemon: {0}")]
    Protocol(String),
}

impl ClientError {
    /// True when no daemon could be reached, as opposed to a daemon that
    /// answered badly.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            ClientError::NotRunning | ClientError::Unavailable { .. } | ClientError::Timeout(_)
        )
    }
}

#[derive(Debug, Clone)]
pub struct DaemonClient {
    registry: PortRegistry,
    timeout: Duration,
}

impl DaemonClient {
    pub fn new(registry: PortRegistry, timeout: Duration) -> Self {
        Self { registry, timeout }
    }

    /// Client for the daemon described by the environment.
    pub fn from_env() -> Result<Self, LifecycleError> {
        let config = Config::load()?;
        Ok(Self::new(config.registry(), env::ipc_timeout()))
    }

    /// The port currently published, without contacting the daemon.
    pub fn port(&self) -> Option<u16> {
        self.registry.resolve()
    }

    /// Send `{"action": action, ...payload}` and wait for the reply.
    ///
    /// `payload` cannot override the action.
    pub async fn send_request(
        &self,
        action: &str,
        payload: serde_json::Map<String, serde_json::Value>,
    ) -> Result<Response, ClientError> {
        let mut message = payload;
        message.insert("action".to_string(), serde_json::Value::from(action));
        self.exchange(&serde_json::Value::Object(message)).await
    }

    pub async fn send(&self, request: &Request) -> Result<Response, ClientError> {
        self.exchange(request).await
    }

    /// Current settings.
    pub async fn read(&self) -> Result<Settings, ClientError> {
        match self.send(&Request::Read).await? {
            Response::Success { state: Some(state) } => Ok(state),
            other => Self::reject(other),
        }
    }

    /// Submit `changes`. Entries the daemon cannot apply are skipped on its
    /// side, so success does not mean every entry took effect.
    pub async fn write(&self, changes: &Changes) -> Result<(), ClientError> {
        match self.send(&Request::Write { changes: changes.clone() }).await? {
            Response::Success { .. } => Ok(()),
            other => Self::reject(other),
        }
    }

    async fn exchange<T: Serialize>(&self, message: &T) -> Result<Response, ClientError> {
        let port = self.registry.resolve().ok_or(ClientError::NotRunning)?;
        debug!(port, "connecting to daemon");

        let connect = TcpStream::connect((Ipv4Addr::LOCALHOST, port));
        let mut stream = match tokio::time::timeout(self.timeout, connect).await {
            Ok(Ok(stream)) => stream,
            Ok(Err(source)) => return Err(ClientError::Unavailable { port, source }),
            Err(_) => return Err(ClientError::Timeout(self.timeout)),
        };

        write_request(&mut stream, message, self.timeout)
            .await
            .map_err(|e| self.classify(port, e))?;
        read_response(&mut stream, self.timeout).await.map_err(|e| self.classify(port, e))
    }

    fn classify(&self, port: u16, e: ProtocolError) -> ClientError {
        match e {
            ProtocolError::ConnectionClosed => ClientError::NoResponse,
            ProtocolError::Timeout => ClientError::Timeout(self.timeout),
            ProtocolError::Io(source) => ClientError::Unavailable { port, source },
            other => ClientError::Protocol(other.to_string()),
        }
    }

    fn reject<T>(response: Response) -> Result<T, ClientError> {
        match response {
            Response::Error => Err(ClientError::Rejected),
            other => Err(ClientError::Protocol(format!("{other:?}"))),
        }
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
