//! Constructor configuration and stream URL derivation.

use crate::ClientError;
use protocol::MAX_SESSION_LEN;

/// Path suffix appended to the relay endpoint.
const STREAM_PATH: &str = "/stream";

/// Options recognized by [`crate::RelayClient::new`].
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Opaque session identifier sent in the handshake. At most 255 bytes
    /// when encoded as UTF-8; fixed for the connection's lifetime.
    pub session: String,
    /// Whether a transport close schedules an automatic retry.
    pub reconnect: bool,
    /// Base URI of the relay. `http(s)` bases are mapped to `ws(s)`.
    pub relay_endpoint: String,
}

impl RelayConfig {
    pub(crate) fn validate(&self) -> Result<(), ClientError> {
        let len = self.session.len();
        if len > MAX_SESSION_LEN {
            return Err(ClientError::SessionTooLong(len));
        }
        Ok(())
    }

    /// Derive the websocket stream URL from the configured base endpoint.
    pub(crate) fn stream_url(&self) -> Result<String, ClientError> {
        let base = self.relay_endpoint.trim_end_matches('/');
        if base.starts_with("ws://") || base.starts_with("wss://") {
            return Ok(format!("{base}{STREAM_PATH}"));
        }
        if let Some(rest) = base.strip_prefix("http://") {
            return Ok(format!("ws://{rest}{STREAM_PATH}"));
        }
        if let Some(rest) = base.strip_prefix("https://") {
            return Ok(format!("wss://{rest}{STREAM_PATH}"));
        }

        Err(ClientError::InvalidEndpoint(self.relay_endpoint.clone()))
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
