//! Client SDK for the relay stream protocol.
//!
//! ARCHITECTURE
//! ============
//! [`RelayClient`] owns the websocket lifecycle: `connect()` opens the
//! transport to `<relay endpoint>/stream`, the open path sends the session
//! handshake, and the receive loop decodes each binary frame via the
//! `protocol` crate and dispatches it to the application's
//! [`ProtocolHandler`]. A transport close triggers one fixed-delay retry
//! when reconnect is enabled; `close()` ends the lifecycle permanently.
//!
//! The embedding application implements [`ProtocolHandler`] and hands it to
//! [`RelayClient::new`] together with a [`RelayConfig`]. That trait is the
//! only outward-facing surface.

mod config;
mod connection;
mod handler;

pub use config::RelayConfig;
pub use connection::{ConnectionStatus, RECONNECT_DELAY, RelayClient};
pub use handler::ProtocolHandler;

/// Error returned by client construction and the connection path.
///
/// Transport drops during streaming are not errors; they are close events
/// handled by the reconnect policy and visible through
/// [`RelayClient::status`].
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The configured session identifier cannot fit the handshake frame.
    #[error("session identifier is {0} bytes; the handshake limit is 255")]
    SessionTooLong(usize),
    /// The relay endpoint does not carry a recognized scheme.
    #[error("invalid relay endpoint: {0}")]
    InvalidEndpoint(String),
    /// Opening the websocket or sending the handshake failed.
    #[error("websocket connect failed: {0}")]
    Connect(Box<tokio_tungstenite::tungstenite::Error>),
    /// Encoding the handshake frame failed.
    #[error("handshake encode failed: {0}")]
    Handshake(#[from] protocol::CodecError),
}
