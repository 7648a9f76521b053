//! Connection lifecycle state machine.
//!
//! LIFECYCLE
//! =========
//! 1. `connect()` → open the websocket to the stream URL
//! 2. On open → send the handshake frame carrying the session identifier
//! 3. Receive loop → decode each binary frame, dispatch to the handler
//! 4. On close → release the transport; when reconnect is enabled and the
//!    client was not explicitly closed, retry once after [`RECONNECT_DELAY`]
//!
//! One spawned task drives one transport at a time: `connect()` is a no-op
//! while a task is live and after an explicit `close()`. The task re-checks
//! the closed flag when the reconnect delay elapses, so a `close()` issued
//! inside the delay window never opens a new transport.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::PoisonError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::sync::Notify;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tracing::{info, warn};

use crate::ClientError;
use crate::config::RelayConfig;
use crate::handler::ProtocolHandler;
use protocol::Message;

/// Fixed delay between a transport close and the reconnect attempt. No
/// backoff, no retry cap.
pub const RECONNECT_DELAY: Duration = Duration::from_millis(1000);

/// Observable lifecycle position of the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Unconnected,
    Connecting,
    Open,
    Closed,
}

/// Maintains one persistent stream connection to the relay.
pub struct RelayClient {
    shared: Arc<Shared>,
}

/// State shared between the public API and the connection task.
struct Shared {
    session: String,
    stream_url: String,
    reconnect: bool,
    handler: Arc<dyn ProtocolHandler>,
    status: Mutex<ConnectionStatus>,
    /// Set once by `close()`; never cleared.
    closed: AtomicBool,
    /// True while a connection task owns the lifecycle.
    task_live: AtomicBool,
    /// Wakes the task out of the receive loop or the reconnect delay.
    close_signal: Notify,
}

impl Shared {
    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    fn set_status(&self, status: ConnectionStatus) {
        *self
            .status
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = status;
    }

    fn status(&self) -> ConnectionStatus {
        *self.status.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl RelayClient {
    /// Validate the configuration and store the handler. No I/O happens
    /// until [`connect`](Self::connect).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::SessionTooLong`] when the session identifier
    /// exceeds the handshake limit and [`ClientError::InvalidEndpoint`] when
    /// the relay endpoint carries an unrecognized scheme.
    pub fn new(
        config: RelayConfig,
        handler: Arc<dyn ProtocolHandler>,
    ) -> Result<Self, ClientError> {
        config.validate()?;
        let stream_url = config.stream_url()?;

        Ok(Self {
            shared: Arc::new(Shared {
                session: config.session,
                stream_url,
                reconnect: config.reconnect,
                handler,
                status: Mutex::new(ConnectionStatus::Unconnected),
                closed: AtomicBool::new(false),
                task_live: AtomicBool::new(false),
                close_signal: Notify::new(),
            }),
        })
    }

    /// Open the transport and start streaming.
    ///
    /// Returns immediately; the handshake and receive loop run on a spawned
    /// task, so this must be called within a tokio runtime. A no-op after
    /// an explicit [`close`](Self::close) and while a connection task is
    /// already live (never opens a second concurrent transport).
    pub fn connect(&self) {
        if self.shared.is_closed() {
            return;
        }
        if self
            .shared
            .task_live
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return;
        }

        self.shared.set_status(ConnectionStatus::Connecting);
        tokio::spawn(run(Arc::clone(&self.shared)));
    }

    /// Permanently close the client.
    ///
    /// A live transport is torn down, a pending reconnect is cancelled, and
    /// every later [`connect`](Self::connect) call is a guaranteed no-op.
    pub fn close(&self) {
        self.shared.closed.store(true, Ordering::SeqCst);
        self.shared.set_status(ConnectionStatus::Closed);
        self.shared.close_signal.notify_one();
    }

    /// Current lifecycle position.
    #[must_use]
    pub fn status(&self) -> ConnectionStatus {
        self.shared.status()
    }
}

/// Connection task: one transport per iteration, reconnect delay between
/// iterations while the policy allows it.
async fn run(shared: Arc<Shared>) {
    loop {
        if shared.is_closed() {
            break;
        }

        match connect_and_stream(&shared).await {
            Ok(()) => info!("relay stream closed"),
            Err(error) => warn!(error = %error, "relay stream failed"),
        }

        // Transport released.
        if !shared.is_closed() {
            shared.set_status(ConnectionStatus::Closed);
        }
        if !shared.reconnect || shared.is_closed() {
            break;
        }

        tokio::select! {
            () = tokio::time::sleep(RECONNECT_DELAY) => {}
            () = shared.close_signal.notified() => {}
        }
        // Read-then-act: honor a close issued during the delay window.
        if shared.is_closed() {
            break;
        }
        shared.set_status(ConnectionStatus::Connecting);
    }

    shared.task_live.store(false, Ordering::SeqCst);
}

/// Drive one transport from open to close.
///
/// Inbound decode failures drop the frame and keep the connection; only
/// transport-level trouble ends the stream, and that is a close event for
/// the caller, not an error.
async fn connect_and_stream(shared: &Shared) -> Result<(), ClientError> {
    let (mut stream, _response) = connect_async(shared.stream_url.as_str())
        .await
        .map_err(|error| ClientError::Connect(Box::new(error)))?;

    let handshake = protocol::encode_handshake(&shared.session)?;
    stream
        .send(WsMessage::Binary(handshake.into()))
        .await
        .map_err(|error| ClientError::Connect(Box::new(error)))?;

    shared.set_status(ConnectionStatus::Open);
    info!(url = %shared.stream_url, "relay stream open");

    loop {
        tokio::select! {
            message = stream.next() => {
                let Some(message) = message else {
                    return Ok(());
                };
                match message {
                    Ok(WsMessage::Binary(bytes)) => dispatch(shared.handler.as_ref(), &bytes),
                    Ok(WsMessage::Text(_)) => {
                        warn!("relay sent a text frame; expected binary");
                    }
                    Ok(WsMessage::Close(_)) => return Ok(()),
                    Ok(_) => {} // ping/pong are answered by the library
                    Err(error) => {
                        warn!(error = %error, "relay transport error");
                        return Ok(());
                    }
                }
            }
            () = shared.close_signal.notified() => {
                let _ = stream.close(None).await;
                return Ok(());
            }
        }
    }
}

/// Decode one inbound frame and notify the handler.
fn dispatch(handler: &dyn ProtocolHandler, bytes: &[u8]) {
    match protocol::decode_message(bytes) {
        Ok(Message::Lookat { x, y, z, w }) => handler.on_lookat(x, y, z, w),
        Ok(Message::Error { payload }) => handler.on_error(&String::from_utf8_lossy(&payload)),
        Ok(Message::Video {
            rotation_y,
            seconds,
            length,
            filename,
        }) => handler.on_video(rotation_y, seconds, length, &filename),
        Ok(Message::Alive { device_id }) => handler.on_alive(&device_id),
        Err(error) => warn!(error = %error, "dropping malformed relay frame"),
    }
}

#[cfg(test)]
#[path = "connection_test.rs"]
mod tests;
