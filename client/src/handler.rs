//! Callback contract for decoded relay messages.

use tracing::info;

/// Receives one callback per decoded server→client message.
///
/// Every method is a pure notification; the dispatcher consumes no return
/// value. Default bodies log the event, so a listener only overrides the
/// messages it consumes. The dispatcher holds exactly one implementation
/// for its whole lifetime.
pub trait ProtocolHandler: Send + Sync {
    /// Viewer orientation update (quaternion components).
    fn on_lookat(&self, x: f32, y: f32, z: f32, w: f32) {
        info!(x, y, z, w, "lookat");
    }

    /// Server-sent error description, passed through verbatim.
    fn on_error(&self, description: &str) {
        info!(description, "server error");
    }

    /// Playback instruction for a named clip.
    fn on_video(&self, rotation_y: f32, seconds: i32, length: i32, filename: &str) {
        info!(rotation_y, seconds, length, filename, "video");
    }

    /// Heartbeat from the device assigned to the session.
    fn on_alive(&self, device_id: &str) {
        info!(device_id, "alive");
    }
}
