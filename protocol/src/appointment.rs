//! Appointment — the server-issued session record.
//!
//! A passive value object: the relay's scheduling API hands the client one
//! of these as JSON, and the embedding application copies the `token` field
//! into its stream configuration. Nothing here is mutated after parsing.

use serde::Deserialize;
use time::OffsetDateTime;

/// One scheduled session as issued by the relay.
///
/// Timestamps arrive as RFC 3339 strings and are parsed into absolute
/// instants; `timezone` is kept alongside for display purposes only.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Appointment {
    pub id: String,
    /// Session token presented in the stream handshake.
    pub token: String,
    /// Human-readable appointment descriptor.
    pub appointment: String,
    #[serde(rename = "startTime", with = "time::serde::rfc3339")]
    pub start: OffsetDateTime,
    #[serde(rename = "endTime", with = "time::serde::rfc3339")]
    pub end: OffsetDateTime,
    /// Identifier of the device assigned to the session.
    pub device: String,
    pub timezone: String,
}

#[cfg(test)]
#[path = "appointment_test.rs"]
mod tests;
