//! Wire model and binary codec for the relay stream protocol.
//!
//! This crate owns the byte layout used between the relay and its clients.
//! Every frame is a 1-byte type tag followed by a type-specific payload.
//! Numeric fields are little-endian; text fields carry their own length
//! prefix and are decoded one byte per character (the relay emits
//! ASCII-range names; see [`Message`]).
//!
//! WIRE LAYOUT
//! ===========
//! | Tag  | Payload                                                     |
//! |------|-------------------------------------------------------------|
//! | 0x01 | handshake: length byte, then that many UTF-8 session bytes  |
//! | 0x02 | error: remaining bytes are an opaque message                |
//! | 0x03 | lookat: 4 × f32 (x, y, z, w)                                |
//! | 0x04 | video: f32 rotation, i32 seconds, i32 length, name bytes    |
//! | 0x05 | alive: i32 length, then device-id bytes                     |
//!
//! The handshake is client→server; everything else is server→client. A
//! frame never carries an overall length prefix: each payload's fields
//! determine where it ends.

mod appointment;

pub use appointment::Appointment;

// =============================================================================
// TAGS
// =============================================================================

/// Type tag of the client→server handshake frame.
pub const TAG_HANDSHAKE: u8 = 0x01;

/// Type tag of a server-sent error frame.
pub const TAG_ERROR: u8 = 0x02;

/// Type tag of a lookat orientation frame.
pub const TAG_LOOKAT: u8 = 0x03;

/// Type tag of a video playback frame.
pub const TAG_VIDEO: u8 = 0x04;

/// Type tag of a device heartbeat frame.
pub const TAG_ALIVE: u8 = 0x05;

/// Longest session identifier the handshake frame can carry: its length
/// field is a single byte.
pub const MAX_SESSION_LEN: usize = 255;

// =============================================================================
// ERRORS
// =============================================================================

/// Error returned by [`encode_handshake`] and [`decode_message`].
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The session identifier does not fit the handshake's 1-byte length
    /// field when encoded as UTF-8.
    #[error("session identifier is {0} bytes; the handshake limit is 255")]
    SessionTooLong(usize),
    /// The type tag does not map to a known message kind. Carries the raw
    /// tag value for diagnostics.
    #[error("unknown message type: code = {0:#04x}")]
    UnknownTag(u8),
    /// The frame ends before its layout does.
    #[error("truncated frame: need {expected} bytes, have {actual}")]
    Truncated { expected: usize, actual: usize },
    /// A text field declares a negative length.
    #[error("invalid text length field: {0}")]
    InvalidLength(i32),
}

// =============================================================================
// MESSAGE MODEL
// =============================================================================

/// A decoded server→client frame. Exactly one variant per frame, chosen
/// solely by the type tag.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// Viewer orientation as a quaternion.
    Lookat { x: f32, y: f32, z: f32, w: f32 },
    /// Application-defined error payload, passed through verbatim.
    Error { payload: Vec<u8> },
    /// Playback instruction. `length` is the filename byte count as sent on
    /// the wire; the filename is decoded one byte per character.
    Video {
        rotation_y: f32,
        seconds: i32,
        length: i32,
        filename: String,
    },
    /// Device heartbeat carrying the reporting device's identifier.
    Alive { device_id: String },
}

// =============================================================================
// ENCODE
// =============================================================================

/// Encode the handshake frame for a session identifier.
///
/// Layout: tag byte, UTF-8 byte length, then the identifier bytes.
///
/// # Errors
///
/// Returns [`CodecError::SessionTooLong`] when the identifier exceeds 255
/// UTF-8 bytes. Long identifiers are never truncated.
pub fn encode_handshake(session: &str) -> Result<Vec<u8>, CodecError> {
    let bytes = session.as_bytes();
    let len = u8::try_from(bytes.len()).map_err(|_| CodecError::SessionTooLong(bytes.len()))?;

    let mut frame = Vec::with_capacity(2 + bytes.len());
    frame.push(TAG_HANDSHAKE);
    frame.push(len);
    frame.extend_from_slice(bytes);
    Ok(frame)
}

// =============================================================================
// DECODE
// =============================================================================

/// Decode one complete inbound frame into a [`Message`].
///
/// # Errors
///
/// Returns [`CodecError::UnknownTag`] for unrecognized type tags,
/// [`CodecError::Truncated`] when the buffer ends before the payload layout
/// does, and [`CodecError::InvalidLength`] for negative length fields.
pub fn decode_message(bytes: &[u8]) -> Result<Message, CodecError> {
    let Some(&tag) = bytes.first() else {
        return Err(CodecError::Truncated {
            expected: 1,
            actual: 0,
        });
    };

    match tag {
        TAG_ERROR => Ok(Message::Error {
            payload: bytes[1..].to_vec(),
        }),
        TAG_LOOKAT => Ok(Message::Lookat {
            x: read_f32(bytes, 1)?,
            y: read_f32(bytes, 5)?,
            z: read_f32(bytes, 9)?,
            w: read_f32(bytes, 13)?,
        }),
        TAG_VIDEO => {
            let length = read_i32(bytes, 9)?;
            Ok(Message::Video {
                rotation_y: read_f32(bytes, 1)?,
                seconds: read_i32(bytes, 5)?,
                length,
                filename: read_text(bytes, 13, length)?,
            })
        }
        TAG_ALIVE => {
            let length = read_i32(bytes, 1)?;
            Ok(Message::Alive {
                device_id: read_text(bytes, 5, length)?,
            })
        }
        other => Err(CodecError::UnknownTag(other)),
    }
}

fn read_fixed(bytes: &[u8], offset: usize) -> Result<[u8; 4], CodecError> {
    bytes
        .get(offset..offset + 4)
        .and_then(|field| <[u8; 4]>::try_from(field).ok())
        .ok_or(CodecError::Truncated {
            expected: offset + 4,
            actual: bytes.len(),
        })
}

fn read_f32(bytes: &[u8], offset: usize) -> Result<f32, CodecError> {
    Ok(f32::from_le_bytes(read_fixed(bytes, offset)?))
}

fn read_i32(bytes: &[u8], offset: usize) -> Result<i32, CodecError> {
    Ok(i32::from_le_bytes(read_fixed(bytes, offset)?))
}

/// Decode a length-prefixed text field one byte per character: each byte
/// becomes the code point of equal value (U+0000..U+00FF), matching the
/// deployed relay's encoding.
fn read_text(bytes: &[u8], offset: usize, length: i32) -> Result<String, CodecError> {
    let length = usize::try_from(length).map_err(|_| CodecError::InvalidLength(length))?;
    let end = offset.saturating_add(length);
    let field = bytes.get(offset..end).ok_or(CodecError::Truncated {
        expected: end,
        actual: bytes.len(),
    })?;
    Ok(field.iter().map(|&byte| char::from(byte)).collect())
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
