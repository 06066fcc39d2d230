//! Wire protocol between `seqdev-read` and `seqdev-server`.
//!
//! Every message travels in one frame of a
//! [`LengthDelimitedCodec`](tokio_util::codec::LengthDelimitedCodec) stream
//! (4-byte big-endian length prefix). One connection is one session.
//!
//! ## Requests
//! - `0x01 Open`: followed by the UTF-8 device name. Must be the first frame.
//! - `0x02 Read`: followed by the caller's buffer capacity as a big-endian
//!   `u32`.
//!
//! ## Responses
//! One status byte followed by a payload. For [`Status::Ok`] the payload is
//! the bytes read (empty on `Open` acknowledgement and at end of session).
//! For any other status the payload is a UTF-8 message.

use bytes::{Buf, BufMut, Bytes, BytesMut};
use tokio_util::codec::LengthDelimitedCodec;

use crate::common::error::{Error, Result};

const TAG_OPEN: u8 = 0x01;
const TAG_READ: u8 = 0x02;

/// Largest request frame the server accepts. Device names are short.
pub const MAX_REQUEST_LEN: usize = 1024;

/// Builds the frame codec used on both ends.
pub fn codec(max_frame_length: usize) -> LengthDelimitedCodec {
    LengthDelimitedCodec::builder()
        .max_frame_length(max_frame_length)
        .new_codec()
}

/// A client request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Opens a session on the named device.
    Open { name: String },
    /// Reads up to `capacity` bytes from the open session.
    Read { capacity: u32 },
}

impl Request {
    pub fn encode(&self) -> Bytes {
        match self {
            Self::Open { name } => {
                let mut buf = BytesMut::with_capacity(1 + name.len());
                buf.put_u8(TAG_OPEN);
                buf.put_slice(name.as_bytes());
                buf.freeze()
            }
            Self::Read { capacity } => {
                let mut buf = BytesMut::with_capacity(5);
                buf.put_u8(TAG_READ);
                buf.put_u32(*capacity);
                buf.freeze()
            }
        }
    }

    /// # Errors
    /// Returns [`Error::Protocol`] for an unknown tag, a non-UTF-8 name or a
    /// truncated capacity.
    pub fn decode(mut frame: &[u8]) -> Result<Self> {
        if !frame.has_remaining() {
            return Err(Error::protocol("empty request frame"));
        }
        match frame.get_u8() {
            TAG_OPEN => {
                let name = core::str::from_utf8(frame)
                    .map_err(|_| Error::protocol("device name is not UTF-8"))?;
                Ok(Self::Open {
                    name: name.to_owned(),
                })
            }
            TAG_READ => {
                if frame.len() != 4 {
                    return Err(Error::protocol("read request must carry a u32 capacity"));
                }
                Ok(Self::Read {
                    capacity: frame.get_u32(),
                })
            }
            tag => Err(Error::protocol(format!("unknown request tag {tag:#04x}"))),
        }
    }
}

/// Outcome of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Status {
    /// The request succeeded.
    Ok = 0x00,
    /// The session's value could not be copied out.
    TransferFailed = 0x01,
    /// No device is registered under the requested name.
    NoSuchDevice = 0x02,
    /// The request was malformed or out of order.
    BadRequest = 0x03,
}

impl TryFrom<u8> for Status {
    type Error = Error;

    fn try_from(byte: u8) -> Result<Self> {
        match byte {
            0x00 => Ok(Self::Ok),
            0x01 => Ok(Self::TransferFailed),
            0x02 => Ok(Self::NoSuchDevice),
            0x03 => Ok(Self::BadRequest),
            other => Err(Error::protocol(format!("unknown status {other:#04x}"))),
        }
    }
}

/// A server response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: Status,
    pub payload: Bytes,
}

impl Response {
    /// A successful response carrying `payload`.
    pub fn ok(payload: Bytes) -> Self {
        Self {
            status: Status::Ok,
            payload,
        }
    }

    /// A failure response with a human-readable message.
    pub fn failure(status: Status, message: impl Into<String>) -> Self {
        Self {
            status,
            payload: Bytes::from(message.into()),
        }
    }

    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(1 + self.payload.len());
        buf.put_u8(self.status as u8);
        buf.put_slice(&self.payload);
        buf.freeze()
    }

    /// # Errors
    /// Returns [`Error::Protocol`] for an empty frame or unknown status.
    pub fn decode(mut frame: Bytes) -> Result<Self> {
        if !frame.has_remaining() {
            return Err(Error::protocol("empty response frame"));
        }
        let status = Status::try_from(frame.get_u8())?;
        Ok(Self {
            status,
            payload: frame,
        })
    }

    /// Converts a failure status into [`Error::Remote`].
    ///
    /// # Errors
    /// Returns [`Error::Remote`] unless the status is [`Status::Ok`].
    pub fn into_payload(self) -> Result<Bytes> {
        match self.status {
            Status::Ok => Ok(self.payload),
            status => Err(Error::Remote {
                status,
                message: String::from_utf8_lossy(&self.payload).into_owned(),
            }),
        }
    }
}
