//! Error types for the counter host.
//!
//! ## Error Cases
//! - `Protocol`: a peer sent a frame that does not decode.
//! - `Device`: the counter device reported an error (registration, transfer,
//!   unknown device).
//! - `Remote`: the server answered with a failure status.
//! - `Io`: the underlying socket failed.
//! - `ConnectionClosed`: the peer went away mid-exchange.

use crate::common::protocol::Status;

pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for the counter host.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A frame could not be decoded.
    #[error("Protocol error: {reason}")]
    Protocol { reason: String },

    /// The counter device failed.
    #[error("Device error: {0}")]
    Device(#[from] seqdev::Error),

    /// The server answered with a failure status.
    #[error("Server replied {status:?}: {message}")]
    Remote { status: Status, message: String },

    /// Socket failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The peer closed the connection before the exchange completed.
    #[error("Connection closed by peer")]
    ConnectionClosed,
}

impl Error {
    pub(crate) fn protocol(reason: impl Into<String>) -> Self {
        Self::Protocol {
            reason: reason.into(),
        }
    }
}
