//! Error types surfaced by the counter device.
//!
//! Nothing here is retried or recovered internally. Every error is handed back
//! to the immediate caller of the operation that produced it.
//!
//! ## Error Cases
//! - [`TransferError`]: the caller's buffer could not accept the formatted
//!   value. Returned per read.
//! - [`RegistrationError`]: the host refused to bind the endpoint name.
//!   Fatal to [`CounterDevice::init`].
//! - [`Error`]: the crate-wide union of the above, plus lookups of devices
//!   that are not registered.
//!
//! End of session is not an error: a read on an exhausted session returns
//! `Ok(0)`.
//!
//! [`CounterDevice::init`]: crate::device::CounterDevice::init

/// A result type defaulting to the crate-wide [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All error variants that `seqdev` can emit.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The endpoint could not be bound under `name` during initialization.
    #[error("failed to register endpoint `{name}`: {source}")]
    Registration {
        /// The endpoint name that was being registered.
        name: String,
        /// Why the host refused the registration.
        source: RegistrationError,
    },

    /// The caller-provided destination could not accept the formatted bytes.
    #[error(transparent)]
    Transfer(#[from] TransferError),

    /// No endpoint is registered under the requested name.
    #[error("no device registered as `{0}`")]
    NoSuchDevice(String),
}

/// Failure of the copy from the internal scratch buffer into the caller's
/// buffer.
///
/// The sequence value drawn for the failed read has already been issued and
/// is not handed out again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum TransferError {
    /// The destination is not accessible to the writer.
    #[error("destination buffer is not accessible")]
    Inaccessible,

    /// The destination refused the write.
    #[error("destination buffer rejected the write")]
    Rejected,
}

/// Reasons a host may refuse to register an endpoint.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum RegistrationError {
    /// Another endpoint already owns the name.
    #[error("name is already registered")]
    NameTaken,

    /// The name is empty or contains a path separator.
    #[error("name is not a valid device name")]
    InvalidName,

    /// Host-specific failure.
    #[error("{0}")]
    Host(String),
}
