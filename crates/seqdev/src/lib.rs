//! # `seqdev`
//!
//! A process-shared counter exposed through a character-device style read
//! protocol. Every session yields exactly one number: `0` for the first
//! session after the device comes up, then `1`, `2`, and so on. No two
//! sessions ever observe the same value, however many read concurrently.
//!
//! ## Pieces
//!
//! - [`generator`]: lock-free issuing of `0, 1, 2, ...` through a single
//!   atomic fetch-and-increment.
//! - [`session`]: the read protocol. A per-session cursor guarantees that a
//!   session draws from the generator at most once, and that every read after
//!   the delivering one is end of session.
//! - [`device`]: the endpoint handler and its init/teardown lifecycle against
//!   a host [`Registrar`](device::Registrar).
//! - [`registry`]: an in-process host that routes sessions to endpoints by
//!   name.
//!
//! ## Example
//!
//! ```
//! use seqdev::{device::CounterDevice, registry::LocalRegistry};
//!
//! let registry = LocalRegistry::new();
//! let mut device = CounterDevice::new(&registry);
//! device.init()?;
//!
//! let mut buf = [0u8; 40];
//! let mut session = registry.open("test-counter")?;
//! assert_eq!(session.read(&mut buf)?, 2);
//! assert_eq!(&buf[..2], b"0\n");
//! assert_eq!(session.read(&mut buf)?, 0);
//! # Ok::<(), seqdev::Error>(())
//! ```
//!
//! ## Lost values
//!
//! A value is issued before it is copied to the caller. If the copy fails,
//! the value is gone: the session stays open and its next read draws a new
//! number. The issued set therefore has gaps only where transfers failed.

pub mod device;
mod error;
pub mod generator;
pub mod registry;
pub mod session;

pub use crate::error::*;
