//! An in-process host for counter endpoints.
//!
//! [`LocalRegistry`] plays the part of the host's device table: endpoints
//! are registered under a name, and [`LocalRegistry::open`] starts a
//! [`Session`] against whatever is registered there.

mod local;
mod session;

pub use local::*;
pub use session::*;
