//! Registration and lifecycle glue.
//!
//! [`CounterDevice`] brings a fresh [`Endpoint`] up under a name through a
//! host-provided [`Registrar`], and takes it down again. Only a read
//! capability is exposed to the host.

mod endpoint;
mod lifecycle;
mod registrar;

pub use endpoint::*;
pub use lifecycle::*;
pub use registrar::*;
