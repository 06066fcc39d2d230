//! The per-session read protocol.
//!
//! A session draws at most one value from a [`SequenceGenerator`]. The
//! [`SessionCursor`] records whether that has already happened, and
//! [`deliver`] is the only operation that moves it.
//!
//! [`SequenceGenerator`]: crate::generator::SequenceGenerator

mod buffer;
mod cursor;
mod protocol;
mod scratch;
#[cfg(test)]
mod tests;

pub use buffer::*;
pub use cursor::*;
pub use protocol::*;
pub use scratch::*;
