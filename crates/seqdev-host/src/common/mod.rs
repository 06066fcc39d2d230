//! Definitions shared by the server and the client.

pub mod error;
pub mod protocol;
