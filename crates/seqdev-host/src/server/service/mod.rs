//! Connection handling for the counter device.
//!
//! ## Structure
//!
//! - [`handler`] - [`DeviceService`](handler::DeviceService), one session per
//!   connection.
//! - [`buffer`] - The response-side copy primitive.

pub mod buffer;
pub mod handler;
