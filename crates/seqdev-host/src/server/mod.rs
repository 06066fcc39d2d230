//! Server-side building blocks for `seqdev-server`.
//!
//! - [`config`] - CLI and environment configuration.
//! - [`service`] - Per-connection session handling and graceful shutdown.
//! - [`telemetry`] - Log subscriber setup.

pub mod config;
pub mod service;
pub mod telemetry;
