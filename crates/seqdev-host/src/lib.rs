//! # `seqdev-host`: the counter device over sockets
//!
//! `seqdev-host` makes a [`seqdev`] counter device reachable from other
//! processes. The server registers the device in an in-process
//! [`LocalRegistry`](seqdev::registry::LocalRegistry) and serves one session
//! per connection, over TCP or a Unix domain socket.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin seqdev-server -- --server-addr 127.0.0.1:7070
//! cargo run --bin seqdev-read -- --server-addr 127.0.0.1:7070 --sessions 3
//! ```
//!
//! ## Module Overview
//!
//! - [`common`] - Wire protocol and error definitions.
//! - [`server`] - Configuration, telemetry and connection handling.
//! - [`client`] - Reading sessions from a running server.

pub mod client;
pub mod common;
pub mod server;
