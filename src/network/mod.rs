//! Network Module
//!
//! TCP transport for admin commands.
//!
//! ## Model
//! - One connection per command, never reused or pooled
//! - Blocking I/O; the configured timeout bounds connect and each read/write
//! - No overall deadline: a server trickling lines can keep a call alive

mod connection;

pub use connection::Connection;
