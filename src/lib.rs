//! # gearadmin
//!
//! Client for the text administrative protocol of a Gearman job server:
//! - `status`, `workers` and `version` introspection
//! - `maxqueue` and `shutdown` control
//! - One TCP connection per command, closed before the call returns
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      AdminClient                             │
//! │        (encode request, decode reply per command)            │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                   Protocol Codec                             │
//! │      (ERR detection, `.` / blank / timeout termination)      │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                    Connection                                │
//! │          (TCP connect, write line, read lines)               │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use gearadmin::{AdminClient, Config, Outcome};
//!
//! let client = AdminClient::new(Config::new("localhost", 4730, 1.0)?);
//! match client.status()? {
//!     Outcome::Completed(functions) => {
//!         for (name, row) in &functions {
//!             println!("{} queued={}", name, row.in_queue);
//!         }
//!     }
//!     Outcome::Failed(failure) => eprintln!("server unavailable: {}", failure),
//! }
//! # Ok::<(), gearadmin::AdminError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod network;
pub mod protocol;
pub mod client;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{AdminError, Result};
pub use config::Config;
pub use client::AdminClient;
pub use protocol::{Failure, FunctionStatus, Outcome, ServerError, StatusMap, WorkerInfo};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of gearadmin
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
