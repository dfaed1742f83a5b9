//! Admin Client
//!
//! Runs admin commands against a job server, one connection per command.
//!
//! ## Transaction
//! ```text
//! Idle → Connecting ─┬─ ConnectFailed            → Outcome::Failed(Connect)
//!                    └─ Connected → Writing ─┬─ WriteFailed   → Err(Transport)
//!                                            └─ AwaitingFirstLine ─┬─ ErrorLine  → Err(Server)
//!                                                                  ├─ NoResponse → Outcome::Failed(NoResponse)
//!                                                                  └─ Collecting → Outcome::Completed
//! ```
//! The socket is closed on every path once connected.

use crate::config::Config;
use crate::error::Result;
use crate::network::Connection;
use crate::protocol::{
    decode_ok, decode_status, decode_version, decode_workers, Command, Failure, Outcome,
    RawResponse, StatusMap, WorkerInfo,
};

/// Client for the text admin protocol
///
/// Holds only configuration; every call opens and closes its own connection, so
/// a shared `&AdminClient` may be used from several threads at once.
#[derive(Debug, Clone, Default)]
pub struct AdminClient {
    config: Config,
}

impl AdminClient {
    /// Create a client for the given server
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Reconfigure between transactions; the setters validate
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    // =========================================================================
    // Commands
    // =========================================================================

    /// Registered functions with queued, running and capable-worker counts
    pub fn status(&self) -> Result<Outcome<StatusMap>> {
        Ok(self
            .transact(&Command::Status)?
            .map(|reply| decode_status(reply.lines())))
    }

    /// Server version string
    pub fn version(&self) -> Result<Outcome<String>> {
        self.transact(&Command::Version)?
            .try_map(|reply| decode_version(reply.lines()))
    }

    /// Connected workers and the functions they can run
    pub fn workers(&self) -> Result<Outcome<Vec<WorkerInfo>>> {
        Ok(self
            .transact(&Command::Workers)?
            .map(|reply| decode_workers(reply.lines())))
    }

    /// Set the maximum queue size of `function`; `true` iff the server replied `OK`
    ///
    /// `None` leaves the size token empty so the server applies its default;
    /// a negative size makes the queue unlimited.
    pub fn max_queue(&self, function: &str, size: Option<i64>) -> Result<Outcome<bool>> {
        let command = Command::max_queue(function, size)?;
        Ok(self
            .transact(&command)?
            .map(|reply| decode_ok(reply.lines())))
    }

    /// Shut the server down; `true` iff the server replied `OK`
    pub fn shutdown(&self, graceful: bool) -> Result<Outcome<bool>> {
        Ok(self
            .transact(&Command::Shutdown { graceful })?
            .map(|reply| decode_ok(reply.lines())))
    }

    // =========================================================================
    // Transaction
    // =========================================================================

    /// Run one command over a fresh connection and return the framed reply
    pub fn transact(&self, command: &Command) -> Result<Outcome<RawResponse>> {
        let config = self.config.clone();
        let mut conn = match Connection::open(&config) {
            Ok(conn) => conn,
            Err(e) => {
                tracing::debug!("Could not connect to {}: {}", config.address(), e);
                return Ok(Outcome::Failed(Failure::Connect {
                    reason: e.to_string(),
                }));
            }
        };

        let result = conn.exchange(command);
        conn.close();

        match result {
            Ok(Some(reply)) => {
                tracing::debug!(
                    "{} on {} returned {} line(s)",
                    command.command_type().keyword(),
                    config.address(),
                    reply.len()
                );
                Ok(Outcome::Completed(reply))
            }
            Ok(None) => {
                tracing::warn!(
                    "{} on {}: no response",
                    command.command_type().keyword(),
                    config.address()
                );
                Ok(Outcome::Failed(Failure::NoResponse))
            }
            Err(e) => {
                tracing::debug!(
                    "{} on {} failed: {}",
                    command.command_type().keyword(),
                    config.address(),
                    e
                );
                Err(e)
            }
        }
    }
}
