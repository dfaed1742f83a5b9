//! Response definitions
//!
//! Raw framed replies, decoded reply types and transaction outcomes.

use std::fmt;

use serde::Serialize;

use crate::error::{AdminError, Result};

/// Literal line the server sends when `maxqueue`/`shutdown` succeed
pub const OK_LINE: &str = "OK";

/// Lines of one reply, trimmed, terminator excluded, in server order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawResponse {
    lines: Vec<String>,
}

impl RawResponse {
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Last collected line, if any
    pub fn last(&self) -> Option<&str> {
        self.lines.last().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

/// One row of the `status` reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionStatus {
    pub function: String,
    pub in_queue: u64,
    pub jobs_running: u64,
    pub capable_workers: u64,
}

/// One row of the `workers` reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkerInfo {
    /// Server-local socket descriptor; meaningless outside the server process
    pub file_descriptor: u64,
    pub host: String,
    pub job_handle: String,
    /// Function list exactly as returned by the server
    pub functions: String,
}

impl WorkerInfo {
    /// Function names, split on spaces and commas
    pub fn function_names(&self) -> impl Iterator<Item = &str> {
        self.functions
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|name| !name.is_empty())
    }
}

/// An `ERR <code> <message>` reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerError {
    pub code: String,

    /// Percent-decoded message
    pub message: String,
}

impl ServerError {
    /// The code as a number, when the server sent a numeric one
    pub fn code_number(&self) -> Option<i64> {
        self.code.parse().ok()
    }
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ServerError {}

/// Why a transaction produced no reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    /// TCP connect failed or timed out; carries the system error text
    Connect { reason: String },

    /// Connected, but the stream closed or went idle before the first line
    NoResponse,
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::Connect { reason } => write!(f, "connect failed: {}", reason),
            Failure::NoResponse => f.write_str("server closed the connection without a reply"),
        }
    }
}

/// Result of a command that did not raise an error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Completed(T),
    Failed(Failure),
}

impl<T> Outcome<T> {
    pub fn is_completed(&self) -> bool {
        matches!(self, Outcome::Completed(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }

    /// The value, discarding any failure
    pub fn ok(self) -> Option<T> {
        match self {
            Outcome::Completed(value) => Some(value),
            Outcome::Failed(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Outcome::Completed(_) => None,
            Outcome::Failed(failure) => Some(failure),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Completed(value) => Outcome::Completed(f(value)),
            Outcome::Failed(failure) => Outcome::Failed(failure),
        }
    }

    /// Apply a fallible decoder to a completed value
    pub fn try_map<U>(self, f: impl FnOnce(T) -> Result<U>) -> Result<Outcome<U>> {
        match self {
            Outcome::Completed(value) => f(value).map(Outcome::Completed),
            Outcome::Failed(failure) => Ok(Outcome::Failed(failure)),
        }
    }

    /// Treat a failure as [`AdminError::Unavailable`]
    pub fn into_result(self) -> Result<T> {
        match self {
            Outcome::Completed(value) => Ok(value),
            Outcome::Failed(failure) => Err(AdminError::Unavailable(failure)),
        }
    }
}
