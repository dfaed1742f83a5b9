//! Command definitions
//!
//! Represents the admin requests a client can send.

use std::fmt;

use crate::error::{AdminError, Result};

/// Command types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandType {
    Status,
    Version,
    Workers,
    MaxQueue,
    Shutdown,
}

impl CommandType {
    /// Keyword that starts the request line
    pub fn keyword(&self) -> &'static str {
        match self {
            CommandType::Status => "status",
            CommandType::Version => "version",
            CommandType::Workers => "workers",
            CommandType::MaxQueue => "maxqueue",
            CommandType::Shutdown => "shutdown",
        }
    }
}

/// An admin command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List registered functions with queue/running/worker counts
    Status,

    /// Server version
    Version,

    /// List connected workers and their functions
    Workers,

    /// Set the maximum queue size of a function.
    ///
    /// `None` sends an empty size token, which the server reads as "use the
    /// default". A negative size means unlimited.
    MaxQueue { function: String, size: Option<i64> },

    /// Shut the server down, optionally letting existing connections finish
    Shutdown { graceful: bool },
}

impl Command {
    /// Build a validated `maxqueue` command
    pub fn max_queue(function: impl Into<String>, size: Option<i64>) -> Result<Self> {
        let function = function.into();
        validate_function_name(&function)?;
        Ok(Command::MaxQueue { function, size })
    }

    /// Get the command type
    pub fn command_type(&self) -> CommandType {
        match self {
            Command::Status => CommandType::Status,
            Command::Version => CommandType::Version,
            Command::Workers => CommandType::Workers,
            Command::MaxQueue { .. } => CommandType::MaxQueue,
            Command::Shutdown { .. } => CommandType::Shutdown,
        }
    }

    /// The request line, without the trailing newline
    pub fn to_line(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyword = self.command_type().keyword();
        match self {
            Command::MaxQueue { function, size } => match size {
                Some(size) => write!(f, "{} {} {}", keyword, function, size),
                None => write!(f, "{} {} ", keyword, function),
            },
            Command::Shutdown { graceful: true } => write!(f, "{} graceful", keyword),
            _ => f.write_str(keyword),
        }
    }
}

/// A function name must fit in a single whitespace-delimited token
pub fn validate_function_name(function: &str) -> Result<()> {
    if function.is_empty() {
        return Err(AdminError::InvalidArgument(
            "function name must not be empty".to_string(),
        ));
    }
    if function
        .chars()
        .any(|c| c.is_whitespace() || c.is_control())
    {
        return Err(AdminError::InvalidArgument(format!(
            "function name {:?} contains whitespace or control characters",
            function
        )));
    }
    Ok(())
}
