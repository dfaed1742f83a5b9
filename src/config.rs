//! Configuration for gearadmin
//!
//! Connection parameters with sensible defaults. Every setter validates its
//! input and leaves the config untouched when the value is rejected.

use std::time::Duration;

use crate::error::{AdminError, Result};

/// Default server hostname
pub const DEFAULT_HOSTNAME: &str = "localhost";

/// Default admin port of gearmand
pub const DEFAULT_PORT: u16 = 4730;

/// Default connect/read timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

/// Connection parameters for one admin client
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Hostname or IP address of the server
    hostname: String,

    /// TCP port of the server
    port: u16,

    /// Applied to connect and to every single read/write
    timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hostname: DEFAULT_HOSTNAME.to_string(),
            port: DEFAULT_PORT,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl Config {
    /// Create a validated config; `timeout_secs` may be fractional
    pub fn new(hostname: impl Into<String>, port: u16, timeout_secs: f64) -> Result<Self> {
        let mut config = Config::default();
        config
            .set_hostname(hostname)?
            .set_port(port)?
            .set_timeout_secs(timeout_secs)?;
        Ok(config)
    }

    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Set the server hostname (must not be empty)
    pub fn set_hostname(&mut self, hostname: impl Into<String>) -> Result<&mut Self> {
        let hostname = hostname.into();
        validate_hostname(&hostname)?;
        self.hostname = hostname;
        Ok(self)
    }

    /// Set the server port (must not be 0)
    pub fn set_port(&mut self, port: u16) -> Result<&mut Self> {
        validate_port(port)?;
        self.port = port;
        Ok(self)
    }

    /// Set the timeout (must not be zero)
    pub fn set_timeout(&mut self, timeout: Duration) -> Result<&mut Self> {
        validate_timeout(timeout)?;
        self.timeout = timeout;
        Ok(self)
    }

    /// Set the timeout in seconds (must be positive and finite)
    pub fn set_timeout_secs(&mut self, secs: f64) -> Result<&mut Self> {
        let timeout = timeout_from_secs(secs)?;
        self.set_timeout(timeout)
    }

    /// `hostname:port`, for logging
    pub fn address(&self) -> String {
        format!("{}:{}", self.hostname, self.port)
    }
}

/// Builder for Config
///
/// Values are collected as given and validated together in [`build`](Self::build).
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    hostname: Option<String>,
    port: Option<u16>,
    timeout: Option<Duration>,
    timeout_secs: Option<f64>,
}

impl ConfigBuilder {
    /// Set the server hostname
    pub fn hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = Some(hostname.into());
        self
    }

    /// Set the server port
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set the timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self.timeout_secs = None;
        self
    }

    /// Set the timeout in seconds
    pub fn timeout_secs(mut self, secs: f64) -> Self {
        self.timeout_secs = Some(secs);
        self.timeout = None;
        self
    }

    pub fn build(self) -> Result<Config> {
        let mut config = Config::default();
        if let Some(hostname) = self.hostname {
            config.set_hostname(hostname)?;
        }
        if let Some(port) = self.port {
            config.set_port(port)?;
        }
        if let Some(timeout) = self.timeout {
            config.set_timeout(timeout)?;
        }
        if let Some(secs) = self.timeout_secs {
            config.set_timeout_secs(secs)?;
        }
        Ok(config)
    }
}

// =============================================================================
// Validation
// =============================================================================

fn validate_hostname(hostname: &str) -> Result<()> {
    if hostname.trim().is_empty() {
        return Err(AdminError::Config(
            "expected hostname to be a non-empty string".to_string(),
        ));
    }
    Ok(())
}

fn validate_port(port: u16) -> Result<()> {
    if port == 0 {
        return Err(AdminError::Config(
            "expected port to be a positive number".to_string(),
        ));
    }
    Ok(())
}

fn validate_timeout(timeout: Duration) -> Result<()> {
    if timeout.is_zero() {
        return Err(AdminError::Config(
            "expected timeout to be a positive number".to_string(),
        ));
    }
    Ok(())
}

fn timeout_from_secs(secs: f64) -> Result<Duration> {
    if !secs.is_finite() || secs <= 0.0 {
        return Err(AdminError::Config(format!(
            "expected timeout to be a positive number of seconds, got {}",
            secs
        )));
    }
    Duration::try_from_secs_f64(secs)
        .map_err(|e| AdminError::Config(format!("timeout out of range: {}", e)))
}
