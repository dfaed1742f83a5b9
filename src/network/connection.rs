//! Admin Connection
//!
//! A single-use TCP connection to the server's admin port.

use std::io::{self, BufReader, BufWriter};
use std::net::{Shutdown, SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

use crate::config::Config;
use crate::error::Result;
use crate::protocol::{read_response, write_command, Command, RawResponse};

/// One connection, used for exactly one command
pub struct Connection {
    /// TCP stream reader (buffered for line reads)
    reader: BufReader<TcpStream>,

    /// TCP stream writer
    writer: BufWriter<TcpStream>,

    /// Peer address for logging
    peer_addr: String,
}

impl Connection {
    /// Connect to the configured server
    ///
    /// Every resolved address is tried in turn with the configured timeout; the
    /// error of the last attempt is returned if none succeeds.
    pub fn open(config: &Config) -> io::Result<Self> {
        let addrs: Vec<SocketAddr> = (config.hostname(), config.port())
            .to_socket_addrs()?
            .collect();

        let mut last_err = io::Error::new(
            io::ErrorKind::AddrNotAvailable,
            format!("{} did not resolve to any address", config.address()),
        );

        for addr in addrs {
            match TcpStream::connect_timeout(&addr, config.timeout()) {
                Ok(stream) => return Self::from_stream(stream, config.timeout()),
                Err(e) => {
                    tracing::debug!("Connect to {} failed: {}", addr, e);
                    last_err = e;
                }
            }
        }

        Err(last_err)
    }

    /// Wrap an already connected stream, applying read/write timeouts
    pub fn from_stream(stream: TcpStream, timeout: Duration) -> io::Result<Self> {
        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        // Requests are a single short line
        stream.set_nodelay(true)?;
        stream.set_read_timeout(Some(timeout))?;
        stream.set_write_timeout(Some(timeout))?;

        // Clone stream for separate read/write handles
        let read_stream = stream.try_clone()?;
        let write_stream = stream;

        tracing::debug!("Connected to {}", peer_addr);

        Ok(Self {
            reader: BufReader::new(read_stream),
            writer: BufWriter::new(write_stream),
            peer_addr,
        })
    }

    /// Send the command line
    pub fn send(&mut self, command: &Command) -> Result<()> {
        tracing::trace!("Sending {:?} to {}", command.to_line(), self.peer_addr);
        write_command(&mut self.writer, command)
    }

    /// Read the framed reply
    ///
    /// `Ok(None)` means the server sent nothing before closing or going idle.
    pub fn receive(&mut self) -> Result<Option<RawResponse>> {
        read_response(&mut self.reader)
    }

    /// Send a command and read its reply
    pub fn exchange(&mut self, command: &Command) -> Result<Option<RawResponse>> {
        self.send(command)?;
        self.receive()
    }

    /// Close both directions of the socket
    pub fn close(self) {
        match self.writer.get_ref().shutdown(Shutdown::Both) {
            Ok(()) => tracing::debug!("Closed connection to {}", self.peer_addr),
            // The server may already have hung up
            Err(e) if e.kind() == io::ErrorKind::NotConnected => {
                tracing::debug!("Connection to {} already closed by peer", self.peer_addr)
            }
            Err(e) => tracing::debug!("Error closing connection to {}: {}", self.peer_addr, e),
        }
    }
}
