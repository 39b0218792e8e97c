//! TCP transport layer for HostLink communication.
//!
//! This module provides the [`TcpTransport`] struct which owns the single
//! TCP stream to a KV PLC. The transport layer is separated from the protocol
//! layer: it only knows about sockets, bytes and the CR-LF frame terminator.
//!
//! # Design
//!
//! - **Synchronous** - blocking send/receive, optional timeout
//! - **Framed** - reads are accumulated until CR-LF, so a response split
//!   across TCP segments is reassembled and bytes past the terminator are
//!   kept for the next frame
//! - **One shot** - any I/O failure breaks the session for good; there is
//!   no reconnection
//!
//! # Constants
//!
//! - [`DEFAULT_HOSTLINK_PORT`] - Default HostLink TCP port (8501)
//! - [`MAX_RESPONSE_SIZE`] - Largest accepted response frame, sized for a
//!   full batch read of 32-bit signed values
//!
//! # Example
//!
//! ```no_run
//! use kv_hostlink::TcpTransport;
//!
//! let mut transport = TcpTransport::connect("192.168.0.10", 8501, None)?;
//! let frame = transport.send_receive(b"?M\r\n")?;
//! assert!(frame.ends_with(b"\r\n"));
//! # Ok::<(), kv_hostlink::HostLinkError>(())
//! ```

use std::io::{self, Read, Write};
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

use log::{debug, trace, warn};

use crate::command::{FRAME_TERMINATOR, MAX_DEVICES_PER_COMMAND};
use crate::device::DataFormat;
use crate::error::{HostLinkError, Result};

/// Default HostLink TCP port.
pub const DEFAULT_HOSTLINK_PORT: u16 = 8501;

/// Maximum size of a single response frame, terminator included.
///
/// Fits the widest batch read: [`MAX_DEVICES_PER_COMMAND`] tokens of the
/// longest format, separated by single spaces.
pub const MAX_RESPONSE_SIZE: usize = MAX_DEVICES_PER_COMMAND as usize
    * (DataFormat::S32.max_token_len() + 1)
    - 1
    + FRAME_TERMINATOR.len();

/// Size of a single socket read.
const READ_CHUNK_SIZE: usize = 4096;

/// TCP transport for HostLink communication.
///
/// Holds one connected stream and a receive buffer. Each [`send`](Self::send)
/// is expected to be followed by exactly one [`receive`](Self::receive).
pub struct TcpTransport {
    stream: TcpStream,
    remote_addr: SocketAddr,
    buffer: Vec<u8>,
    broken: bool,
}

impl TcpTransport {
    /// Connects to a PLC.
    ///
    /// # Arguments
    ///
    /// * `host` - PLC host name or IP address
    /// * `port` - PLC port
    /// * `timeout` - Connect/read/write timeout, `None` blocks indefinitely
    ///
    /// # Errors
    ///
    /// Returns `HostLinkError::Connection` if the timeout is zero, the host
    /// cannot be resolved or no resolved address accepts the connection.
    pub fn connect(host: &str, port: u16, timeout: Option<Duration>) -> Result<Self> {
        let target = format!("{}:{}", host, port);
        if timeout == Some(Duration::ZERO) {
            return Err(HostLinkError::connection(
                target,
                io::Error::new(io::ErrorKind::InvalidInput, "timeout must be greater than zero"),
            ));
        }

        debug!("Connecting to PLC at {}", target);
        let stream = match timeout {
            Some(limit) => connect_with_timeout(&target, limit),
            None => TcpStream::connect(target.as_str()),
        }
        .map_err(|e| HostLinkError::connection(target.as_str(), e))?;

        let configure = |stream: &TcpStream| -> io::Result<SocketAddr> {
            stream.set_read_timeout(timeout)?;
            stream.set_write_timeout(timeout)?;
            stream.set_nodelay(true)?;
            stream.peer_addr()
        };
        let remote_addr =
            configure(&stream).map_err(|e| HostLinkError::connection(target.as_str(), e))?;
        debug!("Connected to PLC at {}", remote_addr);

        Ok(Self {
            stream,
            remote_addr,
            buffer: Vec::with_capacity(READ_CHUNK_SIZE),
            broken: false,
        })
    }

    /// Writes a complete command frame.
    ///
    /// # Errors
    ///
    /// Returns `HostLinkError::Disconnected` if the session is already broken,
    /// `HostLinkError::Timeout` if the write timed out, and
    /// `HostLinkError::Transport` for other I/O errors.
    pub fn send(&mut self, frame: &[u8]) -> Result<()> {
        self.ensure_usable()?;
        debug!("Sending to {}: {:?}", self.remote_addr, String::from_utf8_lossy(frame));

        let result = self
            .stream
            .write_all(frame)
            .and_then(|()| self.stream.flush());
        result.map_err(|e| self.fail(e))
    }

    /// Reads one CR-LF terminated response frame, terminator included.
    ///
    /// Blocks until the terminator has been seen. Bytes received after the
    /// terminator stay buffered for the next call.
    ///
    /// # Errors
    ///
    /// Returns:
    /// - `HostLinkError::Disconnected` if the PLC closed the connection
    /// - `HostLinkError::Timeout` if the read timed out
    /// - `HostLinkError::FrameTooLarge` if [`MAX_RESPONSE_SIZE`] bytes arrive
    ///   without a terminator
    /// - `HostLinkError::Transport` for other I/O errors
    pub fn receive(&mut self) -> Result<Vec<u8>> {
        self.ensure_usable()?;

        let mut chunk = [0u8; READ_CHUNK_SIZE];
        loop {
            if let Some(end) = find_terminator(&self.buffer) {
                let frame: Vec<u8> = self.buffer.drain(..end).collect();
                debug!(
                    "Received from {}: {:?}",
                    self.remote_addr,
                    String::from_utf8_lossy(&frame)
                );
                return Ok(frame);
            }

            let room = MAX_RESPONSE_SIZE - self.buffer.len();
            if room == 0 {
                self.mark_broken("response frame too large");
                return Err(HostLinkError::FrameTooLarge {
                    limit: MAX_RESPONSE_SIZE,
                });
            }

            // Never buffer past the limit, so the check holds however the
            // frame is segmented.
            let want = room.min(READ_CHUNK_SIZE);
            match self.stream.read(&mut chunk[..want]) {
                Ok(0) => {
                    self.mark_broken("connection closed by PLC");
                    return Err(HostLinkError::Disconnected);
                }
                Ok(n) => {
                    trace!("Read {} bytes from {}", n, self.remote_addr);
                    self.buffer.extend_from_slice(&chunk[..n]);
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(self.fail(e)),
            }
        }
    }

    /// Sends a command frame and receives its response frame.
    pub fn send_receive(&mut self, frame: &[u8]) -> Result<Vec<u8>> {
        self.send(frame)?;
        self.receive()
    }

    /// Returns the remote PLC address.
    pub fn remote_addr(&self) -> SocketAddr {
        self.remote_addr
    }

    /// Returns whether the session can still be used.
    pub fn is_connected(&self) -> bool {
        !self.broken
    }

    fn ensure_usable(&self) -> Result<()> {
        if self.broken {
            Err(HostLinkError::Disconnected)
        } else {
            Ok(())
        }
    }

    fn mark_broken(&mut self, reason: &str) {
        warn!("HostLink session to {} closed: {}", self.remote_addr, reason);
        self.broken = true;
        self.buffer.clear();
        let _ = self.stream.shutdown(std::net::Shutdown::Both);
    }

    fn fail(&mut self, e: io::Error) -> HostLinkError {
        self.mark_broken(&e.to_string());
        match e.kind() {
            io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut => HostLinkError::Timeout,
            io::ErrorKind::UnexpectedEof => HostLinkError::Disconnected,
            _ => HostLinkError::Transport(e),
        }
    }
}

fn connect_with_timeout(target: &str, timeout: Duration) -> io::Result<TcpStream> {
    let mut last_error = None;
    for addr in target.to_socket_addrs()? {
        match TcpStream::connect_timeout(&addr, timeout) {
            Ok(stream) => return Ok(stream),
            Err(e) => last_error = Some(e),
        }
    }
    Err(last_error.unwrap_or_else(|| {
        io::Error::new(io::ErrorKind::AddrNotAvailable, "host resolved to no addresses")
    }))
}

/// Returns the length of the first frame in `buffer`, CR-LF included.
fn find_terminator(buffer: &[u8]) -> Option<usize> {
    buffer
        .windows(2)
        .position(|pair| pair == b"\r\n")
        .map(|pos| pos + 2)
}

impl std::fmt::Debug for TcpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TcpTransport")
            .field("remote_addr", &self.remote_addr)
            .field("local_addr", &self.stream.local_addr().ok())
            .field("connected", &!self.broken)
            .finish()
    }
}
