//! High-level HostLink client for communicating with KV PLCs.
//!
//! This module provides the [`Client`] struct, which is the primary interface
//! for communicating with KEYENCE KV PLCs over the HostLink protocol.
//!
//! # Overview
//!
//! Every operation is encode → send → receive → decode → map:
//! - Command construction via the command structs
//! - Exactly one response frame read per command
//! - Mapping of the response into a confirmation, raw text or a typed value
//!
//! # Example
//!
//! ```no_run
//! use kv_hostlink::{Client, ClientConfig, DataFormat, DeviceAddress, OperationMode};
//!
//! let mut client = Client::new(ClientConfig::new("192.168.0.10"))?;
//!
//! // PLC control
//! let mode = client.confirm_mode()?;
//! if mode == OperationMode::Program {
//!     client.change_mode(OperationMode::Run)?;
//! }
//!
//! // Raw device access
//! let dm100: DeviceAddress = "DM100".parse()?;
//! let text = client.read(dm100, None)?;
//! let accepted = client.write(dm100, 42, Some(DataFormat::U16))?;
//!
//! // Typed helpers
//! let counter: i32 = client.read_i32(dm100)?;
//! # Ok::<(), kv_hostlink::HostLinkError>(())
//! ```
//!
//! # Thread Safety
//!
//! Operations take `&mut self`, so one client runs one exchange at a time.
//! To share a client between threads, wrap it in a `Mutex`.

use std::net::SocketAddr;
use std::time::Duration;

use log::debug;

use crate::command::{
    ChangeModeCommand, ForcedResetCommand, ForcedSetCommand, QueryModeCommand, QueryModelCommand,
    ReadBatchCommand, ReadCommand, WriteBatchCommand, WriteCommand,
};
use crate::device::{DataFormat, DeviceAddress};
use crate::error::{hostlink_error_description, HostLinkError, Result};
use crate::plc::{ForcedSetMode, OperationMode, PlcModel};
use crate::response::Response;
use crate::transport::{TcpTransport, DEFAULT_HOSTLINK_PORT};
use crate::utils::{parse_bit, parse_token, parse_tokens};

/// Factory default IP address of a KV PLC Ethernet port.
pub const DEFAULT_PLC_HOST: &str = "192.168.0.10";

/// Configuration for creating a HostLink client.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClientConfig {
    /// PLC IP address or hostname.
    pub host: String,
    /// PLC port.
    pub port: u16,
    /// Connect/read/write timeout. `None` blocks indefinitely.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    /// Creates a new client configuration for the given host.
    ///
    /// Uses the default port (8501) and no timeout.
    ///
    /// # Example
    ///
    /// ```
    /// use kv_hostlink::ClientConfig;
    ///
    /// let config = ClientConfig::new("192.168.0.10");
    /// assert_eq!(config.port, 8501);
    /// ```
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: DEFAULT_HOSTLINK_PORT,
            timeout: None,
        }
    }

    /// Sets a custom PLC port (default is 8501).
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets a timeout for connecting and for every read and write.
    ///
    /// # Example
    ///
    /// ```
    /// use kv_hostlink::ClientConfig;
    /// use std::time::Duration;
    ///
    /// let config = ClientConfig::new("192.168.0.10")
    ///     .with_timeout(Duration::from_secs(2));
    /// assert_eq!(config.timeout, Some(Duration::from_secs(2)));
    /// ```
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl Default for ClientConfig {
    /// Factory default PLC address, port 8501, no timeout.
    fn default() -> Self {
        Self::new(DEFAULT_PLC_HOST)
    }
}

/// HostLink client for communicating with KV PLCs.
///
/// Owns one TCP connection. Each operation produces exactly 1 request and
/// 1 response. No automatic retries, caching, or reconnection: once a
/// transport error occurs every later call fails with
/// [`HostLinkError::Disconnected`] and a new client must be created.
pub struct Client {
    transport: TcpTransport,
}

impl Client {
    /// Connects to the PLC described by `config`.
    ///
    /// # Errors
    ///
    /// Returns `HostLinkError::Connection` if the connection cannot be made.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = TcpTransport::connect(&config.host, config.port, config.timeout)?;
        Ok(Self { transport })
    }

    fn exchange(&mut self, frame: &[u8]) -> Result<Response> {
        let raw = self.transport.send_receive(frame)?;
        Response::from_bytes(&raw)
    }

    fn confirm(&mut self, frame: &[u8]) -> Result<bool> {
        let response = self.exchange(frame)?;
        if response.is_ok() {
            return Ok(true);
        }

        match response.error_code() {
            Some(code) => debug!(
                "PLC rejected command with {} ({})",
                code,
                hostlink_error_description(code).unwrap_or("undocumented error")
            ),
            None => debug!("PLC rejected command: {:?}", response.scalar()),
        }
        Ok(false)
    }

    /// Switches the PLC between PROGRAM and RUN.
    ///
    /// Returns `true` if the PLC answered `OK`.
    pub fn change_mode(&mut self, mode: OperationMode) -> Result<bool> {
        self.confirm(&ChangeModeCommand::new(mode).to_bytes())
    }

    /// Reads the current operation mode.
    ///
    /// # Errors
    ///
    /// Returns `HostLinkError::UnknownMode` if the PLC answers a code other
    /// than 0 or 1. The session stays usable.
    pub fn confirm_mode(&mut self) -> Result<OperationMode> {
        self.exchange(&QueryModeCommand.to_bytes())?.to_mode()
    }

    /// Reads the PLC model.
    ///
    /// # Errors
    ///
    /// Returns `HostLinkError::UnknownModel` if the model code is not in the
    /// model table. The session stays usable.
    pub fn query_model(&mut self) -> Result<PlcModel> {
        self.exchange(&QueryModelCommand.to_bytes())?.to_model()
    }

    /// Forces a bit device ON.
    ///
    /// Applies to R, MR, LR, CR, T, C, CTC and VB devices.
    pub fn forced_set(&mut self, mode: ForcedSetMode, address: DeviceAddress) -> Result<bool> {
        self.confirm(&ForcedSetCommand::new(mode, address).to_bytes())
    }

    /// Forces a bit device OFF.
    pub fn forced_reset(&mut self, mode: ForcedSetMode, address: DeviceAddress) -> Result<bool> {
        self.confirm(&ForcedResetCommand::new(mode, address).to_bytes())
    }

    /// Reads one device and returns the raw token.
    ///
    /// `format` defaults to [`DataFormat::U16`] and is not sent for bit devices.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use kv_hostlink::{Client, ClientConfig};
    ///
    /// let mut client = Client::new(ClientConfig::default())?;
    /// let value = client.read("DM100".parse()?, None)?;
    /// println!("DM100 = {}", value);
    /// # Ok::<(), kv_hostlink::HostLinkError>(())
    /// ```
    pub fn read(&mut self, address: DeviceAddress, format: Option<DataFormat>) -> Result<String> {
        let cmd = ReadCommand::new(address, format.unwrap_or_default());
        Ok(self.exchange(&cmd.to_bytes())?.into_text())
    }

    /// Reads `length` consecutive devices and returns the raw tokens in order.
    ///
    /// # Errors
    ///
    /// Returns `HostLinkError::InvalidParameter` if length is 0 or exceeds
    /// [`MAX_DEVICES_PER_COMMAND`](crate::MAX_DEVICES_PER_COMMAND).
    pub fn read_batch(
        &mut self,
        address: DeviceAddress,
        length: u16,
        format: Option<DataFormat>,
    ) -> Result<Vec<String>> {
        let cmd = ReadBatchCommand::new(address, format.unwrap_or_default(), length)?;
        Ok(self.exchange(&cmd.to_bytes())?.tokens())
    }

    /// Writes one device.
    ///
    /// The value is sent as rendered by `Display`; it is not range-checked
    /// against `format`, which defaults to [`DataFormat::U16`].
    pub fn write(
        &mut self,
        address: DeviceAddress,
        value: impl std::fmt::Display,
        format: Option<DataFormat>,
    ) -> Result<bool> {
        let cmd = WriteCommand::new(address, format.unwrap_or_default(), value);
        self.confirm(&cmd.to_bytes())
    }

    /// Writes `length` consecutive devices from pre-rendered values.
    ///
    /// # Errors
    ///
    /// Returns `HostLinkError::InvalidParameter` if length is out of range or
    /// differs from the number of values.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use kv_hostlink::{Client, ClientConfig, DataFormat};
    ///
    /// let mut client = Client::new(ClientConfig::default())?;
    /// client.write_batch("DM200".parse()?, DataFormat::U16, 3, &["1", "2", "3"])?;
    /// # Ok::<(), kv_hostlink::HostLinkError>(())
    /// ```
    pub fn write_batch<S: AsRef<str>>(
        &mut self,
        address: DeviceAddress,
        format: DataFormat,
        length: u16,
        values: &[S],
    ) -> Result<bool> {
        let cmd = WriteBatchCommand::new(address, format, length, values)?;
        self.confirm(&cmd.to_bytes())
    }

    /// Reads a bit device.
    ///
    /// # Errors
    ///
    /// Returns `HostLinkError::InvalidAddress` for word devices and
    /// `HostLinkError::InvalidResponse` if the PLC answers anything but 0 or 1.
    pub fn read_bit(&mut self, address: DeviceAddress) -> Result<bool> {
        check_bit_device(address)?;
        parse_bit(&self.read(address, None)?)
    }

    /// Reads `length` consecutive bit devices.
    pub fn read_bits(&mut self, address: DeviceAddress, length: u16) -> Result<Vec<bool>> {
        check_bit_device(address)?;
        self.read_batch(address, length, None)?
            .iter()
            .map(|token| parse_bit(token))
            .collect()
    }

    /// Reads an unsigned 16-bit value (`.U`).
    pub fn read_u16(&mut self, address: DeviceAddress) -> Result<u16> {
        parse_token(&self.read(address, Some(DataFormat::U16))?)
    }

    /// Reads a signed 16-bit value (`.S`).
    pub fn read_i16(&mut self, address: DeviceAddress) -> Result<i16> {
        parse_token(&self.read(address, Some(DataFormat::S16))?)
    }

    /// Reads an unsigned 32-bit value (`.D`) from two consecutive words.
    pub fn read_u32(&mut self, address: DeviceAddress) -> Result<u32> {
        parse_token(&self.read(address, Some(DataFormat::U32))?)
    }

    /// Reads a signed 32-bit value (`.L`) from two consecutive words.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use kv_hostlink::{Client, ClientConfig};
    ///
    /// let mut client = Client::new(ClientConfig::default())?;
    /// let position: i32 = client.read_i32("DM300".parse()?)?;
    /// # Ok::<(), kv_hostlink::HostLinkError>(())
    /// ```
    pub fn read_i32(&mut self, address: DeviceAddress) -> Result<i32> {
        parse_token(&self.read(address, Some(DataFormat::S32))?)
    }

    /// Reads consecutive unsigned 16-bit values.
    pub fn read_u16s(&mut self, address: DeviceAddress, length: u16) -> Result<Vec<u16>> {
        let tokens = self.read_batch(address, length, Some(DataFormat::U16))?;
        parse_tokens(&tokens[..])
    }

    /// Writes an unsigned 16-bit value (`.U`).
    pub fn write_u16(&mut self, address: DeviceAddress, value: u16) -> Result<bool> {
        self.write(address, value, Some(DataFormat::U16))
    }

    /// Writes a signed 16-bit value (`.S`).
    pub fn write_i16(&mut self, address: DeviceAddress, value: i16) -> Result<bool> {
        self.write(address, value, Some(DataFormat::S16))
    }

    /// Writes an unsigned 32-bit value (`.D`).
    pub fn write_u32(&mut self, address: DeviceAddress, value: u32) -> Result<bool> {
        self.write(address, value, Some(DataFormat::U32))
    }

    /// Writes a signed 32-bit value (`.L`).
    pub fn write_i32(&mut self, address: DeviceAddress, value: i32) -> Result<bool> {
        self.write(address, value, Some(DataFormat::S32))
    }

    /// Returns the remote PLC address.
    pub fn remote_addr(&self) -> SocketAddr {
        self.transport.remote_addr()
    }

    /// Returns whether the connection is still usable.
    pub fn is_connected(&self) -> bool {
        self.transport.is_connected()
    }
}

fn check_bit_device(address: DeviceAddress) -> Result<()> {
    if address.device().requires_format_suffix() {
        return Err(HostLinkError::invalid_address(format!(
            "{} is not a bit device",
            address.device()
        )));
    }
    Ok(())
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("transport", &self.transport)
            .finish()
    }
}
