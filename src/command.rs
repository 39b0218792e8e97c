//! HostLink command structures and encoding.
//!
//! This module contains all HostLink commands that can be sent to a PLC.
//! Each command renders its own ASCII frame, always terminated by CR-LF.
//!
//! # Command Types
//!
//! ## PLC Control
//! - [`ChangeModeCommand`] - `M<code>`, switch between PROGRAM and RUN
//! - [`QueryModeCommand`] - `?M`, read the current mode
//! - [`QueryModelCommand`] - `?K `, read the PLC model code
//!
//! ## Forced I/O
//! - [`ForcedSetCommand`] - `ST` / `STS`
//! - [`ForcedResetCommand`] - `RS` / `RSS`
//!
//! ## Device Access
//! - [`ReadCommand`] - `RD`, read one device
//! - [`ReadBatchCommand`] - `RDS`, read consecutive devices
//! - [`WriteCommand`] - `WR`, write one device
//! - [`WriteBatchCommand`] - `WRS`, write consecutive devices
//!
//! # Example
//!
//! ```
//! use kv_hostlink::{DataFormat, DeviceAddress, WriteCommand};
//!
//! let addr: DeviceAddress = "DM100".parse().unwrap();
//! let cmd = WriteCommand::new(addr, DataFormat::U16, 42);
//! assert_eq!(cmd.encode(), "WR DM100.U 42\r\n");
//! ```
//!
//! Values are never range-checked here: the caller picks a [`DataFormat`]
//! that matches the value it writes.

use crate::device::{DataFormat, DeviceAddress};
use crate::error::{HostLinkError, Result};
use crate::plc::{ForcedSetMode, OperationMode};

/// Line terminator of every command and response frame.
pub const FRAME_TERMINATOR: &str = "\r\n";

/// Maximum number of devices in a single batch read/write.
pub const MAX_DEVICES_PER_COMMAND: u16 = 1000;

fn frame(body: &str) -> String {
    let mut out = String::with_capacity(body.len() + FRAME_TERMINATOR.len());
    out.push_str(body);
    out.push_str(FRAME_TERMINATOR);
    out
}

/// Renders an address with its format suffix when the device takes one.
fn read_operand(address: DeviceAddress, format: DataFormat) -> String {
    if address.device().requires_format_suffix() {
        format!("{}{}", address, format.suffix())
    } else {
        address.to_string()
    }
}

fn check_count(count: u16) -> Result<()> {
    if count == 0 {
        return Err(HostLinkError::invalid_parameter(
            "length",
            "must be greater than 0",
        ));
    }
    if count > MAX_DEVICES_PER_COMMAND {
        return Err(HostLinkError::invalid_parameter(
            "length",
            format!("must not exceed {}", MAX_DEVICES_PER_COMMAND),
        ));
    }
    Ok(())
}

/// Command for switching the PLC operation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeModeCommand {
    mode: OperationMode,
}

impl ChangeModeCommand {
    /// Creates a new change mode command.
    ///
    /// # Example
    ///
    /// ```
    /// use kv_hostlink::{ChangeModeCommand, OperationMode};
    ///
    /// assert_eq!(ChangeModeCommand::new(OperationMode::Run).encode(), "M1\r\n");
    /// ```
    pub fn new(mode: OperationMode) -> Self {
        Self { mode }
    }

    /// Encodes the command frame.
    pub fn encode(&self) -> String {
        frame(&format!("M{}", self.mode.code()))
    }

    /// Encodes the command frame to bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.encode().into_bytes()
    }
}

/// Command for reading the current operation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QueryModeCommand;

impl QueryModeCommand {
    /// Encodes the command frame.
    pub fn encode(&self) -> String {
        frame("?M")
    }

    /// Encodes the command frame to bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.encode().into_bytes()
    }
}

/// Command for reading the PLC model code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QueryModelCommand;

impl QueryModelCommand {
    /// Encodes the command frame. The space before CR-LF is part of the command.
    pub fn encode(&self) -> String {
        frame("?K ")
    }

    /// Encodes the command frame to bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.encode().into_bytes()
    }
}

/// Command for forcing a bit device ON.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForcedSetCommand {
    mode: ForcedSetMode,
    address: DeviceAddress,
}

impl ForcedSetCommand {
    /// Creates a new forced set command.
    ///
    /// # Example
    ///
    /// ```
    /// use kv_hostlink::{DeviceAddress, DeviceType, ForcedSetCommand, ForcedSetMode};
    ///
    /// let addr = DeviceAddress::new(DeviceType::MR, 10);
    /// let cmd = ForcedSetCommand::new(ForcedSetMode::Continuous, addr);
    /// assert_eq!(cmd.encode(), "STS MR10\r\n");
    /// ```
    pub fn new(mode: ForcedSetMode, address: DeviceAddress) -> Self {
        Self { mode, address }
    }

    /// Encodes the command frame.
    pub fn encode(&self) -> String {
        let verb = match self.mode {
            ForcedSetMode::Discrete => "ST",
            ForcedSetMode::Continuous => "STS",
        };
        frame(&format!("{} {}", verb, self.address))
    }

    /// Encodes the command frame to bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.encode().into_bytes()
    }
}

/// Command for forcing a bit device OFF.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForcedResetCommand {
    mode: ForcedSetMode,
    address: DeviceAddress,
}

impl ForcedResetCommand {
    /// Creates a new forced reset command.
    pub fn new(mode: ForcedSetMode, address: DeviceAddress) -> Self {
        Self { mode, address }
    }

    /// Encodes the command frame.
    pub fn encode(&self) -> String {
        let verb = match self.mode {
            ForcedSetMode::Discrete => "RS",
            ForcedSetMode::Continuous => "RSS",
        };
        frame(&format!("{} {}", verb, self.address))
    }

    /// Encodes the command frame to bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.encode().into_bytes()
    }
}

/// Command for reading a single device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadCommand {
    address: DeviceAddress,
    format: DataFormat,
}

impl ReadCommand {
    /// Creates a new read command.
    ///
    /// The format is ignored for bit devices.
    ///
    /// # Example
    ///
    /// ```
    /// use kv_hostlink::{DataFormat, DeviceAddress, DeviceType, ReadCommand};
    ///
    /// let dm = DeviceAddress::new(DeviceType::DM, 100);
    /// assert_eq!(ReadCommand::new(dm, DataFormat::U16).encode(), "RD DM100.U\r\n");
    ///
    /// let mr = DeviceAddress::new(DeviceType::MR, 10);
    /// assert_eq!(ReadCommand::new(mr, DataFormat::S32).encode(), "RD MR10\r\n");
    /// ```
    pub fn new(address: DeviceAddress, format: DataFormat) -> Self {
        Self { address, format }
    }

    /// Encodes the command frame.
    pub fn encode(&self) -> String {
        frame(&format!("RD {}", read_operand(self.address, self.format)))
    }

    /// Encodes the command frame to bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.encode().into_bytes()
    }
}

/// Command for reading consecutive devices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadBatchCommand {
    address: DeviceAddress,
    format: DataFormat,
    count: u16,
}

impl ReadBatchCommand {
    /// Creates a new batch read command.
    ///
    /// # Errors
    ///
    /// Returns an error if count is 0 or exceeds [`MAX_DEVICES_PER_COMMAND`].
    ///
    /// # Example
    ///
    /// ```
    /// use kv_hostlink::{DataFormat, DeviceAddress, DeviceType, ReadBatchCommand};
    ///
    /// let addr = DeviceAddress::new(DeviceType::MR, 10);
    /// let cmd = ReadBatchCommand::new(addr, DataFormat::U16, 4).unwrap();
    /// assert_eq!(cmd.encode(), "RDS MR10 4\r\n");
    /// ```
    pub fn new(address: DeviceAddress, format: DataFormat, count: u16) -> Result<Self> {
        check_count(count)?;
        Ok(Self {
            address,
            format,
            count,
        })
    }

    /// Encodes the command frame.
    pub fn encode(&self) -> String {
        frame(&format!(
            "RDS {} {}",
            read_operand(self.address, self.format),
            self.count
        ))
    }

    /// Encodes the command frame to bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.encode().into_bytes()
    }
}

/// Command for writing a single device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteCommand {
    address: DeviceAddress,
    format: DataFormat,
    value: String,
}

impl WriteCommand {
    /// Creates a new write command. The value is rendered with `Display`.
    pub fn new(address: DeviceAddress, format: DataFormat, value: impl ToString) -> Self {
        Self {
            address,
            format,
            value: value.to_string(),
        }
    }

    /// Encodes the command frame.
    pub fn encode(&self) -> String {
        frame(&format!(
            "WR {}{} {}",
            self.address,
            self.format.suffix(),
            self.value
        ))
    }

    /// Encodes the command frame to bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.encode().into_bytes()
    }
}

/// Command for writing consecutive devices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteBatchCommand {
    address: DeviceAddress,
    format: DataFormat,
    count: u16,
    values: Vec<String>,
}

impl WriteBatchCommand {
    /// Creates a new batch write command from pre-rendered values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Count is 0 or exceeds [`MAX_DEVICES_PER_COMMAND`]
    /// - The number of values differs from count
    ///
    /// # Example
    ///
    /// ```
    /// use kv_hostlink::{DataFormat, DeviceAddress, DeviceType, WriteBatchCommand};
    ///
    /// let addr = DeviceAddress::new(DeviceType::DM, 200);
    /// let cmd = WriteBatchCommand::new(addr, DataFormat::S16, 3, &["1", "-2", "3"]).unwrap();
    /// assert_eq!(cmd.encode(), "WRS DM200.S 3 1 -2 3\r\n");
    /// ```
    pub fn new<S: AsRef<str>>(
        address: DeviceAddress,
        format: DataFormat,
        count: u16,
        values: &[S],
    ) -> Result<Self> {
        check_count(count)?;
        if values.len() != usize::from(count) {
            return Err(HostLinkError::invalid_parameter(
                "values",
                format!("expected {} values, got {}", count, values.len()),
            ));
        }

        Ok(Self {
            address,
            format,
            count,
            values: values.iter().map(|v| v.as_ref().to_owned()).collect(),
        })
    }

    /// Encodes the command frame.
    pub fn encode(&self) -> String {
        frame(&format!(
            "WRS {}{} {} {}",
            self.address,
            self.format.suffix(),
            self.count,
            self.values.join(" ")
        ))
    }

    /// Encodes the command frame to bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.encode().into_bytes()
    }
}
