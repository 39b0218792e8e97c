//! # KEYENCE KV HostLink Protocol Library
//!
//! A Rust library for communicating with KEYENCE KV-series PLCs using the
//! HostLink (upper link) ASCII protocol over TCP.
//!
//! This is a **protocol-only** library: no polling, schedulers, caching or
//! application-level features. Each call produces exactly 1 request and 1
//! response. No automatic retries or reconnection.
//!
//! ## Features
//!
//! - **Protocol-only** — command encoding, response decoding, framing
//! - **Deterministic** — each call produces exactly 1 request and 1 response
//! - **Type-safe** — device types, data formats, modes and models as enums
//! - **No panics** — all errors returned as `Result<T, HostLinkError>`
//! - **Framed** — responses are read up to CR-LF, across TCP segments
//!
//! ## Quick Start
//!
//! ```no_run
//! use kv_hostlink::{Client, ClientConfig, DataFormat, DeviceAddress};
//!
//! fn main() -> kv_hostlink::Result<()> {
//!     // Connect to the PLC at its factory default address (192.168.0.10:8501)
//!     let mut client = Client::new(ClientConfig::default())?;
//!
//!     println!("Model: {}", client.query_model()?);
//!     println!("Mode: {}", client.confirm_mode()?);
//!
//!     // Read DM100 as unsigned 16-bit
//!     let dm100: DeviceAddress = "DM100".parse()?;
//!     println!("DM100 = {}", client.read(dm100, None)?);
//!
//!     // Read 10 words from DM200, signed
//!     let values = client.read_batch("DM200".parse()?, 10, Some(DataFormat::S16))?;
//!     println!("DM200-209: {:?}", values);
//!
//!     // Write a value; `false` means the PLC did not answer OK
//!     if !client.write(dm100, 42, None)? {
//!         eprintln!("write rejected");
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Device Addresses
//!
//! Addresses are written `<TYPE><INDEX>` (`DM100`, `MR10`, `W1F`). Bit
//! devices (R, B, MR, LR, CR, VB, M) are read without a data format suffix;
//! every other device takes one of:
//!
//! | Format | Suffix | Description |
//! |--------|:------:|-------------|
//! | [`DataFormat::U16`] | `.U` | Decimal, 16-bit, unsigned (default) |
//! | [`DataFormat::S16`] | `.S` | Decimal, 16-bit, signed |
//! | [`DataFormat::U32`] | `.D` | Decimal, 32-bit, unsigned |
//! | [`DataFormat::S32`] | `.L` | Decimal, 32-bit, signed |
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, HostLinkError>`]. A negative confirmation
//! is not an error: operations that only confirm return `Ok(false)`.
//!
//! ```no_run
//! use kv_hostlink::{Client, ClientConfig, HostLinkError};
//!
//! let mut client = Client::new(ClientConfig::default())?;
//!
//! match client.query_model() {
//!     Ok(model) => println!("Model: {}", model),
//!     Err(HostLinkError::UnknownModel { code }) => println!("Unsupported model code {}", code),
//!     Err(e) if e.is_fatal() => println!("Connection lost: {}", e),
//!     Err(e) => println!("Error: {}", e),
//! }
//! # Ok::<(), HostLinkError>(())
//! ```
//!
//! ## Logging
//!
//! Frames are logged through the [`log`] facade at `debug` level. Install any
//! `log` backend to see them.

#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

mod client;
mod command;
mod device;
mod error;
mod plc;
mod response;
mod transport;
pub mod utils;

#[cfg(test)]
mod mock;

// Public re-exports
pub use client::{Client, ClientConfig, DEFAULT_PLC_HOST};
pub use command::{
    ChangeModeCommand, ForcedResetCommand, ForcedSetCommand, QueryModeCommand, QueryModelCommand,
    ReadBatchCommand, ReadCommand, WriteBatchCommand, WriteCommand, FRAME_TERMINATOR,
    MAX_DEVICES_PER_COMMAND,
};
pub use device::{DataFormat, DeviceAddress, DeviceType};
pub use error::{hostlink_error_description, HostLinkError, Result};
pub use plc::{ForcedSetMode, OperationMode, PlcModel};
pub use response::Response;
pub use transport::{TcpTransport, DEFAULT_HOSTLINK_PORT, MAX_RESPONSE_SIZE};
