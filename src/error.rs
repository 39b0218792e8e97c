//! Error types for the HostLink protocol.

use std::io;
use thiserror::Error;

/// Result type alias for HostLink operations.
pub type Result<T> = std::result::Result<T, HostLinkError>;

/// Errors that can occur during HostLink communication.
///
/// A negative confirmation from the PLC (anything other than `OK`) is not an
/// error; operations that only confirm return `Ok(false)` in that case.
#[derive(Debug, Error)]
pub enum HostLinkError {
    /// The TCP connection to the PLC could not be established.
    #[error("Connection to {addr} failed: {source}")]
    Connection {
        /// Address the client tried to reach (`host:port`).
        addr: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// I/O error while sending or receiving on an established connection.
    #[error("Transport error: {0}")]
    Transport(#[from] io::Error),

    /// The configured read/write timeout elapsed.
    #[error("Communication timeout")]
    Timeout,

    /// The PLC closed the connection, or the session is already broken.
    #[error("Connection closed")]
    Disconnected,

    /// A response frame grew past the size limit without a terminator.
    ///
    /// The stream can no longer be resynchronised, so the session is closed.
    #[error("Response frame exceeds {limit} bytes without terminator")]
    FrameTooLarge {
        /// Largest accepted frame size in bytes.
        limit: usize,
    },

    /// The PLC reported an operation mode code outside the known table.
    #[error("Unknown operation mode code '{code}'")]
    UnknownMode {
        /// Raw code text returned by the PLC.
        code: String,
    },

    /// The PLC reported a model code outside the known table.
    #[error("Unknown PLC model code '{code}'")]
    UnknownModel {
        /// Raw code text returned by the PLC.
        code: String,
    },

    /// A device address could not be parsed.
    #[error("Invalid address: {reason}")]
    InvalidAddress {
        /// Description of the addressing error.
        reason: String,
    },

    /// Invalid parameter provided.
    #[error("Invalid parameter '{parameter}': {reason}")]
    InvalidParameter {
        /// Name of the invalid parameter.
        parameter: String,
        /// Description of why the parameter is invalid.
        reason: String,
    },

    /// Invalid response received from PLC.
    #[error("Invalid response: {reason}")]
    InvalidResponse {
        /// Description of the response error.
        reason: String,
    },
}

impl HostLinkError {
    /// Creates a new `Connection` error.
    pub fn connection(addr: impl Into<String>, source: io::Error) -> Self {
        Self::Connection {
            addr: addr.into(),
            source,
        }
    }

    /// Creates a new `UnknownMode` error.
    pub fn unknown_mode(code: impl Into<String>) -> Self {
        Self::UnknownMode { code: code.into() }
    }

    /// Creates a new `UnknownModel` error.
    pub fn unknown_model(code: impl Into<String>) -> Self {
        Self::UnknownModel { code: code.into() }
    }

    /// Creates a new `InvalidAddress` error.
    ///
    /// # Example
    ///
    /// ```
    /// use kv_hostlink::HostLinkError;
    ///
    /// let err = HostLinkError::invalid_address("unknown device type 'QX'");
    /// ```
    pub fn invalid_address(reason: impl Into<String>) -> Self {
        Self::InvalidAddress {
            reason: reason.into(),
        }
    }

    /// Creates a new `InvalidParameter` error.
    ///
    /// # Example
    ///
    /// ```
    /// use kv_hostlink::HostLinkError;
    ///
    /// let err = HostLinkError::invalid_parameter("length", "must be greater than 0");
    /// ```
    pub fn invalid_parameter(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    /// Creates a new `InvalidResponse` error.
    pub fn invalid_response(reason: impl Into<String>) -> Self {
        Self::InvalidResponse {
            reason: reason.into(),
        }
    }

    /// Returns whether this error leaves the session unusable.
    ///
    /// Code lookup and validation errors are recoverable: the response frame
    /// was fully consumed and the next command can be sent on the same client.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::Connection { .. }
                | Self::Transport(_)
                | Self::Timeout
                | Self::Disconnected
                | Self::FrameTooLarge { .. }
        )
    }
}

/// Returns a description for a HostLink error response code (`E0`..`E6`).
///
/// Returns `None` for codes the PLC does not document.
///
/// # Example
///
/// ```
/// use kv_hostlink::hostlink_error_description;
///
/// assert_eq!(hostlink_error_description("E1"), Some("command error"));
/// assert_eq!(hostlink_error_description("E9"), None);
/// ```
pub fn hostlink_error_description(code: &str) -> Option<&'static str> {
    match code {
        "E0" => Some("device number error"),
        "E1" => Some("command error"),
        "E2" => Some("program not registered"),
        "E4" => Some("write disabled"),
        "E5" => Some("unit error"),
        "E6" => Some("no comment"),
        _ => None,
    }
}
