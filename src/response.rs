//! HostLink response decoding.
//!
//! A response frame is ASCII text terminated by CR-LF. It takes one of two
//! shapes:
//!
//! | Shape | Example | Accessor |
//! |-------|---------|----------|
//! | Confirmation | `OK` | [`Response::is_ok`] |
//! | Scalar data | `123` | [`Response::scalar`] |
//! | Sequence data | `1 2 3` | [`Response::tokens`] |
//!
//! On failure the PLC answers with an error code (`E0`..`E6`) instead. The
//! decoder does not treat those specially: a confirmation is successful only
//! when the text is exactly `OK`, and data accessors hand the text back
//! unchanged.
//!
//! # Example
//!
//! ```
//! use kv_hostlink::Response;
//!
//! let response = Response::from_bytes(b"OK\r\n").unwrap();
//! assert!(response.is_ok());
//!
//! let response = Response::from_bytes(b"1 2 3\r\n").unwrap();
//! assert_eq!(response.tokens(), vec!["1", "2", "3"]);
//! ```

use crate::error::{HostLinkError, Result};
use crate::plc::{OperationMode, PlcModel};

/// A decoded response frame, trailing whitespace removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    text: String,
}

impl Response {
    /// Decodes a raw frame.
    ///
    /// # Errors
    ///
    /// Returns `HostLinkError::InvalidResponse` if the bytes are not UTF-8.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(data).map_err(|e| {
            HostLinkError::invalid_response(format!(
                "frame is not valid text ({}): {}",
                e,
                hex::encode(data)
            ))
        })?;

        Ok(Self {
            text: text.trim_end().to_owned(),
        })
    }

    /// Returns whether the frame is a positive confirmation.
    ///
    /// Only the exact text `OK` counts; error codes, other text and an empty
    /// frame are all negative.
    ///
    /// # Example
    ///
    /// ```
    /// use kv_hostlink::Response;
    ///
    /// assert!(Response::from_bytes(b"OK\r\n").unwrap().is_ok());
    /// assert!(!Response::from_bytes(b"NG\r\n").unwrap().is_ok());
    /// assert!(!Response::from_bytes(b"").unwrap().is_ok());
    /// ```
    pub fn is_ok(&self) -> bool {
        self.text == "OK"
    }

    /// Returns the frame text as a single unparsed token.
    pub fn scalar(&self) -> &str {
        &self.text
    }

    /// Splits the frame text on whitespace.
    ///
    /// An empty frame yields an empty sequence.
    pub fn tokens(&self) -> Vec<String> {
        self.text.split_whitespace().map(str::to_owned).collect()
    }

    /// Consumes the response, returning the frame text.
    pub fn into_text(self) -> String {
        self.text
    }

    /// Returns the PLC error code if the frame is an error response.
    ///
    /// # Example
    ///
    /// ```
    /// use kv_hostlink::Response;
    ///
    /// assert_eq!(Response::from_bytes(b"E1\r\n").unwrap().error_code(), Some("E1"));
    /// assert_eq!(Response::from_bytes(b"123\r\n").unwrap().error_code(), None);
    /// ```
    pub fn error_code(&self) -> Option<&str> {
        let bytes = self.text.as_bytes();
        if bytes.len() == 2 && bytes[0] == b'E' && bytes[1].is_ascii_digit() {
            Some(&self.text)
        } else {
            None
        }
    }

    /// Interprets the frame as an operation mode code.
    ///
    /// # Errors
    ///
    /// Returns `HostLinkError::UnknownMode` if the text is not 0 or 1.
    pub fn to_mode(&self) -> Result<OperationMode> {
        let code = self
            .text
            .trim()
            .parse::<u32>()
            .map_err(|_| HostLinkError::unknown_mode(self.text.as_str()))?;
        OperationMode::from_code(code)
    }

    /// Interprets the frame as a PLC model code.
    ///
    /// # Errors
    ///
    /// Returns `HostLinkError::UnknownModel` if the code is not in the model table.
    pub fn to_model(&self) -> Result<PlcModel> {
        let code = self
            .text
            .trim()
            .parse::<u32>()
            .map_err(|_| HostLinkError::unknown_model(self.text.as_str()))?;
        PlcModel::from_code(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(raw: &[u8]) -> Response {
        Response::from_bytes(raw).unwrap()
    }

    #[test]
    fn test_confirmation() {
        assert!(decode(b"OK\r\n").is_ok());
        assert!(decode(b"OK").is_ok());
        assert!(!decode(b"NG\r\n").is_ok());
        assert!(!decode(b"ok\r\n").is_ok());
        assert!(!decode(b"E1\r\n").is_ok());
        assert!(!decode(b"").is_ok());
    }

    #[test]
    fn test_scalar() {
        assert_eq!(decode(b"123\r\n").scalar(), "123");
        assert_eq!(decode(b"-5 \r\n").scalar(), "-5");
        assert_eq!(decode(b"\r\n").scalar(), "");
    }

    #[test]
    fn test_tokens() {
        assert_eq!(decode(b"1 2 3\r\n").tokens(), vec!["1", "2", "3"]);
        assert_eq!(decode(b"00001  00002\r\n").tokens(), vec!["00001", "00002"]);
        assert!(decode(b"\r\n").tokens().is_empty());
    }

    #[test]
    fn test_garbage_passes_through() {
        let response = decode(b"??garbage\r\n");
        assert_eq!(response.scalar(), "??garbage");
        assert!(!response.is_ok());
    }

    #[test]
    fn test_invalid_utf8() {
        let err = Response::from_bytes(&[0xFF, 0xFE, b'\r', b'\n']).unwrap_err();
        match err {
            HostLinkError::InvalidResponse { reason } => assert!(reason.contains("fffe0d0a")),
            other => panic!("Expected InvalidResponse, got {:?}", other),
        }
    }

    #[test]
    fn test_error_code() {
        assert_eq!(decode(b"E0\r\n").error_code(), Some("E0"));
        assert_eq!(decode(b"OK\r\n").error_code(), None);
        assert_eq!(decode(b"E10\r\n").error_code(), None);
    }

    #[test]
    fn test_to_mode() {
        assert_eq!(decode(b"1\r\n").to_mode().unwrap(), OperationMode::Run);
        assert_eq!(decode(b"0\r\n").to_mode().unwrap(), OperationMode::Program);
        assert!(matches!(
            decode(b"2\r\n").to_mode(),
            Err(HostLinkError::UnknownMode { .. })
        ));
        match decode(b"E1\r\n").to_mode() {
            Err(HostLinkError::UnknownMode { code }) => assert_eq!(code, "E1"),
            other => panic!("Expected UnknownMode, got {:?}", other),
        }
    }

    #[test]
    fn test_to_model() {
        assert_eq!(decode(b"57\r\n").to_model().unwrap(), PlcModel::Kv8000);
        assert_eq!(decode(b"134\r\n").to_model().unwrap(), PlcModel::KvN24);
        match decode(b"999\r\n").to_model() {
            Err(HostLinkError::UnknownModel { code }) => assert_eq!(code, "999"),
            other => panic!("Expected UnknownModel, got {:?}", other),
        }
    }
}
