//! Helpers for turning raw response tokens into values.
//!
//! The PLC answers reads with decimal text, zero-padded to the width of the
//! data format (`00042`, `-00017`). Bit devices answer `0` or `1`.
//!
//! # Example
//!
//! ```
//! use kv_hostlink::utils::{parse_bit, parse_token, parse_tokens};
//!
//! let value: u16 = parse_token("00042").unwrap();
//! assert_eq!(value, 42);
//!
//! let signed: Vec<i16> = parse_tokens(&["-00017", "00003"]).unwrap();
//! assert_eq!(signed, vec![-17, 3]);
//!
//! assert!(parse_bit("1").unwrap());
//! ```

use std::str::FromStr;

use crate::error::{HostLinkError, Result};

/// Parses a single token.
///
/// # Errors
///
/// Returns `HostLinkError::InvalidResponse` if the token does not parse as `T`.
pub fn parse_token<T>(token: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    token.trim().parse::<T>().map_err(|e| {
        HostLinkError::invalid_response(format!("cannot parse '{}': {}", token, e))
    })
}

/// Parses every token, stopping at the first failure.
pub fn parse_tokens<T, S>(tokens: &[S]) -> Result<Vec<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    S: AsRef<str>,
{
    tokens.iter().map(|t| parse_token(t.as_ref())).collect()
}

/// Parses a bit device token (`0` or `1`).
///
/// # Errors
///
/// Returns `HostLinkError::InvalidResponse` for any other text.
pub fn parse_bit(token: &str) -> Result<bool> {
    match token.trim() {
        "0" => Ok(false),
        "1" => Ok(true),
        other => Err(HostLinkError::invalid_response(format!(
            "'{}' is not a bit value",
            other
        ))),
    }
}
