//! PLC-level enumerations: operation mode, model and forced-set mode.
//!
//! The mode and model tables are closed: codes outside them are reported as
//! [`HostLinkError::UnknownMode`] and [`HostLinkError::UnknownModel`].

use std::fmt;

use crate::error::{HostLinkError, Result};

/// PLC execution state.
///
/// # Example
///
/// ```
/// use kv_hostlink::OperationMode;
///
/// assert_eq!(OperationMode::Run.code(), 1);
/// assert_eq!(OperationMode::from_code(0).unwrap(), OperationMode::Program);
/// assert!(OperationMode::from_code(2).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OperationMode {
    /// Program mode, execution halted.
    Program,
    /// Run mode, ladder program executing.
    Run,
}

impl OperationMode {
    /// Returns the wire code of this mode.
    pub fn code(self) -> u8 {
        match self {
            OperationMode::Program => 0,
            OperationMode::Run => 1,
        }
    }

    /// Looks up a mode by its wire code.
    ///
    /// # Errors
    ///
    /// Returns `HostLinkError::UnknownMode` for codes other than 0 and 1.
    pub fn from_code(code: u32) -> Result<Self> {
        match code {
            0 => Ok(OperationMode::Program),
            1 => Ok(OperationMode::Run),
            other => Err(HostLinkError::unknown_mode(other.to_string())),
        }
    }
}

impl fmt::Display for OperationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationMode::Program => write!(f, "PROGRAM"),
            OperationMode::Run => write!(f, "RUN"),
        }
    }
}

/// PLC models that answer the model query.
///
/// # Example
///
/// ```
/// use kv_hostlink::PlcModel;
///
/// assert_eq!(PlcModel::from_code(57).unwrap(), PlcModel::Kv8000);
/// assert_eq!(PlcModel::Kv8000.to_string(), "KV-8000");
/// assert!(PlcModel::from_code(999).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlcModel {
    /// KV-8000.
    Kv8000,
    /// KV-7500.
    Kv7500,
    /// KV-NC32T.
    KvNc32t,
    /// KV-N60.
    KvN60,
    /// KV-N40.
    KvN40,
    /// KV-N24.
    KvN24,
}

impl PlcModel {
    /// Returns the model code reported by the PLC.
    pub fn code(self) -> u32 {
        match self {
            PlcModel::Kv8000 => 57,
            PlcModel::Kv7500 => 55,
            PlcModel::KvNc32t => 128,
            PlcModel::KvN60 => 132,
            PlcModel::KvN40 => 133,
            PlcModel::KvN24 => 134,
        }
    }

    /// Looks up a model by the code reported by the PLC.
    ///
    /// # Errors
    ///
    /// Returns `HostLinkError::UnknownModel` for codes outside the table.
    pub fn from_code(code: u32) -> Result<Self> {
        match code {
            57 => Ok(PlcModel::Kv8000),
            55 => Ok(PlcModel::Kv7500),
            128 => Ok(PlcModel::KvNc32t),
            132 => Ok(PlcModel::KvN60),
            133 => Ok(PlcModel::KvN40),
            134 => Ok(PlcModel::KvN24),
            other => Err(HostLinkError::unknown_model(other.to_string())),
        }
    }

    /// Returns the catalogue name of the model.
    pub fn name(self) -> &'static str {
        match self {
            PlcModel::Kv8000 => "KV-8000",
            PlcModel::Kv7500 => "KV-7500",
            PlcModel::KvNc32t => "KV-NC32T",
            PlcModel::KvN60 => "KV-N60",
            PlcModel::KvN40 => "KV-N40",
            PlcModel::KvN24 => "KV-N24",
        }
    }
}

impl fmt::Display for PlcModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How long a forced set/reset holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ForcedSetMode {
    /// Force a single device (`ST` / `RS`).
    #[default]
    Discrete,
    /// Force consecutive devices (`STS` / `RSS`).
    Continuous,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_codes() {
        for mode in [OperationMode::Program, OperationMode::Run] {
            assert_eq!(OperationMode::from_code(mode.code() as u32).unwrap(), mode);
        }
        match OperationMode::from_code(7) {
            Err(HostLinkError::UnknownMode { code }) => assert_eq!(code, "7"),
            other => panic!("Expected UnknownMode, got {:?}", other),
        }
    }

    #[test]
    fn test_model_table() {
        let table = [
            (57, "KV-8000"),
            (55, "KV-7500"),
            (128, "KV-NC32T"),
            (132, "KV-N60"),
            (133, "KV-N40"),
            (134, "KV-N24"),
        ];
        for (code, name) in table {
            let model = PlcModel::from_code(code).unwrap();
            assert_eq!(model.to_string(), name);
            assert_eq!(model.code(), code);
        }
    }

    #[test]
    fn test_unknown_model() {
        match PlcModel::from_code(999) {
            Err(HostLinkError::UnknownModel { code }) => assert_eq!(code, "999"),
            other => panic!("Expected UnknownModel, got {:?}", other),
        }
    }

    #[test]
    fn test_forced_set_mode_default() {
        assert_eq!(ForcedSetMode::default(), ForcedSetMode::Discrete);
    }
}
