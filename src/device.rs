//! Device addressing and data formats for the HostLink protocol.
//!
//! This module defines [`DeviceType`], [`DeviceAddress`] and [`DataFormat`].
//! A device address is rendered on the wire as `<TYPE><INDEX>`, for example
//! `DM100` or `MR10`. Word devices take a data format suffix (`.U`, `.S`,
//! `.D`, `.L`) in read and write commands; bit devices never do.
//!
//! # Device Types Overview
//!
//! | Type | Description | Format suffix | Index radix |
//! |------|-------------|:-------------:|:-----------:|
//! | R | Relay | ✗ | 10 |
//! | B | Link relay | ✗ | 16 |
//! | MR | Internal auxiliary relay | ✗ | 10 |
//! | LR | Latch relay | ✗ | 10 |
//! | CR | Control relay | ✗ | 10 |
//! | VB | Work relay | ✗ | 16 |
//! | M | Internal relay | ✗ | 10 |
//! | DM | Data memory | ✓ | 10 |
//! | EM | Extended data memory | ✓ | 10 |
//! | FM | File register | ✓ | 10 |
//! | ZF | File register (continuous) | ✓ | 10 |
//! | W | Link register | ✓ | 16 |
//! | TM | Temporary data memory | ✓ | 10 |
//! | Z | Index register | ✓ | 10 |
//! | T | Timer | ✓ | 10 |
//! | C | Counter | ✓ | 10 |
//! | CTC | High-speed counter comparator | ✓ | 10 |
//! | CTH | High-speed counter | ✓ | 10 |
//! | CM | Control memory | ✓ | 10 |
//! | VM | Work memory | ✓ | 10 |
//! | AT | Digital trimmer | ✓ | 10 |
//!
//! # Example
//!
//! ```
//! use kv_hostlink::{DataFormat, DeviceAddress, DeviceType};
//!
//! let addr: DeviceAddress = "DM100".parse().unwrap();
//! assert_eq!(addr.device(), DeviceType::DM);
//! assert_eq!(addr.index(), 100);
//! assert!(addr.device().requires_format_suffix());
//!
//! let relay: DeviceAddress = "MR10".parse().unwrap();
//! assert!(!relay.device().requires_format_suffix());
//!
//! assert_eq!(DataFormat::default().suffix(), ".U");
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::{HostLinkError, Result};

/// Device types addressable over HostLink.
///
/// Whether a device takes a data format suffix is an explicit property of
/// each variant, see [`DeviceType::requires_format_suffix`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(clippy::upper_case_acronyms)]
pub enum DeviceType {
    /// Relay.
    R,
    /// Link relay.
    B,
    /// Internal auxiliary relay.
    MR,
    /// Latch relay.
    LR,
    /// Control relay.
    CR,
    /// Work relay.
    VB,
    /// Internal relay.
    M,
    /// Data memory.
    DM,
    /// Extended data memory.
    EM,
    /// File register.
    FM,
    /// File register, continuous numbering.
    ZF,
    /// Link register.
    W,
    /// Temporary data memory.
    TM,
    /// Index register.
    Z,
    /// Timer.
    T,
    /// Counter.
    C,
    /// High-speed counter comparator.
    CTC,
    /// High-speed counter.
    CTH,
    /// Control memory.
    CM,
    /// Work memory.
    VM,
    /// Digital trimmer.
    AT,
}

impl DeviceType {
    /// Every device type, in table order.
    pub const ALL: [DeviceType; 21] = [
        DeviceType::R,
        DeviceType::B,
        DeviceType::MR,
        DeviceType::LR,
        DeviceType::CR,
        DeviceType::VB,
        DeviceType::M,
        DeviceType::DM,
        DeviceType::EM,
        DeviceType::FM,
        DeviceType::ZF,
        DeviceType::W,
        DeviceType::TM,
        DeviceType::Z,
        DeviceType::T,
        DeviceType::C,
        DeviceType::CTC,
        DeviceType::CTH,
        DeviceType::CM,
        DeviceType::VM,
        DeviceType::AT,
    ];

    /// Returns the wire tag of this device type.
    pub fn as_str(self) -> &'static str {
        match self {
            DeviceType::R => "R",
            DeviceType::B => "B",
            DeviceType::MR => "MR",
            DeviceType::LR => "LR",
            DeviceType::CR => "CR",
            DeviceType::VB => "VB",
            DeviceType::M => "M",
            DeviceType::DM => "DM",
            DeviceType::EM => "EM",
            DeviceType::FM => "FM",
            DeviceType::ZF => "ZF",
            DeviceType::W => "W",
            DeviceType::TM => "TM",
            DeviceType::Z => "Z",
            DeviceType::T => "T",
            DeviceType::C => "C",
            DeviceType::CTC => "CTC",
            DeviceType::CTH => "CTH",
            DeviceType::CM => "CM",
            DeviceType::VM => "VM",
            DeviceType::AT => "AT",
        }
    }

    /// Returns whether read and write commands append a [`DataFormat`]
    /// suffix to addresses of this type.
    ///
    /// Bit devices are read without a suffix.
    ///
    /// # Example
    ///
    /// ```
    /// use kv_hostlink::DeviceType;
    ///
    /// assert!(DeviceType::DM.requires_format_suffix());
    /// assert!(DeviceType::CM.requires_format_suffix());
    /// assert!(!DeviceType::MR.requires_format_suffix());
    /// assert!(!DeviceType::LR.requires_format_suffix());
    /// ```
    pub fn requires_format_suffix(self) -> bool {
        !matches!(
            self,
            DeviceType::R
                | DeviceType::B
                | DeviceType::MR
                | DeviceType::LR
                | DeviceType::CR
                | DeviceType::VB
                | DeviceType::M
        )
    }

    /// Returns the radix the device index is written in.
    ///
    /// Link relays, link registers and work relays are numbered in hex.
    pub fn index_radix(self) -> u32 {
        match self {
            DeviceType::B | DeviceType::W | DeviceType::VB => 16,
            _ => 10,
        }
    }

    fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|device| device.as_str().eq_ignore_ascii_case(tag))
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeviceType {
    type Err = HostLinkError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_tag(s)
            .ok_or_else(|| HostLinkError::invalid_address(format!("unknown device type '{}'", s)))
    }
}

/// A PLC device reference: device type plus index.
///
/// # Example
///
/// ```
/// use kv_hostlink::{DeviceAddress, DeviceType};
///
/// let addr = DeviceAddress::new(DeviceType::DM, 100);
/// assert_eq!(addr.to_string(), "DM100");
///
/// let link: DeviceAddress = "W0FF".parse().unwrap();
/// assert_eq!(link.index(), 0xFF);
/// assert_eq!(link.to_string(), "WFF");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviceAddress {
    device: DeviceType,
    index: u32,
}

impl DeviceAddress {
    /// Creates a new device address.
    pub fn new(device: DeviceType, index: u32) -> Self {
        Self { device, index }
    }

    /// Returns the device type.
    pub fn device(&self) -> DeviceType {
        self.device
    }

    /// Returns the device index.
    pub fn index(&self) -> u32 {
        self.index
    }
}

impl fmt::Display for DeviceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.device.index_radix() == 16 {
            write!(f, "{}{:X}", self.device, self.index)
        } else {
            write!(f, "{}{}", self.device, self.index)
        }
    }
}

impl FromStr for DeviceAddress {
    type Err = HostLinkError;

    /// Parses `<TYPE><INDEX>`.
    ///
    /// The longest known tag whose remainder is a valid index in that tag's
    /// radix wins, so `CTC5` is a comparator and `WFF` is link register 0xFF.
    fn from_str(s: &str) -> Result<Self> {
        let text = s.trim();
        if text.is_empty() {
            return Err(HostLinkError::invalid_address("address is empty"));
        }

        let max_tag = text.len().min(3);
        for tag_len in (1..=max_tag).rev() {
            let (Some(tag), Some(rest)) = (text.get(..tag_len), text.get(tag_len..)) else {
                continue;
            };
            let Some(device) = DeviceType::from_tag(tag) else {
                continue;
            };
            let radix = device.index_radix();
            if rest.is_empty() || !rest.chars().all(|c| c.is_digit(radix)) {
                continue;
            }
            let index = u32::from_str_radix(rest, radix).map_err(|e| {
                HostLinkError::invalid_address(format!("index of '{}' out of range: {}", text, e))
            })?;
            return Ok(Self { device, index });
        }

        Err(HostLinkError::invalid_address(format!(
            "'{}' is not a <TYPE><INDEX> device address",
            text
        )))
    }
}

/// Numeric data format of a word device access.
///
/// | Format | Suffix | Width | Sign |
/// |--------|:------:|:-----:|:----:|
/// | [`DataFormat::U16`] | `.U` | 16 | unsigned |
/// | [`DataFormat::S16`] | `.S` | 16 | signed |
/// | [`DataFormat::U32`] | `.D` | 32 | unsigned |
/// | [`DataFormat::S32`] | `.L` | 32 | signed |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DataFormat {
    /// Decimal, 16-bit, unsigned.
    #[default]
    U16,
    /// Decimal, 16-bit, signed.
    S16,
    /// Decimal, 32-bit, unsigned.
    U32,
    /// Decimal, 32-bit, signed.
    S32,
}

impl DataFormat {
    /// Returns the wire suffix of this format.
    pub fn suffix(self) -> &'static str {
        match self {
            DataFormat::U16 => ".U",
            DataFormat::S16 => ".S",
            DataFormat::U32 => ".D",
            DataFormat::S32 => ".L",
        }
    }

    /// Returns the longest decimal token the PLC answers in this format.
    ///
    /// ```
    /// use kv_hostlink::DataFormat;
    ///
    /// assert_eq!(DataFormat::U16.max_token_len(), "65535".len());
    /// assert_eq!(DataFormat::S32.max_token_len(), "-2147483648".len());
    /// ```
    pub const fn max_token_len(self) -> usize {
        match self {
            DataFormat::U16 => 5,
            DataFormat::S16 => 6,
            DataFormat::U32 => 10,
            DataFormat::S32 => 11,
        }
    }
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

impl FromStr for DataFormat {
    type Err = HostLinkError;

    /// Accepts the suffix with or without the leading dot (`.S` or `S`).
    fn from_str(s: &str) -> Result<Self> {
        match s.trim_start_matches('.') {
            "U" | "u" => Ok(DataFormat::U16),
            "S" | "s" => Ok(DataFormat::S16),
            "D" | "d" => Ok(DataFormat::U32),
            "L" | "l" => Ok(DataFormat::S32),
            _ => Err(HostLinkError::invalid_parameter(
                "format",
                format!("unknown data format '{}'", s),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_suffixes() {
        assert_eq!(DataFormat::U16.suffix(), ".U");
        assert_eq!(DataFormat::S16.suffix(), ".S");
        assert_eq!(DataFormat::U32.suffix(), ".D");
        assert_eq!(DataFormat::S32.suffix(), ".L");
        assert_eq!(DataFormat::default(), DataFormat::U16);
    }

    #[test]
    fn test_format_token_widths() {
        assert_eq!(DataFormat::U16.max_token_len(), u16::MAX.to_string().len());
        assert_eq!(DataFormat::S16.max_token_len(), i16::MIN.to_string().len());
        assert_eq!(DataFormat::U32.max_token_len(), u32::MAX.to_string().len());
        assert_eq!(DataFormat::S32.max_token_len(), i32::MIN.to_string().len());
    }

    #[test]
    fn test_format_parse() {
        assert_eq!(".S".parse::<DataFormat>().unwrap(), DataFormat::S16);
        assert_eq!("D".parse::<DataFormat>().unwrap(), DataFormat::U32);
        assert_eq!(".l".parse::<DataFormat>().unwrap(), DataFormat::S32);
        assert!(".H".parse::<DataFormat>().is_err());
    }

    #[test]
    fn test_suffix_classification() {
        for device in DeviceType::ALL {
            let bit_device = matches!(
                device,
                DeviceType::R
                    | DeviceType::B
                    | DeviceType::MR
                    | DeviceType::LR
                    | DeviceType::CR
                    | DeviceType::VB
                    | DeviceType::M
            );
            assert_eq!(device.requires_format_suffix(), !bit_device, "{}", device);
        }
    }

    #[test]
    fn test_tags_containing_m_are_not_bit_devices() {
        for text in ["DM100", "EM5", "FM0", "TM3", "CM10", "VM7"] {
            let addr: DeviceAddress = text.parse().unwrap();
            assert!(addr.device().requires_format_suffix(), "{}", text);
        }
    }

    #[test]
    fn test_parse_and_display() {
        let addr: DeviceAddress = "DM100".parse().unwrap();
        assert_eq!(addr, DeviceAddress::new(DeviceType::DM, 100));
        assert_eq!(addr.to_string(), "DM100");

        let addr: DeviceAddress = "MR10".parse().unwrap();
        assert_eq!(addr, DeviceAddress::new(DeviceType::MR, 10));

        let addr: DeviceAddress = "CTC5".parse().unwrap();
        assert_eq!(addr.device(), DeviceType::CTC);

        let addr: DeviceAddress = "C5".parse().unwrap();
        assert_eq!(addr.device(), DeviceType::C);

        let addr: DeviceAddress = "lr3".parse().unwrap();
        assert_eq!(addr.to_string(), "LR3");
    }

    #[test]
    fn test_parse_hex_devices() {
        let addr: DeviceAddress = "W05".parse().unwrap();
        assert_eq!(addr, DeviceAddress::new(DeviceType::W, 5));
        assert_eq!(addr.to_string(), "W5");

        let addr: DeviceAddress = "WFF".parse().unwrap();
        assert_eq!(addr.index(), 0xFF);

        let addr: DeviceAddress = "B1A".parse().unwrap();
        assert_eq!(addr, DeviceAddress::new(DeviceType::B, 0x1A));
        assert_eq!(addr.to_string(), "B1A");
    }

    #[test]
    fn test_parse_invalid() {
        assert!("".parse::<DeviceAddress>().is_err());
        assert!("DM".parse::<DeviceAddress>().is_err());
        assert!("QX10".parse::<DeviceAddress>().is_err());
        assert!("DM-1".parse::<DeviceAddress>().is_err());
        assert!("DM+1".parse::<DeviceAddress>().is_err());
        assert!("DM1 0".parse::<DeviceAddress>().is_err());
        assert!("DM1A".parse::<DeviceAddress>().is_err());
        assert!("DM99999999999".parse::<DeviceAddress>().is_err());
    }

    #[test]
    fn test_device_type_parse() {
        assert_eq!("ctc".parse::<DeviceType>().unwrap(), DeviceType::CTC);
        assert!("XX".parse::<DeviceType>().is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_roundtrip() {
        let addr = DeviceAddress::new(DeviceType::DM, 100);
        let json = serde_json::to_string(&addr).unwrap();
        let back: DeviceAddress = serde_json::from_str(&json).unwrap();
        assert_eq!(back, addr);

        let json = serde_json::to_string(&DataFormat::S32).unwrap();
        assert_eq!(json, "\"S32\"");
    }
}
