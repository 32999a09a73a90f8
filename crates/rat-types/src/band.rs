//! Frequency band restrictions

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// GSM frequency band restriction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GsmBand {
    /// No restriction
    #[default]
    Any,
    /// 850 MHz
    B850,
    /// Primary 900 MHz
    B900P,
    /// Extended 900 MHz
    B900E,
    /// 1800 MHz
    B1800,
    /// 1900 MHz
    B1900,
}

impl GsmBand {
    /// Human-readable band name
    pub fn name(self) -> &'static str {
        match self {
            GsmBand::Any => "any",
            GsmBand::B850 => "850",
            GsmBand::B900P => "900P",
            GsmBand::B900E => "900E",
            GsmBand::B1800 => "1800",
            GsmBand::B1900 => "1900",
        }
    }

    /// Stable integer used by the settings store
    pub fn to_stored(self) -> u8 {
        match self {
            GsmBand::Any => 0,
            GsmBand::B850 => 1,
            GsmBand::B900P => 2,
            GsmBand::B900E => 3,
            GsmBand::B1800 => 4,
            GsmBand::B1900 => 5,
        }
    }

    /// Decode a stored integer
    pub fn from_stored(value: u8) -> Option<GsmBand> {
        match value {
            0 => Some(GsmBand::Any),
            1 => Some(GsmBand::B850),
            2 => Some(GsmBand::B900P),
            3 => Some(GsmBand::B900E),
            4 => Some(GsmBand::B1800),
            5 => Some(GsmBand::B1900),
            _ => None,
        }
    }
}

impl fmt::Display for GsmBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GsmBand {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "any" => Ok(GsmBand::Any),
            "850" => Ok(GsmBand::B850),
            "900P" => Ok(GsmBand::B900P),
            "900E" => Ok(GsmBand::B900E),
            "1800" => Ok(GsmBand::B1800),
            "1900" => Ok(GsmBand::B1900),
            _ => Err(ValueError::InvalidGsmBand(s.to_string())),
        }
    }
}

/// UMTS frequency band restriction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UmtsBand {
    /// No restriction
    #[default]
    Any,
    /// 850 MHz
    B850,
    /// 900 MHz
    B900,
    /// 1700 MHz AWS
    B1700Aws,
    /// 1900 MHz
    B1900,
    /// 2100 MHz
    B2100,
}

impl UmtsBand {
    /// Human-readable band name
    pub fn name(self) -> &'static str {
        match self {
            UmtsBand::Any => "any",
            UmtsBand::B850 => "850",
            UmtsBand::B900 => "900",
            UmtsBand::B1700Aws => "1700AWS",
            UmtsBand::B1900 => "1900",
            UmtsBand::B2100 => "2100",
        }
    }

    /// Stable integer used by the settings store
    pub fn to_stored(self) -> u8 {
        match self {
            UmtsBand::Any => 0,
            UmtsBand::B850 => 1,
            UmtsBand::B900 => 2,
            UmtsBand::B1700Aws => 3,
            UmtsBand::B1900 => 4,
            UmtsBand::B2100 => 5,
        }
    }

    /// Decode a stored integer
    pub fn from_stored(value: u8) -> Option<UmtsBand> {
        match value {
            0 => Some(UmtsBand::Any),
            1 => Some(UmtsBand::B850),
            2 => Some(UmtsBand::B900),
            3 => Some(UmtsBand::B1700Aws),
            4 => Some(UmtsBand::B1900),
            5 => Some(UmtsBand::B2100),
            _ => None,
        }
    }
}

impl fmt::Display for UmtsBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for UmtsBand {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "any" => Ok(UmtsBand::Any),
            "850" => Ok(UmtsBand::B850),
            "900" => Ok(UmtsBand::B900),
            "1700AWS" => Ok(UmtsBand::B1700Aws),
            "1900" => Ok(UmtsBand::B1900),
            "2100" => Ok(UmtsBand::B2100),
            _ => Err(ValueError::InvalidUmtsBand(s.to_string())),
        }
    }
}
