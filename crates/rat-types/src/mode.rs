//! Technology preference representation

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;
use crate::tech::{Tech, TechSet};

/// The externally visible technology preference
///
/// Legacy clients only understand single-technology words (`"gsm"`,
/// `"umts"`, `"lte"`); modern clients use `+`-joined combinations
/// (`"+lte+umts"`). Both encodings are kept distinct so a legacy preference
/// survives a round trip through a bitmask-capable driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AccessMode {
    /// No preference
    Any,
    /// A legacy single-technology preference
    Legacy(Tech),
    /// A combination of technologies
    Modern(TechSet),
}

impl AccessMode {
    /// Create a modern-encoded mode, normalizing the empty set to `Any`
    pub fn modern(set: TechSet) -> AccessMode {
        if set.is_any() {
            AccessMode::Any
        } else {
            AccessMode::Modern(set)
        }
    }

    /// Parse the old persisted format, a bare decimal technology tier
    ///
    /// Returns `None` for values that were never valid tiers.
    pub fn from_stored_int(value: u32) -> Option<AccessMode> {
        if value == 0 {
            Some(AccessMode::Any)
        } else {
            Tech::from_bit(value).map(AccessMode::Legacy)
        }
    }
}

impl Default for AccessMode {
    fn default() -> Self {
        AccessMode::Any
    }
}

impl fmt::Display for AccessMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessMode::Any => f.write_str("any"),
            AccessMode::Legacy(tech) => f.write_str(tech.name()),
            AccessMode::Modern(set) => write!(f, "{set}"),
        }
    }
}

impl FromStr for AccessMode {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "any" {
            return Ok(AccessMode::Any);
        }
        if let Ok(tech) = s.parse::<Tech>() {
            return Ok(AccessMode::Legacy(tech));
        }
        if s.starts_with('+') {
            let set: TechSet = s.parse()?;
            return Ok(AccessMode::modern(set));
        }
        Err(ValueError::InvalidMode(s.to_string()))
    }
}
