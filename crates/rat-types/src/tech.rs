//! Technologies and technology bitmasks

use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use std::str::FromStr;

use crate::error::ValueError;

/// A single radio access technology
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tech {
    /// 2G GSM/EDGE
    Gsm,
    /// 3G UMTS/HSPA
    Umts,
    /// 4G LTE
    Lte,
}

impl Tech {
    /// All technology tiers, least significant bit first
    pub const TIERS: [Tech; 3] = [Tech::Gsm, Tech::Umts, Tech::Lte];

    /// The bitmask bit assigned to this technology
    ///
    /// Higher bits encode more capable technologies.
    pub fn bit(self) -> u32 {
        match self {
            Tech::Gsm => 0b001,
            Tech::Umts => 0b010,
            Tech::Lte => 0b100,
        }
    }

    /// Look up a technology by its bitmask bit
    pub fn from_bit(bit: u32) -> Option<Tech> {
        match bit {
            0b001 => Some(Tech::Gsm),
            0b010 => Some(Tech::Umts),
            0b100 => Some(Tech::Lte),
            _ => None,
        }
    }

    /// The legacy preference word for this technology
    pub fn name(self) -> &'static str {
        match self {
            Tech::Gsm => "gsm",
            Tech::Umts => "umts",
            Tech::Lte => "lte",
        }
    }
}

impl fmt::Display for Tech {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Tech {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gsm" => Ok(Tech::Gsm),
            "umts" => Ok(Tech::Umts),
            "lte" => Ok(Tech::Lte),
            _ => Err(ValueError::UnknownTechnology(s.to_string())),
        }
    }
}

/// A set of radio access technologies, stored as a bitmask
///
/// The empty set ([`TechSet::ANY`]) is the wildcard meaning "no preference".
/// All constructors mask stray bits, so a value is always `ANY` or a subset
/// of the defined technology bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TechSet(u32);

impl TechSet {
    /// No preference
    pub const ANY: TechSet = TechSet(0);
    /// Every defined technology
    pub const ALL: TechSet = TechSet(0b111);

    /// Create from raw bits, discarding undefined bits
    pub fn from_bits(bits: u32) -> TechSet {
        TechSet(bits & Self::ALL.0)
    }

    /// The raw bitmask value
    pub fn bits(self) -> u32 {
        self.0
    }

    /// True for the wildcard (empty) set
    pub fn is_any(self) -> bool {
        self.0 == 0
    }

    /// Whether the set contains the given technology
    pub fn contains(self, tech: Tech) -> bool {
        self.0 & tech.bit() != 0
    }

    /// The single technology in this set, if it has exactly one
    pub fn single(self) -> Option<Tech> {
        if self.0 != 0 && self.0 & (self.0 - 1) == 0 {
            Tech::from_bit(self.0)
        } else {
            None
        }
    }

    /// Decompose into single-technology sets, least significant bit first
    pub fn iter_lsb(self) -> impl Iterator<Item = TechSet> {
        let mut rest = self.0;
        std::iter::from_fn(move || {
            if rest == 0 {
                return None;
            }
            let bit = rest & rest.wrapping_neg();
            rest &= rest - 1;
            Some(TechSet(bit))
        })
    }

    /// Widen a single-tier mask to include every lower tier
    ///
    /// This is the default legacy-to-modern mapping used when a driver does
    /// not supply its own table: `gsm` stays `gsm`, `umts` becomes
    /// `umts+gsm`, `lte` becomes `lte+umts+gsm`.
    pub fn fill_down(self) -> TechSet {
        if self.0 == 0 {
            return TechSet::ANY;
        }
        TechSet((self.0 | (self.0 - 1)) & Self::ALL.0)
    }
}

impl From<Tech> for TechSet {
    fn from(tech: Tech) -> Self {
        TechSet(tech.bit())
    }
}

impl BitOr for TechSet {
    type Output = TechSet;

    fn bitor(self, rhs: TechSet) -> TechSet {
        TechSet(self.0 | rhs.0)
    }
}

impl BitOr<Tech> for TechSet {
    type Output = TechSet;

    fn bitor(self, rhs: Tech) -> TechSet {
        TechSet(self.0 | rhs.bit())
    }
}

impl BitOrAssign for TechSet {
    fn bitor_assign(&mut self, rhs: TechSet) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for TechSet {
    /// Renders `ANY` as `"any"` and a combination as `+`-joined words,
    /// most significant technology first: `3` is `"+umts+gsm"`, `6` is
    /// `"+lte+umts"`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_any() {
            return f.write_str("any");
        }
        for tech in Tech::TIERS.iter().rev() {
            if self.contains(*tech) {
                write!(f, "+{}", tech.name())?;
            }
        }
        Ok(())
    }
}

impl FromStr for TechSet {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "any" {
            return Ok(TechSet::ANY);
        }
        let Some(rest) = s.strip_prefix('+') else {
            return Err(ValueError::InvalidMode(s.to_string()));
        };

        let mut mask = TechSet::ANY;
        let mut any = false;
        for word in rest.split('+') {
            if word == "any" {
                any = true;
            } else {
                let tech: Tech = word
                    .parse()
                    .map_err(|_| ValueError::InvalidMode(s.to_string()))?;
                mask |= TechSet::from(tech);
            }
        }

        // A wildcard component swallows the whole combination
        Ok(if any { TechSet::ANY } else { mask })
    }
}
