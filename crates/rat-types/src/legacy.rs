//! Legacy preference mapping for bitmask-capable drivers
//!
//! A driver that reports its supported modes as bitmask combinations has no
//! native notion of a single-technology preference. The table built here
//! maps each legacy tier to the richest supported combination that does not
//! exceed it, so a legacy `"umts"` request becomes, say, `umts+gsm` on a
//! driver that supports that combination.

use tracing::debug;

use crate::tech::{Tech, TechSet};

/// Per-driver mapping from legacy technology tiers to bitmask modes
///
/// Built once when the driver attaches, from its supported-mode list.
/// Tiers the driver cannot realize at all have no entry. Immutable after
/// construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LegacyRatTable {
    entries: [Option<TechSet>; Tech::TIERS.len()],
}

impl LegacyRatTable {
    /// Build the table from a driver's supported bitmask modes
    ///
    /// For each tier, candidates are the supported values with no bit at or
    /// above the next tier; the numerically largest candidate wins, higher
    /// bits encoding more capable combinations.
    pub fn build(supported: &[TechSet]) -> LegacyRatTable {
        let mut entries = [None; Tech::TIERS.len()];

        for (i, tier) in Tech::TIERS.iter().enumerate() {
            let off = !((tier.bit() << 1) - 1);
            let best = supported
                .iter()
                .map(|m| m.bits())
                .filter(|m| m & off == 0)
                .max()
                .unwrap_or(0);

            debug!("{} -> {:#x}", tier.name(), best);
            if best != 0 {
                entries[i] = Some(TechSet::from_bits(best));
            }
        }

        LegacyRatTable { entries }
    }

    /// The richest supported mode for a legacy tier, if any
    pub fn map(&self, tech: Tech) -> Option<TechSet> {
        let index = Tech::TIERS.iter().position(|t| *t == tech)?;
        self.entries[index]
    }

    /// Whether the driver can realize the given legacy tier
    pub fn supports(&self, tech: Tech) -> bool {
        self.map(tech).is_some()
    }
}
