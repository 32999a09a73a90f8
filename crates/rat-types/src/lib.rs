//! Radio Access Technology value types
//!
//! This crate provides the value types shared by the radio settings core
//! and the modem drivers:
//!
//! - **`Tech` / `TechSet`**: a single radio access technology (GSM, UMTS,
//!   LTE) and a bitmask combination of them. The empty set (`TechSet::ANY`)
//!   means "no preference".
//! - **`AccessMode`**: the externally visible technology preference. Legacy
//!   clients express a preference as a single technology word (`"gsm"`),
//!   modern clients as a `+`-joined combination (`"+lte+umts"`). Both
//!   encodings live in one tagged enum.
//! - **`GsmBand` / `UmtsBand`**: frequency band restrictions.
//! - **`LegacyRatTable`**: the mapping a bitmask-capable driver builds so
//!   that legacy single-technology preferences can still be honored.
//!
//! # Example
//!
//! ```rust
//! use rat_types::{AccessMode, Tech, TechSet};
//!
//! let combo = TechSet::from(Tech::Lte) | Tech::Umts;
//! assert_eq!(combo.to_string(), "+lte+umts");
//!
//! let mode: AccessMode = "gsm".parse().unwrap();
//! assert_eq!(mode, AccessMode::Legacy(Tech::Gsm));
//! ```

pub mod band;
pub mod error;
pub mod legacy;
pub mod mode;
pub mod tech;

pub use band::{GsmBand, UmtsBand};
pub use error::ValueError;
pub use legacy::LegacyRatTable;
pub use mode::AccessMode;
pub use tech::{Tech, TechSet};
