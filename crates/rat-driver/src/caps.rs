//! Driver capability flags

/// The set of operations a driver implements
///
/// One flag per operation of the driver contract. A clear flag means the
/// feature is absent on this modem, not that calls will fail: the settings
/// core skips the operation entirely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DriverCaps {
    /// Can report the current band pair
    pub query_band: bool,
    /// Can change the band pair
    pub set_band: bool,
    /// Can report fast dormancy state
    pub query_fast_dormancy: bool,
    /// Can change fast dormancy state
    pub set_fast_dormancy: bool,
    /// Can report the current technology preference
    pub query_rat_mode: bool,
    /// Can change the technology preference
    pub set_rat_mode: bool,
    /// Can report supported technologies as a legacy tier bitmask
    pub query_available_rats: bool,
    /// Can report supported technologies as a list of combinations
    pub query_available_rat_modes: bool,
}

impl DriverCaps {
    /// A driver that only handles the technology preference, legacy style
    pub fn rat_mode_only() -> DriverCaps {
        DriverCaps {
            query_rat_mode: true,
            set_rat_mode: true,
            ..DriverCaps::default()
        }
    }

    /// A fully featured legacy driver (single-technology preferences only)
    pub fn legacy_full() -> DriverCaps {
        DriverCaps {
            query_band: true,
            set_band: true,
            query_fast_dormancy: true,
            set_fast_dormancy: true,
            query_rat_mode: true,
            set_rat_mode: true,
            query_available_rats: true,
            query_available_rat_modes: false,
        }
    }

    /// A fully featured bitmask-capable driver
    pub fn modern_full() -> DriverCaps {
        DriverCaps {
            query_band: true,
            set_band: true,
            query_fast_dormancy: true,
            set_fast_dormancy: true,
            query_rat_mode: true,
            set_rat_mode: true,
            query_available_rats: true,
            query_available_rat_modes: true,
        }
    }
}
