//! Argument and parameter types used by Mobile equipment control and status Commands and Responses

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Functionality {
    /// 1: full functionality
    Full = 1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TerminationErrorMode {
    /// 0: +CME ERROR: <err> result code disabled and ERROR used
    Disabled = 0,
    /// 1: +CME ERROR: <err> result code enabled and numeric <err> values used
    Enabled = 1,
}

/// `<rssi>` reported when the signal strength is not known or not detectable
pub const RSSI_NOT_DETECTABLE: u8 = 99;

/// Largest valid `<rssi>`, -51 dBm or greater
pub const RSSI_MAX: u8 = 31;
