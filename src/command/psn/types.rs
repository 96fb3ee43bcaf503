//! Argument and parameter types used by Packet Switched Commands and Responses

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GPRSAttachedState {
    Detached = 0,
    Attached = 1,
}

/// `<mode>` of +CPSMS
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerSavingState {
    /// 0: power saving mode disabled
    Disabled = 0,
    /// 1: power saving mode enabled
    Enabled = 1,
}
