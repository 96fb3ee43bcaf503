//! Responses for Packet Switched Commands
use super::types::GPRSAttachedState;
use crate::registration::RegistrationStatus;

/// GPRS attach or detach +CGATT
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GPRSAttached {
    pub state: GPRSAttachedState,
}

/// EPS network registration status +CEREG
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EPSNetworkRegistrationStatus {
    /// URC configuration `<n>`
    pub n: u8,
    pub stat: RegistrationStatus,
}
