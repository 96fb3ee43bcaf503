//! Responses for General Commands

/// IMEI identification +CGSN
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IMEI {
    pub imei: u64,
}

/// International mobile subscriber identification +CIMI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IMSI {
    /// International Mobile Subscriber Identity
    pub imsi: u64,
}
