//! Argument and parameter types used by Network service Commands and Responses

/// Is used to chose whether the network selection is automatically done by
/// the MT or is forced to a specific operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OperatorSelectionMode {
    /// • 0: automatic (`<oper>` field is ignored)
    Automatic,
    /// • 1: manual, `<oper>` in numeric format, `<mcc><mnc>`
    Manual {
        mobile_country_code: u16,
        mobile_network_code: u16,
    },
    /// • 2: deregister from network
    Deregister,
}
