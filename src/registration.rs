use serde::{Deserialize, Serialize};

/// EPS registration state of the module, as reported by `+CEREG`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegistrationStatus {
    /// Query failed, or the module reported "unknown"
    Unknown,
    #[default]
    NotRegistered,
    /// Registered on the home network or roaming
    Registered,
    /// Searching for an operator to register on
    Registering,
    Denied,
}

impl RegistrationStatus {
    pub fn is_registered(self) -> bool {
        self == Self::Registered
    }
}

/// Convert the 3GPP `<stat>` value of a `+CEREG` reply.
impl From<u8> for RegistrationStatus {
    fn from(v: u8) -> Self {
        match v {
            0 => Self::NotRegistered,
            1 | 5 => Self::Registered,
            2 => Self::Registering,
            3 => Self::Denied,
            _ => Self::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_3gpp_stat() {
        assert_eq!(RegistrationStatus::from(0), RegistrationStatus::NotRegistered);
        assert_eq!(RegistrationStatus::from(1), RegistrationStatus::Registered);
        assert_eq!(RegistrationStatus::from(2), RegistrationStatus::Registering);
        assert_eq!(RegistrationStatus::from(3), RegistrationStatus::Denied);
        assert_eq!(RegistrationStatus::from(4), RegistrationStatus::Unknown);
        assert_eq!(RegistrationStatus::from(5), RegistrationStatus::Registered);
        assert_eq!(RegistrationStatus::from(80), RegistrationStatus::Unknown);
    }
}
