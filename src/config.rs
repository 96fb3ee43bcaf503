use embassy_time::Duration;
use heapless::String;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::module_timing::registration_poll_interval;

/// Longest APN the module accepts
pub const APN_MAX_LEN: usize = 29;

/// APN used by the Telenor NB-IoT developer network
pub const DEFAULT_APN: &str = "mda.ee";

/// How eagerly the module releases the radio link after traffic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerSaveMode {
    /// Release the link as soon as a datagram is sent
    #[default]
    SleepAfterSend,
    /// Keep the link until the first reply to a sent datagram
    SleepAfterResponse,
    AlwaysOn,
}

/// Network profile applied by `online()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccessPointConfig {
    apn: String<APN_MAX_LEN>,
    mobile_country_code: Option<u16>,
    mobile_network_code: Option<u16>,
}

impl Default for AccessPointConfig {
    fn default() -> Self {
        let mut apn = String::new();
        let _ = apn.push_str(DEFAULT_APN);
        Self {
            apn,
            mobile_country_code: None,
            mobile_network_code: None,
        }
    }
}

impl AccessPointConfig {
    /// A blank `apn` keeps the network default. Giving both the mobile country
    /// and network code makes the module register on that operator directly,
    /// which is faster than an automatic search.
    ///
    /// The network code is sent with at least two digits, so `Some(0)` selects
    /// MNC `00`. Three digit codes below 100 (e.g. `010`) cannot be expressed.
    pub fn new(
        apn: &str,
        mobile_country_code: Option<u16>,
        mobile_network_code: Option<u16>,
    ) -> Result<Self, Error> {
        Ok(Self {
            apn: String::try_from(apn).map_err(|_| Error::InvalidApn)?,
            mobile_country_code,
            mobile_network_code,
        })
    }

    pub fn apn(&self) -> &str {
        &self.apn
    }

    pub fn mobile_country_code(&self) -> Option<u16> {
        self.mobile_country_code
    }

    pub fn mobile_network_code(&self) -> Option<u16> {
        self.mobile_network_code
    }

    /// `Some((mcc, mnc))` when a specific operator was configured
    pub fn operator(&self) -> Option<(u16, u16)> {
        self.mobile_country_code.zip(self.mobile_network_code)
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub(crate) access_point: AccessPointConfig,
    pub(crate) local_port: u16,
    pub(crate) power_save_mode: PowerSaveMode,
    pub(crate) autosense_attempts: u8,
    pub(crate) poll_interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            access_point: AccessPointConfig::default(),
            local_port: 1234,
            power_save_mode: PowerSaveMode::default(),
            autosense_attempts: 15,
            poll_interval: registration_poll_interval(),
        }
    }
}

impl Config {
    #[must_use]
    pub fn new(access_point: AccessPointConfig) -> Self {
        Self {
            access_point,
            ..Self::default()
        }
    }

    /// Local port the UDP socket is bound to
    #[must_use]
    pub fn with_local_port(self, local_port: u16) -> Self {
        Self { local_port, ..self }
    }

    #[must_use]
    pub fn with_power_save_mode(self, power_save_mode: PowerSaveMode) -> Self {
        Self {
            power_save_mode,
            ..self
        }
    }

    /// Number of `AT` attempts `begin()` sends before giving up
    #[must_use]
    pub fn with_autosense_attempts(self, autosense_attempts: u8) -> Self {
        Self {
            autosense_attempts: autosense_attempts.max(1),
            ..self
        }
    }

    #[must_use]
    pub fn with_poll_interval(self, poll_interval: Duration) -> Self {
        Self {
            poll_interval,
            ..self
        }
    }

    pub fn access_point(&self) -> &AccessPointConfig {
        &self.access_point
    }
}
