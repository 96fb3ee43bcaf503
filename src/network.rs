use embassy_time::{block_for, Duration, Instant};
use embedded_io::{Read, ReadReady, Write};

use crate::client::Device;
use crate::command::{
    mobile_control::{types::*, GetSignalQuality, SetModuleFunctionality},
    network_service::{types::OperatorSelectionMode, SetOperatorSelection},
    psn::{responses::*, types::*, *},
};
use crate::config::PowerSaveMode;
use crate::error::Error;
use crate::registration::RegistrationStatus;

impl<T> Device<T>
where
    T: Read + Write + ReadReady,
{
    /// Switch the radio on and start registering.
    ///
    /// The configured APN is applied when set, and a configured operator is
    /// selected directly instead of searching. Returns once the module has
    /// accepted the commands, registration continues in the background (see
    /// [`Device::wait_for_registration`]).
    pub fn online(&mut self) -> Result<(), Error> {
        self.send(&SetModuleFunctionality {
            fun: Functionality::Full,
        })?;

        let access_point = self.config.access_point.clone();
        if !access_point.apn().is_empty() {
            self.send(&SetPDPContextDefinition {
                cid: 0,
                apn: access_point.apn(),
            })?;
        }

        let mode = match access_point.operator() {
            Some((mobile_country_code, mobile_network_code)) => OperatorSelectionMode::Manual {
                mobile_country_code,
                mobile_network_code,
            },
            None => OperatorSelectionMode::Automatic,
        };
        self.send(&SetOperatorSelection { mode })?;

        self.send(&SetGPRSAttached {
            state: GPRSAttachedState::Attached,
        })?;

        self.registration = RegistrationStatus::Registering;
        info!("Registering on network");
        Ok(())
    }

    /// Deregister from the network.
    pub fn offline(&mut self) -> Result<(), Error> {
        self.send(&SetOperatorSelection {
            mode: OperatorSelectionMode::Deregister,
        })?;
        self.registration = RegistrationStatus::NotRegistered;
        info!("Deregistered from network");
        Ok(())
    }

    /// Query the EPS registration state.
    ///
    /// A failed query yields [`RegistrationStatus::Unknown`] and keeps the
    /// last known state.
    pub fn registration_status(&mut self) -> RegistrationStatus {
        match self.send(&GetEPSNetworkRegistrationStatus) {
            Ok(EPSNetworkRegistrationStatus { stat, .. }) => {
                if stat != self.registration {
                    debug!("Registration status {:?} -> {:?}", self.registration, stat);
                }
                self.registration = stat;
                stat
            }
            Err(_) => RegistrationStatus::Unknown,
        }
    }

    /// Registration state as of the last successful query or network command.
    pub fn last_registration_status(&self) -> RegistrationStatus {
        self.registration
    }

    pub fn is_registered(&mut self) -> bool {
        self.registration_status().is_registered()
    }

    pub fn is_registering(&mut self) -> bool {
        self.registration_status() == RegistrationStatus::Registering
    }

    /// Poll the registration state until registered, or until `timeout`.
    ///
    /// Fails with [`Error::Rejected`] as soon as the network denies
    /// registration.
    pub fn wait_for_registration(&mut self, timeout: Duration) -> Result<(), Error> {
        let start = Instant::now();
        loop {
            match self.registration_status() {
                RegistrationStatus::Registered => return Ok(()),
                RegistrationStatus::Denied => {
                    error!("Registration denied");
                    return Err(Error::Rejected(None));
                }
                _ => {}
            }

            if start.elapsed() >= timeout {
                return Err(Error::Timeout);
            }
            block_for(self.config.poll_interval);
        }
    }

    /// Packet domain attach state. Any failure reads as detached.
    pub fn is_connected(&mut self) -> bool {
        matches!(
            self.send(&GetGPRSAttached),
            Ok(GPRSAttached {
                state: GPRSAttachedState::Attached
            })
        )
    }

    /// Received signal strength, 0 to 31, or 99 when not known.
    pub fn rssi(&mut self) -> u8 {
        match self.send(&GetSignalQuality) {
            Ok(quality) if quality.rssi <= RSSI_MAX => quality.rssi,
            _ => RSSI_NOT_DETECTABLE,
        }
    }

    /// Enable or disable power saving. The mode also selects how sent
    /// datagrams release the radio link.
    pub fn power_save_mode(&mut self, mode: PowerSaveMode) -> Result<(), Error> {
        let state = match mode {
            PowerSaveMode::AlwaysOn => PowerSavingState::Disabled,
            PowerSaveMode::SleepAfterSend | PowerSaveMode::SleepAfterResponse => {
                PowerSavingState::Enabled
            }
        };
        self.send(&SetPowerSavingMode { mode: state })?;
        self.power_save_mode = mode;
        Ok(())
    }

    pub fn current_power_save_mode(&self) -> PowerSaveMode {
        self.power_save_mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AccessPointConfig, Config};
    use crate::test_helpers::{device, device_with, MockSerial, OK};

    #[test]
    fn online_default_profile() {
        let serial = MockSerial::new()
            .expect("AT+CFUN=1", OK)
            .expect("AT+CGDCONT=0,\"IP\",\"mda.ee\"", OK)
            .expect("AT+COPS=0", OK)
            .expect("AT+CGATT=1", OK);
        let mut dev = device(serial.clone());

        assert_eq!(dev.online(), Ok(()));
        assert_eq!(dev.last_registration_status(), RegistrationStatus::Registering);
        assert!(serial.is_done());
    }

    #[test]
    fn online_with_operator() {
        let access_point = AccessPointConfig::new("", Some(242), Some(1)).unwrap();
        let serial = MockSerial::new()
            .expect("AT+CFUN=1", OK)
            .expect("AT+COPS=1,2,\"24201\"", OK)
            .expect("AT+CGATT=1", OK);
        let mut dev = device_with(serial.clone(), Config::new(access_point));

        assert_eq!(dev.online(), Ok(()));
        assert!(serial.is_done());
    }

    #[test]
    fn online_stops_at_first_failure() {
        let serial = MockSerial::new().expect("AT+CFUN=1", "\r\n+CME ERROR: 50\r\n");
        let mut dev = device(serial.clone());

        assert_eq!(dev.online(), Err(Error::Rejected(Some(50))));
        assert_eq!(dev.last_registration_status(), RegistrationStatus::NotRegistered);
        assert!(serial.is_done());
    }

    #[test]
    fn offline_deregisters() {
        let serial = MockSerial::new().expect("AT+COPS=2", OK);
        let mut dev = device(serial);
        dev.registration = RegistrationStatus::Registered;

        assert_eq!(dev.offline(), Ok(()));
        assert_eq!(dev.last_registration_status(), RegistrationStatus::NotRegistered);
    }

    #[test]
    fn registration_failure_keeps_last_state() {
        let serial = MockSerial::new()
            .expect("AT+CEREG?", "\r\n+CEREG:0,1\r\n\r\nOK\r\n")
            .expect("AT+CEREG?", "\r\nERROR\r\n");
        let mut dev = device(serial);

        assert!(dev.is_registered());
        assert_eq!(dev.registration_status(), RegistrationStatus::Unknown);
        assert_eq!(dev.last_registration_status(), RegistrationStatus::Registered);
    }

    #[test]
    fn wait_for_registration_polls() {
        let serial = MockSerial::new()
            .expect("AT+CEREG?", "\r\n+CEREG:0,2\r\n\r\nOK\r\n")
            .expect("AT+CEREG?", "\r\n+CEREG:0,2\r\n\r\nOK\r\n")
            .expect("AT+CEREG?", "\r\n+CEREG:0,5\r\n\r\nOK\r\n");
        let config = Config::default().with_poll_interval(Duration::from_millis(10));
        let mut dev = device_with(serial.clone(), config);

        assert_eq!(dev.wait_for_registration(Duration::from_secs(5)), Ok(()));
        assert!(serial.is_done());
    }

    #[test]
    fn registers_after_going_online() {
        let serial = MockSerial::new()
            .expect("AT+CEREG?", "\r\n+CEREG:0,0\r\n\r\nOK\r\n")
            .expect("AT+CFUN=1", OK)
            .expect("AT+CGDCONT=0,\"IP\",\"mda.ee\"", OK)
            .expect("AT+COPS=0", OK)
            .expect("AT+CGATT=1", OK)
            .expect("AT+CEREG?", "\r\n+CEREG:0,2\r\n\r\nOK\r\n")
            .expect(
                "AT+CEREG?",
                "\r\n+CEREG:5,1,\"1A2B\",\"01A2B3C4\",9,,,\"00100100\",\"01000111\"\r\n\r\nOK\r\n",
            );
        let config = Config::default().with_poll_interval(Duration::from_millis(10));
        let mut dev = device_with(serial.clone(), config);

        assert!(matches!(
            dev.registration_status(),
            RegistrationStatus::NotRegistered | RegistrationStatus::Unknown
        ));
        assert_eq!(dev.online(), Ok(()));
        assert_eq!(dev.wait_for_registration(Duration::from_secs(5)), Ok(()));
        assert_eq!(dev.last_registration_status(), RegistrationStatus::Registered);
        assert!(serial.is_done());
    }

    #[test]
    fn wait_for_registration_denied() {
        let serial = MockSerial::new().expect("AT+CEREG?", "\r\n+CEREG:0,3\r\n\r\nOK\r\n");
        let mut dev = device(serial);

        assert_eq!(
            dev.wait_for_registration(Duration::from_secs(5)),
            Err(Error::Rejected(None))
        );
        assert_eq!(dev.last_registration_status(), RegistrationStatus::Denied);
    }

    #[test]
    fn wait_for_registration_times_out() {
        let serial = MockSerial::new()
            .expect("AT+CEREG?", "\r\n+CEREG:0,0\r\n\r\nOK\r\n")
            .expect("AT+CEREG?", "\r\n+CEREG:0,0\r\n\r\nOK\r\n");
        let config = Config::default().with_poll_interval(Duration::from_millis(60));
        let mut dev = device_with(serial, config);

        assert_eq!(
            dev.wait_for_registration(Duration::from_millis(50)),
            Err(Error::Timeout)
        );
    }

    #[test]
    fn rssi_and_attach_state() {
        let serial = MockSerial::new()
            .expect("AT+CSQ", "\r\n+CSQ:17,99\r\n\r\nOK\r\n")
            .expect("AT+CSQ", "\r\n+CSQ:99,99\r\n\r\nOK\r\n")
            .expect("AT+CSQ", "\r\nERROR\r\n")
            .expect("AT+CGATT?", "\r\n+CGATT:1\r\n\r\nOK\r\n")
            .expect("AT+CGATT?", "\r\n+CGATT:0\r\n\r\nOK\r\n");
        let mut dev = device(serial.clone());

        assert_eq!(dev.rssi(), 17);
        assert_eq!(dev.rssi(), RSSI_NOT_DETECTABLE);
        assert_eq!(dev.rssi(), RSSI_NOT_DETECTABLE);
        assert!(dev.is_connected());
        assert!(!dev.is_connected());
        assert!(serial.is_done());
    }

    #[test]
    fn power_save_mode_is_stored() {
        let serial = MockSerial::new()
            .expect("AT+CPSMS=0", OK)
            .expect("AT+CPSMS=1", "\r\nERROR\r\n");
        let mut dev = device(serial);

        assert_eq!(dev.power_save_mode(PowerSaveMode::AlwaysOn), Ok(()));
        assert_eq!(dev.current_power_save_mode(), PowerSaveMode::AlwaysOn);

        assert!(dev.power_save_mode(PowerSaveMode::SleepAfterResponse).is_err());
        assert_eq!(dev.current_power_save_mode(), PowerSaveMode::AlwaysOn);
    }
}
