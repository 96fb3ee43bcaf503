use core::fmt;

use embassy_time::{Duration, Instant};
use embedded_io::{Read, ReadReady, Write};
use heapless::String;

use crate::{
    command::{
        general::{responses::*, *},
        mobile_control::{types::*, *},
        AtCmd, AT,
    },
    config::{Config, PowerSaveMode},
    error::Error,
    identity::DeviceIdentity,
    registration::RegistrationStatus,
    response::{Feed, LineBuffer, Response},
    socket::State as SocketState,
};

const PREVIEW_LEN: usize = 64;

/// Streams a formatted command straight onto the transport, keeping the
/// first few characters around for logging.
struct CommandWriter<'a, T> {
    transport: &'a mut T,
    preview: String<PREVIEW_LEN>,
}

impl<T: Write> fmt::Write for CommandWriter<'_, T> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for c in s.chars() {
            if self.preview.push(c).is_err() {
                break;
            }
        }
        self.transport
            .write_all(s.as_bytes())
            .map_err(|_| fmt::Error)
    }
}

/// Driver for a SARA-N2 module on a serial transport.
///
/// Every operation writes one or more commands and blocks until the module
/// answers with a final result code, or the command's timeout elapses. Only
/// one command is ever in flight.
pub struct Device<T> {
    transport: T,
    pub(crate) config: Config,
    ingress: LineBuffer,
    pub(crate) socket: SocketState,
    pub(crate) registration: RegistrationStatus,
    pub(crate) power_save_mode: PowerSaveMode,
    imei: Option<u64>,
    imsi: Option<u64>,
}

impl<T> Device<T>
where
    T: Read + Write + ReadReady,
{
    pub fn new(transport: T, config: Config) -> Self {
        let power_save_mode = config.power_save_mode;
        Self {
            transport,
            config,
            ingress: LineBuffer::new(),
            socket: SocketState::Closed,
            registration: RegistrationStatus::NotRegistered,
            power_save_mode,
            imei: None,
            imsi: None,
        }
    }

    /// Give back the transport.
    pub fn release(self) -> T {
        self.transport
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Bring the module to a known state: wait for it to answer, enable
    /// numeric error codes and apply the configured power save mode.
    pub fn begin(&mut self) -> Result<(), Error> {
        self.autosense()?;

        self.send(&SetReportMobileTerminationError {
            n: TerminationErrorMode::Enabled,
        })?;

        let mode = self.config.power_save_mode;
        self.power_save_mode(mode)?;

        debug!("Module initialized");
        Ok(())
    }

    fn autosense(&mut self) -> Result<(), Error> {
        let mut last = Error::Timeout;
        for _ in 0..self.config.autosense_attempts {
            match self.send(&AT) {
                Ok(_) => return Ok(()),
                Err(e) => last = e,
            }
        }
        error!("Module not responding: {:?}", last);
        Err(last)
    }

    /// Dispatch `cmd` and parse its informational lines.
    pub fn send<C: AtCmd>(&mut self, cmd: &C) -> Result<C::Response, Error> {
        let response = self.dispatch(cmd)?;
        cmd.parse(&response).map_err(|e| {
            if e != Error::NoData {
                warn!("Unexpected response: {:?}", e);
            }
            e
        })
    }

    /// Write `cmd` followed by the line terminator, then collect the
    /// response until its final result code.
    ///
    /// Anything left over from an earlier exchange is drained first. There is
    /// no retry, a failed dispatch is reported as is.
    pub fn dispatch<C: AtCmd>(&mut self, cmd: &C) -> Result<Response, Error> {
        self.drain()?;
        self.write_command(cmd)?;
        self.read_response(Duration::from_millis(u64::from(C::MAX_TIMEOUT_MS)), C::ACK)
            .map_err(|e| {
                warn!("Command failed: {:?}", e);
                e
            })
    }

    fn drain(&mut self) -> Result<usize, Error> {
        let mut drained = 0;
        let mut buf = [0u8; 16];
        while self.transport.read_ready().map_err(|_| Error::Transport)? {
            let n = self.transport.read(&mut buf).map_err(|_| Error::Transport)?;
            if n == 0 {
                break;
            }
            drained += n;
        }
        if drained > 0 {
            debug!("Drained {} stale bytes", drained);
        }
        Ok(drained)
    }

    fn write_command<C: AtCmd>(&mut self, cmd: &C) -> Result<(), Error> {
        let mut writer = CommandWriter {
            transport: &mut self.transport,
            preview: String::new(),
        };
        cmd.write(&mut writer).map_err(|_| Error::Transport)?;
        trace!("> {}", writer.preview.as_str());

        self.transport
            .write_all(b"\r\n")
            .map_err(|_| Error::Transport)?;
        self.transport.flush().map_err(|_| Error::Transport)
    }

    fn read_response(&mut self, timeout: Duration, ack: Option<&str>) -> Result<Response, Error> {
        self.ingress.reset();
        let start = Instant::now();
        let mut byte = [0u8; 1];

        loop {
            if start.elapsed() >= timeout {
                let overflowed = self.ingress.is_overflowed();
                self.ingress.reset();
                return Err(if overflowed {
                    Error::Overflow
                } else {
                    Error::Timeout
                });
            }

            if !self.transport.read_ready().map_err(|_| Error::Transport)? {
                continue;
            }
            if self.transport.read(&mut byte).map_err(|_| Error::Transport)? == 0 {
                continue;
            }

            if let Feed::Complete(result) = self.ingress.feed(byte[0], ack) {
                return result;
            }
        }
    }

    /// IMEI of the module, queried once and cached.
    pub fn imei(&mut self) -> Result<u64, Error> {
        if let Some(imei) = self.imei {
            return Ok(imei);
        }
        let IMEI { imei } = self.send(&GetIMEI)?;
        self.imei = Some(imei);
        Ok(imei)
    }

    /// IMSI of the attached SIM, queried once and cached.
    pub fn imsi(&mut self) -> Result<u64, Error> {
        if let Some(imsi) = self.imsi {
            return Ok(imsi);
        }
        let IMSI { imsi } = self.send(&GetIMSI)?;
        self.imsi = Some(imsi);
        Ok(imsi)
    }

    pub fn device_identity(&mut self) -> Result<DeviceIdentity, Error> {
        Ok(DeviceIdentity {
            imei: self.imei()?,
            imsi: self.imsi()?,
        })
    }

    /// Reboot the module.
    ///
    /// Returns as soon as the module acknowledges; it takes a few seconds
    /// (see [`crate::module_timing::boot_time`]) before it accepts commands
    /// again. The socket is closed and cached identities are forgotten,
    /// whether or not the acknowledgement arrived.
    pub fn reboot(&mut self) -> Result<(), Error> {
        let result = self.send(&Reboot).map(|_| ());

        self.socket = SocketState::Closed;
        self.registration = RegistrationStatus::Unknown;
        self.imei = None;
        self.imsi = None;
        info!("Rebooting module");

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::socket::SocketHandle;
    use crate::test_helpers::{device, MockSerial, OK};

    #[test]
    fn dispatch_writes_terminated_line() {
        let serial = MockSerial::new().expect("AT", OK);
        let mut dev = device(serial.clone());

        assert!(dev.dispatch(&AT).unwrap().is_empty());
        assert_eq!(serial.written(), "AT\r\n");
        assert!(serial.is_done());
    }

    #[test]
    fn dispatch_drains_stale_bytes() {
        let serial = MockSerial::new().expect("AT+CSQ", "\r\n+CSQ:12,99\r\n\r\nOK\r\n");
        serial.push_rx("\r\nOK\r\n+CSQ:31,99\r\n");
        let mut dev = device(serial.clone());

        assert_eq!(dev.send(&GetSignalQuality).unwrap().rssi, 12);
    }

    #[test]
    fn dispatch_skips_echo() {
        let serial = MockSerial::new()
            .with_echo()
            .expect("AT+CIMI", "\r\n242016000012345\r\n\r\nOK\r\n");
        let mut dev = device(serial);

        assert_eq!(dev.imsi(), Ok(242_016_000_012_345));
    }

    #[test]
    fn dispatch_times_out_without_final_result_code() {
        let serial = MockSerial::new().expect("AT", "\r\nstill thinking\r\n");
        let mut dev = device(serial);

        let start = std::time::Instant::now();
        assert_eq!(dev.dispatch(&AT), Err(Error::Timeout));
        assert!(start.elapsed() >= std::time::Duration::from_millis(900));
    }

    #[test]
    fn dispatch_reports_rejection() {
        let serial = MockSerial::new().expect("AT+CGSN=1", "\r\n+CME ERROR: 3\r\n");
        let mut dev = device(serial);

        assert_eq!(dev.imei(), Err(Error::Rejected(Some(3))));
    }

    #[test]
    fn dispatch_overflows_on_too_many_lines() {
        let serial = MockSerial::new().expect("AT", "\r\n1\r\n2\r\n3\r\n4\r\n5\r\n6\r\n\r\nOK\r\n");
        let mut dev = device(serial);

        assert_eq!(dev.dispatch(&AT), Err(Error::Overflow));
    }

    #[test]
    fn overflow_without_final_result_code() {
        let serial = MockSerial::new().expect("AT", "\r\n1\r\n2\r\n3\r\n4\r\n5\r\n6\r\n7\r\n");
        let mut dev = device(serial.clone());

        assert_eq!(dev.dispatch(&AT), Err(Error::Overflow));
        assert!(serial.is_done());
    }

    #[test]
    fn reply_is_fully_consumed() {
        let serial = MockSerial::new().expect("AT", OK).expect("AT", OK);
        let mut dev = device(serial.clone());

        dev.dispatch(&AT).unwrap();
        assert_eq!(dev.transport.read_ready(), Ok(false));
        dev.dispatch(&AT).unwrap();
        assert!(serial.is_done());
    }

    #[test]
    fn begin_retries_until_module_answers() {
        let serial = MockSerial::new()
            .expect("AT", "\r\nERROR\r\n")
            .expect("AT", OK)
            .expect("AT+CMEE=1", OK)
            .expect("AT+CPSMS=1", OK);
        let mut dev = device(serial.clone());

        assert_eq!(dev.begin(), Ok(()));
        assert!(serial.is_done());
    }

    #[test]
    fn identity_is_cached() {
        let serial = MockSerial::new()
            .expect("AT+CGSN=1", "\r\n+CGSN:357517080123456\r\n\r\nOK\r\n")
            .expect("AT+CIMI", "\r\n242016000012345\r\n\r\nOK\r\n");
        let mut dev = device(serial.clone());

        let identity = dev.device_identity().unwrap();
        assert_eq!(identity.imei, 357_517_080_123_456);
        assert_eq!(identity.imsi, 242_016_000_012_345);

        // Served from cache, no further commands
        assert_eq!(dev.imei(), Ok(357_517_080_123_456));
        assert_eq!(dev.imsi(), Ok(242_016_000_012_345));
        assert!(serial.is_done());
    }

    #[test]
    fn reboot_resets_state() {
        let serial = MockSerial::new()
            .expect("AT+CGSN=1", "\r\n+CGSN:357517080123456\r\n\r\nOK\r\n")
            .expect("AT+NRB", "\r\nREBOOTING\r\n")
            .expect("AT+CGSN=1", "\r\n+CGSN:357517080123457\r\n\r\nOK\r\n");
        let mut dev = device(serial.clone());
        dev.socket = SocketState::Open {
            handle: SocketHandle(0),
            local_port: 1234,
        };

        assert_eq!(dev.imei(), Ok(357_517_080_123_456));
        assert_eq!(dev.reboot(), Ok(()));
        assert_eq!(dev.socket, SocketState::Closed);
        assert_eq!(dev.registration, RegistrationStatus::Unknown);

        // Boot banner arriving later is drained before the next command
        serial.push_rx("\r\nu-blox\r\nOK\r\n");
        assert_eq!(dev.imei(), Ok(357_517_080_123_457));
        assert!(serial.is_done());
    }
}
