//! ### Mobile equipment control and status Commands
pub mod responses;
pub mod types;

use core::fmt;

use responses::*;
use types::*;

use super::{AtCmd, NoResponse};
use crate::error::Error;
use crate::fields::{parse_field, split_fields};
use crate::module_timing::NETWORK_TIMEOUT_MS;
use crate::response::Response;

/// Set module functionality +CFUN
///
/// Selects the level of functionality `<fun>` in the MT.
#[derive(Debug, Clone)]
pub struct SetModuleFunctionality {
    pub fun: Functionality,
}

impl AtCmd for SetModuleFunctionality {
    type Response = NoResponse;
    const MAX_TIMEOUT_MS: u32 = NETWORK_TIMEOUT_MS;

    fn write<W: fmt::Write>(&self, w: &mut W) -> fmt::Result {
        write!(w, "AT+CFUN={}", self.fun as u8)
    }

    fn parse(&self, _: &Response) -> Result<NoResponse, Error> {
        Ok(NoResponse)
    }
}

/// Report mobile termination error +CMEE
///
/// Configures the formatting of the result code `+CME ERROR: <err>` as an
/// indication of an error relating to the functionality of the MT.
#[derive(Debug, Clone)]
pub struct SetReportMobileTerminationError {
    pub n: TerminationErrorMode,
}

impl AtCmd for SetReportMobileTerminationError {
    type Response = NoResponse;

    fn write<W: fmt::Write>(&self, w: &mut W) -> fmt::Result {
        write!(w, "AT+CMEE={}", self.n as u8)
    }

    fn parse(&self, _: &Response) -> Result<NoResponse, Error> {
        Ok(NoResponse)
    }
}

/// Signal quality +CSQ
///
/// Returns the received signal strength indication `<rssi>` and the channel
/// bit error rate `<ber>`.
#[derive(Debug, Clone)]
pub struct GetSignalQuality;

impl AtCmd for GetSignalQuality {
    type Response = SignalQuality;

    fn write<W: fmt::Write>(&self, w: &mut W) -> fmt::Result {
        w.write_str("AT+CSQ")
    }

    fn parse(&self, resp: &Response) -> Result<SignalQuality, Error> {
        let line = resp.prefixed("+CSQ:").ok_or(Error::InvalidResponse)?;
        let fields = split_fields(line)?;
        Ok(SignalQuality {
            rssi: parse_field(&fields, 0)?,
            ber: parse_field(&fields, 1)?,
        })
    }
}

/// Reboot +NRB
///
/// Reboots the module. `REBOOTING` is printed straight away, the final `OK`
/// only follows once the module has restarted, several seconds later.
#[derive(Debug, Clone)]
pub struct Reboot;

impl AtCmd for Reboot {
    type Response = NoResponse;
    const ACK: Option<&'static str> = Some("REBOOTING");

    fn write<W: fmt::Write>(&self, w: &mut W) -> fmt::Result {
        w.write_str("AT+NRB")
    }

    fn parse(&self, _: &Response) -> Result<NoResponse, Error> {
        Ok(NoResponse)
    }
}
