//! ### Packet Switched Commands
pub mod responses;
pub mod types;

use core::fmt;

use responses::*;
use types::*;

use super::{AtCmd, NoResponse};
use crate::error::Error;
use crate::fields::{parse_field, split_fields};
use crate::module_timing::NETWORK_TIMEOUT_MS;
use crate::registration::RegistrationStatus;
use crate::response::Response;

/// PDP context definition +CGDCONT
///
/// Defines the APN used for context `<cid>`. The module only supports the
/// `"IP"` PDP type.
#[derive(Debug, Clone)]
pub struct SetPDPContextDefinition<'a> {
    pub cid: u8,
    pub apn: &'a str,
}

impl AtCmd for SetPDPContextDefinition<'_> {
    type Response = NoResponse;

    fn write<W: fmt::Write>(&self, w: &mut W) -> fmt::Result {
        write!(w, "AT+CGDCONT={},\"IP\",\"{}\"", self.cid, self.apn)
    }

    fn parse(&self, _: &Response) -> Result<NoResponse, Error> {
        Ok(NoResponse)
    }
}

/// GPRS attach or detach +CGATT
///
/// Register (attach) the MT to, or deregister (detach) the MT from the packet
/// domain service.
#[derive(Debug, Clone)]
pub struct SetGPRSAttached {
    pub state: GPRSAttachedState,
}

impl AtCmd for SetGPRSAttached {
    type Response = NoResponse;
    const MAX_TIMEOUT_MS: u32 = NETWORK_TIMEOUT_MS;

    fn write<W: fmt::Write>(&self, w: &mut W) -> fmt::Result {
        write!(w, "AT+CGATT={}", self.state as u8)
    }

    fn parse(&self, _: &Response) -> Result<NoResponse, Error> {
        Ok(NoResponse)
    }
}

/// GPRS attach or detach +CGATT
///
/// Read the packet domain attach state.
#[derive(Debug, Clone)]
pub struct GetGPRSAttached;

impl AtCmd for GetGPRSAttached {
    type Response = GPRSAttached;

    fn write<W: fmt::Write>(&self, w: &mut W) -> fmt::Result {
        w.write_str("AT+CGATT?")
    }

    fn parse(&self, resp: &Response) -> Result<GPRSAttached, Error> {
        let line = resp.prefixed("+CGATT:").ok_or(Error::InvalidResponse)?;
        let fields = split_fields(line)?;
        let state = match parse_field::<u8>(&fields, 0)? {
            0 => GPRSAttachedState::Detached,
            1 => GPRSAttachedState::Attached,
            _ => return Err(Error::InvalidResponse),
        };
        Ok(GPRSAttached { state })
    }
}

/// EPS network registration status +CEREG
///
/// Reads the EPS registration state `<stat>`. Any location fields after it
/// are ignored.
#[derive(Debug, Clone)]
pub struct GetEPSNetworkRegistrationStatus;

impl AtCmd for GetEPSNetworkRegistrationStatus {
    type Response = EPSNetworkRegistrationStatus;

    fn write<W: fmt::Write>(&self, w: &mut W) -> fmt::Result {
        w.write_str("AT+CEREG?")
    }

    fn parse(&self, resp: &Response) -> Result<EPSNetworkRegistrationStatus, Error> {
        let line = resp.prefixed("+CEREG:").ok_or(Error::InvalidResponse)?;
        let fields = split_fields(line)?;
        Ok(EPSNetworkRegistrationStatus {
            n: parse_field(&fields, 0)?,
            stat: RegistrationStatus::from(parse_field::<u8>(&fields, 1)?),
        })
    }
}

/// Power saving mode setting +CPSMS
///
/// Controls whether the UE uses 3GPP power saving mode between transfers.
#[derive(Debug, Clone)]
pub struct SetPowerSavingMode {
    pub mode: PowerSavingState,
}

impl AtCmd for SetPowerSavingMode {
    type Response = NoResponse;

    fn write<W: fmt::Write>(&self, w: &mut W) -> fmt::Result {
        write!(w, "AT+CPSMS={}", self.mode as u8)
    }

    fn parse(&self, _: &Response) -> Result<NoResponse, Error> {
        Ok(NoResponse)
    }
}
