//! ### General Commands
pub mod responses;

use core::fmt;

use responses::*;

use super::AtCmd;
use crate::error::Error;
use crate::fields::split_fields;
use crate::identity::atoi64;
use crate::response::Response;

/// IMEI identification +CGSN
///
/// Returns the International Mobile Equipment Identity (IMEI) of the MT.
/// `<snt>` 1 selects the IMEI, the reply is `+CGSN:<imei>`.
#[derive(Debug, Clone)]
pub struct GetIMEI;

impl AtCmd for GetIMEI {
    type Response = IMEI;

    fn write<W: fmt::Write>(&self, w: &mut W) -> fmt::Result {
        w.write_str("AT+CGSN=1")
    }

    fn parse(&self, resp: &Response) -> Result<IMEI, Error> {
        let line = resp.prefixed("+CGSN:").ok_or(Error::InvalidResponse)?;
        let fields = split_fields(line)?;
        let imei = fields.first().ok_or(Error::InvalidResponse)?;
        Ok(IMEI {
            imei: atoi64(imei.trim())?,
        })
    }
}

/// International mobile subscriber identification +CIMI
///
/// Request the IMSI of the SIM. The reply is the bare number.
#[derive(Debug, Clone)]
pub struct GetIMSI;

impl AtCmd for GetIMSI {
    type Response = IMSI;

    fn write<W: fmt::Write>(&self, w: &mut W) -> fmt::Result {
        w.write_str("AT+CIMI")
    }

    fn parse(&self, resp: &Response) -> Result<IMSI, Error> {
        let line = resp.unprefixed().ok_or(Error::InvalidResponse)?;
        Ok(IMSI { imsi: atoi64(line)? })
    }
}
