//! AT Commands for the u-blox SARA-N2 NB-IoT module\
//! Following the SARA-N2 AT commands manual (UBX-16014887)

pub mod general;
pub mod ip_transport_layer;
pub mod mobile_control;
pub mod network_service;
pub mod psn;

use core::fmt;

use crate::error::Error;
use crate::module_timing::DEFAULT_TIMEOUT_MS;
use crate::response::Response;

/// A command the driver can dispatch, together with the parser for its
/// informational lines.
pub trait AtCmd {
    type Response;

    /// How long to wait for the final result code.
    const MAX_TIMEOUT_MS: u32 = DEFAULT_TIMEOUT_MS;

    /// Informational line that ends the response without a final result code.
    const ACK: Option<&'static str> = None;

    /// Write the command line, without terminator.
    fn write<W: fmt::Write>(&self, w: &mut W) -> fmt::Result;

    fn parse(&self, resp: &Response) -> Result<Self::Response, Error>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoResponse;

/// Attention, checks that the module answers at all
#[derive(Debug, Clone)]
pub struct AT;

impl AtCmd for AT {
    type Response = NoResponse;

    fn write<W: fmt::Write>(&self, w: &mut W) -> fmt::Result {
        w.write_str("AT")
    }

    fn parse(&self, _: &Response) -> Result<NoResponse, Error> {
        Ok(NoResponse)
    }
}

#[cfg(test)]
pub(crate) fn to_line<C: AtCmd>(cmd: &C) -> std::string::String {
    let mut s = std::string::String::new();
    cmd.write(&mut s).unwrap();
    s
}
