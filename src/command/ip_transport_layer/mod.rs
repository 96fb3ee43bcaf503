//! ### Internet protocol transport layer Commands
//!
//! Datagram sockets of the module's own IP stack. Payloads travel hex encoded.
pub mod responses;
pub mod types;

use core::fmt;
use core::net::{Ipv4Addr, SocketAddrV4};

use heapless::Vec;
use responses::*;
use types::*;

use super::{AtCmd, NoResponse};
use crate::error::Error;
use crate::fields::{parse_field, split_fields};
use crate::hex::{from_hex, Hex};
use crate::module_timing::SOCKET_TIMEOUT_MS;
use crate::response::Response;
use crate::socket::SocketHandle;

/// Create socket +NSOCR
///
/// Creates a socket bound to `<listen_port>`. With `<receive_control>` 1
/// incoming datagrams are buffered and announced with `+NSONMI`.
#[derive(Debug, Clone)]
pub struct CreateSocket {
    pub socket_type: SocketType,
    pub protocol: SocketProtocol,
    pub listen_port: u16,
    pub receive_control: bool,
}

impl AtCmd for CreateSocket {
    type Response = CreateSocketResponse;
    const MAX_TIMEOUT_MS: u32 = SOCKET_TIMEOUT_MS;

    fn write<W: fmt::Write>(&self, w: &mut W) -> fmt::Result {
        let socket_type = match self.socket_type {
            SocketType::Dgram => "DGRAM",
        };
        write!(
            w,
            "AT+NSOCR=\"{}\",{},{},{}",
            socket_type,
            self.protocol as u8,
            self.listen_port,
            u8::from(self.receive_control)
        )
    }

    fn parse(&self, resp: &Response) -> Result<CreateSocketResponse, Error> {
        let line = resp.unprefixed().ok_or(Error::InvalidResponse)?;
        let fields = split_fields(line)?;
        Ok(CreateSocketResponse {
            socket: SocketHandle(parse_field(&fields, 0)?),
        })
    }
}

/// Send to +NSOST / +NSOSTF
///
/// Sends a datagram to `<remote>`. With a release indicator the flagged
/// variant +NSOSTF is used, so the module can drop the radio link early.
#[derive(Debug, Clone)]
pub struct SendTo<'a> {
    pub socket: SocketHandle,
    pub remote: SocketAddrV4,
    pub release: Option<ReleaseIndicator>,
    pub data: &'a [u8],
}

impl AtCmd for SendTo<'_> {
    type Response = SendToResponse;
    const MAX_TIMEOUT_MS: u32 = SOCKET_TIMEOUT_MS;

    fn write<W: fmt::Write>(&self, w: &mut W) -> fmt::Result {
        match self.release {
            Some(flag) => write!(
                w,
                "AT+NSOSTF={},\"{}\",{},0x{:X},",
                self.socket,
                self.remote.ip(),
                self.remote.port(),
                flag as u16
            )?,
            None => write!(
                w,
                "AT+NSOST={},\"{}\",{},",
                self.socket,
                self.remote.ip(),
                self.remote.port()
            )?,
        }
        write!(w, "{},\"{}\"", self.data.len(), Hex(self.data))
    }

    fn parse(&self, resp: &Response) -> Result<SendToResponse, Error> {
        let line = resp.unprefixed().ok_or(Error::InvalidResponse)?;
        let fields = split_fields(line)?;
        Ok(SendToResponse {
            socket: SocketHandle(parse_field(&fields, 0)?),
            length: parse_field(&fields, 1)?,
        })
    }
}

/// Receive from +NSORF
///
/// Reads at most `<req_length>` bytes of the oldest pending datagram. A bare
/// `OK` means nothing is pending.
#[derive(Debug, Clone)]
pub struct ReceiveFrom {
    pub socket: SocketHandle,
    pub length: usize,
}

impl AtCmd for ReceiveFrom {
    type Response = SocketData;
    const MAX_TIMEOUT_MS: u32 = SOCKET_TIMEOUT_MS;

    fn write<W: fmt::Write>(&self, w: &mut W) -> fmt::Result {
        write!(w, "AT+NSORF={},{}", self.socket, self.length)
    }

    fn parse(&self, resp: &Response) -> Result<SocketData, Error> {
        let Some(line) = resp.unprefixed() else {
            return Err(Error::NoData);
        };
        let fields = split_fields(line)?;

        let length: usize = parse_field(&fields, 3)?;
        if length == 0 {
            return Err(Error::NoData);
        }

        let mut data = Vec::new();
        data.resize(length, 0).map_err(|_| Error::Overflow)?;
        let hex = fields.get(4).ok_or(Error::InvalidResponse)?;
        if from_hex(hex, &mut data)? != length {
            return Err(Error::InvalidResponse);
        }

        let ip: Ipv4Addr = parse_field(&fields, 1)?;
        Ok(SocketData {
            socket: SocketHandle(parse_field(&fields, 0)?),
            remote: SocketAddrV4::new(ip, parse_field(&fields, 2)?),
            data,
            remaining: parse_field(&fields, 5)?,
        })
    }
}

/// Close socket +NSOCL
#[derive(Debug, Clone)]
pub struct CloseSocket {
    pub socket: SocketHandle,
}

impl AtCmd for CloseSocket {
    type Response = NoResponse;
    const MAX_TIMEOUT_MS: u32 = SOCKET_TIMEOUT_MS;

    fn write<W: fmt::Write>(&self, w: &mut W) -> fmt::Result {
        write!(w, "AT+NSOCL={}", self.socket)
    }

    fn parse(&self, _: &Response) -> Result<NoResponse, Error> {
        Ok(NoResponse)
    }
}
