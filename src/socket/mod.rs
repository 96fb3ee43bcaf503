//! The module's single UDP socket.
mod udp;
#[cfg(feature = "socket-udp")]
mod udp_stack;

use core::fmt;
use core::net::SocketAddrV4;

use serde::{Deserialize, Serialize};

use crate::error::Error;

#[cfg(feature = "socket-udp")]
pub use udp_stack::UdpSocket;

/// Largest datagram the module accepts in one send
pub const MAX_PACKET_SIZE: usize = 512;

/// Bytes requested per receive, so the hex line stays within a response line
pub const MAX_RECEIVE_CHUNK: usize = 100;

/// Socket number assigned by the module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SocketHandle(pub u8);

impl fmt::Display for SocketHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    #[default]
    Closed,
    Open {
        handle: SocketHandle,
        local_port: u16,
    },
}

impl State {
    pub fn is_open(&self) -> bool {
        matches!(self, State::Open { .. })
    }

    pub(crate) fn handle(&self) -> Result<SocketHandle, Error> {
        match self {
            State::Open { handle, .. } => Ok(*handle),
            State::Closed => Err(Error::NotReady),
        }
    }
}

/// Outcome of a receive into a caller buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Received {
    /// Bytes written to the buffer
    pub length: usize,
    /// Bytes of the same datagram still held by the module
    pub remaining: usize,
}

/// Like [`Received`], with the sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Datagram {
    pub remote: SocketAddrV4,
    pub length: usize,
    pub remaining: usize,
}
