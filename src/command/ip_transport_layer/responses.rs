//! Responses for Internet protocol transport layer Commands
use core::net::SocketAddrV4;
use heapless::Vec;

use crate::socket::{SocketHandle, MAX_RECEIVE_CHUNK};

/// Create socket +NSOCR
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateSocketResponse {
    pub socket: SocketHandle,
}

/// Send to +NSOST / +NSOSTF
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendToResponse {
    pub socket: SocketHandle,
    pub length: usize,
}

/// Receive from +NSORF
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocketData {
    pub socket: SocketHandle,
    pub remote: SocketAddrV4,
    /// Hex decoded payload
    pub data: Vec<u8, MAX_RECEIVE_CHUNK>,
    /// Bytes still buffered in the module for this socket
    pub remaining: usize,
}
