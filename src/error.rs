use core::fmt;

use crate::hex::FromHexError;
use crate::identity::ParseIdentityError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[non_exhaustive]
pub enum Error {
    /// No terminal line arrived within the command's time budget
    Timeout,
    /// More lines, or longer lines, than the fixed buffers can hold
    Overflow,
    /// The module answered `ERROR`, optionally with a `+CME`/`+CMS` code
    Rejected(Option<u16>),
    /// Operation attempted in a state that does not allow it, e.g. sending
    /// before a socket is created
    NotReady,
    /// The module has no pending datagram
    NoData,
    PayloadTooLarge,
    InvalidResponse,
    InvalidApn,
    Transport,
    Unsupported,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Timeout => f.write_str("timed out waiting for a final result code"),
            Self::Overflow => f.write_str("response exceeded the line buffer capacity"),
            Self::Rejected(Some(code)) => write!(f, "module rejected command with code {}", code),
            Self::Rejected(None) => f.write_str("module rejected command"),
            Self::NotReady => f.write_str("socket is not in a state that allows this operation"),
            Self::NoData => f.write_str("no pending data"),
            Self::PayloadTooLarge => f.write_str("payload exceeds the maximum packet size"),
            Self::InvalidResponse => f.write_str("malformed response"),
            Self::InvalidApn => f.write_str("access point name too long"),
            Self::Transport => f.write_str("serial transport error"),
            Self::Unsupported => f.write_str("unsupported"),
        }
    }
}

impl From<FromHexError> for Error {
    fn from(_: FromHexError) -> Self {
        Self::InvalidResponse
    }
}

impl From<ParseIdentityError> for Error {
    fn from(_: ParseIdentityError) -> Self {
        Self::InvalidResponse
    }
}
