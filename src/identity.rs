//! IMEI / IMSI conversion
//!
//! Both identifiers are decimal strings of up to 15 digits, which does not fit
//! in 32 bits, so they are carried around as `u64`.

use core::fmt;
use heapless::String;
use serde::{Deserialize, Serialize};

/// Longest accepted identifier, in digits.
pub const MAX_IDENTITY_DIGITS: usize = 15;

/// Enough room for any `u64`.
pub const IDENTITY_STR_LEN: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseIdentityError {
    Empty,
    TooLong,
    InvalidDigit,
}

impl fmt::Display for ParseIdentityError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("empty identity"),
            Self::TooLong => f.write_str("identity longer than 15 digits"),
            Self::InvalidDigit => f.write_str("identity contains a non-digit"),
        }
    }
}

/// Module and SIM identity, as reported by `AT+CGSN=1` and `AT+CIMI`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceIdentity {
    pub imei: u64,
    pub imsi: u64,
}

/// Parse a decimal identity string into its exact integer value.
///
/// Inputs longer than [`MAX_IDENTITY_DIGITS`] are rejected rather than
/// truncated, so the result is always exact.
pub fn atoi64(digits: &str) -> Result<u64, ParseIdentityError> {
    if digits.is_empty() {
        return Err(ParseIdentityError::Empty);
    }
    if digits.len() > MAX_IDENTITY_DIGITS {
        return Err(ParseIdentityError::TooLong);
    }

    digits.bytes().try_fold(0u64, |acc, b| match b {
        b'0'..=b'9' => Ok(acc * 10 + u64::from(b - b'0')),
        _ => Err(ParseIdentityError::InvalidDigit),
    })
}

/// Render an identity in natural width. IMEI and IMSI values never start with
/// a zero digit, so this is the inverse of [`atoi64`] for them.
pub fn i64toa(value: u64) -> String<IDENTITY_STR_LEN> {
    let mut digits = [0u8; IDENTITY_STR_LEN];
    let mut start = IDENTITY_STR_LEN;
    let mut rest = value;
    loop {
        start -= 1;
        digits[start] = b'0' + (rest % 10) as u8;
        rest /= 10;
        if rest == 0 {
            break;
        }
    }

    let mut s = String::new();
    for &d in &digits[start..] {
        // At most 20 digits, always fits
        let _ = s.push(char::from(d));
    }
    s
}
