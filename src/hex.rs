use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FromHexError {
    /// An invalid character was found. Valid ones are: `0...9`, `a...f`
    /// or `A...F`.
    InvalidHexCharacter,

    /// A hex string's length needs to be even, as two digits correspond to
    /// one byte.
    OddLength,

    /// The decoded bytes do not fit in the output buffer.
    BufferTooSmall,
}

impl fmt::Display for FromHexError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::InvalidHexCharacter => f.write_str("invalid hex character"),
            Self::OddLength => f.write_str("input string has an odd number of bytes"),
            Self::BufferTooSmall => f.write_str("output buffer too small"),
        }
    }
}

fn val(c: u8) -> Result<u8, FromHexError> {
    match c {
        b'A'..=b'F' => Ok(c - b'A' + 10),
        b'a'..=b'f' => Ok(c - b'a' + 10),
        b'0'..=b'9' => Ok(c - b'0'),
        _ => Err(FromHexError::InvalidHexCharacter),
    }
}

/// Decode `hex` into `out`, returning the number of bytes written.
pub fn from_hex(hex: &str, out: &mut [u8]) -> Result<usize, FromHexError> {
    let hex = hex.as_bytes();
    if hex.len() % 2 != 0 {
        return Err(FromHexError::OddLength);
    }

    let len = hex.len() / 2;
    if len > out.len() {
        return Err(FromHexError::BufferTooSmall);
    }

    for (byte, pair) in out.iter_mut().zip(hex.chunks_exact(2)) {
        *byte = val(pair[0])? << 4 | val(pair[1])?;
    }
    Ok(len)
}

/// Renders a byte slice as upper-case hex, two digits per byte, straight into
/// whatever formatter it is written to.
pub struct Hex<'a>(pub &'a [u8]);

impl fmt::Display for Hex<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.iter().try_for_each(|b| write!(f, "{:02X}", b))
    }
}
