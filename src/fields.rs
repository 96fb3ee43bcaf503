//! Splitting of informational lines into positional fields.

use core::str::FromStr;
use heapless::Vec;

use crate::error::Error;

/// Most fields any reply in the command set carries. `+CEREG` with `<n>` 5
/// reports up to ten, `+NSORF` six.
pub const MAX_FIELDS: usize = 12;

pub type Fields<'a> = Vec<&'a str, MAX_FIELDS>;

/// Split `line` on top-level commas.
///
/// A field wrapped in double quotes is returned without the quotes and with
/// any commas inside it intact. Empty fields are kept, so callers can index
/// by position.
pub fn split_fields(line: &str) -> Result<Fields<'_>, Error> {
    let mut fields = Vec::new();
    let mut rest = line;

    loop {
        let (field, remainder) = if let Some(quoted) = rest.strip_prefix('"') {
            let end = quoted.find('"').ok_or(Error::InvalidResponse)?;
            let after = &quoted[end + 1..];
            let remainder = match after.strip_prefix(',') {
                Some(r) => Some(r),
                None if after.is_empty() => None,
                None => return Err(Error::InvalidResponse),
            };
            (&quoted[..end], remainder)
        } else {
            match rest.find(',') {
                Some(i) => (&rest[..i], Some(&rest[i + 1..])),
                None => (rest, None),
            }
        };

        fields.push(field).map_err(|_| Error::Overflow)?;

        match remainder {
            Some(r) => rest = r,
            None => return Ok(fields),
        }
    }
}

/// Parse the field at `index`, failing if it is missing or malformed.
pub fn parse_field<F: FromStr>(fields: &[&str], index: usize) -> Result<F, Error> {
    fields
        .get(index)
        .ok_or(Error::InvalidResponse)?
        .trim()
        .parse()
        .map_err(|_| Error::InvalidResponse)
}
