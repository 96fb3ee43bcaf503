//! ### Network service Commands
pub mod types;

use core::fmt;

use types::*;

use super::{AtCmd, NoResponse};
use crate::error::Error;
use crate::module_timing::NETWORK_TIMEOUT_MS;
use crate::response::Response;

/// Operator selection +COPS
///
/// Forces an attempt to select and register with the network operator, or
/// deregisters from it. Manual selection uses the numeric `<oper>` format
/// (`<format>` 2), the mobile network code is zero padded to two digits, so
/// three digit codes below 100 cannot be selected.
#[derive(Debug, Clone)]
pub struct SetOperatorSelection {
    pub mode: OperatorSelectionMode,
}

impl AtCmd for SetOperatorSelection {
    type Response = NoResponse;
    const MAX_TIMEOUT_MS: u32 = NETWORK_TIMEOUT_MS;

    fn write<W: fmt::Write>(&self, w: &mut W) -> fmt::Result {
        match self.mode {
            OperatorSelectionMode::Automatic => w.write_str("AT+COPS=0"),
            OperatorSelectionMode::Manual {
                mobile_country_code,
                mobile_network_code,
            } => write!(
                w,
                "AT+COPS=1,2,\"{}{:02}\"",
                mobile_country_code, mobile_network_code
            ),
            OperatorSelectionMode::Deregister => w.write_str("AT+COPS=2"),
        }
    }

    fn parse(&self, _: &Response) -> Result<NoResponse, Error> {
        Ok(NoResponse)
    }
}
