use embassy_time::Duration;

/// Final result code timeout for commands answered straight away
pub const DEFAULT_TIMEOUT_MS: u32 = 1000;

/// Operator selection and attach can block the AT interface while the module
/// scans for a cell
pub const NETWORK_TIMEOUT_MS: u32 = 10_000;

/// Socket commands wait on the modem's IP stack
pub const SOCKET_TIMEOUT_MS: u32 = 3000;

/// Time from `AT+NRB` until the module accepts commands again
pub fn boot_time() -> Duration {
    Duration::from_secs(4)
}

/// Default interval between `+CEREG` queries while waiting for registration
pub fn registration_poll_interval() -> Duration {
    Duration::from_millis(500)
}
