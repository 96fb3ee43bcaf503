#![cfg_attr(not(test), no_std)]
//! Blocking driver for the u-blox SARA-N2 NB-IoT module.
//!
//! The module is driven over its AT command interface on any serial
//! transport implementing the [`embedded_io`] traits. One command is in
//! flight at a time, and each call blocks until the module has answered or
//! the command's timeout elapsed.
//!
//! ```ignore
//! let mut device = Device::new(serial, Config::default());
//! device.begin()?;
//! device.online()?;
//! device.wait_for_registration(Duration::from_secs(60))?;
//!
//! device.create_socket()?;
//! device.send_string(Ipv4Addr::new(172, 16, 15, 14), 1234, "Hello")?;
//! ```

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

mod client;
pub mod command;
pub mod config;
pub mod error;
pub mod fields;
pub mod hex;
pub mod identity;
pub mod module_timing;
mod network;
pub mod registration;
pub mod response;
pub mod socket;

#[cfg(test)]
mod test_helpers;

pub use client::Device;
pub use config::{AccessPointConfig, Config, PowerSaveMode};
pub use error::Error;
pub use identity::{atoi64, i64toa, DeviceIdentity};
pub use registration::RegistrationStatus;

pub use embassy_time::Duration;
pub use embedded_io;
#[cfg(feature = "socket-udp")]
pub use embedded_nal;
