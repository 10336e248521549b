//! Minimal watchface
//!
//! Time, date, week day and a battery bar on a small 1-bit display. The face
//! is generic over the platform services it consumes, see [`system::Platform`],
//! and [`host::Host`] provides an in-memory platform to run it against.

#![cfg_attr(not(test), no_std)]

#[macro_use]
extern crate log;

#[cfg(test)]
#[macro_use]
extern crate std;

pub mod application;
pub mod host;
pub mod system;

#[cfg(test)]
mod testing;

pub use crate::application::Watchface;
pub use crate::host::Host;
pub use crate::system::Platform;
