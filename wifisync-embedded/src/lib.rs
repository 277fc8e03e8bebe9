#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod blocking;
pub mod bridge;
pub mod config;
pub mod error;
pub mod radio;
pub mod resolve;
pub mod scan;
pub mod wifi;

#[cfg(test)]
mod testing;

pub use bridge::*;
pub use config::*;
pub use error::*;
pub use radio::*;
pub use resolve::*;
pub use scan::*;
pub use wifi::*;
