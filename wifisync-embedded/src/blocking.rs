//! Blocking variants for callers that run without an async executor.
//!
//! These busy-poll the operation on the calling thread until the completion
//! handler, running on another thread or in interrupt context, resumes it.
//! Never call them from the context that delivers the completion, or the
//! device deadlocks.

use core::net::Ipv4Addr;

use embassy_futures::block_on;

use crate::radio::RadioDriver;
use crate::resolve::Resolver;
use crate::wifi::Wifi;

impl<D: RadioDriver, R: Resolver> Wifi<D, R> {
    pub fn scan_networks_blocking(&mut self) -> usize {
        block_on(self.scan_networks())
    }

    pub fn host_by_name_blocking(&mut self, hostname: &str) -> (bool, Ipv4Addr) {
        block_on(self.host_by_name(hostname))
    }
}
