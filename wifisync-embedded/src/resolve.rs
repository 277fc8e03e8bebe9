use core::net::Ipv4Addr;

use crate::bridge::{Resumer, SuspensionBridge};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupStatus {
    /// Answered on the spot, from the cache or because the name is an
    /// address literal. The completion handle will not be used.
    Ready(Ipv4Addr),
    /// A query is on the wire; the completion handle fires later.
    InProgress,
    /// The name was refused outright.
    Failed,
}

/// Hostname lookups offered by the network stack.
pub trait Resolver {
    fn submit_lookup(&mut self, hostname: &str, done: LookupDone) -> LookupStatus;
}

/// Completion handle for one lookup.
///
/// The resolver calls [`LookupDone::found`] from its event context when an
/// `InProgress` lookup finishes. Dropping the handle unused resumes the
/// caller with the zero address.
pub struct LookupDone {
    resumer: Option<Resumer<Ipv4Addr>>,
}

impl LookupDone {
    pub(crate) fn new(resumer: Resumer<Ipv4Addr>) -> Self {
        Self {
            resumer: Some(resumer),
        }
    }

    pub fn found(mut self, name: &str, address: Option<Ipv4Addr>) {
        log::debug!("Lookup of {} finished: {:?}", name, address);

        if let Some(resumer) = self.resumer.take() {
            resumer.resume(address.unwrap_or(Ipv4Addr::UNSPECIFIED));
        }
    }
}

impl Drop for LookupDone {
    fn drop(&mut self) {
        if let Some(resumer) = self.resumer.take() {
            log::trace!("Lookup completion released unused");
            resumer.resume(Ipv4Addr::UNSPECIFIED);
        }
    }
}

/// Resolves `hostname` to an IPv4 address.
///
/// Suspends only when the resolver has to go to the network. The flag is
/// `true` iff the address is not `0.0.0.0`, so a failed lookup and a name
/// that really maps to `0.0.0.0` look the same. Another operation holding
/// the bridge also reads as a failed lookup.
pub async fn resolve<R: Resolver>(
    resolver: &mut R,
    bridge: &SuspensionBridge,
    hostname: &str,
) -> (bool, Ipv4Addr) {
    let Ok((parked, resumer)) = bridge.arm::<Ipv4Addr>() else {
        return (false, Ipv4Addr::UNSPECIFIED);
    };

    let address = match resolver.submit_lookup(hostname, LookupDone::new(resumer)) {
        LookupStatus::Ready(address) => address,
        LookupStatus::InProgress => parked.suspend().await,
        LookupStatus::Failed => {
            log::debug!("Lookup of {} refused", hostname);
            Ipv4Addr::UNSPECIFIED
        }
    };

    (!address.is_unspecified(), address)
}
