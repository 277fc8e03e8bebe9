use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use wifisync_embedded::{LookupDone, LookupStatus, Resolver};

use crate::settings::Mock;

const MAX_HOSTNAME_LEN: usize = 253;
const MAX_LABEL_LEN: usize = 63;

/// DNS stand-in with a cache. Misses are answered from a separate thread
/// after the configured delay, like a query going out on the network.
pub struct SimulatedResolver {
    zone: Arc<HashMap<String, Ipv4Addr>>,
    cache: Arc<Mutex<HashMap<String, Ipv4Addr>>>,
    lookup_delay: Duration,
}

impl SimulatedResolver {
    pub fn new(mock: &Mock) -> Self {
        let zone = mock
            .hosts
            .iter()
            .map(|host| (host.name.to_ascii_lowercase(), host.address))
            .collect();

        Self {
            zone: Arc::new(zone),
            cache: Arc::new(Mutex::new(HashMap::new())),
            lookup_delay: Duration::from_millis(mock.lookup_delay_ms),
        }
    }

    pub fn is_cached(&self, hostname: &str) -> bool {
        self.cache
            .lock()
            .map(|cache| cache.contains_key(&hostname.to_ascii_lowercase()))
            .unwrap_or(false)
    }
}

impl Resolver for SimulatedResolver {
    fn submit_lookup(&mut self, hostname: &str, done: LookupDone) -> LookupStatus {
        if let Ok(address) = hostname.parse::<Ipv4Addr>() {
            return LookupStatus::Ready(address);
        }
        if !is_valid_hostname(hostname) {
            tracing::debug!("resolver: refusing {:?}", hostname);
            return LookupStatus::Failed;
        }

        let name = hostname.to_ascii_lowercase();
        if let Some(address) = self.cache.lock().ok().and_then(|c| c.get(&name).copied()) {
            return LookupStatus::Ready(address);
        }

        let zone = self.zone.clone();
        let cache = self.cache.clone();
        let delay = self.lookup_delay;

        thread::spawn(move || {
            thread::sleep(delay);

            let address = zone.get(&name).copied();
            if let (Some(address), Ok(mut cache)) = (address, cache.lock()) {
                cache.insert(name.clone(), address);
            }

            done.found(&name, address);
        });

        LookupStatus::InProgress
    }
}

// Names under the reserved `.invalid` TLD are refused without a query.
fn is_valid_hostname(hostname: &str) -> bool {
    let name = hostname.strip_suffix('.').unwrap_or(hostname);

    if name.is_empty() || name.len() > MAX_HOSTNAME_LEN {
        return false;
    }
    if name.to_ascii_lowercase().ends_with(".invalid") {
        return false;
    }

    name.split('.').all(|label| {
        !label.is_empty()
            && label.len() <= MAX_LABEL_LEN
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
    })
}
