mod record;

pub use record::*;

use alloc::vec::Vec;

use embassy_time::{Duration, Instant};

use crate::bridge::{Resumer, SuspensionBridge};
use crate::radio::{ConnectionStatus, MacAddress, ModeController, RadioDriver};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanFilter {
    pub ssid: Option<Vec<u8>>,
    pub bssid: Option<MacAddress>,
    pub channel: Option<u8>,
}

impl ScanFilter {
    /// Every SSID on every channel.
    pub fn any() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanStatus {
    Ok,
    Failed,
}

/// Completion handle for one scan, passed to [`RadioDriver::submit_scan`].
///
/// The driver calls [`ScanDone::finish`] from its event context once the
/// survey is over. A handle dropped without finishing reports an empty
/// result, so the scanning caller is always woken.
pub struct ScanDone {
    resumer: Option<Resumer<Vec<AccessPoint>>>,
}

impl ScanDone {
    pub(crate) fn new(resumer: Resumer<Vec<AccessPoint>>) -> Self {
        Self {
            resumer: Some(resumer),
        }
    }

    /// Copies the firmware's result list out in a single pass and wakes the
    /// caller. Any status other than `Ok` discards the list.
    pub fn finish<I>(mut self, status: ScanStatus, list: I)
    where
        I: IntoIterator<Item = BssInfo>,
    {
        let results: Vec<AccessPoint> = match status {
            ScanStatus::Ok => list.into_iter().map(AccessPoint::from).collect(),
            ScanStatus::Failed => {
                log::warn!("Scan reported failure");
                Vec::new()
            }
        };

        if let Some(resumer) = self.resumer.take() {
            resumer.resume(results);
        }
    }
}

impl Drop for ScanDone {
    fn drop(&mut self) {
        if let Some(resumer) = self.resumer.take() {
            log::trace!("Scan completion released unused");
            resumer.resume(Vec::new());
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    Idle,
    Scanning,
    Complete,
}

/// Owns the result set of the most recent scan.
pub struct ScanSession {
    state: ScanState,
    results: Vec<AccessPoint>,
    last_duration: Option<Duration>,
}

impl ScanSession {
    pub fn new() -> Self {
        Self {
            state: ScanState::Idle,
            results: Vec::new(),
            last_duration: None,
        }
    }

    /// Runs one scan and returns the number of access points found.
    ///
    /// The previous result set is discarded first. Returns 0 when the scan
    /// failed, when the driver refused it or when another operation holds
    /// the bridge.
    pub async fn start<D: RadioDriver>(
        &mut self,
        radio: &mut ModeController<D>,
        bridge: &SuspensionBridge,
    ) -> usize {
        self.results.clear();
        self.transition_to(ScanState::Scanning);

        if radio.ensure_station_capable().is_err() {
            self.transition_to(ScanState::Idle);
            return 0;
        }

        let status = radio.query_status();
        if !matches!(status, ConnectionStatus::Connected | ConnectionStatus::Idle) {
            log::debug!("Station is {:?}, disconnecting before scan", status);
            if let Err(e) = radio.clear_station_config() {
                log::debug!("Disconnect before scan failed: {:?}", e);
            }
        }

        let Ok((parked, resumer)) = bridge.arm() else {
            self.transition_to(ScanState::Idle);
            return 0;
        };

        let started = Instant::now();
        if let Err(e) = radio
            .driver_mut()
            .submit_scan(&ScanFilter::any(), ScanDone::new(resumer))
        {
            log::warn!("Scan request rejected: {:?}", e);
            self.transition_to(ScanState::Idle);
            return 0;
        }

        let in_flight = InFlight {
            state: &mut self.state,
        };
        let results = parked.suspend().await;
        in_flight.landed();
        let elapsed = started.elapsed();

        self.results = results;
        self.last_duration = Some(elapsed);
        self.transition_to(ScanState::Complete);

        log::info!(
            "Scan completed: {} networks in {} ms",
            self.results.len(),
            elapsed.as_millis()
        );
        self.results.len()
    }

    fn transition_to(&mut self, new_state: ScanState) {
        log::debug!("Scan state transition: {:?} -> {:?}", self.state, new_state);
        self.state = new_state;
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&AccessPoint> {
        self.results.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AccessPoint> {
        self.results.iter()
    }

    /// Raw SSID of entry `index`, empty when out of range.
    pub fn ssid_at(&self, index: usize) -> &[u8] {
        self.get(index).map(|ap| ap.ssid.as_slice()).unwrap_or(&[])
    }

    /// Signal strength of entry `index` in dBm, 0 when out of range.
    pub fn rssi_at(&self, index: usize) -> i32 {
        self.get(index).map(|ap| ap.rssi).unwrap_or(0)
    }

    pub fn encryption_at(&self, index: usize) -> EncryptionType {
        self.get(index)
            .map(AccessPoint::encryption)
            .unwrap_or(EncryptionType::Unknown)
    }

    pub fn last_scan_duration(&self) -> Option<Duration> {
        self.last_duration
    }
}

/// Puts the session back to `Idle` when a suspended scan is dropped before
/// its completion lands.
struct InFlight<'a> {
    state: &'a mut ScanState,
}

impl InFlight<'_> {
    fn landed(self) {
        core::mem::forget(self);
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        log::debug!("Scan abandoned while in flight");
        *self.state = ScanState::Idle;
    }
}

impl Default for ScanSession {
    fn default() -> Self {
        Self::new()
    }
}
