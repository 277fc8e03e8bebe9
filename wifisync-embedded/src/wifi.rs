use core::net::Ipv4Addr;

use alloc::borrow::Cow;
use alloc::string::String;

use crate::Result;
use crate::bridge::SuspensionBridge;
use crate::config::RadioConfig;
use crate::radio::{ConnectionStatus, Interface, MacAddress, ModeController, RadioDriver, RadioMode};
use crate::resolve::{Resolver, resolve};
use crate::scan::{EncryptionType, ScanSession};

/// Device-wide entry point to the radio.
///
/// Owns the firmware driver, the resolver and the one suspension bridge they
/// share. Scans and lookups take `&mut self`, so at most one of them can be
/// in flight through a given `Wifi`.
pub struct Wifi<D: RadioDriver, R: Resolver> {
    radio: ModeController<D>,
    resolver: R,
    bridge: SuspensionBridge,
    scan: ScanSession,
}

impl<D: RadioDriver, R: Resolver> Wifi<D, R> {
    pub fn new(driver: D, resolver: R) -> Self {
        Self {
            radio: ModeController::new(driver),
            resolver,
            bridge: SuspensionBridge::new(),
            scan: ScanSession::new(),
        }
    }

    pub fn with_config(mut self, config: RadioConfig) -> Self {
        self.radio = self.radio.with_config(config);
        self
    }

    pub fn radio(&self) -> &ModeController<D> {
        &self.radio
    }

    pub fn radio_mut(&mut self) -> &mut ModeController<D> {
        &mut self.radio
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    pub fn bridge(&self) -> &SuspensionBridge {
        &self.bridge
    }

    pub fn mode(&self) -> RadioMode {
        self.radio.mode()
    }

    pub fn set_mode(&mut self, mode: RadioMode) -> Result<()> {
        self.radio.set_mode(mode)
    }

    /// Joins `ssid`; `None` joins an open network. Returns once the
    /// firmware has accepted the request, poll [`Wifi::status`] for the
    /// outcome.
    pub fn begin(&mut self, ssid: &str, passphrase: Option<&str>) -> Result<()> {
        self.radio.connect_station(ssid, passphrase)
    }

    /// Uses a static station address instead of DHCP.
    pub fn configure_ip(
        &mut self,
        ip: Ipv4Addr,
        gateway: Ipv4Addr,
        subnet: Ipv4Addr,
    ) -> Result<()> {
        self.radio.set_static_ip(ip, gateway, subnet)
    }

    pub fn disconnect(&mut self) -> Result<()> {
        self.radio.clear_station_config()
    }

    pub fn soft_ap(&mut self, ssid: &str, passphrase: Option<&str>) -> Result<()> {
        self.radio.set_access_point_config(ssid, passphrase)
    }

    pub fn status(&self) -> ConnectionStatus {
        self.radio.query_status()
    }

    /// SSID the station is configured for.
    pub fn ssid(&self) -> String {
        self.radio.station_ssid()
    }

    pub fn local_ip(&self) -> Ipv4Addr {
        self.radio.ip_info(Interface::Station).ip
    }

    pub fn subnet_mask(&self) -> Ipv4Addr {
        self.radio.ip_info(Interface::Station).netmask
    }

    pub fn gateway_ip(&self) -> Ipv4Addr {
        self.radio.ip_info(Interface::Station).gateway
    }

    pub fn soft_ap_ip(&self) -> Ipv4Addr {
        self.radio.ip_info(Interface::AccessPoint).ip
    }

    pub fn mac_address(&self) -> MacAddress {
        self.radio.mac_address(Interface::Station)
    }

    pub fn soft_ap_mac_address(&self) -> MacAddress {
        self.radio.mac_address(Interface::AccessPoint)
    }

    /// Surveys nearby access points and returns how many were found.
    /// Results stay readable through the `*_at` accessors until the next
    /// scan.
    pub async fn scan_networks(&mut self) -> usize {
        self.scan.start(&mut self.radio, &self.bridge).await
    }

    pub fn scan_results(&self) -> &ScanSession {
        &self.scan
    }

    pub fn ssid_at(&self, index: usize) -> &[u8] {
        self.scan.ssid_at(index)
    }

    pub fn ssid_str_at(&self, index: usize) -> Cow<'_, str> {
        String::from_utf8_lossy(self.scan.ssid_at(index))
    }

    pub fn rssi_at(&self, index: usize) -> i32 {
        self.scan.rssi_at(index)
    }

    pub fn encryption_type_at(&self, index: usize) -> EncryptionType {
        self.scan.encryption_at(index)
    }

    pub async fn host_by_name(&mut self, hostname: &str) -> (bool, Ipv4Addr) {
        resolve(&mut self.resolver, &self.bridge, hostname).await
    }
}
