mod mode;

pub use mode::*;

use core::fmt::Debug;
use core::net::Ipv4Addr;

use alloc::string::{String, ToString};

use serde::{Deserialize, Serialize};

use crate::scan::{ScanDone, ScanFilter};
use crate::{Error, Result};

pub const MAX_SSID_LEN: usize = 32;
pub const MAX_PASSWORD_LEN: usize = 64;

// Raw station status codes reported by the firmware
pub const STATION_IDLE: u8 = 0;
pub const STATION_CONNECTING: u8 = 1;
pub const STATION_WRONG_PASSWORD: u8 = 2;
pub const STATION_NO_AP_FOUND: u8 = 3;
pub const STATION_CONNECT_FAIL: u8 = 4;
pub const STATION_GOT_IP: u8 = 5;

pub type MacAddress = [u8; 6];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RadioMode {
    Station,
    AccessPoint,
    Both,
}

impl RadioMode {
    pub fn has_station(self) -> bool {
        matches!(self, RadioMode::Station | RadioMode::Both)
    }

    pub fn has_access_point(self) -> bool {
        matches!(self, RadioMode::AccessPoint | RadioMode::Both)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interface {
    Station,
    AccessPoint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Idle,
    Connecting,
    Connected,
    NoSsidFound,
    ConnectFailed,
    Disconnected,
}

impl ConnectionStatus {
    /// Maps a raw firmware status code. Codes the firmware may add later
    /// read as `Disconnected`.
    pub fn from_raw(code: u8) -> Self {
        match code {
            STATION_GOT_IP => ConnectionStatus::Connected,
            STATION_NO_AP_FOUND => ConnectionStatus::NoSsidFound,
            STATION_CONNECT_FAIL | STATION_WRONG_PASSWORD => ConnectionStatus::ConnectFailed,
            STATION_IDLE => ConnectionStatus::Idle,
            STATION_CONNECTING => ConnectionStatus::Connecting,
            _ => ConnectionStatus::Disconnected,
        }
    }
}

/// Authentication scheme as advertised by an access point or configured on
/// the soft AP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthMode {
    Open,
    Wep,
    WpaPsk,
    Wpa2Psk,
    WpaWpa2Psk,
}

impl AuthMode {
    pub fn from_raw(code: u8) -> Option<Self> {
        match code {
            0 => Some(AuthMode::Open),
            1 => Some(AuthMode::Wep),
            2 => Some(AuthMode::WpaPsk),
            3 => Some(AuthMode::Wpa2Psk),
            4 => Some(AuthMode::WpaWpa2Psk),
            _ => None,
        }
    }

    pub fn as_raw(self) -> u8 {
        match self {
            AuthMode::Open => 0,
            AuthMode::Wep => 1,
            AuthMode::WpaPsk => 2,
            AuthMode::Wpa2Psk => 3,
            AuthMode::WpaWpa2Psk => 4,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StationConfig {
    pub ssid: String,
    pub password: String,
}

impl StationConfig {
    /// An absent passphrase selects an open network.
    pub fn new(ssid: &str, passphrase: Option<&str>) -> Result<Self> {
        let password = passphrase.unwrap_or("");
        check_credentials(ssid, password)?;

        Ok(Self {
            ssid: ssid.to_string(),
            password: password.to_string(),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.ssid.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessPointConfig {
    pub ssid: String,
    pub password: String,
    pub channel: u8,
    pub auth_mode: AuthMode,
    pub ssid_hidden: bool,
    pub max_connection: u8,
    pub beacon_interval: u16,
}

impl Default for AccessPointConfig {
    fn default() -> Self {
        Self {
            ssid: String::new(),
            password: String::new(),
            channel: 1,
            auth_mode: AuthMode::Open,
            ssid_hidden: false,
            max_connection: 4,
            beacon_interval: 100,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IpInfo {
    pub ip: Ipv4Addr,
    pub netmask: Ipv4Addr,
    pub gateway: Ipv4Addr,
}

impl Default for IpInfo {
    fn default() -> Self {
        Self {
            ip: Ipv4Addr::UNSPECIFIED,
            netmask: Ipv4Addr::UNSPECIFIED,
            gateway: Ipv4Addr::UNSPECIFIED,
        }
    }
}

/// Calls into the vendor radio firmware.
///
/// Everything except [`RadioDriver::submit_scan`] is a one-shot call that
/// returns once the firmware has accepted it. `submit_scan` returns at once
/// and reports completion later through the [`ScanDone`] handle, typically
/// from the firmware's event context.
pub trait RadioDriver {
    type Error: Debug;

    fn operating_mode(&self) -> RadioMode;

    fn set_operating_mode(&mut self, mode: RadioMode) -> core::result::Result<(), Self::Error>;

    fn station_config(&self) -> StationConfig;

    fn set_station_config(
        &mut self,
        config: &StationConfig,
    ) -> core::result::Result<(), Self::Error>;

    fn connect_station(&mut self) -> core::result::Result<(), Self::Error>;

    fn disconnect_station(&mut self) -> core::result::Result<(), Self::Error>;

    fn start_dhcp_client(&mut self) -> core::result::Result<(), Self::Error>;

    fn stop_dhcp_client(&mut self) -> core::result::Result<(), Self::Error>;

    fn access_point_config(&self) -> AccessPointConfig;

    fn set_access_point_config(
        &mut self,
        config: &AccessPointConfig,
    ) -> core::result::Result<(), Self::Error>;

    fn ip_info(&self, interface: Interface) -> IpInfo;

    fn set_ip_info(
        &mut self,
        interface: Interface,
        info: &IpInfo,
    ) -> core::result::Result<(), Self::Error>;

    fn mac_address(&self, interface: Interface) -> MacAddress;

    /// Raw station status, see the `STATION_*` constants.
    fn station_status(&self) -> u8;

    fn submit_scan(
        &mut self,
        filter: &ScanFilter,
        done: ScanDone,
    ) -> core::result::Result<(), Self::Error>;
}

pub(crate) fn check_credentials(ssid: &str, password: &str) -> Result<()> {
    if ssid.len() > MAX_SSID_LEN || password.len() > MAX_PASSWORD_LEN {
        log::warn!(
            "Rejecting credentials: ssid {} bytes, password {} bytes",
            ssid.len(),
            password.len()
        );
        return Err(Error::InvalidCredentials);
    }
    Ok(())
}
