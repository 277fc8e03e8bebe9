use alloc::borrow::Cow;
use alloc::string::String;
use alloc::vec::Vec;

use crate::radio::{AuthMode, MacAddress};

/// One node of the firmware's scan result list, as handed to
/// [`super::ScanDone::finish`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BssInfo {
    pub ssid: Vec<u8>,
    pub bssid: MacAddress,
    pub channel: u8,
    pub rssi: i8,
    /// Raw auth mode code, see [`AuthMode::from_raw`].
    pub authmode: u8,
}

/// An access point found by a scan, copied out of firmware memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessPoint {
    /// Raw SSID bytes. Not guaranteed to be UTF-8 or free of NULs.
    pub ssid: Vec<u8>,
    pub bssid: MacAddress,
    pub channel: u8,
    /// Signal strength in dBm.
    pub rssi: i32,
    /// `None` when the firmware reported an auth mode this crate does not know.
    pub auth: Option<AuthMode>,
}

impl AccessPoint {
    pub fn ssid_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.ssid)
    }

    pub fn encryption(&self) -> EncryptionType {
        EncryptionType::from_auth(self.auth)
    }
}

impl From<BssInfo> for AccessPoint {
    fn from(info: BssInfo) -> Self {
        Self {
            ssid: info.ssid,
            bssid: info.bssid,
            channel: info.channel,
            rssi: i32::from(info.rssi),
            auth: AuthMode::from_raw(info.authmode),
        }
    }
}

/// Cipher category reported to callers, numbered like the classic Arduino
/// `ENC_TYPE_*` constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum EncryptionType {
    Tkip = 2,
    Ccmp = 4,
    Wep = 5,
    None = 7,
    Unknown = 255,
}

impl EncryptionType {
    // WPA/WPA2 mixed mode is reported as TKIP, same as plain WPA.
    pub fn from_auth(auth: Option<AuthMode>) -> Self {
        match auth {
            Some(AuthMode::Open) => EncryptionType::None,
            Some(AuthMode::Wep) => EncryptionType::Wep,
            Some(AuthMode::WpaPsk | AuthMode::WpaWpa2Psk) => EncryptionType::Tkip,
            Some(AuthMode::Wpa2Psk) => EncryptionType::Ccmp,
            None => EncryptionType::Unknown,
        }
    }

    pub fn as_raw(self) -> u8 {
        self as u8
    }
}
