use std::error::Error;
use std::net::Ipv4Addr;

use serde::{Deserialize, Serialize};
use wifisync_embedded::{AuthMode, RadioConfig};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Logger {
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MockAccessPoint {
    pub ssid: String,
    pub rssi: i8,
    pub channel: u8,
    pub auth: AuthMode,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostEntry {
    pub name: String,
    pub address: Ipv4Addr,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Mock {
    pub scan_delay_ms: u64,
    pub lookup_delay_ms: u64,
    #[serde(default)]
    pub access_points: Vec<MockAccessPoint>,
    #[serde(default)]
    pub hosts: Vec<HostEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Demo {
    pub ap_ssid: String,
    pub ap_password: Option<String>,
    pub station_ssid: String,
    pub station_password: Option<String>,
    #[serde(default)]
    pub lookups: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub logger: Logger,
    #[serde(default)]
    pub radio: RadioConfig,
    pub mock: Mock,
    pub demo: Demo,
}

impl Settings {
    pub fn new() -> Result<Self, Box<dyn Error>> {
        Self::from_toml(include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/../",
            "configs/default.toml"
        )))
    }

    pub fn from_toml(source: &str) -> Result<Self, Box<dyn Error>> {
        Ok(toml::from_str(source)?)
    }
}
