use core::net::Ipv4Addr;

use alloc::string::{String, ToString};

use crate::config::RadioConfig;
use crate::{Error, Result};

use super::{
    AccessPointConfig, AuthMode, ConnectionStatus, Interface, IpInfo, MacAddress, RadioDriver,
    RadioMode, StationConfig, check_credentials,
};

/// Tracks which radio roles are active and gates every config write.
///
/// Config writes run inside a critical section so a radio event firing in
/// the middle of a write never observes a half-written config. The critical
/// section only ever wraps the driver call itself.
pub struct ModeController<D: RadioDriver> {
    driver: D,
    config: RadioConfig,
}

impl<D: RadioDriver> ModeController<D> {
    pub fn new(driver: D) -> Self {
        Self {
            driver,
            config: RadioConfig::default(),
        }
    }

    pub fn with_config(mut self, config: RadioConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &RadioConfig {
        &self.config
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    pub fn mode(&self) -> RadioMode {
        self.driver.operating_mode()
    }

    pub fn set_mode(&mut self, mode: RadioMode) -> Result<()> {
        log::debug!("Radio mode transition: {:?} -> {:?}", self.mode(), mode);

        let driver = &mut self.driver;
        critical_section::with(|_| driver.set_operating_mode(mode)).map_err(|e| {
            log::warn!("Failed to set radio mode {:?}: {:?}", mode, e);
            Error::NetworkError
        })
    }

    /// Adds the station role when only the access point is running.
    pub fn ensure_station_capable(&mut self) -> Result<()> {
        if self.mode() == RadioMode::AccessPoint {
            self.set_mode(RadioMode::Both)?;
        }
        Ok(())
    }

    /// Adds the access point role when only the station is running.
    pub fn ensure_access_point_capable(&mut self) -> Result<()> {
        if self.mode() == RadioMode::Station {
            self.set_mode(RadioMode::Both)?;
        }
        Ok(())
    }

    pub fn set_station_config(&mut self, ssid: &str, passphrase: Option<&str>) -> Result<()> {
        let config = StationConfig::new(ssid, passphrase)?;

        let driver = &mut self.driver;
        critical_section::with(|_| driver.set_station_config(&config)).map_err(|e| {
            log::warn!("Failed to write station config: {:?}", e);
            Error::NetworkError
        })
    }

    /// Writes the credentials and starts joining the network, then brings
    /// up the DHCP client.
    pub fn connect_station(&mut self, ssid: &str, passphrase: Option<&str>) -> Result<()> {
        let config = StationConfig::new(ssid, passphrase)?;
        self.ensure_station_capable()?;

        let driver = &mut self.driver;
        critical_section::with(|_| {
            driver.set_station_config(&config)?;
            driver.connect_station()
        })
        .map_err(|e| {
            log::warn!("Failed to start station connection: {:?}", e);
            Error::NetworkError
        })?;

        self.driver.start_dhcp_client().map_err(|e| {
            log::warn!("Failed to start DHCP client: {:?}", e);
            Error::NetworkError
        })?;

        log::info!("Connecting to WiFi: {}", ssid);
        Ok(())
    }

    /// Forgets the station credentials and leaves the current network.
    pub fn clear_station_config(&mut self) -> Result<()> {
        let empty = StationConfig::default();

        let driver = &mut self.driver;
        critical_section::with(|_| {
            driver.set_station_config(&empty)?;
            driver.disconnect_station()
        })
        .map_err(|e| {
            log::warn!("Failed to disconnect station: {:?}", e);
            Error::NetworkError
        })?;

        log::info!("Station disconnected");
        Ok(())
    }

    /// Configures the soft AP. An absent or empty passphrase runs an open
    /// network, anything else runs WPA2-PSK. Fields not named here keep the
    /// values the firmware already holds.
    pub fn set_access_point_config(&mut self, ssid: &str, passphrase: Option<&str>) -> Result<()> {
        let passphrase = passphrase.unwrap_or("");
        check_credentials(ssid, passphrase)?;
        self.ensure_access_point_capable()?;

        let mut config = self.driver.access_point_config();
        config.ssid = ssid.to_string();
        config.channel = self.config.ap_channel;

        if passphrase.is_empty() {
            config.auth_mode = AuthMode::Open;
            config.password = String::new();
        } else {
            config.auth_mode = AuthMode::Wpa2Psk;
            config.password = passphrase.to_string();
        }

        self.write_access_point_config(&config)?;

        log::info!(
            "AP configured: {} (channel {}, {:?})",
            config.ssid,
            config.channel,
            config.auth_mode
        );
        Ok(())
    }

    fn write_access_point_config(&mut self, config: &AccessPointConfig) -> Result<()> {
        let driver = &mut self.driver;
        critical_section::with(|_| driver.set_access_point_config(config)).map_err(|e| {
            log::warn!("Failed to write AP config: {:?}", e);
            Error::NetworkError
        })
    }

    /// Reads the station status fresh from the firmware on every call.
    pub fn query_status(&self) -> ConnectionStatus {
        ConnectionStatus::from_raw(self.driver.station_status())
    }

    /// Switches the station to a fixed address, stopping the DHCP client.
    pub fn set_static_ip(
        &mut self,
        ip: Ipv4Addr,
        gateway: Ipv4Addr,
        subnet: Ipv4Addr,
    ) -> Result<()> {
        let info = IpInfo {
            ip,
            netmask: subnet,
            gateway,
        };

        self.driver.stop_dhcp_client().map_err(|e| {
            log::warn!("Failed to stop DHCP client: {:?}", e);
            Error::NetworkError
        })?;
        self.driver
            .set_ip_info(Interface::Station, &info)
            .map_err(|e| {
                log::warn!("Failed to set station IP info: {:?}", e);
                Error::NetworkError
            })?;

        log::info!("Static IP configured: {} (gw {}, mask {})", ip, gateway, subnet);
        Ok(())
    }

    pub fn ip_info(&self, interface: Interface) -> IpInfo {
        self.driver.ip_info(interface)
    }

    pub fn mac_address(&self, interface: Interface) -> MacAddress {
        self.driver.mac_address(interface)
    }

    pub fn station_ssid(&self) -> String {
        self.driver.station_config().ssid
    }
}
