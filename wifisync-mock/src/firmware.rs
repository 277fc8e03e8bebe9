use std::net::Ipv4Addr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use wifisync_embedded::{
    AccessPointConfig, AuthMode, BssInfo, Interface, IpInfo, MacAddress, RadioDriver, RadioMode,
    STATION_GOT_IP, STATION_IDLE, STATION_NO_AP_FOUND, STATION_WRONG_PASSWORD, ScanDone,
    ScanFilter, ScanStatus, StationConfig,
};

use crate::settings::{Mock, MockAccessPoint};

const STATION_MAC: MacAddress = [0x18, 0xfe, 0x34, 0xa1, 0xb2, 0xc3];
const SOFT_AP_MAC: MacAddress = [0x1a, 0xfe, 0x34, 0xa1, 0xb2, 0xc3];

#[derive(Debug)]
pub enum FirmwareError {
    /// A scan was submitted while the previous one was still running.
    ScanInProgress,
    /// The station interface is not enabled in the current mode.
    StationDisabled,
}

/// Radio firmware stand-in. Scans complete on a separate thread, the way
/// the real firmware reports them from its event task.
pub struct SimulatedRadio {
    mode: RadioMode,
    station: StationConfig,
    access_point: AccessPointConfig,
    status: u8,
    dhcp_client: bool,
    station_ip: IpInfo,
    soft_ap_ip: IpInfo,
    access_points: Vec<MockAccessPoint>,
    scan_delay: Duration,
    scan_status: ScanStatus,
    scan_running: Arc<AtomicBool>,
}

impl SimulatedRadio {
    pub fn new(mock: &Mock) -> Self {
        Self {
            mode: RadioMode::Station,
            station: StationConfig::default(),
            access_point: AccessPointConfig::default(),
            status: STATION_IDLE,
            dhcp_client: false,
            station_ip: IpInfo::default(),
            soft_ap_ip: IpInfo {
                ip: Ipv4Addr::new(192, 168, 4, 1),
                netmask: Ipv4Addr::new(255, 255, 255, 0),
                gateway: Ipv4Addr::new(192, 168, 4, 1),
            },
            access_points: mock.access_points.clone(),
            scan_delay: Duration::from_millis(mock.scan_delay_ms),
            scan_status: ScanStatus::Ok,
            scan_running: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn with_mode(mut self, mode: RadioMode) -> Self {
        self.mode = mode;
        self
    }

    /// Makes every following scan report a firmware failure.
    pub fn fail_scans(&mut self, fail: bool) {
        self.scan_status = if fail { ScanStatus::Failed } else { ScanStatus::Ok };
    }

    pub fn is_dhcp_client_running(&self) -> bool {
        self.dhcp_client
    }

    fn lease_address(&mut self) {
        if self.dhcp_client && self.status == STATION_GOT_IP {
            self.station_ip = IpInfo {
                ip: Ipv4Addr::new(192, 168, 1, 100),
                netmask: Ipv4Addr::new(255, 255, 255, 0),
                gateway: Ipv4Addr::new(192, 168, 1, 1),
            };
        }
    }

    fn survey(&self, filter: &ScanFilter) -> Vec<BssInfo> {
        self.access_points
            .iter()
            .filter(|ap| {
                filter
                    .ssid
                    .as_ref()
                    .is_none_or(|ssid| ssid.as_slice() == ap.ssid.as_bytes())
            })
            .filter(|ap| filter.channel.is_none_or(|channel| channel == ap.channel))
            .enumerate()
            .map(|(index, ap)| BssInfo {
                ssid: ap.ssid.as_bytes().to_vec(),
                bssid: [0x02, 0x00, 0x5e, 0x00, 0x00, index as u8],
                channel: ap.channel,
                rssi: ap.rssi,
                authmode: ap.auth.as_raw(),
            })
            .collect()
    }
}

impl RadioDriver for SimulatedRadio {
    type Error = FirmwareError;

    fn operating_mode(&self) -> RadioMode {
        self.mode
    }

    fn set_operating_mode(&mut self, mode: RadioMode) -> Result<(), Self::Error> {
        tracing::debug!("firmware: opmode {:?}", mode);
        self.mode = mode;
        Ok(())
    }

    fn station_config(&self) -> StationConfig {
        self.station.clone()
    }

    fn set_station_config(&mut self, config: &StationConfig) -> Result<(), Self::Error> {
        self.station = config.clone();
        Ok(())
    }

    fn connect_station(&mut self) -> Result<(), Self::Error> {
        if !self.mode.has_station() {
            return Err(FirmwareError::StationDisabled);
        }

        let target = self
            .access_points
            .iter()
            .find(|ap| ap.ssid == self.station.ssid);

        self.status = match target {
            None => STATION_NO_AP_FOUND,
            Some(ap) if ap.auth != AuthMode::Open && ap.password != self.station.password => {
                STATION_WRONG_PASSWORD
            }
            Some(_) => STATION_GOT_IP,
        };
        self.lease_address();

        tracing::debug!("firmware: station status {}", self.status);
        Ok(())
    }

    fn disconnect_station(&mut self) -> Result<(), Self::Error> {
        self.status = STATION_IDLE;
        self.station_ip = IpInfo::default();
        Ok(())
    }

    fn start_dhcp_client(&mut self) -> Result<(), Self::Error> {
        self.dhcp_client = true;
        self.lease_address();
        Ok(())
    }

    fn stop_dhcp_client(&mut self) -> Result<(), Self::Error> {
        self.dhcp_client = false;
        Ok(())
    }

    fn access_point_config(&self) -> AccessPointConfig {
        self.access_point.clone()
    }

    fn set_access_point_config(&mut self, config: &AccessPointConfig) -> Result<(), Self::Error> {
        self.access_point = config.clone();
        Ok(())
    }

    fn ip_info(&self, interface: Interface) -> IpInfo {
        match interface {
            Interface::Station => self.station_ip,
            Interface::AccessPoint => self.soft_ap_ip,
        }
    }

    fn set_ip_info(&mut self, interface: Interface, info: &IpInfo) -> Result<(), Self::Error> {
        match interface {
            Interface::Station => self.station_ip = *info,
            Interface::AccessPoint => self.soft_ap_ip = *info,
        }
        Ok(())
    }

    fn mac_address(&self, interface: Interface) -> MacAddress {
        match interface {
            Interface::Station => STATION_MAC,
            Interface::AccessPoint => SOFT_AP_MAC,
        }
    }

    fn station_status(&self) -> u8 {
        self.status
    }

    fn submit_scan(&mut self, filter: &ScanFilter, done: ScanDone) -> Result<(), Self::Error> {
        if !self.mode.has_station() {
            return Err(FirmwareError::StationDisabled);
        }
        if self.scan_running.swap(true, Ordering::AcqRel) {
            return Err(FirmwareError::ScanInProgress);
        }

        let list = self.survey(filter);
        let status = self.scan_status;
        let delay = self.scan_delay;
        let running = self.scan_running.clone();

        tracing::debug!("firmware: scanning, {} in range", list.len());
        thread::spawn(move || {
            thread::sleep(delay);
            running.store(false, Ordering::Release);
            done.finish(status, list);
        });

        Ok(())
    }
}
