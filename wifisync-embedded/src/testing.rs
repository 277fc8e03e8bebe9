//! Scripted stand-ins for the firmware, shared by the unit tests.

use core::net::Ipv4Addr;

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::radio::{
    AccessPointConfig, Interface, IpInfo, MacAddress, RadioDriver, RadioMode, STATION_GOT_IP,
    STATION_IDLE, StationConfig,
};
use crate::resolve::{LookupDone, LookupStatus, Resolver};
use crate::scan::{BssInfo, ScanDone, ScanFilter, ScanStatus};

pub(crate) fn bss(ssid: &str, rssi: i8, authmode: u8) -> BssInfo {
    BssInfo {
        ssid: ssid.as_bytes().to_vec(),
        bssid: [0x02, 0, 0, 0, 0, ssid.len() as u8],
        channel: 6,
        rssi,
        authmode,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    SetMode(RadioMode),
    SetStation(StationConfig),
    Connect,
    Disconnect,
    StartDhcp,
    StopDhcp,
    SetAccessPoint(AccessPointConfig),
    SetIp(Interface, IpInfo),
    Scan,
}

/// How the mock firmware answers a scan submission.
#[derive(Debug, Clone)]
pub(crate) enum ScanReply {
    Finish(ScanStatus, Vec<BssInfo>),
    Reject,
    Lose,
    Deferred(Vec<BssInfo>),
    Threaded(Vec<BssInfo>),
}

pub(crate) struct MockRadio {
    pub mode: RadioMode,
    pub station: StationConfig,
    pub access_point: AccessPointConfig,
    pub status: u8,
    pub ip: IpInfo,
    pub calls: Vec<Call>,
    pub scan_reply: ScanReply,
    pub fail_writes: bool,
}

impl MockRadio {
    pub fn new(mode: RadioMode) -> Self {
        Self {
            mode,
            station: StationConfig::default(),
            access_point: AccessPointConfig {
                ssid_hidden: true,
                ..AccessPointConfig::default()
            },
            status: STATION_IDLE,
            ip: IpInfo::default(),
            calls: Vec::new(),
            scan_reply: ScanReply::Finish(ScanStatus::Ok, Vec::new()),
            fail_writes: false,
        }
    }

    fn write(&mut self, call: Call) -> core::result::Result<(), ()> {
        if self.fail_writes {
            return Err(());
        }
        self.calls.push(call);
        Ok(())
    }
}

impl RadioDriver for MockRadio {
    type Error = ();

    fn operating_mode(&self) -> RadioMode {
        self.mode
    }

    fn set_operating_mode(&mut self, mode: RadioMode) -> core::result::Result<(), ()> {
        self.write(Call::SetMode(mode))?;
        self.mode = mode;
        Ok(())
    }

    fn station_config(&self) -> StationConfig {
        self.station.clone()
    }

    fn set_station_config(&mut self, config: &StationConfig) -> core::result::Result<(), ()> {
        self.write(Call::SetStation(config.clone()))?;
        self.station = config.clone();
        Ok(())
    }

    fn connect_station(&mut self) -> core::result::Result<(), ()> {
        self.write(Call::Connect)?;
        self.status = STATION_GOT_IP;
        Ok(())
    }

    fn disconnect_station(&mut self) -> core::result::Result<(), ()> {
        self.write(Call::Disconnect)?;
        self.status = STATION_IDLE;
        Ok(())
    }

    fn start_dhcp_client(&mut self) -> core::result::Result<(), ()> {
        self.write(Call::StartDhcp)
    }

    fn stop_dhcp_client(&mut self) -> core::result::Result<(), ()> {
        self.write(Call::StopDhcp)
    }

    fn access_point_config(&self) -> AccessPointConfig {
        self.access_point.clone()
    }

    fn set_access_point_config(
        &mut self,
        config: &AccessPointConfig,
    ) -> core::result::Result<(), ()> {
        self.write(Call::SetAccessPoint(config.clone()))?;
        self.access_point = config.clone();
        Ok(())
    }

    fn ip_info(&self, _interface: Interface) -> IpInfo {
        self.ip
    }

    fn set_ip_info(&mut self, interface: Interface, info: &IpInfo) -> core::result::Result<(), ()> {
        self.write(Call::SetIp(interface, *info))?;
        self.ip = *info;
        Ok(())
    }

    fn mac_address(&self, interface: Interface) -> MacAddress {
        match interface {
            Interface::Station => [0x18, 0xfe, 0x34, 0x00, 0x00, 0x01],
            Interface::AccessPoint => [0x1a, 0xfe, 0x34, 0x00, 0x00, 0x01],
        }
    }

    fn station_status(&self) -> u8 {
        self.status
    }

    fn submit_scan(&mut self, filter: &ScanFilter, done: ScanDone) -> core::result::Result<(), ()> {
        assert_eq!(filter, &ScanFilter::any());
        self.calls.push(Call::Scan);

        match self.scan_reply.clone() {
            ScanReply::Finish(status, list) => {
                done.finish(status, list);
                Ok(())
            }
            ScanReply::Reject => Err(()),
            ScanReply::Lose => {
                drop(done);
                Ok(())
            }
            ScanReply::Deferred(list) => {
                tokio::spawn(async move {
                    tokio::task::yield_now().await;
                    done.finish(ScanStatus::Ok, list);
                });
                Ok(())
            }
            ScanReply::Threaded(list) => {
                std::thread::spawn(move || {
                    std::thread::sleep(std::time::Duration::from_millis(5));
                    done.finish(ScanStatus::Ok, list);
                });
                Ok(())
            }
        }
    }
}

/// How the mock resolver answers a lookup.
#[derive(Debug, Clone)]
pub(crate) enum LookupReply {
    Ready(Ipv4Addr),
    Deferred(Option<Ipv4Addr>),
    Threaded(Ipv4Addr),
    Failed,
    Lose,
}

pub(crate) struct MockResolver {
    pub reply: LookupReply,
    pub lookups: Vec<String>,
}

impl MockResolver {
    pub fn new(reply: LookupReply) -> Self {
        Self {
            reply,
            lookups: Vec::new(),
        }
    }
}

impl Resolver for MockResolver {
    fn submit_lookup(&mut self, hostname: &str, done: LookupDone) -> LookupStatus {
        self.lookups.push(hostname.to_string());

        match self.reply.clone() {
            LookupReply::Ready(address) => LookupStatus::Ready(address),
            LookupReply::Deferred(address) => {
                let name = hostname.to_string();
                tokio::spawn(async move {
                    tokio::task::yield_now().await;
                    done.found(&name, address);
                });
                LookupStatus::InProgress
            }
            LookupReply::Threaded(address) => {
                let name = hostname.to_string();
                std::thread::spawn(move || {
                    std::thread::sleep(std::time::Duration::from_millis(5));
                    done.found(&name, Some(address));
                });
                LookupStatus::InProgress
            }
            LookupReply::Failed => LookupStatus::Failed,
            LookupReply::Lose => {
                drop(done);
                LookupStatus::InProgress
            }
        }
    }
}
