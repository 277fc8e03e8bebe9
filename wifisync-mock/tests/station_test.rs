use std::net::Ipv4Addr;

use wifisync_embedded::{AuthMode, ConnectionStatus, Error, RadioDriver, RadioMode};
use wifisync_mock::build;
use wifisync_mock::settings::Settings;

mod common;
use common::test_settings;

#[test]
fn test_join_network() {
    let mut wifi = build(&test_settings());

    wifi.begin("NetB", Some("correct horse")).unwrap();

    assert_eq!(wifi.status(), ConnectionStatus::Connected);
    assert_eq!(wifi.ssid(), "NetB");
    assert_eq!(wifi.local_ip(), Ipv4Addr::new(192, 168, 1, 100));
    assert_eq!(wifi.gateway_ip(), Ipv4Addr::new(192, 168, 1, 1));
    assert_eq!(wifi.subnet_mask(), Ipv4Addr::new(255, 255, 255, 0));
    assert!(wifi.radio().driver().is_dhcp_client_running());

    wifi.disconnect().unwrap();

    assert_eq!(wifi.status(), ConnectionStatus::Idle);
    assert_eq!(wifi.ssid(), "");
    assert_eq!(wifi.local_ip(), Ipv4Addr::UNSPECIFIED);
}

#[test]
fn test_join_failures() {
    let mut wifi = build(&test_settings());

    wifi.begin("NetB", Some("wrong")).unwrap();
    assert_eq!(wifi.status(), ConnectionStatus::ConnectFailed);

    wifi.begin("Nowhere", None).unwrap();
    assert_eq!(wifi.status(), ConnectionStatus::NoSsidFound);

    wifi.begin("NetA", None).unwrap();
    assert_eq!(wifi.status(), ConnectionStatus::Connected);
}

#[tokio::test]
async fn test_scan_drops_failed_connection_attempt() {
    let mut wifi = build(&test_settings());
    wifi.begin("NetB", Some("wrong")).unwrap();

    assert_eq!(wifi.scan_networks().await, 3);

    assert_eq!(wifi.status(), ConnectionStatus::Idle);
    assert_eq!(wifi.ssid(), "");
}

#[test]
fn test_static_address() {
    let mut wifi = build(&test_settings());
    wifi.begin("NetA", None).unwrap();

    let ip = Ipv4Addr::new(192, 168, 1, 42);
    wifi.configure_ip(ip, Ipv4Addr::new(192, 168, 1, 1), Ipv4Addr::new(255, 255, 255, 0))
        .unwrap();

    assert_eq!(wifi.local_ip(), ip);
    assert!(!wifi.radio().driver().is_dhcp_client_running());
}

#[test]
fn test_soft_ap() {
    let mut wifi = build(&test_settings());

    wifi.soft_ap("wifisync-setup", None).unwrap();

    assert_eq!(wifi.mode(), RadioMode::Both);
    let config = wifi.radio().driver().access_point_config();
    assert_eq!(config.auth_mode, AuthMode::Open);
    assert_eq!(config.password, "");
    assert_eq!(config.channel, 1);
    assert_eq!(wifi.soft_ap_ip(), Ipv4Addr::new(192, 168, 4, 1));
    assert_ne!(wifi.mac_address(), wifi.soft_ap_mac_address());

    wifi.soft_ap("wifisync-setup", Some("letmein1")).unwrap();
    let config = wifi.radio().driver().access_point_config();
    assert_eq!(config.auth_mode, AuthMode::Wpa2Psk);
    assert_eq!(config.password, "letmein1");
}

#[test]
fn test_overlong_ssid_rejected() {
    let mut wifi = build(&test_settings());
    let ssid = "n".repeat(33);

    assert_eq!(wifi.begin(&ssid, None), Err(Error::InvalidCredentials));
    assert_eq!(wifi.ssid(), "");
}

#[test]
fn test_default_settings_load() {
    let settings = Settings::new().unwrap();

    assert_eq!(settings.mock.access_points.len(), 3);
    assert_eq!(settings.radio.ap_channel, 1);
    assert_eq!(settings.demo.station_ssid, "NetB");
}

#[tokio::test]
async fn test_demo_run() {
    let settings = test_settings();

    wifisync_mock::run(&settings).await.unwrap();
}
