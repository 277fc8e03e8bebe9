use std::net::Ipv4Addr;

use wifisync_embedded::{AuthMode, RadioConfig};
use wifisync_mock::settings::{Demo, HostEntry, Logger, Mock, MockAccessPoint, Settings};

pub const EXAMPLE_COM: Ipv4Addr = Ipv4Addr::new(93, 184, 216, 34);

fn access_point(
    ssid: &str,
    rssi: i8,
    channel: u8,
    auth: AuthMode,
    password: &str,
) -> MockAccessPoint {
    MockAccessPoint {
        ssid: ssid.to_string(),
        rssi,
        channel,
        auth,
        password: password.to_string(),
    }
}

pub fn test_settings() -> Settings {
    Settings {
        logger: Logger {
            level: "debug".to_string(),
        },
        radio: RadioConfig::default(),
        mock: Mock {
            scan_delay_ms: 20,
            lookup_delay_ms: 10,
            access_points: vec![
                access_point("NetA", -40, 1, AuthMode::Open, ""),
                access_point("NetB", -70, 6, AuthMode::Wpa2Psk, "correct horse"),
                access_point("NetC", -55, 11, AuthMode::Wep, "12345"),
            ],
            hosts: vec![HostEntry {
                name: "example.com".to_string(),
                address: EXAMPLE_COM,
            }],
        },
        demo: Demo {
            ap_ssid: "wifisync-setup".to_string(),
            ap_password: None,
            station_ssid: "NetB".to_string(),
            station_password: Some("correct horse".to_string()),
            lookups: vec!["example.com".to_string()],
        },
    }
}
