use std::error::Error;

use wifisync_embedded::Wifi;

use crate::settings::Settings;

mod firmware;
mod resolver;
pub mod settings;

pub use firmware::{FirmwareError, SimulatedRadio};
pub use resolver::SimulatedResolver;

pub type SimulatedWifi = Wifi<SimulatedRadio, SimulatedResolver>;

pub fn build(settings: &Settings) -> SimulatedWifi {
    Wifi::new(
        SimulatedRadio::new(&settings.mock),
        SimulatedResolver::new(&settings.mock),
    )
    .with_config(settings.radio.clone())
}

/// Walks the simulated device through AP setup, joining a network, one
/// scan and the configured lookups.
pub async fn run(settings: &Settings) -> Result<(), Box<dyn Error>> {
    let demo = &settings.demo;
    let mut wifi = build(settings);

    wifi.soft_ap(&demo.ap_ssid, demo.ap_password.as_deref())?;
    tracing::info!(
        "Soft AP {} up at {} (mode {:?})",
        demo.ap_ssid,
        wifi.soft_ap_ip(),
        wifi.mode()
    );

    wifi.begin(&demo.station_ssid, demo.station_password.as_deref())?;
    tracing::info!(
        "Station {}: {:?}, IP {}",
        wifi.ssid(),
        wifi.status(),
        wifi.local_ip()
    );

    tracing::info!("Starting Wi-Fi scan...");
    let count = wifi.scan_networks().await;
    tracing::info!("Found {} networks:", count);
    for i in 0..count {
        tracing::info!(
            "  {}: SSID: {}, RSSI: {}, Encryption: {:?}",
            i + 1,
            wifi.ssid_str_at(i),
            wifi.rssi_at(i),
            wifi.encryption_type_at(i)
        );
    }

    for host in &demo.lookups {
        match wifi.host_by_name(host).await {
            (true, address) => tracing::info!("{} -> {}", host, address),
            (false, _) => tracing::warn!("{} did not resolve", host),
        }
    }

    tracing::info!(
        "Done, {} suspensions on the bridge",
        wifi.bridge().suspensions()
    );
    Ok(())
}
