use wifisync_mock::run;
use wifisync_mock::settings::Settings;

#[tokio::main]
async fn main() {
    let settings = Settings::new().expect("Failed to load settings.");

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let app_name = env!("CARGO_PKG_NAME").replace('-', "_");
            let level = settings.logger.level.as_str();

            format!("{app_name}={level},wifisync_embedded={level}").into()
        }))
        .init();

    if let Err(e) = run(&settings).await {
        tracing::error!("Simulation failed: {}", e);
    }
}
