//! Algoscope visualization server binary.

use algoscope_vis::{VisConfig, VisServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "algoscope_vis=info,algoscope_playback=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = VisConfig::from_env();
    tracing::info!(addr = %config.addr, seed = ?config.seed, "Starting Algoscope");

    VisServer::new(config).await.serve().await?;

    Ok(())
}
