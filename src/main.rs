mod api_client;
mod config;
mod error;
mod models;
mod render;

use crate::{api_client::LeetCodeClient, config::Config, error::AppError};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    let config = Config::load()?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        username = %config.username,
        template = %config.template_path.display(),
        output = %config.output_path.display(),
        "generating stats card"
    );

    let client = LeetCodeClient::new(&config);
    let stats = client.fetch_stats().await;
    info!(?stats, "fetched stats");

    render::render_file(&config.template_path, &config.output_path, &stats)?;
    Ok(())
}
