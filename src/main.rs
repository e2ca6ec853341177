use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use user_console::api::ApiClient;
use user_console::config::Config;
use user_console::terminal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Logs go to stderr so they don't interleave with the rendered panel
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("user_console=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env().context("invalid configuration")?;
    info!(api = %config.api_base_url, timeout = ?config.request_timeout, "starting user console");

    let client = ApiClient::new(&config).context("failed to build HTTP client")?;
    terminal::run(Arc::new(client)).await?;

    Ok(())
}
