use std::error::Error;

use ai_llm_service::telemetry;
use tracing::{Level, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // A missing .env is fine; real environment variables take precedence.
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(telemetry::env_filter_with_level("info", Level::INFO))
        .with(telemetry::layer())
        .try_init()?;

    match dotenv {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(e) if e.not_found() => {}
        Err(e) => return Err(e.into()),
    }

    api::start().await?;

    Ok(())
}
