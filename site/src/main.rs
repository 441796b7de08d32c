//! Invite site binary.
//!
//! Environment:
//! - `AIRTABLE_API_KEY`, `AIRTABLE_BASE_ID`, `AIRTABLE_TABLE_ID`: record store
//!   coordinates (required)
//! - `AIRTABLE_ENDPOINT_URL`: alternative store host, e.g. the mock store
//! - `SITE_ADDR`: listen address (default: "127.0.0.1:8787")

use invite_core::{GuestRepository, StoreConfig};
use invite_site::AppState;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("invite_site=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = StoreConfig::from_env()?;
    tracing::info!(?config, "using record store");
    let guests = GuestRepository::connect(config)?;

    let addr = std::env::var("SITE_ADDR").unwrap_or_else(|_| "127.0.0.1:8787".into());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("invite site listening on {}", addr);

    axum::serve(listener, invite_site::app(AppState::new(guests))).await?;
    Ok(())
}
