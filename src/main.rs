use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use roster::config::AppConfig;
use roster::gateway::HttpStudentGateway;
use roster::routes::router;
use roster::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "roster=debug".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::new_from_env()?;
    info!("using student backend at {}", config.api_base_url);

    let gateway = Arc::new(HttpStudentGateway::from_config(&config)?);
    let state = AppState::new(&config, gateway);

    // The page shows a spinner until this first load lands.
    let console = state.console.clone();
    tokio::spawn(async move { console.refresh().await });

    let app = router(state);

    info!("listening on http://{}", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
