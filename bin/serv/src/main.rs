use std::net::SocketAddr;

use anyhow::Context;
use prep_api::{ApiConfig, ApiState};
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor,
};
use tower_http::cors::CorsLayer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment variables
    dotenvy::dotenv().ok();
    let config = ApiConfig::from_env();

    prep_api::tracing::init_tracing(&config.env);

    // Initialize the application state
    let state = ApiState::new(&config);

    // Moderate global rate limit: 10 requests per second, burst of 20
    let governor_conf = GovernorConfigBuilder::default()
        .key_extractor(SmartIpKeyExtractor)
        .per_second(10)
        .burst_size(20)
        .use_headers()
        .finish()
        .context("invalid rate limiter configuration")?;

    // Create the application router
    let app = prep_api::router::router()
        .with_state(state)
        .layer(GovernorLayer::new(governor_conf))
        .layer(CorsLayer::very_permissive());

    // Start the server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    tracing::info!("Server running on http://{}", config.bind_addr);
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>()).await?;

    Ok(())
}
