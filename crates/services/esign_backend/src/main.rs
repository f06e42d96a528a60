// File: services/esign_backend/src/main.rs
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use esign_backend::app_state::AppState;
use esign_backend::build_router;
use esign_backend::service_factory::EsignServiceFactory;
use esign_config::load_config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    esign_common::logging::init();

    let config = Arc::new(load_config()?);
    let factory = EsignServiceFactory::new(config.clone()).await?;
    let state = AppState::new(config, Arc::new(factory));

    let app = build_router(&state);

    let addr = state.bind_address();
    let listener = TcpListener::bind(&addr).await?;
    info!("Starting server at http://{}", addr);
    info!("API endpoints available at http://{}/api", addr);

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
