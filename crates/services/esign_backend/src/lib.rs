// --- File: crates/services/esign_backend/src/lib.rs ---
pub mod app_state;
pub mod service_factory;

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use esign_common::services::ServiceFactory;

use crate::app_state::AppState;

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Assembles the HTTP application. Envelope routes are mounted under `/api`
/// only when a provider port is available.
pub fn build_router(state: &AppState) -> Router {
    let mut api_router = Router::new()
        .route("/", get(|| async { "Welcome to the e-signature API!" }))
        .route("/health", get(health));

    match state.service_factory.envelope_port() {
        Some(port) => {
            info!("Mounting envelope routes under /api/esignature");
            api_router = api_router.merge(esign_common::routes(port));
        }
        None => warn!("No signature provider configured; envelope routes disabled."),
    }

    Router::new()
        .nest("/api", api_router)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service_factory::mock::MockServiceFactory;
    use axum::body::Body;
    use esign_config::AppConfig;
    use http::{Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn state(factory: MockServiceFactory) -> AppState {
        AppState::new(Arc::new(AppConfig::default()), Arc::new(factory))
    }

    async fn status_of(router: Router, uri: &str) -> StatusCode {
        router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_health_without_provider() {
        let router = build_router(&state(MockServiceFactory::new()));
        assert_eq!(status_of(router.clone(), "/api/health").await, StatusCode::OK);
        assert_eq!(
            status_of(router, "/api/esignature/envelopes/external/abc").await,
            StatusCode::NOT_FOUND
        );
    }

    #[cfg(feature = "docusign")]
    #[tokio::test]
    async fn test_envelope_routes_mounted_with_provider() {
        let factory = MockServiceFactory::new().with_envelope_port(
            crate::service_factory::mock::docusign_port_without_network(),
        );
        let router = build_router(&state(factory));
        let uri = format!("/api/esignature/envelopes/{}/exists", uuid::Uuid::new_v4());
        assert_eq!(status_of(router, &uri).await, StatusCode::OK);
    }
}
