//! HTTP server setup with Axum

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};

use super::rest::{config, events};
use super::state::AppState;

/// Create the Axum router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    // The front-end runs in a webview with its own origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/api/events", get(events::list_events).post(events::create_event))
        .route(
            "/api/events/:id",
            get(events::get_event)
                .put(events::update_event)
                .delete(events::delete_event),
        )
        .route("/api/config", get(config::get_config).put(config::update_config))
        .layer(cors)
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tempfile::TempDir;
    use tower::util::ServiceExt;

    use crate::settings::Settings;

    #[tokio::test]
    async fn test_health_check() {
        let temp_dir = TempDir::new().unwrap();
        let state = Arc::new(AppState::from_settings(&Settings::new(temp_dir.path())));
        let app = create_router(state);

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
    }
}
