//! Configuration endpoints

use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};

use super::{store_error_response, ApiResponse};
use crate::api::state::AppState;
use crate::types::AppConfig;

/// GET /api/config - Current configuration (defaults if no file)
pub async fn get_config(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.config.get().await {
        Ok(config) => Json(ApiResponse::new(config)).into_response(),
        Err(e) => store_error_response(e),
    }
}

/// PUT /api/config - Replace the configuration
pub async fn update_config(
    State(state): State<Arc<AppState>>,
    Json(config): Json<AppConfig>,
) -> impl IntoResponse {
    match state.config.update(config).await {
        Ok(config) => Json(ApiResponse::new(config)).into_response(),
        Err(e) => store_error_response(e),
    }
}
