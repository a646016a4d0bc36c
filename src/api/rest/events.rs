//! Event endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use super::{store_error_response, ApiError, ApiResponse};
use crate::api::state::AppState;
use crate::types::{sort_newest_first, EventId, EventPatch, WireEvent};

/// Order of the event list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListOrder {
    /// Descending id, as lists are displayed
    #[default]
    Newest,
    /// Order of the stored file
    Stored,
}

/// Query parameters for listing events
#[derive(Debug, Deserialize)]
pub struct ListEventsParams {
    /// Discard the cache and re-read the file
    #[serde(default)]
    pub force: bool,
    #[serde(default)]
    pub order: ListOrder,
}

/// GET /api/events - List events
pub async fn list_events(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListEventsParams>,
) -> impl IntoResponse {
    let mut events = match state.events.get(params.force).await {
        Ok(events) => events,
        Err(e) => return store_error_response(e),
    };

    if params.order == ListOrder::Newest {
        sort_newest_first(&mut events);
    }

    let total = events.len();
    let data: Vec<WireEvent> = events.iter().map(WireEvent::from).collect();
    Json(ApiResponse::with_total(data, total)).into_response()
}

/// GET /api/events/:id - Get single event
pub async fn get_event(
    State(state): State<Arc<AppState>>,
    Path(id): Path<EventId>,
) -> impl IntoResponse {
    match state.events.find(id).await {
        Ok(Some(event)) => Json(ApiResponse::new(WireEvent::from(&event))).into_response(),
        Ok(None) => {
            let error = ApiError::not_found(format!("Event {} not found", id));
            (StatusCode::NOT_FOUND, Json(error)).into_response()
        }
        Err(e) => store_error_response(e),
    }
}

/// POST /api/events - Create an event with a generated id
pub async fn create_event(
    State(state): State<Arc<AppState>>,
    Json(patch): Json<EventPatch>,
) -> impl IntoResponse {
    match state.events.try_update_or_create(None, patch).await {
        Ok(event) => (
            StatusCode::CREATED,
            Json(ApiResponse::new(WireEvent::from(&event))),
        )
            .into_response(),
        Err(e) => store_error_response(e),
    }
}

/// PUT /api/events/:id - Update the event, or create it under this id
pub async fn update_event(
    State(state): State<Arc<AppState>>,
    Path(id): Path<EventId>,
    Json(patch): Json<EventPatch>,
) -> impl IntoResponse {
    match state.events.try_update_or_create(Some(id), patch).await {
        Ok(event) => Json(ApiResponse::new(WireEvent::from(&event))).into_response(),
        Err(e) => store_error_response(e),
    }
}

/// DELETE /api/events/:id - Delete an event
pub async fn delete_event(
    State(state): State<Arc<AppState>>,
    Path(id): Path<EventId>,
) -> impl IntoResponse {
    match state.events.remove(id).await {
        Ok(Some(_)) => StatusCode::NO_CONTENT.into_response(),
        Ok(None) => {
            let error = ApiError::not_found(format!("Event {} not found", id));
            (StatusCode::NOT_FOUND, Json(error)).into_response()
        }
        Err(e) => store_error_response(e),
    }
}
