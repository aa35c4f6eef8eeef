//! Axum REST API handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use sqlx::SqlitePool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::db::{self, EventFilter};
use crate::errors::Result;
use crate::events::EventRecord;

#[derive(Clone)]
pub struct ApiState {
    pub pool: SqlitePool,
}

pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/events", get(get_all_events))
        .route("/projects/:id/events", get(get_project_events))
        .route("/charities/:id/events", get(get_charity_events))
        .route("/actors/:address/events", get(get_actor_events))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ─────────────────────────────────────────────────────────
// Response shapes
// ─────────────────────────────────────────────────────────

/// Events scoped to one project, charity or address.
#[derive(Serialize)]
pub struct EventsResponse {
    pub subject: String,
    pub count: usize,
    pub events: Vec<EventRecord>,
}

#[derive(Serialize)]
pub struct AllEventsResponse {
    pub count: usize,
    pub events: Vec<EventRecord>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn respond<T: Serialize>(result: Result<T>) -> Response {
    match result {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(e) => {
            error!("API query failed: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

async fn scoped_events(state: &ApiState, filter: EventFilter, subject: String) -> Response {
    let result = db::get_events_by(&state.pool, filter, &subject)
        .await
        .map(|events| EventsResponse {
            subject,
            count: events.len(),
            events,
        });
    respond(result)
}

// ─────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────

/// `GET /health`
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `GET /projects/:id/events`
pub async fn get_project_events(
    State(state): State<Arc<ApiState>>,
    Path(project_id): Path<String>,
) -> Response {
    scoped_events(&state, EventFilter::Project, project_id).await
}

/// `GET /charities/:id/events`
///
/// Includes donations and verifications on the charity's projects as well
/// as wallet lock, exposure and withdrawal events.
pub async fn get_charity_events(
    State(state): State<Arc<ApiState>>,
    Path(charity_id): Path<String>,
) -> Response {
    scoped_events(&state, EventFilter::Charity, charity_id).await
}

/// `GET /actors/:address/events`
pub async fn get_actor_events(
    State(state): State<Arc<ApiState>>,
    Path(address): Path<String>,
) -> Response {
    scoped_events(&state, EventFilter::Actor, address).await
}

/// `GET /events`
pub async fn get_all_events(State(state): State<Arc<ApiState>>) -> Response {
    let result = db::get_all_events(&state.pool)
        .await
        .map(|events| AllEventsResponse {
            count: events.len(),
            events,
        });
    respond(result)
}
