//! Route table and middleware.

use crate::handlers::{equipment, manpower};
use crate::state::AppState;
use axum::http::{header::CONTENT_TYPE, Method};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/health", get(health))
        .nest("/api/equipment-search", equipment_routes())
        .nest("/api/manpower-search", manpower_routes())
        .layer(cors)
        .with_state(state)
}

fn equipment_routes() -> Router<AppState> {
    Router::new()
        .route("/search", get(equipment::search))
        .route("/locations", get(equipment::locations))
        .route("/stats", get(equipment::stats))
        .route("/{id}", get(equipment::by_id))
}

fn manpower_routes() -> Router<AppState> {
    Router::new()
        .route("/search", post(manpower::search))
        .route("/details/{manpower_id}", get(manpower::details))
        .route("/stats", get(manpower::stats))
        .route("/categories", get(manpower::professional_categories))
        .route("/featured", get(manpower::featured))
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "success": true, "message": "Server is running" }))
}
