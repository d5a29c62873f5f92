pub mod health;
pub mod roi;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::app::AppState;

/// Build the API router with all routes
pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        // Public routes
        .route("/health", get(health::health_check))
        // ROI calculator
        .route(
            "/api/roi/calculate",
            post(roi::calculate)
                .get(roi::get_calculation)
                .put(roi::update_calculation),
        )
        .route(
            "/api/roi/calculate/multi-room",
            post(roi::calculate_multi_room),
        )
        .route("/api/roi/history", get(roi::list_history))
}
