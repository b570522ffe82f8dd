use axum::{
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};

use super::{chart_data, daily_results, live_results, lucky_number, markets, number_data, settings};
use crate::db::Store;

#[derive(Clone)]
pub struct ApiState {
    pub store: Store,
}

pub fn router(state: ApiState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        // Markets
        .route("/api/markets", get(markets::list).post(markets::create))
        .route("/api/markets/reset-all", post(markets::reset_all))
        .route(
            "/api/markets/:id",
            get(markets::get_one).put(markets::update).delete(markets::remove),
        )
        // Daily results
        .route(
            "/api/daily-results",
            get(daily_results::list).post(daily_results::create),
        )
        .route("/api/daily-results/chart", get(daily_results::chart))
        .route("/api/daily-results/seed", post(daily_results::seed))
        .route(
            "/api/daily-results/:id",
            get(daily_results::get_one)
                .put(daily_results::update)
                .delete(daily_results::remove),
        )
        // Live results
        .route(
            "/api/live-results",
            get(live_results::list).post(live_results::create),
        )
        .route(
            "/api/live-results/:id",
            get(live_results::get_one)
                .put(live_results::update)
                .delete(live_results::remove),
        )
        // Settings
        .route("/api/settings", get(settings::map).post(settings::create))
        .route(
            "/api/settings/:key",
            get(settings::get_one).put(settings::put).delete(settings::remove),
        )
        // Hand-entered chart grid
        .route(
            "/api/chart-data",
            get(chart_data::list).post(chart_data::create),
        )
        .route(
            "/api/chart-data/:id",
            get(chart_data::get_one)
                .put(chart_data::update)
                .delete(chart_data::remove),
        )
        .route(
            "/api/lucky-number",
            get(lucky_number::get_current).put(lucky_number::put),
        )
        // Externally written documents
        .route("/api/number-data", get(number_data::list))
        .route("/api/number-data/charts/all", get(number_data::charts_all))
        .route("/api/number-data/:id", get(number_data::get_one))
        .layer(cors)
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Shared response bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn deleted(what: &str) -> Json<Self> {
        Json(Self {
            message: format!("{what} deleted successfully"),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK",
        timestamp: chrono::Utc::now(),
    })
}

#[cfg(test)]
pub(crate) async fn test_state() -> ApiState {
    ApiState {
        store: crate::db::test_store().await,
    }
}
