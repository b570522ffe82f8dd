use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::dto::{ApiJson, CreateMarketBody, UpdateMarketBody};
use super::routes::{ApiState, MessageResponse};
use crate::error::AppError;
use crate::results::hours;
use crate::types::{Market, MarketView};

fn view(market: Market, now: &DateTime<Utc>) -> MarketView {
    MarketView {
        display_result: market.display_result(),
        is_open: hours::is_open_now(&market.opening_time, &market.closing_time, now),
        market,
    }
}

pub async fn list(State(state): State<ApiState>) -> Result<Json<Vec<MarketView>>, AppError> {
    let now = Utc::now();
    let markets = state.store.list_markets().await?;
    Ok(Json(markets.into_iter().map(|m| view(m, &now)).collect()))
}

pub async fn get_one(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<MarketView>, AppError> {
    let market = state.store.get_market(&id).await?;
    Ok(Json(view(market, &Utc::now())))
}

pub async fn create(
    State(state): State<ApiState>,
    ApiJson(body): ApiJson<CreateMarketBody>,
) -> Result<(StatusCode, Json<MarketView>), AppError> {
    let market = state.store.create_market(body.validate()?).await?;
    Ok((StatusCode::CREATED, Json(view(market, &Utc::now()))))
}

pub async fn update(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<UpdateMarketBody>,
) -> Result<Json<MarketView>, AppError> {
    let market = state.store.update_market(&id, body.validate()?).await?;
    Ok(Json(view(market, &Utc::now())))
}

pub async fn remove(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    state.store.delete_market(&id).await?;
    Ok(MessageResponse::deleted("Market"))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetResponse {
    pub message: String,
    pub modified_count: u64,
}

/// Manual trigger for the midnight reset.
pub async fn reset_all(State(state): State<ApiState>) -> Result<Json<ResetResponse>, AppError> {
    let modified_count = state.store.reset_all_markets().await?;
    Ok(Json(ResetResponse {
        message: "All markets reset successfully".to_string(),
        modified_count,
    }))
}
