use axum::{extract::State, Json};

use super::dto::{ApiJson, LuckyNumberBody};
use super::routes::ApiState;
use crate::error::AppError;
use crate::types::LuckyNumber;

pub async fn get_current(State(state): State<ApiState>) -> Result<Json<LuckyNumber>, AppError> {
    Ok(Json(state.store.lucky_number().await?))
}

pub async fn put(
    State(state): State<ApiState>,
    ApiJson(body): ApiJson<LuckyNumberBody>,
) -> Result<Json<LuckyNumber>, AppError> {
    let (golden_ank, motor_patti) = body.into_parts();
    Ok(Json(
        state.store.set_lucky_number(golden_ank, motor_patti).await?,
    ))
}
