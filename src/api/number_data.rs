use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;

use super::routes::ApiState;
use crate::error::AppError;

pub async fn list(State(state): State<ApiState>) -> Result<Json<Vec<Value>>, AppError> {
    Ok(Json(state.store.list_number_data().await?))
}

pub async fn get_one(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    Ok(Json(state.store.get_number_data(&id).await?))
}

/// Every document's `data` entries in one flat list.
pub async fn charts_all(State(state): State<ApiState>) -> Result<Json<Vec<Value>>, AppError> {
    Ok(Json(state.store.number_data_chart_entries().await?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::routes::test_state;

    #[tokio::test]
    async fn empty_store_serves_empty_lists() {
        let state = test_state().await;
        let Json(docs) = list(State(state.clone())).await.unwrap();
        assert!(docs.is_empty());
        let Json(entries) = charts_all(State(state.clone())).await.unwrap();
        assert!(entries.is_empty());
        let err = get_one(State(state), Path("x".to_string())).await.unwrap_err();
        assert_eq!(err.status(), axum::http::StatusCode::NOT_FOUND);
    }
}
