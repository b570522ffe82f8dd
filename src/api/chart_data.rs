use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::dto::{ApiJson, ChartDataBody};
use super::routes::{ApiState, MessageResponse};
use crate::error::AppError;
use crate::types::ChartData;

pub async fn list(State(state): State<ApiState>) -> Result<Json<Vec<ChartData>>, AppError> {
    Ok(Json(state.store.list_chart_data().await?))
}

pub async fn get_one(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<ChartData>, AppError> {
    Ok(Json(state.store.get_chart_data(&id).await?))
}

pub async fn create(
    State(state): State<ApiState>,
    ApiJson(body): ApiJson<ChartDataBody>,
) -> Result<(StatusCode, Json<ChartData>), AppError> {
    let created = state.store.create_chart_data(body.validate_new()?).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<ChartDataBody>,
) -> Result<Json<ChartData>, AppError> {
    Ok(Json(
        state.store.update_chart_data(&id, body.validate_update()).await?,
    ))
}

pub async fn remove(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    state.store.delete_chart_data(&id).await?;
    Ok(MessageResponse::deleted("Chart data"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::routes::test_state;

    #[tokio::test]
    async fn grid_row_lifecycle() {
        let state = test_state().await;
        let err = create(State(state.clone()), ApiJson(ChartDataBody::default()))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Date range is required");

        let (_, Json(row)) = create(
            State(state.clone()),
            ApiJson(ChartDataBody {
                date_range: Some("05-10-2020\nto\n11-10-2020".to_string()),
                mon: Some("1\n2\n3".to_string()),
                ..Default::default()
            }),
        )
        .await
        .unwrap();
        assert_eq!(row.mon, "1\n2\n3");
        assert_eq!(row.tue, "");

        let Json(row) = update(
            State(state.clone()),
            Path(row.id.clone()),
            ApiJson(ChartDataBody {
                tue: Some("45".to_string()),
                ..Default::default()
            }),
        )
        .await
        .unwrap();
        assert_eq!(row.mon, "1\n2\n3");
        assert_eq!(row.tue, "45");

        remove(State(state.clone()), Path(row.id)).await.unwrap();
        let Json(rows) = list(State(state)).await.unwrap();
        assert!(rows.is_empty());
    }
}
