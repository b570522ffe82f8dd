use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::dto::{ApiJson, LiveResultBody};
use super::routes::{ApiState, MessageResponse};
use crate::error::AppError;
use crate::types::LiveResult;

/// Active entries only.
pub async fn list(State(state): State<ApiState>) -> Result<Json<Vec<LiveResult>>, AppError> {
    Ok(Json(state.store.list_live_results().await?))
}

pub async fn get_one(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<LiveResult>, AppError> {
    Ok(Json(state.store.get_live_result(&id).await?))
}

pub async fn create(
    State(state): State<ApiState>,
    ApiJson(body): ApiJson<LiveResultBody>,
) -> Result<(StatusCode, Json<LiveResult>), AppError> {
    let created = state.store.create_live_result(body.validate_new()?).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<LiveResultBody>,
) -> Result<Json<LiveResult>, AppError> {
    Ok(Json(
        state.store.update_live_result(&id, body.validate_update()).await?,
    ))
}

pub async fn remove(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    state.store.delete_live_result(&id).await?;
    Ok(MessageResponse::deleted("Live result"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::routes::test_state;

    #[tokio::test]
    async fn deactivated_results_drop_out_of_the_list() {
        let state = test_state().await;
        let (_, Json(created)) = create(
            State(state.clone()),
            ApiJson(LiveResultBody {
                name: Some("bhootnath night".to_string()),
                result: Some("390-2".to_string()),
                time_range: Some("(7:00 PM - 10:00 PM)".to_string()),
                is_active: None,
            }),
        )
        .await
        .unwrap();
        assert_eq!(created.name, "BHOOTNATH NIGHT");

        let Json(listed) = list(State(state.clone())).await.unwrap();
        assert_eq!(listed.len(), 1);

        update(
            State(state.clone()),
            Path(created.id.clone()),
            ApiJson(LiveResultBody {
                is_active: Some(false),
                ..Default::default()
            }),
        )
        .await
        .unwrap();
        let Json(listed) = list(State(state.clone())).await.unwrap();
        assert!(listed.is_empty());

        // Still reachable by id.
        let Json(fetched) = get_one(State(state), Path(created.id)).await.unwrap();
        assert!(!fetched.is_active);
    }

    #[tokio::test]
    async fn create_requires_time_range() {
        let state = test_state().await;
        let err = create(
            State(state),
            ApiJson(LiveResultBody {
                name: Some("X".to_string()),
                ..Default::default()
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.to_string(), "Name and timeRange are required");
    }
}
