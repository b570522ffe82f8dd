use std::collections::BTreeMap;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::dto::{ApiJson, CreateSettingBody, PutSettingBody};
use super::routes::{ApiState, MessageResponse};
use crate::error::AppError;
use crate::types::Setting;

/// All settings as a flat `{KEY: value}` object.
pub async fn map(
    State(state): State<ApiState>,
) -> Result<Json<BTreeMap<String, String>>, AppError> {
    Ok(Json(state.store.settings_map().await?))
}

pub async fn get_one(
    State(state): State<ApiState>,
    Path(key): Path<String>,
) -> Result<Json<Setting>, AppError> {
    Ok(Json(state.store.get_setting(&key).await?))
}

pub async fn create(
    State(state): State<ApiState>,
    ApiJson(body): ApiJson<CreateSettingBody>,
) -> Result<(StatusCode, Json<Setting>), AppError> {
    let (key, value, description) = body.validate()?;
    let setting = state.store.create_setting(&key, &value, &description).await?;
    Ok((StatusCode::CREATED, Json(setting)))
}

/// Creates the key when missing. An omitted description is stored as empty.
pub async fn put(
    State(state): State<ApiState>,
    Path(key): Path<String>,
    ApiJson(body): ApiJson<PutSettingBody>,
) -> Result<Json<Setting>, AppError> {
    let (value, description) = body.validate()?;
    Ok(Json(
        state.store.upsert_setting(&key, &value, &description).await?,
    ))
}

pub async fn remove(
    State(state): State<ApiState>,
    Path(key): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    state.store.delete_setting(&key).await?;
    Ok(MessageResponse::deleted("Setting"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::routes::test_state;

    #[tokio::test]
    async fn create_put_and_map() {
        let state = test_state().await;
        let (status, Json(created)) = create(
            State(state.clone()),
            ApiJson(CreateSettingBody {
                key: Some("site_name".to_string()),
                value: Some("Dpboss Online".to_string()),
                description: Some("Website name".to_string()),
            }),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created.key, "SITE_NAME");

        let err = create(
            State(state.clone()),
            ApiJson(CreateSettingBody {
                key: Some("SITE_NAME".to_string()),
                value: Some("Other".to_string()),
                description: None,
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.to_string(), "Setting with this key already exists");

        let Json(updated) = put(
            State(state.clone()),
            Path("site_name".to_string()),
            ApiJson(PutSettingBody {
                value: Some("Matka Live".to_string()),
                description: None,
            }),
        )
        .await
        .unwrap();
        assert_eq!(updated.value, "Matka Live");
        assert_eq!(updated.description, "");

        let Json(all) = map(State(state)).await.unwrap();
        assert_eq!(all.get("SITE_NAME").map(String::as_str), Some("Matka Live"));
    }

    #[tokio::test]
    async fn blank_values_are_rejected_and_nothing_is_stored() {
        let state = test_state().await;
        let err = create(
            State(state.clone()),
            ApiJson(CreateSettingBody {
                key: Some("SITE_NAME".to_string()),
                value: Some(String::new()),
                description: None,
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        state
            .store
            .upsert_setting("API_ENDPOINT", "http://localhost:5000", "Backend API endpoint")
            .await
            .unwrap();
        let err = put(
            State(state.clone()),
            Path("API_ENDPOINT".to_string()),
            ApiJson(PutSettingBody {
                value: Some("  ".to_string()),
                description: None,
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let Json(all) = map(State(state)).await.unwrap();
        assert!(!all.contains_key("SITE_NAME"));
        assert_eq!(
            all.get("API_ENDPOINT").map(String::as_str),
            Some("http://localhost:5000")
        );
    }

    #[tokio::test]
    async fn put_requires_value_and_delete_missing_is_404() {
        let state = test_state().await;
        let err = put(
            State(state.clone()),
            Path("X".to_string()),
            ApiJson(PutSettingBody::default()),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let err = remove(State(state), Path("NOPE".to_string())).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }
}
