use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use super::dto::{parse_day, ApiJson, DailyResultBody};
use super::routes::{ApiState, MessageResponse};
use crate::config::DEFAULT_CHART_MARKET;
use crate::db::daily_results::DailyResultFilter;
use crate::db::defaults::SeedReport;
use crate::error::AppError;
use crate::results::{bucket_by_week, WeekBucket};
use crate::types::DailyResult;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyResultsQuery {
    pub date: Option<String>,
    pub market_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartQuery {
    pub market_name: Option<String>,
}

fn market_filter(name: Option<String>) -> Option<String> {
    name.map(|n| n.trim().to_uppercase()).filter(|n| !n.is_empty())
}

pub async fn list(
    State(state): State<ApiState>,
    Query(params): Query<DailyResultsQuery>,
) -> Result<Json<Vec<DailyResult>>, AppError> {
    let date = params
        .date
        .as_deref()
        .filter(|d| !d.trim().is_empty())
        .map(parse_day)
        .transpose()?;
    let filter = DailyResultFilter {
        date,
        market_name: market_filter(params.market_name),
    };
    Ok(Json(state.store.list_daily_results(&filter).await?))
}

/// One market's history grouped into Monday-to-Sunday rows, newest week first.
pub async fn chart(
    State(state): State<ApiState>,
    Query(params): Query<ChartQuery>,
) -> Result<Json<Vec<WeekBucket>>, AppError> {
    let filter = DailyResultFilter {
        date: None,
        market_name: Some(
            market_filter(params.market_name).unwrap_or_else(|| DEFAULT_CHART_MARKET.to_string()),
        ),
    };
    let results = state.store.list_daily_results(&filter).await?;
    Ok(Json(bucket_by_week(results)))
}

pub async fn get_one(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<DailyResult>, AppError> {
    Ok(Json(state.store.get_daily_result(&id).await?))
}

pub async fn create(
    State(state): State<ApiState>,
    ApiJson(body): ApiJson<DailyResultBody>,
) -> Result<(StatusCode, Json<DailyResult>), AppError> {
    let created = state.store.create_daily_result(body.validate_new()?).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<DailyResultBody>,
) -> Result<Json<DailyResult>, AppError> {
    let updated = state
        .store
        .update_daily_result(&id, body.validate_update()?)
        .await?;
    Ok(Json(updated))
}

pub async fn remove(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    state.store.delete_daily_result(&id).await?;
    Ok(MessageResponse::deleted("Daily result"))
}

/// Imports the bundled chart history. Safe to call repeatedly.
pub async fn seed(State(state): State<ApiState>) -> Result<Json<SeedReport>, AppError> {
    Ok(Json(state.store.seed_bundled_daily_results().await?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::dto::CreateMarketBody;
    use crate::api::markets;
    use crate::api::routes::test_state;
    use chrono::{NaiveDate, Weekday};

    fn kalyan_monday() -> DailyResultBody {
        DailyResultBody {
            date: Some("2024-01-08".to_string()),
            market_name: Some("kalyan".to_string()),
            open: Some("238".to_string()),
            close: Some("357".to_string()),
            result: None,
        }
    }

    #[tokio::test]
    async fn entered_result_shows_in_its_week_only() {
        let state = test_state().await;
        let (status, Json(created)) = create(State(state.clone()), ApiJson(kalyan_monday()))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created.display_result(), "238_35_357");
        assert_eq!(created.date, NaiveDate::from_ymd_opt(2024, 1, 8).unwrap());

        // A neighbouring week so bucketing has something to separate.
        create(
            State(state.clone()),
            ApiJson(DailyResultBody {
                date: Some("2024-01-14".to_string()),
                ..kalyan_monday()
            }),
        )
        .await
        .unwrap();

        let Json(weeks) = chart(
            State(state.clone()),
            Query(ChartQuery {
                market_name: Some("KALYAN".to_string()),
            }),
        )
        .await
        .unwrap();
        assert_eq!(weeks.len(), 1);
        assert_eq!(weeks[0].week, "08-01-2024to14-01-2024");
        assert_eq!(weeks[0].slot(Weekday::Mon).map(|r| r.id.as_str()), Some(created.id.as_str()));
        assert!(weeks[0].slot(Weekday::Tue).is_none());
        assert!(weeks[0].slot(Weekday::Sun).is_some());

        let (_, Json(market)) = markets::create(
            State(state),
            ApiJson(CreateMarketBody {
                name: Some("KALYAN".to_string()),
                open: Some("238".to_string()),
                close: Some("357".to_string()),
                ..Default::default()
            }),
        )
        .await
        .unwrap();
        assert_eq!(market.display_result, "238_35_357");
    }

    #[tokio::test]
    async fn duplicate_day_is_bad_request() {
        let state = test_state().await;
        create(State(state.clone()), ApiJson(kalyan_monday())).await.unwrap();
        let err = create(State(state), ApiJson(kalyan_monday())).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn list_filters_by_date_and_market() {
        let state = test_state().await;
        create(State(state.clone()), ApiJson(kalyan_monday())).await.unwrap();
        create(
            State(state.clone()),
            ApiJson(DailyResultBody {
                market_name: Some("MILAN DAY".to_string()),
                ..kalyan_monday()
            }),
        )
        .await
        .unwrap();

        let Json(all) = list(State(state.clone()), Query(DailyResultsQuery::default()))
            .await
            .unwrap();
        assert_eq!(all.len(), 2);

        let Json(kalyan) = list(
            State(state.clone()),
            Query(DailyResultsQuery {
                date: Some("2024-01-08".to_string()),
                market_name: Some("kalyan".to_string()),
            }),
        )
        .await
        .unwrap();
        assert_eq!(kalyan.len(), 1);
        assert_eq!(kalyan[0].market_name, "KALYAN");

        let err = list(
            State(state),
            Query(DailyResultsQuery {
                date: Some("yesterday".to_string()),
                market_name: None,
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn update_clears_stored_result_and_delete_removes() {
        let state = test_state().await;
        let (_, Json(created)) = create(
            State(state.clone()),
            ApiJson(DailyResultBody {
                result: Some("238_35_357".to_string()),
                ..kalyan_monday()
            }),
        )
        .await
        .unwrap();

        let Json(updated) = update(
            State(state.clone()),
            Path(created.id.clone()),
            ApiJson(DailyResultBody {
                close: Some("***".to_string()),
                result: Some(String::new()),
                ..Default::default()
            }),
        )
        .await
        .unwrap();
        assert_eq!(updated.result, None);
        assert_eq!(updated.display_result(), "238_3*_***");

        remove(State(state.clone()), Path(created.id.clone())).await.unwrap();
        let err = get_one(State(state), Path(created.id)).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn seed_is_idempotent() {
        let state = test_state().await;
        let Json(first) = seed(State(state.clone())).await.unwrap();
        assert!(first.inserted > 0);
        let Json(second) = seed(State(state)).await.unwrap();
        assert_eq!(second.inserted, 0);
        assert_eq!(second.skipped_existing, first.inserted);
    }
}
