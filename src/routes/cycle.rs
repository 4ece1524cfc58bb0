use axum::{Router, routing::{get, post}, Json, extract::{State, Query}};
use chrono::NaiveDate;
use serde::Serialize;
use crate::error::ApiError;
use crate::insights::{average_cycle_length, predict_next_cycle};
use crate::models::{CycleRecord, NewCycle, UserQuery};
use crate::routes::SharedRepo;
use axum::http::StatusCode;

#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    pub predicted_start: Option<NaiveDate>,
    pub average_cycle_length: i64,
    pub based_on_cycles: usize,
}

pub fn routes(repo: SharedRepo) -> Router {
    Router::new()
        .route("/cycle", post(create_cycle))
        .route("/cycles", get(list_cycles))
        .route("/cycle/prediction", get(get_prediction))
        .with_state(repo)
}

async fn create_cycle(
    State(repo): State<SharedRepo>,
    Json(body): Json<NewCycle>,
) -> Result<(StatusCode, Json<CycleRecord>), ApiError> {
    body.validate().map_err(ApiError::Validation)?;

    let record = repo.save_cycle(&body).await?;
    tracing::info!(user_id = %record.user_id, start = %record.start_date, "🩸 cycle logged");

    Ok((StatusCode::CREATED, Json(record)))
}

async fn list_cycles(
    State(repo): State<SharedRepo>,
    Query(params): Query<UserQuery>,
) -> Result<Json<Vec<CycleRecord>>, ApiError> {
    let mut cycles = repo.list_cycles(params.user_id).await?;
    cycles.sort_by_key(|c| c.start_date);
    Ok(Json(cycles))
}

async fn get_prediction(
    State(repo): State<SharedRepo>,
    Query(params): Query<UserQuery>,
) -> Result<Json<PredictionResponse>, ApiError> {
    let cycles = repo.list_cycles(params.user_id).await?;

    Ok(Json(PredictionResponse {
        predicted_start: predict_next_cycle(&cycles),
        average_cycle_length: average_cycle_length(&cycles),
        based_on_cycles: cycles.len(),
    }))
}
