use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Router,
};

use crate::error::ApiError;
use crate::insights::stats::cycle_stats;
use crate::models::{CycleStatsResponse, UserQuery};
use crate::routes::SharedRepo;

pub async fn get_cycle_stats(
    State(repo): State<SharedRepo>,
    Query(query): Query<UserQuery>,
) -> Result<Json<CycleStatsResponse>, ApiError> {
    let cycles = repo.list_cycles(query.user_id).await?;
    Ok(Json(cycle_stats(&cycles)))
}

pub fn routes(repo: SharedRepo) -> Router {
    Router::new()
        .route("/cycle-stats", get(get_cycle_stats))
        .with_state(repo)
}
