use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Serialize;

use crate::error::ApiError;
use crate::insights::risk::{classify_risk, RiskColor, RiskReason, RiskTier, DISCLAIMER};
use crate::models::UserQuery;
use crate::routes::SharedRepo;

#[derive(Debug, Serialize)]
pub struct RiskResponse {
    tier: RiskTier,
    label: &'static str,
    color: RiskColor,
    color_hex: &'static str,
    reasons: Vec<RiskReason>,
    reason_text: Vec<&'static str>,
    average_cycle_length: Option<f64>,
    std_dev: Option<f64>,
    disclaimer: &'static str,
}

pub async fn get_risk(
    State(repo): State<SharedRepo>,
    Query(query): Query<UserQuery>,
) -> Result<Json<RiskResponse>, ApiError> {
    let cycles = repo.list_cycles(query.user_id).await?;
    let assessment = classify_risk(&cycles);

    Ok(Json(RiskResponse {
        tier: assessment.tier,
        label: assessment.tier.label(),
        color: assessment.color,
        color_hex: assessment.color.hex(),
        reason_text: assessment.reasons.iter().map(|r| r.describe()).collect(),
        reasons: assessment.reasons,
        average_cycle_length: assessment.average_length,
        std_dev: assessment.std_dev,
        disclaimer: DISCLAIMER,
    }))
}

pub fn routes(repo: SharedRepo) -> Router {
    Router::new()
        .route("/risk", get(get_risk))
        .with_state(repo)
}
