use std::sync::Arc;

use axum::{routing::get, Router};

use crate::repository::CycleRepository;

pub mod cycle;
pub mod cycle_stats;
pub mod risk;

pub type SharedRepo = Arc<dyn CycleRepository>;

pub fn app(repo: SharedRepo) -> Router {
    Router::new()
        .merge(cycle::routes(repo.clone()))
        .merge(cycle_stats::routes(repo.clone()))
        .merge(risk::routes(repo))
        .route("/health", get(|| async { "✅ Backend up" }))
}
