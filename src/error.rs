use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::repository::RepoError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(&'static str),

    #[error(transparent)]
    Repository(#[from] RepoError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg).into_response(),
            ApiError::Repository(e) => {
                tracing::error!("❌ DB error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "DB error").into_response()
            }
        }
    }
}
