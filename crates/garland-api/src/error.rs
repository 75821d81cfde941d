use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

/// Typed failures surfaced by the API. Everything a client can trigger maps
/// to a stable status plus a `{"detail": "..."}` body; internals collapse to
/// 500 without leaking the underlying error.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing or invalid authorization token")]
    Unauthorized,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Username already taken")]
    UsernameTaken,
    #[error("Tree not found")]
    TreeNotFound,
    #[error("Message not found")]
    MessageNotFound,
    #[error("Permission denied. Only the tree owner can delete messages.")]
    NotTreeOwner,
    #[error("{0}")]
    Validation(String),
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Unauthorized | ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::UsernameTaken => StatusCode::CONFLICT,
            ApiError::TreeNotFound | ApiError::MessageNotFound => StatusCode::NOT_FOUND,
            ApiError::NotTreeOwner => StatusCode::FORBIDDEN,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(err) => {
                error!("internal error: {err:#}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(serde_json::json!({ "detail": self.to_string() }))).into_response()
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        ApiError::Internal(anyhow::Error::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_map_to_their_statuses() {
        let cases = [
            (ApiError::Unauthorized, StatusCode::UNAUTHORIZED),
            (ApiError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (ApiError::UsernameTaken, StatusCode::CONFLICT),
            (ApiError::TreeNotFound, StatusCode::NOT_FOUND),
            (ApiError::MessageNotFound, StatusCode::NOT_FOUND),
            (ApiError::NotTreeOwner, StatusCode::FORBIDDEN),
            (
                ApiError::Validation("bad".to_string()),
                StatusCode::BAD_REQUEST,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn internal_detail_stays_generic() {
        let err = ApiError::Internal(anyhow::anyhow!("connection string leaked"));
        assert_eq!(err.to_string(), "Internal server error");
    }
}
