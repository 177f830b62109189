use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication credentials were not provided.")]
    Unauthorized,

    #[error(transparent)]
    Domain(#[from] recipebox_shared::Error),

    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        use recipebox_shared::Error;

        let (status_code, body) = match self {
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                json!({ "detail": AppError::Unauthorized.to_string() }),
            ),
            AppError::Domain(Error::Validate(errors)) => {
                (StatusCode::BAD_REQUEST, json!({ "errors": errors }))
            }
            AppError::Domain(Error::Invalid(msg)) => {
                (StatusCode::BAD_REQUEST, json!({ "detail": msg }))
            }
            AppError::Domain(Error::Forbidden) => (
                StatusCode::FORBIDDEN,
                json!({ "detail": "You do not have permission to perform this action." }),
            ),
            AppError::Domain(Error::NotFound(what)) => (
                StatusCode::NOT_FOUND,
                json!({ "detail": format!("{what} not found") }),
            ),
            AppError::Domain(Error::Integrity(msg)) => {
                tracing::error!("Integrity violation: {msg}");
                internal()
            }
            AppError::Domain(Error::Unknown(e)) => {
                tracing::error!("Unexpected error: {e:?}");
                internal()
            }
            AppError::InternalError(e) => {
                tracing::error!("Internal error: {e:?}");
                internal()
            }
        };

        (status_code, Json(body)).into_response()
    }
}

fn internal() -> (StatusCode, serde_json::Value) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({ "detail": "An unexpected error occurred. Please try again later." }),
    )
}
