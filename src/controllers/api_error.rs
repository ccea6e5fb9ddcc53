use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use solar_yield_estimator::error::{InvalidParameterError, LoadError};
use thiserror::Error;
use tracing::warn;

/// Errors returned from handlers
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("location not found: {0}")]
    LocationNotFound(String),

    #[error(transparent)]
    InvalidParameter(#[from] InvalidParameterError),

    #[error("invalid request body: {0}")]
    InvalidRequest(String),

    #[error("radiation dataset unavailable: {0}")]
    DatasetUnavailable(#[from] LoadError),

    #[error("internal server error: {0}")]
    Internal(String),
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: &'static str,
    message: String,
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::LocationNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidParameter(_) | ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::DatasetUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_type(&self) -> &'static str {
        match self {
            ApiError::LocationNotFound(_) => "LocationNotFound",
            ApiError::InvalidParameter(_) => "InvalidParameter",
            ApiError::InvalidRequest(_) => "InvalidRequest",
            ApiError::DatasetUnavailable(_) => "DatasetUnavailable",
            ApiError::Internal(_) => "Internal",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        warn!(status = status.as_u16(), error = %self, "request failed");
        let body = ErrorResponse {
            error: self.error_type(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidRequest(rejection.body_text())
    }
}

/// `Json` extractor whose rejections answer with the `ApiError` JSON body.
#[derive(Debug)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}
