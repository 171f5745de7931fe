//! API error type and its HTTP mapping.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use serde_json::json;
use thiserror::Error;
use tracing::warn;

use algoscope_playback::PlaybackError;

/// Errors surfaced to API clients.
///
/// Each maps to a status code and a `{"error": message}` body. The page
/// that raised it is left exactly as it was before the request.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Core(#[from] algoscope_core::Error),

    #[error(transparent)]
    Playback(#[from] PlaybackError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        use algoscope_core::Error as CoreError;

        match self {
            ApiError::Core(CoreError::InvalidInput(_))
            | ApiError::Playback(PlaybackError::Source(CoreError::InvalidInput(_))) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Core(CoreError::EmptyStructure(_))
            | ApiError::Playback(PlaybackError::Source(CoreError::EmptyStructure(_)))
            | ApiError::Playback(PlaybackError::NoTrace) => StatusCode::CONFLICT,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        warn!(%status, error = %self, "request rejected");
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Core(algoscope_core::Error::InvalidInput(rejection.body_text()))
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// JSON request body whose rejections are reported as [`ApiError`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(ApiJson(value))
    }
}
