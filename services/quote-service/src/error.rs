use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use quote_utils::{ErrorResponse, QuoteError};

/// Handler error rendered as a JSON [`ErrorResponse`] with the status the
/// underlying [`QuoteError`] maps to.
#[derive(Debug)]
pub struct ApiError(pub QuoteError);

impl From<QuoteError> for ApiError {
    fn from(error: QuoteError) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            tracing::error!(error = %self.0, "Request failed");
        } else {
            tracing::warn!(error = %self.0, code = self.0.error_code(), "Request rejected");
        }

        (status, Json(ErrorResponse::from(self.0))).into_response()
    }
}
