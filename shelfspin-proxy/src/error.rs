use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use shelfspin_fetch::{ForwardError, UPSTREAM_ERROR_PREFIX};

/// Application-level error type for HTTP handlers.
///
/// Renders as a plain-text body, matching what the polling client expects
/// from the proxy.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A failure from forwarding the request to BGG.
    #[error(transparent)]
    Forward(#[from] ForwardError),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Forward(err @ ForwardError::BadRequest(_)) => {
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            AppError::Forward(err) => {
                tracing::error!(error = %err, "Proxy error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("{UPSTREAM_ERROR_PREFIX}: {err}"),
                )
            }
        };

        (status, [(CONTENT_TYPE, "text/plain; charset=utf-8")], message).into_response()
    }
}
