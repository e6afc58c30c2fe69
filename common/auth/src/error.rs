use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

pub type AuthResult<T> = Result<T, AuthError>;

/// Authentication rejections. Signature, expiry, and decode failures are
/// deliberately collapsed into a single variant so callers cannot probe
/// which check a token failed.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("authorization header missing or not a bearer credential")]
    MalformedHeader,
    #[error("token invalid or expired")]
    InvalidToken,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let code = match &self {
            AuthError::MalformedHeader => "auth_header",
            AuthError::InvalidToken => "auth_token",
        };

        let body = ErrorBody {
            code,
            message: self.to_string(),
        };
        (StatusCode::UNAUTHORIZED, Json(body)).into_response()
    }
}
