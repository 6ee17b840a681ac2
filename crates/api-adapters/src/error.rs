//! # Error → response mapping
//!
//! The same `AppError` maps differently at the two entry points:
//! page handlers bounce denials back to the login form, API handlers
//! return a structured `{success:false, msg}` failure.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use domains::error::AppError;
use serde::Serialize;

#[derive(Serialize)]
struct FailureBody {
    success: bool,
    msg: String,
}

/// Wrapper for API handlers.
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(..) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!(error = %self.0, "api request failed");
        }
        (
            status,
            Json(FailureBody {
                success: false,
                msg: self.0.to_string(),
            }),
        )
            .into_response()
    }
}

/// Wrapper for page handlers.
pub struct PageError(pub AppError);

impl From<AppError> for PageError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<askama::Error> for PageError {
    fn from(err: askama::Error) -> Self {
        Self(AppError::Internal(format!("template render: {err}")))
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        match self.0 {
            AppError::Unauthorized(_) => Redirect::to("/").into_response(),
            AppError::NotFound(..) => StatusCode::NOT_FOUND.into_response(),
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            err @ AppError::Internal(_) => {
                tracing::error!(error = %err, "page request failed");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header;

    #[test]
    fn api_denials_map_to_status_codes() {
        let cases = [
            (AppError::Unauthorized("no".into()), StatusCode::UNAUTHORIZED),
            (
                AppError::ValidationError("bad".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::NotFound("message".into(), "x".into()),
                StatusCode::NOT_FOUND,
            ),
            (
                AppError::Internal("boom".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(ApiError(err).into_response().status(), expected);
        }
    }

    #[test]
    fn page_denials_redirect_to_login() {
        let response = PageError(AppError::Unauthorized("no".into())).into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response
                .headers()
                .get(header::LOCATION)
                .and_then(|v| v.to_str().ok()),
            Some("/")
        );
    }

    #[test]
    fn page_internal_errors_are_500s() {
        let response = PageError(AppError::Internal("disk full".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
