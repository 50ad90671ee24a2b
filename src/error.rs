/*
 * Responsibility
 * - アプリ共通の AppError 定義
 * - IntoResponse 実装 (HTTP status / JSON error body)
 * - AuthError / ContextError を統一的に変換 (詳細はレスポンスに出さない)
 */
use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::api::v1::extractors::ContextError;
use crate::services::auth::AuthError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: &'static str,
}

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum AppError {
    #[error("bad request")]
    BadRequest,
    #[error("unauthorized")]
    Unauthorized,
    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = match self {
            AppError::BadRequest => "BAD_REQUEST",
            AppError::Unauthorized => "UNAUTHORIZED",
            AppError::Internal => "INTERNAL_SERVER_ERROR",
        };

        let message = match self {
            AppError::BadRequest => "bad request",
            AppError::Unauthorized => "unauthorized",
            AppError::Internal => "internal server error",
        };

        let body = ErrorResponse {
            error: ErrorBody { code, message },
        };

        let mut res = (self.status(), Json(body)).into_response();
        if self == AppError::Unauthorized {
            res.headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        res
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::MalformedAuthorization | AuthError::TokenMalformed(_) => {
                AppError::BadRequest
            }
            AuthError::NoAuthorization | AuthError::SignatureInvalid(_) => AppError::Unauthorized,
            AuthError::Internal(_) => AppError::Internal,
        }
    }
}

impl From<ContextError> for AppError {
    fn from(_: ContextError) -> Self {
        // Reaching a handler without a record means the gate was not wired in front of it.
        AppError::Internal
    }
}
