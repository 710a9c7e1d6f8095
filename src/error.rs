/*
 * Responsibility
 * - callback 経由で返ってくる失敗を await 側へ届ける ContextError の定義
 * - HTTP 連携 (extractor) 用の AppError 定義と IntoResponse 実装
 */
use std::time::Duration;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Outcome of a callback-driven operation that did not succeed.
///
/// `Failed` carries the value the collaborator handed to its callback,
/// untouched. The other variants come from the bridge itself.
#[derive(Debug, Error)]
pub enum ContextError<E> {
    #[error("callback reported failure")]
    Failed(E),
    #[error("callback dropped without being invoked")]
    Abandoned,
    #[error("no callback within {0:?}")]
    TimedOut(Duration),
}

impl<E> ContextError<E> {
    /// The collaborator's error, if that is what ended the call.
    pub fn into_failure(self) -> Option<E> {
        match self {
            Self::Failed(e) => Some(e),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&E> {
        match self {
            Self::Failed(e) => Some(e),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("internal server error")]
    Internal,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            AppError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_SERVER_ERROR"),
        };

        let body = ErrorResponse {
            error: ErrorBody {
                code,
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Maps an `authenticate` outcome: a strategy failure is the caller's
/// problem (401), a missing or late callback is ours (500).
///
/// `login` failures come from the session layer, not the caller; map those
/// with [`AppError::from_login`] instead of `?`.
impl<E> From<ContextError<E>> for AppError {
    fn from(e: ContextError<E>) -> Self {
        match e {
            ContextError::Failed(_) => AppError::Unauthorized,
            ContextError::Abandoned | ContextError::TimedOut(_) => AppError::Internal,
        }
    }
}

impl AppError {
    /// Every `login` failure is a server-side error.
    pub fn from_login<E>(_e: ContextError<E>) -> Self {
        AppError::Internal
    }
}
