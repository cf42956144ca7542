use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;

use crate::render;

/// Everything a request handler can fail with. The user always sees the
/// generic error page; the detail only goes to the log.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("catalog lookup failed: {0}")]
    Lookup(#[from] reqwest::Error),
    #[error("book store error: {0}")]
    Store(#[from] rusqlite::Error),
    #[error("book store connection is no longer usable")]
    StoreUnavailable,
    #[error("no book with id {0}")]
    NotFound(i64),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            AppError::NotFound(id) => tracing::warn!(id = *id, "book not found"),
            other => tracing::error!(error = %other, "request failed"),
        }
        (status, Html(render::error_page())).into_response()
    }
}
