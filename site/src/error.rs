//! Page and action failures, and the HTTP status each one answers with.
//!
//! A missing guest is a 404. A record store failure is a 502, logged at
//! `error`; the store's own message never reaches the visitor.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use invite_core::ApiError;
use thiserror::Error;

/// How a page load or form action can fail.
#[derive(Debug, Error)]
pub enum PageError {
    /// No such guest, an unusable id, or a record with nothing in it.
    #[error("guest not found")]
    NotFound,

    #[error("record store request failed: {0}")]
    Store(#[source] ApiError),

    #[error("store task did not complete: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl From<ApiError> for PageError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::NotFound | ApiError::InvalidRecordId(_) => PageError::NotFound,
            other => PageError::Store(other),
        }
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        match self {
            PageError::NotFound => (StatusCode::NOT_FOUND, "Not Found").into_response(),
            PageError::Store(err) => {
                tracing::error!(error = %err, "record store failure");
                (StatusCode::BAD_GATEWAY, "Bad Gateway").into_response()
            }
            PageError::Task(err) => {
                tracing::error!(error = %err, "store task failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_failures_map_to_not_found() {
        assert!(matches!(PageError::from(ApiError::NotFound), PageError::NotFound));
        assert!(matches!(
            PageError::from(ApiError::InvalidRecordId("a/b".into())),
            PageError::NotFound
        ));
    }

    #[test]
    fn store_failures_map_to_bad_gateway() {
        let err = PageError::from(ApiError::Transport("timed out".into()));
        assert!(matches!(err, PageError::Store(ApiError::Transport(_))));
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);

        let err = PageError::from(ApiError::Http { status: 401, body: String::new() });
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn not_found_response() {
        assert_eq!(PageError::NotFound.into_response().status(), StatusCode::NOT_FOUND);
    }
}
