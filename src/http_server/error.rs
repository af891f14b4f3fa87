use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::http_server::templates;
use crate::services::error::ListingError;

/// Failure of a page handler, rendered as the 404 or 500 page.
pub enum PageError {
    NotFound,
    // Logged in full, the client only sees the 500 page
    Internal(color_eyre::Report),
}

impl std::fmt::Debug for PageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PageError::NotFound => f.write_str("NotFound"),
            PageError::Internal(report) => report.fmt(f),
        }
    }
}

impl From<ListingError> for PageError {
    fn from(err: ListingError) -> Self {
        if err.is_not_found() {
            PageError::NotFound
        } else {
            PageError::Internal(color_eyre::Report::new(err))
        }
    }
}

impl From<color_eyre::Report> for PageError {
    fn from(report: color_eyre::Report) -> Self {
        PageError::Internal(report)
    }
}

// Tell axum how to convert `PageError` into a response.
impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        match self {
            PageError::NotFound => {
                (StatusCode::NOT_FOUND, Html(templates::errors::not_found())).into_response()
            }
            PageError::Internal(err) => {
                log::error!("{err:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html(templates::errors::server_error()),
                )
                    .into_response()
            }
        }
    }
}
