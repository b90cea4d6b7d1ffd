//! The full page response for requests that do not match any route.
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::html::error_view;

/// A full HTML page describing what went wrong and how to fix it.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorPage<'a> {
    pub status: StatusCode,
    pub description: &'a str,
    pub fix: &'a str,
}

impl ErrorPage<'_> {
    pub fn not_found() -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            description: "Something's missing.",
            fix: "Sorry, we can't find that page. Head back to the ledger to see your loans.",
        }
    }
}

impl IntoResponse for ErrorPage<'_> {
    fn into_response(self) -> Response {
        let title = self
            .status
            .canonical_reason()
            .unwrap_or("Something went wrong");
        let markup = error_view(title, self.status.as_str(), self.description, self.fix);

        (self.status, Html(markup.into_string())).into_response()
    }
}

/// Fallback route handler for paths that do not match any route.
pub async fn get_404_not_found() -> Response {
    ErrorPage::not_found().into_response()
}
