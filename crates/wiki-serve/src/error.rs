//! Error types for the wiki service.
//!
//! Errors are rendered as small HTML pages, since every route serves a
//! browser.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use maud::{DOCTYPE, PreEscaped, html};

/// Wiki service error type.
#[derive(Debug, thiserror::Error)]
pub enum WikiError {
    /// The request path does not address a valid page title.
    #[error("invalid page title: {0}")]
    InvalidTitle(String),

    /// Persisting a page body failed.
    #[error("failed to save page {title}: {source}")]
    Write {
        title: String,
        #[source]
        source: std::io::Error,
    },

    /// A template could not be rendered.
    #[error("failed to render template {template}: {reason}")]
    Render {
        template: &'static str,
        reason: String,
    },

    /// Anything else.
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for WikiError {
    fn into_response(self) -> Response {
        let (status, title, message) = match &self {
            Self::InvalidTitle(path) => {
                tracing::debug!(path = %path, "rejected page path");
                (
                    StatusCode::NOT_FOUND,
                    "Invalid Page Title",
                    "Page titles may only contain letters and digits.".to_string(),
                )
            }
            Self::Write { title, source } => {
                tracing::error!(title = %title, error = %source, "page save failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Save Failed",
                    source.to_string(),
                )
            }
            Self::Render { template, reason } => {
                tracing::error!(template = %template, reason = %reason, "template render failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Render Failed",
                    reason.clone(),
                )
            }
            Self::Internal(err) => {
                tracing::error!(error = %err, "internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Error",
                    "An internal error occurred.".to_string(),
                )
            }
        };

        let markup = html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="utf-8";
                    meta name="viewport" content="width=device-width, initial-scale=1";
                    title { (title) }
                    meta name="robots" content="noindex";
                    style { (PreEscaped(crate::render::templates::PAGE_CSS)) }
                }
                body {
                    main class="error-page" {
                        h1 { (title) }
                        p { (message) }
                        a href="/" { "Back to FrontPage" }
                    }
                }
            }
        };

        (status, markup).into_response()
    }
}
