//! Server-rendered HTTP surface of the contact book.
//!
//! Handlers stay thin: they run the validation gate, call the store, and either render a
//! page or redirect to the list with a one-shot flash message.

pub mod flash;
pub mod handlers;
pub mod router;
pub mod state;
pub mod templates;

use crate::core::StoreError;
use askama::Template;
use axum::extract::rejection::FormRejection;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;
use tracing::{error, warn};

pub use flash::FlashMessages;
pub use router::build_router;
pub use state::AppState;

#[derive(Debug, Error)]
pub enum WebError {
    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Template rendering failed: {0}")]
    Render(#[from] askama::Error),

    #[error(transparent)]
    Form(#[from] FormRejection),
}

impl WebError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        match self {
            WebError::NotFound(message) => {
                (StatusCode::NOT_FOUND, format!("Error 404: {message}")).into_response()
            }
            WebError::Store(err) => {
                error!(error = %err, "contact store failure");
                error_page(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "The contact list could not be read or saved.",
                )
            }
            WebError::Form(rejection) => {
                warn!(error = %rejection, "unreadable form submission");
                error_page(rejection.status(), &rejection.body_text())
            }
            WebError::Render(err) => {
                error!(error = %err, "template rendering failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Error 500").into_response()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, WebError>;

fn error_page(status: StatusCode, message: &str) -> Response {
    let page = templates::ErrorPage {
        title: format!("Error {}", status.as_u16()),
        message: message.to_string(),
    };
    match page.render() {
        Ok(body) => (status, Html(body)).into_response(),
        Err(_) => (status, page.title).into_response(),
    }
}

pub(crate) fn render<T: Template>(page: &T) -> Result<Html<String>> {
    Ok(Html(page.render()?))
}
