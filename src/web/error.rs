use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use std::fmt;

use super::templates;

#[derive(Debug)]
pub enum WebError {
    NotFound(String),

    DatabaseError(String),

    InternalError(String),

    Unauthorized,
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WebError::NotFound(msg) => write!(f, "Not found: {}", msg),
            WebError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            WebError::InternalError(msg) => write!(f, "Internal error: {}", msg),
            WebError::Unauthorized => write!(f, "Unauthorized"),
        }
    }
}

impl std::error::Error for WebError {}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        match &self {
            WebError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                Html(templates::not_found_page(msg)),
            )
                .into_response(),
            WebError::DatabaseError(msg) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html(templates::internal_error_page()),
                )
                    .into_response()
            }
            WebError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html(templates::internal_error_page()),
                )
                    .into_response()
            }
            // Session without a login marker on a protected page; send the
            // browser to the login form instead of rendering an error.
            WebError::Unauthorized => Redirect::to("/login").into_response(),
        }
    }
}

impl From<anyhow::Error> for WebError {
    fn from(err: anyhow::Error) -> Self {
        WebError::InternalError(err.to_string())
    }
}

impl From<sea_orm::DbErr> for WebError {
    fn from(err: sea_orm::DbErr) -> Self {
        WebError::DatabaseError(err.to_string())
    }
}

impl WebError {
    pub fn movie_not_found(id: i32) -> Self {
        WebError::NotFound(format!("Movie {} not found", id))
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        WebError::InternalError(msg.into())
    }
}
