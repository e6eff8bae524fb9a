use actix_session::{SessionGetError, SessionInsertError};
use actix_web::http::StatusCode;
use actix_web::http::header::{self, ContentType};
use actix_web::{HttpResponse, ResponseError};
use sea_orm::DbErr;
use thiserror::Error;

use crate::middlewares::v1::auth::login_url;

/// Failures that abort a request.
///
/// Form validation and bad credentials are not errors; they re-render the
/// page. Everything here is either the login guard bouncing an anonymous
/// client or something the client cannot fix.
#[derive(Debug, Error)]
pub enum Error {
    #[error("authentication required to access {next}")]
    Unauthenticated { next: String },
    #[error("missing application state: {0}")]
    MissingState(&'static str),
    #[error("database error: {0}")]
    Database(#[from] DbErr),
    #[error("password hashing failed: {0}")]
    PasswordHash(String),
    #[error("failed to read session: {0}")]
    SessionGet(#[from] SessionGetError),
    #[error("failed to write session: {0}")]
    SessionInsert(#[from] SessionInsertError),
    #[error("failed to render template: {0}")]
    Template(#[from] handlebars::RenderError),
    #[error("blocking task was cancelled")]
    Blocking(#[from] actix_web::error::BlockingError),
}

impl From<argon2::password_hash::Error> for Error {
    fn from(error: argon2::password_hash::Error) -> Self {
        Self::PasswordHash(error.to_string())
    }
}

const INTERNAL_SERVER_ERROR_PAGE: &str = "<!DOCTYPE html>\
<html lang=\"en\"><head><meta charset=\"utf-8\"><title>Internal Server Error</title></head>\
<body><h1>Internal Server Error</h1><p>Something went wrong. Please try again later.</p>\
<p><a href=\"/\">Back to home</a></p></body></html>";

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthenticated { .. } => StatusCode::FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            Self::Unauthenticated { next } => HttpResponse::Found()
                .insert_header((header::LOCATION, login_url(next)))
                .finish(),
            error => {
                ::tracing::error!(error = %error, "Request failed");

                HttpResponse::InternalServerError()
                    .content_type(ContentType::html())
                    .body(INTERNAL_SERVER_ERROR_PAGE)
            }
        }
    }
}
