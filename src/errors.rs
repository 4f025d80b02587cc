use actix_web::{
    http::{header, header::ContentType, StatusCode},
    HttpResponse,
};
use derive_more::Display;

use crate::{store::StoreError, templates::RenderError};

#[derive(Debug, Display)]
pub enum ServerError {
    #[display(fmt = "malformed form data")]
    InvalidForm,
    #[display(fmt = "not found")]
    NotFound,
    /// Carries the one method the resource accepts.
    #[display(fmt = "method not allowed, expected {}", _0)]
    MethodNotAllowed(&'static str),
    #[display(fmt = "store error: {}", _0)]
    StoreError(StoreError),
    #[display(fmt = "render error: {}", _0)]
    RenderError(RenderError),
}

impl From<StoreError> for ServerError {
    fn from(err: StoreError) -> ServerError {
        ServerError::StoreError(err)
    }
}

impl From<RenderError> for ServerError {
    fn from(err: RenderError) -> ServerError {
        ServerError::RenderError(err)
    }
}

impl actix_web::error::ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServerError::InvalidForm => StatusCode::BAD_REQUEST,
            ServerError::NotFound => StatusCode::NOT_FOUND,
            ServerError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ServerError::StoreError(_) | ServerError::RenderError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("{}", self);
        } else {
            log::debug!("client error: {}", self);
        }

        let mut response = HttpResponse::build(status);
        if let ServerError::MethodNotAllowed(allowed) = self {
            response.insert_header((header::ALLOW, *allowed));
        }

        // The client only ever sees the status text.
        response
            .content_type(ContentType::plaintext())
            .body(status.canonical_reason().unwrap_or("Error"))
    }
}
