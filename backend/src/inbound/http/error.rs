//! Domain [`Error`] as an Actix response.
//!
//! Client errors are returned as-is. Internal errors are logged here with
//! their full message and replaced by a generic body that keeps only the
//! trace id.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::error;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

const REDACTED_MESSAGE: &str = "Internal server error";

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self.code() {
            ErrorCode::InvalidRequest | ErrorCode::Conflict => StatusCode::BAD_REQUEST,
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::Forbidden => StatusCode::FORBIDDEN,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self.code() {
            ErrorCode::InternalError => {
                error!(
                    message = self.message(),
                    details = ?self.details(),
                    trace_id = ?self.trace_id(),
                    "request failed"
                );
                let redacted = Error::internal(REDACTED_MESSAGE);
                match self.trace_id() {
                    Some(id) => redacted.with_trace_id(id),
                    None => redacted,
                }
            }
            _ => self.clone(),
        };

        let mut response = HttpResponse::build(self.status_code());
        if let Some(id) = body.trace_id() {
            response.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        response.json(body)
    }
}
