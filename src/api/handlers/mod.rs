pub mod actors;
pub mod greeting;
pub mod health;
pub mod movies;

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;

use crate::error::AppError;

/// A body that is not the expected JSON object is unprocessable, same as a
/// row the store refuses. A body cut off by the size limit stays 413.
pub(crate) fn reject_body(e: JsonRejection) -> AppError {
    tracing::debug!(error = %e, "request body rejected");
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::PayloadTooLarge;
    }
    AppError::Unprocessable
}
