use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use mongodb::error::{ErrorKind, WriteFailure};
use thiserror::Error;

use crate::structs::url_request::ErrorResponse;

const DUPLICATE_KEY_CODE: i32 = 11000;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique index rejected the write.
    #[error("duplicate key: {0}")]
    DuplicateKey(String),

    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("alias sequence is unavailable")]
    SequenceUnavailable,
}

impl StoreError {
    /// Maps a driver error from a write, turning unique index violations into
    /// [`StoreError::DuplicateKey`].
    pub fn from_write(err: mongodb::error::Error, key: impl Into<String>) -> Self {
        let duplicate = matches!(
            err.kind.as_ref(),
            ErrorKind::Write(WriteFailure::WriteError(write_error))
                if write_error.code == DUPLICATE_KEY_CODE
        );

        if duplicate {
            StoreError::DuplicateKey(key.into())
        } else {
            StoreError::Database(err)
        }
    }
}

impl ResponseError for StoreError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse::new("internal server error"))
    }
}
