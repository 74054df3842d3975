// errors.rs
use thiserror::Error;

use crate::domain::dates::DateError;

/// Errors originating from the inspection store, the photo and document
/// pipelines, or the HTTP front end.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error")]
    InternalError,
}

impl AppError {
    pub fn status_code(&self) -> u16 {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) => 400,
            AppError::NotFound(_) => 404,
            AppError::Storage(_) | AppError::Io(_) | AppError::InternalError => 500,
        }
    }
}

impl From<rusqlite::Error> for AppError {
    fn from(e: rusqlite::Error) -> Self {
        AppError::Storage(e.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Io(e.to_string())
    }
}

impl From<image::ImageError> for AppError {
    fn from(e: image::ImageError) -> Self {
        AppError::Io(format!("image: {e}"))
    }
}

impl From<rust_xlsxwriter::XlsxError> for AppError {
    fn from(e: rust_xlsxwriter::XlsxError) -> Self {
        AppError::Io(format!("spreadsheet: {e}"))
    }
}

impl From<DateError> for AppError {
    fn from(e: DateError) -> Self {
        AppError::Validation(e.to_string())
    }
}
