use astra::Response;
// errors.rs
use thiserror::Error;

use crate::domain::ValidationErrors;
use crate::media::MediaError;

/// Errors originating from either the server logic
/// (routing, missing resources, etc.) or downstream layers (DB, media host).
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Not Found")]
    NotFound,
    #[error("School not found")]
    SchoolNotFound(i64),
    #[error("Bad Request: {0}")]
    BadRequest(String),
    #[error("Request body too large")]
    PayloadTooLarge,
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),
    #[error("Database Error: {0}")]
    DbError(String),
    #[error("Upload Error: {0}")]
    UploadError(#[from] MediaError),
    #[error("Internal Server Error")]
    InternalError,
}

impl ServerError {
    pub fn status(&self) -> u16 {
        match self {
            ServerError::NotFound | ServerError::SchoolNotFound(_) => 404,
            ServerError::BadRequest(_) | ServerError::Validation(_) => 400,
            ServerError::PayloadTooLarge => 413,
            ServerError::UploadError(_) => 502,
            ServerError::DbError(_) | ServerError::InternalError => 500,
        }
    }
}

impl From<rusqlite::Error> for ServerError {
    fn from(e: rusqlite::Error) -> Self {
        ServerError::DbError(e.to_string())
    }
}

// Type alias commonly used by route handlers.
pub type ResultResp = Result<Response, ServerError>;
