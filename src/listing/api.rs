use thiserror::Error;

use crate::domain::{NewSchool, School};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("school {0} not found")]
    NotFound(i64),
    #[error("rejected: {0}")]
    Validation(String),
    /// The server answered but the page could not be decoded.
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// The listing backend as the synchronizer sees it.
pub trait SchoolApi {
    /// One page, oldest-first within the page.
    fn fetch_page(&self, page: u32, page_size: u32) -> Result<Vec<School>, ApiError>;

    fn delete_school(&self, id: i64) -> Result<(), ApiError>;

    fn create_school(&self, school: &NewSchool) -> Result<(), ApiError>;
}
