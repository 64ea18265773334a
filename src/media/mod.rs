mod cloudinary;
mod data_uri;
mod inline;

pub use cloudinary::{CloudinaryConfig, CloudinaryHost};
pub use data_uri::DataUri;
pub use inline::InlineHost;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("not a data URI")]
    NotDataUri,
    #[error("data URI is not base64 encoded")]
    NotBase64,
    #[error("invalid content type: {0}")]
    InvalidMime(String),
    #[error("base64 decode failed: {0}")]
    Decode(String),
    #[error("upload request failed: {0}")]
    Network(String),
    #[error("media host rejected upload: {0}")]
    Rejected(String),
}

/// Somewhere school images can be stored and served from.
pub trait ImageHost: Send + Sync {
    /// Store the image and return the public URL it is served from.
    fn upload(&self, image: &DataUri) -> Result<String, MediaError>;
}
