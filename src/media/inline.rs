use crate::media::{DataUri, ImageHost, MediaError};

/// Keeps the data URI itself as the image URL.
/// Used in development when no media host is configured.
#[derive(Debug, Default, Clone)]
pub struct InlineHost;

impl ImageHost for InlineHost {
    fn upload(&self, image: &DataUri) -> Result<String, MediaError> {
        Ok(image.as_str().to_string())
    }
}
