use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use mime::Mime;

use crate::media::MediaError;

/// A decoded `data:<mime>;base64,<payload>` URI.
#[derive(Debug, Clone)]
pub struct DataUri {
    mime: Mime,
    bytes: Vec<u8>,
    raw: String,
}

impl DataUri {
    pub fn parse(raw: &str) -> Result<Self, MediaError> {
        let rest = raw.trim().strip_prefix("data:").ok_or(MediaError::NotDataUri)?;
        let (meta, payload) = rest.split_once(',').ok_or(MediaError::NotDataUri)?;
        let mime_part = meta.strip_suffix(";base64").ok_or(MediaError::NotBase64)?;

        let mime: Mime = mime_part
            .parse()
            .map_err(|_| MediaError::InvalidMime(mime_part.to_string()))?;
        let bytes = STANDARD
            .decode(payload.trim())
            .map_err(|e| MediaError::Decode(e.to_string()))?;

        Ok(Self {
            mime,
            bytes,
            raw: raw.trim().to_string(),
        })
    }

    /// Build the URI text for `bytes` of type `mime`.
    pub fn encode(mime: &Mime, bytes: &[u8]) -> String {
        format!("data:{};base64,{}", mime.essence_str(), STANDARD.encode(bytes))
    }

    pub fn mime(&self) -> &Mime {
        &self.mime
    }

    pub fn is_image(&self) -> bool {
        self.mime.type_() == mime::IMAGE
    }

    /// Decoded payload size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}
