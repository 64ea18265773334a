use reqwest::blocking::Client;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::media::{DataUri, ImageHost, MediaError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    /// Folder uploads are filed under, e.g. "schoolImages".
    pub folder: String,
}

/// Signed uploads to Cloudinary's image upload API.
pub struct CloudinaryHost {
    client: Client,
    cfg: CloudinaryConfig,
}

#[derive(Deserialize)]
struct UploadResponse {
    secure_url: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

impl CloudinaryHost {
    pub fn new(cfg: CloudinaryConfig) -> Result<Self, MediaError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| MediaError::Network(e.to_string()))?;

        Ok(Self { client, cfg })
    }

    fn upload_url(&self) -> String {
        format!(
            "https://api.cloudinary.com/v1_1/{}/image/upload",
            self.cfg.cloud_name
        )
    }
}

/// SHA-256 signature over the alphabetically sorted `key=value` pairs,
/// joined with `&`, followed by the API secret. Hex encoded.
pub fn sign_params(params: &[(&str, String)], api_secret: &str) -> String {
    let mut sorted: Vec<&(&str, String)> = params.iter().collect();
    sorted.sort_by(|a, b| a.0.cmp(b.0));

    let to_sign = sorted
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha256::new();
    hasher.update(to_sign.as_bytes());
    hasher.update(api_secret.as_bytes());

    hex::encode(hasher.finalize())
}

impl ImageHost for CloudinaryHost {
    fn upload(&self, image: &DataUri) -> Result<String, MediaError> {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| MediaError::Network(e.to_string()))?
            .as_secs();

        let signed = [
            ("folder", self.cfg.folder.clone()),
            ("timestamp", timestamp.to_string()),
        ];
        let signature = sign_params(&signed, &self.cfg.api_secret);

        let mut form: Vec<(&str, String)> = signed.to_vec();
        form.push(("file", image.as_str().to_string()));
        form.push(("api_key", self.cfg.api_key.clone()));
        form.push(("signature", signature));
        form.push(("signature_algorithm", "sha256".to_string()));

        let response = self
            .client
            .post(self.upload_url())
            .form(&form)
            .send()
            .map_err(|e| MediaError::Network(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .map_err(|e| MediaError::Network(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorResponse>(&text)
                .map(|e| e.error.message)
                .unwrap_or(text);
            return Err(MediaError::Rejected(format!("{status}: {message}")));
        }

        let uploaded: UploadResponse = serde_json::from_str(&text)
            .map_err(|e| MediaError::Rejected(format!("unexpected response: {e}")))?;

        tracing::info!(
            url = %uploaded.secure_url,
            mime = %image.mime(),
            bytes = image.len(),
            "image uploaded"
        );
        Ok(uploaded.secure_url)
    }
}
