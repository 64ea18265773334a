//! Blocking HTTP implementation of [`SchoolApi`] against this crate's own
//! JSON routes.

use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;
use url::Url;

use crate::domain::{NewSchool, School};
use crate::listing::{ApiError, SchoolApi};

#[derive(Debug, Clone)]
pub struct HttpSchoolApi {
    client: Client,
    base: Url,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
    #[serde(default)]
    fields: BTreeMap<String, String>,
}

impl HttpSchoolApi {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let mut base = Url::parse(base_url)
            .map_err(|e| ApiError::Network(format!("invalid server URL {base_url}: {e}")))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self { client, base })
    }

    fn url(&self, path: &str) -> Result<Url, ApiError> {
        self.base
            .join(path)
            .map_err(|e| ApiError::Network(format!("bad request URL: {e}")))
    }
}

/// Best-effort message from an error response.
fn error_message(resp: Response) -> String {
    let status = resp.status();
    match resp.json::<ErrorBody>() {
        Ok(body) if body.fields.is_empty() => body.error,
        Ok(body) => body
            .fields
            .iter()
            .map(|(field, msg)| format!("{field}: {msg}"))
            .collect::<Vec<_>>()
            .join(", "),
        Err(_) => format!("HTTP {status}"),
    }
}

fn send_error(e: reqwest::Error) -> ApiError {
    ApiError::Network(e.to_string())
}

impl SchoolApi for HttpSchoolApi {
    fn fetch_page(&self, page: u32, page_size: u32) -> Result<Vec<School>, ApiError> {
        let mut url = self.url("schools")?;
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("limit", &page_size.to_string());

        let resp = self.client.get(url).send().map_err(send_error)?;
        if !resp.status().is_success() {
            return Err(ApiError::Network(error_message(resp)));
        }

        let text = resp.text().map_err(send_error)?;
        serde_json::from_str(&text).map_err(|e| ApiError::Malformed(e.to_string()))
    }

    fn delete_school(&self, id: i64) -> Result<(), ApiError> {
        let url = self.url(&format!("schools/{id}"))?;
        let resp = self.client.delete(url).send().map_err(send_error)?;

        match resp.status() {
            s if s.is_success() => Ok(()),
            StatusCode::NOT_FOUND => Err(ApiError::NotFound(id)),
            _ => Err(ApiError::Network(error_message(resp))),
        }
    }

    fn create_school(&self, school: &NewSchool) -> Result<(), ApiError> {
        let url = self.url("schools")?;
        let resp = self.client.post(url).json(school).send().map_err(send_error)?;

        match resp.status() {
            s if s.is_success() => Ok(()),
            StatusCode::BAD_REQUEST => Err(ApiError::Validation(error_message(resp))),
            _ => Err(ApiError::Network(error_message(resp))),
        }
    }
}
