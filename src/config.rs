//! Application configuration, read from the environment (and `.env`).
//!
//! | Variable                | Default                  |
//! |-------------------------|--------------------------|
//! | `DATABASE_PATH`         | `school_finder.sqlite3`  |
//! | `SCHEMA_PATH`           | `sql/schema.sql`         |
//! | `BIND_ADDR`             | `127.0.0.1:3000`         |
//! | `MAX_WORKERS`           | `8`                      |
//! | `PAGE_SIZE`             | `10`                     |
//! | `MAX_IMAGE_BYTES`       | `5242880`                |
//! | `CLOUDINARY_CLOUD_NAME` | unset                    |
//! | `CLOUDINARY_API_KEY`    | unset                    |
//! | `CLOUDINARY_API_SECRET` | unset                    |
//! | `CLOUDINARY_FOLDER`     | `schoolImages`           |
//! | `SCHOOL_FINDER_URL`     | `http://127.0.0.1:3000`  |
//!
//! The three Cloudinary credentials are all-or-nothing.

use std::net::SocketAddr;
use std::str::FromStr;
use thiserror::Error;

use crate::domain::DEFAULT_MAX_IMAGE_BYTES;
use crate::media::CloudinaryConfig;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database_path: String,
    pub schema_path: String,
    pub bind_addr: SocketAddr,
    pub max_workers: usize,
    pub page_size: u32,
    pub max_image_bytes: usize,
    /// `None` means images are kept inline (development only).
    pub cloudinary: Option<CloudinaryConfig>,
    /// Where `browse` finds the server.
    pub server_url: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env file is fine.
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let page_size: u32 = parse(&lookup, "PAGE_SIZE", 10)?;
        if page_size == 0 {
            return Err(ConfigError::InvalidValue {
                key: "PAGE_SIZE".into(),
                message: "must be at least 1".into(),
            });
        }

        Ok(Self {
            database_path: get("DATABASE_PATH", "school_finder.sqlite3"),
            schema_path: get("SCHEMA_PATH", "sql/schema.sql"),
            bind_addr: parse(&lookup, "BIND_ADDR", SocketAddr::from(([127, 0, 0, 1], 3000)))?,
            max_workers: parse(&lookup, "MAX_WORKERS", 8)?,
            page_size,
            max_image_bytes: parse(&lookup, "MAX_IMAGE_BYTES", DEFAULT_MAX_IMAGE_BYTES)?,
            cloudinary: cloudinary(&lookup)?,
            server_url: get("SCHOOL_FINDER_URL", "http://127.0.0.1:3000"),
        })
    }
}

fn parse<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        }),
    }
}

fn cloudinary<F>(lookup: &F) -> Result<Option<CloudinaryConfig>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let keys = [
        "CLOUDINARY_CLOUD_NAME",
        "CLOUDINARY_API_KEY",
        "CLOUDINARY_API_SECRET",
    ];
    let values: Vec<Option<String>> = keys
        .iter()
        .map(|&k| lookup(k).filter(|v| !v.trim().is_empty()))
        .collect();

    if values.iter().all(Option::is_none) {
        return Ok(None);
    }
    if let Some(missing) = keys.iter().zip(&values).find(|(_, v)| v.is_none()) {
        return Err(ConfigError::MissingEnvVar(missing.0.to_string()));
    }

    let mut values = values.into_iter().flatten();
    Ok(Some(CloudinaryConfig {
        cloud_name: values.next().unwrap_or_default(),
        api_key: values.next().unwrap_or_default(),
        api_secret: values.next().unwrap_or_default(),
        folder: lookup("CLOUDINARY_FOLDER").unwrap_or_else(|| "schoolImages".to_string()),
    }))
}
