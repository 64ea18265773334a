// src/domain/validation.rs
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use thiserror::Error;

use crate::domain::school::NewSchool;
use crate::media::DataUri;

pub const DEFAULT_MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap());

static DIGITS_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+$").unwrap());

/// Field name -> first message for that field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{}", render(.0))]
pub struct ValidationErrors(BTreeMap<&'static str, String>);

impl ValidationErrors {
    fn add(&mut self, field: &'static str, message: &str) {
        self.0.entry(field).or_insert_with(|| message.to_string());
    }

    #[cfg(test)]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> &BTreeMap<&'static str, String> {
        &self.0
    }
}

fn render(fields: &BTreeMap<&'static str, String>) -> String {
    fields
        .iter()
        .map(|(field, msg)| format!("{field}: {msg}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Check a submitted school. Collects every failing field rather than
/// stopping at the first, and hands back the decoded image on success.
pub fn validate_new_school(
    school: &NewSchool,
    max_image_bytes: usize,
) -> Result<DataUri, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    required(&mut errors, "name", &school.name, "School name is required");
    required(&mut errors, "address", &school.address, "Address is required");
    required(&mut errors, "city", &school.city, "City is required");
    required(&mut errors, "state", &school.state, "State is required");

    let contact = school.contact.trim();
    if contact.is_empty() {
        errors.add("contact", "Contact is required");
    } else if !DIGITS_REGEX.is_match(contact) {
        errors.add("contact", "Contact must be a number");
    }

    let email = school.email_id.trim();
    if email.is_empty() {
        errors.add("email_id", "Email is required");
    } else if !EMAIL_REGEX.is_match(email) {
        errors.add("email_id", "Invalid email");
    }

    let image = if school.image_base64.trim().is_empty() {
        errors.add("image", "Image is required");
        None
    } else {
        match DataUri::parse(&school.image_base64) {
            Ok(uri) if !uri.is_image() => {
                errors.add("image", "File must be an image");
                None
            }
            Ok(uri) if uri.len() > max_image_bytes => {
                errors.add("image", "Image size is too large");
                None
            }
            Ok(uri) => Some(uri),
            Err(_) => {
                errors.add("image", "Image could not be read");
                None
            }
        }
    };

    match image {
        Some(uri) if errors.is_empty() => Ok(uri),
        _ => Err(errors),
    }
}

fn required(errors: &mut ValidationErrors, field: &'static str, value: &str, message: &str) {
    if value.trim().is_empty() {
        errors.add(field, message);
    }
}
