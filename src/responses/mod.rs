pub mod html;
pub mod json;

pub use crate::errors::ResultResp;

pub use html::{empty_response, html_response, redirect};
pub use json::{json_error_response, json_response};
