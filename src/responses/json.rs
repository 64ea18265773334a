// responses/json.rs
use crate::errors::ServerError;
use crate::responses::ResultResp;
use astra::{Body, Response, ResponseBuilder};
use serde::Serialize;
use serde_json::json;

pub fn json_response<T: Serialize>(status: u16, value: &T) -> ResultResp {
    let body = serde_json::to_string(value).map_err(|_| ServerError::InternalError)?;

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Body::from(body))
        .map_err(|_| ServerError::InternalError)
}

/// `{"error": ...}` with the error's status. Validation failures also
/// carry `"fields": {field: message}`.
pub fn json_error_response(err: ServerError) -> Response {
    let status = err.status();
    let body = match &err {
        ServerError::Validation(errors) => json!({
            "error": "Validation failed",
            "fields": errors.fields(),
        }),
        ServerError::BadRequest(message) => json!({ "error": message }),
        ServerError::DbError(_) | ServerError::InternalError => {
            json!({ "error": "Something went wrong" })
        }
        other => json!({ "error": other.to_string() }),
    };

    if status >= 500 {
        tracing::error!(status, error = %err, "request failed");
    }

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap_or_else(|_| Response::new(Body::from("{\"error\":\"Something went wrong\"}")))
}
