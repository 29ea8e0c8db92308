//! API routes
//!
//! Routing is a pure function from request to response so it can be tested
//! without sockets.

use std::panic::{self, UnwindSafe};

use serde_json::{json, Map, Value};

use crate::server::error::RequestError;
use crate::server::http::{HttpRequest, HttpResponse, MAX_BODY_BYTES};
use crate::validation::{validate_grid_and_palette, ValidationResult};

pub const INTERNAL_ERROR_MESSAGE: &str = "Internal validation error.";

/// Body of `POST /api/validate`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidateRequest {
    pub grid_text: String,
    pub palette: Option<String>,
}

impl ValidateRequest {
    /// Decode a request body
    ///
    /// An empty or `null` body and missing or `null` fields fall back to an
    /// empty grid and no palette.
    pub fn from_body(body: &[u8]) -> Result<Self, RequestError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        let payload: Value = serde_json::from_slice(body)
            .map_err(|e| RequestError::InvalidJson(e.to_string()))?;
        let fields = match &payload {
            Value::Object(fields) => fields,
            Value::Null => return Ok(Self::default()),
            _ => return Err(RequestError::NotAnObject),
        };

        Ok(Self {
            grid_text: string_field(fields, "gridText")?.unwrap_or_default(),
            palette: string_field(fields, "palette")?,
        })
    }
}

fn string_field(
    fields: &Map<String, Value>,
    field: &'static str,
) -> Result<Option<String>, RequestError> {
    match fields.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.clone())),
        Some(_) => Err(RequestError::NotAString { field }),
    }
}

/// Dispatch a request and attach CORS headers
pub fn route(request: &HttpRequest) -> HttpResponse {
    let response = match (request.method.as_str(), request.route_path()) {
        ("OPTIONS", _) => preflight(),
        ("GET" | "HEAD", "/api/health") => health(),
        ("POST", "/api/validate") => validate(request),
        (_, "/api/health" | "/api/validate") => {
            error_response("405 Method Not Allowed", "Method not allowed.")
        }
        _ => error_response("404 Not Found", "Not found."),
    };
    with_cors(response, request.origin.as_deref())
}

/// GET /api/health
fn health() -> HttpResponse {
    HttpResponse::json("200 OK", &json!({ "ok": true, "status": "ready" }))
}

/// POST /api/validate
fn validate(request: &HttpRequest) -> HttpResponse {
    if let Some(e) = &request.framing_error {
        log::warn!("Rejected validation request: {}", e);
        return reject(e);
    }
    if request.content_length > MAX_BODY_BYTES {
        let error = RequestError::BodyTooLarge {
            limit: MAX_BODY_BYTES,
        };
        return HttpResponse::json(
            "413 Payload Too Large",
            &ValidationResult::failure(error.to_string()),
        );
    }

    match ValidateRequest::from_body(&request.body) {
        Ok(input) => HttpResponse::json("200 OK", &run_validation(&input)),
        Err(e) => {
            log::warn!("Rejected validation request: {}", e);
            reject(&e)
        }
    }
}

fn reject(error: &RequestError) -> HttpResponse {
    HttpResponse::json(
        "400 Bad Request",
        &ValidationResult::failure(error.to_string()),
    )
}

/// Run the validation engine, turning a panic into a failure result
pub fn run_validation(input: &ValidateRequest) -> ValidationResult {
    run_validation_with(validate_grid_and_palette, input)
}

/// Run `validate` on the request fields, catching any panic
pub fn run_validation_with<F>(validate: F, input: &ValidateRequest) -> ValidationResult
where
    F: FnOnce(&str, Option<&str>) -> ValidationResult + UnwindSafe,
{
    panic::catch_unwind(|| validate(&input.grid_text, input.palette.as_deref())).unwrap_or_else(
        |_| {
            log::error!("Validation panicked");
            ValidationResult::failure(INTERNAL_ERROR_MESSAGE)
        },
    )
}

fn preflight() -> HttpResponse {
    HttpResponse::empty("204 No Content")
        .with_header("Access-Control-Allow-Methods", "GET, HEAD, POST, OPTIONS")
        .with_header("Access-Control-Allow-Headers", "Content-Type")
        .with_header("Access-Control-Max-Age", "600")
}

fn error_response(status: &'static str, message: &str) -> HttpResponse {
    HttpResponse::json(status, &json!({ "ok": false, "error": message }))
}

/// Reflect the caller's origin, or allow any when none was sent
fn with_cors(response: HttpResponse, origin: Option<&str>) -> HttpResponse {
    response
        .with_header("Access-Control-Allow-Origin", origin.unwrap_or("*"))
        .with_header("Vary", "Origin")
}
