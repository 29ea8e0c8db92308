use thiserror::Error;

/// Reasons a `/api/validate` request cannot be turned into a validation call
///
/// The `Display` text is what the client receives as the single error of
/// the failure-shaped result.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("Request body must be valid JSON: {0}")]
    InvalidJson(String),

    #[error("Request body must be a JSON object.")]
    NotAnObject,

    #[error("Field '{field}' must be a string.")]
    NotAString { field: &'static str },

    #[error("Request body exceeds {limit} bytes.")]
    BodyTooLarge { limit: usize },

    #[error("Invalid Content-Length header: '{0}'.")]
    InvalidContentLength(String),

    #[error("Request body requires a Content-Length header.")]
    MissingContentLength,

    #[error("Unsupported Transfer-Encoding: '{0}'.")]
    UnsupportedTransferEncoding(String),
}
