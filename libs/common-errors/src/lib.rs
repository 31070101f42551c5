use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

mod body;
pub mod envelope;

pub use body::{DecodeError, decode_json, deserialize_string_field};
pub use envelope::{ResponseEnvelope, json_response, write_error, write_success};

pub const INVALID_JSON: &str = "Invalid JSON";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    BadRequest { message: String },
    InternalServerError { message: String },
}

impl AppError {
    pub fn bad_request(message: &str) -> Self {
        Self::BadRequest {
            message: message.to_string(),
        }
    }

    pub fn internal_server_error(message: &str) -> Self {
        Self::InternalServerError {
            message: message.to_string(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::InternalServerError { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::BadRequest { message }
            | Self::InternalServerError { message } => message,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        write_error(self.status_code(), self.message())
    }
}

// Malformed client payloads are reported as a server error, not a 400.
impl From<DecodeError> for AppError {
    fn from(err: DecodeError) -> Self {
        tracing::debug!(error = %err, "Rejecting request body");
        Self::internal_server_error(INVALID_JSON)
    }
}
