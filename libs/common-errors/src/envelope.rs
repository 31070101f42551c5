//! The `{cleaned_body, error}` JSON envelope shared by every JSON endpoint.

use axum::{
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ResponseEnvelope {
    pub cleaned_body: String,
    pub error: String,
}

impl ResponseEnvelope {
    pub fn cleaned(body: impl Into<String>) -> Self {
        Self {
            cleaned_body: body.into(),
            error: String::new(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            cleaned_body: String::new(),
            error: message.into(),
        }
    }
}

/// Serializes `payload` and writes it with `status` and an
/// `application/json` content type.
pub fn json_response<T>(
    status: StatusCode, payload: &T,
) -> Result<Response, serde_json::Error>
where
    T: Serialize + ?Sized,
{
    let body = serde_json::to_vec(payload)?;
    let mut response = (status, body).into_response();
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    Ok(response)
}

/// 200 with the cleaned chirp body.
pub fn write_success(body: impl Into<String>) -> Response {
    write_envelope(StatusCode::OK, &ResponseEnvelope::cleaned(body))
}

pub fn write_error(status: StatusCode, message: &str) -> Response {
    write_envelope(status, &ResponseEnvelope::error(message))
}

fn write_envelope(status: StatusCode, envelope: &ResponseEnvelope) -> Response {
    json_response(status, envelope).unwrap_or_else(|err| {
        tracing::error!(error = %err, "Failed to serialize response envelope");
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    })
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;

    use super::*;

    async fn read_envelope(response: Response) -> ResponseEnvelope {
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_write_success() {
        let response = write_success("hello there");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        let envelope = read_envelope(response).await;
        assert_eq!(envelope, ResponseEnvelope::cleaned("hello there"));
        assert!(envelope.error.is_empty());
    }

    #[tokio::test]
    async fn test_write_error() {
        let response = write_error(StatusCode::BAD_REQUEST, "Chirp is too long");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        let envelope = read_envelope(response).await;
        assert_eq!(envelope.error, "Chirp is too long");
        assert!(envelope.cleaned_body.is_empty());
    }

    #[test]
    fn test_envelope_wire_shape() {
        let json = serde_json::to_value(ResponseEnvelope::error("nope")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "cleaned_body": "", "error": "nope" })
        );
    }

    #[tokio::test]
    async fn test_json_response_with_custom_status() {
        let payload = serde_json::json!({ "email": "a@b.com" });
        let response = json_response(StatusCode::CREATED, &payload).unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["email"], "a@b.com");
    }
}
