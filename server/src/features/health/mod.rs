use axum::{Router, http::StatusCode, response::IntoResponse, routing::get};

#[utoipa::path(
    get,
    path = "/api/healthz",
    responses(
        (status = 200, description = "Service is up", body = String, content_type = "text/plain")
    ),
    tag = "health"
)]
pub async fn healthz() -> impl IntoResponse { (StatusCode::OK, "OK") }

pub fn routes() -> Router { Router::new().route("/api/healthz", get(healthz)) }
