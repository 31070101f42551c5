use std::{
    path::Path,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

use axum::{
    Router,
    extract::{Request, State},
    http::{StatusCode, header},
    middleware::{self, Next},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use tower_http::services::ServeDir;

/// Number of requests served under `/app`, shared by every clone.
#[derive(Debug, Clone, Default)]
pub struct HitCounter {
    hits: Arc<AtomicU64>,
}

impl HitCounter {
    pub fn new() -> Self { Self::default() }

    /// Returns the count after this hit.
    pub fn increment(&self) -> u64 { self.hits.fetch_add(1, Ordering::SeqCst) + 1 }

    pub fn hits(&self) -> u64 { self.hits.load(Ordering::SeqCst) }

    pub fn reset(&self) { self.hits.store(0, Ordering::SeqCst) }
}

/// Counts the request before handing it on; a failed file lookup still
/// counts.
pub async fn track_hits(
    State(counter): State<HitCounter>, request: Request, next: Next,
) -> Response {
    counter.increment();
    next.run(request).await
}

#[utoipa::path(
    get,
    path = "/admin/metrics",
    responses(
        (status = 200, description = "Visit count page", body = String, content_type = "text/html")
    ),
    tag = "admin"
)]
pub async fn metrics(State(counter): State<HitCounter>) -> Html<String> {
    Html(format!(
        "<html><body><h1>Welcome, Chirpy Admin</h1><p>Chirpy has been visited {} times!</p></body></html>",
        counter.hits()
    ))
}

#[utoipa::path(
    post,
    path = "/admin/reset",
    responses(
        (status = 200, description = "Visit count reset to zero")
    ),
    tag = "admin"
)]
pub async fn reset(State(counter): State<HitCounter>) -> impl IntoResponse {
    counter.reset();
    tracing::info!("Hit counter reset");

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
    )
}

pub fn routes() -> Router<HitCounter> {
    Router::new()
        .route("/admin/metrics", get(metrics))
        .route("/admin/reset", post(reset))
}

/// Sends a bare `/app` to `/app/` before it reaches the counter, the way a
/// subtree route answers a request for its root without the slash.
pub async fn redirect_bare_root(request: Request, next: Next) -> Response {
    if request.uri().path() != "/app" {
        return next.run(request).await;
    }

    let location = match request.uri().query() {
        Some(query) => format!("/app/?{query}"),
        None => "/app/".to_string(),
    };
    (StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)])
        .into_response()
}

/// Serves `root` under `/app/`, counting every request on the way in.
pub fn file_server(root: impl AsRef<Path>, counter: HitCounter) -> Router {
    Router::new()
        .nest_service("/app", ServeDir::new(root))
        .route_layer(middleware::from_fn_with_state(counter, track_hits))
        .route_layer(middleware::from_fn(redirect_bare_root))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{Body, to_bytes},
        http::Request,
    };
    use tower::ServiceExt;

    use super::*;

    const ASSETS: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/assets");

    fn app(counter: HitCounter) -> Router {
        routes()
            .with_state(counter.clone())
            .merge(file_server(ASSETS, counter))
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_string(response: Response) -> String {
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(body.to_vec()).unwrap()
    }

    #[test]
    fn test_hit_counter_shared_between_clones() {
        let counter = HitCounter::new();
        let clone = counter.clone();

        assert_eq!(clone.increment(), 1);
        assert_eq!(counter.increment(), 2);
        assert_eq!(clone.hits(), 2);

        counter.reset();
        assert_eq!(clone.hits(), 0);
    }

    #[tokio::test]
    async fn test_file_server_counts_hits() {
        let counter = HitCounter::new();
        let app = app(counter.clone());

        let response = app
            .clone()
            .oneshot(get_request("/app/index.html"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_string(response).await.contains("Welcome to Chirpy"));

        let response = app.oneshot(get_request("/app/missing.txt")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        assert_eq!(counter.hits(), 2);
    }

    #[tokio::test]
    async fn test_bare_app_redirects_without_counting() {
        let counter = HitCounter::new();
        let app = app(counter.clone());

        let response = app.clone().oneshot(get_request("/app")).await.unwrap();
        assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/app/");

        let response =
            app.clone().oneshot(get_request("/app?v=2")).await.unwrap();
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/app/?v=2"
        );
        assert_eq!(counter.hits(), 0);

        let response = app.oneshot(get_request("/app/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_string(response).await.contains("Welcome to Chirpy"));
        assert_eq!(counter.hits(), 1);
    }

    #[tokio::test]
    async fn test_other_routes_do_not_count() {
        let counter = HitCounter::new();
        let app = app(counter.clone());

        app.clone()
            .oneshot(get_request("/admin/metrics"))
            .await
            .unwrap();
        let response = app.oneshot(get_request("/nowhere")).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(counter.hits(), 0);
    }

    #[tokio::test]
    async fn test_metrics_renders_count() {
        let counter = HitCounter::new();
        for _ in 0..3 {
            counter.increment();
        }

        let response = app(counter)
            .oneshot(get_request("/admin/metrics"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/html; charset=utf-8"
        );
        assert_eq!(
            body_string(response).await,
            "<html><body><h1>Welcome, Chirpy Admin</h1><p>Chirpy has been visited 3 times!</p></body></html>"
        );
    }

    #[tokio::test]
    async fn test_reset_zeroes_counter() {
        let counter = HitCounter::new();
        for _ in 0..7 {
            counter.increment();
        }

        let response = app(counter.clone())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/admin/reset")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_string(response).await.is_empty());
        assert_eq!(counter.hits(), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_hits_are_not_lost() {
        let counter = HitCounter::new();
        let app = app(counter.clone());

        let mut handles = Vec::new();
        for _ in 0..64 {
            let app = app.clone();
            handles.push(tokio::spawn(async move {
                app.oneshot(get_request("/app/index.html"))
                    .await
                    .unwrap()
                    .status()
            }));
        }
        for handle in handles {
            assert_eq!(handle.await.unwrap(), StatusCode::OK);
        }

        assert_eq!(counter.hits(), 64);
    }
}
