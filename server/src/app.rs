use std::path::Path;

use axum::{
    Json, Router,
    routing::{get, post},
};
use chirp_http::ChirpServices;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use user_http::UserServices;
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;

use crate::features::{
    health,
    metrics::{self, HitCounter},
};

#[derive(Clone)]
pub struct AppState {
    pub users: UserServices,
    pub chirps: ChirpServices,
    pub hits: HitCounter,
}

impl AppState {
    pub fn new(users: UserServices) -> Self {
        Self {
            users,
            chirps: ChirpServices::default(),
            hits: HitCounter::new(),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthz,
        metrics::metrics,
        metrics::reset,
        chirp_http::validate_chirp,
        user_http::create_user
    ),
    components(
        schemas(
            common_errors::ResponseEnvelope,
            chirp_commands::ValidateChirpCommand,
            user_commands::CreateUserCommand,
            user_responses::UserResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "admin", description = "Visit metrics"),
        (name = "chirps", description = "Chirp validation endpoints"),
        (name = "users", description = "User management endpoints")
    ),
    info(
        title = "Chirpy API",
        description = "Chirp validation and user sign-up",
        version = "1.0.0"
    )
)]
pub struct ApiDoc;

pub fn router(state: AppState, filepath_root: impl AsRef<Path>) -> Router {
    let api_routes: Router = Router::new()
        .route("/api/validate_chirp", post(chirp_http::validate_chirp))
        .with_state(state.chirps)
        .route("/api/users", post(user_http::create_user))
        .with_state(state.users);

    let admin_routes: Router = metrics::routes().with_state(state.hits.clone());

    Router::new()
        .merge(health::routes())
        .merge(api_routes)
        .merge(admin_routes)
        .merge(metrics::file_server(filepath_root, state.hits))
        .merge(RapiDoc::new("/api-docs/openapi.json").path("/docs"))
        .route(
            "/api-docs/openapi.json",
            get(|| async { Json(ApiDoc::openapi()) }),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
