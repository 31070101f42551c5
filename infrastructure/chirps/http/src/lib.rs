use axum::{body::Bytes, extract::State, response::Response};
use chirp_command_handlers::ValidateChirpHandler;
use chirp_commands::ValidateChirpCommand;
use common_errors::{AppError, write_success};
use tracing::instrument;

#[derive(Clone, Default)]
pub struct ChirpServices {
    pub validate_chirp: ValidateChirpHandler,
}

impl ChirpServices {
    pub fn new(validate_chirp: ValidateChirpHandler) -> Self {
        Self { validate_chirp }
    }
}

#[utoipa::path(
    post,
    path = "/api/validate_chirp",
    request_body = ValidateChirpCommand,
    responses(
        (status = 200, description = "Chirp accepted, blocked words masked", body = common_errors::ResponseEnvelope),
        (status = 400, description = "Chirp is too long", body = common_errors::ResponseEnvelope),
        (status = 500, description = "Invalid JSON", body = common_errors::ResponseEnvelope)
    ),
    tag = "chirps"
)]
#[instrument(skip_all)]
pub async fn validate_chirp(
    State(services): State<ChirpServices>, body: Bytes,
) -> Result<Response, AppError> {
    let cleaned = services.validate_chirp.validate(&body).map_err(|err| {
        tracing::debug!(error = %err, "Chirp rejected");
        AppError::from(err)
    })?;

    Ok(write_success(cleaned))
}
