use axum::{body::Bytes, extract::State, http::StatusCode, response::Response};
use common_errors::{AppError, decode_json, json_response};
use database_traits::dao::GenericDao;
use tracing::instrument;
use user_command_handlers::CreateUserHandler;
use user_commands::CreateUserCommand;
use user_errors::UserError;
use user_models::User;

pub const ERROR_CREATING_USER: &str = "Error creating user";
pub const ERROR_MARSHALLING_RESPONSE: &str = "Error marshalling response";

#[derive(Clone)]
pub struct UserServices {
    pub create_user: CreateUserHandler,
}

impl UserServices {
    pub fn new<D>(user_dao: D) -> Self
    where
        D: GenericDao<
                Model = User,
                CreateRequest = CreateUserCommand,
                Error = UserError,
            > + Send
            + Sync
            + 'static,
    {
        Self {
            create_user: CreateUserHandler::new(user_dao),
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUserCommand,
    responses(
        (status = 201, description = "User created successfully", body = user_responses::UserResponse),
        (status = 500, description = "Invalid JSON or the user could not be stored", body = common_errors::ResponseEnvelope)
    ),
    tag = "users"
)]
#[instrument(skip_all)]
pub async fn create_user(
    State(services): State<UserServices>, body: Bytes,
) -> Result<Response, AppError> {
    let command: CreateUserCommand = decode_json(&body)?;

    let user = services.create_user.execute(command).await.map_err(|err| {
        tracing::error!(error = %err, "Error creating user");
        AppError::internal_server_error(ERROR_CREATING_USER)
    })?;

    tracing::info!("User created: {}", user.id);

    json_response(StatusCode::CREATED, &user).map_err(|err| {
        tracing::error!(error = %err, "Error marshalling user");
        AppError::internal_server_error(ERROR_MARSHALLING_RESPONSE)
    })
}
