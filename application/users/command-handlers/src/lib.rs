use std::sync::Arc;

use database_traits::dao::GenericDao;
use tracing::instrument;
use user_commands::CreateUserCommand;
use user_errors::UserError;
use user_models::User;
use user_responses::UserResponse;

type UserStore = Arc<
    dyn GenericDao<
            Model = User,
            CreateRequest = CreateUserCommand,
            Error = UserError,
        > + Send
        + Sync,
>;

#[derive(Clone)]
pub struct CreateUserHandler {
    user_dao: UserStore,
}

impl CreateUserHandler {
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
            user_dao: Arc::new(user_dao),
        }
    }

    #[instrument(skip_all)]
    pub async fn execute(
        &self, command: CreateUserCommand,
    ) -> Result<UserResponse, UserError> {
        let saved_user = self.user_dao.create(command).await?;

        Ok(saved_user.into())
    }
}
