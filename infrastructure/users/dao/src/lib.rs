use async_trait::async_trait;
use database_traits::dao::GenericDao;
use sql_connection::{Row, SqlConnect};
use tracing::instrument;
use user_commands::CreateUserCommand;
use user_errors::UserError;
use user_models::User;
use uuid::Uuid;

const INSERT_USER: &str = "INSERT INTO users (id, created_at, updated_at, email)
     VALUES ($1, NOW(), NOW(), $2)
     RETURNING id, created_at, updated_at, email";

#[derive(Clone)]
pub struct UserDao {
    db: SqlConnect,
}

impl UserDao {
    pub fn new(db: SqlConnect) -> Self { Self { db } }

    fn map_row(&self, row: &Row) -> User {
        User {
            id: row.get(0),
            created_at: row.get(1),
            updated_at: row.get(2),
            email: row.get(3),
        }
    }
}

#[async_trait]
impl GenericDao for UserDao {
    type CreateRequest = CreateUserCommand;
    type Error = UserError;
    type Model = User;

    #[instrument(skip_all)]
    async fn create(
        &self, req: Self::CreateRequest,
    ) -> Result<Self::Model, Self::Error> {
        let client = self.db.get_client().await?;
        let stmt = client.prepare(INSERT_USER).await?;
        let row = client.query_one(&stmt, &[&Uuid::now_v7(), &req.email]).await?;

        Ok(self.map_row(&row))
    }
}
