//! Stand-ins for the PostgreSQL user store, for handler and router tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use database_traits::dao::GenericDao;
use user_commands::CreateUserCommand;
use user_errors::UserError;
use user_models::User;
use uuid::Uuid;

/// Keeps users in memory and enforces unique emails like the `users` table.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserDao {
    users: Arc<Mutex<Vec<User>>>,
}

impl InMemoryUserDao {
    pub fn new() -> Self { Self::default() }

    pub fn users(&self) -> Vec<User> {
        self.users.lock().map(|users| users.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl GenericDao for InMemoryUserDao {
    type CreateRequest = CreateUserCommand;
    type Error = UserError;
    type Model = User;

    async fn create(
        &self, req: Self::CreateRequest,
    ) -> Result<Self::Model, Self::Error> {
        let mut users = self
            .users
            .lock()
            .map_err(|e| UserError::InternalError(e.to_string()))?;

        if users.iter().any(|user| user.email == req.email) {
            return Err(UserError::EmailExists);
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::now_v7(),
            created_at: now,
            updated_at: now,
            email: req.email,
        };
        users.push(user.clone());
        Ok(user)
    }
}

/// Fails every call, as if the database were unreachable.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingUserDao;

#[async_trait]
impl GenericDao for FailingUserDao {
    type CreateRequest = CreateUserCommand;
    type Error = UserError;
    type Model = User;

    async fn create(
        &self, _req: Self::CreateRequest,
    ) -> Result<Self::Model, Self::Error> {
        Err(UserError::InternalError(
            "connection refused (test double)".to_string(),
        ))
    }
}
