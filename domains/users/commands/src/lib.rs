use common_errors::deserialize_string_field;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CreateUserCommand {
    pub email: String,
}

impl<'de> Deserialize<'de> for CreateUserCommand {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserialize_string_field(deserializer, "email")
            .map(|email| Self { email })
    }
}
