use common_errors::deserialize_string_field;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct ValidateChirpCommand {
    pub body: String,
}

impl<'de> Deserialize<'de> for ValidateChirpCommand {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserialize_string_field(deserializer, "body").map(|body| Self { body })
    }
}
