use common_errors::{AppError, DecodeError};
use thiserror::Error;

pub const CHIRP_TOO_LONG: &str = "Chirp is too long";

#[derive(Debug, Error)]
pub enum ChirpError {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error("Chirp is too long: {length} bytes, limit is {limit}")]
    TooLong { length: usize, limit: usize },
}

impl From<ChirpError> for AppError {
    fn from(err: ChirpError) -> Self {
        match err {
            ChirpError::Decode(decode_err) => decode_err.into(),
            ChirpError::TooLong { .. } => AppError::bad_request(CHIRP_TOO_LONG),
        }
    }
}
