use std::sync::Arc;

use chirp_commands::ValidateChirpCommand;
use chirp_errors::ChirpError;
use chirp_models::{BlockList, MAX_CHIRP_LENGTH};
use common_errors::decode_json;
use tracing::instrument;

/// Decodes, length-checks and filters chirp bodies.
#[derive(Debug, Clone)]
pub struct ValidateChirpHandler {
    block_list: Arc<BlockList>,
    max_length: usize,
}

impl ValidateChirpHandler {
    pub fn new(block_list: BlockList, max_length: usize) -> Self {
        Self {
            block_list: Arc::new(block_list),
            max_length,
        }
    }

    pub fn max_length(&self) -> usize { self.max_length }

    /// Runs the whole pipeline over a raw request body and returns the
    /// cleaned chirp.
    #[instrument(skip_all)]
    pub fn validate(&self, raw_body: &[u8]) -> Result<String, ChirpError> {
        let command: ValidateChirpCommand = decode_json(raw_body)?;
        self.execute(command)
    }

    /// Length is measured in bytes, not characters.
    pub fn execute(
        &self, command: ValidateChirpCommand,
    ) -> Result<String, ChirpError> {
        let length = command.body.len();
        if length > self.max_length {
            return Err(ChirpError::TooLong {
                length,
                limit: self.max_length,
            });
        }

        Ok(self.block_list.filter(&command.body))
    }
}

impl Default for ValidateChirpHandler {
    fn default() -> Self { Self::new(BlockList::default(), MAX_CHIRP_LENGTH) }
}
