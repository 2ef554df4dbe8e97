//! Agent identifier generation.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rand::rngs::OsRng;
use rand::RngCore;
use thiserror::Error;

/// Number of random bytes behind every identifier.
pub const ID_BYTES: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    #[error("Failed to generate agent ID: {0}")]
    RandomSource(String),
}

/// Source of fresh agent identifiers.
pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> Result<String, IdError>;
}

/// Draws [`ID_BYTES`] bytes from the OS CSPRNG and encodes them as URL-safe
/// base64 without padding, so every id fits in a single path segment.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn generate(&self) -> Result<String, IdError> {
        let mut bytes = [0u8; ID_BYTES];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| IdError::RandomSource(e.to_string()))?;
        Ok(URL_SAFE_NO_PAD.encode(bytes))
    }
}
