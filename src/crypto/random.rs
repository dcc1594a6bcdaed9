/*!
 * Secure Random Bytes
 * OS-backed random generation with a bounded request size
 */

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::limits::MAX_RANDOM_BYTES;

/// Random generation failures.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum RandomError {
    /// Requested count outside 1..=[`MAX_RANDOM_BYTES`]
    #[error("invalid byte count (1-4096)")]
    InvalidCount,

    /// The OS entropy source failed
    #[error("random generator error")]
    Generator,
}

/// Fill a fresh buffer with `count` cryptographically secure random bytes.
///
/// `count` must be between 1 and [`MAX_RANDOM_BYTES`]; the buffer is drawn
/// from the OS generator in a single call.
pub fn random_bytes(count: usize) -> Result<Vec<u8>, RandomError> {
    if count == 0 || count > MAX_RANDOM_BYTES {
        return Err(RandomError::InvalidCount);
    }

    let mut buf = vec![0u8; count];
    getrandom::getrandom(&mut buf).map_err(|_| RandomError::Generator)?;
    Ok(buf)
}
