/*!
 * System Limits
 * Centralized capacity bounds shared across the crate
 */

/// Maximum number of descriptors one readiness query will monitor.
/// Requests beyond this bound are dropped from monitoring, never failed;
/// callers with larger sets are expected to split them across queries.
pub const MAX_POLL_FDS: usize = 4096;

/// Largest single `random_bytes` request.
/// Bounds the transient buffer handed to the OS generator.
pub const MAX_RANDOM_BYTES: usize = 4096;
