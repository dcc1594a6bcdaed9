/*!
 * sockmux
 * Readiness multiplexing for socket-like handles over poll(2), plus
 * delegated hashing and secure-random primitives
 */

pub mod core;
pub mod crypto;
pub mod mux;

// Re-exports
pub use crate::core::limits::{MAX_POLL_FDS, MAX_RANDOM_BYTES};
pub use crypto::{hmac_sha256, random_bytes, sha256, RandomError};
pub use mux::{poll, select, Interest, PollError, PollRequest, Pollable, ReadyEvent};
