/*!
 * Readiness Multiplexer
 * poll(2)-backed readiness queries keyed by caller-level handles
 */

mod registry;

pub mod poll;
pub mod select;
pub mod traits;
pub mod types;

// Re-export public API
pub use poll::poll;
pub use select::select;
pub use traits::Pollable;
pub use types::{Interest, PollError, PollRequest, ReadyEvent};
