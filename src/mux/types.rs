/*!
 * Multiplexer Types
 * Request, event, and error types for readiness queries
 */

use libc::{c_short, POLLERR, POLLHUP, POLLIN, POLLOUT};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Readiness conditions to monitor for one handle.
///
/// Error and hangup conditions are always monitored implicitly; `Interest`
/// only selects which of read/write readiness gets reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interest {
    pub read: bool,
    pub write: bool,
}

impl Interest {
    /// Read readiness only
    pub const READ: Self = Self {
        read: true,
        write: false,
    };

    /// Write readiness only
    pub const WRITE: Self = Self {
        read: false,
        write: true,
    };

    /// Both read and write readiness
    pub const READ_WRITE: Self = Self {
        read: true,
        write: true,
    };

    /// Native event mask: the requested conditions plus implicit
    /// error/hangup monitoring.
    pub(crate) fn events(self) -> c_short {
        let mut events = POLLERR | POLLHUP;
        if self.read {
            events |= POLLIN;
        }
        if self.write {
            events |= POLLOUT;
        }
        events
    }
}

/// One entry of a unified readiness query.
#[derive(Debug, Clone, Copy)]
pub struct PollRequest<'a, S> {
    pub sock: &'a S,
    pub interest: Interest,
}

impl<'a, S> PollRequest<'a, S> {
    #[inline]
    pub fn new(sock: &'a S, interest: Interest) -> Self {
        Self { sock, interest }
    }
}

/// Readiness reported for one handle.
///
/// Produced only for descriptors whose result mask carried read or write
/// readiness; error/hangup-only results surface no event.
#[derive(Debug, Clone, Copy)]
pub struct ReadyEvent<'a, S> {
    pub sock: &'a S,
    pub read: bool,
    pub write: bool,
}

/// Readiness query failures, classified from the underlying errno.
///
/// `Timeout` is not an OS failure: it reports that the wait elapsed with
/// nothing ready, and is distinct from both success and the errno-derived
/// variants so callers can tell the three outcomes apart.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum PollError {
    /// The kernel rejected the descriptor array (EFAULT)
    #[error("invalid fd provided")]
    InvalidFd,

    /// A signal interrupted the wait before any readiness (EINTR)
    #[error("interrupted")]
    Interrupted,

    /// The descriptor count exceeded the OS per-process bound (EINVAL)
    #[error("too many sockets")]
    TooManySockets,

    /// The kernel could not allocate its internal tables (ENOMEM)
    #[error("no memory")]
    NoMemory,

    /// Any other poll failure
    #[error("unknown error")]
    Unknown,

    /// The timeout elapsed with no descriptor ready
    #[error("timeout")]
    Timeout,
}

impl PollError {
    /// Classify the errno left behind by a failed poll(2).
    pub(crate) fn from_errno(errno: i32) -> Self {
        match errno {
            libc::EFAULT => Self::InvalidFd,
            libc::EINTR => Self::Interrupted,
            libc::EINVAL => Self::TooManySockets,
            libc::ENOMEM => Self::NoMemory,
            _ => Self::Unknown,
        }
    }
}

/// Convert a fractional-seconds timeout to the whole milliseconds poll(2)
/// expects. Sub-millisecond fractions truncate; a negative value blocks
/// until readiness, mirroring the syscall's own convention.
pub(crate) fn timeout_to_ms(timeout_secs: f64) -> i32 {
    (timeout_secs * 1000.0) as i32
}
