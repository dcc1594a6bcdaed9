/*!
 * Descriptor Registry
 * Per-query pollfd working set and descriptor-to-handle translation
 */

use ahash::AHashMap;
use libc::{nfds_t, pollfd, POLLIN, POLLOUT};
use log::warn;

use crate::core::limits::MAX_POLL_FDS;
use crate::core::types::Fd;

use super::traits::Pollable;
use super::types::{Interest, PollError, ReadyEvent};

/// Working set for one readiness query.
///
/// Owns the native `pollfd` array handed to poll(2), the descriptor-to-
/// handle registry used to translate raw results back to caller-level
/// handles, and the count of entries dropped by the capacity bound.
/// Created fresh for every query and discarded when the query returns;
/// nothing here outlives a single call.
pub(crate) struct PollSet<'a, S> {
    fds: Vec<pollfd>,
    handles: AHashMap<Fd, &'a S>,
    slots: AHashMap<Fd, usize>,
    dropped: usize,
}

impl<'a, S: Pollable> PollSet<'a, S> {
    pub(crate) fn new(requested: usize) -> Self {
        let cap = requested.min(MAX_POLL_FDS);
        Self {
            fds: Vec::with_capacity(cap),
            handles: AHashMap::with_capacity(cap),
            slots: AHashMap::new(),
            dropped: 0,
        }
    }

    /// Resolve `sock` and append its own entry to the working set.
    ///
    /// Duplicate descriptors are NOT merged here: each accepted request
    /// becomes a separate `pollfd` with its own interest mask. The registry
    /// keeps the last handle seen per descriptor, so result translation for
    /// a shared descriptor reports the handle registered most recently.
    ///
    /// The registry is updated before the capacity check, so a handle can
    /// be registered even when its entry is dropped from monitoring.
    pub(crate) fn push(&mut self, sock: &'a S, interest: Interest) {
        let Some(fd) = sock.descriptor() else {
            return;
        };
        self.handles.insert(fd, sock);

        if self.fds.len() >= MAX_POLL_FDS {
            self.dropped += 1;
            return;
        }
        self.fds.push(pollfd {
            fd,
            events: interest.events(),
            revents: 0,
        });
    }

    /// Resolve `sock` and fold it into the working set, merging interest
    /// into an existing entry when the descriptor is already monitored.
    ///
    /// A merge never grows the set, so it is allowed even once the capacity
    /// bound is reached; only appends of new descriptors are dropped.
    pub(crate) fn push_merged(&mut self, sock: &'a S, interest: Interest) {
        let Some(fd) = sock.descriptor() else {
            return;
        };
        self.handles.insert(fd, sock);

        if let Some(&slot) = self.slots.get(&fd) {
            self.fds[slot].events |= interest.events();
            return;
        }
        if self.fds.len() >= MAX_POLL_FDS {
            self.dropped += 1;
            return;
        }
        self.slots.insert(fd, self.fds.len());
        self.fds.push(pollfd {
            fd,
            events: interest.events(),
            revents: 0,
        });
    }

    /// Issue exactly one poll(2) over the working set.
    ///
    /// `timeout_ms` follows the syscall's convention: zero returns
    /// immediately, negative blocks until readiness. Returns the number of
    /// entries with a non-empty result mask; zero means the timeout elapsed
    /// with nothing ready.
    pub(crate) fn wait(&mut self, timeout_ms: i32) -> Result<usize, PollError> {
        if self.dropped > 0 {
            warn!(
                "readiness query truncated: {} request(s) beyond capacity {} dropped from monitoring",
                self.dropped, MAX_POLL_FDS
            );
        }

        // SAFETY: the pointer and length describe the live, exclusively
        // borrowed `fds` allocation, and poll(2) only writes the `revents`
        // field of each record.
        let rc = unsafe {
            libc::poll(
                self.fds.as_mut_ptr(),
                self.fds.len() as nfds_t,
                timeout_ms,
            )
        };
        if rc < 0 {
            let errno = std::io::Error::last_os_error().raw_os_error().unwrap_or(0);
            return Err(PollError::from_errno(errno));
        }
        Ok(rc as usize)
    }

    /// Translate the raw result masks back into caller-level events.
    ///
    /// One event per entry whose mask carries read or write readiness, in
    /// entry order (which follows request order). Error/hangup-only results
    /// produce no event.
    pub(crate) fn ready_events(&self) -> Vec<ReadyEvent<'a, S>> {
        let mut events = Vec::new();
        for entry in &self.fds {
            let read = entry.revents & POLLIN != 0;
            let write = entry.revents & POLLOUT != 0;
            if !(read || write) {
                continue;
            }
            if let Some(&sock) = self.handles.get(&entry.fd) {
                events.push(ReadyEvent { sock, read, write });
            }
        }
        events
    }

    /// The handle most recently registered for `fd` during this query.
    pub(crate) fn handle(&self, fd: Fd) -> Option<&'a S> {
        self.handles.get(&fd).copied()
    }

    pub(crate) fn entries(&self) -> &[pollfd] {
        &self.fds
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.fds.is_empty()
    }
}
