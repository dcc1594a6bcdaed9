/*!
 * Compatibility Split Query
 * Legacy select-shaped readiness over two handle lists
 */

use libc::{POLLIN, POLLOUT};
use log::debug;

use super::registry::PollSet;
use super::traits::Pollable;
use super::types::{timeout_to_ms, Interest, PollError};

/// Query readiness for two independent handle lists, select-style.
///
/// The readable list is folded into the working set first (read interest),
/// then the writable list (write interest); a descriptor seen in both lists
/// keeps a single entry with both interests merged, unlike [`poll`]. An
/// empty combined working set returns two empty lists without touching the
/// OS.
///
/// Outcomes are lenient, mirroring legacy select semantics: only an OS
/// interruption surfaces as `Err(PollError::Interrupted)`. Every other
/// non-success, including the timeout elapsing with nothing ready,
/// degrades to two empty lists. A handle that is both readable and
/// writable appears in both outputs.
///
/// [`poll`]: super::poll::poll
pub fn select<'a, S: Pollable>(
    readable: &'a [S],
    writable: &'a [S],
    timeout_secs: f64,
) -> Result<(Vec<&'a S>, Vec<&'a S>), PollError> {
    let mut set = PollSet::new(readable.len() + writable.len());
    for sock in readable {
        set.push_merged(sock, Interest::READ);
    }
    for sock in writable {
        set.push_merged(sock, Interest::WRITE);
    }

    if set.is_empty() {
        return Ok((Vec::new(), Vec::new()));
    }

    let ready = match set.wait(timeout_to_ms(timeout_secs)) {
        Ok(n) => n,
        Err(PollError::Interrupted) => return Err(PollError::Interrupted),
        // Legacy select collapses other failures into "nothing happened".
        Err(_) => return Ok((Vec::new(), Vec::new())),
    };
    if ready == 0 {
        return Ok((Vec::new(), Vec::new()));
    }

    let mut ready_read = Vec::new();
    let mut ready_write = Vec::new();
    for entry in set.entries() {
        if entry.revents & POLLIN != 0 {
            if let Some(sock) = set.handle(entry.fd) {
                ready_read.push(sock);
            }
        }
        if entry.revents & POLLOUT != 0 {
            if let Some(sock) = set.handle(entry.fd) {
                ready_write.push(sock);
            }
        }
    }
    debug!(
        "select: {} readable, {} writable of {} monitored",
        ready_read.len(),
        ready_write.len(),
        set.entries().len()
    );
    Ok((ready_read, ready_write))
}
