/*!
 * Unified Readiness Query
 * One-shot poll over a list of (handle, interest) requests
 */

use log::debug;

use super::registry::PollSet;
use super::traits::Pollable;
use super::types::{timeout_to_ms, PollError, PollRequest, ReadyEvent};

/// Query OS-level readiness for every resolvable request entry.
///
/// Each entry is monitored with its own interest mask; duplicate
/// descriptors across entries are scheduled side by side rather than
/// merged, and events on a shared descriptor are attributed to the handle
/// from the last entry that carried it. Handles that resolve to no
/// descriptor are skipped, and entries beyond [`MAX_POLL_FDS`] are dropped
/// from monitoring without failing the query.
///
/// `timeout_secs` is the fractional-second wait for the single underlying
/// poll(2) call: `0.0` returns immediately, negative blocks until
/// readiness. Sub-millisecond fractions truncate.
///
/// Outcomes are three-way: `Ok(events)` with at least one ready handle,
/// `Err(PollError::Timeout)` when the wait elapsed with nothing ready, or
/// an errno-classified [`PollError`] when the syscall itself failed. No
/// retry happens internally; an `Interrupted` result is the caller's to
/// retry.
///
/// [`MAX_POLL_FDS`]: crate::core::limits::MAX_POLL_FDS
pub fn poll<'a, S: Pollable>(
    requests: &[PollRequest<'a, S>],
    timeout_secs: f64,
) -> Result<Vec<ReadyEvent<'a, S>>, PollError> {
    let mut set = PollSet::new(requests.len());
    for request in requests {
        set.push(request.sock, request.interest);
    }

    let ready = set.wait(timeout_to_ms(timeout_secs))?;
    if ready == 0 {
        return Err(PollError::Timeout);
    }

    let events = set.ready_events();
    debug!(
        "poll: {} of {} monitored descriptors ready",
        events.len(),
        set.entries().len()
    );
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Fd;
    use std::io::Write;
    use std::os::unix::io::AsRawFd;
    use std::os::unix::net::UnixStream;

    struct TestSock {
        fd: Option<Fd>,
    }

    impl Pollable for TestSock {
        fn descriptor(&self) -> Option<Fd> {
            self.fd
        }
    }

    #[test]
    fn test_poll_idle_sockets_times_out() {
        let (a, _keep) = UnixStream::pair().unwrap();
        let requests = [PollRequest::new(&a, crate::mux::Interest::READ)];
        assert!(matches!(poll(&requests, 0.0), Err(PollError::Timeout)));
    }

    #[test]
    fn test_poll_empty_request_list_times_out() {
        let requests: [PollRequest<'_, UnixStream>; 0] = [];
        assert!(matches!(poll(&requests, 0.0), Err(PollError::Timeout)));
    }

    #[test]
    fn test_poll_reports_readable() {
        let (a, mut b) = UnixStream::pair().unwrap();
        b.write_all(b"ping").unwrap();

        let requests = [PollRequest::new(&a, crate::mux::Interest::READ)];
        let events = poll(&requests, 0.5).unwrap();

        assert_eq!(events.len(), 1);
        assert!(std::ptr::eq(events[0].sock, &a));
        assert!(events[0].read);
        assert!(!events[0].write);
    }

    #[test]
    fn test_poll_reports_writable() {
        let (a, _b) = UnixStream::pair().unwrap();

        let requests = [PollRequest::new(&a, crate::mux::Interest::WRITE)];
        let events = poll(&requests, 0.5).unwrap();

        assert_eq!(events.len(), 1);
        assert!(events[0].write);
        assert!(!events[0].read);
    }

    #[test]
    fn test_poll_read_interest_not_reported_without_request() {
        // Writable socket polled for read only: nothing surfaces.
        let (a, _b) = UnixStream::pair().unwrap();
        let requests = [PollRequest::new(&a, crate::mux::Interest::READ)];
        assert!(matches!(poll(&requests, 0.0), Err(PollError::Timeout)));
    }

    #[test]
    fn test_poll_attributes_shared_descriptor_to_last_handle() {
        let (a, mut b) = UnixStream::pair().unwrap();
        b.write_all(b"ping").unwrap();

        let fd = a.as_raw_fd();
        let first = TestSock { fd: Some(fd) };
        let second = TestSock { fd: Some(fd) };
        let requests = [
            PollRequest::new(&first, crate::mux::Interest::READ),
            PollRequest::new(&second, crate::mux::Interest::READ),
        ];

        let events = poll(&requests, 0.5).unwrap();
        // Both entries report readiness, and both are attributed to the
        // handle registered last.
        assert_eq!(events.len(), 2);
        for event in &events {
            assert!(std::ptr::eq(event.sock, &second));
        }
    }

    #[test]
    fn test_poll_skips_unresolvable_handles() {
        let (a, mut b) = UnixStream::pair().unwrap();
        b.write_all(b"ping").unwrap();

        let dead = TestSock { fd: None };
        let live = TestSock {
            fd: Some(a.as_raw_fd()),
        };
        let requests = [
            PollRequest::new(&dead, crate::mux::Interest::READ),
            PollRequest::new(&live, crate::mux::Interest::READ),
        ];

        let events = poll(&requests, 0.5).unwrap();
        assert_eq!(events.len(), 1);
        assert!(std::ptr::eq(events[0].sock, &live));
    }
}
