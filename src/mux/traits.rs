/*!
 * Pollable Trait
 * Descriptor resolution for heterogeneous socket-like handles
 */

use crate::core::types::Fd;
use std::net::{TcpListener, TcpStream, UdpSocket};
use std::os::unix::io::AsRawFd;
use std::os::unix::net::{UnixDatagram, UnixListener, UnixStream};

/// Resolves a socket-like handle to its OS file descriptor.
///
/// Returning `None` means the handle has no descriptor (closed, detached,
/// or simply not backed by one). Such handles are excluded from monitoring
/// rather than reported as errors, so one dead handle never poisons a
/// whole query.
pub trait Pollable {
    /// The OS descriptor currently backing this handle, if any.
    fn descriptor(&self) -> Option<Fd>;
}

macro_rules! impl_pollable_for_std {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Pollable for $ty {
                #[inline]
                fn descriptor(&self) -> Option<Fd> {
                    Some(self.as_raw_fd())
                }
            }
        )*
    };
}

impl_pollable_for_std!(
    TcpStream,
    TcpListener,
    UdpSocket,
    UnixStream,
    UnixListener,
    UnixDatagram,
);

impl<P: Pollable + ?Sized> Pollable for &P {
    #[inline]
    fn descriptor(&self) -> Option<Fd> {
        (**self).descriptor()
    }
}
