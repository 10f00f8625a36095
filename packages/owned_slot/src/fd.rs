use std::os::fd::RawFd;

use crate::ResourceKind;

/// The raw file descriptor kind: slots of this kind own a [`RawFd`] and
/// close it at scope exit.
///
/// Only available on Unix hosts; on other platforms the kind does not exist,
/// so code using it fails to compile rather than misbehaving at runtime.
///
/// A negative descriptor is treated as the C "never opened / already closed"
/// sentinel and is not passed to `close()`. An empty slot is the preferred
/// way to express "no descriptor", but descriptors arriving from C APIs that
/// report failure as `-1` can be stored as-is without a prior check.
///
/// # Examples
///
/// ```
/// use owned_slot::{FdKind, OwnedSlot};
///
/// // A sentinel from a failed C call is safe to store; scope exit
/// // closes nothing.
/// let _slot = OwnedSlot::<FdKind>::new(-1);
/// ```
#[derive(Debug)]
#[non_exhaustive]
pub struct FdKind;

impl ResourceKind for FdKind {
    type Handle = RawFd;

    fn release(fd: RawFd) {
        if fd < 0 {
            return;
        }

        // SAFETY: The slot owned this descriptor, so nothing else closes it;
        // close() is the release operation for descriptors.
        unsafe {
            libc::close(fd);
        }
    }
}

/// The socket descriptor kind: slots of this kind own a socket's [`RawFd`]
/// and close it at scope exit.
///
/// Only available on Unix hosts, where sockets are ordinary descriptors.
/// Kept distinct from [`FdKind`] so code states which resource it means.
#[derive(Debug)]
#[non_exhaustive]
pub struct SocketKind;

impl ResourceKind for SocketKind {
    type Handle = RawFd;

    fn release(fd: RawFd) {
        // SAFETY: As for `FdKind`; the slot owned this descriptor.
        unsafe {
            libc::close(fd);
        }
    }
}
