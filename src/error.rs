//! Typed view of raw syscall results
//!
//! The gateway returns `-errno` in a plain `i64`. `Errno` is an opt-in layer on
//! top of that for callers that want `Result` and `?`; the raw wrappers never
//! produce it themselves.
//!
//! Errno values are identical across x86-64 and aarch64 Linux ABIs.

use core::fmt;

/// Kernels never return an errno above this; larger negative values are
/// payloads (e.g. mmap addresses in the upper half).
const MAX_ERRNO: i64 = 4095;

/// Positive Linux errno value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Errno(i32);

impl Errno {
    /// Operation not permitted
    pub const EPERM: Errno = Errno(1);
    /// No such file or directory
    pub const ENOENT: Errno = Errno(2);
    /// Interrupted system call
    pub const EINTR: Errno = Errno(4);
    /// I/O error
    pub const EIO: Errno = Errno(5);
    /// Bad file descriptor
    pub const EBADF: Errno = Errno(9);
    /// Resource temporarily unavailable
    pub const EAGAIN: Errno = Errno(11);
    /// Out of memory
    pub const ENOMEM: Errno = Errno(12);
    /// Permission denied
    pub const EACCES: Errno = Errno(13);
    /// Bad address
    pub const EFAULT: Errno = Errno(14);
    /// File exists
    pub const EEXIST: Errno = Errno(17);
    /// Not a directory
    pub const ENOTDIR: Errno = Errno(20);
    /// Is a directory
    pub const EISDIR: Errno = Errno(21);
    /// Invalid argument
    pub const EINVAL: Errno = Errno(22);
    /// Inappropriate ioctl for device
    pub const ENOTTY: Errno = Errno(25);
    /// No space left on device
    pub const ENOSPC: Errno = Errno(28);
    /// Broken pipe
    pub const EPIPE: Errno = Errno(32);
    /// Function not implemented
    pub const ENOSYS: Errno = Errno(38);

    pub const fn new(code: i32) -> Self {
        Errno(code)
    }

    /// Get the positive errno value
    #[inline]
    pub const fn code(self) -> i32 {
        self.0
    }

    /// Negative errno, as the kernel returns it
    ///
    /// Example: `Errno::EBADF.sysret()` returns -9
    #[inline]
    pub const fn sysret(self) -> i64 {
        -(self.0 as i64)
    }

    /// Split a raw syscall return into payload or error.
    #[inline]
    pub const fn demux(ret: i64) -> SysResult<usize> {
        if ret < 0 && ret >= -MAX_ERRNO {
            Err(Errno(-ret as i32))
        } else {
            Ok(ret as usize)
        }
    }

    /// EINTR and EAGAIN are worth another attempt
    #[inline]
    pub const fn is_retryable(self) -> bool {
        matches!(self, Errno::EINTR | Errno::EAGAIN)
    }

    /// Short symbolic name for logs
    pub const fn name(self) -> &'static str {
        match self {
            Errno::EPERM => "EPERM",
            Errno::ENOENT => "ENOENT",
            Errno::EINTR => "EINTR",
            Errno::EIO => "EIO",
            Errno::EBADF => "EBADF",
            Errno::EAGAIN => "EAGAIN",
            Errno::ENOMEM => "ENOMEM",
            Errno::EACCES => "EACCES",
            Errno::EFAULT => "EFAULT",
            Errno::EEXIST => "EEXIST",
            Errno::ENOTDIR => "ENOTDIR",
            Errno::EISDIR => "EISDIR",
            Errno::EINVAL => "EINVAL",
            Errno::ENOTTY => "ENOTTY",
            Errno::ENOSPC => "ENOSPC",
            Errno::EPIPE => "EPIPE",
            Errno::ENOSYS => "ENOSYS",
            _ => "EUNKNOWN",
        }
    }

    const fn message(self) -> Option<&'static str> {
        Some(match self {
            Errno::EPERM => "Operation not permitted",
            Errno::ENOENT => "No such file or directory",
            Errno::EINTR => "Interrupted system call",
            Errno::EIO => "Input/output error",
            Errno::EBADF => "Bad file descriptor",
            Errno::EAGAIN => "Resource temporarily unavailable",
            Errno::ENOMEM => "Cannot allocate memory",
            Errno::EACCES => "Permission denied",
            Errno::EFAULT => "Bad address",
            Errno::EEXIST => "File exists",
            Errno::ENOTDIR => "Not a directory",
            Errno::EISDIR => "Is a directory",
            Errno::EINVAL => "Invalid argument",
            Errno::ENOTTY => "Inappropriate ioctl for device",
            Errno::ENOSPC => "No space left on device",
            Errno::EPIPE => "Broken pipe",
            Errno::ENOSYS => "Function not implemented",
            _ => return None,
        })
    }
}

impl fmt::Display for Errno {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.message() {
            Some(msg) => write!(f, "{} ({})", msg, self.name()),
            None => write!(f, "errno {}", self.0),
        }
    }
}

impl core::error::Error for Errno {}

/// Result type alias for checked syscalls
pub type SysResult<T> = Result<T, Errno>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn demux_splits_on_errno_range() {
        assert_eq!(Errno::demux(0), Ok(0));
        assert_eq!(Errno::demux(17), Ok(17));
        assert_eq!(Errno::demux(-2), Err(Errno::ENOENT));
        assert_eq!(Errno::demux(-4095), Err(Errno::new(4095)));
        // High addresses come back negative when viewed as i64
        let addr = 0xffff_8000_0000_0000u64 as i64;
        assert_eq!(Errno::demux(addr), Ok(0xffff_8000_0000_0000usize));
        assert_eq!(Errno::demux(-4096), Ok((-4096i64) as usize));
    }

    #[test]
    fn sysret_is_negated_code() {
        assert_eq!(Errno::EBADF.sysret(), -9);
        assert_eq!(Errno::demux(Errno::EINVAL.sysret()), Err(Errno::EINVAL));
    }

    #[test]
    fn retryable_and_names() {
        assert!(Errno::EINTR.is_retryable());
        assert!(Errno::EAGAIN.is_retryable());
        assert!(!Errno::ENOENT.is_retryable());
        assert_eq!(Errno::ENOTTY.name(), "ENOTTY");
        assert_eq!(Errno::new(200).name(), "EUNKNOWN");
    }

    #[test]
    fn display_includes_message() {
        assert_eq!(
            Errno::ENOENT.to_string(),
            "No such file or directory (ENOENT)"
        );
        assert_eq!(Errno::new(200).to_string(), "errno 200");
    }
}
