//! Complete-transfer helpers over the raw gateway
//!
//! `sys_read`/`sys_write` report partial transfers and EINTR verbatim; these
//! loop until the whole buffer is moved, which is what most callers want.

use core::fmt;

use crate::{Errno, STDERR_FILENO, STDOUT_FILENO, SysResult, sys_read, sys_write};

/// Write the whole buffer, retrying short writes and EINTR.
pub fn write_all(fd: u64, mut buf: &[u8]) -> SysResult<()> {
    while !buf.is_empty() {
        match Errno::demux(sys_write(fd, buf.as_ptr(), buf.len() as u64)) {
            Ok(0) => return Err(Errno::EIO),
            Ok(n) => buf = &buf[n..],
            Err(Errno::EINTR) => log::trace!("write(fd={}) interrupted, retrying", fd),
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

/// Read until `buf` is full or end of file, retrying short reads and EINTR.
///
/// Returns the number of bytes read; less than `buf.len()` only at EOF.
pub fn read_full(fd: u64, buf: &mut [u8]) -> SysResult<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        let rest = &mut buf[filled..];
        match Errno::demux(sys_read(fd, rest.as_mut_ptr(), rest.len() as u64)) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(Errno::EINTR) => log::trace!("read(fd={}) interrupted, retrying", fd),
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// `core::fmt::Write` sink over a raw descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FdWriter(pub u64);

pub const STDOUT: FdWriter = FdWriter(STDOUT_FILENO);
pub const STDERR: FdWriter = FdWriter(STDERR_FILENO);

impl FdWriter {
    pub fn write_bytes(&mut self, buf: &[u8]) -> SysResult<()> {
        write_all(self.0, buf)
    }
}

impl fmt::Write for FdWriter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.write_bytes(s.as_bytes()).map_err(|_| fmt::Error)
    }
}
