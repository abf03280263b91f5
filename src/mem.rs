//! Typed memory mapping
//!
//! [`Prot`] and [`MapFlags`] in, [`SysResult`] out. The raw
//! `sys_mmap`/`sys_munmap` stay available for callers that want the bare
//! return value.

use crate::{Errno, MapFlags, Prot, SysResult, sys_mmap, sys_munmap};

/// Map `len` bytes and return the base of the mapping.
///
/// `addr` is a placement hint, 0 lets the kernel choose. `fd` is ignored for
/// anonymous mappings; pass -1.
pub fn map(
    addr: u64,
    len: u64,
    prot: Prot,
    flags: MapFlags,
    fd: i32,
    offset: u64,
) -> SysResult<*mut u8> {
    let ret = sys_mmap(addr, len, prot.bits(), flags.bits(), fd, offset);
    Errno::demux(ret).map(|base| base as *mut u8)
}

/// Private, zero-filled memory placed by the kernel
pub fn map_anonymous(len: u64, prot: Prot) -> SysResult<*mut u8> {
    map(0, len, prot, MapFlags::PRIVATE | MapFlags::ANONYMOUS, -1, 0)
}

/// Unmap `len` bytes at `addr`.
///
/// # Safety
///
/// Nothing may still reference memory in the range.
pub unsafe fn unmap(addr: *mut u8, len: u64) -> SysResult<()> {
    Errno::demux(sys_munmap(addr as u64, len)).map(|_| ())
}
