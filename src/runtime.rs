//! C runtime collaborators (feature `libc`)
//!
//! Everything else in this crate talks to the kernel directly. These few
//! services come from the C library instead: the vDSO-backed monotonic clock,
//! `free`, and glibc's unwinder-based `backtrace`/`backtrace_symbols`.

use core::ffi::{CStr, c_char, c_int, c_void};

use crate::Timespec;

unsafe extern "C" {
    // <execinfo.h>; not exposed by the libc crate
    fn backtrace(buffer: *mut *mut c_void, size: c_int) -> c_int;
    fn backtrace_symbols(buffer: *const *mut c_void, size: c_int) -> *mut *mut c_char;
}

/// Current CLOCK_MONOTONIC reading
pub fn clock_mono() -> Timespec {
    // Cannot fail for CLOCK_MONOTONIC with a valid pointer
    let ts = unsafe {
        let mut ts: libc::timespec = core::mem::zeroed();
        libc::clock_gettime(libc::CLOCK_MONOTONIC, &mut ts);
        ts
    };
    Timespec::new(ts.tv_sec as i64, ts.tv_nsec as i64)
}

/// Release memory obtained from the C allocator. Null is a no-op.
///
/// # Safety
///
/// `ptr` must be null or a live allocation from malloc and friends.
pub unsafe fn free(ptr: *mut c_void) {
    unsafe { libc::free(ptr) }
}

/// Library-provided stack capture (uses unwind tables, not frame pointers).
///
/// Returns the number of entries written into `buf`.
pub fn capture_backtrace(buf: &mut [usize]) -> usize {
    let size = buf.len().min(c_int::MAX as usize) as c_int;
    let n = unsafe { backtrace(buf.as_mut_ptr().cast(), size) };
    n.max(0) as usize
}

/// Symbol strings for a set of return addresses, owned by the C allocator
pub struct SymbolizedTrace {
    symbols: *mut *mut c_char,
    len: usize,
}

impl SymbolizedTrace {
    /// Resolve `addrs` via `backtrace_symbols`; `None` if the library could
    /// not allocate the result.
    pub fn resolve(addrs: &[usize]) -> Option<Self> {
        let len = addrs.len().min(c_int::MAX as usize);
        let symbols = unsafe { backtrace_symbols(addrs.as_ptr().cast(), len as c_int) };
        if symbols.is_null() {
            return None;
        }
        Some(Self { symbols, len })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn get(&self, idx: usize) -> Option<&CStr> {
        if idx >= self.len {
            return None;
        }
        // The array and its strings live in one allocation released in Drop
        unsafe {
            let s = *self.symbols.add(idx);
            if s.is_null() { None } else { Some(CStr::from_ptr(s)) }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &CStr> + '_ {
        (0..self.len).filter_map(move |i| self.get(i))
    }
}

impl Drop for SymbolizedTrace {
    fn drop(&mut self) {
        unsafe { free(self.symbols.cast()) };
    }
}
