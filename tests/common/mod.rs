//! Shared test utilities
#![allow(dead_code)]

use std::ffi::CString;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use goku_sys::{O_CREAT, O_TRUNC, O_WRONLY, sys_close, sys_open, sys_write};

/// Scratch file path that is removed on drop
pub struct TempPath {
    path: PathBuf,
    cpath: CString,
}

impl TempPath {
    pub fn new(tag: &str) -> Self {
        let path = std::env::temp_dir().join(format!(
            "goku-sys-{}-{}-{:?}",
            tag,
            std::process::id(),
            std::thread::current().id()
        ));
        let cpath = CString::new(path.to_str().unwrap()).unwrap();
        Self { path, cpath }
    }

    /// NUL-terminated path for the raw wrappers
    pub fn as_ptr(&self) -> *const u8 {
        self.cpath.as_ptr().cast()
    }

    /// Create the file with `contents` using only raw syscalls.
    pub fn create_with(&self, contents: &[u8]) {
        let fd = sys_open(self.as_ptr(), O_WRONLY | O_CREAT | O_TRUNC, 0o644);
        assert!(fd >= 0, "open failed: {}", fd);
        let ret = sys_write(fd as u64, contents.as_ptr(), contents.len() as u64);
        assert_eq!(ret, contents.len() as i64);
        assert_eq!(sys_close(fd as u64), 0);
    }
}

impl Drop for TempPath {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

/// Descriptor numbers are process-wide and reused lowest-first; tests that
/// close and then reuse a number must not race with tests that open files.
static FD_LOCK: Mutex<()> = Mutex::new(());

pub fn serial() -> MutexGuard<'static, ()> {
    FD_LOCK.lock().unwrap_or_else(|e| e.into_inner())
}
