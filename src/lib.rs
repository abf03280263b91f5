//! Direct Linux syscalls and frame-pointer stack traces for x86_64
//!
//! This crate talks to the kernel without a C runtime in between. Each
//! syscall wrapper places its arguments in the registers the kernel ABI
//! demands and returns RAX untouched.
//!
//! # Calling Convention
//!
//! | Aspect | x86_64 |
//! |--------|--------|
//! | Instruction | `syscall` |
//! | Syscall Number | RAX |
//! | Arguments | RDI, RSI, RDX, R10, R8, R9 |
//! | Return Value | RAX (`-errno` on failure) |
//! | Clobbered | RCX, R11 |
//!
//! # Modules
//!
//! - syscall wrappers (`sys_*`) and `cpu_clock`
//! - [`trace`] - stack capture by walking saved frame pointers
//! - [`io`] - whole-buffer read/write built on the raw wrappers
//! - [`mem`] - mmap/munmap with typed flags and `Errno` results
//! - [`runtime`] - C library collaborators (feature `libc`)
//!
//! Raw results are plain `i64`; [`Errno::demux`] turns one into a `Result`.

#![cfg_attr(not(test), no_std)]

#[cfg(not(all(target_arch = "x86_64", target_os = "linux")))]
compile_error!("goku-sys only supports x86_64 Linux");

mod x86_64;
pub use x86_64::*;

mod types;
pub use types::*;

mod error;
pub use error::{Errno, SysResult};

pub mod io;
pub mod mem;
pub mod trace;

#[cfg(feature = "libc")]
pub mod runtime;

pub use trace::{StackTrace, save_stack_trace};
