//! x86_64 Linux syscall wrappers
//!
//! # Calling Convention
//! - Syscall number in RAX
//! - Arguments in RDI, RSI, RDX, R10, R8, R9
//! - Return value in RAX
//! - RCX and R11 are clobbered by the syscall instruction
//!
//! None of the asm blocks pass `nomem` or `readonly`: the kernel may read or
//! write any memory reachable through the arguments, so the compiler has to
//! treat every call as a full memory barrier.
//!
//! Every wrapper returns the raw RAX value. Negative values in
//! `-4095..=-1` are `-errno`; see [`crate::Errno::demux`] for a checked view.

use super::FileStat;

// ============================================================================
// x86_64 Linux syscall numbers
// ============================================================================

pub const SYS_READ: u64 = 0;
pub const SYS_WRITE: u64 = 1;
pub const SYS_OPEN: u64 = 2;
pub const SYS_CLOSE: u64 = 3;
pub const SYS_STAT: u64 = 4;
pub const SYS_MMAP: u64 = 9;
pub const SYS_MUNMAP: u64 = 11;
pub const SYS_IOCTL: u64 = 16;
pub const SYS_EXIT: u64 = 60;
pub const SYS_EXIT_GROUP: u64 = 231;

// ============================================================================
// Syscall wrapper functions
// ============================================================================

/// read(fd, buf, len)
///
/// Returns the number of bytes read, which may be short.
#[inline(always)]
pub fn sys_read(fd: u64, buf: *mut u8, len: u64) -> i64 {
    let ret: i64;
    unsafe {
        core::arch::asm!(
            "syscall",
            in("rax") SYS_READ,
            in("rdi") fd,
            in("rsi") buf,
            in("rdx") len,
            lateout("rax") ret,
            out("rcx") _,
            out("r11") _,
            options(nostack),
        );
    }
    ret
}

/// write(fd, buf, len)
///
/// Returns the number of bytes written, which may be short.
#[inline(always)]
pub fn sys_write(fd: u64, buf: *const u8, len: u64) -> i64 {
    let ret: i64;
    unsafe {
        core::arch::asm!(
            "syscall",
            in("rax") SYS_WRITE,
            in("rdi") fd,
            in("rsi") buf,
            in("rdx") len,
            lateout("rax") ret,
            out("rcx") _,
            out("r11") _,
            options(nostack),
        );
    }
    ret
}

/// open(path, flags, mode)
///
/// `path` must be NUL-terminated.
#[inline(always)]
pub fn sys_open(path: *const u8, flags: u32, mode: u32) -> i64 {
    let ret: i64;
    unsafe {
        core::arch::asm!(
            "syscall",
            in("rax") SYS_OPEN,
            in("rdi") path,
            in("rsi") flags as u64,
            in("rdx") mode as u64,
            lateout("rax") ret,
            out("rcx") _,
            out("r11") _,
            options(nostack),
        );
    }
    ret
}

/// close(fd)
#[inline(always)]
pub fn sys_close(fd: u64) -> i64 {
    let ret: i64;
    unsafe {
        core::arch::asm!(
            "syscall",
            in("rax") SYS_CLOSE,
            in("rdi") fd,
            lateout("rax") ret,
            out("rcx") _,
            out("r11") _,
            options(nostack),
        );
    }
    ret
}

/// stat(pathname, statbuf)
///
/// `statbuf` is only written on success.
#[inline(always)]
pub fn sys_stat(pathname: *const u8, statbuf: *mut FileStat) -> i64 {
    let ret: i64;
    unsafe {
        core::arch::asm!(
            "syscall",
            in("rax") SYS_STAT,
            in("rdi") pathname,
            in("rsi") statbuf,
            lateout("rax") ret,
            out("rcx") _,
            out("r11") _,
            options(nostack),
        );
    }
    ret
}

/// mmap(addr, length, prot, flags, fd, offset)
///
/// `addr` is a placement hint (0 lets the kernel choose) and is passed
/// through untouched. On success the mapping's base address is returned.
#[inline(always)]
pub fn sys_mmap(addr: u64, length: u64, prot: u32, flags: u32, fd: i32, offset: u64) -> i64 {
    let ret: i64;
    unsafe {
        core::arch::asm!(
            "syscall",
            in("rax") SYS_MMAP,
            in("rdi") addr,
            in("rsi") length,
            in("rdx") prot as u64,
            in("r10") flags as u64,
            in("r8") fd as i64 as u64,
            in("r9") offset,
            lateout("rax") ret,
            out("rcx") _,
            out("r11") _,
            options(nostack),
        );
    }
    ret
}

/// munmap(addr, length) - unmap memory
#[inline(always)]
pub fn sys_munmap(addr: u64, length: u64) -> i64 {
    let ret: i64;
    unsafe {
        core::arch::asm!(
            "syscall",
            in("rax") SYS_MUNMAP,
            in("rdi") addr,
            in("rsi") length,
            lateout("rax") ret,
            out("rcx") _,
            out("r11") _,
            options(nostack),
        );
    }
    ret
}

/// ioctl(fd, request, arg) - device control
///
/// Whatever `arg` points at may be read or written by the driver.
#[inline(always)]
pub fn sys_ioctl(fd: u64, request: u64, arg: *mut u8) -> i64 {
    let ret: i64;
    unsafe {
        core::arch::asm!(
            "syscall",
            in("rax") SYS_IOCTL,
            in("rdi") fd,
            in("rsi") request,
            in("rdx") arg,
            lateout("rax") ret,
            out("rcx") _,
            out("r11") _,
            options(nostack),
        );
    }
    ret
}

/// exit(status) - terminate the calling process
///
/// The status is handed to the kernel unmodified; the parent sees its low
/// byte. Strictly this ends the calling thread, which is the whole process
/// as long as no other threads were spawned. Use [`sys_exit_group`] otherwise.
#[inline(always)]
pub fn sys_exit(status: u64) -> ! {
    unsafe {
        core::arch::asm!(
            "syscall",
            in("rax") SYS_EXIT,
            in("rdi") status,
            options(noreturn, nostack),
        );
    }
}

/// exit_group(status) - terminate every thread in the process
#[inline(always)]
pub fn sys_exit_group(status: u64) -> ! {
    unsafe {
        core::arch::asm!(
            "syscall",
            in("rax") SYS_EXIT_GROUP,
            in("rdi") status,
            options(noreturn, nostack),
        );
    }
}

// ============================================================================
// CPU clock
// ============================================================================

/// Read the time-stamp counter
///
/// Not serializing; successive reads on one core are monotonic but carry no
/// wall-clock meaning.
#[inline(always)]
pub fn cpu_clock() -> u64 {
    let low: u32;
    let high: u32;
    unsafe {
        core::arch::asm!(
            "rdtsc",
            out("eax") low,
            out("edx") high,
            options(nomem, nostack, preserves_flags),
        );
    }
    ((high as u64) << 32) | low as u64
}
