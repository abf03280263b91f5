//! Frame-pointer stack traces
//!
//! Walks the `rbp` chain without consulting DWARF. Every frame on the path
//! must keep a frame pointer (`-C force-frame-pointers=yes`, set in
//! `.cargo/config.toml`); a function that omits it ends the walk early or
//! yields a bogus tail. Nothing checks the chain against the real stack
//! bounds, so a corrupted `rbp` can still fault.
//!
//! Frame record layout at `rbp`:
//!
//! ```text
//! rbp + 8  -> return address into the caller
//! rbp + 0  -> caller's saved rbp
//! ```

use core::fmt;

/// Fill `buf` with return addresses, innermost first.
///
/// The first entry is the return address into the function that called
/// `save_stack_trace`. Returns how many entries were written, which is less
/// than `buf.len()` when the chain ends first.
#[inline(always)]
pub fn save_stack_trace(buf: &mut [usize]) -> usize {
    unsafe { walk_current(buf.as_mut_ptr(), buf.len()) }
}

/// Push a frame record and walk from it.
///
/// The record is built by hand so its address does not depend on where the
/// optimizer places a prologue. It links to the caller's `rbp` and holds the
/// return address into the caller, which becomes entry 0.
#[unsafe(naked)]
unsafe extern "C" fn walk_current(buf: *mut usize, len: usize) -> usize {
    core::arch::naked_asm!(
        "push rbp",
        "mov rbp, rsp",
        // buf and len are already in rdi/rsi; the record is the third argument
        "mov rdx, rbp",
        "call {walk}",
        "pop rbp",
        "ret",
        walk = sym walk_from,
    )
}

extern "C" fn walk_from(buf: *mut usize, len: usize, fp: *const usize) -> usize {
    unsafe { walk_frames(fp, core::slice::from_raw_parts_mut(buf, len)) }
}

/// Walk a frame chain starting at `fp`.
///
/// Stops when `buf` is full or the saved frame pointer does not move to a
/// strictly higher address (stack bottom, cycle, or garbage). With an empty
/// `buf` no memory is read.
///
/// # Safety
///
/// `fp` and every record reachable from it through increasing links must be
/// readable for two words.
pub unsafe fn walk_frames(mut fp: *const usize, buf: &mut [usize]) -> usize {
    let mut i = 0;
    while i < buf.len() {
        let (next, pc) = unsafe { (*fp as *const usize, *fp.add(1)) };
        if next <= fp {
            return i;
        }
        buf[i] = pc;
        fp = next;
        i += 1;
    }
    i
}

/// Owned snapshot of up to `N` return addresses
#[derive(Clone, Copy)]
pub struct StackTrace<const N: usize> {
    frames: [usize; N],
    len: usize,
}

impl<const N: usize> StackTrace<N> {
    /// Capture the caller's stack.
    ///
    /// Entry 0 is the return address into the function calling `capture`.
    #[inline(always)]
    pub fn capture() -> Self {
        let mut frames = [0usize; N];
        let len = save_stack_trace(&mut frames);
        Self { frames, len }
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.frames[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn frames(&self) -> impl Iterator<Item = Frame> + '_ {
        self.as_slice().iter().enumerate().map(|(n, &pc)| Frame { n, pc })
    }

    /// Emit the trace through `log`, one frame per record.
    pub fn log(&self, level: log::Level) {
        log::log!(level, "Stack backtrace:");
        if self.is_empty() {
            log::log!(level, "{}", NO_FRAMES);
        }
        for frame in self.frames() {
            log::log!(level, "{}", frame);
        }
    }
}

const NO_FRAMES: &str = "  <no frames available>";

/// One line of a printed trace
struct Frame {
    n: usize,
    pc: usize,
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  #{}: {:#018x}", self.n, self.pc)
    }
}

impl<const N: usize> fmt::Debug for StackTrace<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.as_slice().iter().map(|pc| Hex(*pc)))
            .finish()
    }
}

impl<const N: usize> fmt::Display for StackTrace<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "{}", NO_FRAMES);
        }
        for frame in self.frames() {
            writeln!(f, "{}", frame)?;
        }
        Ok(())
    }
}

struct Hex(usize);

impl fmt::Debug for Hex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Maximum depth reported by [`log_stack_trace`]
const MAX_LOGGED_FRAMES: usize = 32;

/// Capture the current stack and log it, starting at the caller.
#[inline(always)]
pub fn log_stack_trace(level: log::Level) {
    StackTrace::<MAX_LOGGED_FRAMES>::capture().log(level);
}
