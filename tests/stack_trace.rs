//! Frame-pointer stack walker tests
//!
//! Buffers are sized so the walk never leaves frames compiled in this crate;
//! frames of the test harness are not guaranteed to keep rbp.
//!
//! The test profile is optimized (see Cargo.toml) so these run against the
//! same code generation a release build gets; `cargo test --release` covers
//! the LTO build as well.

use std::hint::black_box;

use goku_sys::{StackTrace, save_stack_trace};
use pretty_assertions::assert_eq;

/// Return addresses land within this distance of a function's entry
const FN_SPAN: usize = 0x1000;

/// `levels + 1` nested frames of `recurse`, then capture from the innermost.
#[inline(never)]
fn recurse(levels: usize, buf: &mut [usize]) -> usize {
    if levels == 0 {
        black_box(save_stack_trace(black_box(buf)))
    } else {
        black_box(recurse(black_box(levels - 1), buf))
    }
}

fn recurse_addr() -> usize {
    (recurse as fn(usize, &mut [usize]) -> usize) as usize
}

fn within(pc: usize, entry: usize) -> bool {
    pc > entry && pc - entry < FN_SPAN
}

#[test]
fn empty_buffer_captures_nothing() {
    let mut buf: [usize; 0] = [];
    assert_eq!(save_stack_trace(&mut buf), 0);
}

#[inline(never)]
fn capture_full_chain() {
    const LEVELS: usize = 5;
    // One return into each of the LEVELS + 1 recurse frames, then into us
    const DEPTH: usize = LEVELS + 2;

    let mut buf = [0usize; DEPTH];
    let n = recurse(LEVELS, &mut buf);
    assert_eq!(n, DEPTH);

    let entry = recurse_addr();
    // Innermost: the base-case call site in recurse
    assert!(within(buf[0], entry), "{:#x} not in recurse", buf[0]);
    // Then one identical return address per recursive call
    for pc in &buf[1..=LEVELS] {
        assert_eq!(*pc, buf[1]);
        assert!(within(*pc, entry));
    }
    assert_ne!(buf[0], buf[1]);
    // Outermost: back in this function
    let me = (capture_full_chain as fn()) as usize;
    assert!(within(buf[LEVELS + 1], me), "{:#x} not in caller", buf[LEVELS + 1]);
}

#[test]
fn full_chain_innermost_first() {
    capture_full_chain();
}

#[test]
fn capacity_below_depth_truncates() {
    let mut buf = [usize::MAX; 16];
    let n = recurse(10, &mut buf[..3]);
    assert_eq!(n, 3);
    assert!(buf[..3].iter().all(|&pc| pc != usize::MAX && pc != 0));
    assert!(buf[3..].iter().all(|&pc| pc == usize::MAX));
    assert_eq!(buf[1], buf[2]);
}

#[test]
fn repeated_captures_agree() {
    let mut a = [0usize; 4];
    let mut b = [0usize; 4];
    assert_eq!(recurse(3, &mut a), 4);
    assert_eq!(recurse(3, &mut b), 4);
    assert_eq!(a, b);
}

#[inline(never)]
fn snapshot() -> StackTrace<2> {
    black_box(StackTrace::<2>::capture())
}

#[test]
fn owned_snapshot_formats_frames() {
    let trace = snapshot();
    assert_eq!(trace.len(), 2);
    let text = trace.to_string();
    assert_eq!(text.lines().count(), 2);
    assert!(text.starts_with("  #0: 0x"));
    // First frame is the return into snapshot(), then into this test
    let entry = (snapshot as fn() -> StackTrace<2>) as usize;
    assert!(within(trace.as_slice()[0], entry));
    let me = (owned_snapshot_formats_frames as fn()) as usize;
    assert!(within(trace.as_slice()[1], me));
}

#[inline(never)]
fn direct_capture(buf: &mut [usize]) -> usize {
    black_box(save_stack_trace(buf))
}

#[test]
fn first_entry_is_the_calling_function() {
    let mut buf = [0usize; 1];
    assert_eq!(direct_capture(&mut buf), 1);
    let entry = (direct_capture as fn(&mut [usize]) -> usize) as usize;
    assert!(within(buf[0], entry), "{:#x} not in direct_capture", buf[0]);
}
