//! Process tests
//!
//! - exit() hands the status to the parent unmodified
//! - exit_group() does the same for a whole thread group
//! - rdtsc-based cpu_clock advances

use std::process::Command;

use goku_sys::cpu_clock;
use pretty_assertions::assert_eq;

fn probe(args: &[&str]) -> Option<i32> {
    let out = Command::new(env!("CARGO_BIN_EXE_exit_probe"))
        .args(args)
        .output()
        .unwrap();
    // Nothing may run after exit, so nothing may be printed either
    assert!(out.stdout.is_empty());
    out.status.code()
}

#[test]
fn exit_status_passes_through() {
    assert_eq!(probe(&["42"]), Some(42));
    assert_eq!(probe(&["0"]), Some(0));
    assert_eq!(probe(&["255"]), Some(255));
}

#[test]
fn exit_status_keeps_low_byte() {
    assert_eq!(probe(&["263"]), Some(7));
}

#[test]
fn exit_group_status_passes_through() {
    assert_eq!(probe(&["3", "--group"]), Some(3));
}

#[test]
fn cpu_clock_advances() {
    let start = cpu_clock();
    let mut spin = 0u64;
    for i in 0..10_000u64 {
        spin = std::hint::black_box(spin.wrapping_add(i));
    }
    let end = cpu_clock();
    assert!(start != 0);
    assert!(end != start);
}
