//! Exit probe - terminates with the status given on the command line
//!
//! Usage: exit_probe [STATUS] [--group]
//!
//! Used by the process tests to observe what the parent sees after `exit`.

use goku_sys::{sys_exit, sys_exit_group};

fn main() {
    let mut args = std::env::args().skip(1);
    let status = args.next().and_then(|s| s.parse::<u64>().ok()).unwrap_or(0);
    let group = args.next().as_deref() == Some("--group");

    if group {
        sys_exit_group(status)
    } else {
        sys_exit(status)
    }
}
