//! Termination signals delivered to the test process.
//!
//! Kept in its own test binary: handlers are process-global, and a second
//! signal after the flag is raised exits the process.

#![cfg(unix)]

use signal_hook::{consts::SIGTERM, low_level};
use tickbox_tui::ShutdownSignal;

#[test]
fn sigterm_raises_shutdown_flag() {
    let signal = ShutdownSignal::register().unwrap();
    assert!(!signal.is_raised());

    low_level::raise(SIGTERM).unwrap();

    assert!(signal.is_raised());
}
