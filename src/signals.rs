//! Signal handling for minish
//!
//! The interpreter catches SIGINT so Ctrl-C while a pipeline runs stops the
//! children but not the interpreter. Caught signals revert to their default
//! action across exec, so children still die on Ctrl-C.

use std::sync::atomic::{AtomicBool, Ordering};

/// Set by the SIGINT handler
static INTERRUPTED: AtomicBool = AtomicBool::new(false);

/// Install the SIGINT handler
#[cfg(unix)]
pub fn setup_signal_handlers() {
    use signal_hook::low_level;

    // The handler only touches an atomic, which is async-signal-safe
    let registered = unsafe {
        low_level::register(signal_hook::consts::SIGINT, || {
            INTERRUPTED.store(true, Ordering::SeqCst);
        })
    };
    if let Err(e) = registered {
        log::warn!("could not install SIGINT handler: {}", e);
    }
}

#[cfg(not(unix))]
pub fn setup_signal_handlers() {}

/// Check whether SIGINT was received since the last call, and clear it
pub fn take_interrupt() -> bool {
    INTERRUPTED.swap(false, Ordering::SeqCst)
}
