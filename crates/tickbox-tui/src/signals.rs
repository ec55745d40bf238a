//! Termination signals as a loop quit source.
//!
//! SIGTERM, SIGHUP and SIGINT would otherwise kill the process before the
//! raw-mode guard runs. Instead each one raises a flag that the event loop
//! polls once per tick, so the normal shutdown path restores the terminal.
//! A second signal while the flag is already raised terminates immediately.
//!
//! Raw mode turns Ctrl-C into a key byte, so SIGINT only arrives from
//! `kill`. On non-Unix targets nothing is registered and the flag stays low.

use std::{
    io,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

/// Flag raised by a termination signal.
#[derive(Debug, Clone, Default)]
pub struct ShutdownSignal {
    raised: Arc<AtomicBool>,
}

impl ShutdownSignal {
    /// Create a flag that no signal is connected to.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a flag raised by SIGTERM, SIGHUP and SIGINT.
    ///
    /// # Errors
    ///
    /// Returns an error if a handler cannot be installed.
    pub fn register() -> io::Result<Self> {
        let signal = Self::new();
        signal.install()?;
        Ok(signal)
    }

    #[cfg(unix)]
    fn install(&self) -> io::Result<()> {
        use signal_hook::{
            consts::{SIGHUP, SIGINT, SIGTERM},
            flag,
        };

        for sig in [SIGTERM, SIGHUP, SIGINT] {
            // Order matters: the exit check must see the flag before this
            // delivery raises it.
            flag::register_conditional_shutdown(sig, 1, Arc::clone(&self.raised))?;
            flag::register(sig, Arc::clone(&self.raised))?;
        }
        tracing::debug!("termination signal handlers installed");
        Ok(())
    }

    #[cfg(not(unix))]
    fn install(&self) -> io::Result<()> {
        Ok(())
    }

    /// Raise the flag by hand.
    pub fn raise(&self) {
        self.raised.store(true, Ordering::SeqCst);
    }

    /// Check if a termination signal arrived.
    pub fn is_raised(&self) -> bool {
        self.raised.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_low() {
        assert!(!ShutdownSignal::new().is_raised());
    }

    #[test]
    fn clones_share_the_flag() {
        let signal = ShutdownSignal::new();
        let observer = signal.clone();

        signal.raise();
        assert!(observer.is_raised());
    }
}
