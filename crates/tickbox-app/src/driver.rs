//! Driver trait for abstracting the hosting platform.
//!
//! The [`Driver`] trait decouples the event loop from the terminal. A driver
//! is the keyboard (as a [`ByteSource`]), the display and the clock. The
//! network side is supplied separately as an [`crate::Acceptor`].
//!
//! # Implementations
//!
//! - **TUI**: crossterm keyboard, cursor-addressed box, `thread::sleep`
//! - **Simulation**: scripted keys, recorded frames, virtual sleep

use std::time::Duration;

use crate::{App, ByteSource};

/// Platform-specific keyboard, display and sleep.
///
/// Implementations provide platform-specific I/O while the generic
/// [`Runtime`](crate::Runtime) handles orchestration logic. This ensures
/// the same loop runs in production and in simulation.
pub trait Driver: ByteSource {
    /// Redraw the counter field from the application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the display cannot be written.
    fn render(&mut self, app: &App) -> Result<(), Self::Error>;

    /// Suspend for one tick period. The loop's only yield point.
    fn sleep(&mut self, period: Duration);

    /// Check if the host asked the process to terminate.
    ///
    /// Polled once per iteration. A `true` ends the loop after that
    /// iteration's render, through the same exit path as a quit key.
    fn shutdown_requested(&mut self) -> bool {
        false
    }
}
