//! Terminal driver for the TUI.
//!
//! Implements the [`Driver`] trait for terminal I/O using crossterm for raw
//! mode, keyboard events and cursor addressing.

use std::{
    io::{self, Stdout, Write, stdout},
    thread,
    time::Duration,
};

use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use tickbox_app::{App, ByteSource, Driver, PollResult};

use crate::{BoxGeometry, Keyboard, ShutdownSignal, TuiError, render};

/// Raw mode held for as long as the guard lives.
///
/// Raw mode is process-global terminal state. Dropping the guard restores the
/// original mode on every exit path: normal quit, errors, panics and
/// termination signals (through [`ShutdownSignal`]).
#[derive(Debug)]
pub struct RawModeGuard {
    _private: (),
}

impl RawModeGuard {
    /// Switch the terminal to raw mode (no echo, no line buffering).
    pub fn acquire() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(Self { _private: () })
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(e) = disable_raw_mode() {
            tracing::warn!(error = %e, "failed to restore terminal mode");
        }
    }
}

/// The drawn box on some output.
///
/// Draws the frame when created and parks the cursor below the box when
/// dropped.
#[derive(Debug)]
pub struct Screen<W: Write> {
    out: W,
    geometry: BoxGeometry,
}

impl<W: Write> Screen<W> {
    /// Clear `out` and draw the empty box.
    pub fn open(mut out: W, geometry: BoxGeometry) -> io::Result<Self> {
        render::draw_frame(&mut out, &geometry)?;
        Ok(Self { out, geometry })
    }

    /// Redraw the counter field.
    pub fn show(&mut self, field: &str) -> io::Result<()> {
        render::draw_counter(&mut self.out, &self.geometry, field)
    }
}

impl<W: Write> Drop for Screen<W> {
    fn drop(&mut self) {
        if let Err(e) = render::park_cursor(&mut self.out, &self.geometry) {
            tracing::warn!(error = %e, "failed to park cursor");
        }
    }
}

/// Terminal driver implementing the [`Driver`] trait.
///
/// Owns the screen, the keyboard and the raw-mode guard. Fields drop in
/// declaration order, so the cursor is parked while raw mode is still held.
pub struct TerminalDriver {
    screen: Screen<Stdout>,
    keyboard: Keyboard,
    shutdown: ShutdownSignal,
    _raw_mode: RawModeGuard,
}

impl TerminalDriver {
    /// Enter raw mode and draw the empty box.
    pub fn new(geometry: BoxGeometry, shutdown: ShutdownSignal) -> Result<Self, TuiError> {
        let raw_mode = RawModeGuard::acquire()?;
        let screen = Screen::open(stdout(), geometry)?;

        Ok(Self { screen, keyboard: Keyboard::new(), shutdown, _raw_mode: raw_mode })
    }
}

impl ByteSource for TerminalDriver {
    type Error = TuiError;

    fn poll_byte(&mut self) -> Result<PollResult<u8>, Self::Error> {
        Ok(self.keyboard.poll_byte()?)
    }
}

impl Driver for TerminalDriver {
    fn render(&mut self, app: &App) -> Result<(), Self::Error> {
        self.screen.show(&app.counter_field())?;
        Ok(())
    }

    fn sleep(&mut self, period: Duration) {
        thread::sleep(period);
    }

    fn shutdown_requested(&mut self) -> bool {
        self.shutdown.is_raised()
    }
}
