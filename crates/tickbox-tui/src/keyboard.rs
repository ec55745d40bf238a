//! Non-blocking keyboard poller.
//!
//! crossterm hides the platform difference (readiness polling of stdin on
//! POSIX, console input handles on Windows). Key events are translated back
//! into the single bytes a raw POSIX terminal would deliver, so the command
//! mapping in `tickbox-app` stays byte-oriented.

use std::{io, time::Duration};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tickbox_app::{ByteSource, PollResult};

/// Keyboard reader. Requires raw mode to see single keystrokes.
#[derive(Debug, Default)]
pub struct Keyboard;

impl Keyboard {
    /// Create a keyboard reader.
    pub fn new() -> Self {
        Self
    }
}

impl ByteSource for Keyboard {
    type Error = io::Error;

    fn poll_byte(&mut self) -> io::Result<PollResult<u8>> {
        if !event::poll(Duration::ZERO)? {
            return Ok(PollResult::WouldBlock);
        }

        // One event per call; non-key events are consumed and ignored
        match event::read()? {
            Event::Key(key) => {
                Ok(key_to_byte(&key).map_or(PollResult::WouldBlock, PollResult::Ready))
            },
            _ => Ok(PollResult::WouldBlock),
        }
    }
}

/// Convert a crossterm key event to the byte a raw terminal would produce.
///
/// Returns `None` for releases, repeats and keys without a single-byte form.
pub fn key_to_byte(key: &KeyEvent) -> Option<u8> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    match key.code {
        KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let byte = u8::try_from(c).ok().filter(u8::is_ascii_alphabetic)?;
            Some(byte.to_ascii_uppercase() & 0x1f)
        },
        KeyCode::Char(c) => u8::try_from(c).ok().filter(u8::is_ascii),
        KeyCode::Enter => Some(b'\r'),
        KeyCode::Tab => Some(b'\t'),
        KeyCode::Backspace => Some(0x7f),
        KeyCode::Esc => Some(0x1b),
        _ => None,
    }
}
