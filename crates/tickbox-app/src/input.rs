//! Terminal-agnostic keyboard commands.

/// End-of-text byte a raw terminal delivers for Ctrl-C.
const CTRL_C: u8 = 0x03;

/// Operator command decoded from a single key byte.
///
/// Keyboard backends deliver the bytes a raw terminal would produce, so the
/// mapping is identical regardless of the terminal library in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    /// Leave the event loop (`q`, `Q`, Ctrl-C).
    Quit,
    /// Set the counter back to zero (`r`, `R`).
    Reset,
    /// Push the counter to the connected client (`w`).
    SendCounter,
}

impl KeyCommand {
    /// Decode a key byte. Unbound keys yield `None`.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b'q' | b'Q' | CTRL_C => Some(Self::Quit),
            b'r' | b'R' => Some(Self::Reset),
            b'w' => Some(Self::SendCounter),
            _ => None,
        }
    }
}
