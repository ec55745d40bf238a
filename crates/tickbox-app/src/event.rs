//! Application input events.
//!
//! Events originate from three sources:
//! - The keyboard (one raw byte per event).
//! - The client channel (connect, terminator, peer close).
//! - The tick at the end of every loop iteration.
//! - The host asking the process to terminate.

/// Events processed by the App state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// Raw key byte from the keyboard.
    Key(u8),

    /// Periodic tick.
    Tick,

    /// A client was accepted into the empty slot.
    ClientConnected,

    /// The client sent a read containing at least one terminator.
    ClientTerminator,

    /// The client closed its side of the connection.
    ClientClosed,

    /// The host asked the process to terminate (SIGTERM, SIGHUP, SIGINT).
    Shutdown,
}
