//! Non-blocking I/O capabilities.
//!
//! The event loop never touches platform primitives directly. Each backend
//! (crossterm keyboard, `std::net` sockets, simulation doubles) maps its own
//! readiness mechanism onto [`PollResult`], so "nothing yet", "here is data"
//! and "peer went away" look the same on every target.

use std::io;

/// Outcome of a single non-blocking poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollResult<T> {
    /// Data was available and has been consumed.
    Ready(T),
    /// Nothing is available right now. Try again next tick.
    WouldBlock,
    /// The source reached end of stream.
    Closed,
}

impl<T> PollResult<T> {
    /// The ready value, if any.
    pub fn ready(self) -> Option<T> {
        match self {
            Self::Ready(value) => Some(value),
            Self::WouldBlock | Self::Closed => None,
        }
    }
}

/// A source of single bytes that never blocks (the keyboard).
pub trait ByteSource {
    /// Backend error type. Returned only when the source itself is broken.
    type Error: std::error::Error + 'static;

    /// Poll for one byte.
    ///
    /// Must return immediately and consume at most one byte per call.
    fn poll_byte(&mut self) -> Result<PollResult<u8>, Self::Error>;
}

/// A bidirectional byte stream in non-blocking mode (the client socket).
pub trait DuplexStream {
    /// Read whatever is available into `buf` without blocking.
    ///
    /// Returns `Ready(n)` with `n > 0` on data, `Closed` on an orderly peer
    /// shutdown and `WouldBlock` for everything else, including transient
    /// read errors.
    fn try_read(&mut self, buf: &mut [u8]) -> PollResult<usize>;

    /// Make a single write attempt. Partial writes are not retried.
    fn try_write(&mut self, bytes: &[u8]) -> io::Result<usize>;
}

/// A listening endpoint in non-blocking mode.
pub trait Acceptor {
    /// Stream type produced for accepted connections.
    type Stream: DuplexStream;

    /// Take one pending connection, if there is one.
    ///
    /// Returned streams are already in non-blocking mode. Accept failures are
    /// reported as `None`.
    fn try_accept(&mut self) -> Option<Self::Stream>;
}
